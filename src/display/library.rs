use serde::Serialize;

use crate::config::SiteConfig;
use crate::plan::Plan;

/// Download or reference link shown for library plans.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LibraryLink {
    pub text: &'static str,
    pub href: String,
    pub img: String,
    pub alt: &'static str,
}

impl LibraryLink {
    pub fn to_html(&self) -> String {
        format!(
            "<a href=\"{}\">{} <img width=\"20\" height=\"20\" src=\"{}\" alt=\"{}\"/></a>",
            self.href, self.text, self.img, self.alt,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LibraryPanel {
    pub links: Vec<LibraryLink>,
    /// Notes HTML, `<i>N/A</i>` when absent.
    pub notes: String,
}

/// Links and notes for a plan with library metadata.
pub fn library_panel(plan: &Plan, config: &SiteConfig) -> Option<LibraryPanel> {
    let meta = plan.library_metadata()?;
    let images = &config.images;
    let preview = plan.geometry_key().map(|key| config.geometry_url(key));

    let candidates = [
        ("Authoritative Link", meta.authoritative_link.clone(), &images.metadata_link, "authoritative link for this plan"),
        ("Preceding Enacted Plan", meta.predecessor_link.clone(), &images.metadata_arrow, "link to the preceding enacted plan"),
        ("Shapefile", meta.shapefile_file.clone(), &images.metadata_file, "link to a shapefile download"),
        ("Block Assignment File", meta.blockassign_file.clone(), &images.metadata_file, "link to a block assignment file download"),
        ("Preview GeoJSON", preview, &images.metadata_file, "link to a geojson download"),
    ];

    let links = candidates.into_iter()
        .filter_map(|(text, href, img, alt)| {
            let href = href.filter(|h| !h.is_empty())?;
            Some(LibraryLink { text, href, img: img.clone(), alt })
        })
        .collect();

    let notes = meta.notes.clone()
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "<i>N/A</i>".to_string());

    Some(LibraryPanel { links, notes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn skips_missing_links() {
        let plan = Plan::from_value(json!({
            "id": "abc",
            "geometry_key": "uploads/abc/geometry.json",
            "library_metadata": {"authoritative_link": "https://example.com/plan", "shapefile_file": ""},
        })).unwrap();
        let panel = library_panel(&plan, &SiteConfig::default()).unwrap();
        let texts: Vec<_> = panel.links.iter().map(|l| l.text).collect();
        assert_eq!(texts, ["Authoritative Link", "Preview GeoJSON"]);
        assert_eq!(panel.links[1].href, "https://planscore.s3.amazonaws.com/uploads/abc/geometry.json");
        assert_eq!(panel.notes, "<i>N/A</i>");
        assert!(panel.links[0].to_html().contains("alt=\"authoritative link for this plan\""));
    }

    #[test]
    fn absent_without_metadata() {
        let plan = Plan::from_value(json!({"id": "abc"})).unwrap();
        assert!(library_panel(&plan, &SiteConfig::default()).is_none());
    }
}
