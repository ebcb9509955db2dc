//! Site configuration: service endpoints, link targets and polling limits.
//!
//! Every field has a built-in default, so a JSON file only needs the keys it overrides.

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::bias::MetricKey;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub api_base: String,
    /// Endpoint returning `[form_action_url, fields]` for uploads.
    pub upload_url: String,
    /// Plan JSON location; `{id}` is replaced by the plan id.
    pub score_url_pattern: String,
    /// Prefix joined with a plan's `geometry_key`.
    pub geometry_prefix: String,
    /// Model documentation page; its `data/2020` or `2020` part is rewritten per model.
    pub model_url_pattern: String,
    /// Annual historical bias CSV files, `bias_<boundary>.csv` under this prefix.
    pub history_prefix: String,
    pub metric_urls: MetricUrls,
    pub images: ImageUrls,
    pub poll: PollSettings,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.planscore.org/".to_string(),
            upload_url: "https://api.planscore.org/upload".to_string(),
            score_url_pattern: "https://planscore.s3.amazonaws.com/uploads/{id}/index.json".to_string(),
            geometry_prefix: "https://planscore.s3.amazonaws.com/".to_string(),
            model_url_pattern: "https://planscore.org/models/data/2020/".to_string(),
            history_prefix: "https://planscore.org/static/".to_string(),
            metric_urls: MetricUrls::default(),
            images: ImageUrls::default(),
            poll: PollSettings::default(),
        }
    }
}

/// "Learn more" targets for each fairness metric.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricUrls {
    pub eg: String,
    pub pb: String,
    pub mm: String,
    pub d2: String,
}

impl Default for MetricUrls {
    fn default() -> Self {
        Self {
            eg: "https://planscore.org/metrics/efficiencygap/".to_string(),
            pb: "https://planscore.org/metrics/partisanbias/".to_string(),
            mm: "https://planscore.org/metrics/meanmedian/".to_string(),
            d2: "https://planscore.org/metrics/declination/".to_string(),
        }
    }
}

impl MetricUrls {
    pub fn get(&self, metric: MetricKey) -> &str {
        match metric {
            MetricKey::Eg | MetricKey::Overall => &self.eg,
            MetricKey::Pb => &self.pb,
            MetricKey::Mm => &self.mm,
            MetricKey::D2 => &self.d2,
        }
    }
}

/// Icons for library metadata links and hatch images for lean seat boxes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageUrls {
    pub metadata_link: String,
    pub metadata_arrow: String,
    pub metadata_file: String,
    pub lean_blue_pattern: String,
    pub lean_red_pattern: String,
}

impl Default for ImageUrls {
    fn default() -> Self {
        Self {
            metadata_link: "/static/metadata-link.svg".to_string(),
            metadata_arrow: "/static/metadata-arrow.svg".to_string(),
            metadata_file: "/static/metadata-file.svg".to_string(),
            lean_blue_pattern: "/static/lean-blue-pattern.png".to_string(),
            lean_red_pattern: "/static/lean-red-pattern.png".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollSettings {
    /// Delay between score page requests.
    pub score_interval_ms: u64,
    /// Delay between preread page requests.
    pub preread_interval_ms: u64,
    pub max_attempts: usize,
    /// Overall budget across attempts.
    pub timeout_secs: u64,
    /// Per-request HTTP timeout.
    pub request_timeout_secs: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            score_interval_ms: 5000,
            preread_interval_ms: 3000,
            max_attempts: 120,
            timeout_secs: 600,
            request_timeout_secs: 30,
        }
    }
}

impl PollSettings {
    #[inline] pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }

    #[inline] pub fn request_timeout(&self) -> Duration { Duration::from_secs(self.request_timeout_secs) }
}

impl SiteConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("[config] Failed to parse site config")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("[config] Failed to read {}", path.display()))?;
        Self::from_json_str(&contents)
    }

    /// Point the API endpoints at another deployment.
    pub fn with_api_base(mut self, base: &str) -> Self {
        let base = if base.ends_with('/') { base.to_string() } else { format!("{base}/") };
        self.upload_url = format!("{base}upload");
        self.api_base = base;
        self
    }

    /// Plan JSON URL for an upload id.
    pub fn score_url(&self, id: &str) -> String {
        crate::display::format_url(&self.score_url_pattern, id)
    }

    /// GeoJSON URL for a plan's geometry key.
    pub fn geometry_url(&self, geometry_key: &str) -> String {
        format!("{}{geometry_key}", self.geometry_prefix)
    }

    /// Historical bias CSV for a chamber code.
    pub fn history_csv_url(&self, csv_name: &str) -> String {
        format!("{}{csv_name}", self.history_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_files_keep_defaults() {
        let config = SiteConfig::from_json_str(r#"{"geometry_prefix": "http://localhost/", "poll": {"max_attempts": 3}}"#).unwrap();
        assert_eq!(config.geometry_prefix, "http://localhost/");
        assert_eq!(config.poll.max_attempts, 3);
        assert_eq!(config.poll.score_interval_ms, 5000);
        assert_eq!(config.metric_urls, MetricUrls::default());
    }

    #[test]
    fn urls() {
        let config = SiteConfig::default();
        assert_eq!(config.score_url("abc"), "https://planscore.s3.amazonaws.com/uploads/abc/index.json");
        assert_eq!(config.geometry_url("uploads/abc/geometry.json"), "https://planscore.s3.amazonaws.com/uploads/abc/geometry.json");
        assert_eq!(config.metric_urls.get(MetricKey::D2), "https://planscore.org/metrics/declination/");
    }

    #[test]
    fn reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        fs::write(&path, r#"{"api_base": "http://localhost:8000/"}"#).unwrap();
        assert_eq!(SiteConfig::from_file(&path).unwrap().api_base, "http://localhost:8000/");

        let moved = SiteConfig::default().with_api_base("http://localhost:9000");
        assert_eq!(moved.api_base, "http://localhost:9000/");
        assert_eq!(moved.upload_url, "http://localhost:9000/upload");
        assert!(SiteConfig::from_file(&dir.path().join("missing.json")).is_err());
    }
}
