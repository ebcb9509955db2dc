//! Presigned upload form: fetched from the upload-token endpoint, posted as multipart.

use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow, ensure};
use serde_json::Value;

use super::{Fetch, get_ok};

/// Where and how to POST a plan file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadForm {
    pub action: String,
    /// Hidden fields that must accompany the file.
    pub fields: BTreeMap<String, String>,
}

impl UploadForm {
    /// Decode the endpoint's `[action_url, {field: value}]` reply.
    pub fn from_value(value: &Value) -> Result<Self> {
        let parts = value.as_array()
            .filter(|parts| parts.len() == 2)
            .ok_or_else(|| anyhow!("[client::upload] Expected a two-element [url, fields] array"))?;

        let action = parts[0].as_str()
            .ok_or_else(|| anyhow!("[client::upload] Form action must be a string"))?
            .to_string();
        let fields = parts[1].as_object()
            .ok_or_else(|| anyhow!("[client::upload] Form fields must be an object"))?
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), value)
            })
            .collect();

        Ok(Self { action, fields })
    }

    /// GET the upload-token endpoint.
    pub fn fetch<F: Fetch + ?Sized>(fetcher: &mut F, url: &str) -> Result<Self> {
        let response = get_ok(fetcher, url)?;
        let form = Self::from_value(&response.json()?)?;
        tracing::debug!(action = %form.action, fields = form.fields.len(), "fetched upload form");
        Ok(form)
    }

    /// POST `file` with the form fields; returns the redirect target (the plan page).
    #[cfg(feature = "download")]
    pub fn submit(&self, file: &std::path::Path, timeout: std::time::Duration) -> Result<String> {
        let mut form = reqwest::blocking::multipart::Form::new();
        for (key, value) in &self.fields {
            form = form.text(key.clone(), value.clone());
        }
        let form = form.file("file", file)
            .with_context(|| format!("[client::upload] Failed to open {}", file.display()))?;

        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("planscore/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .build()
            .context("[client::upload] Failed to build HTTP client")?;

        tracing::info!(action = %self.action, file = %file.display(), "uploading plan");
        let response = client.post(&self.action).multipart(form).send()
            .with_context(|| format!("[client::upload] POST {}", self.action))?;
        let response = super::fetch::from_reqwest(response)?;

        ensure!(response.is_success(), "[client::upload] Upload returned status {}", response.status);
        response.location
            .ok_or_else(|| anyhow!("[client::upload] Upload response has no redirect location"))
    }
}

/// Value of query parameter `name` in `search` (a URL or `?a=b` string); empty when absent.
pub fn url_parameter(name: &str, search: &str) -> String {
    let query = match search.split_once('?') {
        Some((_, query)) => query,
        None => return String::new(),
    };
    let query = query.split('#').next().unwrap_or_default();

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}

/// Upload id named by a redirect location (`...?id=...`).
pub fn upload_id(location: &str) -> Option<String> {
    Some(url_parameter("id", location)).filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MemFetcher, Response};
    use serde_json::json;

    #[test]
    fn decodes_presigned_form() {
        let form = UploadForm::from_value(&json!([
            "https://bucket.s3.amazonaws.com/",
            {"key": "uploads/abc/upload/${filename}", "success_action_redirect": "https://planscore.org/annotate", "x-amz-expires": 300}
        ])).unwrap();
        assert_eq!(form.action, "https://bucket.s3.amazonaws.com/");
        assert_eq!(form.fields["key"], "uploads/abc/upload/${filename}");
        assert_eq!(form.fields["x-amz-expires"], "300");
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(UploadForm::from_value(&json!({"url": "x"})).is_err());
        assert!(UploadForm::from_value(&json!(["x"])).is_err());
        assert!(UploadForm::from_value(&json!([1, {}])).is_err());
    }

    #[test]
    fn fetches_form() {
        let mut fetcher = MemFetcher::new()
            .respond("token", Response::ok(r#"["https://up.example/", {"acl": "private"}]"#));
        let form = UploadForm::fetch(&mut fetcher, "token").unwrap();
        assert_eq!(form.fields.len(), 1);

        let mut fetcher = MemFetcher::new().respond("token", Response::with_status(403));
        assert!(UploadForm::fetch(&mut fetcher, "token").is_err());
    }

    #[test]
    fn query_parameters() {
        let location = "https://planscore.org/annotate.html?id=20180114T210405.abc&bucket=planscore&key=uploads%2Fabc%2Fplan.geojson#top";
        assert_eq!(url_parameter("bucket", location), "planscore");
        assert_eq!(url_parameter("key", location), "uploads/abc/plan.geojson");
        assert_eq!(url_parameter("missing", location), "");
        assert_eq!(url_parameter("q", "?q=a+b"), "a b");
        assert_eq!(upload_id(location).as_deref(), Some("20180114T210405.abc"));
        assert_eq!(upload_id("https://planscore.org/"), None);
    }
}
