//! HTTP seam: a blocking fetcher for the CLI and a scripted one for tests.

use std::collections::{HashMap, VecDeque};

use anyhow::{Context, Result, anyhow, ensure};
use serde::de::DeserializeOwned;
use time::{OffsetDateTime, PrimitiveDateTime, macros::format_description};

/// The parts of an HTTP response the client looks at.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
    /// Raw `Last-Modified` header.
    pub last_modified: Option<String>,
    /// Raw `Location` header.
    pub location: Option<String>,
}

impl Response {
    /// A 200 response with `body`.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self { status: 200, body: body.into(), ..Self::default() }
    }

    pub fn with_status(status: u16) -> Self {
        Self { status, ..Self::default() }
    }

    pub fn with_last_modified(mut self, header: &str) -> Self {
        self.last_modified = Some(header.to_string());
        self
    }

    /// Success and redirect statuses both count as loaded.
    #[inline] pub fn is_success(&self) -> bool { (200..400).contains(&self.status) }

    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(&self.body).context("[client::fetch] Response body is not valid UTF-8")
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).context("[client::fetch] Response body is not valid JSON")
    }

    /// `Last-Modified` as a UTC timestamp.
    pub fn modified_at(&self) -> Option<OffsetDateTime> {
        self.last_modified.as_deref().and_then(parse_last_modified)
    }
}

/// Anything that can GET a URL.
pub trait Fetch {
    fn get(&mut self, url: &str) -> Result<Response>;
}

/// GET `url` and fail on non-success statuses.
pub fn get_ok<F: Fetch + ?Sized>(fetcher: &mut F, url: &str) -> Result<Response> {
    let response = fetcher.get(url)?;
    ensure!(response.is_success(), "[client::fetch] GET {url} returned status {}", response.status);
    Ok(response)
}

/// Parse an HTTP date such as `Sun, 06 Nov 1994 08:49:37 GMT`.
pub fn parse_last_modified(header: &str) -> Option<OffsetDateTime> {
    let format = format_description!(
        "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
    );
    PrimitiveDateTime::parse(header.trim(), &format)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

/// Blocking HTTP fetcher backed by reqwest.
#[cfg(feature = "download")]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "download")]
impl HttpFetcher {
    pub fn new(timeout: std::time::Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("planscore/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(timeout)
            .build()
            .context("[client::fetch] Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[cfg(feature = "download")]
impl Fetch for HttpFetcher {
    fn get(&mut self, url: &str) -> Result<Response> {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url).send()
            .with_context(|| format!("[client::fetch] GET {url}"))?;
        from_reqwest(response)
    }
}

#[cfg(feature = "download")]
pub(crate) fn from_reqwest(response: reqwest::blocking::Response) -> Result<Response> {
    let headers = response.headers();
    let header = |name: reqwest::header::HeaderName| headers.get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let status = response.status().as_u16();
    let last_modified = header(reqwest::header::LAST_MODIFIED);
    let location = header(reqwest::header::LOCATION);
    let body = response.bytes()
        .context("[client::fetch] Failed to read response body")?
        .to_vec();

    tracing::debug!(status, bytes = body.len(), "response");
    Ok(Response { status, body, last_modified, location })
}

/// Scripted fetcher: each URL answers with a queue of canned responses.
///
/// The last queued answer for a URL repeats forever, so a single
/// "still processing" response can stand in for any number of polls.
#[derive(Debug, Default)]
pub struct MemFetcher {
    routes: HashMap<String, VecDeque<Result<Response, String>>>,
    requests: Vec<String>,
}

impl MemFetcher {
    pub fn new() -> Self { Self::default() }

    /// Queue a response for `url`.
    pub fn respond(mut self, url: &str, response: Response) -> Self {
        self.routes.entry(url.to_string()).or_default().push_back(Ok(response));
        self
    }

    /// Queue a connection failure for `url`.
    pub fn fail(mut self, url: &str, message: &str) -> Self {
        self.routes.entry(url.to_string()).or_default().push_back(Err(message.to_string()));
        self
    }

    /// URLs requested so far, in order.
    #[inline] pub fn requests(&self) -> &[String] { &self.requests }
}

impl Fetch for MemFetcher {
    fn get(&mut self, url: &str) -> Result<Response> {
        self.requests.push(url.to_string());
        let queue = self.routes.get_mut(url)
            .ok_or_else(|| anyhow!("[client::fetch] No response scripted for {url}"))?;

        let answer = if queue.len() > 1 { queue.pop_front() } else { queue.front().cloned() };
        match answer {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(anyhow!("[client::fetch] GET {url}: {message}")),
            None => Err(anyhow!("[client::fetch] No response scripted for {url}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn parses_http_dates() {
        assert_eq!(
            parse_last_modified("Sun, 14 Jan 2018 21:04:05 GMT"),
            Some(datetime!(2018-01-14 21:04:05 UTC)),
        );
        assert_eq!(parse_last_modified("yesterday"), None);

        let response = Response::ok("{}").with_last_modified("Mon, 01 Oct 2018 00:00:00 GMT");
        assert_eq!(response.modified_at(), Some(datetime!(2018-10-01 0:00 UTC)));
    }

    #[test]
    fn redirects_count_as_success() {
        assert!(Response::with_status(200).is_success());
        assert!(Response::with_status(302).is_success());
        assert!(!Response::with_status(404).is_success());
        assert!(!Response::with_status(199).is_success());
    }

    #[test]
    fn scripted_responses_repeat_last() {
        let mut fetcher = MemFetcher::new()
            .respond("a", Response::ok("first"))
            .respond("a", Response::ok("second"))
            .fail("b", "connection reset");

        assert_eq!(fetcher.get("a").unwrap().text().unwrap(), "first");
        assert_eq!(fetcher.get("a").unwrap().text().unwrap(), "second");
        assert_eq!(fetcher.get("a").unwrap().text().unwrap(), "second");
        assert!(format!("{:#}", fetcher.get("b").unwrap_err()).contains("connection reset"));
        assert!(fetcher.get("c").is_err());
        assert_eq!(fetcher.requests(), ["a", "a", "a", "b", "c"]);
    }

    #[test]
    fn get_ok_rejects_errors() {
        let mut fetcher = MemFetcher::new().respond("gone", Response::with_status(410));
        let err = get_ok(&mut fetcher, "gone").unwrap_err();
        assert!(err.to_string().contains("410"));
    }
}
