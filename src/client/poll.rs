//! Polling loader for plans that are still being read or scored.

use std::time::Duration;

use thiserror::Error;
use time::OffsetDateTime;

use super::Fetch;
use crate::config::PollSettings;
use crate::plan::Plan;

pub const LOADING_MESSAGE: &str = "Loading district plan";

/// Which page is waiting on the plan; they differ in what "done" means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollPage {
    /// Waits for scores.
    Score,
    /// Waits for the uploaded file to be read into districts.
    Preread,
}

impl PollPage {
    pub fn interval(self, settings: &PollSettings) -> Duration {
        Duration::from_millis(match self {
            PollPage::Score => settings.score_interval_ms,
            PollPage::Preread => settings.preread_interval_ms,
        })
    }

    pub fn is_done(self, plan: &Plan) -> bool {
        match self {
            PollPage::Score => plan.is_scored(),
            PollPage::Preread => plan.districts_count().is_some_and(|n| n > 0),
        }
    }
}

/// Why a plan could not be loaded.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("The district plan failed to load.")]
    Status(u16),
    #[error("District plan failed to load.")]
    NoMessage,
    #[error("Could not reach the scoring service: {0}")]
    Transport(String),
    #[error("The scoring service returned an unreadable plan: {0}")]
    Decode(String),
    #[error("Gave up waiting for the district plan after {0} attempts.")]
    Exhausted(usize),
}

/// A plan that finished loading, with the response's upload-time fallback.
#[derive(Clone, Debug)]
pub struct LoadedPlan {
    pub plan: Plan,
    pub modified_at: Option<OffsetDateTime>,
}

#[derive(Clone, Debug)]
pub enum PollState {
    Loading,
    StillProcessing(String),
    Loaded(LoadedPlan),
    Failed(LoadError),
}

impl PollState {
    #[inline] pub fn is_finished(&self) -> bool { matches!(self, PollState::Loaded(_) | PollState::Failed(_)) }
}

/// Status lines shown while waiting. A repeated line grows an ellipsis
/// instead of being shown again.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageLog {
    lines: Vec<String>,
}

impl MessageLog {
    pub fn show(&mut self, text: &str) {
        match self.lines.iter_mut().find(|line| line.starts_with(text)) {
            Some(line) => line.push('…'),
            None => self.lines.push(text.to_string()),
        }
    }

    #[inline] pub fn lines(&self) -> &[String] { &self.lines }
}

/// Re-requests a plan URL until it is done, fails, or the budget runs out.
/// One request is in flight at a time.
pub struct Poller<'a, F: Fetch + ?Sized> {
    fetcher: &'a mut F,
    url: String,
    page: PollPage,
    settings: PollSettings,
    attempts: usize,
    waited: Duration,
    log: MessageLog,
    state: PollState,
}

impl<'a, F: Fetch + ?Sized> Poller<'a, F> {
    pub fn new(fetcher: &'a mut F, url: &str, page: PollPage, settings: PollSettings) -> Self {
        let mut log = MessageLog::default();
        log.show(LOADING_MESSAGE);
        Self {
            fetcher,
            url: url.to_string(),
            page,
            settings,
            attempts: 0,
            waited: Duration::ZERO,
            log,
            state: PollState::Loading,
        }
    }

    #[inline] pub fn state(&self) -> &PollState { &self.state }

    #[inline] pub fn log(&self) -> &MessageLog { &self.log }

    #[inline] pub fn attempts(&self) -> usize { self.attempts }

    /// Make one request and advance the state machine.
    pub fn step(&mut self) -> &PollState {
        self.attempts += 1;
        tracing::debug!(url = %self.url, attempt = self.attempts, "polling plan");

        self.state = match self.fetch_once() {
            Ok(state) => state,
            Err(error) => PollState::Failed(error),
        };

        match &self.state {
            PollState::StillProcessing(message) => {
                tracing::info!(%message, attempt = self.attempts, "plan still processing");
                self.log.show(message);
            }
            PollState::Loaded(_) => tracing::info!(attempts = self.attempts, "plan loaded"),
            PollState::Failed(error) => {
                tracing::warn!(%error, "plan failed to load");
                self.log.show(&error.to_string());
            }
            PollState::Loading => {}
        }

        &self.state
    }

    fn fetch_once(&mut self) -> Result<PollState, LoadError> {
        let response = self.fetcher.get(&self.url)
            .map_err(|e| LoadError::Transport(format!("{e:#}")))?;

        if !response.is_success() {
            return Err(LoadError::Status(response.status));
        }

        let text = response.text().map_err(|e| LoadError::Decode(format!("{e:#}")))?;
        let mut plan = Plan::from_json_str(text).map_err(|e| LoadError::Decode(format!("{e:#}")))?;
        if self.page == PollPage::Score {
            plan = plan.with_derived_geometry_key();
        }

        if self.page.is_done(&plan) {
            return Ok(PollState::Loaded(LoadedPlan { plan, modified_at: response.modified_at() }));
        }

        match plan.message() {
            Some(message) if !message.is_empty() => Ok(PollState::StillProcessing(message.to_string())),
            _ => Err(LoadError::NoMessage),
        }
    }

    /// Poll until finished, sleeping with `sleep` between attempts.
    pub fn wait_with(mut self, mut sleep: impl FnMut(Duration)) -> Result<LoadedPlan, LoadError> {
        let interval = self.page.interval(&self.settings);
        loop {
            self.step();
            match std::mem::replace(&mut self.state, PollState::Loading) {
                PollState::Loaded(loaded) => return Ok(loaded),
                PollState::Failed(error) => return Err(error),
                state => self.state = state,
            }

            if self.attempts >= self.settings.max_attempts || self.waited + interval > self.settings.timeout() {
                let error = LoadError::Exhausted(self.attempts);
                tracing::warn!(%error, "stopped polling");
                return Err(error);
            }

            sleep(interval);
            self.waited += interval;
        }
    }

    /// Poll until finished, blocking the current thread between attempts.
    pub fn wait(self) -> Result<LoadedPlan, LoadError> {
        self.wait_with(std::thread::sleep)
    }
}

/// Load the plan at `url`, waiting for processing to finish.
pub fn load_plan<F: Fetch + ?Sized>(fetcher: &mut F, url: &str, page: PollPage, settings: &PollSettings) -> Result<LoadedPlan, LoadError> {
    Poller::new(fetcher, url, page, settings.clone()).wait()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MemFetcher, Response};

    const URL: &str = "https://api.example/score?id=abc";

    fn settings(max_attempts: usize) -> PollSettings {
        PollSettings { max_attempts, ..PollSettings::default() }
    }

    #[test]
    fn collapses_repeated_messages() {
        let mut log = MessageLog::default();
        log.show("Loading district plan");
        log.show("Scoring");
        log.show("Scoring");
        log.show("Scoring");
        assert_eq!(log.lines(), ["Loading district plan", "Scoring……"]);
    }

    #[test]
    fn processing_then_loaded() {
        let mut fetcher = MemFetcher::new()
            .respond(URL, Response::ok(r#"{"id": "abc", "message": "Scoring this plan"}"#))
            .respond(URL, Response::ok(r#"{"id": "abc", "message": "Scoring this plan"}"#))
            .respond(URL, Response::ok(r#"{"id": "abc", "summary": {"Efficiency Gap": 0.02}, "districts": []}"#)
                .with_last_modified("Sun, 14 Jan 2018 21:04:05 GMT"));

        let mut sleeps = Vec::new();
        let poller = Poller::new(&mut fetcher, URL, PollPage::Score, settings(10));
        let loaded = poller.wait_with(|d| sleeps.push(d)).unwrap();

        assert_eq!(loaded.plan.geometry_key(), Some("uploads/abc/geometry.json"));
        assert!(loaded.modified_at.is_some());
        assert_eq!(sleeps, [Duration::from_secs(5), Duration::from_secs(5)]);
        assert_eq!(fetcher.requests().len(), 3);
    }

    #[test]
    fn step_reports_each_state() {
        let mut fetcher = MemFetcher::new()
            .respond(URL, Response::ok(r#"{"message": "Reading this plan"}"#));
        let mut poller = Poller::new(&mut fetcher, URL, PollPage::Preread, settings(10));
        assert!(matches!(poller.state(), PollState::Loading));
        assert!(matches!(poller.step(), PollState::StillProcessing(m) if m == "Reading this plan"));
        poller.step();
        assert_eq!(poller.log().lines(), ["Loading district plan", "Reading this plan…"]);
        assert_eq!(poller.attempts(), 2);
    }

    #[test]
    fn preread_waits_for_districts() {
        let mut fetcher = MemFetcher::new()
            .respond(URL, Response::ok(r#"{"message": "Reading", "districts": []}"#))
            .respond(URL, Response::ok(r#"{"districts": [{"totals": {}}, {"totals": {}}], "model": {"state": "NC"}}"#));
        let loaded = Poller::new(&mut fetcher, URL, PollPage::Preread, settings(5))
            .wait_with(|d| assert_eq!(d, Duration::from_secs(3)))
            .unwrap();
        assert_eq!(loaded.plan.districts_count(), Some(2));
        assert_eq!(loaded.plan.geometry_key(), None);
    }

    #[test]
    fn failures() {
        let mut fetcher = MemFetcher::new().respond(URL, Response::with_status(500));
        let err = Poller::new(&mut fetcher, URL, PollPage::Score, settings(5)).wait_with(|_| {}).unwrap_err();
        assert_eq!(err, LoadError::Status(500));
        assert_eq!(err.to_string(), "The district plan failed to load.");

        let mut fetcher = MemFetcher::new().respond(URL, Response::ok("{}"));
        let err = Poller::new(&mut fetcher, URL, PollPage::Score, settings(5)).wait_with(|_| {}).unwrap_err();
        assert_eq!(err, LoadError::NoMessage);

        let mut fetcher = MemFetcher::new().fail(URL, "connection refused");
        let err = Poller::new(&mut fetcher, URL, PollPage::Score, settings(5)).wait_with(|_| {}).unwrap_err();
        assert!(matches!(err, LoadError::Transport(m) if m.contains("connection refused")));

        let mut fetcher = MemFetcher::new().respond(URL, Response::ok("<html>"));
        let err = Poller::new(&mut fetcher, URL, PollPage::Score, settings(5)).wait_with(|_| {}).unwrap_err();
        assert!(matches!(err, LoadError::Decode(_)));
    }

    #[test]
    fn polling_is_bounded() {
        let mut fetcher = MemFetcher::new().respond(URL, Response::ok(r#"{"message": "Scoring"}"#));
        let err = Poller::new(&mut fetcher, URL, PollPage::Score, settings(4)).wait_with(|_| {}).unwrap_err();
        assert_eq!(err, LoadError::Exhausted(4));
        assert_eq!(fetcher.requests().len(), 4);

        let short = PollSettings { timeout_secs: 12, ..PollSettings::default() };
        let mut fetcher = MemFetcher::new().respond(URL, Response::ok(r#"{"message": "Scoring"}"#));
        let err = Poller::new(&mut fetcher, URL, PollPage::Score, short).wait_with(|_| {}).unwrap_err();
        assert_eq!(err, LoadError::Exhausted(3));
    }
}
