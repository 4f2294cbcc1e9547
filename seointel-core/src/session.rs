// Form state and analysis lifecycle: Idle -> Loading -> {Report | Error} -> Idle

use seointel_analyzer::{AnalysisError, AnalysisInput, ErrorKind, ReportSource, SeoReport};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Loading,
    Report(Box<SeoReport>),
    Error { kind: ErrorKind, message: String },
}

/// Identifies one accepted submission. Results carrying an older ticket are
/// discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Snapshot handed to the requestor for one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: Ticket,
    pub input: AnalysisInput,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    #[error("A website URL is required")]
    EmptyUrl,
    #[error("An analysis is already in progress")]
    AlreadyLoading,
}

#[derive(Debug)]
pub struct AnalysisSession {
    input: AnalysisInput,
    state: SessionState,
    last_ticket: u64,
    pending: Option<Ticket>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self {
            input: AnalysisInput::default(),
            state: SessionState::Idle,
            last_ticket: 0,
            pending: None,
        }
    }

    pub fn input(&self) -> &AnalysisInput {
        &self.input
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.input.url = url.into();
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.input.location = location.into();
    }

    pub fn set_industry(&mut self, industry: impl Into<String>) {
        self.input.industry = industry.into();
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading)
    }

    pub fn report(&self) -> Option<&SeoReport> {
        match &self.state {
            SessionState::Report(report) => Some(report.as_ref()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SessionState::Error { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Accept the current fields for analysis.
    ///
    /// Rejected without side effects when the URL is blank or a request is
    /// already in flight. On success the prior report or error is cleared and
    /// the session is `Loading`.
    pub fn submit(&mut self) -> Result<Submission, SubmitRejected> {
        if !self.input.has_url() {
            return Err(SubmitRejected::EmptyUrl);
        }
        if self.is_loading() {
            return Err(SubmitRejected::AlreadyLoading);
        }

        self.last_ticket += 1;
        let ticket = Ticket(self.last_ticket);
        self.pending = Some(ticket);
        self.state = SessionState::Loading;

        debug!(ticket = self.last_ticket, url = %self.input.url, "Submission accepted");

        Ok(Submission {
            ticket,
            input: self.input.clone(),
        })
    }

    /// Apply the outcome of a submission. Returns `false` if the ticket is not
    /// the one currently pending, in which case the session is untouched.
    pub fn complete(&mut self, ticket: Ticket, result: Result<SeoReport, AnalysisError>) -> bool {
        if self.pending != Some(ticket) {
            debug!(ticket = ticket.0, "Dropping stale analysis result");
            return false;
        }
        self.pending = None;

        self.state = match result {
            Ok(report) => SessionState::Report(Box::new(report)),
            Err(e) => {
                debug!(kind = ?e.kind(), "Analysis ended in error");
                SessionState::Error {
                    kind: e.kind(),
                    message: e.user_message(),
                }
            }
        };
        true
    }

    /// Leave the report or error screen, keeping the fields for a resubmit.
    /// Has no effect while loading.
    pub fn dismiss(&mut self) {
        if !self.is_loading() {
            self.state = SessionState::Idle;
        }
    }

    /// Start over with empty fields. A request still in flight will have its
    /// result dropped.
    pub fn reset(&mut self) {
        self.input = AnalysisInput::default();
        self.state = SessionState::Idle;
        self.pending = None;
    }

    /// Submit and run one request against `source` to completion.
    pub async fn analyze(&mut self, source: &dyn ReportSource) -> Result<&SessionState, SubmitRejected> {
        let submission = self.submit()?;
        let result = source.request(&submission.input).await;
        self.complete(submission.ticket, result);
        Ok(&self.state)
    }
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}
