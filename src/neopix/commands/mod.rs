use crate::model::{Admission, Outcome};
use std::path::PathBuf;

pub mod admit;
pub mod check;
pub mod compare;
pub mod init;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Summary of one diff-engine call.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffSummary {
    pub mismatch_percentage: f64,
    pub diff_path: PathBuf,
    pub rescaled: bool,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub admission: Option<Admission>,
    pub diff: Option<DiffSummary>,
    pub outcome: Option<Outcome>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_admission(mut self, admission: Admission) -> Self {
        self.admission = Some(admission);
        self
    }

    pub fn with_diff(mut self, diff: DiffSummary) -> Self {
        self.diff = Some(diff);
        self
    }

    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    /// Fold a sub-command's result into this one, keeping message order.
    pub fn absorb(&mut self, other: CmdResult) {
        self.admission = other.admission.or(self.admission);
        self.diff = other.diff.or(self.diff.take());
        self.outcome = other.outcome.or(self.outcome);
        self.messages.extend(other.messages);
    }
}
