//! SCORM status vocabularies
//!
//! Wire values are fixed strings defined by the data models, including the
//! space in `"not attempted"` - no derived casing scheme produces them, so
//! every variant carries an explicit rename.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::Dialect;

/// `cmi.core.lesson_status` vocabulary (SCORM 1.2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LessonStatus {
    #[default]
    #[serde(rename = "not attempted")]
    NotAttempted,
    #[serde(rename = "incomplete")]
    Incomplete,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "passed")]
    Passed,
    #[serde(rename = "failed")]
    Failed,
    #[serde(rename = "browsed")]
    Browsed,
}

impl LessonStatus {
    /// Parse a raw tracking value. An empty string means the LMS has no
    /// recorded status yet and normalizes to [`Self::NotAttempted`];
    /// anything outside the vocabulary is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "" | "not attempted" => Some(Self::NotAttempted),
            "incomplete" => Some(Self::Incomplete),
            "completed" => Some(Self::Completed),
            "passed" => Some(Self::Passed),
            "failed" => Some(Self::Failed),
            "browsed" => Some(Self::Browsed),
            _ => None,
        }
    }

    /// The exact wire string for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotAttempted => "not attempted",
            Self::Incomplete => "incomplete",
            Self::Completed => "completed",
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Browsed => "browsed",
        }
    }
}

impl fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `cmi.completion_status` vocabulary (SCORM 2004)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CompletionStatus {
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "not attempted")]
    NotAttempted,
    #[serde(rename = "incomplete")]
    Incomplete,
    #[serde(rename = "completed")]
    Completed,
}

impl CompletionStatus {
    /// Parse a raw tracking value; empty normalizes to [`Self::Unknown`]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "" | "unknown" => Some(Self::Unknown),
            "not attempted" => Some(Self::NotAttempted),
            "incomplete" => Some(Self::Incomplete),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::NotAttempted => "not attempted",
            Self::Incomplete => "incomplete",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a raw status value means "no attempt recorded yet" under the
/// given dialect - the condition for seeding the status to `"incomplete"`
/// at session start. Unrecognized values are treated as already in
/// progress and never count as fresh.
pub fn is_fresh(dialect: Dialect, raw: &str) -> bool {
    match dialect {
        Dialect::Scorm12 => matches!(LessonStatus::parse(raw), Some(LessonStatus::NotAttempted)),
        Dialect::Scorm2004 => matches!(
            CompletionStatus::parse(raw),
            Some(CompletionStatus::Unknown | CompletionStatus::NotAttempted)
        ),
    }
}
