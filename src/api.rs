//! LMS runtime API abstraction
//!
//! The LMS hands the module an opaque API object; this trait is the Rust
//! seam for it. Two dialects exist in the wild: SCORM 1.2 (the `API` frame
//! slot, `LMS`-prefixed calls) and SCORM 2004 (the `API_1484_11` slot).
//! Both reduce to the same five operations, so one trait covers both and a
//! [`Dialect`] tag carries the difference where it matters - the tracking
//! keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Success sentinel returned by conforming LMS API calls
pub const SCORM_TRUE: &str = "true";

/// Failure sentinel
pub const SCORM_FALSE: &str = "false";

/// Which SCORM runtime dialect a located API speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// SCORM 1.2 (`window.API`, `cmi.core.*` data model)
    Scorm12,
    /// SCORM 2004 (`window.API_1484_11`, `cmi.*` data model)
    Scorm2004,
}

impl Dialect {
    /// Tracking key holding the lesson/completion status
    pub fn status_key(&self) -> &'static str {
        match self {
            Self::Scorm12 => "cmi.core.lesson_status",
            Self::Scorm2004 => "cmi.completion_status",
        }
    }

    /// Tracking key for the raw score, where the dialect's completion path
    /// writes one (the 2004 path reports completion status only)
    pub fn score_key(&self) -> Option<&'static str> {
        match self {
            Self::Scorm12 => Some("cmi.core.score.raw"),
            Self::Scorm2004 => None,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scorm12 => write!(f, "SCORM 1.2"),
            Self::Scorm2004 => write!(f, "SCORM 2004"),
        }
    }
}

/// Synchronous, in-process LMS runtime API
///
/// The host owns the object behind this trait; the shim holds a non-owning
/// `Arc<dyn LmsApi>` for the life of the page. Calls never suspend and their
/// failures are not observable beyond the returned string - the shim treats
/// every call as fire-and-forget and checks at most the success sentinel.
pub trait LmsApi: Send + Sync {
    /// Open the runtime session (`LMSInitialize("")` / `Initialize("")`).
    /// Conforming hosts return [`SCORM_TRUE`].
    fn initialize(&self) -> String;

    /// Read a tracking value (`LMSGetValue` / `GetValue`).
    /// Unset keys come back as the empty string.
    fn get_value(&self, key: &str) -> String;

    /// Write a tracking value (`LMSSetValue` / `SetValue`)
    fn set_value(&self, key: &str, value: &str) -> String;

    /// Ask the host to persist everything set so far (`LMSCommit` / `Commit`)
    fn commit(&self) -> String;

    /// Close the runtime session (`LMSFinish` / `Terminate`)
    fn finish(&self) -> String;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_status_keys() {
        assert_eq!(Dialect::Scorm12.status_key(), "cmi.core.lesson_status");
        assert_eq!(Dialect::Scorm2004.status_key(), "cmi.completion_status");
    }

    #[test]
    fn test_dialect_score_key_is_scorm12_only() {
        assert_eq!(Dialect::Scorm12.score_key(), Some("cmi.core.score.raw"));
        assert_eq!(Dialect::Scorm2004.score_key(), None);
    }

    #[test]
    fn test_dialect_display() {
        assert_eq!(Dialect::Scorm12.to_string(), "SCORM 1.2");
        assert_eq!(Dialect::Scorm2004.to_string(), "SCORM 2004");
    }
}
