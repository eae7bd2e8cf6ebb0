//! SCORM session reporter
//!
//! One `ScormSession` per page load. Construction runs the locator and the
//! initialize/seed sequence; the value is then threaded explicitly into the
//! completion trigger and the teardown hooks. When no API was found the
//! session is inert: every operation logs and returns without touching the
//! host, and nothing ever panics across this boundary.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::COMPLETION_RAW_SCORE;
use crate::api::{Dialect, SCORM_TRUE};
use crate::frame::{self, HostFrame, LocateOptions, LocatedApi};
use crate::status::{self, CompletionStatus, LessonStatus};

/// How session construction went
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitOutcome {
    /// API located and its initialize call returned the success sentinel
    Initialized,
    /// API located but initialize did not return the success sentinel;
    /// the session keeps going - the host may already be usable
    InitializeRejected,
    /// No API in the frame chain; the session is inert
    ApiNotFound,
}

/// Result of a completion trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionOutcome {
    /// Status (and score, on SCORM 1.2) written and committed
    Recorded,
    /// Inert session, nothing written
    ApiUnavailable,
}

/// Result of a teardown flush
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlushOutcome {
    /// One commit issued to the host
    Flushed,
    /// Inert session, no-op
    Skipped,
}

/// Result of an explicit session termination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishOutcome {
    /// Finish call issued to the host
    Finished,
    /// Inert session, no-op
    Skipped,
}

/// Reporting session against a located LMS API
///
/// The handle is assigned once at construction and never reassigned; all
/// methods take `&self`.
pub struct ScormSession {
    located: Option<LocatedApi>,
    outcome: InitOutcome,
}

impl ScormSession {
    /// Open a session from the module's own frame, with the default hop
    /// limit. Call once at page load.
    pub fn initialize(start: Arc<dyn HostFrame>) -> Self {
        Self::initialize_with(start, &LocateOptions::default())
    }

    /// Open a session with explicit locator options.
    ///
    /// Always returns a session. On a present API this calls the host's
    /// `initialize()` and, when the recorded status is still fresh, seeds it
    /// to `"incomplete"` with an immediate commit. A rejected initialize is
    /// logged and recorded but does not stop the remaining steps.
    pub fn initialize_with(start: Arc<dyn HostFrame>, options: &LocateOptions) -> Self {
        debug!("ScormSession::initialize_with: called");
        let located = match frame::locate(start, options) {
            Ok(located) => located,
            Err(e) => {
                error!(error = %e, "session not started, progress will not be reported");
                return Self {
                    located: None,
                    outcome: InitOutcome::ApiNotFound,
                };
            }
        };

        let mut outcome = InitOutcome::Initialized;
        let result = located.api.initialize();
        if result == SCORM_TRUE {
            info!(dialect = %located.dialect, "LMS session initialized");
        } else {
            error!(%result, dialect = %located.dialect, "LMS rejected initialize");
            outcome = InitOutcome::InitializeRejected;
        }

        seed_status(&located);

        Self {
            located: Some(located),
            outcome,
        }
    }

    /// How construction went; inert sessions report
    /// [`InitOutcome::ApiNotFound`]
    pub fn init_outcome(&self) -> InitOutcome {
        self.outcome
    }

    /// Whether an API is attached (a rejected initialize still counts -
    /// the session carries on against a possibly-usable host)
    pub fn is_ready(&self) -> bool {
        self.located.is_some()
    }

    /// Dialect of the attached API, if any
    pub fn dialect(&self) -> Option<Dialect> {
        self.located.as_ref().map(|l| l.dialect)
    }

    /// Record the lesson as completed and commit.
    ///
    /// SCORM 1.2 writes `lesson_status = "completed"` and the fixed raw
    /// score; SCORM 2004 writes `completion_status = "completed"` only.
    /// Safe to call repeatedly - each call replays the same writes.
    pub fn mark_completed(&self) -> CompletionOutcome {
        let Some(located) = &self.located else {
            error!("cannot record completion, no LMS API attached");
            return CompletionOutcome::ApiUnavailable;
        };

        info!(dialect = %located.dialect, "recording completion");
        let completed = match located.dialect {
            Dialect::Scorm12 => LessonStatus::Completed.as_str(),
            Dialect::Scorm2004 => CompletionStatus::Completed.as_str(),
        };
        located.api.set_value(located.dialect.status_key(), completed);
        if let Some(score_key) = located.dialect.score_key() {
            located.api.set_value(score_key, COMPLETION_RAW_SCORE);
        }
        located.api.commit();
        CompletionOutcome::Recorded
    }

    /// "before unload" hook: flush pending values
    pub fn on_before_unload(&self) -> FlushOutcome {
        debug!("ScormSession::on_before_unload: called");
        self.flush()
    }

    /// "unload" hook: identical to [`Self::on_before_unload`]; some hosts
    /// fire only one of the two events
    pub fn on_unload(&self) -> FlushOutcome {
        debug!("ScormSession::on_unload: called");
        self.flush()
    }

    /// Ask the host to persist everything set so far. Fire-and-forget: the
    /// commit's own result is not checked, and an inert session skips
    /// silently.
    pub fn flush(&self) -> FlushOutcome {
        let Some(located) = &self.located else {
            debug!("flush: no LMS API attached, skipping");
            return FlushOutcome::Skipped;
        };
        debug!("flush: committing");
        located.api.commit();
        FlushOutcome::Flushed
    }

    /// Close the runtime session (`LMSFinish` / `Terminate`).
    ///
    /// Optional - hosts that only commit on teardown never call this. The
    /// teardown hooks do not call it either; termination is a separate
    /// decision.
    pub fn finish(&self) -> FinishOutcome {
        let Some(located) = &self.located else {
            debug!("finish: no LMS API attached, skipping");
            return FinishOutcome::Skipped;
        };
        info!(dialect = %located.dialect, "terminating LMS session");
        let result = located.api.finish();
        if result != SCORM_TRUE {
            warn!(%result, "LMS finish did not return the success sentinel");
        }
        FinishOutcome::Finished
    }
}

/// Seed a fresh status to `"incomplete"` and commit right away, so a
/// learner who opens the module and leaves still shows up as having
/// attempted it. Anything other than a fresh value is left untouched.
fn seed_status(located: &LocatedApi) {
    let key = located.dialect.status_key();
    let raw = located.api.get_value(key);
    if !status::is_fresh(located.dialect, &raw) {
        debug!(status = %raw, "status already set, leaving untouched");
        return;
    }

    let incomplete = match located.dialect {
        Dialect::Scorm12 => LessonStatus::Incomplete.as_str(),
        Dialect::Scorm2004 => CompletionStatus::Incomplete.as_str(),
    };
    debug!(from = %raw, to = %incomplete, "seeding fresh status");
    located.api.set_value(key, incomplete);
    located.api.commit();
}
