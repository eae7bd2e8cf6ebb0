//! ScormLink - SCORM runtime shim
//!
//! Lets a web-based learning module report progress and completion to a host
//! Learning Management System through the SCORM runtime API. The LMS exposes
//! its API object somewhere up the frame hierarchy; this crate walks that
//! chain, opens a reporting session against whatever it finds, and pushes the
//! handful of tracking values the LMS cares about.
//!
//! # Architecture
//!
//! ```text
//! HostFrame chain               ScormSession
//! ┌─────────┐  parent()   ┌─────────────────────────────┐
//! │ frame 0 │───────────▶ │ initialize (once, at load)  │
//! │ frame 1 │    ...      │ mark_completed (UI trigger) │
//! │   ...   │             │ on_before_unload/on_unload  │
//! │ frame N │── LmsApi ──▶│ finish (optional)           │
//! └─────────┘             └─────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use scormlink::ScormSession;
//!
//! let session = ScormSession::initialize(window_frame);
//! // ... learner works through the module ...
//! session.mark_completed();
//! // page teardown:
//! session.on_before_unload();
//! session.on_unload();
//! ```
//!
//! Every failure path is log-and-continue: a missing API degrades the whole
//! session to diagnosed no-ops, never a panic.

pub mod api;
pub mod diagnostics;
pub mod frame;
pub mod session;
pub mod status;

pub use api::{Dialect, LmsApi, SCORM_FALSE, SCORM_TRUE};
pub use frame::{HostFrame, LocateError, LocateOptions, LocatedApi, locate};
pub use session::{CompletionOutcome, FinishOutcome, FlushOutcome, InitOutcome, ScormSession};
pub use status::{CompletionStatus, LessonStatus};

/// Maximum number of parent hops the locator takes before giving up
pub const MAX_PARENT_HOPS: usize = 10;

/// Raw score written on completion (this shim does not do partial scoring)
pub const COMPLETION_RAW_SCORE: &str = "100";
