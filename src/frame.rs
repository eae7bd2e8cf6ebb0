//! Host frame chain and API discovery
//!
//! The LMS attaches its API object to some ancestor of the frame the module
//! runs in. [`locate`] walks that chain: probe the current frame, hop to the
//! parent, repeat. The walk is bounded - a malformed or cross-origin
//! hierarchy must never turn into an endless climb - and the frame reached
//! by the final permitted hop is still probed before giving up.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::MAX_PARENT_HOPS;
use crate::api::{Dialect, LmsApi};

/// One frame of the host hierarchy
///
/// Implementations wrap whatever the embedding environment calls a frame.
/// A frame exposes up to two API slots, one per dialect; `parent` returns
/// `None` at the top of the chain. Hosts whose top frame reports itself as
/// its own parent are tolerated - the locator detects the cycle by pointer
/// identity.
pub trait HostFrame: Send + Sync {
    /// SCORM 1.2 API slot (the `API` property of a browser frame)
    fn api_scorm12(&self) -> Option<Arc<dyn LmsApi>>;

    /// SCORM 2004 API slot (the `API_1484_11` property)
    fn api_scorm2004(&self) -> Option<Arc<dyn LmsApi>>;

    /// Parent frame, `None` when this frame is the top of the chain
    fn parent(&self) -> Option<Arc<dyn HostFrame>>;
}

/// Options for the locator walk
#[derive(Debug, Clone)]
pub struct LocateOptions {
    /// Maximum number of parent hops before giving up
    pub max_hops: usize,
}

impl Default for LocateOptions {
    fn default() -> Self {
        Self {
            max_hops: MAX_PARENT_HOPS,
        }
    }
}

/// A located LMS API, tagged with the dialect it speaks
#[derive(Clone)]
pub struct LocatedApi {
    /// Non-owning handle to the host's API object
    pub api: Arc<dyn LmsApi>,
    /// Dialect of the slot the API was found in
    pub dialect: Dialect,
    /// Parent hops taken from the start frame to the API's frame
    pub hops: usize,
}

impl fmt::Debug for LocatedApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocatedApi")
            .field("dialect", &self.dialect)
            .field("hops", &self.hops)
            .finish_non_exhaustive()
    }
}

/// Locator failures - both mean "no API for the rest of the page's life"
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LocateError {
    /// The hop limit was hit before any frame exposed an API
    #[error("no LMS API in frame chain after {limit} parent hops")]
    HopLimitReached { limit: usize },

    /// The top of the chain was reached without finding an API
    #[error("no LMS API in frame chain ({hops} hops to the top frame)")]
    ChainExhausted { hops: usize },
}

/// Walk the frame chain upward from `start` looking for an LMS API.
///
/// Each frame is probed 2004-slot first; a frame exposing both dialects
/// resolves to SCORM 2004. Diagnostics only, no mutation.
pub fn locate(
    start: Arc<dyn HostFrame>,
    options: &LocateOptions,
) -> Result<LocatedApi, LocateError> {
    debug!(max_hops = options.max_hops, "locate: walking frame chain");
    let mut frame = start;
    let mut hops = 0usize;

    loop {
        if let Some((api, dialect)) = probe(frame.as_ref()) {
            info!(%dialect, hops, "locate: found LMS API");
            return Ok(LocatedApi { api, dialect, hops });
        }
        if hops == options.max_hops {
            warn!(
                limit = options.max_hops,
                "locate: hop limit reached without finding an LMS API"
            );
            return Err(LocateError::HopLimitReached {
                limit: options.max_hops,
            });
        }
        let Some(parent) = frame.parent() else {
            warn!(hops, "locate: no LMS API up to the top of the frame chain");
            return Err(LocateError::ChainExhausted { hops });
        };
        // A top frame may report itself as its own parent.
        if Arc::ptr_eq(&parent, &frame) {
            warn!(hops, "locate: no LMS API up to the top of the frame chain");
            return Err(LocateError::ChainExhausted { hops });
        }
        frame = parent;
        hops += 1;
    }
}

/// The 2004 slot wins when a frame exposes both
fn probe(frame: &dyn HostFrame) -> Option<(Arc<dyn LmsApi>, Dialect)> {
    if let Some(api) = frame.api_scorm2004() {
        return Some((api, Dialect::Scorm2004));
    }
    frame.api_scorm12().map(|api| (api, Dialect::Scorm12))
}

#[cfg(test)]
pub mod mock {
    use std::sync::Weak;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Configurable frame for chain-walking tests
    ///
    /// Counts how many times the locator examined it, so tests can pin down
    /// exactly which frames a walk touched.
    pub struct StubFrame {
        api12: Option<Arc<dyn LmsApi>>,
        api2004: Option<Arc<dyn LmsApi>>,
        parent: Option<Arc<dyn HostFrame>>,
        probes: AtomicUsize,
    }

    impl StubFrame {
        /// Frame with no APIs and no parent
        pub fn top() -> Self {
            Self {
                api12: None,
                api2004: None,
                parent: None,
                probes: AtomicUsize::new(0),
            }
        }

        pub fn with_api12(mut self, api: Arc<dyn LmsApi>) -> Self {
            self.api12 = Some(api);
            self
        }

        pub fn with_api2004(mut self, api: Arc<dyn LmsApi>) -> Self {
            self.api2004 = Some(api);
            self
        }

        pub fn with_parent(mut self, parent: Arc<dyn HostFrame>) -> Self {
            self.parent = Some(parent);
            self
        }

        /// How many times the locator examined this frame
        pub fn probe_count(&self) -> usize {
            self.probes.load(Ordering::SeqCst)
        }
    }

    impl HostFrame for StubFrame {
        fn api_scorm12(&self) -> Option<Arc<dyn LmsApi>> {
            self.api12.clone()
        }

        fn api_scorm2004(&self) -> Option<Arc<dyn LmsApi>> {
            // The locator always checks this slot first, so one probe of a
            // frame is one increment here.
            self.probes.fetch_add(1, Ordering::SeqCst);
            self.api2004.clone()
        }

        fn parent(&self) -> Option<Arc<dyn HostFrame>> {
            self.parent.clone()
        }
    }

    /// Top frame that reports itself as its own parent, like a browser's
    /// `window.parent === window`
    pub struct SelfParentFrame {
        this: Weak<SelfParentFrame>,
    }

    impl SelfParentFrame {
        pub fn new() -> Arc<Self> {
            Arc::new_cyclic(|this| Self { this: this.clone() })
        }
    }

    impl HostFrame for SelfParentFrame {
        fn api_scorm12(&self) -> Option<Arc<dyn LmsApi>> {
            None
        }

        fn api_scorm2004(&self) -> Option<Arc<dyn LmsApi>> {
            None
        }

        fn parent(&self) -> Option<Arc<dyn HostFrame>> {
            self.this.upgrade().map(|f| f as Arc<dyn HostFrame>)
        }
    }

    /// Build a chain `depth` hops deep with the given top frame; returns the
    /// frames bottom-up, so index 0 is the start frame and index `depth` the
    /// top.
    pub fn chain(depth: usize, top: StubFrame) -> Vec<Arc<StubFrame>> {
        let mut frames = vec![Arc::new(top)];
        for _ in 0..depth {
            let parent = Arc::clone(frames.last().unwrap()) as Arc<dyn HostFrame>;
            frames.push(Arc::new(StubFrame::top().with_parent(parent)));
        }
        frames.reverse();
        frames
    }
}
