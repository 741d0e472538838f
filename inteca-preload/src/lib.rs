//! Image preload progress tracking.
//!
//! Given a set of image URLs, issues one decode probe per URL in parallel
//! and reports a monotonically non-decreasing completion percentage over a
//! watch channel. A failed decode counts as "accounted for" rather than
//! fatal, so one broken image can never hold a splash screen hostage.
//!
//! There is no cancellation path: once started, probes run to completion.
//! A view that goes away simply drops its receiver and further updates are
//! discarded, not cancelled at the network layer.

mod probe;
mod tracker;

pub use probe::{DecodeProbe, HttpProbe, ProbeError};
pub use tracker::{PreloadProgress, PreloadTracker};
