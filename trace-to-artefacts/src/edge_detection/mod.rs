//! Threshold-crossing edge detection for the auxiliary analog channels.
//!
//! A channel is "active" while its value is above a fixed threshold. Edges
//! are the timestamps at which the binarised trace changes state. Typical
//! usage zips a time index with sample values and applies a detector:
//! ```text
//! let starts: Vec<Time> = time.iter().copied()
//!     .zip(values.iter().copied())
//!     .edges(EdgeDetector::<Rising>::new(ACTIVE_THRESHOLD, shift))
//!     .collect();
//! ```
//!
//! Trigger hardware emitting a single pulse per frame (rather than a
//! sustained high level) produces consecutive same-polarity crossings that
//! this scheme cannot represent; such traces are unsupported.

pub(crate) mod detector;
pub(crate) mod iter;

pub(crate) use detector::{EdgeDetector, Falling, Rising};
pub(crate) use iter::EdgeFilter;

use twophoton_common::{Real, Time};

/// A channel counts as active while its value exceeds this.
pub(crate) const ACTIVE_THRESHOLD: Real = 1.0;

/// Ordered timestamps of one polarity of edge.
pub(crate) type EdgeSeries = Vec<Time>;
