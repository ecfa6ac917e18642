use crate::edge_detection::{EdgeDetector, EdgeFilter, Rising, ACTIVE_THRESHOLD};
use thiserror::Error;
use tracing::debug;
use twophoton_common::{AcquisitionShape, Real, Time};

#[derive(Debug, Error)]
pub(crate) enum TimelineError {
    #[error("detected {detected} frame-trigger edges, acquisition shape requires {expected}")]
    ShapeMismatch { expected: usize, detected: usize },
}

/// The onset timestamp of every (cycle x z-plane) acquisition step, in
/// acquisition order. Strictly increasing; exactly `shape.num_frames()`
/// entries. Index `i` unravels to the frame's (cycle, z-plane) coordinate.
#[derive(Debug)]
pub(crate) struct FrameStartSeries {
    starts: Vec<Time>,
}

impl FrameStartSeries {
    /// Extracts rising edges from the frame-trigger channel. Edges beyond
    /// the expected count are tail noise and dropped without comment;
    /// a shortfall means the recording is incomplete and is fatal.
    pub(crate) fn build(
        samples: impl Iterator<Item = (Time, Real)>,
        shape: &AcquisitionShape,
    ) -> Result<Self, TimelineError> {
        let expected = shape.num_frames();
        let starts: Vec<Time> = samples
            .edges(EdgeDetector::<Rising>::new(ACTIVE_THRESHOLD, 0.0))
            .take(expected)
            .collect();
        if starts.len() < expected {
            return Err(TimelineError::ShapeMismatch {
                expected,
                detected: starts.len(),
            });
        }
        debug!("Frame timeline: {} frame starts", starts.len());
        Ok(Self { starts })
    }

    #[cfg(test)]
    pub(crate) fn from_starts(starts: Vec<Time>) -> Self {
        Self { starts }
    }

    pub(crate) fn as_slice(&self) -> &[Time] {
        &self.starts
    }

    pub(crate) fn last(&self) -> Option<Time> {
        self.starts.last().copied()
    }

    /// Linear interpolation of a timestamp against the series index,
    /// clamped at both ends. A timestamp exactly on `starts[k]` maps to
    /// `k`; halfway between two starts maps to `k + 0.5`.
    pub(crate) fn interpolate(&self, t: Time) -> Real {
        let n = self.starts.len();
        let after = self.starts.partition_point(|start| *start <= t);
        if after == 0 {
            return 0.0;
        }
        if after == n {
            return (n - 1) as Real;
        }
        let i = after - 1;
        let (lower, upper) = (self.starts[i], self.starts[after]);
        i as Real + (t - lower) / (upper - lower)
    }

    /// Mean of the consecutive frame-start deltas. The auxiliary recording
    /// samples the trigger at a finite rate, so individual deltas carry
    /// jitter; the scan itself runs at a constant rate, so the mean is the
    /// nominal frame duration.
    pub(crate) fn mean_interval(&self) -> Option<Time> {
        let deltas = self.starts.windows(2).map(|pair| pair[1] - pair[0]);
        let count = self.starts.len().checked_sub(1)?;
        if count == 0 {
            return None;
        }
        Some(deltas.sum::<Time>() / count as Time)
    }
}
