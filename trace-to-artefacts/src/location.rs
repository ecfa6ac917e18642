use crate::timeline::FrameStartSeries;
use thiserror::Error;
use twophoton_common::{AcquisitionShape, Real, Time};

/// Empirical correction for systematic scan-timing bias.
pub(crate) const SCAN_TIMING_CORRECTION: Real = 0.995;

#[derive(Debug, Error)]
pub(crate) enum LocationError {
    #[error("frame timeline has {0} entries, at least two are needed to interpolate")]
    TimelineTooShort(usize),
    #[error("settle time {settle_time} ms leaves no usable acquisition time in a {nominal} ms frame")]
    SettleTimeTooLong { settle_time: Time, nominal: Time },
}

/// Where within the acquisition an event timestamp falls: the containing
/// frame both as a linear index and as its (cycle, z-plane) coordinate, and
/// the fractional row reached by the line scan when the event occurred.
/// Rounding of `y_offset` is the caller's choice (floor for a start edge,
/// ceiling for a stop edge).
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FrameLocation {
    pub(crate) frame_index: usize,
    pub(crate) cycle: usize,
    pub(crate) z_plane: usize,
    pub(crate) y_offset: Real,
}

/// Maps event timestamps to frame locations. Timestamps at or beyond the
/// last frame start have no containing frame and are dropped; callers
/// pairing two series must apply the same filter to both.
pub(crate) fn locate_events(
    times: &[Time],
    frame_starts: &FrameStartSeries,
    shape: &AcquisitionShape,
    settle_time: Time,
) -> Result<Vec<FrameLocation>, LocationError> {
    let Some(last) = frame_starts.last() else {
        return Ok(Vec::new());
    };
    let valid: Vec<Time> = times.iter().copied().filter(|t| *t < last).collect();
    if valid.is_empty() {
        return Ok(Vec::new());
    }

    let nominal = frame_starts
        .mean_interval()
        .ok_or(LocationError::TimelineTooShort(frame_starts.as_slice().len()))?;
    let usable = SCAN_TIMING_CORRECTION * (nominal - settle_time);
    if usable <= 0.0 {
        return Err(LocationError::SettleTimeTooLong {
            settle_time,
            nominal,
        });
    }

    let y_px = shape.y_px() as Real;
    Ok(valid
        .into_iter()
        .map(|t| {
            let fractional = frame_starts.interpolate(t);
            let frame_index = fractional as usize;
            let position = shape.unravel(frame_index);
            // Per-frame deltas carry the auxiliary recording's sampling
            // jitter; elapsed time is measured against the nominal duration.
            let elapsed = (fractional - frame_index as Real) * nominal;
            // An offset past y_px means the event fell in the settle period
            // at frame end; cap at the frame edge.
            let y_offset = (y_px * elapsed / usable).min(y_px);
            FrameLocation {
                frame_index,
                cycle: position.cycle,
                z_plane: position.z_plane,
                y_offset,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn uniform_starts(count: usize, period: Time) -> FrameStartSeries {
        FrameStartSeries::from_starts((0..count).map(|i| i as Time * period).collect())
    }

    #[test]
    fn event_on_frame_boundary_has_zero_offset() {
        let shape = AcquisitionShape::new(10, 3, 512).unwrap();
        let starts = uniform_starts(30, 100.0);
        for k in [0usize, 1, 4, 17, 28] {
            let located =
                locate_events(&[k as Time * 100.0], &starts, &shape, 0.0).unwrap();
            assert_eq!(located.len(), 1);
            assert_approx_eq!(located[0].y_offset, 0.0);
            assert_eq!(located[0].frame_index, k);
            let position = shape.unravel(k);
            assert_eq!(located[0].cycle, position.cycle);
            assert_eq!(located[0].z_plane, position.z_plane);
        }
    }

    #[test]
    fn midframe_event_lands_near_half_height() {
        let shape = AcquisitionShape::new(10, 3, 512).unwrap();
        let starts = uniform_starts(30, 100.0);
        let located = locate_events(&[450.0], &starts, &shape, 0.0).unwrap();
        assert_eq!(located[0].frame_index, 4);
        // Exactly y_px/2 up to the scan-timing correction.
        assert_approx_eq!(located[0].y_offset, 256.0 / SCAN_TIMING_CORRECTION, 1e-6);
    }

    #[test]
    fn events_at_or_past_the_last_start_are_dropped() {
        let shape = AcquisitionShape::new(2, 2, 128).unwrap();
        let starts = uniform_starts(4, 100.0);
        let located = locate_events(&[50.0, 300.0, 301.0, 1e6], &starts, &shape, 0.0).unwrap();
        assert_eq!(located.len(), 1);
        assert_eq!(located[0].frame_index, 0);
    }

    #[test]
    fn settle_period_events_cap_at_frame_height() {
        let shape = AcquisitionShape::new(2, 2, 512).unwrap();
        let starts = uniform_starts(4, 100.0);
        // 20 ms settle leaves 80 ms of imaging; t = 190 ms is in flyback.
        let located = locate_events(&[190.0], &starts, &shape, 20.0).unwrap();
        assert_eq!(located[0].frame_index, 1);
        assert_approx_eq!(located[0].y_offset, 512.0);
    }

    #[test]
    fn offsets_stay_within_frame_bounds() {
        let shape = AcquisitionShape::new(4, 2, 256).unwrap();
        let starts = uniform_starts(8, 100.0);
        let times: Vec<Time> = (0..700).map(|i| i as Time).collect();
        for location in locate_events(&times, &starts, &shape, 12.5).unwrap() {
            assert!(location.y_offset >= 0.0);
            assert!(location.y_offset <= 256.0);
        }
    }

    #[test]
    fn event_before_the_first_start_clamps_to_frame_zero() {
        let shape = AcquisitionShape::new(2, 2, 128).unwrap();
        let starts = FrameStartSeries::from_starts(vec![50.0, 150.0, 250.0, 350.0]);
        let located = locate_events(&[10.0], &starts, &shape, 0.0).unwrap();
        assert_eq!(located[0].frame_index, 0);
        assert_approx_eq!(located[0].y_offset, 0.0);
    }

    #[test]
    fn overlong_settle_time_is_fatal() {
        let shape = AcquisitionShape::new(2, 2, 128).unwrap();
        let starts = uniform_starts(4, 100.0);
        let err = locate_events(&[50.0], &starts, &shape, 100.0).unwrap_err();
        assert!(matches!(err, LocationError::SettleTimeTooLong { .. }));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let shape = AcquisitionShape::new(2, 2, 128).unwrap();
        let starts = uniform_starts(4, 100.0);
        assert!(locate_events(&[], &starts, &shape, 0.0).unwrap().is_empty());
    }
}
