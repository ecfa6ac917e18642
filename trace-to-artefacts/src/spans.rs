use crate::location::FrameLocation;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;
use twophoton_common::Pixel;

#[derive(Debug, Error)]
pub(crate) enum SpanError {
    #[error("stimulus edge series are unpaired: {starts} starts but {stops} stops")]
    MismatchedEdgeCounts { starts: usize, stops: usize },
}

/// One contaminated row range `[y_min, y_max)` within one frame. The `frame`
/// field is the cycle index; together with `z_plane` it names the frame.
/// Not unique per frame: every z-plane of a cycle shares the cycle index,
/// and one stimulus may contribute to several planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct ArtefactRecord {
    pub(crate) frame: usize,
    pub(crate) z_plane: usize,
    pub(crate) y_min: Pixel,
    pub(crate) y_max: Pixel,
}

/// Resolves located stimulus start/stop pairs into artefact records.
///
/// Start offsets round down and stop offsets round up, so the marked range
/// is never narrower than the true contamination. A pair confined to one
/// frame yields one record, or none if the rounded range is empty. A pair
/// crossing a plane or cycle boundary yields two records: the start frame
/// is marked to its bottom and the stop frame from its top. Frames strictly
/// between the two are left unmarked.
pub(crate) fn resolve_spans(
    starts: &[FrameLocation],
    stops: &[FrameLocation],
    y_px: Pixel,
) -> Result<Vec<ArtefactRecord>, SpanError> {
    if starts.len() != stops.len() {
        return Err(SpanError::MismatchedEdgeCounts {
            starts: starts.len(),
            stops: stops.len(),
        });
    }

    let mut records = Vec::new();
    for (start, stop) in starts.iter().zip(stops) {
        let y_min = start.y_offset.floor() as Pixel;
        let y_max = stop.y_offset.ceil() as Pixel;

        if (start.cycle, start.z_plane) == (stop.cycle, stop.z_plane) {
            // A stimulus that begins and ends between two line scans leaves
            // no visible rows.
            if y_min == y_max {
                continue;
            }
            records.push(ArtefactRecord {
                frame: start.cycle,
                z_plane: start.z_plane,
                y_min,
                y_max,
            });
        } else {
            if stop.frame_index > start.frame_index + 1 {
                warn!(
                    "stimulus spans frames {}..={}; only the first and last are marked",
                    start.frame_index, stop.frame_index
                );
            }
            records.push(ArtefactRecord {
                frame: start.cycle,
                z_plane: start.z_plane,
                y_min,
                y_max: y_px,
            });
            records.push(ArtefactRecord {
                frame: stop.cycle,
                z_plane: stop.z_plane,
                y_min: 0,
                y_max,
            });
        }
    }
    Ok(records)
}
