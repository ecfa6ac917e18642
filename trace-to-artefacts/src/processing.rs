use crate::{
    edge_detection::{EdgeDetector, EdgeFilter, EdgeSeries, Falling, Rising, ACTIVE_THRESHOLD},
    loader::{LoaderError, VoltageTrace},
    location::{locate_events, LocationError},
    spans::{resolve_spans, ArtefactRecord, SpanError},
    timeline::{FrameStartSeries, TimelineError},
};
use thiserror::Error;
use tracing::{info, warn};
use twophoton_common::{AcquisitionShape, Time, FRAME_TRIGGER_ALIASES};

#[derive(Debug, Error)]
pub(crate) enum ProcessingError {
    #[error("{0}")]
    Loader(#[from] LoaderError),
    #[error("{0}")]
    Timeline(#[from] TimelineError),
    #[error("{0}")]
    Location(#[from] LocationError),
    #[error("{0}")]
    Span(#[from] SpanError),
}

/// Timing configuration for the stimulus channel: `shift` compensates the
/// hardware latency between the two channels, `buffer` pads stop edges to
/// absorb stimulus falloff, `settle_time` is the non-imaging portion of each
/// frame period.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Timing {
    pub(crate) shift: Time,
    pub(crate) buffer: Time,
    pub(crate) settle_time: Time,
}

/// Pipeline output: the artefact record table plus the computed series kept
/// for audit in the output container.
#[derive(Debug)]
pub(crate) struct ArtefactAnalysis {
    pub(crate) records: Vec<ArtefactRecord>,
    pub(crate) frame_start: Vec<Time>,
    pub(crate) stim_start: EdgeSeries,
    pub(crate) stim_stop: EdgeSeries,
}

/// Runs the pipeline over one recording: frame timeline from the trigger
/// channel, stimulus edges, location mapping, span resolution.
pub(crate) fn process(
    trace: &VoltageTrace,
    shape: &AcquisitionShape,
    stim_channel: &str,
    timing: &Timing,
) -> Result<ArtefactAnalysis, ProcessingError> {
    let trigger = trace.resolve_channel(FRAME_TRIGGER_ALIASES)?;
    let frame_starts = FrameStartSeries::build(trace.samples(trigger), shape)?;

    let stim = trace.resolve_channel(&[stim_channel])?;
    let stim_start: EdgeSeries = trace
        .samples(stim)
        .edges(EdgeDetector::<Rising>::new(ACTIVE_THRESHOLD, timing.shift))
        .collect();
    let stim_stop: EdgeSeries = trace
        .samples(stim)
        .edges(EdgeDetector::<Falling>::new(
            ACTIVE_THRESHOLD,
            timing.shift + timing.buffer,
        ))
        .collect();

    if stim_start.is_empty() && stim_stop.is_empty() {
        // Valid outcome: no stimulation occurred during this recording.
        warn!("stimulus channel '{stim_channel}' never crosses threshold");
    } else if stim_start.len() != stim_stop.len() {
        // A rising edge without its falling edge (or vice versa) means the
        // detection itself is unpaired, e.g. the stimulus was still active
        // when the recording ended.
        return Err(SpanError::MismatchedEdgeCounts {
            starts: stim_start.len(),
            stops: stim_stop.len(),
        }
        .into());
    }

    // An edge at or past the last frame start has no containing frame, so
    // the pair it belongs to is dropped whole; this keeps the two series in
    // lockstep through the mapper.
    let last = frame_starts.last();
    let (paired_starts, paired_stops): (Vec<Time>, Vec<Time>) = stim_start
        .iter()
        .zip(&stim_stop)
        .filter(|(start, stop)| last.is_some_and(|last| **start < last && **stop < last))
        .map(|(start, stop)| (*start, *stop))
        .unzip();

    let start_locations = locate_events(&paired_starts, &frame_starts, shape, timing.settle_time)?;
    let stop_locations = locate_events(&paired_stops, &frame_starts, shape, timing.settle_time)?;
    let records = resolve_spans(&start_locations, &stop_locations, shape.y_px())?;

    info!(
        "Resolved {} artefact record(s) from {} stimulus event(s)",
        records.len(),
        stim_start.len()
    );
    Ok(ArtefactAnalysis {
        records,
        frame_start: frame_starts.as_slice().to_vec(),
        stim_start,
        stim_stop,
    })
}
