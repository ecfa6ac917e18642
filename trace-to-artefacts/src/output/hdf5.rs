use crate::processing::ArtefactAnalysis;
use hdf5::File;
use ndarray::Array1;
use std::path::Path;
use twophoton_common::Pixel;

/// Writes the record table under `data/` plus the computed frame-start and
/// stimulus edge series as top-level datasets, for audit.
pub(crate) fn write(path: &Path, analysis: &ArtefactAnalysis) -> anyhow::Result<()> {
    let file = File::create(path)?;

    let frame: Array1<u64> = analysis
        .records
        .iter()
        .map(|record| record.frame as u64)
        .collect();
    let z_plane: Array1<u64> = analysis
        .records
        .iter()
        .map(|record| record.z_plane as u64)
        .collect();
    let y_min: Array1<Pixel> = analysis.records.iter().map(|record| record.y_min).collect();
    let y_max: Array1<Pixel> = analysis.records.iter().map(|record| record.y_max).collect();

    file.new_dataset_builder()
        .with_data(&frame)
        .create("data/frame")?;
    file.new_dataset_builder()
        .with_data(&z_plane)
        .create("data/z_plane")?;
    file.new_dataset_builder()
        .with_data(&y_min)
        .create("data/y_min")?;
    file.new_dataset_builder()
        .with_data(&y_max)
        .create("data/y_max")?;

    file.new_dataset_builder()
        .with_data(&Array1::from(analysis.frame_start.clone()))
        .create("frame_start")?;
    file.new_dataset_builder()
        .with_data(&Array1::from(analysis.stim_start.clone()))
        .create("stim_start")?;
    file.new_dataset_builder()
        .with_data(&Array1::from(analysis.stim_stop.clone()))
        .create("stim_stop")?;

    Ok(())
}
