mod edge_detection;
mod loader;
mod location;
mod output;
mod processing;
mod spans;
mod timeline;

use anyhow::Result;
use clap::Parser;
use loader::VoltageTrace;
use processing::Timing;
use std::path::PathBuf;
use tracing::{debug, info};
use twophoton_common::AcquisitionShape;

#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Voltage recording export containing the frame-trigger and stimulus
    /// channels, sampled at the auxiliary rate.
    #[clap(long)]
    file: PathBuf,

    /// Output HDF5 container; the csv table is written alongside with the
    /// same stem.
    #[clap(long)]
    output: PathBuf,

    /// Name of the stimulus channel in the voltage recording.
    #[clap(long)]
    stim_channel: String,

    /// Number of volume cycles in the acquisition.
    #[clap(long)]
    frames: usize,

    /// Planes acquired per volume cycle.
    #[clap(long)]
    z_planes: usize,

    /// Rows per frame.
    #[clap(long)]
    y_px: u32,

    /// Time shift applied to stimulus edges to compensate channel latency,
    /// in ms.
    #[clap(long, default_value = "0.0", allow_negative_numbers = true)]
    shift: f64,

    /// Extra padding added to stimulus stop edges to absorb falloff, in ms.
    #[clap(long, default_value = "0.0")]
    buffer: f64,

    /// Non-imaging settle time per frame (e.g. flyback), in ms.
    #[clap(long, default_value = "0.0")]
    settle_time: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Cli::parse();
    debug!("Args: {:?}", args);

    let shape = AcquisitionShape::new(args.frames, args.z_planes, args.y_px)?;
    let trace = VoltageTrace::from_csv_file(&args.file)?;

    let timing = Timing {
        shift: args.shift,
        buffer: args.buffer,
        settle_time: args.settle_time,
    };
    let analysis = processing::process(&trace, &shape, &args.stim_channel, &timing)?;

    output::hdf5::write(&args.output, &analysis)?;
    let table_path = args.output.with_extension("csv");
    output::csv::write(&table_path, &analysis.records)?;

    info!(
        "Wrote {} artefact record(s) to {} and {}",
        analysis.records.len(),
        args.output.display(),
        table_path.display()
    );
    Ok(())
}
