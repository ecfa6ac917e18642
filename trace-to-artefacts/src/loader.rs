use std::{num::ParseFloatError, path::Path};
use thiserror::Error;
use tracing::info;
use twophoton_common::{Real, Time};

#[derive(Debug, Error)]
pub(crate) enum LoaderError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("voltage recording has no channel columns")]
    NoChannels,
    #[error("row {row} has {found} fields, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("non-numeric sample '{value}' in column '{column}': {source}")]
    BadSample {
        value: String,
        column: String,
        source: ParseFloatError,
    },
    #[error("no channel found matching any of {names:?}")]
    ChannelNotFound { names: Vec<String> },
}

/// The auxiliary analog recording: a time index plus one sample column per
/// channel, all at the same fixed sampling rate. Read-only once loaded.
pub(crate) struct VoltageTrace {
    time: Vec<Time>,
    channels: Vec<(String, Vec<Real>)>,
}

impl VoltageTrace {
    pub(crate) fn new(time: Vec<Time>, channels: Vec<(String, Vec<Real>)>) -> Self {
        Self { time, channels }
    }

    /// Loads a delimited voltage-recording export. The header row names the
    /// channels; the first column is the time index.
    pub(crate) fn from_csv_file(path: &Path) -> Result<Self, LoaderError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        if headers.len() < 2 {
            return Err(LoaderError::NoChannels);
        }
        let names: Vec<String> = headers.iter().skip(1).map(str::to_owned).collect();

        let mut time = Vec::new();
        let mut columns: Vec<Vec<Real>> = vec![Vec::new(); names.len()];
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() != headers.len() {
                return Err(LoaderError::RaggedRow {
                    row,
                    found: record.len(),
                    expected: headers.len(),
                });
            }
            let mut fields = record.iter();
            if let Some(field) = fields.next() {
                time.push(parse_sample(field, &headers[0])?);
            }
            for ((name, column), field) in names.iter().zip(columns.iter_mut()).zip(fields) {
                column.push(parse_sample(field, name)?);
            }
        }

        info!(
            "Loaded voltage recording: {} samples, channels: {:?}",
            time.len(),
            names
        );
        Ok(Self::new(time, names.into_iter().zip(columns).collect()))
    }

    pub(crate) fn time(&self) -> &[Time] {
        &self.time
    }

    pub(crate) fn channel(&self, name: &str) -> Option<&[Real]> {
        self.channels
            .iter()
            .find(|(channel, _)| channel == name)
            .map(|(_, samples)| samples.as_slice())
    }

    /// Returns the first channel matching any of the given names, in order.
    pub(crate) fn resolve_channel(&self, aliases: &[&str]) -> Result<&[Real], LoaderError> {
        aliases
            .iter()
            .find_map(|name| self.channel(name))
            .ok_or_else(|| LoaderError::ChannelNotFound {
                names: aliases.iter().map(|name| name.to_string()).collect(),
            })
    }

    /// The channel's samples zipped with the time index.
    pub(crate) fn samples<'a>(
        &'a self,
        channel: &'a [Real],
    ) -> impl Iterator<Item = (Time, Real)> + 'a {
        self.time.iter().copied().zip(channel.iter().copied())
    }
}

fn parse_sample(field: &str, column: &str) -> Result<Real, LoaderError> {
    field.parse().map_err(|source| LoaderError::BadSample {
        value: field.to_owned(),
        column: column.to_owned(),
        source,
    })
}
