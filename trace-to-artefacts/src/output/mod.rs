//! Persistence collaborators: the HDF5 container for programmatic reuse and
//! the delimited table for external analysis tools.

pub(crate) mod csv;
pub(crate) mod hdf5;
