//! Job requests stored as JSON files

/// Read and deserialise a job request
pub mod read;
