use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a job script from being rendered, written or submitted
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{0} not a valid module")]
    UnknownModule(String),
    #[error("unsupported scheduler {0}: only SGE and SLURM are supported")]
    UnsupportedScheduler(String),
    #[error("can't access {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to render job script: {0}")]
    Template(#[from] tinytemplate::error::Error),
    #[error("failed to run {program}: {source}")]
    Submit { program: String, source: io::Error },
}
