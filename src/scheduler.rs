use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

use crate::error::ScriptError;

/// The two supported queue systems
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Scheduler {
    Sge,
    Slurm,
}

impl Scheduler {
    /// Executable that takes a job script path as its only argument
    pub fn submit_command(&self) -> &'static str {
        match self {
            Scheduler::Sge => "qsub",
            Scheduler::Slurm => "sbatch",
        }
    }
}

impl fmt::Display for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scheduler::Sge => write!(f, "SGE"),
            Scheduler::Slurm => write!(f, "SLURM"),
        }
    }
}

impl FromStr for Scheduler {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("sge") {
            Ok(Scheduler::Sge)
        } else if s.eq_ignore_ascii_case("slurm") {
            Ok(Scheduler::Slurm)
        } else {
            Err(ScriptError::UnsupportedScheduler(s.to_string()))
        }
    }
}
