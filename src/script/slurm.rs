use std::fmt;

use log::{info, warn};
use serde::Serialize;

use crate::error::ScriptError;
use crate::script::job_request::JobRequest;
use crate::script::{render_template, JobScript};

/// Longest walltime (hours) of the regular partitions
const REGULAR_LIMIT: f64 = 3.0 * 24.0;
/// Longest walltime (hours) of the longrun partition
const LONGRUN_LIMIT: f64 = 14.0 * 24.0;

/// SLURM partitions a job can be routed to
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Partition {
    Small,
    Large,
    Longrun,
    Hugemem,
    HugememLongrun,
}

impl Partition {
    /// Pick a partition from thread count, walltime (hours) and memory per cpu (GB)
    ///
    /// Rules are tried in order and the first match wins, so a job that is small enough for
    /// `large` never reaches `hugemem`.
    pub fn select(threads: u32, walltime: f64, mem_per_slot: u32) -> Partition {
        if threads == 1 && walltime <= REGULAR_LIMIT {
            Partition::Small
        } else if threads <= 4000 && walltime <= REGULAR_LIMIT {
            Partition::Large
        } else if threads <= 40 && walltime <= LONGRUN_LIMIT {
            Partition::Longrun
        } else if threads <= 160 && walltime <= REGULAR_LIMIT && mem_per_slot > 382 {
            Partition::Hugemem
        } else {
            Partition::HugememLongrun
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Partition::Small => write!(f, "small"),
            Partition::Large => write!(f, "large"),
            Partition::Longrun => write!(f, "longrun"),
            Partition::Hugemem => write!(f, "hugemem"),
            Partition::HugememLongrun => write!(f, "hugemem_longrun"),
        }
    }
}

/// Rendering context for the SLURM template
#[derive(Serialize)]
struct SlurmContext<'a> {
    modules: &'a [String],
    array: Option<String>,
    walltime: String,
    mem_per_slot: u32,
    parallel: bool,
    threads: u32,
    partition: String,
    node: Option<&'a str>,
    account: &'a str,
    name: String,
    out: &'a str,
    commands: &'a [String],
}

/// Render a job script for SLURM (`sbatch`)
///
/// Modules are loaded by name without a lookup. Job holds are accepted but never written:
/// there is no SLURM dependency directive yet.
pub fn render(request: &JobRequest) -> Result<JobScript, ScriptError> {
    /// included SLURM template
    static SLURM: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/templates/slurm.txt"));

    let walltime = request.validate()?;
    if let Some(holds) = request.holds() {
        warn!("SLURM scripts don't support job holds, ignoring {holds}");
    }

    let partition = Partition::select(request.threads, request.walltime, request.mem_per_slot);
    let context = SlurmContext {
        modules: &request.modules,
        array: request.array_range(),
        walltime: walltime.to_string(),
        mem_per_slot: request.mem_per_slot,
        parallel: request.threads != 1,
        threads: request.threads,
        partition: partition.to_string(),
        node: request.node_constraint(),
        account: &request.account,
        name: request.job_name(),
        out: &request.output_path,
        commands: &request.commands,
    };

    let content = render_template("slurm", SLURM, &context)?;
    let path = request.script_path();
    info!("Rendered SLURM job script {} for partition {partition}", path.display());
    Ok(JobScript { content, path })
}
