use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use crate::request::read::read_request;
use crate::scheduler::Scheduler;
use crate::script::job_request::{JobRequest, DEFAULT_SLURM_ACCOUNT};

mod dispatch;
mod error;
mod request;
mod scheduler;
mod script;

#[derive(Parser, Debug)]
#[command(name = "qscript")]
#[command(version)]
#[command(about = "Generate job scripts for SGE or SLURM and optionally submit them")]
struct Cli {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Print the job script
    Print(JobArgs),
    /// Write the job script next to the job's output files
    Write(JobArgs),
    /// Write the job script and submit it with qsub or sbatch
    Submit(JobArgs),
}

#[derive(Args, Debug)]
struct JobArgs {
    /// Queue system to write directives for [default: sge, or the request's scheduler]
    #[arg(short, long, value_enum)]
    scheduler: Option<Scheduler>,
    /// Read the job from a JSON request instead of the flags below
    #[arg(short, long, conflicts_with_all = [
        "out", "command", "module", "walltime", "mem_per_slot", "total_mem", "hold",
        "job_id", "threads", "evolgen", "node", "array", "account",
    ])]
    request: Option<PathBuf>,
    /// Directory and file stem for the script, .out and .error files
    #[arg(short, long, required_unless_present = "request")]
    out: Option<String>,
    /// Shell command to run, repeat for several
    #[arg(short, long, required_unless_present = "request")]
    command: Vec<String>,
    /// Environment module to load, repeat for several
    #[arg(short, long)]
    module: Vec<String>,
    /// Walltime in hours
    #[arg(short = 't', long, default_value_t = 8.0)]
    walltime: f64,
    /// Memory per slot in GB
    #[arg(long, default_value_t = 2)]
    mem_per_slot: u32,
    /// Total memory in GB
    #[arg(long, default_value_t = 6)]
    total_mem: u32,
    /// Job id to wait for, repeat for several (SGE only)
    #[arg(long)]
    hold: Vec<String>,
    /// Script file name, replaces <stem>_job.sh
    #[arg(long)]
    job_id: Option<String>,
    #[arg(long, default_value_t = 1)]
    threads: u32,
    /// Run in the evolgen project and queue (SGE only)
    #[arg(long)]
    evolgen: bool,
    /// Node to pin the job to, 0 for any
    #[arg(long, default_value = "0")]
    node: String,
    /// Job array index range
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    array: Option<Vec<u32>>,
    /// SLURM billing account
    #[arg(long, default_value = DEFAULT_SLURM_ACCOUNT)]
    account: String,
}

impl JobArgs {
    /// Build the job request and pick the scheduler, the flag winning over the request file
    fn load(self) -> Result<(JobRequest, Scheduler)> {
        let request = match &self.request {
            Some(path) => read_request(path).with_context(|| format!("Loading {}", path.display()))?,
            None => self.to_request(),
        };
        let named = request.scheduler()?;
        let scheduler = self.scheduler.or(named).unwrap_or(Scheduler::Sge);
        Ok((request, scheduler))
    }

    fn to_request(&self) -> JobRequest {
        let out = self.out.clone().unwrap_or_default();
        JobRequest {
            modules: self.module.clone(),
            walltime: self.walltime,
            mem_per_slot: self.mem_per_slot,
            total_mem: self.total_mem,
            hold_job_ids: (!self.hold.is_empty()).then(|| self.hold.clone()),
            job_id: self.job_id.clone(),
            threads: self.threads,
            evolgen: self.evolgen,
            node: self.node.clone(),
            // clap guarantees exactly two values
            array: self.array.as_ref().map(|range| (range[0], range[1])),
            account: self.account.clone(),
            ..JobRequest::new(self.command.clone(), out)
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.action {
        Action::Print(job) => {
            let (request, scheduler) = job.load()?;
            dispatch::print(&request, scheduler).context("Rendering job script")?;
        }
        Action::Write(job) => {
            let (request, scheduler) = job.load()?;
            let script = dispatch::persist(&request, scheduler).context("Writing job script")?;
            info!("{scheduler} job script written to {}", script.path.display());
        }
        Action::Submit(job) => {
            let (request, scheduler) = job.load()?;
            let script = dispatch::submit(&request, scheduler).context("Submitting job script")?;
            info!("{scheduler} job script {} submitted", script.path.display());
        }
    }

    Ok(())
}
