use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ScriptError;
use crate::scheduler::Scheduler;
use crate::script::walltime::Walltime;

/// Billing account written into SLURM scripts unless the request names another
pub static DEFAULT_SLURM_ACCOUNT: &str = "project_2002047";

/// Everything needed to render one job script
///
/// `output_path` is a directory prefix plus a file stem, e.g. `/data/run/sample1`. The stem
/// names the job's `.out` and `.error` logs and, unless `job_id` overrides it, the script
/// itself (`sample1_job.sh`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobRequest {
    pub commands: Vec<String>,
    pub output_path: String,
    #[serde(default)]
    pub modules: Vec<String>,
    /// hours
    #[serde(default = "default_walltime")]
    pub walltime: f64,
    /// GB
    #[serde(default = "default_mem_per_slot")]
    pub mem_per_slot: u32,
    /// GB
    #[serde(default = "default_total_mem")]
    pub total_mem: u32,
    #[serde(default)]
    pub hold_job_ids: Option<Vec<String>>,
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default = "default_threads")]
    pub threads: u32,
    #[serde(default)]
    pub evolgen: bool,
    /// "0" means any node
    #[serde(default = "default_node")]
    pub node: String,
    #[serde(default)]
    pub array: Option<(u32, u32)>,
    #[serde(default = "default_account")]
    pub account: String,
    #[serde(default)]
    pub scheduler: Option<String>,
}

fn default_walltime() -> f64 { 8.0 }
fn default_mem_per_slot() -> u32 { 2 }
fn default_total_mem() -> u32 { 6 }
fn default_threads() -> u32 { 1 }
fn default_node() -> String { "0".to_string() }
fn default_account() -> String { DEFAULT_SLURM_ACCOUNT.to_string() }

impl JobRequest {
    pub fn new(commands: Vec<String>, output_path: impl Into<String>) -> JobRequest {
        JobRequest {
            commands,
            output_path: output_path.into(),
            modules: Vec::new(),
            walltime: default_walltime(),
            mem_per_slot: default_mem_per_slot(),
            total_mem: default_total_mem(),
            hold_job_ids: None,
            job_id: None,
            threads: default_threads(),
            evolgen: false,
            node: default_node(),
            array: None,
            account: default_account(),
            scheduler: None,
        }
    }

    /// Check the parameters that types alone can't, returning the parsed walltime
    pub fn validate(&self) -> Result<Walltime, ScriptError> {
        if self.commands.is_empty() {
            return Err(invalid("commands must contain at least one command"));
        }
        if self.stem().is_empty() {
            return Err(invalid(format!("output path {} has no file stem", self.output_path)));
        }
        if self.node.is_empty() {
            return Err(invalid("node must be a node name, or \"0\" for any node"));
        }
        if self.threads == 0 {
            return Err(invalid("threads must be at least 1"));
        }
        if matches!(self.job_id.as_deref(), Some("")) {
            return Err(invalid("job_id must not be empty"));
        }
        if let Some((start, end)) = self.array {
            if start > end {
                return Err(invalid(format!("array range {start}-{end} runs backwards")));
            }
        }
        Walltime::from_hours(self.walltime)
    }

    /// Scheduler named in the request itself, if any
    pub fn scheduler(&self) -> Result<Option<Scheduler>, ScriptError> {
        self.scheduler.as_deref().map(str::parse).transpose()
    }

    /// Directory part of `output_path`, including the trailing slash
    pub fn output_dir(&self) -> &str {
        &self.output_path[..self.stem_start()]
    }

    /// File name part of `output_path`
    pub fn stem(&self) -> &str {
        &self.output_path[self.stem_start()..]
    }

    /// Where the rendered script is written
    pub fn script_path(&self) -> PathBuf {
        let file_name = match &self.job_id {
            Some(id) => id.clone(),
            None => format!("{}_job.sh", self.stem()),
        };
        PathBuf::from(format!("{}{}", self.output_dir(), file_name))
    }

    /// Job name shown by the scheduler: the script's file name
    pub fn job_name(&self) -> String {
        let path = self.script_path();
        let path = path.to_string_lossy();
        match path.rfind('/') {
            Some(pos) => path[pos + 1..].to_string(),
            None => path.to_string(),
        }
    }

    pub fn node_constraint(&self) -> Option<&str> {
        match self.node.as_str() {
            "0" => None,
            node => Some(node),
        }
    }

    /// Array range as `start-end`
    pub fn array_range(&self) -> Option<String> {
        self.array.map(|(start, end)| format!("{start}-{end}"))
    }

    /// Comma separated job ids to wait for; an empty list counts as no holds
    pub fn holds(&self) -> Option<String> {
        self.hold_job_ids
            .as_ref()
            .filter(|ids| !ids.is_empty())
            .map(|ids| ids.join(","))
    }

    fn stem_start(&self) -> usize {
        self.output_path.rfind('/').map_or(0, |pos| pos + 1)
    }
}

fn invalid(msg: impl Into<String>) -> ScriptError {
    ScriptError::InvalidArgument(msg.into())
}
