use log::info;
use serde::Serialize;

use crate::error::ScriptError;
use crate::script::job_request::JobRequest;
use crate::script::module::Module;
use crate::script::{render_template, JobScript};

/// Rendering context for the SGE template
#[derive(Serialize)]
struct SgeContext<'a> {
    modules: Vec<&'static str>,
    array: Option<String>,
    walltime: String,
    total_mem: u32,
    mem_per_slot: u32,
    parallel: bool,
    threads: u32,
    evolgen: bool,
    node: Option<&'a str>,
    name: String,
    out: &'a str,
    hold: Option<String>,
    commands: &'a [String],
}

/// Render a job script for Son of Grid Engine (`qsub`)
///
/// Module names are looked up in the fixed module table, so an unknown name fails before
/// anything is rendered.
pub fn render(request: &JobRequest) -> Result<JobScript, ScriptError> {
    /// included SGE template
    static SGE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/templates/sge.txt"));

    let walltime = request.validate()?;
    let modules = request
        .modules
        .iter()
        .map(|name| name.parse::<Module>().map(|module| module.path()))
        .collect::<Result<Vec<_>, _>>()?;

    let context = SgeContext {
        modules,
        array: request.array_range(),
        walltime: walltime.to_string(),
        total_mem: request.total_mem,
        mem_per_slot: request.mem_per_slot,
        parallel: request.threads != 1,
        threads: request.threads,
        evolgen: request.evolgen,
        node: request.node_constraint(),
        name: request.job_name(),
        out: &request.output_path,
        hold: request.holds(),
        commands: &request.commands,
    };

    let content = render_template("sge", SGE, &context)?;
    let path = request.script_path();
    info!("Rendered SGE job script {}", path.display());
    Ok(JobScript { content, path })
}
