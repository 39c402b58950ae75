//! Print, write or submit a job script for the selected scheduler

use std::fs;
use std::path::Path;
use std::process::{Command, ExitStatus};

use log::{info, warn};

use crate::error::ScriptError;
use crate::scheduler::Scheduler;
use crate::script::job_request::JobRequest;
use crate::script::{sge, slurm, JobScript};

/// Render the script for `scheduler` without touching the filesystem
pub fn render(request: &JobRequest, scheduler: Scheduler) -> Result<JobScript, ScriptError> {
    match scheduler {
        Scheduler::Sge => sge::render(request),
        Scheduler::Slurm => slurm::render(request),
    }
}

/// Render the script and print it to stdout
pub fn print(request: &JobRequest, scheduler: Scheduler) -> Result<(), ScriptError> {
    let script = render(request, scheduler)?;
    println!("{}", script.content);
    Ok(())
}

/// Render the script and write it to its path, creating the output directory if needed
pub fn persist(request: &JobRequest, scheduler: Scheduler) -> Result<JobScript, ScriptError> {
    let script = render(request, scheduler)?;
    create_output_dir(request.output_dir())?;
    script.write()?;
    Ok(script)
}

/// Write the script and pass it to `qsub` or `sbatch`
///
/// The submission command's exit status is logged, not checked.
pub fn submit(request: &JobRequest, scheduler: Scheduler) -> Result<JobScript, ScriptError> {
    let script = persist(request, scheduler)?;
    submit_with(scheduler.submit_command(), &script.path)?;
    Ok(script)
}

fn submit_with(program: &str, script_path: &Path) -> Result<ExitStatus, ScriptError> {
    let mut cmd = Command::new(program);
    cmd.arg(script_path);
    info!("Running {:?}", &cmd);
    let status = cmd.status().map_err(|source| ScriptError::Submit { program: program.to_string(), source })?;
    if status.success() {
        info!("{program} exited with {status}");
    } else {
        warn!("{program} exited with {status}, job may not have been submitted");
    }
    Ok(status)
}

fn create_output_dir(dir: &str) -> Result<(), ScriptError> {
    // a bare stem writes to the working directory
    if dir.is_empty() {
        return Ok(());
    }
    let path = Path::new(dir);
    if !path.is_dir() {
        info!("Creating output directory {}", path.display());
        fs::create_dir_all(path).map_err(|source| ScriptError::Io { path: path.to_path_buf(), source })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn request(dir: &TempDir) -> JobRequest {
        let out = dir.path().join("nested/logs/sample1");
        JobRequest::new(vec!["echo hello".to_string()], out.to_str().unwrap())
    }

    #[test]
    fn render_does_not_create_directories() {
        let dir = TempDir::new().unwrap();
        let req = request(&dir);
        render(&req, Scheduler::Sge).unwrap();
        assert!(!dir.path().join("nested").exists());
    }

    #[test]
    fn persist_writes_script() {
        let dir = TempDir::new().unwrap();
        let req = request(&dir);
        let script = persist(&req, Scheduler::Slurm).unwrap();

        let expected = dir.path().join("nested/logs/sample1_job.sh");
        assert_eq!(script.path, expected);
        assert_eq!(fs::read_to_string(&expected).unwrap(), script.content);
        assert!(script.content.contains("#SBATCH"));
    }

    #[test]
    fn persist_twice_is_identical() {
        let dir = TempDir::new().unwrap();
        let req = request(&dir);
        let first = persist(&req, Scheduler::Sge).unwrap();
        let second = persist(&req, Scheduler::Sge).unwrap();
        assert_eq!(first, second);
        assert_eq!(fs::read_to_string(&second.path).unwrap(), second.content);
    }

    #[test]
    fn unknown_module_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let req = JobRequest { modules: vec!["perl".to_string()], ..request(&dir) };
        assert!(matches!(persist(&req, Scheduler::Sge), Err(ScriptError::UnknownModule(_))));
        assert!(!req.script_path().exists());
        assert!(!dir.path().join("nested").exists());
    }

    #[test]
    fn submit_runs_program_on_script() {
        let dir = TempDir::new().unwrap();
        let script = persist(&request(&dir), Scheduler::Sge).unwrap();
        assert!(submit_with("true", &script.path).unwrap().success());
    }

    #[test]
    fn failed_submission_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let script = persist(&request(&dir), Scheduler::Sge).unwrap();
        assert!(!submit_with("false", &script.path).unwrap().success());
    }

    #[test]
    fn missing_submission_program() {
        let dir = TempDir::new().unwrap();
        let script = persist(&request(&dir), Scheduler::Sge).unwrap();
        let result = submit_with("qscript-no-such-program", &script.path);
        assert!(matches!(result, Err(ScriptError::Submit { .. })));
    }
}
