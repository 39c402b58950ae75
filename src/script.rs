//! Render job scripts for SGE and SLURM and write them to disk

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use log::info;
use serde::Serialize;
use tinytemplate::{format_unescaped, TinyTemplate};

use crate::error::ScriptError;

/// Job parameters shared by both templates
pub mod job_request;
/// Environment modules installed on the SGE cluster
pub mod module;
/// Walltime as written in directive headers
pub mod walltime;
/// Son of Grid Engine template
pub mod sge;
/// SLURM template and partition selection
pub mod slurm;

/// A rendered job script and the path it should be written to
#[derive(Debug, Clone, PartialEq)]
pub struct JobScript {
    pub content: String,
    pub path: PathBuf,
}

impl JobScript {
    /// Write the script to its path, replacing anything already there
    pub fn write(&self) -> Result<(), ScriptError> {
        let io_err = |source| ScriptError::Io { path: self.path.clone(), source };
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(io_err)?;
        file.write_all(self.content.as_bytes()).map_err(io_err)?;
        info!("Wrote job script {}", self.path.display());
        Ok(())
    }
}

/// Render an embedded template with TinyTemplate
///
/// Values are written unescaped: commands are shell, not HTML.
fn render_template<C: Serialize>(name: &'static str, template: &'static str, context: &C) -> Result<String, ScriptError> {
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&format_unescaped);
    tt.add_template(name, template)?;
    Ok(tt.render(name, context)?)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn write_truncates_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("job.sh");
        fs::write(&path, "a much longer script that should disappear\n").unwrap();

        let script = JobScript { content: "echo hi\n".to_string(), path: path.clone() };
        script.write().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "echo hi\n");
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("job.sh");
        let script = JobScript { content: String::new(), path };

        assert!(matches!(script.write(), Err(ScriptError::Io { .. })));
    }
}
