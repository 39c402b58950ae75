use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::error::ScriptError;
use crate::script::job_request::JobRequest;

/// Read a JSON job request
///
/// Missing fields take the same defaults as the command line. A field with the wrong shape,
/// like a three element `array` or a fractional `threads`, is an invalid argument.
pub fn read_request(path: &Path) -> Result<JobRequest, ScriptError> {
    info!("Reading job request {}", path.display());
    let json = fs::read_to_string(path).map_err(|source| {
        warn!("Can't read job request at path {}", path.display());
        ScriptError::Io { path: path.to_path_buf(), source }
    })?;

    serde_json::from_str::<JobRequest>(&json)
        .map_err(|err| ScriptError::InvalidArgument(format!("job request {}: {err}", path.display())))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write_request(dir: &TempDir, json: &str) -> std::path::PathBuf {
        let path = dir.path().join("request.json");
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn reads_full_request() {
        let dir = TempDir::new().unwrap();
        let path = write_request(&dir, r#"{
            "commands": ["gatk HaplotypeCaller -R ref.fa"],
            "output_path": "/data/calls/chr1",
            "modules": ["java", "gatk"],
            "walltime": 12.5,
            "mem_per_slot": 4,
            "total_mem": 12,
            "hold_job_ids": ["1001"],
            "threads": 4,
            "evolgen": true,
            "node": "3",
            "array": [1, 22],
            "scheduler": "SGE"
        }"#);

        let req = read_request(&path).unwrap();
        assert_eq!(req.modules, vec!["java", "gatk"]);
        assert_eq!(req.walltime, 12.5);
        assert_eq!(req.array, Some((1, 22)));
        assert_eq!(req.node_constraint(), Some("3"));
        assert_eq!(req.job_id, None);
    }

    #[test]
    fn integer_walltime_is_accepted() {
        let dir = TempDir::new().unwrap();
        let path = write_request(&dir, r#"{"commands": ["true"], "output_path": "a/b", "walltime": 24}"#);
        assert_eq!(read_request(&path).unwrap().walltime, 24.0);
    }

    #[test]
    fn wrong_shapes_are_invalid_arguments() {
        let dir = TempDir::new().unwrap();
        for json in [
            r#"{"commands": "echo hi", "output_path": "a/b"}"#,
            r#"{"commands": ["true"], "output_path": "a/b", "array": [1, 2, 3]}"#,
            r#"{"commands": ["true"], "output_path": "a/b", "hold_job_ids": "12"}"#,
            r#"{"commands": ["true"], "output_path": "a/b", "mem_per_slot": 2.5}"#,
            r#"{"commands": ["true"], "output_path": "a/b", "node": 3}"#,
        ] {
            let path = write_request(&dir, json);
            assert!(matches!(read_request(&path), Err(ScriptError::InvalidArgument(_))), "{json}");
        }
    }

    #[test]
    fn missing_file() {
        let dir = TempDir::new().unwrap();
        let result = read_request(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(ScriptError::Io { .. })));
    }
}
