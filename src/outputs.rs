//! Published workflow outputs
//!
//! Outputs are key/value pairs appended to the file named by the
//! `GITHUB_OUTPUT` environment variable, per the hosted runner convention.
//! Outside a runner the pair is only logged.

use std::fs::OpenOptions;
use std::io::Write;

use crate::errors::Result;

/// Publish a named output value.
pub fn set_output(name: &str, value: &str) -> Result<()> {
    match std::env::var_os("GITHUB_OUTPUT") {
        Some(path) => {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "{}={}", name, value)?;
        }
        None => {
            tracing::info!(output = name, value, "no output file configured");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // GITHUB_OUTPUT is process-global; serialize the tests that touch it.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_output_appends_to_output_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("github_output");
        std::env::set_var("GITHUB_OUTPUT", &path);

        set_output("commit-hash", "abc123").unwrap();
        set_output("commit-hash", "def456").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("commit-hash=abc123\n"));
        assert!(contents.contains("commit-hash=def456\n"));

        std::env::remove_var("GITHUB_OUTPUT");
    }

    #[test]
    fn test_set_output_without_output_file_is_ok() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("GITHUB_OUTPUT");
        set_output("commit-hash", "abc123").unwrap();
    }
}
