//! File input and output for commands

use crate::error::{CliError, CliResult};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Read a whole input file
pub fn read_input(path: &str) -> CliResult<String> {
    fs::read_to_string(path).map_err(|e| CliError::Message(format!("Failed to read {path}: {e}")))
}

/// Write `content` to `output`, or to stdout when no path is given.
/// Parent directories are created as needed.
pub fn write_output(output: Option<&str>, content: &str) -> CliResult<()> {
    let Some(output) = output else {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{content}")?;
        return Ok(());
    };

    let path = Path::new(output);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut text = content.to_string();
    if !text.ends_with('\n') {
        text.push('\n');
    }
    fs::write(path, text)
        .map_err(|e| CliError::Message(format!("Failed to write {output}: {e}")))?;
    tracing::debug!(path = %output, bytes = content.len(), "Wrote output file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_output_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("flag.json");
        let path_str = path.to_str().unwrap();

        write_output(Some(path_str), "{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
        assert_eq!(read_input(path_str).unwrap(), "{}\n");
    }

    #[test]
    fn test_read_input_missing_file() {
        let result = read_input("does-not-exist.json");
        match result {
            Err(CliError::Message(msg)) => {
                assert!(msg.contains("Failed to read does-not-exist.json"))
            }
            _ => panic!("Expected CliError::Message for missing file"),
        }
    }
}
