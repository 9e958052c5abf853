//! Reading input text from files or stdin

use crate::error::{Error, Result};
use std::io::Read;
use std::path::Path;

/// Placeholder path meaning "read stdin"
pub const STDIN: &str = "-";

/// Reads the whole input named by `path`; `None` or `-` reads stdin.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p.as_os_str() != STDIN => read_file(p),
        _ => read_stdin(),
    }
}

/// Reads a UTF-8 file, mapping a missing file to a friendly error
pub fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }
    std::fs::read_to_string(path)
        .map_err(|e| Error::from(e).with_context(format!("While reading {}", path.display())))
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| Error::from(e).with_context("While reading stdin"))?;
    Ok(text)
}

/// Label for an input in reports
pub fn display_name(path: Option<&Path>) -> String {
    match path {
        Some(p) if p.as_os_str() != STDIN => p.display().to_string(),
        _ => "<stdin>".to_string(),
    }
}
