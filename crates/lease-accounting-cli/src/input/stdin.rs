use serde_json::Value;
use std::io::{self, Read};

/// Read lease JSON piped on stdin.
/// Returns None when stdin is a TTY or the pipe is empty, so callers fall
/// back to command-line flags.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        tracing::debug!("stdin is empty; using flags");
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(trimmed)?))
}
