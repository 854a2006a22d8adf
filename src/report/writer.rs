// src/report/writer.rs
// =============================================================================
// Writes the finished report either to a file or to standard output.
//
// The path "-" means stdout, everything else is a file path that gets
// created or overwritten.
// =============================================================================

use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Output path that means "print to the console"
pub const STDOUT_SENTINEL: &str = "-";

pub fn write_report(report: &str, output: &str) -> Result<()> {
    if output == STDOUT_SENTINEL {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", report)?;
        handle.flush()?;
        return Ok(());
    }

    std::fs::write(Path::new(output), report)?;
    info!("Report written to {}", output);

    Ok(())
}
