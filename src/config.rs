// src/config.rs
// =============================================================================
// The resolved settings of one run.
//
// clap (see cli.rs) validates the raw arguments; this file turns them into
// the values the rest of the crawler works with (durations, report style,
// log filter).
// =============================================================================

use crate::cli::Cli;
use crate::report::ReportStyle;
use crate::translate::Language;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Settings {
    pub urls: Vec<String>,
    pub max_depth: usize,
    pub target_language: Language,
    pub auth_key: String,
    pub use_pro_api: bool,
    pub output: String,
    /// Per fetch and per translate request
    pub timeout: Duration,
    pub style: ReportStyle,
    pub verbosity: u8,
}

impl Settings {
    // Default log filter when RUST_LOG is not set
    pub fn log_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        Self {
            urls: cli.urls,
            max_depth: cli.max_depth,
            target_language: cli.language,
            auth_key: cli.auth_key,
            use_pro_api: cli.pro,
            output: cli.output_file,
            timeout: Duration::from_secs(cli.timeout),
            style: ReportStyle {
                arrow_width: cli.arrow_width,
            },
            verbosity: cli.verbose,
        }
    }
}
