// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Example:
//   heading-crawler https://example.com -d 1 -l DE -k $DEEPL_AUTH_KEY -o report.md
// =============================================================================

use crate::report::{DEFAULT_ARROW_WIDTH, STDOUT_SENTINEL};
use crate::translate::Language;
use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "heading-crawler",
    version,
    about = "Crawl web pages, collect their headings and broken links, and translate the headings",
    long_about = "heading-crawler follows the links of every given URL up to a maximum depth, \
                  records headings and broken links, translates all headings of a crawl \
                  with DeepL and writes a nested report."
)]
pub struct Cli {
    /// The URLs of the webpages to crawl
    #[arg(value_name = "URLS", required = true, num_args = 1..)]
    pub urls: Vec<String>,

    /// The depth of webpages to crawl recursively
    #[arg(short = 'd', long = "depth", default_value_t = 2)]
    pub max_depth: usize,

    /// The language to translate the headings to (tag like DE or name like german)
    #[arg(short = 'l', long = "language", default_value = "EN")]
    pub language: Language,

    /// The auth key for the DeepL API
    #[arg(short = 'k', long = "auth-key", env = "DEEPL_AUTH_KEY", hide_env_values = true)]
    pub auth_key: String,

    /// Use the DeepL pro API instead of the free one
    #[arg(short = 'p', long = "pro")]
    pub pro: bool,

    /// The path of the generated report, '-' prints it to the console
    #[arg(short = 'o', long = "output-file", default_value = STDOUT_SENTINEL)]
    pub output_file: String,

    /// Seconds to wait for a single page or translation request
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Dashes per nesting level in the report arrows
    #[arg(long, default_value_t = DEFAULT_ARROW_WIDTH)]
    pub arrow_width: usize,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}
