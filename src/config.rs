use std::path::PathBuf;

use crate::output::Layout;

pub const PROGRAM_NAME: &str = "chop_fasta";
pub const PROGRAM_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything a run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub program_name: &'static str,
    pub version: &'static str,
    /// Input FASTA files in command-line order; empty means stdin.
    pub inputs: Vec<PathBuf>,
    pub output_root: PathBuf,
    pub layout: Layout,
    pub clobber: bool,
    pub line_width: usize,
    pub verbosity: u8,
}
