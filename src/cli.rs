use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::output::Layout;

/// Chop FASTA files up into one file per sequence
#[derive(Parser)]
#[command(name = "chop_fasta", author, version, about, long_about = None)]
pub struct Cli {
    /// print more about what's happening (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// spread output files over 256 subdirectories named by the first two
    /// hex digits of the MD5 of the sequence identifier
    #[arg(long)]
    subdirs: bool,

    /// fail instead of overwriting an output file that already exists
    #[arg(long)]
    no_clobber: bool,

    /// input FASTA files (default is stdin)
    #[arg(value_name = "FASTA_FILE")]
    fasta_files: Vec<PathBuf>,
}

impl Cli {
    pub fn get_input(&self) -> Vec<PathBuf> {
        self.fasta_files.clone()
    }

    pub fn get_output(&self) -> (Layout, bool) {
        let layout = if self.subdirs {
            Layout::Hashed
        } else {
            Layout::Flat
        };
        (layout, !self.no_clobber)
    }

    pub const fn verbosity(&self) -> u8 {
        self.verbose
    }
}
