use std::{io, path::PathBuf};

use crate::{fasta::FastaError, output::OutputError};

pub const EXIT_FILE_IO_ERROR: u8 = 1;
pub const EXIT_COMMAND_LINE_ERROR: u8 = 2;
pub const EXIT_FASTA_FILE_ERROR: u8 = 3;
pub const EXIT_OUTPUT_ERROR: u8 = 4;

#[derive(Debug, thiserror::Error)]
pub enum ChopError {
    #[error("could not open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("{source_name}: {error}")]
    Fasta {
        source_name: String,
        #[source]
        error: FastaError,
    },

    #[error(transparent)]
    Output(#[from] OutputError),
}

impl ChopError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Open { .. } => EXIT_FILE_IO_ERROR,
            Self::Fasta { error, .. } if error.is_format() => EXIT_FASTA_FILE_ERROR,
            Self::Fasta { .. } => EXIT_FILE_IO_ERROR,
            Self::Output(_) => EXIT_OUTPUT_ERROR,
        }
    }
}
