use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use tracing::{debug, info, trace};

use crate::{config::Config, error::ChopError, fasta::Reader, output::OutputWriter};

const STDIN_NAME: &str = "<stdin>";

/// What a run produced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub sources: usize,
    pub records: usize,
    pub directories_created: usize,
}

/// Chop every input named in `config`, in order, or stdin if there are none.
///
/// Stops at the first error. Files written before the error stay on disk.
pub fn process_files(config: &Config) -> Result<Summary, ChopError> {
    let writer = OutputWriter::new(&config.output_root, config.layout, config.line_width)
        .clobber(config.clobber);
    let mut summary = Summary::default();

    if config.inputs.is_empty() {
        info!("reading FASTA from standard input");
        chop_reader(io::stdin().lock(), STDIN_NAME, &writer, &mut summary)?;
    } else {
        for path in &config.inputs {
            let file = open(path)?;
            info!("chopping {}", path.display());
            chop_reader(
                BufReader::new(file),
                &path.display().to_string(),
                &writer,
                &mut summary,
            )?;
        }
    }

    Ok(summary)
}

fn open(path: &Path) -> Result<File, ChopError> {
    File::open(path).map_err(|source| ChopError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Write every record of one source to its own file.
pub fn chop_reader<R: BufRead>(
    reader: R,
    source_name: &str,
    writer: &OutputWriter,
    summary: &mut Summary,
) -> Result<(), ChopError> {
    let mut count = 0;
    for record in Reader::new(reader) {
        let record = record.map_err(|error| ChopError::Fasta {
            source_name: source_name.to_string(),
            error,
        })?;
        trace!(
            id = record.id(),
            description = record.description(),
            "parsed record"
        );

        let target = writer.write(&record)?;
        if target.created_dir {
            summary.directories_created += 1;
            if let Some(dir) = target.path.parent() {
                debug!("created directory {}", dir.display());
            }
        }
        debug!(
            "wrote {} ({} residues)",
            target.path.display(),
            record.sequence().len()
        );
        count += 1;
    }

    info!("{source_name}: {count} sequences written");
    summary.sources += 1;
    summary.records += count;
    Ok(())
}
