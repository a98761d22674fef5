use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use md5::{Digest, Md5};

use crate::fasta::{Record, Writer};

/// Extension given to every output file.
pub const EXTENSION: &str = "fasta";

/// Where output files go relative to the output root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `<id>.fasta` directly in the root.
    Flat,
    /// `<xx>/<id>.fasta`, where `xx` is the first two hex digits of the
    /// MD5 digest of the identifier.
    Hashed,
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("identifier {0:?} cannot be used as a file name")]
    UnsafeIdentifier(String),

    #[error("could not create directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("could not write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// A resolved output path for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub path: PathBuf,
    /// Set when resolving this target created its subdirectory.
    pub created_dir: bool,
}

/// Name of the hashed subdirectory for an identifier.
pub fn subdir_name(id: &str) -> String {
    let digest = Md5::digest(id.as_bytes());
    format!("{:02x}", digest[0])
}

impl OutputTarget {
    /// Work out where the record named `id` goes, creating its hashed
    /// subdirectory when needed. A subdirectory that already exists is
    /// fine, whoever made it.
    pub fn resolve(root: &Path, id: &str, layout: Layout) -> Result<Self, OutputError> {
        if id.is_empty() || id.chars().any(std::path::is_separator) {
            return Err(OutputError::UnsafeIdentifier(id.to_string()));
        }
        let file_name = format!("{id}.{EXTENSION}");

        match layout {
            Layout::Flat => Ok(Self {
                path: root.join(file_name),
                created_dir: false,
            }),
            Layout::Hashed => {
                let dir = root.join(subdir_name(id));
                let created_dir = match fs::create_dir(&dir) {
                    Ok(()) => true,
                    Err(e) if e.kind() == io::ErrorKind::AlreadyExists => false,
                    Err(source) => return Err(OutputError::CreateDir { path: dir, source }),
                };
                Ok(Self {
                    path: dir.join(file_name),
                    created_dir,
                })
            }
        }
    }
}

/// Writes each record to its own single-record FASTA file.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    root: PathBuf,
    layout: Layout,
    line_width: usize,
    clobber: bool,
}

impl OutputWriter {
    pub fn new(root: impl Into<PathBuf>, layout: Layout, line_width: usize) -> Self {
        Self {
            root: root.into(),
            layout,
            line_width,
            clobber: true,
        }
    }

    /// With `clobber` off, a record whose output file already exists fails
    /// instead of replacing it.
    pub fn clobber(mut self, clobber: bool) -> Self {
        self.clobber = clobber;
        self
    }

    pub fn write(&self, record: &Record) -> Result<OutputTarget, OutputError> {
        let target = OutputTarget::resolve(&self.root, record.id(), self.layout)?;
        self.write_file(&target.path, record)
            .map_err(|source| OutputError::Write {
                path: target.path.clone(),
                source,
            })?;
        Ok(target)
    }

    fn write_file(&self, path: &Path, record: &Record) -> io::Result<()> {
        let file = if self.clobber {
            File::create(path)?
        } else {
            OpenOptions::new().write(true).create_new(true).open(path)?
        };
        let mut writer = Writer::with_line_width(BufWriter::new(file), self.line_width);
        writer.write_record(record)?;
        writer.into_inner().flush()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::fasta::DEFAULT_LINE_WIDTH;

    fn record(header: &str, sequence: &str) -> Record {
        Record::new(header, sequence).unwrap()
    }

    #[test]
    fn subdir_is_md5_prefix() {
        // md5("seq1") = 5330d8459bac1ec1a9a7dfd799c2183d
        assert_eq!(subdir_name("seq1"), "53");
        // md5("abc123") = e99a18c428cb38d5f260853678922e03
        assert_eq!(subdir_name("abc123"), "e9");
        // md5("xyz") = d16fb36f0911f878998c136191af705e
        assert_eq!(subdir_name("xyz"), "d1");
    }

    #[test]
    fn flat_layout_uses_root() {
        let root = Path::new("out");
        let target = OutputTarget::resolve(root, "seq1", Layout::Flat).unwrap();
        assert_eq!(target.path, root.join("seq1.fasta"));
        assert!(!target.created_dir);
    }

    #[test]
    fn hashed_layout_creates_directory_once() {
        let dir = TempDir::new().unwrap();

        let first = OutputTarget::resolve(dir.path(), "seq1", Layout::Hashed).unwrap();
        assert_eq!(first.path, dir.path().join("53").join("seq1.fasta"));
        assert!(first.created_dir);
        assert!(dir.path().join("53").is_dir());

        let second = OutputTarget::resolve(dir.path(), "seq1", Layout::Hashed).unwrap();
        assert_eq!(second.path, first.path);
        assert!(!second.created_dir);
    }

    #[test]
    fn path_separators_in_identifier_are_refused() {
        let dir = TempDir::new().unwrap();
        for id in ["../escape", "a/b", ""] {
            let err = OutputTarget::resolve(dir.path(), id, Layout::Hashed).unwrap_err();
            assert!(matches!(err, OutputError::UnsafeIdentifier(_)), "{id}");
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn backslash_is_an_ordinary_character_on_unix() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::new(dir.path(), Layout::Flat, DEFAULT_LINE_WIDTH);

        let target = writer.write(&record("gi\\123 desc", "ACGT")).unwrap();
        assert_eq!(target.path, dir.path().join("gi\\123.fasta"));
        assert_eq!(fs::read_to_string(target.path).unwrap(), ">gi\\123\nACGT\n");
    }

    #[test]
    fn writes_single_record_file() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::new(dir.path(), Layout::Flat, DEFAULT_LINE_WIDTH);

        let target = writer.write(&record("abc123 some description", "ACGT")).unwrap();
        assert_eq!(target.path, dir.path().join("abc123.fasta"));
        assert_eq!(fs::read_to_string(&target.path).unwrap(), ">abc123\nACGT\n");
    }

    #[test]
    fn duplicate_identifier_overwrites() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::new(dir.path(), Layout::Hashed, DEFAULT_LINE_WIDTH);

        writer.write(&record("dup first", "AAAA")).unwrap();
        let target = writer.write(&record("dup second", "CC")).unwrap();
        assert_eq!(fs::read_to_string(target.path).unwrap(), ">dup\nCC\n");
    }

    #[test]
    fn no_clobber_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let writer =
            OutputWriter::new(dir.path(), Layout::Flat, DEFAULT_LINE_WIDTH).clobber(false);

        let target = writer.write(&record("dup", "AAAA")).unwrap();
        let err = writer.write(&record("dup", "CC")).unwrap_err();
        match err {
            OutputError::Write { path, source } => {
                assert_eq!(path, target.path);
                assert_eq!(source.kind(), io::ErrorKind::AlreadyExists);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(fs::read_to_string(target.path).unwrap(), ">dup\nAAAA\n");
    }

    #[test]
    fn missing_root_is_a_write_error() {
        let dir = TempDir::new().unwrap();
        let writer =
            OutputWriter::new(dir.path().join("missing"), Layout::Flat, DEFAULT_LINE_WIDTH);
        let err = writer.write(&record("s1", "AC")).unwrap_err();
        assert!(matches!(err, OutputError::Write { .. }));
    }
}
