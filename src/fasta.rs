//! Minimal streaming FASTA reader and writer.
//!
//! ```text
//! >sequence1 description
//! GATTACAGATTACA
//! TGCATGCA
//! >sequence2
//! ACGTACGT
//! ```

use std::io::{self, BufRead, Write};

/// Conventional FASTA line width used when writing sequences.
pub const DEFAULT_LINE_WIDTH: usize = 60;

#[derive(Debug, thiserror::Error)]
pub enum FastaError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("sequence data before the first header at line {line}")]
    DataBeforeHeader { line: usize },

    #[error("header with an empty identifier at line {line}")]
    EmptyIdentifier { line: usize },

    #[error("header is not valid UTF-8 at line {line}")]
    InvalidHeader { line: usize },
}

impl FastaError {
    /// Whether this is a problem with the bytes of the FASTA file rather
    /// than with reading them.
    pub const fn is_format(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: String,
    header: String,
    sequence: Vec<u8>,
}

impl Record {
    /// Build a record from a header (without the leading `>`) and its
    /// sequence. Returns `None` if the header has no identifier.
    pub fn new(header: impl Into<String>, sequence: impl Into<Vec<u8>>) -> Option<Self> {
        let header = header.into().trim().to_string();
        let id = header.split_whitespace().next()?.to_string();
        Some(Self {
            id,
            header,
            sequence: sequence.into(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// Header text following the identifier, if there is any.
    pub fn description(&self) -> Option<&str> {
        let rest = self.header()[self.id.len()..].trim_start();
        (!rest.is_empty()).then_some(rest)
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }
}

/// Lazy iterator over the records of a FASTA stream.
///
/// Blank lines are skipped anywhere. Anything other than a blank line
/// before the first header is an error, as is a header without an
/// identifier. Once an error is returned or the stream ends, the reader
/// yields `None` and never touches the underlying source again.
pub struct Reader<R> {
    inner: R,
    line: Vec<u8>,
    line_number: usize,
    // header bytes (without '>') and line number, read ahead while
    // collecting the previous record's sequence
    pending: Option<(Vec<u8>, usize)>,
    done: bool,
}

impl<R: BufRead> Reader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: Vec::with_capacity(256),
            line_number: 0,
            pending: None,
            done: false,
        }
    }

    // Reads the next line into `self.line` with its terminator removed.
    // Returns false at end of stream.
    fn read_line(&mut self) -> io::Result<bool> {
        self.line.clear();
        if self.inner.read_until(b'\n', &mut self.line)? == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        while matches!(self.line.last(), Some(b'\n' | b'\r')) {
            self.line.pop();
        }
        Ok(true)
    }

    fn is_blank(&self) -> bool {
        self.line.iter().all(u8::is_ascii_whitespace)
    }

    fn next_header(&mut self) -> Result<Option<(Vec<u8>, usize)>, FastaError> {
        if let Some(pending) = self.pending.take() {
            return Ok(Some(pending));
        }
        while self.read_line()? {
            if self.is_blank() {
                continue;
            }
            return match self.line.split_first() {
                Some((b'>', header)) => Ok(Some((header.to_vec(), self.line_number))),
                _ => Err(FastaError::DataBeforeHeader {
                    line: self.line_number,
                }),
            };
        }
        Ok(None)
    }

    fn read_record(&mut self) -> Result<Option<Record>, FastaError> {
        let Some((header, line)) = self.next_header()? else {
            self.done = true;
            return Ok(None);
        };
        let header = String::from_utf8(header).map_err(|_| FastaError::InvalidHeader { line })?;

        let mut sequence: Vec<u8> = Vec::new();
        loop {
            if !self.read_line()? {
                self.done = true;
                break;
            }
            if let Some((b'>', next)) = self.line.split_first() {
                self.pending = Some((next.to_vec(), self.line_number));
                break;
            }
            sequence.extend(self.line.iter().filter(|b| !b.is_ascii_whitespace()));
        }

        Record::new(header, sequence)
            .map(Some)
            .ok_or(FastaError::EmptyIdentifier { line })
    }
}

impl<R: BufRead> Iterator for Reader<R> {
    type Item = Result<Record, FastaError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(record) => record.map(Ok),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: BufRead> std::iter::FusedIterator for Reader<R> {}

/// Writes records as `>id` followed by the sequence wrapped at a fixed width.
pub struct Writer<W> {
    inner: W,
    line_width: usize,
}

impl<W: Write> Writer<W> {
    /// A `line_width` of zero writes each sequence on a single line.
    pub fn with_line_width(inner: W, line_width: usize) -> Self {
        Self { inner, line_width }
    }

    pub fn write_record(&mut self, record: &Record) -> io::Result<()> {
        writeln!(self.inner, ">{}", record.id())?;

        let sequence = record.sequence();
        if sequence.is_empty() {
            return Ok(());
        }
        let width = if self.line_width == 0 {
            sequence.len()
        } else {
            self.line_width
        };
        for chunk in sequence.chunks(width) {
            self.inner.write_all(chunk)?;
            self.inner.write_all(b"\n")?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
