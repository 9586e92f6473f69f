//! Fastq record and a lazy record reader built on memory mapped blocks.

pub mod block;

/* std use */
use std::io::Write;

/* crate use */
use bstr::ByteSlice;

/* project use */
use crate::error;

/// First byte of a fastq header line
pub const MARKER: u8 = b'@';

/// Borrowed record, each field is a line without its new line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordRef<'a> {
    pub header: &'a [u8],
    pub sequence: &'a [u8],
    pub quality: &'a [u8],
}

/// Owned record, header keep the marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub header: Vec<u8>,
    pub sequence: Vec<u8>,
    pub quality: Vec<u8>,
}

impl Record {
    /// Pairing key of record, marker is kept
    pub fn id(&self) -> Option<&[u8]> {
        identifier(&self.header, true)
    }

    /// Write record in canonical four line form, separator line is always a lone `+`
    pub fn write_to<W>(&self, out: &mut W) -> std::io::Result<()>
    where
        W: Write,
    {
        out.write_all(&self.header)?;
        out.write_all(b"\n")?;
        out.write_all(&self.sequence)?;
        out.write_all(b"\n+\n")?;
        out.write_all(&self.quality)?;
        out.write_all(b"\n")
    }
}

impl<'a> From<RecordRef<'a>> for Record {
    fn from(record: RecordRef<'a>) -> Self {
        Self {
            header: record.header.to_vec(),
            sequence: record.sequence.to_vec(),
            quality: record.quality.to_vec(),
        }
    }
}

/// Extract identifier of a header line: the token before first space.
///
/// Return None if header is empty or didn't start with [MARKER]. A header without space is its own
/// identifier. With `keep_marker` false the leading marker is removed.
pub fn identifier(header: &[u8], keep_marker: bool) -> Option<&[u8]> {
    if header.first() != Some(&MARKER) {
        return None;
    }

    let end = header.find_byte(b' ').unwrap_or(header.len());
    let begin = if keep_marker { 0 } else { 1 };

    Some(&header[begin..end])
}

/// Build the error report for a header [identifier] refused
pub(crate) fn malformed_header(path: &std::path::Path, record: u64, header: &[u8]) -> error::Error {
    error::Error::MalformedHeader {
        path: path.to_path_buf(),
        record,
        header: header.to_str_lossy().into_owned(),
    }
}

/// Lazy sequence of [Record] read from a fastq file
pub struct Reader {
    path: std::path::PathBuf,
    producer: block::Producer,
    current: Option<block::Reader>,
}

impl Reader {
    /// Open fastq file with default blocksize [crate::DEFAULT_BLOCKSIZE]
    pub fn from_path<P>(path: P) -> error::Result<Self>
    where
        P: AsRef<std::path::Path>,
    {
        Reader::with_blocksize(crate::DEFAULT_BLOCKSIZE, path)
    }

    /// Open fastq file with selected blocksize
    pub fn with_blocksize<P>(blocksize: u64, path: P) -> error::Result<Self>
    where
        P: AsRef<std::path::Path>,
    {
        Ok(Reader {
            path: path.as_ref().to_path_buf(),
            producer: block::Producer::with_blocksize(blocksize, path)?,
            current: None,
        })
    }

    /// Path of file read
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Get the next record, Ok(None) at end of file
    pub fn next_record(&mut self) -> error::Result<Option<Record>> {
        loop {
            if let Some(reader) = self.current.as_mut() {
                if let Some(record) = reader.next_record() {
                    return Ok(Some(Record::from(record)));
                }

                if reader.truncated() {
                    log::warn!(
                        "{} end with a partial record, it's ignored",
                        self.path.display()
                    );
                }

                self.current = None;
            }

            match self.producer.next_block()? {
                Some(block) => self.current = Some(block::Reader::new(block)),
                None => return Ok(None),
            }
        }
    }
}

impl Iterator for Reader {
    type Item = error::Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
