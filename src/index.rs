//! Identifier index of a fastq file and reconstruction of records from byte offsets.

/* std use */
use std::io::BufRead;
use std::io::Seek;

/* crate use */
use bstr::ByteSlice;

/* project use */
use crate::error;
use crate::fastq;

/// Mapping from identifier to a value that remember the insertion order.
///
/// Inserting an identifier already present replace its value but keep its first position.
pub struct OrderedIndex<V> {
    entries: Vec<(Vec<u8>, V)>,
    positions: rustc_hash::FxHashMap<Vec<u8>, usize>,
    duplicates: u64,
}

impl<V> OrderedIndex<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            positions: rustc_hash::FxHashMap::default(),
            duplicates: 0,
        }
    }

    /// Insert value, return true if identifier was already present
    pub fn insert(&mut self, id: Vec<u8>, value: V) -> bool {
        match self.positions.get(&id) {
            Some(&position) => {
                log::debug!("identifier {} is present twice", id.as_bstr());

                self.entries[position].1 = value;
                self.duplicates += 1;

                true
            }
            None => {
                self.positions.insert(id.clone(), self.entries.len());
                self.entries.push((id, value));

                false
            }
        }
    }

    /// Insertion rank of identifier
    pub fn position(&self, id: &[u8]) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn get(&self, id: &[u8]) -> Option<&V> {
        self.get_full(id).map(|(_, value)| value)
    }

    /// Value of identifier with its insertion rank
    pub fn get_full(&self, id: &[u8]) -> Option<(usize, &V)> {
        self.position(id)
            .map(|position| (position, &self.entries[position].1))
    }

    pub fn contains(&self, id: &[u8]) -> bool {
        self.positions.contains_key(id)
    }

    /// Number of distinct identifiers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of insertions that replaced a previous value
    pub fn duplicates(&self) -> u64 {
        self.duplicates
    }

    /// Number of insertions, duplicates included
    pub fn inserted(&self) -> u64 {
        self.entries.len() as u64 + self.duplicates
    }

    /// Iterate over identifier and value in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &V)> {
        self.entries.iter().map(|(id, value)| (id.as_slice(), value))
    }
}

impl<V> Default for OrderedIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte offsets of header, sequence and quality line of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OffsetTriple {
    pub header: u64,
    pub sequence: u64,
    pub quality: u64,
}

pub type OffsetIndex = OrderedIndex<OffsetTriple>;

/// Build offset index of a fastq file in one pass.
///
/// File is read as a cycle of four lines (header, sequence, separator, quality). Identifier is
/// stored without marker. If number of lines isn't a multiple of four, the trailing partial record
/// is ignored.
pub fn index_fastq<P>(path: P) -> error::Result<OffsetIndex>
where
    P: AsRef<std::path::Path>,
{
    let path = path.as_ref();

    let file = std::fs::File::open(path).map_err(|source| error::Error::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = std::io::BufReader::new(file);

    let mut index = OffsetIndex::new();
    let mut line = Vec::new();
    let mut position = 0;
    let mut cycle = 0;
    let mut nb_record = 0;

    let mut header = Vec::new();
    let mut triple = OffsetTriple::default();

    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|source| error::Error::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;

        if read == 0 {
            break;
        }
        position += read as u64;

        match cycle {
            0 => {
                header.clear();
                header.extend_from_slice(line.strip_suffix(b"\n").unwrap_or(&line[..]));
                triple.sequence = position;
            }
            1 => (),
            2 => triple.quality = position,
            _ => {
                // a trailing partial record is never validated
                let id = fastq::identifier(&header, false)
                    .ok_or_else(|| fastq::malformed_header(path, nb_record + 1, &header))?;
                index.insert(id.to_vec(), triple);
                triple.header = position;

                nb_record += 1;
                if nb_record % crate::PROGRESS_INTERVAL == 0 {
                    log::debug!("Indexing {} -- {}", path.display(), nb_record);
                }
            }
        }

        cycle = (cycle + 1) % 4;
    }

    if cycle != 0 {
        log::warn!("{} end with a partial record, it's ignored", path.display());
    }

    log::debug!("Num seqs in {}: {}", path.display(), index.len());

    Ok(index)
}

/// Seekable handle on a fastq file, rebuild records from [OffsetTriple]
pub struct RecordSource {
    path: std::path::PathBuf,
    reader: std::io::BufReader<std::fs::File>,
}

impl RecordSource {
    pub fn open<P>(path: P) -> error::Result<Self>
    where
        P: AsRef<std::path::Path>,
    {
        let path = path.as_ref().to_path_buf();

        let file = std::fs::File::open(&path).map_err(|source| error::Error::OpenFile {
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            path,
            reader: std::io::BufReader::new(file),
        })
    }

    /// Read line of header, sequence and quality, separator is not read
    pub fn read_record(&mut self, triple: &OffsetTriple) -> error::Result<fastq::Record> {
        Ok(fastq::Record {
            header: self.read_line_at(triple.header)?,
            sequence: self.read_line_at(triple.sequence)?,
            quality: self.read_line_at(triple.quality)?,
        })
    }

    /// Rebuild record at `triple` and append it to `out`
    pub fn write_record(
        &mut self,
        triple: &OffsetTriple,
        out: &mut crate::writer::Output,
    ) -> error::Result<()> {
        let record = self.read_record(triple)?;

        out.write(&record)
    }

    fn read_line_at(&mut self, offset: u64) -> error::Result<Vec<u8>> {
        self.reader
            .seek(std::io::SeekFrom::Start(offset))
            .map_err(|source| error::Error::Seek {
                path: self.path.clone(),
                offset,
                source,
            })?;

        let mut line = Vec::new();
        let read = self
            .reader
            .read_until(b'\n', &mut line)
            .map_err(|source| error::Error::ReadFile {
                path: self.path.clone(),
                source,
            })?;

        if read == 0 {
            return Err(error::Error::TruncatedRecord {
                path: self.path.clone(),
                offset,
            });
        }

        if line.last() == Some(&b'\n') {
            line.pop();
        }

        Ok(line)
    }
}
