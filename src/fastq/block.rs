//! Struct that extract part of file (called block) and read it as fastq file.

/* crate use */
use bstr::ByteSlice;

/* project use */
use crate::block::Block;
use crate::error;
use crate::fastq::RecordRef;

/// Cut a fastq file in [Block], each block contains only complete records
pub struct Producer {
    path: std::path::PathBuf,
    offset: u64,
    blocksize: u64,
    file: std::fs::File,
    file_length: u64,
}

impl Producer {
    pub fn new<P>(path: P) -> error::Result<Self>
    where
        P: AsRef<std::path::Path>,
    {
        Producer::with_blocksize(crate::DEFAULT_BLOCKSIZE, path)
    }

    pub fn with_blocksize<P>(blocksize: u64, path: P) -> error::Result<Self>
    where
        P: AsRef<std::path::Path>,
    {
        let path = path.as_ref().to_path_buf();

        let file_length = path
            .metadata()
            .map_err(|source| error::Error::MetaDataFile {
                path: path.clone(),
                source,
            })?
            .len();

        let file = std::fs::File::open(&path).map_err(|source| error::Error::OpenFile {
            path: path.clone(),
            source,
        })?;

        Ok(Producer {
            path,
            offset: 0,
            blocksize: blocksize.max(1),
            file,
            file_length,
        })
    }

    /// Get the next [Block], None when all file is consumed.
    ///
    /// If a record is larger than blocksize, the mapped area is doubled until it contains one.
    pub fn next_block(&mut self) -> error::Result<Option<Block>> {
        if self.offset >= self.file_length {
            return Ok(None);
        }

        let remain = self.file_length - self.offset;
        let mut length = self.blocksize.min(remain);

        loop {
            let mem = self.map_block(length)?;

            if length == remain {
                self.offset = self.file_length;

                return Ok(Some(Block::new(mem.len(), mem)));
            }

            match Producer::correct_block_size(&mem) {
                Some(end) => {
                    self.offset += end as u64;

                    return Ok(Some(Block::new(end, mem)));
                }
                None => {
                    length = (length * 2).min(remain);
                    log::debug!(
                        "no complete record in block of {}, grow it to {} bytes",
                        self.path.display(),
                        length
                    );
                }
            }
        }
    }

    fn map_block(&self, length: u64) -> error::Result<memmap2::Mmap> {
        unsafe {
            memmap2::MmapOptions::new()
                .offset(self.offset)
                .len(length as usize)
                .map(&self.file)
                .map_err(|source| error::Error::MapFile {
                    path: self.path.clone(),
                    source,
                })
        }
    }

    /// Position just after the last complete record of block, block must start on a header.
    fn correct_block_size(block: &[u8]) -> Option<usize> {
        memchr::memchr_iter(b'\n', block)
            .enumerate()
            .filter(|(nb_line, _)| nb_line % 4 == 3)
            .map(|(_, pos)| pos + 1)
            .last()
    }
}

impl Iterator for Producer {
    type Item = error::Result<Block>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_block() {
            Ok(Some(block)) => Some(Ok(block)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Iterate over records of a [Block]
pub struct Reader {
    offset: usize,
    truncated: bool,
    block: Block,
}

impl Reader {
    pub fn new(block: Block) -> Self {
        Reader {
            offset: 0,
            truncated: false,
            block,
        }
    }

    /// Range of line begin at `begin`, last line of block can miss its new line
    fn get_line(&self, begin: usize) -> Option<std::ops::Range<usize>> {
        let data = self.block.data();

        if begin >= data.len() {
            return None;
        }

        let end = data[begin..]
            .find_byte(b'\n')
            .map_or(data.len(), |next| begin + next);

        Some(begin..end)
    }

    /// Get next record of block, a trailing group of less than four lines is skipped
    pub fn next_record(&mut self) -> Option<RecordRef<'_>> {
        let header = self.get_line(self.offset)?;

        let lines = self.get_line(header.end + 1).and_then(|sequence| {
            let plus = self.get_line(sequence.end + 1)?;
            let quality = self.get_line(plus.end + 1)?;

            Some((sequence, quality))
        });

        match lines {
            Some((sequence, quality)) => {
                self.offset = quality.end + 1;

                let data = self.block.data();
                Some(RecordRef {
                    header: &data[header],
                    sequence: &data[sequence],
                    quality: &data[quality],
                })
            }
            None => {
                self.offset = self.block.len();
                self.truncated = true;

                None
            }
        }
    }

    /// True if block end with a partial record
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod producer {
        use super::*;

        #[test]
        fn new() {
            let mut tmp = Producer::new(crate::tests::generate_fastq(42, 1_000, 150)).unwrap();

            let block = tmp.next_block().unwrap().unwrap();

            assert!(block.len() <= crate::DEFAULT_BLOCKSIZE as usize);
            assert_eq!(block.data().iter().filter(|c| **c == b'\n').count() % 4, 0);
        }

        #[test]
        fn with_blocksize() {
            let file = crate::tests::fastq_from_str(
                "@0 1:N\nACGT\n+\nIIII\n@1 1:N\nTTGA\n+1\nJJJJ\n@2 1:N\nGGCA\n+\nKKKK\n",
            );

            let mut tmp = Producer::with_blocksize(45, file.path()).unwrap();

            let block = tmp.next_block().unwrap().unwrap();
            assert_eq!(block.data(), b"@0 1:N\nACGT\n+\nIIII\n@1 1:N\nTTGA\n+1\nJJJJ\n");

            let block = tmp.next_block().unwrap().unwrap();
            assert_eq!(block.data(), b"@2 1:N\nGGCA\n+\nKKKK\n");

            assert!(tmp.next_block().unwrap().is_none());
        }

        #[test]
        fn grow_block() {
            let file = crate::tests::fastq_from_str("@0 1:N\nACGT\n+\nIIII\n@1 1:N\nTTGA\n+\nJJJJ\n");

            let mut tmp = Producer::with_blocksize(4, file.path()).unwrap();

            let block = tmp.next_block().unwrap().unwrap();
            assert_eq!(block.data(), b"@0 1:N\nACGT\n+\nIIII\n");

            let block = tmp.next_block().unwrap().unwrap();
            assert_eq!(block.data(), b"@1 1:N\nTTGA\n+\nJJJJ\n");

            assert!(tmp.next_block().unwrap().is_none());
        }

        #[test]
        fn get_all_block() {
            let file = crate::tests::generate_fastq(42, 1_000, 150);
            let length = file.as_file().metadata().unwrap().len() as usize;

            let tmp = Producer::with_blocksize(1_000, file.path()).unwrap();

            let blocks = tmp.collect::<error::Result<Vec<Block>>>().unwrap();

            assert_eq!(blocks.iter().map(|b| b.len()).sum::<usize>(), length);
            assert!(blocks
                .iter()
                .all(|b| b.data().iter().filter(|c| **c == b'\n').count() % 4 == 0));
        }

        #[test]
        fn empty_file() {
            let mut tmp = Producer::new(crate::tests::fastq_from_str("")).unwrap();

            assert!(tmp.next_block().unwrap().is_none());
        }
    }

    mod reader {
        use super::*;

        #[test]
        fn iterate_over_seq() {
            let file = crate::tests::fastq_from_str(
                "@0 1:N\nACGT\n+\nIIII\n@1 1:N\nTTGA\n+1\nJJJJ\n@2 1:N\nGGCA\n+\nKKKK\n",
            );
            let mut producer = Producer::with_blocksize(45, file.path()).unwrap();

            let mut headers = Vec::new();
            let mut seqs = Vec::new();
            let mut quals = Vec::new();

            while let Ok(Some(block)) = producer.next_block() {
                let mut reader = Reader::new(block);

                while let Some(record) = reader.next_record() {
                    headers.push(record.header.to_vec());
                    seqs.push(record.sequence.to_vec());
                    quals.push(record.quality.to_vec());
                }

                assert!(!reader.truncated());
            }

            assert_eq!(
                headers,
                vec![b"@0 1:N".to_vec(), b"@1 1:N".to_vec(), b"@2 1:N".to_vec()]
            );
            assert_eq!(
                seqs,
                vec![b"ACGT".to_vec(), b"TTGA".to_vec(), b"GGCA".to_vec()]
            );
            assert_eq!(
                quals,
                vec![b"IIII".to_vec(), b"JJJJ".to_vec(), b"KKKK".to_vec()]
            );
        }

        #[test]
        fn partial_record() {
            let file = crate::tests::fastq_from_str("@0\nACGT\n+\nIIII\n@1\nTTGA\n");
            let mut producer = Producer::new(file.path()).unwrap();

            let mut reader = Reader::new(producer.next_block().unwrap().unwrap());

            assert_eq!(reader.next_record().unwrap().header, b"@0");
            assert!(reader.next_record().is_none());
            assert!(reader.truncated());
            assert!(reader.next_record().is_none());
        }
    }
}
