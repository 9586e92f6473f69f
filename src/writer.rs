//! Output files of a run.

/* std use */
use std::io::Write;

/* project use */
use crate::error;
use crate::fastq;

/// Path of the three output files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub forward: std::path::PathBuf,
    pub reverse: std::path::PathBuf,
    pub unpaired: std::path::PathBuf,
}

impl OutputPaths {
    /// Build `<base>.1.fq`, `<base>.2.fq` and `<base>.U.fq`
    pub fn from_base<P>(base: P) -> Self
    where
        P: AsRef<std::path::Path>,
    {
        let with_suffix = |suffix: &str| {
            let mut name = base.as_ref().as_os_str().to_os_string();
            name.push(suffix);
            std::path::PathBuf::from(name)
        };

        Self {
            forward: with_suffix(".1.fq"),
            reverse: with_suffix(".2.fq"),
            unpaired: with_suffix(".U.fq"),
        }
    }
}

/// Buffered fastq output, file is closed when Output is dropped.
///
/// Call [Output::finish] to get flush error, drop flush silently.
pub struct Output {
    path: std::path::PathBuf,
    writer: std::io::BufWriter<std::fs::File>,
    records: u64,
}

impl Output {
    pub fn create<P>(path: P) -> error::Result<Self>
    where
        P: AsRef<std::path::Path>,
    {
        let path = path.as_ref().to_path_buf();

        let file = std::fs::File::create(&path).map_err(|source| error::Error::CreateFile {
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            path,
            writer: std::io::BufWriter::new(file),
            records: 0,
        })
    }

    pub fn write(&mut self, record: &fastq::Record) -> error::Result<()> {
        record
            .write_to(&mut self.writer)
            .map_err(|source| error::Error::WriteFile {
                path: self.path.clone(),
                source,
            })?;

        self.records += 1;
        if self.records % crate::PROGRESS_INTERVAL == 0 {
            log::debug!("Writing {} -- {}", self.path.display(), self.records);
        }

        Ok(())
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Number of record write
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Flush and close file, return number of record write
    pub fn finish(mut self) -> error::Result<u64> {
        self.writer
            .flush()
            .map_err(|source| error::Error::WriteFile {
                path: self.path.clone(),
                source,
            })?;

        Ok(self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_paths() {
        let paths = OutputPaths::from_base("dir/sample");

        assert_eq!(paths.forward, std::path::PathBuf::from("dir/sample.1.fq"));
        assert_eq!(paths.reverse, std::path::PathBuf::from("dir/sample.2.fq"));
        assert_eq!(paths.unpaired, std::path::PathBuf::from("dir/sample.U.fq"));
    }

    #[test]
    fn output_paths_keep_extension() {
        let paths = OutputPaths::from_base("sample.fixed");

        assert_eq!(paths.forward, std::path::PathBuf::from("sample.fixed.1.fq"));
    }

    #[test]
    fn write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.fq");

        let mut output = Output::create(&path).unwrap();
        output
            .write(&fastq::Record {
                header: b"@r1 1:N".to_vec(),
                sequence: b"ACGT".to_vec(),
                quality: b"IIII".to_vec(),
            })
            .unwrap();
        output
            .write(&fastq::Record {
                header: b"@r2 1:N".to_vec(),
                sequence: b"TT".to_vec(),
                quality: b"JJ".to_vec(),
            })
            .unwrap();

        assert_eq!(output.records(), 2);
        assert_eq!(output.path(), path.as_path());
        assert_eq!(output.finish().unwrap(), 2);

        assert_eq!(
            std::fs::read(&path).unwrap(),
            b"@r1 1:N\nACGT\n+\nIIII\n@r2 1:N\nTT\n+\nJJ\n".to_vec()
        );
    }

    #[test]
    fn flush_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.fq");

        {
            let mut output = Output::create(&path).unwrap();
            output
                .write(&fastq::Record {
                    header: b"@r1".to_vec(),
                    sequence: b"A".to_vec(),
                    quality: b"I".to_vec(),
                })
                .unwrap();
        }

        assert_eq!(std::fs::read(&path).unwrap(), b"@r1\nA\n+\nI\n".to_vec());
    }

    #[test]
    fn create_in_missing_directory() {
        assert!(matches!(
            Output::create("this/directory/does/not/exist.fq"),
            Err(error::Error::CreateFile { .. })
        ));
    }
}
