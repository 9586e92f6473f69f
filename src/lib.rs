//! Re-pair forward and reverse fastq files whose records are no longer synchronized.
//!
//! Records are matched on their identifier, the part of header before the first space. Reads
//! present in both files are written in `<base>.1.fq` and `<base>.2.fq` with the same order,
//! other reads are written in `<base>.U.fq`.
//!
//! Two strategies are available, see [Strategy]:
//! - [pairing::memory] keep all forward records in memory and stream reverse file
//! - [pairing::indexed] keep only byte offsets of records and seek in inputs to write outputs

pub mod block;
pub mod cli;
pub mod error;
pub mod fastq;
pub mod index;
pub mod pairing;
pub mod writer;

pub use pairing::{run, Paths, Strategy, Summary};

/// Default size of memory mapped block
pub const DEFAULT_BLOCKSIZE: u64 = 65_536;

/// Number of records between two progress messages
pub const PROGRESS_INTERVAL: u64 = 10_000;

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rand::Rng;
    use rand::SeedableRng;

    pub fn generate_fastq(seed: u64, nb_seq: usize, length: usize) -> tempfile::NamedTempFile {
        let ids = (0..nb_seq).map(|i| i.to_string()).collect::<Vec<String>>();

        fastq_with_ids(seed, &ids, 1, length)
    }

    /// Write a fastq where record `i` have identifier `ids[i]`, `mate` is the illumina read number
    pub fn fastq_with_ids<S>(seed: u64, ids: &[S], mate: u8, length: usize) -> tempfile::NamedTempFile
    where
        S: std::fmt::Display,
    {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

        let mut file = tempfile::NamedTempFile::new().unwrap();

        let dna = [b'A', b'C', b'T', b'G'];
        let qual = (0..94).collect::<Vec<u8>>();

        for id in ids {
            let dna_seq = (0..length)
                .map(|_| dna[rng.gen_range(0..4)] as char)
                .collect::<String>();
            let qual_seq = (0..length)
                .map(|_| (qual[rng.gen_range(0..94)] + 33) as char)
                .collect::<String>();

            writeln!(
                file,
                "@{} {}:N:0:TGCGTAAC\n{}\n+\n{}",
                id, mate, dna_seq, qual_seq
            )
            .unwrap();
        }

        file.flush().unwrap();

        file
    }

    pub fn fastq_from_str(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();

        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();

        file
    }
}
