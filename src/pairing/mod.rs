//! Match forward and reverse records and write the three outputs.

pub mod indexed;
pub mod memory;

/* project use */
use crate::error;
use crate::index::OrderedIndex;
use crate::writer::OutputPaths;

/// How records are kept between reading and writing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Keep only offsets of records, inputs are read twice
    Indexed,
    /// Keep all forward records in memory, inputs are read once
    InMemory,
}

/// Inputs and outputs of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub forward: std::path::PathBuf,
    pub reverse: std::path::PathBuf,
    pub outputs: OutputPaths,
}

impl Paths {
    pub fn new<P, Q, R>(forward: P, reverse: Q, outbase: R) -> Self
    where
        P: AsRef<std::path::Path>,
        Q: AsRef<std::path::Path>,
        R: AsRef<std::path::Path>,
    {
        Self {
            forward: forward.as_ref().to_path_buf(),
            reverse: reverse.as_ref().to_path_buf(),
            outputs: OutputPaths::from_base(outbase),
        }
    }
}

/// Counters of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub forward_reads: u64,
    pub reverse_reads: u64,
    pub surviving_pairs: u64,
    pub broken_forward: u64,
    pub broken_reverse: u64,
    /// Forward records collapsed on a previous record with same identifier
    pub forward_duplicates: u64,
    /// Reverse records collapsed on a previous record with same identifier, always 0 in memory
    pub reverse_duplicates: u64,
}

impl Summary {
    pub fn total_input(&self) -> u64 {
        self.forward_reads + self.reverse_reads
    }

    pub fn total_accounted(&self) -> u64 {
        2 * self.surviving_pairs + self.broken_forward + self.broken_reverse
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "----Results-------------------------------------------------")?;
        writeln!(f, "Num input forward reads:   {}", self.forward_reads)?;
        writeln!(f, "Num input reverse reads:   {}", self.reverse_reads)?;
        writeln!(f, "Total input reads:         {}", self.total_input())?;
        writeln!(f)?;
        writeln!(f, "Num surviving read pairs:  {}", self.surviving_pairs)?;
        writeln!(f, "Num broken forward reads:  {}", self.broken_forward)?;
        writeln!(f, "Num broken reverse reads:  {}", self.broken_reverse)?;
        writeln!(
            f,
            "Num duplicate reads:       {}",
            self.forward_duplicates + self.reverse_duplicates
        )?;
        writeln!(f, "Total reads accounted for: {}", self.total_accounted())?;
        write!(f, "------------------------------------------------------------")
    }
}

/// Split identifiers of two index in paired, forward only and reverse only.
///
/// Paired and forward only follow forward insertion order, reverse only follow reverse insertion
/// order. Each entry borrow identifier and value from its index.
pub struct Partition<'a, V> {
    pub paired: Vec<(&'a [u8], &'a V, &'a V)>,
    pub forward_only: Vec<(&'a [u8], &'a V)>,
    pub reverse_only: Vec<(&'a [u8], &'a V)>,
}

impl<'a, V> Partition<'a, V> {
    pub fn compute(forward: &'a OrderedIndex<V>, reverse: &'a OrderedIndex<V>) -> Self {
        let mut paired = Vec::new();
        let mut forward_only = Vec::new();

        for (id, value) in forward.iter() {
            match reverse.get(id) {
                Some(mate) => paired.push((id, value, mate)),
                None => forward_only.push((id, value)),
            }
        }

        let reverse_only = reverse
            .iter()
            .filter(|(id, _)| !forward.contains(id))
            .collect();

        Self {
            paired,
            forward_only,
            reverse_only,
        }
    }
}

/// Run `action` and log its duration
pub(crate) fn timed<T, F>(title: &str, action: F) -> T
where
    F: FnOnce() -> T,
{
    let begin = std::time::Instant::now();

    let result = action();

    log::info!(
        "{} finished in {} seconds",
        title,
        begin.elapsed().as_secs_f64()
    );

    result
}

/// Re-pair inputs of `paths` with the selected strategy
pub fn run(strategy: Strategy, paths: &Paths) -> error::Result<Summary> {
    log::debug!("Run with strategy {:?} on {:?}", strategy, paths);

    let summary = match strategy {
        Strategy::Indexed => indexed::fix_pairs(paths)?,
        Strategy::InMemory => memory::fix_pairs(paths)?,
    };

    log::info!("Surviving forward seqs: {}", paths.outputs.forward.display());
    log::info!("Surviving reverse seqs: {}", paths.outputs.reverse.display());
    log::info!("Unpaired seqs: {}", paths.outputs.unpaired.display());
    log::info!("\n{}", summary);

    Ok(summary)
}
