//! Pairing with offset index, only identifiers and byte offsets are kept in memory.

/* crate use */
use bstr::ByteSlice;

/* project use */
use crate::error;
use crate::index;
use crate::index::RecordSource;
use crate::pairing::{timed, Partition, Paths, Summary};
use crate::writer::Output;

/// Index both inputs, compute paired identifiers then rebuild records by seeking in inputs.
///
/// Paired outputs follow forward file order. Unpaired output contains forward only records then
/// reverse only records.
pub fn fix_pairs(paths: &Paths) -> error::Result<Summary> {
    let forward = timed("Indexing forward reads", || index::index_fastq(&paths.forward))?;
    let reverse = timed("Indexing reverse reads", || index::index_fastq(&paths.reverse))?;

    let partition = timed("Finding paired IDs", || Partition::compute(&forward, &reverse));

    log::debug!("Num paired keys: {}", partition.paired.len());
    log::debug!("Num for only keys: {}", partition.forward_only.len());
    log::debug!("Num rev only keys: {}", partition.reverse_only.len());

    let mut forward_source = RecordSource::open(&paths.forward)?;
    let mut reverse_source = RecordSource::open(&paths.reverse)?;

    let surviving_pairs = timed("Writing paired reads", || {
        write_paired(&partition, &mut forward_source, &mut reverse_source, paths)
    })?;

    let (broken_forward, broken_reverse) = timed("Writing un-paired reads", || {
        write_unpaired(&partition, &mut forward_source, &mut reverse_source, paths)
    })?;

    Ok(Summary {
        forward_reads: forward.inserted(),
        reverse_reads: reverse.inserted(),
        surviving_pairs,
        broken_forward,
        broken_reverse,
        forward_duplicates: forward.duplicates(),
        reverse_duplicates: reverse.duplicates(),
    })
}

fn write_paired(
    partition: &Partition<index::OffsetTriple>,
    forward_source: &mut RecordSource,
    reverse_source: &mut RecordSource,
    paths: &Paths,
) -> error::Result<u64> {
    let mut forward_out = Output::create(&paths.outputs.forward)?;
    let mut reverse_out = Output::create(&paths.outputs.reverse)?;

    for (id, forward, reverse) in partition.paired.iter() {
        log::trace!("pair {}", id.as_bstr());

        forward_source.write_record(forward, &mut forward_out)?;
        reverse_source.write_record(reverse, &mut reverse_out)?;
    }

    forward_out.finish()?;
    reverse_out.finish()
}

fn write_unpaired(
    partition: &Partition<index::OffsetTriple>,
    forward_source: &mut RecordSource,
    reverse_source: &mut RecordSource,
    paths: &Paths,
) -> error::Result<(u64, u64)> {
    let mut unpaired_out = Output::create(&paths.outputs.unpaired)?;

    for (_, triple) in partition.forward_only.iter() {
        forward_source.write_record(triple, &mut unpaired_out)?;
    }
    let broken_forward = unpaired_out.records();

    for (_, triple) in partition.reverse_only.iter() {
        reverse_source.write_record(triple, &mut unpaired_out)?;
    }
    let broken_reverse = unpaired_out.finish()? - broken_forward;

    Ok((broken_forward, broken_reverse))
}
