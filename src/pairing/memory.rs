//! Pairing with all forward records kept in memory, each input is read once.

/* project use */
use crate::error;
use crate::fastq;
use crate::index::OrderedIndex;
use crate::pairing::{timed, Paths, Summary};
use crate::writer::Output;

/// Load all records of a fastq in an index, identifier keep the marker
pub fn load_fastq<P>(path: P) -> error::Result<OrderedIndex<fastq::Record>>
where
    P: AsRef<std::path::Path>,
{
    let path = path.as_ref();

    let mut index = OrderedIndex::new();
    let mut reader = fastq::Reader::from_path(path)?;

    while let Some(record) = reader.next_record()? {
        let id = record
            .id()
            .ok_or_else(|| fastq::malformed_header(path, index.inserted() + 1, &record.header))?
            .to_vec();

        index.insert(id, record);

        if index.inserted() % crate::PROGRESS_INTERVAL == 0 {
            log::debug!("Reading {} -- {}", path.display(), index.inserted());
        }
    }

    log::debug!("Num seqs in {}: {}", path.display(), index.len());

    Ok(index)
}

/// Load forward records, stream reverse records and write pairs as soon as they are found.
///
/// Paired outputs follow reverse file order. Unpaired output contains reverse only records, in
/// reverse file order, then forward records never matched, in forward file order. A reverse
/// identifier present twice is paired twice with the same forward record.
pub fn fix_pairs(paths: &Paths) -> error::Result<Summary> {
    let forward = timed("Reading forward reads", || load_fastq(&paths.forward))?;

    let mut summary = Summary {
        forward_reads: forward.inserted(),
        forward_duplicates: forward.duplicates(),
        ..Default::default()
    };

    let mut forward_out = Output::create(&paths.outputs.forward)?;
    let mut reverse_out = Output::create(&paths.outputs.reverse)?;
    let mut unpaired_out = Output::create(&paths.outputs.unpaired)?;

    let mut consumed = vec![false; forward.len()];

    timed("Pairing reverse reads", || -> error::Result<()> {
        let mut reader = fastq::Reader::from_path(&paths.reverse)?;

        while let Some(record) = reader.next_record()? {
            summary.reverse_reads += 1;
            if summary.reverse_reads % crate::PROGRESS_INTERVAL == 0 {
                log::debug!("Reading {} -- {}", paths.reverse.display(), summary.reverse_reads);
            }

            let id = record.id().ok_or_else(|| {
                fastq::malformed_header(&paths.reverse, summary.reverse_reads, &record.header)
            })?;

            match forward.get_full(id) {
                Some((position, mate)) => {
                    forward_out.write(mate)?;
                    reverse_out.write(&record)?;

                    consumed[position] = true;
                    summary.surviving_pairs += 1;
                }
                None => {
                    unpaired_out.write(&record)?;
                    summary.broken_reverse += 1;
                }
            }
        }

        Ok(())
    })?;

    forward_out.finish()?;
    reverse_out.finish()?;

    timed("Writing forward unpaired reads", || -> error::Result<()> {
        for ((_, record), used) in forward.iter().zip(consumed.iter()) {
            if !used {
                unpaired_out.write(record)?;
                summary.broken_forward += 1;
            }
        }

        Ok(())
    })?;

    unpaired_out.finish()?;

    Ok(summary)
}
