//! Re-pair fastq files with all forward records in memory, each input is read once.

fn main() -> fix_pairs::error::Result<()> {
    fix_pairs::cli::main(fix_pairs::Strategy::InMemory)
}
