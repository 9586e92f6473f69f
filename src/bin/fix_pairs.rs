//! Re-pair fastq files with an offset index, inputs are never fully loaded in memory.

fn main() -> fix_pairs::error::Result<()> {
    fix_pairs::cli::main(fix_pairs::Strategy::Indexed)
}
