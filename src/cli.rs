//! Command line interface shared by `fix_pairs` and `fix_pairs_mem`.

/* crate use */
use clap::Parser;

/* project use */
use crate::error;
use crate::pairing;

const LONG_ABOUT: &str = "Re-pair forward and reverse fastq files.

Assumes that the paired reads have headers that match up until the first space like these:

  @SN741:746:HKFKLBCXX:1:1106:19267:2152 1:N:0:TGCGTAAC
  @SN741:746:HKFKLBCXX:1:1106:19267:2152 2:N:0:TGCGTAAC
  ^ from here...they match...till here ^

This program does not check that every sequence has the proper Illumina forward or reverse tag. It
assumes that you have the correct reads in the correct command line args.

Output files:
  <OUTBASE>.1.fq <= surviving forward reads
  <OUTBASE>.2.fq <= surviving reverse reads
  <OUTBASE>.U.fq <= unpaired reads

Set RUST_LOG to control verbosity (error, warn, info, debug, trace).";

#[derive(Parser, Debug)]
#[clap(version, about = "Re-pair forward and reverse fastq files", long_about = LONG_ABOUT)]
pub struct Command {
    /// Forward reads fastq
    pub forward: std::path::PathBuf,

    /// Reverse reads fastq
    pub reverse: std::path::PathBuf,

    /// Base name of output files
    pub outbase: std::path::PathBuf,
}

impl Command {
    pub fn paths(&self) -> pairing::Paths {
        pairing::Paths::new(&self.forward, &self.reverse, &self.outbase)
    }
}

/// Entry point of binaries, parse arguments, set up logger and run the selected strategy
pub fn main(strategy: pairing::Strategy) -> error::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let command = Command::parse();

    if let Err(e) = pairing::run(strategy, &command.paths()) {
        log::error!("{}", e);

        return Err(e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        let command = Command::try_parse_from(["fix_pairs", "r1.fq", "r2.fq", "out"]).unwrap();

        assert_eq!(
            command.paths(),
            pairing::Paths::new("r1.fq", "r2.fq", "out")
        );
    }

    #[test]
    fn missing_argument() {
        assert!(Command::try_parse_from(["fix_pairs", "r1.fq", "r2.fq"]).is_err());
    }

    #[test]
    fn too_many_argument() {
        assert!(Command::try_parse_from(["fix_pairs", "r1.fq", "r2.fq", "out", "more"]).is_err());
    }
}
