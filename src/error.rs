//! Error type of fix_pairs, every variant related to a file carry its path.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("fix_pairs failled to read metadata of {} {}", .path.display(), .source)]
    MetaDataFile {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("fix_pairs can't open file {} {}", .path.display(), .source)]
    OpenFile {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("fix_pairs can't create file {} {}", .path.display(), .source)]
    CreateFile {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("fix_pairs can't map {} on memory {}", .path.display(), .source)]
    MapFile {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("fix_pairs failled to read {} {}", .path.display(), .source)]
    ReadFile {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("fix_pairs failled to write {} {}", .path.display(), .source)]
    WriteFile {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("fix_pairs can't seek to offset {} of {} {}", .offset, .path.display(), .source)]
    Seek {
        path: std::path::PathBuf,
        offset: u64,
        source: std::io::Error,
    },

    #[error("record {} of {} has a malformed header {:?}, header must start with '@'", .record, .path.display(), .header)]
    MalformedHeader {
        path: std::path::PathBuf,
        record: u64,
        header: String,
    },

    #[error("no line at offset {} of {}, input file seems to have changed during run", .offset, .path.display())]
    TruncatedRecord { path: std::path::PathBuf, offset: u64 },
}

pub type Result<T> = std::result::Result<T, Error>;
