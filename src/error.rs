//! Error types for imginline operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while inlining images into a document.
#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read input file {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse HTML: {0}")]
    Parse(String),

    #[error("cannot serialize HTML: {0}")]
    Serialize(#[source] io::Error),

    #[error("cannot write output file {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A referenced image could not be read. Recoverable: the walker keeps
    /// the original `src` and moves on.
    #[error("cannot read image {}: {source}", .path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
