//! Errors that stop the lint from running.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::dict::DictError;

#[derive(Error, Debug)]
pub enum Error {
    /// The dictionary couldn't be set up; nothing gets checked.
    #[error("failed to start misspelling lint: {0}")]
    Dictionary(#[from] DictError),

    #[error("failed to read IR dump `{}`: {source}", .path.display())]
    ReadDump {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed IR dump `{}`: {source}", .path.display())]
    ParseDump {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
