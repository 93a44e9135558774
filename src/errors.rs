//! VCS errors
//!
//! All errors the console can produce

use thiserror::Error;

/// VCS error type
///
/// All console errors are encapsuled inside this error type
#[derive(Debug, Error)]
pub enum VcsError {
    #[error("VCS can't run without a cartridge!")]
    NoCartridgeInserted,

    #[error("processor can't be built without a memory interface")]
    MissingMemory,

    #[error("Cartridge error: {details}")]
    CartridgeError {
        details: String,
        #[source]
        source: CartridgeError,
    },

    #[error("input channel disconnected")]
    InputChannelDisconnected,
}

/// Cartridge errors
#[derive(Debug, Error)]
pub enum CartridgeError {
    #[error("can't read ROM image '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("ROM image is empty")]
    Empty,

    #[error("unsupported ROM size of {size} bytes, only 2 kB and 4 kB images are supported")]
    UnsupportedSize { size: usize },
}
