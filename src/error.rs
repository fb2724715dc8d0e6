//! Error handling for the chaintable library
//!
//! Lookups and removals never fail: a missing key is an ordinary `None`.
//! Errors only come from building a table with bad parameters, from
//! configuration I/O, and from growth that runs out of address space or memory.

use thiserror::Error;

/// Main error type for the chaintable library
#[derive(Error, Debug)]
pub enum ChainTableError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },

    /// Growth target does not fit in the platform's address space
    #[error("Capacity exhausted: cannot grow beyond {capacity} slots")]
    CapacityExhausted {
        /// Slot count at the time growth was attempted
        capacity: usize,
    },

    /// Memory allocation failures
    #[error("Memory allocation failed: requested {size} bytes")]
    OutOfMemory {
        /// Number of bytes requested
        size: usize,
    },
}

impl ChainTableError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a capacity exhausted error
    pub fn capacity_exhausted(capacity: usize) -> Self {
        Self::CapacityExhausted { capacity }
    }

    /// Create an out of memory error
    pub fn out_of_memory(size: usize) -> Self {
        Self::OutOfMemory { size }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::OutOfMemory { .. } => true,
            Self::Configuration { .. } => false,
            Self::CapacityExhausted { .. } => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Configuration { .. } => "config",
            Self::CapacityExhausted { .. } => "capacity",
            Self::OutOfMemory { .. } => "memory",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ChainTableError>;
