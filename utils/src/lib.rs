//! Shared utilities for the Verity ledger tools.

pub mod logging;

pub use logging::{init_logging, LogFormat, ParseLogFormatError};
