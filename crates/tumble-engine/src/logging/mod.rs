//! Logging setup.
//!
//! Library code only talks to the `log` facade. Binaries call
//! [`init_logging`] once to route it through `env_logger`.

mod init;

pub use init::{init_logging, resolve_filter, LoggingConfig, DEFAULT_FILTER};
