// ABOUTME: netrc credential file loading, parsing, and host lookup
// ABOUTME: Resolves per-host login and password pairs from the legacy netrc format

pub mod error;
pub mod parser;
pub mod store;

pub use error::NetrcError;
pub use store::{Machine, Netrc, Secret, default_netrc_path, load, parse, read_source};
