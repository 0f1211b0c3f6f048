// ABOUTME: Resolves download credentials from a netrc file for authenticated binary distribution
// ABOUTME: Exposes the netrc parser, its configuration, and the registry URL builder

pub mod config;
pub mod netrc;
pub mod registry;

pub use config::Config;
pub use netrc::{Machine, Netrc, NetrcError, load, parse};
pub use registry::{BinaryTarget, SdkRegistry};
