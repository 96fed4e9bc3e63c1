//! Link configuration files.
//!
//! A link file is a TOML document with optional `[link]` and `[sweep]`
//! tables. Missing fields fall back to the engine defaults.

pub mod link_file;

pub use link_file::{LinkConfig, load_link_config};
