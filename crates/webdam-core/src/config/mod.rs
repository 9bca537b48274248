//! Configuration management.
//!
//! Connection, widget and media settings ([`settings::Config`]) are stored
//! as a TOML file and loaded at startup.

pub mod settings;
