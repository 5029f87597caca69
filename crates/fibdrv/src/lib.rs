//! fibdrv library: application logic for the `fibdrv` binary.

pub mod app;
pub mod config;
pub mod errors;
