//! Build-support library for the openMSX debugger.
//!
//! The primary interface is the `openmsx-buildtool` binary. This lib target
//! exposes the modules to integration tests and to other build glue.

pub mod genconfig;
pub mod host;
pub mod output;
pub mod package;
pub mod platform;
pub mod version;
