//! # Agent Monitoring Telemetry
//!
//! Structured logging bootstrap shared by the agentmon binaries.

pub mod logging;

pub use logging::EventLogger;
