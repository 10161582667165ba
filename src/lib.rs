//! License detection and policy compatibility engine.
//!
//! The core is three leaf components with one-way data flow:
//!
//! - [`registry`]: static reference data: canonical identifiers, aliases,
//!   copyleft and attribution sets.
//! - [`detect`]: normalizes explicit identifiers and pattern-matches free
//!   text against an ordered signature table, assigning confidence.
//! - [`policy`]: evaluates detected licenses against an allow/deny/copyleft
//!   policy, producing violations and advisory warnings.
//!
//! All core operations are pure functions over immutable inputs plus
//! read-only statics; unrecognized licenses and policy breaches are result
//! data, not errors ([`error::EngineError`] covers only invalid input and
//! internal faults).
//!
//! The remaining modules are the CLI surface: input gathering, policy config
//! files, report rendering, and NOTICE generation.

pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod inputs;
pub mod models;
pub mod notice;
pub mod policy;
pub mod registry;
pub mod report;
