#![forbid(unsafe_code)]

//! Scenario harness for `fcarousel-core`.
//!
//! Scripted scenarios (TOML or JSON) drive a [`fcarousel_core::Carousel`]
//! through a virtual clock and a manual frame scheduler. Every step and every
//! delivered frame is captured as a [`trace::FrameRecord`]; the JSONL
//! rendering of a trace is stable across machines and is identified by its
//! BLAKE3 hash, which makes recorded traces usable as golden files.
//!
//! # Example
//!
//! ```
//! use fcarousel_harness::{Scenario, run_scenario};
//!
//! let scenario = Scenario::from_toml_str(r#"
//! name = "two"
//! container = { width = 200.0, height = 100.0 }
//! cells = [{ width = 100.0, height = 100.0 }, { width = 100.0, height = 100.0 }]
//!
//! [[steps]]
//! op = "next"
//!
//! [[steps]]
//! op = "settle"
//! "#).unwrap();
//!
//! let trace = run_scenario(&scenario).unwrap();
//! assert_eq!(trace.last().map(|r| r.selected), Some(1));
//! assert!(trace.hash().unwrap().starts_with("blake3:"));
//! ```

pub mod cli;
pub mod error;
pub mod runner;
pub mod scenario;
pub mod trace;

pub use cli::{Cli, Commands, run, run_from_env};
pub use error::{HarnessError, Result};
pub use runner::{Runner, run_scenario};
pub use scenario::{CellSpec, Scenario, Step};
pub use trace::{FrameRecord, Trace};
