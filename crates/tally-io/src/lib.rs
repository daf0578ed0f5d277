//! tally-io - Sample files for tally
//!
//! Samples are stored as plain text: pairs of real numbers separated by
//! whitespace, conventionally one `primary secondary` pair per line.
//!
//! - **loader**: parse pairs until EOF or the first unparsable token
//! - **writer**: write pairs back out, one per line
//! - **generator**: deterministic normal samples for benchmarks and demos

pub mod error;
pub mod generator;
pub mod loader;
pub mod sample;
pub mod writer;

pub use error::*;
pub use generator::*;
pub use loader::*;
pub use sample::*;
pub use writer::*;
