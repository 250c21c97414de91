#![warn(missing_docs)]
//! Shared test surfaces: golden snapshots, fixtures, and change recording.

mod fixtures;
mod recorder;
mod snapshot;

pub use fixtures::*;
pub use recorder::*;
pub use snapshot::*;
