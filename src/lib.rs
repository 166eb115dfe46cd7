//! # Getting Started
//! Add the following to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! sunstats = "*"
//! ```
//!
//! ```rust,no_run
//! use sunstats::table::{self, Grid, Table};
//!
//! // Summarize the monthly sunshine of every city of the builtin table
//! let table = Table::sunshine();
//! let stats = table::rollup(&table.fold());
//! print!("{}", Grid::new(&stats, Some(2)));
//! ```

#[macro_use]
extern crate log;
#[macro_use]
extern crate derive_builder;

pub mod errors;
mod format;
pub mod plot;
pub mod random;
pub mod read;
pub mod scale;
pub mod stats;
pub mod table;
