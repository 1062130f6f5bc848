//! Core library for the xlsx-roster command line application.
//!
//! The library extracts identity records (accounts and their group
//! memberships or merged multi-valued attributes) from tabular spreadsheet
//! exports. The modules are structured to keep responsibilities narrow and
//! composable: the spreadsheet adapter lives under [`io`], record
//! representations inside [`model`], column-role resolution in [`columns`],
//! the row-aggregation engine in [`extract`], and the pass orchestration
//! under [`feed`].

pub mod columns;
pub mod config;
pub mod error;
pub mod extract;
pub mod feed;
pub mod io;
pub mod model;
pub mod source;

pub use error::{Result, RosterError};
pub use model::Account;
