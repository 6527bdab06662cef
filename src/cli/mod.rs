//! Terminal front end for the settlement table.
//!
//! - [`Args`] — process flags for the `settle` binary
//! - [`Shell`] — line-oriented session editor
//! - [`Command`] — one shell line
//! - [`Table`] — colored rendering of a roster
pub mod args;
pub mod command;
pub mod shell;
pub mod table;

pub use args::*;
pub use command::*;
pub use shell::*;
pub use table::*;
