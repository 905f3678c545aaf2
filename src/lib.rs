#![forbid(unsafe_code)]
//! foldertree: build folder structures from tree text, and tree text from folders.

pub mod cli;
pub mod error;
pub mod grammar;
pub mod ignore;
pub mod logging;
pub mod materialize;
pub mod parse;
pub mod structure;
pub mod tree;

pub use error::{Error, Result};
