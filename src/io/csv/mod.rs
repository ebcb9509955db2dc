//! CSV reading for the annual historical bias tables.

mod read;

pub use read::*;
