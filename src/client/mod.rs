//! Talking to the scoring service: fetching, polling and uploading.

pub(crate) mod fetch;
mod poll;
mod upload;

pub use fetch::*;
pub use poll::*;
pub use upload::*;
