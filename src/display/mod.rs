//! Everything rendered from a scored plan: district tables, colors, seat
//! shares, metric cards and supporting text.

mod color;
mod columns;
mod format;
mod library;
mod metrics;
mod races;
mod seatshare;
mod table;

pub use color::*;
pub use columns::*;
pub use format::*;
pub use library::*;
pub use metrics::*;
pub use races::*;
pub use seatshare::*;
pub use table::*;
