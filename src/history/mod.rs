//! Historical partisan bias of enacted plans, by state, year and chamber.

mod choropleth;
mod view;

pub use choropleth::*;
pub use view::*;
