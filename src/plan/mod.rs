mod chamber;
mod district;
mod headings;
#[allow(clippy::module_inception)]
mod plan;
mod schema;
mod values;

pub use chamber::*;
pub use district::*;
pub use headings::*;
pub use plan::*;
pub use schema::*;
pub use values::*;
