mod fs;
mod geography;

pub use fs::*;
pub use geography::*;
