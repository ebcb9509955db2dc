#![doc = "PlanScore client public API"]
mod common;
pub mod bias;
pub mod client;
pub mod config;
pub mod display;
pub mod history;
pub mod io;
pub mod map;
pub mod plan;

#[doc(inline)]
pub use common::{state_code_to_name, state_name_to_code, write_output};

#[doc(inline)]
pub use config::SiteConfig;

#[doc(inline)]
pub use plan::{Chamber, District, Plan, ScoreSchema};

#[doc(inline)]
pub use client::{Fetch, LoadError, LoadedPlan, PollPage, load_plan};

#[doc(inline)]
pub use map::{DistrictGeometry, DistrictMap};

#[doc(inline)]
pub use history::ViewState;
