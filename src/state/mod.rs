//! Application state module

mod app_state;
mod catalog;
mod submission;
mod validation;
mod wizard;

pub use app_state::*;
pub use catalog::*;
pub use submission::*;
pub use validation::*;
pub use wizard::*;
