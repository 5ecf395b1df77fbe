//! Core types - pure abstractions shared across the codebase.

mod category;
mod error;
mod layout;
mod mode;

pub use category::Category;
pub use error::{BuildError, BuildResult};
pub use layout::Layout;
pub use mode::BuildMode;
