//! Path utilities.
//!
//! Pure functions for path manipulation. No side effects beyond metadata lookups.
//!
//! - [`fs`]: Filesystem path normalization (`absolutize`, `weakly_canonical`)
//! - [`relative`]: Relative links between generated files (`relative_link`)

pub mod fs;
pub mod relative;

pub use fs::absolutize;
pub use relative::relative_link;
