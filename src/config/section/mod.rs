//! Configuration section definitions.
//!
//! Each module corresponds to a section in `pagepack.toml`:
//!
//! | Module   | TOML Section | Purpose                              |
//! |----------|--------------|--------------------------------------|
//! | `cache`  | `[cache]`    | Remote download cache directory      |
//! | `fetch`  | `[fetch]`    | External downloader command          |
//! | `output` | `[output]`   | Names of auxiliary output subdirs    |

mod cache;
mod fetch;
mod output;

pub use cache::CacheConfig;
pub use fetch::FetchConfig;
pub use output::OutputConfig;
