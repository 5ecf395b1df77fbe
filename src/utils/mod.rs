//! Utility modules shared by the resolver and the assembler.

pub mod exec;
pub mod hash;
pub mod path;
