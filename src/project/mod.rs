//! Project model: the fixed source layout and the MSVC argument tables.
//!
//! - `layout`: derives the closed path table from the source root and the
//!   build directory
//! - `profile`: assembles the compiler and linker argument vectors over
//!   that table

pub mod layout;
pub mod profile;

pub use layout::ProjectLayout;
pub use profile::CompileJob;
