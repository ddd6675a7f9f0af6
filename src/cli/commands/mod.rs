//! Command implementations

mod analyze;
mod files;

pub use analyze::analyze;
pub use files::files;
