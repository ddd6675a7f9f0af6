//! Command-line interface

mod app;
mod commands;

pub use app::run;
