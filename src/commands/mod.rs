//! CLI subcommands

pub mod highlight;
pub mod list;
pub mod render;
