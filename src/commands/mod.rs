//! CLI commands

pub mod index;
pub mod list;
pub mod show;
pub mod tags;
