//! Authored game content.
//!
//! This crate houses the static data of the standard game: the standard map
//! layout, the ability book, and the standard-ruleset passives. Content is
//! registered into the engine at match setup and is never mutated by it.

pub mod abilities;
pub mod maps;
pub mod ruleset;

pub use abilities::standard_abilities;
pub use maps::standard_layout;
pub use ruleset::{install_standard_ruleset, new_standard_match};
