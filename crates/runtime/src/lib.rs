//! Runtime orchestration for matches.
//!
//! This crate wires the engine and the authored content into something an
//! embedding client can drive: a [`session::MatchSession`] that owns one
//! match, routes selection prompts to a [`Selector`], and traces every
//! declaration.
//!
//! [`Selector`]: hexmarch_core::Selector
pub mod logging;
pub mod select;
pub mod session;

pub use select::{AutoSelector, ScriptedSelector};
pub use session::MatchSession;
