//! Event types and observers.
//!
//! This module groups the events exchanged across systems and the
//! corresponding observers that react to them. Events provide a decoupled
//! way for systems to communicate without direct dependencies.
//!
//! Submodules:
//! - [`input`] – locomotion action presses/releases forwarded to controllers
//! - [`reloadconfig`] – re-read the INI file at runtime
//! - [`switchdebug`] – toggle debug rendering and diagnostics on/off
//!
//! See each submodule for concrete event data, semantics, and example usage.
pub mod input;
pub mod reloadconfig;
pub mod switchdebug;
