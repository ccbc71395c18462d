//! Jump to syntax nodes by typing short hint labels.
//!
//! The engine selects hintable leaves of a syntax tree inside the viewport
//! ([`search`]), labels them over a keyboard alphabet ([`label`], [`alphabet`]),
//! colors them ([`color`]) and resolves typed keys back to nodes ([`automaton`]).
//! [`navigator`] ties these together behind host traits for the editing surface.

pub mod alphabet;
pub mod automaton;
pub mod color;
pub mod config;
pub mod error;
pub mod label;
pub mod navigator;
pub mod search;
pub mod syntax;

pub use error::HintError;
pub use navigator::{EditorHost, KeyOutcome, Navigator};
pub use syntax::{Language, ParsedSource, SyntaxTree, TsSyntax};
