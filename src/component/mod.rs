//! Component module.
//!
//! Defines the `Component` trait, its descriptor metadata, and the
//! `define_component!` macro.

pub mod traits;

pub use traits::{Component, Descriptor, Label, Localize, NoLocalize};
