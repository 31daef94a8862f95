//! Component registration and lifecycle wiring for pluggable applications.
//!
//! A host declares named, labeled components, then runs a single ready phase
//! during which each component may load an optional signal-handler module.

pub mod application;
pub mod component;
pub mod error;
pub mod registry;
pub mod signal;

pub use error::{Error, Result};

// Re-export common types for convenience
pub use application::{AppContext, Application, Bootstrap, ReadyContext};
pub use component::{
    Component,
    traits::{Descriptor, Label, Localize, NoLocalize},
};
pub use registry::ComponentRegistry;
pub use signal::{
    Dispatcher, HandlerInstaller, LoadOutcome, ModuleHandle, ModuleSource, SignalHub,
};
