//! Signal plumbing: the event-dispatch collaborator and the optional
//! handler-module convention.
//!
//! Components never talk to the dispatcher directly. During the ready phase
//! the host attempts to load a conventionally named handler module
//! (`{identifier}.signals`); if one is provided, its installer connects
//! handlers to the [`SignalHub`] as a side effect of being loaded. A missing
//! module is a normal condition, distinct from a module that is present but
//! broken.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Fixed suffix appended to a component identifier to derive the name of its
/// optional handler module.
pub const SIGNALS_SUFFIX: &str = ".signals";

/// A handler connected to a named signal. Receives the emitted payload.
pub type SignalHandler = Box<dyn Fn(&str) + Send + Sync>;

/// Event-dispatch collaborator.
///
/// The dispatch mechanism itself is external to the registration lifecycle;
/// handler modules only need somewhere to hang their handlers.
pub trait SignalHub {
    /// Connect a handler to the named signal.
    fn connect(&mut self, signal: &str, handler: SignalHandler);
}

/// In-memory [`SignalHub`] with synchronous fan-out.
#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<String, Vec<SignalHandler>>,
}

impl Dispatcher {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Emit a signal to every connected handler, in connection order.
    pub fn emit(&self, signal: &str, payload: &str) {
        if let Some(handlers) = self.handlers.get(signal) {
            for handler in handlers {
                handler(payload);
            }
        }
    }

    /// Number of handlers connected to the named signal.
    pub fn handler_count(&self, signal: &str) -> usize {
        self.handlers.get(signal).map_or(0, Vec::len)
    }
}

impl SignalHub for Dispatcher {
    fn connect(&mut self, signal: &str, handler: SignalHandler) {
        self.handlers
            .entry(signal.to_string())
            .or_default()
            .push(handler);
    }
}

/// Result of attempting to load an optional handler module.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The module exists and its installer ran to completion.
    Loaded(ModuleHandle),
    /// No module is provided under the requested name. This is the normal
    /// condition for components without signal handlers.
    NotFound,
    /// The module exists but its installer failed.
    Failed { source: Error },
}

/// Handle to a successfully loaded handler module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleHandle {
    name: String,
}

impl ModuleHandle {
    /// Name the module was loaded under.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Installer run when a handler module is loaded. Connecting handlers to the
/// hub is the module's load-time side effect.
pub type HandlerInstaller = Box<dyn Fn(&mut dyn SignalHub) -> Result<()> + Send + Sync>;

/// Named table of optional handler modules.
///
/// Stands in for the host's module-loading mechanism: [`ModuleSource::load`]
/// distinguishes "no such module" from "module present but broken".
#[derive(Default)]
pub struct ModuleSource {
    modules: HashMap<String, HandlerInstaller>,
}

impl ModuleSource {
    /// Create an empty module table.
    pub fn new() -> Self {
        Self {
            modules: HashMap::new(),
        }
    }

    /// Provide a handler module under the given name.
    pub fn provide(&mut self, name: impl Into<String>, installer: HandlerInstaller) {
        self.modules.insert(name.into(), installer);
    }

    /// Whether a module is provided under the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Attempt to load the named module, running its installer against `hub`.
    pub fn load(&self, name: &str, hub: &mut dyn SignalHub) -> LoadOutcome {
        match self.modules.get(name) {
            None => LoadOutcome::NotFound,
            Some(installer) => match installer(hub) {
                Ok(()) => LoadOutcome::Loaded(ModuleHandle {
                    name: name.to_string(),
                }),
                Err(source) => LoadOutcome::Failed { source },
            },
        }
    }
}
