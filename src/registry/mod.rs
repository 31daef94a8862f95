//! Host-side component registry.
//!
//! Owns every registered component and drives the two-phase initialization
//! protocol: components first register their descriptors, then the ready
//! phase runs each component's `on_ready` hook exactly once, in registration
//! order, before the host begins serving.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use snafu::prelude::*;
use tracing::debug;

use crate::application::ReadyContext;
use crate::component::Component;
use crate::component::traits::Descriptor;
use crate::error::{
    DuplicateIdentifierSnafu, EmptyIdentifierSnafu, Error, RegistrationClosedSnafu, Result,
};
use crate::signal::{ModuleSource, SignalHub};

/// Initialization phase of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Registering,
    Ready,
}

struct Entry {
    descriptor: Descriptor,
    component: Arc<Mutex<dyn Component>>,
}

/// Registry of application components, keyed by identifier.
pub struct ComponentRegistry {
    entries: Vec<Entry>,
    index: HashMap<&'static str, usize>,
    phase: Phase,
}

impl ComponentRegistry {
    /// Create an empty registry, open for registration.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            phase: Phase::Registering,
        }
    }

    /// Register a component with the host.
    ///
    /// Fails on an empty or duplicate identifier, or once the ready phase
    /// has run.
    pub fn register<C: Component>(&mut self, component: C) -> Result<()> {
        self.register_shared(Arc::new(Mutex::new(component)))
    }

    /// Register an already-shared component handle.
    pub fn register_shared(&mut self, component: Arc<Mutex<dyn Component>>) -> Result<()> {
        ensure!(self.phase == Phase::Registering, RegistrationClosedSnafu);

        let descriptor = {
            let guard = component.lock().map_err(|_| Error::LockPoisoned)?;
            guard.descriptor()
        };
        ensure!(!descriptor.identifier.is_empty(), EmptyIdentifierSnafu);
        ensure!(
            !self.index.contains_key(descriptor.identifier),
            DuplicateIdentifierSnafu {
                identifier: descriptor.identifier,
            }
        );

        debug!(identifier = descriptor.identifier, "registered component");
        self.index.insert(descriptor.identifier, self.entries.len());
        self.entries.push(Entry {
            descriptor,
            component,
        });
        Ok(())
    }

    /// Run the ready phase: each component's `on_ready` hook, in
    /// registration order.
    ///
    /// Hooks run at most once process-wide, even if a failed ready phase is
    /// retried; calling this again after the phase has completed is a no-op.
    pub fn ready(&mut self, modules: &ModuleSource, hub: &mut dyn SignalHub) -> Result<()> {
        if self.phase == Phase::Ready {
            return Ok(());
        }
        self.phase = Phase::Ready;

        for entry in &self.entries {
            let mut cx = ReadyContext::new(modules, &mut *hub);
            let mut guard = entry.component.lock().map_err(|_| Error::LockPoisoned)?;
            guard.on_ready(&mut cx)?;
            debug!(identifier = entry.descriptor.identifier, "component ready");
        }
        debug!(components = self.entries.len(), "ready phase complete");
        Ok(())
    }

    /// Whether the ready phase has run.
    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// Look up a component by identifier.
    pub fn get(&self, identifier: &str) -> Option<Arc<Mutex<dyn Component>>> {
        self.index
            .get(identifier)
            .map(|&i| Arc::clone(&self.entries[i].component))
    }

    /// Look up a component's descriptor by identifier.
    pub fn descriptor_of(&self, identifier: &str) -> Option<Descriptor> {
        self.index.get(identifier).map(|&i| self.entries[i].descriptor)
    }

    /// Whether a component is registered under the given identifier.
    pub fn contains(&self, identifier: &str) -> bool {
        self.index.contains_key(identifier)
    }

    /// Registered identifiers, in registration order.
    pub fn identifiers(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.descriptor.identifier).collect()
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandlerSnafu;
    use crate::signal::Dispatcher;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        identifier: &'static str,
    }

    impl Component for Fixed {
        fn descriptor(&self) -> Descriptor {
            Descriptor::new(self.identifier, "Fixed")
        }
    }

    struct Recording {
        identifier: &'static str,
        order: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Component for Recording {
        fn descriptor(&self) -> Descriptor {
            Descriptor::new(self.identifier, "Recording")
        }

        fn on_ready(&mut self, _cx: &mut ReadyContext<'_>) -> Result<()> {
            self.order.lock().unwrap().push(self.identifier);
            Ok(())
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ComponentRegistry::new();
        registry.register(Fixed { identifier: "users" }).unwrap();
        registry.register(Fixed { identifier: "health" }).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("users"));
        assert!(registry.get("users").is_some());
        assert!(registry.get("billing").is_none());
        assert_eq!(registry.identifiers(), vec!["users", "health"]);
        assert_eq!(
            registry.descriptor_of("health").unwrap().display_label.text(),
            "Fixed"
        );
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let mut registry = ComponentRegistry::new();
        registry.register(Fixed { identifier: "users" }).unwrap();

        match registry.register(Fixed { identifier: "users" }) {
            Err(Error::DuplicateIdentifier { identifier }) => assert_eq!(identifier, "users"),
            other => panic!("expected DuplicateIdentifier, got {other:?}"),
        }
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_empty_identifier_rejected() {
        let mut registry = ComponentRegistry::new();
        assert!(matches!(
            registry.register(Fixed { identifier: "" }),
            Err(Error::EmptyIdentifier)
        ));
    }

    #[test]
    fn test_ready_runs_hooks_in_registration_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ComponentRegistry::new();
        registry
            .register(Recording {
                identifier: "users",
                order: Arc::clone(&order),
            })
            .unwrap();
        registry
            .register(Recording {
                identifier: "health",
                order: Arc::clone(&order),
            })
            .unwrap();

        let modules = ModuleSource::new();
        let mut hub = Dispatcher::new();
        registry.ready(&modules, &mut hub).unwrap();

        assert!(registry.is_ready());
        assert_eq!(*order.lock().unwrap(), vec!["users", "health"]);
    }

    #[test]
    fn test_ready_twice_is_noop() {
        let mut registry = ComponentRegistry::new();
        registry.register(Fixed { identifier: "users" }).unwrap();

        let installs = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&installs);
        let mut modules = ModuleSource::new();
        modules.provide(
            "users.signals",
            Box::new(move |hub| {
                seen.fetch_add(1, Ordering::SeqCst);
                hub.connect("user_registered", Box::new(|_| {}));
                Ok(())
            }),
        );
        let mut hub = Dispatcher::new();

        registry.ready(&modules, &mut hub).unwrap();
        registry.ready(&modules, &mut hub).unwrap();

        assert_eq!(installs.load(Ordering::SeqCst), 1);
        assert_eq!(hub.handler_count("user_registered"), 1);
    }

    #[test]
    fn test_ready_ignores_missing_module() {
        let mut registry = ComponentRegistry::new();
        registry.register(Fixed { identifier: "users" }).unwrap();

        let modules = ModuleSource::new();
        let mut hub = Dispatcher::new();
        assert!(registry.ready(&modules, &mut hub).is_ok());
        assert_eq!(hub.handler_count("user_registered"), 0);
    }

    #[test]
    fn test_broken_module_aborts_ready() {
        let mut registry = ComponentRegistry::new();
        registry.register(Fixed { identifier: "users" }).unwrap();

        let mut modules = ModuleSource::new();
        modules.provide(
            "users.signals",
            Box::new(|_| HandlerSnafu { message: "boom" }.fail()),
        );
        let mut hub = Dispatcher::new();

        assert!(matches!(
            registry.ready(&modules, &mut hub),
            Err(Error::HandlerInstall { .. })
        ));
    }

    #[test]
    fn test_register_after_ready_rejected() {
        let mut registry = ComponentRegistry::new();
        registry.register(Fixed { identifier: "users" }).unwrap();

        let modules = ModuleSource::new();
        let mut hub = Dispatcher::new();
        registry.ready(&modules, &mut hub).unwrap();

        assert!(matches!(
            registry.register(Fixed { identifier: "health" }),
            Err(Error::RegistrationClosed)
        ));
    }
}
