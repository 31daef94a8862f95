//! High-level application host wrapping the two-phase initialization
//! protocol around a tokio runtime.

use std::sync::{Arc, Mutex};

use tokio::runtime::Runtime;
use tracing::info;

use crate::component::Component;
use crate::registry::ComponentRegistry;
use crate::signal::{Dispatcher, HandlerInstaller, LoadOutcome, ModuleSource, SignalHub};

/// Context passed to component ready hooks.
pub struct ReadyContext<'a> {
    modules: &'a ModuleSource,
    hub: &'a mut dyn SignalHub,
}

impl<'a> ReadyContext<'a> {
    /// Build a ready context over the host's module table and signal hub.
    pub fn new(modules: &'a ModuleSource, hub: &'a mut dyn SignalHub) -> Self {
        Self { modules, hub }
    }

    /// Attempt to load an optional handler module by name.
    ///
    /// The outcome distinguishes a module that is absent from one that is
    /// present but failed to install.
    pub fn load_optional_module(&mut self, name: &str) -> LoadOutcome {
        self.modules.load(name, &mut *self.hub)
    }
}

/// Mutable view of the host handed to the setup closure.
///
/// Components and handler modules are declared here, before the ready phase
/// runs.
pub struct Bootstrap {
    registry: ComponentRegistry,
    modules: ModuleSource,
    dispatcher: Dispatcher,
}

impl Bootstrap {
    fn new() -> Self {
        Self {
            registry: ComponentRegistry::new(),
            modules: ModuleSource::new(),
            dispatcher: Dispatcher::new(),
        }
    }

    /// Register a component with the host registry.
    pub fn register<C: Component>(&mut self, component: C) -> crate::Result<()> {
        self.registry.register(component)
    }

    /// Provide an optional handler module under the given name.
    pub fn provide_module(&mut self, name: impl Into<String>, installer: HandlerInstaller) {
        self.modules.provide(name, installer);
    }
}

/// Shared host view available once the ready phase has completed.
#[derive(Clone)]
pub struct AppContext {
    registry: Arc<ComponentRegistry>,
    dispatcher: Arc<Dispatcher>,
}

impl AppContext {
    /// Look up a registered component by identifier.
    pub fn component(&self, identifier: &str) -> Option<Arc<Mutex<dyn Component>>> {
        self.registry.get(identifier)
    }

    /// Access the component registry.
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Emit a signal through the host dispatcher.
    pub fn emit(&self, signal: &str, payload: &str) {
        self.dispatcher.emit(signal, payload);
    }
}

/// Main application handle.
pub struct Application;

impl Application {
    /// Create a new application instance.
    pub fn new() -> Self {
        Self
    }

    /// Run the application.
    ///
    /// The setup closure registers components and handler modules, the ready
    /// phase runs to completion, then the serve future is driven on the
    /// runtime. Any ready-phase failure aborts startup before serving.
    pub fn run<F, S, Fut>(self, setup: F, serve: S) -> anyhow::Result<()>
    where
        F: FnOnce(&mut Bootstrap) -> anyhow::Result<()>,
        S: FnOnce(AppContext) -> Fut,
        Fut: std::future::Future<Output = anyhow::Result<()>>,
    {
        let rt = Runtime::new().map_err(|e| anyhow::anyhow!("Failed to start tokio: {}", e))?;

        let mut bootstrap = Bootstrap::new();
        let _guard = rt.enter();
        setup(&mut bootstrap)?;
        drop(_guard);

        let Bootstrap {
            mut registry,
            modules,
            mut dispatcher,
        } = bootstrap;
        registry.ready(&modules, &mut dispatcher)?;
        info!(components = registry.len(), "host ready, serving");

        let cx = AppContext {
            registry: Arc::new(registry),
            dispatcher: Arc::new(dispatcher),
        };

        rt.block_on(serve(cx))
    }
}
