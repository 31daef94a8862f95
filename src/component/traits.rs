//! Component trait definition.

use snafu::prelude::*;

use crate::application::ReadyContext;
use crate::error::{HandlerInstallSnafu, Result};
use crate::signal::LoadOutcome;

/// Localization collaborator for display labels.
///
/// The registry never translates labels itself; hosts plug in whatever
/// translation machinery they have.
pub trait Localize {
    /// Translate a marked string for the current locale.
    fn translate(&self, text: &str) -> String;
}

/// Identity localizer for hosts without translation infrastructure.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocalize;

impl Localize for NoLocalize {
    fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}

/// A human-readable string marked as translatable.
///
/// Holds the untranslated text; resolution is deferred to the host's
/// [`Localize`] collaborator at display time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label(&'static str);

impl Label {
    /// Mark a string as translatable.
    pub const fn new(text: &'static str) -> Self {
        Self(text)
    }

    /// The untranslated text.
    pub fn text(&self) -> &'static str {
        self.0
    }

    /// Resolve the label through the localization collaborator.
    pub fn resolve(&self, localizer: &dyn Localize) -> String {
        localizer.translate(self.0)
    }
}

/// Immutable metadata identifying a component to the host registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    /// Stable key used by the host registry. Unique process-wide.
    pub identifier: &'static str,
    /// Human-readable label shown in administrative surfaces.
    pub display_label: Label,
}

impl Descriptor {
    /// Build a descriptor, marking the display label as translatable.
    pub const fn new(identifier: &'static str, display_label: &'static str) -> Self {
        Self {
            identifier,
            display_label: Label::new(display_label),
        }
    }

    /// Name of this component's optional handler module.
    pub fn signals_module(&self) -> String {
        format!("{}{}", self.identifier, crate::signal::SIGNALS_SUFFIX)
    }
}

/// The core Component trait for implementers.
pub trait Component: Send + Sync + 'static {
    /// The component's immutable descriptor. Two calls must return identical
    /// values.
    fn descriptor(&self) -> Descriptor;

    /// Called once by the registry after all components have registered,
    /// before the host begins serving.
    ///
    /// The default implementation attempts to load the component's optional
    /// handler module (`{identifier}.signals`). A missing module is the
    /// normal condition for components without signal handlers and is not an
    /// error; a module that is present but fails to install aborts startup.
    fn on_ready(&mut self, cx: &mut ReadyContext<'_>) -> Result<()> {
        let module = self.descriptor().signals_module();
        match cx.load_optional_module(&module) {
            LoadOutcome::Loaded(_) | LoadOutcome::NotFound => Ok(()),
            LoadOutcome::Failed { source } => Err(source).context(HandlerInstallSnafu { module }),
        }
    }
}

/// Define a stateless component from its identifier and display label.
///
/// Generates a unit struct and its `Component` impl; the display label is
/// marked as translatable. Components with state or custom ready behavior
/// implement `Component` by hand instead.
///
/// # Example
/// ```ignore
/// use plugkit::{define_component, Component};
///
/// define_component! {
///     /// Account management.
///     Users {
///         identifier: "users",
///         display_label: "Users",
///     }
/// }
///
/// assert_eq!(Users.descriptor().identifier, "users");
/// ```
#[macro_export]
macro_rules! define_component {
    (
        $(#[$meta:meta])*
        $name:ident {
            identifier: $identifier:literal,
            display_label: $label:literal $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl $name {
            /// Descriptor shared by every instance of this component.
            pub const DESCRIPTOR: $crate::Descriptor =
                $crate::Descriptor::new($identifier, $label);
        }

        impl $crate::Component for $name {
            fn descriptor(&self) -> $crate::Descriptor {
                Self::DESCRIPTOR
            }
        }
    };
}
