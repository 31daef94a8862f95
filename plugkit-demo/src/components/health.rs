use plugkit::define_component;

define_component! {
    /// Liveness probes. Ships no handler module.
    Health {
        identifier: "health",
        display_label: "Health checks",
    }
}
