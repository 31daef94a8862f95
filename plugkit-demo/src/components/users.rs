use plugkit::{define_component, Result, SignalHub};
use tracing::info;

define_component! {
    /// Account management component.
    Users {
        identifier: "users",
        display_label: "Users",
    }
}

/// Handler module for the users component.
///
/// Loading it connects the account lifecycle handlers to the host
/// dispatcher; this is the module's only side effect.
pub fn install_user_signals(hub: &mut dyn SignalHub) -> Result<()> {
    hub.connect(
        "user_registered",
        Box::new(|user| {
            info!(user, "welcome mail queued");
        }),
    );
    hub.connect(
        "user_deactivated",
        Box::new(|user| {
            info!(user, "sessions revoked");
        }),
    );
    Ok(())
}
