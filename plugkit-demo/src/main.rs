//! Example host application wiring components through the plugkit registry.

mod components;

use plugkit::Application;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::components::{Health, Users};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plugkit=debug,plugkit_demo=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = Application::new();

    app.run(
        |boot| {
            boot.register(Users)?;
            boot.register(Health)?;
            // Health ships no handler module; its ready hook falls through.
            boot.provide_module(
                Users::DESCRIPTOR.signals_module(),
                Box::new(components::install_user_signals),
            );
            Ok(())
        },
        |cx| async move {
            info!("emitting demo signals");
            cx.emit("user_registered", "alice");
            cx.emit("user_deactivated", "bob");
            Ok(())
        },
    )
}
