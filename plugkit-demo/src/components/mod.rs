pub mod health;
pub mod users;

pub use health::Health;
pub use users::{install_user_signals, Users};
