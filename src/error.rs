use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to lock mutex: poisoned"))]
    LockPoisoned,

    #[snafu(display("Component identifier must not be empty"))]
    EmptyIdentifier,

    #[snafu(display("Component '{identifier}' is already registered"))]
    DuplicateIdentifier { identifier: String },

    #[snafu(display("Registration is closed: the ready phase has already run"))]
    RegistrationClosed,

    #[snafu(display("Signal handler setup failed: {message}"))]
    Handler { message: String },

    #[snafu(display("Handler module '{module}' failed to install: {source}"))]
    HandlerInstall {
        module: String,
        #[snafu(source(from(Error, Box::new)))]
        source: Box<Error>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
