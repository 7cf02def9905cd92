// SPDX-License-Identifier: MPL-2.0
//! Crate-level error type.
//!
//! Only the critical load path (gallery and category fetches) and the
//! configuration/fixture plumbing produce errors that reach the caller.
//! Collaborator failures during a viewer session are swallowed where they occur.

use crate::application::port::ServiceError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Fixture Error: {0}")]
    Fixture(String),

    #[error("Service Error: {0}")]
    Service(#[from] ServiceError),

    /// The viewer cannot open over an empty item collection.
    #[error("Gallery is empty")]
    EmptyGallery,
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
