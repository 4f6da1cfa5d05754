use thiserror::Error;

use crate::Server;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unsupported server: {0} (expected one of {codes})", codes = Server::codes())]
    UnsupportedServer(String),
    #[error("missing option: {0}")]
    MissingOption(&'static str),
    #[error("option '{0}' cannot be empty")]
    EmptyOption(&'static str),
}
