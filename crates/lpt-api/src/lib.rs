mod error;
pub use error::ApiError;

mod handler;
pub use handler::{ApiHandler, StatsView};

mod board;
pub use board::{CommandBoard, CommandReply, CommandStatus};

pub mod render;

mod adapter;
pub use adapter::CoreAdapter;

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::HttpApi;

#[cfg(feature = "http")]
pub use axum;
