pub mod data;
mod error;
pub mod log;
pub mod midware;
pub mod routes;
mod serve;

pub use error::{ClientError, Error, WebResult};
pub use serve::serve;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
