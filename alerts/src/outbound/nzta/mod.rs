//! NZTA road event feed adapter.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_NZTA_ENDPOINT, NztaHttpSource};
