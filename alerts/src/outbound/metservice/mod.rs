//! MetService weather warning feed adapter.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_METSERVICE_ENDPOINT, MetServiceHttpSource};
