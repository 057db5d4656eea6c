//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod feed_source;
mod key_value_store;

pub use feed_source::{FeedSource, FeedSourceError};
#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
pub use key_value_store::{
    KeyValueStore, KeyValueStoreError, REPORTS_KEY, SESSION_KEY, SUBSCRIPTIONS_KEY, is_valid_key,
};
