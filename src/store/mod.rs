pub mod users;

use std::sync::Arc;
use tokio::sync::RwLock;

pub use users::UserStore;

/// Store handle type (Arc-wrapped for sharing across handlers)
pub type SharedStore = Arc<RwLock<UserStore>>;

/// Create an empty in-memory store
///
/// Records live for the lifetime of the process only.
pub fn open_store() -> SharedStore {
    tracing::info!("Initializing in-memory user store");
    Arc::new(RwLock::new(UserStore::new()))
}
