//! Session ownership for the client: who is logged in, the bearer token that
//! proves it, and the durable mirror that survives process restarts.
//! Keep the public surface thin and split implementation across sub-modules.

mod user;
mod token_file;
mod store;

pub use user::{Role, User};
pub use token_file::{FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreError};
pub use store::{SessionState, SessionStore};
