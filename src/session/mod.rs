/// Session handling
///
/// - Persistent token storage (store.rs)
/// - Claim decoding (token.rs)
/// - Route guarding (guard.rs)

pub mod guard;
pub mod store;
pub mod token;

pub use guard::{decide, Decision, Route};
pub use store::{Session, SessionStore};
pub use token::Role;
