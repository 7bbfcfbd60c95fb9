//! User domain module.
//!
//! Users are immutable for the lifetime of the inbox; the current user is the
//! support agent operating the inbox, every other user is a customer.

mod model;

pub use model::{CURRENT_USER_ID, User};
