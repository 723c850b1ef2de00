// User domain module
// Accounts, memberships and subscriptions

#![allow(clippy::module_inception)]

pub mod user;
pub mod value_objects;

pub use user::{PublicUser, User};
pub use value_objects::Email;
