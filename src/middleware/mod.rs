pub mod auth;

pub use auth::{session_user, SessionAuth};
