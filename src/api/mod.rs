pub mod auth;
pub mod dashboard;
pub mod health;
pub mod history;
pub mod setup;
pub mod share;
pub mod shared;
pub mod swagger;
