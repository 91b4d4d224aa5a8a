pub mod account;
pub mod record;
pub mod session;

pub use account::*;
pub use record::*;
pub use session::*;
