pub mod dashboard_service;
pub mod directory_service;
pub mod identity_service;
pub mod mail_service;
pub mod record_service;
pub mod session_service;
pub mod sharing_service;

pub use dashboard_service::*;
pub use mail_service::*;
pub use sharing_service::*;
