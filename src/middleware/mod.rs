pub mod auth;
pub mod response;

pub use auth::{require_admin_key, ADMIN_KEY_HEADER};
pub use response::{ApiResponse, ApiResult};
