pub mod auth;
pub mod error;

pub use auth::{require_admin_key, AppState, ADMIN_KEY_HEADER};
pub use error::{ApiError, ApiResult};
