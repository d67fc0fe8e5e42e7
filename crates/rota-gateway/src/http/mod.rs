pub mod auth;
pub mod health;
pub mod shifts;

use serde::Serialize;

/// Error payload shared by every route.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}
