//! JWT claim structures.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims of a credential token. The token binds only the user id; role and
/// profile data are looked up by whoever consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}
