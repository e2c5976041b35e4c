use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Employee row. Created on first authenticated access from the verified
/// token claims; the engine treats it as an immutable input per call.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "oidc_user_id": "auth0|64f1c0de",
        "email": "jane.doe@company.com",
        "first_name": "Jane",
        "last_name": "Doe",
        "hire_date": "2024-01-15",
        "created_at": "2025-01-01T00:00:00Z"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i64,

    /// Subject claim from the external identity provider.
    #[schema(example = "auth0|64f1c0de")]
    pub oidc_user_id: String,

    #[schema(example = "jane.doe@company.com")]
    pub email: String,

    #[schema(example = "Jane")]
    pub first_name: String,

    #[schema(example = "Doe")]
    pub last_name: String,

    #[schema(example = "2024-01-15", value_type = String, format = "date")]
    pub hire_date: NaiveDate,

    #[schema(example = "2025-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: Option<DateTime<Utc>>,
}
