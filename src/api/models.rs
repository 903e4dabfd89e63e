use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::StokvelError;
use crate::core::models::group::{MemberProfile, Role};

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "100.00")]
    pub contribution_amount: Decimal,
    pub monthly_due_day: Option<u32>,
    pub creator: MemberProfile,
}

#[derive(Deserialize, ToSchema)]
pub struct JoinGroupRequest {
    pub join_code: String,
    pub member: MemberProfile,
}

#[derive(Deserialize, ToSchema)]
pub struct AddMemberRequest {
    pub member: MemberProfile,
    /// Defaults to plain member when omitted.
    pub role: Option<Role>,
    pub added_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct RemoveMemberRequest {
    pub uid: String,
    pub removed_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SetRoleRequest {
    pub uid: String,
    pub role: Role,
    pub changed_by_id: String,
}

#[derive(Serialize, ToSchema)]
pub struct SetRoleResponse {
    pub prior_role: Role,
}

#[derive(Deserialize, ToSchema)]
pub struct TransferAdminRequest {
    pub new_admin_id: String,
    pub transferred_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ArchiveGroupRequest {
    pub archived_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct RecordContributionRequest {
    pub group_id: String,
    pub member_uid: String,
    #[schema(value_type = String, example = "100.00")]
    pub amount: Decimal,
    pub note: Option<String>,
    pub recorded_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct VoidContributionRequest {
    pub group_id: String,
    pub entry_id: String,
    pub voided_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct TriggerPayoutRequest {
    pub triggered_by_id: String,
}

#[derive(Deserialize)]
pub struct MonthlyStatusQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub queried_by: String,
}

#[derive(Deserialize)]
pub struct LedgerQuery {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub queried_by: String,
}

#[derive(Deserialize)]
pub struct ReconcileQuery {
    pub queried_by: String,
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for StokvelError to implement IntoResponse
pub struct ApiError(pub StokvelError);

impl From<StokvelError> for ApiError {
    fn from(err: StokvelError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            StokvelError::InvalidAmount | StokvelError::InvalidInput(_, _) => StatusCode::BAD_REQUEST,
            StokvelError::GroupNotFound(_)
            | StokvelError::MemberNotFound(_)
            | StokvelError::EntryNotFound(_)
            | StokvelError::JoinCodeNotFound => StatusCode::NOT_FOUND,
            StokvelError::NotAuthorized(_) => StatusCode::FORBIDDEN,
            StokvelError::DuplicateMember(_)
            | StokvelError::AlreadyVoided(_)
            | StokvelError::ConcurrentModification
            | StokvelError::GroupArchived(_) => StatusCode::CONFLICT,
            StokvelError::EmptySchedule | StokvelError::InsufficientFunds { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            StokvelError::InternalServerError(_)
            | StokvelError::StorageError(_)
            | StokvelError::LoggingError(_)
            | StokvelError::CacheError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
