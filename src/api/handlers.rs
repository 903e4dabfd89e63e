use crate::{
    api::models::*,
    core::{
        models::{
            audit::{AppLog, GroupAudit},
            group::{Group, Member, Role},
            ledger::{LedgerEntry, MonthlyStatusResponse, ReconcileReport},
        },
        services::StokvelService,
    },
    infrastructure::{
        cache::in_memory::InMemoryCache, logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage,
    },
};
use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::IntoResponse,
};
use http::header;

use std::sync::Arc;

type AppService = Arc<StokvelService<InMemoryLogging, InMemoryStorage, InMemoryCache>>;

/// Middleware validating identity-provider bearer tokens. The verified
/// claims are attached to the request for handlers that need the actor uid.
pub(crate) async fn auth_middleware(
    State(service): State<AppService>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| crate::StokvelError::NotAuthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| crate::StokvelError::NotAuthorized("Invalid Authorization header".to_string()))?;

    let claims = service.validate_token(token)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

// Define API routes
pub fn api_routes(service: AppService) -> Router {
    Router::new()
        .route("/groups", axum::routing::post(create_group))
        .route("/groups/join", axum::routing::post(join_group))
        .route("/groups/{group_id}", axum::routing::get(get_group))
        .route("/users/{uid}/groups", axum::routing::get(member_groups))
        .route("/groups/{group_id}/members", axum::routing::post(add_member))
        .route("/groups/{group_id}/members/remove", axum::routing::post(remove_member))
        .route("/groups/{group_id}/members/role", axum::routing::post(set_role))
        .route("/groups/{group_id}/admin/transfer", axum::routing::post(transfer_admin))
        .route("/groups/{group_id}/archive", axum::routing::post(archive_group))
        .route("/contributions", axum::routing::post(record_contribution))
        .route("/contributions/void", axum::routing::post(void_contribution))
        .route("/groups/{group_id}/status/monthly", axum::routing::get(monthly_status))
        .route("/groups/{group_id}/recipient", axum::routing::get(current_recipient))
        .route("/groups/{group_id}/payout", axum::routing::post(trigger_payout))
        .route("/groups/{group_id}/ledger", axum::routing::get(export_ledger))
        .route("/groups/{group_id}/reconcile", axum::routing::get(reconcile))
        .route("/groups/{group_id}/audits", axum::routing::get(group_audits))
        .route("/logs", axum::routing::get(app_logs))
        .route_layer(middleware::from_fn_with_state(service.clone(), auth_middleware))
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/api/groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 201, description = "Group created", body = Group),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn create_group(
    State(service): State<AppService>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), ApiError> {
    let group = service
        .create_group(
            req.name,
            req.description.unwrap_or_default(),
            req.contribution_amount,
            req.monthly_due_day,
            req.creator,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(group)))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}",
    params(("group_id" = String, Path, description = "Group to fetch")),
    responses(
        (status = 200, description = "Group snapshot", body = Group),
        (status = 404, description = "Group not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn get_group(State(service): State<AppService>, Path(group_id): Path<String>) -> Result<Json<Group>, ApiError> {
    Ok(Json(service.group_snapshot(&group_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/users/{uid}/groups",
    params(("uid" = String, Path, description = "Member uid")),
    responses((status = 200, description = "Groups the member belongs to", body = [Group])),
    security(("Bearer" = []))
)]
pub(crate) async fn member_groups(State(service): State<AppService>, Path(uid): Path<String>) -> Result<Json<Vec<Group>>, ApiError> {
    Ok(Json(service.member_groups(&uid).await?))
}

#[utoipa::path(
    post,
    path = "/api/groups/join",
    request_body = JoinGroupRequest,
    responses(
        (status = 200, description = "Joined group", body = Group),
        (status = 404, description = "Join code not found", body = ErrorResponse),
        (status = 409, description = "Already a member", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn join_group(State(service): State<AppService>, Json(req): Json<JoinGroupRequest>) -> Result<Json<Group>, ApiError> {
    Ok(Json(service.join_group(&req.join_code, req.member).await?))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/members",
    params(("group_id" = String, Path, description = "Group to modify")),
    request_body = AddMemberRequest,
    responses(
        (status = 200, description = "Member added", body = Group),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 409, description = "Already a member", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn add_member(
    State(service): State<AppService>,
    Path(group_id): Path<String>,
    Json(req): Json<AddMemberRequest>,
) -> Result<Json<Group>, ApiError> {
    let role = req.role.unwrap_or(Role::Member);
    Ok(Json(service.add_member(&group_id, req.member, role, &req.added_by_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/members/remove",
    params(("group_id" = String, Path, description = "Group to modify")),
    request_body = RemoveMemberRequest,
    responses(
        (status = 200, description = "Member removed", body = Group),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Member not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn remove_member(
    State(service): State<AppService>,
    Path(group_id): Path<String>,
    Json(req): Json<RemoveMemberRequest>,
) -> Result<Json<Group>, ApiError> {
    Ok(Json(service.remove_member(&group_id, &req.uid, &req.removed_by_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/members/role",
    params(("group_id" = String, Path, description = "Group to modify")),
    request_body = SetRoleRequest,
    responses(
        (status = 200, description = "Role updated, prior role returned", body = SetRoleResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Member not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn set_role(
    State(service): State<AppService>,
    Path(group_id): Path<String>,
    Json(req): Json<SetRoleRequest>,
) -> Result<Json<SetRoleResponse>, ApiError> {
    let prior_role = service.set_role(&group_id, &req.uid, req.role, &req.changed_by_id).await?;
    Ok(Json(SetRoleResponse { prior_role }))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/admin/transfer",
    params(("group_id" = String, Path, description = "Group to modify")),
    request_body = TransferAdminRequest,
    responses(
        (status = 200, description = "Admin transferred", body = Group),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Member not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn transfer_admin(
    State(service): State<AppService>,
    Path(group_id): Path<String>,
    Json(req): Json<TransferAdminRequest>,
) -> Result<Json<Group>, ApiError> {
    Ok(Json(
        service
            .transfer_admin(&group_id, &req.transferred_by_id, &req.new_admin_id)
            .await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/archive",
    params(("group_id" = String, Path, description = "Group to archive")),
    request_body = ArchiveGroupRequest,
    responses(
        (status = 200, description = "Group archived", body = Group),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn archive_group(
    State(service): State<AppService>,
    Path(group_id): Path<String>,
    Json(req): Json<ArchiveGroupRequest>,
) -> Result<Json<Group>, ApiError> {
    Ok(Json(service.archive_group(&group_id, &req.archived_by_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/contributions",
    request_body = RecordContributionRequest,
    responses(
        (status = 201, description = "Contribution recorded", body = LedgerEntry),
        (status = 400, description = "Invalid amount", body = ErrorResponse),
        (status = 404, description = "Member not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn record_contribution(
    State(service): State<AppService>,
    Json(req): Json<RecordContributionRequest>,
) -> Result<(StatusCode, Json<LedgerEntry>), ApiError> {
    let (entry, _group) = service
        .record_contribution(&req.group_id, &req.member_uid, req.amount, req.note, &req.recorded_by_id)
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    post,
    path = "/api/contributions/void",
    request_body = VoidContributionRequest,
    responses(
        (status = 201, description = "Adjustment appended", body = LedgerEntry),
        (status = 404, description = "Entry not found", body = ErrorResponse),
        (status = 409, description = "Already voided", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn void_contribution(
    State(service): State<AppService>,
    Json(req): Json<VoidContributionRequest>,
) -> Result<(StatusCode, Json<LedgerEntry>), ApiError> {
    let (adjustment, _group) = service
        .void_contribution(&req.group_id, &req.entry_id, &req.voided_by_id)
        .await?;
    Ok((StatusCode::CREATED, Json(adjustment)))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/status/monthly",
    params(
        ("group_id" = String, Path, description = "Group to query"),
        ("start" = String, Query, description = "Period start (inclusive, RFC 3339)"),
        ("end" = String, Query, description = "Period end (exclusive, RFC 3339)"),
        ("queried_by" = String, Query, description = "Requesting member uid")
    ),
    responses(
        (status = 200, description = "Per-member contribution standing", body = MonthlyStatusResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn monthly_status(
    State(service): State<AppService>,
    Path(group_id): Path<String>,
    Query(query): Query<MonthlyStatusQuery>,
) -> Result<Json<MonthlyStatusResponse>, ApiError> {
    Ok(Json(
        service
            .monthly_status(&group_id, query.start, query.end, &query.queried_by)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/recipient",
    params(("group_id" = String, Path, description = "Group to query")),
    responses(
        (status = 200, description = "Next payout recipient, null when schedule is empty", body = Option<Member>),
        (status = 404, description = "Group not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn current_recipient(
    State(service): State<AppService>,
    Path(group_id): Path<String>,
) -> Result<Json<Option<Member>>, ApiError> {
    Ok(Json(service.current_recipient(&group_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/payout",
    params(("group_id" = String, Path, description = "Group to pay out")),
    request_body = TriggerPayoutRequest,
    responses(
        (status = 201, description = "Payout executed", body = LedgerEntry),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 422, description = "Insufficient funds or empty schedule", body = ErrorResponse),
        (status = 409, description = "Concurrent modification, retry", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn trigger_payout(
    State(service): State<AppService>,
    Path(group_id): Path<String>,
    Json(req): Json<TriggerPayoutRequest>,
) -> Result<(StatusCode, Json<LedgerEntry>), ApiError> {
    let (entry, _group) = service.trigger_payout(&group_id, &req.triggered_by_id).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/ledger",
    params(
        ("group_id" = String, Path, description = "Group to export"),
        ("start" = Option<String>, Query, description = "Period start (inclusive, RFC 3339)"),
        ("end" = Option<String>, Query, description = "Period end (exclusive, RFC 3339)"),
        ("queried_by" = String, Query, description = "Requesting member uid")
    ),
    responses(
        (status = 200, description = "Ledger entries, newest first", body = [LedgerEntry]),
        (status = 404, description = "Group not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn export_ledger(
    State(service): State<AppService>,
    Path(group_id): Path<String>,
    Query(query): Query<LedgerQuery>,
) -> Result<Json<Vec<LedgerEntry>>, ApiError> {
    Ok(Json(
        service
            .export_ledger(&group_id, query.start, query.end, &query.queried_by)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/reconcile",
    params(
        ("group_id" = String, Path, description = "Group to check"),
        ("queried_by" = String, Query, description = "Requesting admin uid")
    ),
    responses(
        (status = 200, description = "Stored vs ledger-derived balances", body = ReconcileReport),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn reconcile(
    State(service): State<AppService>,
    Path(group_id): Path<String>,
    Query(query): Query<ReconcileQuery>,
) -> Result<Json<ReconcileReport>, ApiError> {
    Ok(Json(service.reconcile(&group_id, &query.queried_by).await?))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/audits",
    params(("group_id" = String, Path, description = "Group to query")),
    responses((status = 200, description = "Group activity feed", body = [GroupAudit])),
    security(("Bearer" = []))
)]
pub(crate) async fn group_audits(
    State(service): State<AppService>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<GroupAudit>>, ApiError> {
    Ok(Json(service.group_audits(&group_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses((status = 200, description = "Application action log", body = [AppLog])),
    security(("Bearer" = []))
)]
pub(crate) async fn app_logs(State(service): State<AppService>) -> Result<Json<Vec<AppLog>>, ApiError> {
    Ok(Json(service.app_logs().await?))
}
