use utoipa::OpenApi;

use crate::{
    api::models::{
        AddMemberRequest, ArchiveGroupRequest, CreateGroupRequest, ErrorResponse, JoinGroupRequest,
        RecordContributionRequest, RemoveMemberRequest, SetRoleRequest, SetRoleResponse, TransferAdminRequest,
        TriggerPayoutRequest, VoidContributionRequest,
    },
    core::models::{
        audit::{AppLog, GroupAudit},
        group::{Group, Member, MemberProfile},
        ledger::{LedgerEntry, MemberMonthlyStatus, MonthlyStatusResponse, ReconcileReport},
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::create_group,
        super::handlers::get_group,
        super::handlers::member_groups,
        super::handlers::join_group,
        super::handlers::add_member,
        super::handlers::remove_member,
        super::handlers::set_role,
        super::handlers::transfer_admin,
        super::handlers::archive_group,
        super::handlers::record_contribution,
        super::handlers::void_contribution,
        super::handlers::monthly_status,
        super::handlers::current_recipient,
        super::handlers::trigger_payout,
        super::handlers::export_ledger,
        super::handlers::reconcile,
        super::handlers::group_audits,
        super::handlers::app_logs
    ),
    components(schemas(
        CreateGroupRequest,
        JoinGroupRequest,
        AddMemberRequest,
        RemoveMemberRequest,
        SetRoleRequest,
        SetRoleResponse,
        TransferAdminRequest,
        ArchiveGroupRequest,
        RecordContributionRequest,
        VoidContributionRequest,
        TriggerPayoutRequest,
        ErrorResponse,
        Group,
        Member,
        MemberProfile,
        LedgerEntry,
        MonthlyStatusResponse,
        MemberMonthlyStatus,
        ReconcileReport,
        AppLog,
        GroupAudit
    )),
    info(
        title = "Stokvel PRO API",
        description = "API for rotating-savings group ledgers and payouts",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
