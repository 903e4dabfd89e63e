use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Member,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Admin => "ADMIN",
            Role::Member => "MEMBER",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupStatus {
    Active,
    Archived,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Member {
    pub uid: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: Role,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub joined_at: DateTime<Utc>,
    #[schema(value_type = String, example = "300.00")]
    pub contributions_total: Decimal,
    #[schema(value_type = String, example = "0.00")]
    pub payouts_received: Decimal,
    pub removed: bool,
}

/// Identity-provider profile data accompanying roster operations. The uid is
/// owned by the identity provider; the engine only references it.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct MemberProfile {
    pub uid: String,
    pub name: String,
    pub phone: Option<String>,
}

impl Member {
    pub fn new(profile: MemberProfile, role: Role, joined_at: DateTime<Utc>) -> Self {
        Member {
            uid: profile.uid,
            name: profile.name,
            phone: profile.phone,
            role,
            joined_at,
            contributions_total: Decimal::ZERO,
            payouts_received: Decimal::ZERO,
            removed: false,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_active(&self) -> bool {
        !self.removed
    }
}

/// One stokvel. Members are embedded; removed members stay on the roster with
/// the `removed` flag set so ledger history keeps resolving.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: String,
    pub join_code: String,
    #[schema(value_type = String, example = "100.00")]
    pub contribution_amount: Decimal,
    pub monthly_due_day: Option<u32>,
    #[schema(value_type = String, example = "300.00")]
    pub balance: Decimal,
    /// Rotation order, front = next recipient. Contains exactly the active
    /// member uids, each once.
    pub payout_schedule: Vec<String>,
    /// Completed payout cycles, audit only.
    pub rotation_index: u64,
    pub members_count: usize,
    pub status: GroupStatus,
    #[schema(value_type = Option<String>, example = "2024-06-01T12:34:56Z")]
    pub last_payout_at: Option<DateTime<Utc>>,
    pub members: Vec<Member>,
    /// Optimistic-concurrency token, bumped by every committed mutation.
    pub version: u64,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

impl Group {
    pub fn is_archived(&self) -> bool {
        self.status == GroupStatus::Archived
    }

    pub fn member(&self, uid: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.uid == uid)
    }

    pub fn member_mut(&mut self, uid: &str) -> Option<&mut Member> {
        self.members.iter_mut().find(|m| m.uid == uid)
    }

    /// Active (non-removed) member lookup.
    pub fn active_member(&self, uid: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.uid == uid && !m.removed)
    }

    pub fn active_members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| !m.removed)
    }

    pub fn is_admin(&self, uid: &str) -> bool {
        self.active_member(uid).is_some_and(Member::is_admin)
    }
}
