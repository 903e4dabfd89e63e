use crate::auth::jwt::{Claims, JwtService};
use crate::constants::{
    ADMIN_TRANSFERRED, CONTRIBUTION_RECORDED, CONTRIBUTION_VOIDED, GROUP_ARCHIVED, GROUP_CREATED, JOIN_CODE_LENGTH,
    LEDGER_EXPORTED, LEDGER_RECONCILED, MAX_DESCRIPTION_LENGTH, MAX_MONTHLY_DUE_DAY, MAX_NAME_LENGTH, MAX_NOTE_LENGTH,
    MEMBER_ADDED, MEMBER_JOINED, MEMBER_REMOVED, MONTHLY_STATUS_QUERIED, PAYOUT_EXECUTED, ROLE_CHANGED,
};
use crate::core::errors::{FieldError, StokvelError};
use crate::core::models::{
    audit::{AppLog, GroupAudit},
    group::{Group, GroupStatus, Member, MemberProfile, Role},
    ledger::{
        EntryType, LedgerEntry, MemberMonthlyStatus, MonthlyStatusResponse, PaymentStatus, ReconcileReport,
        balance_from_entries,
    },
};
use crate::core::{money, rotation};
use crate::infrastructure::cache::Cache;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

const MONTHLY_STATUS_TTL: std::time::Duration = std::time::Duration::from_secs(3600);

/// The Group Ledger Engine. Every balance- or rotation-affecting operation
/// goes through here: the engine validates against a fresh group snapshot,
/// builds the complete new state in memory and commits it through the storage
/// adapter as one atomic mutation set. On any validation failure nothing is
/// applied.
pub struct StokvelService<L: LoggingService, S: Storage, C: Cache> {
    storage: S,
    logging: L,
    cache: C,
    jwt_service: JwtService,
}

impl<L: LoggingService, S: Storage, C: Cache> StokvelService<L, S, C> {
    pub fn new(storage: S, logging: L, cache: C, jwt_secret: String) -> Self {
        StokvelService {
            storage,
            logging,
            cache,
            jwt_service: JwtService::new(jwt_secret),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, StokvelError> {
        self.jwt_service.validate_token(token)
    }

    // VALIDATION HELPERS

    async fn load_group(&self, group_id: &str) -> Result<Group, StokvelError> {
        self.storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| StokvelError::GroupNotFound(group_id.to_string()))
    }

    /// Loads a group for mutation; archived groups reject every write.
    async fn load_active_group(&self, group_id: &str) -> Result<Group, StokvelError> {
        let group = self.load_group(group_id).await?;
        if group.is_archived() {
            return Err(StokvelError::GroupArchived(group_id.to_string()));
        }
        Ok(group)
    }

    fn require_admin(group: &Group, uid: &str) -> Result<(), StokvelError> {
        if !group.is_admin(uid) {
            warn!("user {} attempted an admin action on group {}", uid, group.id);
            return Err(StokvelError::NotAuthorized(uid.to_string()));
        }
        Ok(())
    }

    fn require_active_member(group: &Group, uid: &str) -> Result<(), StokvelError> {
        if group.active_member(uid).is_none() {
            return Err(StokvelError::MemberNotFound(uid.to_string()));
        }
        Ok(())
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), StokvelError> {
        if value.trim().is_empty() {
            return Err(StokvelError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} cannot be empty", field),
                },
            ));
        }
        if value.len() > max_length {
            return Err(StokvelError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("{} Too Long", field),
                    description: format!("{} cannot exceed {} characters", field, max_length),
                },
            ));
        }
        if value.chars().any(|c| c.is_control() || "<>{}[]".contains(c)) {
            return Err(StokvelError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} contains invalid characters", field),
                },
            ));
        }
        Ok(())
    }

    async fn log_and_audit(
        &self,
        group_id: Option<&str>,
        action: &str,
        log_details: serde_json::Value,
        user_id: Option<&str>,
    ) -> Result<(), StokvelError> {
        self.logging.log_action(action, log_details.clone(), user_id).await?;
        if let Some(gid) = group_id {
            self.storage
                .save_group_audit(GroupAudit {
                    id: Uuid::new_v4().to_string(),
                    group_id: gid.to_string(),
                    action: action.to_string(),
                    user_id: user_id.map(String::from),
                    details: serde_json::from_value(log_details).unwrap_or_default(),
                    timestamp: Utc::now(),
                })
                .await?;
        }
        Ok(())
    }

    fn generate_join_code() -> String {
        let code: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(JOIN_CODE_LENGTH)
            .collect();
        code.to_uppercase()
    }

    // GROUP LIFECYCLE

    pub async fn create_group(
        &self,
        name: String,
        description: String,
        contribution_amount: Decimal,
        monthly_due_day: Option<u32>,
        creator: MemberProfile,
    ) -> Result<Group, StokvelError> {
        info!("creating group '{}' for creator {}", name, creator.uid);
        self.validate_string_input("name", &name, MAX_NAME_LENGTH)?;
        if !description.is_empty() {
            self.validate_string_input("description", &description, MAX_DESCRIPTION_LENGTH)?;
        }
        money::validate_amount("contribution_amount", contribution_amount)?;
        if let Some(day) = monthly_due_day {
            if day == 0 || day > MAX_MONTHLY_DUE_DAY {
                return Err(StokvelError::InvalidInput(
                    "monthly_due_day".to_string(),
                    FieldError {
                        field: "monthly_due_day".to_string(),
                        title: "Invalid Due Day".to_string(),
                        description: format!("Due day must be between 1 and {}", MAX_MONTHLY_DUE_DAY),
                    },
                ));
            }
        }

        let now = Utc::now();
        let creator_uid = creator.uid.clone();
        let group = Group {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            join_code: Self::generate_join_code(),
            contribution_amount,
            monthly_due_day,
            balance: Decimal::ZERO,
            payout_schedule: vec![creator_uid.clone()],
            rotation_index: 0,
            members_count: 1,
            status: GroupStatus::Active,
            last_payout_at: None,
            members: vec![Member::new(creator, Role::Admin, now)],
            version: 0,
            created_at: now,
            created_by: creator_uid.clone(),
        };

        self.storage.insert_group(group.clone()).await?;

        self.log_and_audit(
            Some(&group.id),
            GROUP_CREATED,
            json!({
                "group_id": group.id,
                "name": group.name,
                "join_code": group.join_code,
                "contribution_amount": group.contribution_amount,
            }),
            Some(&creator_uid),
        )
        .await?;

        Ok(group)
    }

    /// Closes a group. Archived groups keep their full history and reject all
    /// further mutations; there is no hard delete.
    pub async fn archive_group(&self, group_id: &str, archived_by: &str) -> Result<Group, StokvelError> {
        let mut group = self.load_active_group(group_id).await?;
        Self::require_admin(&group, archived_by)?;

        group.status = GroupStatus::Archived;
        let committed = self.storage.commit(group, Vec::new()).await?;
        self.cache.invalidate_group(group_id).await?;

        self.log_and_audit(
            Some(group_id),
            GROUP_ARCHIVED,
            json!({ "group_id": group_id }),
            Some(archived_by),
        )
        .await?;
        Ok(committed)
    }

    // ROSTER

    pub async fn add_member(
        &self,
        group_id: &str,
        profile: MemberProfile,
        role: Role,
        added_by: &str,
    ) -> Result<Group, StokvelError> {
        let group = self.load_active_group(group_id).await?;
        Self::require_admin(&group, added_by)?;
        let committed = self.push_member(group, profile.clone(), role, MEMBER_ADDED, added_by).await?;
        debug!("member {} added to group {}", profile.uid, group_id);
        Ok(committed)
    }

    /// Self-service join by invite code; joiners always start as plain
    /// members.
    pub async fn join_group(&self, join_code: &str, profile: MemberProfile) -> Result<Group, StokvelError> {
        let group = self
            .storage
            .get_group_by_join_code(join_code)
            .await?
            .ok_or(StokvelError::JoinCodeNotFound)?;
        if group.is_archived() {
            return Err(StokvelError::GroupArchived(group.id.clone()));
        }
        let joiner = profile.uid.clone();
        self.push_member(group, profile, Role::Member, MEMBER_JOINED, &joiner).await
    }

    async fn push_member(
        &self,
        mut group: Group,
        profile: MemberProfile,
        role: Role,
        action: &str,
        actor: &str,
    ) -> Result<Group, StokvelError> {
        self.validate_string_input("name", &profile.name, MAX_NAME_LENGTH)?;
        // A removed uid also counts as present: history stays attached to it
        // and rejoining is not an implicit re-add.
        if group.member(&profile.uid).is_some() {
            return Err(StokvelError::DuplicateMember(profile.uid.clone()));
        }

        let uid = profile.uid.clone();
        let name = profile.name.clone();
        group.members.push(Member::new(profile, role.clone(), Utc::now()));
        rotation::push_tail(&mut group.payout_schedule, &uid);
        group.members_count += 1;

        let group_id = group.id.clone();
        let committed = self.storage.commit(group, Vec::new()).await?;
        self.cache.invalidate_group(&group_id).await?;

        self.log_and_audit(
            Some(&group_id),
            action,
            json!({ "group_id": group_id, "uid": uid, "name": name, "role": role.to_string() }),
            Some(actor),
        )
        .await?;
        Ok(committed)
    }

    /// Soft-removes a member: the roster entry and ledger history remain, the
    /// rotation slot is deleted. Removing the current head promotes the next
    /// in line with no further reordering.
    pub async fn remove_member(&self, group_id: &str, uid: &str, removed_by: &str) -> Result<Group, StokvelError> {
        let mut group = self.load_active_group(group_id).await?;
        Self::require_admin(&group, removed_by)?;

        let member = group
            .members
            .iter_mut()
            .find(|m| m.uid == uid && !m.removed)
            .ok_or_else(|| StokvelError::MemberNotFound(uid.to_string()))?;
        member.removed = true;
        rotation::remove_uid(&mut group.payout_schedule, uid);
        group.members_count -= 1;

        let committed = self.storage.commit(group, Vec::new()).await?;
        self.cache.invalidate_group(group_id).await?;

        self.log_and_audit(
            Some(group_id),
            MEMBER_REMOVED,
            json!({ "group_id": group_id, "uid": uid }),
            Some(removed_by),
        )
        .await?;
        Ok(committed)
    }

    /// Changes a member's role, returning the prior role for the caller's
    /// audit trail. No-op when the role is unchanged.
    pub async fn set_role(
        &self,
        group_id: &str,
        uid: &str,
        role: Role,
        changed_by: &str,
    ) -> Result<Role, StokvelError> {
        let mut group = self.load_active_group(group_id).await?;
        Self::require_admin(&group, changed_by)?;
        Self::require_active_member(&group, uid)?;

        let prior = group
            .active_member(uid)
            .map(|m| m.role.clone())
            .ok_or_else(|| StokvelError::MemberNotFound(uid.to_string()))?;
        if prior == role {
            return Ok(prior);
        }
        if prior == Role::Admin && group.active_members().filter(|m| m.is_admin()).count() == 1 {
            return Err(StokvelError::InvalidInput(
                "role".to_string(),
                FieldError {
                    field: "role".to_string(),
                    title: "Last Admin".to_string(),
                    description: "Cannot demote the only admin; transfer admin first".to_string(),
                },
            ));
        }

        if let Some(member) = group.member_mut(uid) {
            member.role = role.clone();
        }
        self.storage.commit(group, Vec::new()).await?;
        self.cache.invalidate_group(group_id).await?;

        self.log_and_audit(
            Some(group_id),
            ROLE_CHANGED,
            json!({ "group_id": group_id, "uid": uid, "prior_role": prior.to_string(), "new_role": role.to_string() }),
            Some(changed_by),
        )
        .await?;
        Ok(prior)
    }

    /// Atomically promotes `to_uid` and demotes `from_uid`. Transferring to
    /// oneself is a no-op.
    pub async fn transfer_admin(&self, group_id: &str, from_uid: &str, to_uid: &str) -> Result<Group, StokvelError> {
        let mut group = self.load_active_group(group_id).await?;
        Self::require_admin(&group, from_uid)?;
        Self::require_active_member(&group, to_uid)?;

        if from_uid == to_uid {
            return Ok(group);
        }

        for member in group.members.iter_mut() {
            if member.uid == to_uid {
                member.role = Role::Admin;
            } else if member.uid == from_uid {
                member.role = Role::Member;
            }
        }

        let committed = self.storage.commit(group, Vec::new()).await?;
        self.cache.invalidate_group(group_id).await?;

        self.log_and_audit(
            Some(group_id),
            ADMIN_TRANSFERRED,
            json!({ "group_id": group_id, "from_uid": from_uid, "to_uid": to_uid }),
            Some(from_uid),
        )
        .await?;
        info!("admin of group {} transferred from {} to {}", group_id, from_uid, to_uid);
        Ok(committed)
    }

    // LEDGER

    /// Credits the pool. Entry, group balance and the member's running total
    /// move together in one commit; a contribution recorded for someone else
    /// requires admin.
    pub async fn record_contribution(
        &self,
        group_id: &str,
        member_uid: &str,
        amount: Decimal,
        note: Option<String>,
        recorded_by: &str,
    ) -> Result<(LedgerEntry, Group), StokvelError> {
        let mut group = self.load_active_group(group_id).await?;
        money::validate_amount("amount", amount)?;
        if let Some(ref n) = note {
            self.validate_string_input("note", n, MAX_NOTE_LENGTH)?;
        }
        Self::require_active_member(&group, member_uid)?;
        if recorded_by != member_uid {
            Self::require_admin(&group, recorded_by)?;
        }

        let member_name = group
            .active_member(member_uid)
            .map(|m| m.name.clone())
            .unwrap_or_default();
        let entry = LedgerEntry {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            member_uid: member_uid.to_string(),
            member_name,
            amount,
            entry_type: EntryType::Contribution,
            note,
            voids: None,
            created_at: Utc::now(),
            recorded_by: recorded_by.to_string(),
        };

        group.balance += amount;
        if let Some(member) = group.member_mut(member_uid) {
            member.contributions_total += amount;
        }

        let committed = self.storage.commit(group, vec![entry.clone()]).await?;
        self.cache.invalidate_group(group_id).await?;

        self.log_and_audit(
            Some(group_id),
            CONTRIBUTION_RECORDED,
            json!({
                "group_id": group_id,
                "entry_id": entry.id,
                "uid": member_uid,
                "amount": amount,
            }),
            Some(recorded_by),
        )
        .await?;
        info!(
            "contribution of {} by {} recorded in group {}",
            money::fmt_zar(amount),
            member_uid,
            group_id
        );

        Ok((entry, committed))
    }

    /// Reverses a contribution without touching it: appends an adjustment of
    /// equal and opposite amount referencing the original. Voiding twice
    /// fails; the ledger stays append-only.
    pub async fn void_contribution(
        &self,
        group_id: &str,
        entry_id: &str,
        voided_by: &str,
    ) -> Result<(LedgerEntry, Group), StokvelError> {
        let mut group = self.load_active_group(group_id).await?;
        Self::require_admin(&group, voided_by)?;

        let original = self
            .storage
            .get_entry(entry_id)
            .await?
            .filter(|e| e.group_id == group_id)
            .ok_or_else(|| StokvelError::EntryNotFound(entry_id.to_string()))?;
        if original.entry_type != EntryType::Contribution {
            return Err(StokvelError::InvalidInput(
                "entry_id".to_string(),
                FieldError {
                    field: "entry_id".to_string(),
                    title: "Not Voidable".to_string(),
                    description: "Only contribution entries can be voided".to_string(),
                },
            ));
        }

        let already_voided = self
            .storage
            .entries_for_group(group_id, None, None)
            .await?
            .iter()
            .any(|e| e.voids.as_deref() == Some(entry_id));
        if already_voided {
            return Err(StokvelError::AlreadyVoided(entry_id.to_string()));
        }

        let adjustment = LedgerEntry {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            member_uid: original.member_uid.clone(),
            member_name: original.member_name.clone(),
            amount: -original.amount,
            entry_type: EntryType::Adjustment,
            note: Some(format!("Void of contribution {}", original.id)),
            voids: Some(original.id.clone()),
            created_at: Utc::now(),
            recorded_by: voided_by.to_string(),
        };

        group.balance -= original.amount;
        let member = group
            .member_mut(&original.member_uid)
            .ok_or_else(|| StokvelError::MemberNotFound(original.member_uid.clone()))?;
        member.contributions_total -= original.amount;

        let committed = self.storage.commit(group, vec![adjustment.clone()]).await?;
        self.cache.invalidate_group(group_id).await?;

        self.log_and_audit(
            Some(group_id),
            CONTRIBUTION_VOIDED,
            json!({
                "group_id": group_id,
                "entry_id": entry_id,
                "adjustment_id": adjustment.id,
            }),
            Some(voided_by),
        )
        .await?;

        Ok((adjustment, committed))
    }

    /// Classifies every active member's standing for the period
    /// `[period_start, period_end)`. Pure read, cached per group and period.
    pub async fn monthly_status(
        &self,
        group_id: &str,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
        queried_by: &str,
    ) -> Result<MonthlyStatusResponse, StokvelError> {
        let group = self.load_group(group_id).await?;
        Self::require_active_member(&group, queried_by)?;

        if let Some(cached) = self.cache.get_monthly_status(group_id, period_start, period_end).await? {
            return Ok(cached);
        }

        let entries = self
            .storage
            .entries_for_group(group_id, Some(period_start), Some(period_end))
            .await?;
        let expected = group.contribution_amount;

        let members = group
            .active_members()
            .map(|member| {
                let paid: Decimal = entries
                    .iter()
                    .filter(|e| e.entry_type == EntryType::Contribution && e.member_uid == member.uid)
                    .map(|e| e.amount)
                    .sum();
                let status = if expected == Decimal::ZERO {
                    if paid > Decimal::ZERO { PaymentStatus::Paid } else { PaymentStatus::Missed }
                } else if paid >= expected {
                    PaymentStatus::Paid
                } else if paid > Decimal::ZERO {
                    PaymentStatus::Partial
                } else {
                    PaymentStatus::Missed
                };
                MemberMonthlyStatus {
                    uid: member.uid.clone(),
                    name: member.name.clone(),
                    paid,
                    expected,
                    owed: (expected - paid).max(Decimal::ZERO),
                    status,
                }
            })
            .collect();

        let response = MonthlyStatusResponse {
            period_start,
            period_end,
            members,
        };
        self.cache
            .save_monthly_status(group_id, &response, MONTHLY_STATUS_TTL)
            .await?;

        self.log_and_audit(
            Some(group_id),
            MONTHLY_STATUS_QUERIED,
            json!({ "group_id": group_id, "period_start": period_start, "period_end": period_end }),
            Some(queried_by),
        )
        .await?;

        Ok(response)
    }

    // ROTATION & PAYOUT

    /// The member next in line, or `None` when the schedule is empty.
    pub async fn current_recipient(&self, group_id: &str) -> Result<Option<Member>, StokvelError> {
        let group = self.load_group(group_id).await?;
        Ok(rotation::current_recipient(&group.payout_schedule)
            .and_then(|uid| group.member(uid))
            .cloned())
    }

    /// Pays the rotation head the fixed-formula amount and rotates the
    /// schedule. Eligibility is evaluated fresh against the loaded snapshot;
    /// the debit, the payout entry, the recipient's aggregate, the schedule
    /// rotation and the cycle counter land in one commit.
    pub async fn trigger_payout(&self, group_id: &str, actor_uid: &str) -> Result<(LedgerEntry, Group), StokvelError> {
        let mut group = self.load_active_group(group_id).await?;
        // An emptied roster beats the admin check: once everyone is removed
        // there is no active admin left, and the caller should hear "nobody
        // to pay" rather than "not authorized".
        if group.payout_schedule.is_empty() {
            return Err(StokvelError::EmptySchedule);
        }
        Self::require_admin(&group, actor_uid)?;

        let required = money::required_payout(group.contribution_amount, group.members_count);
        if group.balance < required {
            warn!(
                "payout blocked on group {}: balance {} below required {}",
                group_id, group.balance, required
            );
            return Err(StokvelError::InsufficientFunds {
                balance: group.balance.to_string(),
                required: required.to_string(),
            });
        }

        let recipient_uid = rotation::advance(&mut group.payout_schedule)?;
        let recipient_name = group
            .member(&recipient_uid)
            .map(|m| m.name.clone())
            .unwrap_or_default();

        let now = Utc::now();
        let entry = LedgerEntry {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            member_uid: recipient_uid.clone(),
            member_name: recipient_name,
            amount: required,
            entry_type: EntryType::Payout,
            note: None,
            voids: None,
            created_at: now,
            recorded_by: actor_uid.to_string(),
        };

        group.balance -= required;
        group.rotation_index += 1;
        group.last_payout_at = Some(now);
        if let Some(recipient) = group.member_mut(&recipient_uid) {
            recipient.payouts_received += required;
        }

        let committed = self.storage.commit(group, vec![entry.clone()]).await?;
        self.cache.invalidate_group(group_id).await?;

        self.log_and_audit(
            Some(group_id),
            PAYOUT_EXECUTED,
            json!({
                "group_id": group_id,
                "entry_id": entry.id,
                "recipient_uid": recipient_uid,
                "amount": required,
            }),
            Some(actor_uid),
        )
        .await?;
        info!(
            "payout of {} to {} executed in group {}",
            money::fmt_zar(required),
            recipient_uid,
            group_id
        );

        Ok((entry, committed))
    }

    // READS

    pub async fn group_snapshot(&self, group_id: &str) -> Result<Group, StokvelError> {
        self.load_group(group_id).await
    }

    /// Groups where the uid is an active member, for the dashboard listing.
    pub async fn member_groups(&self, uid: &str) -> Result<Vec<Group>, StokvelError> {
        self.storage.member_groups(uid).await
    }

    /// The group's ledger, newest first, optionally bounded to
    /// `[period_start, period_end)`. Pure read; restart by calling again.
    pub async fn export_ledger(
        &self,
        group_id: &str,
        period_start: Option<DateTime<Utc>>,
        period_end: Option<DateTime<Utc>>,
        queried_by: &str,
    ) -> Result<Vec<LedgerEntry>, StokvelError> {
        let group = self.load_group(group_id).await?;
        Self::require_active_member(&group, queried_by)?;

        let entries = self.storage.entries_for_group(group_id, period_start, period_end).await?;

        self.log_and_audit(
            Some(group_id),
            LEDGER_EXPORTED,
            json!({ "group_id": group_id, "entry_count": entries.len() }),
            Some(queried_by),
        )
        .await?;
        Ok(entries)
    }

    /// Recomputes the balance and per-member totals from the full ledger and
    /// reports them against the stored values. A mismatch means an invariant
    /// was broken outside the engine.
    pub async fn reconcile(&self, group_id: &str, queried_by: &str) -> Result<ReconcileReport, StokvelError> {
        let group = self.load_group(group_id).await?;
        Self::require_admin(&group, queried_by)?;

        let entries = self.storage.entries_for_group(group_id, None, None).await?;
        let ledger_balance = balance_from_entries(&entries);

        let mut mismatched_members = Vec::new();
        for member in &group.members {
            let contributed: Decimal = entries
                .iter()
                .filter(|e| e.member_uid == member.uid)
                .filter(|e| matches!(e.entry_type, EntryType::Contribution | EntryType::Adjustment))
                .map(|e| e.amount)
                .sum();
            let received: Decimal = entries
                .iter()
                .filter(|e| e.member_uid == member.uid && e.entry_type == EntryType::Payout)
                .map(|e| e.amount)
                .sum();
            if contributed != member.contributions_total || received != member.payouts_received {
                mismatched_members.push(member.uid.clone());
            }
        }

        let report = ReconcileReport {
            group_id: group_id.to_string(),
            stored_balance: group.balance,
            ledger_balance,
            balanced: group.balance == ledger_balance && mismatched_members.is_empty(),
            mismatched_members,
        };

        self.log_and_audit(
            Some(group_id),
            LEDGER_RECONCILED,
            json!({ "group_id": group_id, "balanced": report.balanced }),
            Some(queried_by),
        )
        .await?;
        Ok(report)
    }

    pub async fn group_audits(&self, group_id: &str) -> Result<Vec<GroupAudit>, StokvelError> {
        self.load_group(group_id).await?;
        self.storage.get_group_audits(group_id).await
    }

    pub async fn app_logs(&self) -> Result<Vec<AppLog>, StokvelError> {
        self.logging.get_logs().await
    }
}
