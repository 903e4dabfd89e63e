use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Contribution,
    Payout,
    Adjustment,
}

/// Immutable record of one financial event. Contribution and payout amounts
/// are positive magnitudes; the type discriminant carries the direction.
/// Adjustments are signed (a void writes the negative of the original) so
/// `balance == Σ contribution + Σ adjustment − Σ payout` is a plain sum.
///
/// Corrections never edit an entry; they append an adjustment whose `voids`
/// points back at the original.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LedgerEntry {
    pub id: String,
    pub group_id: String,
    pub member_uid: String,
    pub member_name: String,
    #[schema(value_type = String, example = "100.00")]
    pub amount: Decimal,
    pub entry_type: EntryType,
    pub note: Option<String>,
    /// For adjustments, the id of the entry being reversed.
    pub voids: Option<String>,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
    pub recorded_by: String,
}

impl LedgerEntry {
    /// Signed effect of this entry on the group balance.
    pub fn signed_amount(&self) -> Decimal {
        match self.entry_type {
            EntryType::Contribution | EntryType::Adjustment => self.amount,
            EntryType::Payout => -self.amount,
        }
    }
}

/// Recomputes a group balance from scratch. The stored balance must always
/// equal this sum over the group's full ledger.
pub fn balance_from_entries<'a, I>(entries: I) -> Decimal
where
    I: IntoIterator<Item = &'a LedgerEntry>,
{
    entries.into_iter().map(LedgerEntry::signed_amount).sum()
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Partial,
    Missed,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct MemberMonthlyStatus {
    pub uid: String,
    pub name: String,
    #[schema(value_type = String, example = "100.00")]
    pub paid: Decimal,
    #[schema(value_type = String, example = "100.00")]
    pub expected: Decimal,
    #[schema(value_type = String, example = "0.00")]
    pub owed: Decimal,
    pub status: PaymentStatus,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct MonthlyStatusResponse {
    #[schema(value_type = String, example = "2024-06-01T00:00:00Z")]
    pub period_start: DateTime<Utc>,
    #[schema(value_type = String, example = "2024-07-01T00:00:00Z")]
    pub period_end: DateTime<Utc>,
    pub members: Vec<MemberMonthlyStatus>,
}

/// Stored balance and aggregates checked against the ledger.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ReconcileReport {
    pub group_id: String,
    #[schema(value_type = String, example = "300.00")]
    pub stored_balance: Decimal,
    #[schema(value_type = String, example = "300.00")]
    pub ledger_balance: Decimal,
    pub balanced: bool,
    pub mismatched_members: Vec<String>,
}
