use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Serialize)]
pub enum StokvelError {
    #[error("Amount must be greater than zero")]
    InvalidAmount,
    #[error("Group {0} not found")]
    GroupNotFound(String),
    #[error("Member {0} not found in group")]
    MemberNotFound(String),
    #[error("Ledger entry {0} not found")]
    EntryNotFound(String),
    #[error("Member {0} already belongs to the group")]
    DuplicateMember(String),
    #[error("User {0} is not authorized for this action")]
    NotAuthorized(String),
    #[error("Payout schedule is empty")]
    EmptySchedule,
    #[error("Insufficient funds: balance {balance} is below required payout {required}")]
    InsufficientFunds { balance: String, required: String },
    #[error("Ledger entry {0} has already been voided")]
    AlreadyVoided(String),
    #[error("Group was modified concurrently, retry the operation")]
    ConcurrentModification,
    #[error("Group {0} is archived")]
    GroupArchived(String),
    #[error("Join code not found")]
    JoinCodeNotFound,
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),
    #[error("Internal server error: {0}")]
    InternalServerError(String),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Logging error: {0}")]
    LoggingError(String),
    #[error("Cache error: {0}")]
    CacheError(String),
}
