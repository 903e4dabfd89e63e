// Audit action names shared between the engine and the activity feed.
pub const GROUP_CREATED: &str = "GROUP_CREATED";
pub const GROUP_ARCHIVED: &str = "GROUP_ARCHIVED";
pub const MEMBER_ADDED: &str = "MEMBER_ADDED";
pub const MEMBER_JOINED: &str = "MEMBER_JOINED";
pub const MEMBER_REMOVED: &str = "MEMBER_REMOVED";
pub const ROLE_CHANGED: &str = "ROLE_CHANGED";
pub const ADMIN_TRANSFERRED: &str = "ADMIN_TRANSFERRED";
pub const CONTRIBUTION_RECORDED: &str = "CONTRIBUTION_RECORDED";
pub const CONTRIBUTION_VOIDED: &str = "CONTRIBUTION_VOIDED";
pub const PAYOUT_EXECUTED: &str = "PAYOUT_EXECUTED";
pub const MONTHLY_STATUS_QUERIED: &str = "MONTHLY_STATUS_QUERIED";
pub const LEDGER_EXPORTED: &str = "LEDGER_EXPORTED";
pub const LEDGER_RECONCILED: &str = "LEDGER_RECONCILED";

// Input limits applied by the engine's validators.
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;
pub const MAX_NOTE_LENGTH: usize = 255;
pub const JOIN_CODE_LENGTH: usize = 6;

// Due days are capped at 28 so every month has the configured day.
pub const MAX_MONTHLY_DUE_DAY: u32 = 28;
