use crate::core::errors::StokvelError;
use crate::core::models::group::{Group, Role};
use crate::core::models::ledger::{EntryType, PaymentStatus, balance_from_entries};
use crate::tests::{TestService, create_test_service, profile};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;

async fn three_member_group(service: &TestService) -> Group {
    let group = service
        .create_group(
            "Savers".to_string(),
            String::new(),
            Decimal::from(100),
            None,
            profile("alice", "Alice"),
        )
        .await
        .unwrap();
    service.add_member(&group.id, profile("bob", "Bob"), Role::Member, "alice").await.unwrap();
    service.add_member(&group.id, profile("carol", "Carol"), Role::Member, "alice").await.unwrap()
}

#[tokio::test]
async fn test_record_contribution_updates_balance_and_member_total() {
    let _ = env_logger::try_init();
    let service = create_test_service();
    let group = three_member_group(&service).await;

    let (entry, group) = service
        .record_contribution(&group.id, "bob", Decimal::from(100), Some("June".to_string()), "bob")
        .await
        .unwrap();

    assert_eq!(entry.entry_type, EntryType::Contribution);
    assert_eq!(entry.amount, Decimal::from(100));
    assert_eq!(entry.member_uid, "bob");
    assert_eq!(entry.member_name, "Bob");
    assert_eq!(entry.recorded_by, "bob");
    assert!(entry.voids.is_none());

    assert_eq!(group.balance, Decimal::from(100));
    assert_eq!(group.member("bob").unwrap().contributions_total, Decimal::from(100));
    assert_eq!(group.member("alice").unwrap().contributions_total, Decimal::ZERO);
}

#[tokio::test]
async fn test_record_contribution_rejects_bad_amounts() {
    let service = create_test_service();
    let group = three_member_group(&service).await;

    let zero = service
        .record_contribution(&group.id, "bob", Decimal::ZERO, None, "bob")
        .await;
    assert!(matches!(zero, Err(StokvelError::InvalidAmount)));

    let negative = service
        .record_contribution(&group.id, "bob", Decimal::from(-10), None, "bob")
        .await;
    assert!(matches!(negative, Err(StokvelError::InvalidAmount)));

    let group = service.group_snapshot(&group.id).await.unwrap();
    assert_eq!(group.balance, Decimal::ZERO);
}

#[tokio::test]
async fn test_record_contribution_for_unknown_member_fails() {
    let service = create_test_service();
    let group = three_member_group(&service).await;

    let result = service
        .record_contribution(&group.id, "ghost", Decimal::from(100), None, "alice")
        .await;
    assert!(matches!(result, Err(StokvelError::MemberNotFound(_))));
}

#[tokio::test]
async fn test_recording_for_another_member_requires_admin() {
    let service = create_test_service();
    let group = three_member_group(&service).await;

    let forbidden = service
        .record_contribution(&group.id, "carol", Decimal::from(100), None, "bob")
        .await;
    assert!(matches!(forbidden, Err(StokvelError::NotAuthorized(_))));

    // The admin records on behalf of members who paid in cash.
    let (entry, _) = service
        .record_contribution(&group.id, "carol", Decimal::from(100), None, "alice")
        .await
        .unwrap();
    assert_eq!(entry.member_uid, "carol");
    assert_eq!(entry.recorded_by, "alice");
}

#[tokio::test]
async fn test_void_contribution_appends_adjustment_once() {
    let service = create_test_service();
    let group = three_member_group(&service).await;

    let (entry, _) = service
        .record_contribution(&group.id, "bob", Decimal::from(100), None, "bob")
        .await
        .unwrap();

    let (adjustment, group_after) = service.void_contribution(&group.id, &entry.id, "alice").await.unwrap();
    assert_eq!(adjustment.entry_type, EntryType::Adjustment);
    assert_eq!(adjustment.amount, Decimal::from(-100));
    assert_eq!(adjustment.voids.as_deref(), Some(entry.id.as_str()));
    assert_eq!(group_after.balance, Decimal::ZERO);
    assert_eq!(group_after.member("bob").unwrap().contributions_total, Decimal::ZERO);

    // Second void fails and the balance reflects exactly one reversal.
    let again = service.void_contribution(&group.id, &entry.id, "alice").await;
    assert!(matches!(again, Err(StokvelError::AlreadyVoided(_))));
    let snapshot = service.group_snapshot(&group.id).await.unwrap();
    assert_eq!(snapshot.balance, Decimal::ZERO);

    // The original entry is untouched in the ledger.
    let ledger = service.export_ledger(&group.id, None, None, "alice").await.unwrap();
    assert_eq!(ledger.len(), 2);
    assert!(ledger.iter().any(|e| e.id == entry.id && e.amount == Decimal::from(100)));
}

#[tokio::test]
async fn test_void_requires_admin_and_contribution_entry() {
    let service = create_test_service();
    let group = three_member_group(&service).await;

    let (entry, _) = service
        .record_contribution(&group.id, "bob", Decimal::from(100), None, "bob")
        .await
        .unwrap();

    let forbidden = service.void_contribution(&group.id, &entry.id, "bob").await;
    assert!(matches!(forbidden, Err(StokvelError::NotAuthorized(_))));

    let missing = service.void_contribution(&group.id, "no-such-entry", "alice").await;
    assert!(matches!(missing, Err(StokvelError::EntryNotFound(_))));
}

#[tokio::test]
async fn test_monthly_status_classifies_paid_partial_missed() {
    let service = create_test_service();
    let group = three_member_group(&service).await;

    // Exact payment is Paid, not Partial.
    service
        .record_contribution(&group.id, "alice", Decimal::from(100), None, "alice")
        .await
        .unwrap();
    service
        .record_contribution(&group.id, "bob", Decimal::from(40), None, "bob")
        .await
        .unwrap();

    let start = Utc::now() - Duration::hours(1);
    let end = Utc::now() + Duration::hours(1);
    let status = service.monthly_status(&group.id, start, end, "alice").await.unwrap();

    let by_uid = |uid: &str| status.members.iter().find(|m| m.uid == uid).unwrap();
    assert_eq!(by_uid("alice").status, PaymentStatus::Paid);
    assert_eq!(by_uid("alice").owed, Decimal::ZERO);
    assert_eq!(by_uid("bob").status, PaymentStatus::Partial);
    assert_eq!(by_uid("bob").owed, Decimal::from(60));
    assert_eq!(by_uid("carol").status, PaymentStatus::Missed);
    assert_eq!(by_uid("carol").owed, Decimal::from(100));
}

#[tokio::test]
async fn test_monthly_status_window_excludes_out_of_period_entries() {
    let service = create_test_service();
    let group = three_member_group(&service).await;

    service
        .record_contribution(&group.id, "alice", Decimal::from(100), None, "alice")
        .await
        .unwrap();

    // A window in the past sees nothing.
    let start = Utc::now() - Duration::days(60);
    let end = Utc::now() - Duration::days(30);
    let status = service.monthly_status(&group.id, start, end, "alice").await.unwrap();
    assert!(status.members.iter().all(|m| m.status == PaymentStatus::Missed));
}

#[tokio::test]
async fn test_monthly_status_excludes_removed_members() {
    let service = create_test_service();
    let group = three_member_group(&service).await;
    service.remove_member(&group.id, "carol", "alice").await.unwrap();

    let start = Utc::now() - Duration::hours(1);
    let end = Utc::now() + Duration::hours(1);
    let status = service.monthly_status(&group.id, start, end, "alice").await.unwrap();
    assert_eq!(status.members.len(), 2);
    assert!(status.members.iter().all(|m| m.uid != "carol"));
}

#[tokio::test]
async fn test_export_ledger_newest_first_and_keeps_removed_member_history() {
    let service = create_test_service();
    let group = three_member_group(&service).await;

    service
        .record_contribution(&group.id, "bob", Decimal::from(100), None, "bob")
        .await
        .unwrap();
    service
        .record_contribution(&group.id, "carol", Decimal::from(100), None, "carol")
        .await
        .unwrap();

    service.remove_member(&group.id, "bob", "alice").await.unwrap();

    let ledger = service.export_ledger(&group.id, None, None, "alice").await.unwrap();
    assert_eq!(ledger.len(), 2);
    // Newest first.
    assert!(ledger[0].created_at >= ledger[1].created_at);
    // Removed member's entries stay queryable.
    assert!(ledger.iter().any(|e| e.member_uid == "bob"));
}

#[tokio::test]
async fn test_conservation_balance_always_matches_ledger() {
    let service = create_test_service();
    let group = three_member_group(&service).await;

    for uid in ["alice", "bob", "carol"] {
        service
            .record_contribution(&group.id, uid, Decimal::from(100), None, uid)
            .await
            .unwrap();
    }
    service.trigger_payout(&group.id, "alice").await.unwrap();
    let (entry, _) = service
        .record_contribution(&group.id, "bob", Decimal::from(50), None, "bob")
        .await
        .unwrap();
    service.void_contribution(&group.id, &entry.id, "alice").await.unwrap();

    let snapshot = service.group_snapshot(&group.id).await.unwrap();
    let ledger = service.export_ledger(&group.id, None, None, "alice").await.unwrap();
    assert_eq!(snapshot.balance, balance_from_entries(&ledger));

    let report = service.reconcile(&group.id, "alice").await.unwrap();
    assert!(report.balanced);
    assert_eq!(report.stored_balance, report.ledger_balance);
    assert!(report.mismatched_members.is_empty());
}
