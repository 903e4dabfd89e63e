use crate::constants::{GROUP_CREATED, JOIN_CODE_LENGTH, MEMBER_REMOVED};
use crate::core::errors::StokvelError;
use crate::core::models::group::{GroupStatus, Role};
use crate::tests::{create_test_service, profile};
use rust_decimal::Decimal;

#[tokio::test]
async fn test_create_group_creator_is_admin_and_schedule_head() {
    let _ = env_logger::try_init();
    let service = create_test_service();

    let group = service
        .create_group(
            "Ubuntu Savers".to_string(),
            "Monthly grocery stokvel".to_string(),
            Decimal::from(100),
            Some(25),
            profile("alice", "Alice"),
        )
        .await
        .unwrap();

    assert_eq!(group.name, "Ubuntu Savers");
    assert_eq!(group.balance, Decimal::ZERO);
    assert_eq!(group.members_count, 1);
    assert_eq!(group.payout_schedule, vec!["alice".to_string()]);
    assert_eq!(group.status, GroupStatus::Active);
    assert_eq!(group.join_code.len(), JOIN_CODE_LENGTH);
    assert_eq!(group.rotation_index, 0);

    let creator = group.member("alice").unwrap();
    assert_eq!(creator.role, Role::Admin);
    assert!(!creator.removed);

    let audits = service.group_audits(&group.id).await.unwrap();
    assert_eq!(audits.len(), 1);
    assert_eq!(audits[0].action, GROUP_CREATED);
}

#[tokio::test]
async fn test_create_group_rejects_zero_contribution() {
    let service = create_test_service();
    let result = service
        .create_group(
            "Bad Group".to_string(),
            String::new(),
            Decimal::ZERO,
            None,
            profile("alice", "Alice"),
        )
        .await;
    assert!(matches!(result, Err(StokvelError::InvalidAmount)));
}

#[tokio::test]
async fn test_add_member_appends_to_schedule_tail() {
    let service = create_test_service();
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

    let group = service.add_member(&group.id, profile("bob", "Bob"), Role::Member, "alice").await.unwrap();
    let group = service.add_member(&group.id, profile("carol", "Carol"), Role::Member, "alice").await.unwrap();

    assert_eq!(group.members_count, 3);
    assert_eq!(
        group.payout_schedule,
        vec!["alice".to_string(), "bob".to_string(), "carol".to_string()]
    );
    assert_eq!(group.member("bob").unwrap().role, Role::Member);
}

#[tokio::test]
async fn test_non_admin_cannot_add_member() {
    let service = create_test_service();
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

    let result = service.add_member(&group.id, profile("carol", "Carol"), Role::Member, "bob").await;
    assert!(matches!(result, Err(StokvelError::NotAuthorized(_))));
}

#[tokio::test]
async fn test_duplicate_member_rejected_even_after_removal() {
    let service = create_test_service();
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

    let duplicate = service.add_member(&group.id, profile("bob", "Bobby"), Role::Member, "alice").await;
    assert!(matches!(duplicate, Err(StokvelError::DuplicateMember(_))));

    // Soft-removed uids keep their history; rejoin is not an implicit re-add.
    service.remove_member(&group.id, "bob", "alice").await.unwrap();
    let rejoin = service.add_member(&group.id, profile("bob", "Bob"), Role::Member, "alice").await;
    assert!(matches!(rejoin, Err(StokvelError::DuplicateMember(_))));
}

#[tokio::test]
async fn test_join_group_by_code() {
    let service = create_test_service();
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

    let joined = service.join_group(&group.join_code, profile("bob", "Bob")).await.unwrap();
    assert_eq!(joined.members_count, 2);
    assert_eq!(joined.payout_schedule, vec!["alice".to_string(), "bob".to_string()]);

    let unknown = service.join_group("NOPE42", profile("carol", "Carol")).await;
    assert!(matches!(unknown, Err(StokvelError::JoinCodeNotFound)));
}

#[tokio::test]
async fn test_remove_member_mid_schedule_preserves_order() {
    let service = create_test_service();
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
    service.add_member(&group.id, profile("carol", "Carol"), Role::Member, "alice").await.unwrap();

    let group = service.remove_member(&group.id, "bob", "alice").await.unwrap();
    assert_eq!(group.members_count, 2);
    assert_eq!(group.payout_schedule, vec!["alice".to_string(), "carol".to_string()]);
    assert!(group.member("bob").unwrap().removed);

    let audits = service.group_audits(&group.id).await.unwrap();
    assert!(audits.iter().any(|a| a.action == MEMBER_REMOVED));

    let missing = service.remove_member(&group.id, "dave", "alice").await;
    assert!(matches!(missing, Err(StokvelError::MemberNotFound(_))));
}

#[tokio::test]
async fn test_set_role_returns_prior_role() {
    let service = create_test_service();
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

    let prior = service.set_role(&group.id, "bob", Role::Admin, "alice").await.unwrap();
    assert_eq!(prior, Role::Member);

    // Unchanged role is a no-op that still reports the prior value.
    let unchanged = service.set_role(&group.id, "bob", Role::Admin, "alice").await.unwrap();
    assert_eq!(unchanged, Role::Admin);

    let group = service.group_snapshot(&group.id).await.unwrap();
    assert_eq!(group.member("bob").unwrap().role, Role::Admin);
}

#[tokio::test]
async fn test_set_role_cannot_demote_only_admin() {
    let service = create_test_service();
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

    let result = service.set_role(&group.id, "alice", Role::Member, "alice").await;
    assert!(matches!(result, Err(StokvelError::InvalidInput(_, _))));
}

#[tokio::test]
async fn test_transfer_admin_promotes_and_demotes_atomically() {
    let service = create_test_service();
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

    let group = service.transfer_admin(&group.id, "alice", "bob").await.unwrap();
    assert_eq!(group.member("bob").unwrap().role, Role::Admin);
    assert_eq!(group.member("alice").unwrap().role, Role::Member);

    // The demoted admin can no longer transfer back.
    let result = service.transfer_admin(&group.id, "alice", "alice").await;
    assert!(matches!(result, Err(StokvelError::NotAuthorized(_))));

    // Transferring to oneself is a no-op.
    let same = service.transfer_admin(&group.id, "bob", "bob").await.unwrap();
    assert_eq!(same.member("bob").unwrap().role, Role::Admin);
}

#[tokio::test]
async fn test_transfer_admin_to_unknown_member_fails() {
    let service = create_test_service();
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

    let result = service.transfer_admin(&group.id, "alice", "ghost").await;
    assert!(matches!(result, Err(StokvelError::MemberNotFound(_))));
}

#[tokio::test]
async fn test_archived_group_rejects_mutations_but_stays_readable() {
    let service = create_test_service();
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

    let archived = service.archive_group(&group.id, "alice").await.unwrap();
    assert_eq!(archived.status, GroupStatus::Archived);

    let contribution = service
        .record_contribution(&group.id, "alice", Decimal::from(100), None, "alice")
        .await;
    assert!(matches!(contribution, Err(StokvelError::GroupArchived(_))));

    let add = service.add_member(&group.id, profile("bob", "Bob"), Role::Member, "alice").await;
    assert!(matches!(add, Err(StokvelError::GroupArchived(_))));

    // History and snapshots survive archival; nothing is hard-deleted.
    let snapshot = service.group_snapshot(&group.id).await.unwrap();
    assert_eq!(snapshot.status, GroupStatus::Archived);
}

#[tokio::test]
async fn test_member_groups_lists_only_active_memberships() {
    let service = create_test_service();
    let first = service
        .create_group(
            "First".to_string(),
            String::new(),
            Decimal::from(100),
            None,
            profile("alice", "Alice"),
        )
        .await
        .unwrap();
    let second = service
        .create_group(
            "Second".to_string(),
            String::new(),
            Decimal::from(50),
            None,
            profile("bob", "Bob"),
        )
        .await
        .unwrap();
    service.add_member(&second.id, profile("alice", "Alice"), Role::Member, "bob").await.unwrap();

    let groups = service.member_groups("alice").await.unwrap();
    assert_eq!(groups.len(), 2);

    service.remove_member(&first.id, "alice", "alice").await.unwrap();
    let groups = service.member_groups("alice").await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].id, second.id);
}
