//! Tests for authentication and roster management.

use std::collections::HashMap;
use std::sync::Arc;

use rstest::{fixture, rstest};

use crate::domain::auth::LoginCredentials;
use crate::domain::error::ErrorCode;
use crate::domain::permission::{Permission, Role};
use crate::domain::ports::{MockPasswordHasher, MockPrincipalStore};
use crate::domain::principal::{LoginName, Principal, PrincipalId};

use super::access_service::{AccessService, authorize, require};

fn principal(id: u32, login: &str, role: Role) -> Principal {
    Principal::new(
        PrincipalId::new(id),
        format!("Account {id}"),
        LoginName::new(login).expect("valid login"),
        format!("digest::{login}"),
        role,
    )
    .expect("valid principal")
}

#[fixture]
fn manager() -> Principal {
    principal(1, "gerente", Role::Manager)
}

#[fixture]
fn clerk() -> Principal {
    principal(101, "atendente", Role::Clerk)
}

fn service(
    store: MockPrincipalStore,
    hasher: MockPasswordHasher,
) -> AccessService<MockPrincipalStore, MockPasswordHasher> {
    AccessService::new(Arc::new(store), Arc::new(hasher))
}

fn credentials(login: &str, password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts(login, password).expect("valid credentials")
}

#[rstest]
fn authorize_reads_the_stored_map(mut clerk: Principal) {
    assert!(authorize(&clerk, Permission::PerformSale));
    assert!(!authorize(&clerk, Permission::ManageAccounts));

    clerk.replace_permissions(HashMap::from([(Permission::ManageAccounts, true)]));
    assert!(authorize(&clerk, Permission::ManageAccounts));
    assert!(!authorize(&clerk, Permission::PerformSale));
}

#[rstest]
fn require_names_the_missing_permission(clerk: Principal) {
    let err = require(&clerk, Permission::ManageAccounts).expect_err("clerk lacks the grant");
    assert_eq!(err.code(), ErrorCode::AccessDenied);
    assert!(err.message().contains("Manage Accounts"));
    assert_eq!(
        err.details().and_then(|d| d.get("permission")),
        Some(&serde_json::json!("Manage Accounts"))
    );
}

#[tokio::test]
async fn authenticate_returns_the_full_principal() {
    let stored = principal(101, "atendente", Role::Clerk);
    let mut store = MockPrincipalStore::new();
    let expected = stored.clone();
    store
        .expect_find_by_login_name()
        .times(1)
        .return_once(move |_| Ok(Some(stored)));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .withf(|plain, digest| plain == "s3cret" && digest == "digest::atendente")
        .times(1)
        .returning(|_, _| Ok(true));

    let authenticated = service(store, hasher)
        .authenticate(&credentials("atendente", "s3cret"))
        .await
        .expect("authentication succeeds");
    assert_eq!(authenticated, expected);
}

#[tokio::test]
async fn authenticate_misses_unknown_logins() {
    let mut store = MockPrincipalStore::new();
    store
        .expect_find_by_login_name()
        .times(1)
        .returning(|_| Ok(None));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().times(0);

    let err = service(store, hasher)
        .authenticate(&credentials("ghost", "pw"))
        .await
        .expect_err("unknown login must fail");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn authenticate_rejects_inactive_accounts_before_verification() {
    let mut stored = principal(101, "atendente", Role::Clerk);
    stored.set_active(false);
    let mut store = MockPrincipalStore::new();
    store
        .expect_find_by_login_name()
        .times(1)
        .return_once(move |_| Ok(Some(stored)));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().times(0);

    let err = service(store, hasher)
        .authenticate(&credentials("atendente", "s3cret"))
        .await
        .expect_err("inactive account must fail");
    assert_eq!(err.code(), ErrorCode::AccountInactive);
}

#[tokio::test]
async fn authenticate_rejects_wrong_passwords() {
    let stored = principal(101, "atendente", Role::Clerk);
    let mut store = MockPrincipalStore::new();
    store
        .expect_find_by_login_name()
        .times(1)
        .return_once(move |_| Ok(Some(stored)));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().times(1).returning(|_, _| Ok(false));

    let err = service(store, hasher)
        .authenticate(&credentials("atendente", "wrong"))
        .await
        .expect_err("wrong password must fail");
    assert_eq!(err.code(), ErrorCode::InvalidCredentials);
}

#[tokio::test]
async fn clerks_cannot_register_accounts() {
    let clerk = principal(101, "atendente", Role::Clerk);
    let candidate = principal(102, "nova", Role::Clerk);
    let mut store = MockPrincipalStore::new();
    store.expect_find_by_id().times(0);
    store.expect_save().times(0);

    let err = service(store, MockPasswordHasher::new())
        .register_account(&clerk, &candidate)
        .await
        .expect_err("clerk lacks manage-accounts");
    assert_eq!(err.code(), ErrorCode::AccessDenied);
}

#[tokio::test]
async fn managers_register_new_accounts() {
    let manager = principal(1, "gerente", Role::Manager);
    let candidate = principal(102, "nova", Role::Clerk);
    let mut store = MockPrincipalStore::new();
    store.expect_find_by_id().times(1).returning(|_| Ok(None));
    store
        .expect_save()
        .withf(|saved: &Principal| saved.id() == PrincipalId::new(102))
        .times(1)
        .returning(|_| Ok(()));

    service(store, MockPasswordHasher::new())
        .register_account(&manager, &candidate)
        .await
        .expect("registration succeeds");
}

#[tokio::test]
async fn duplicate_identifiers_are_rejected() {
    let manager = principal(1, "gerente", Role::Manager);
    let candidate = principal(101, "nova", Role::Clerk);
    let occupant = principal(101, "atendente", Role::Clerk);
    let mut store = MockPrincipalStore::new();
    store
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(occupant)));
    store.expect_save().times(0);

    let err = service(store, MockPasswordHasher::new())
        .register_account(&manager, &candidate)
        .await
        .expect_err("identifier is taken");
    assert_eq!(err.code(), ErrorCode::DuplicateIdentifier);
}

#[tokio::test]
async fn self_deactivation_is_forbidden() {
    let manager = principal(1, "gerente", Role::Manager);
    let mut store = MockPrincipalStore::new();
    store.expect_find_by_id().times(0);
    store.expect_save().times(0);

    let err = service(store, MockPasswordHasher::new())
        .set_active(&manager, PrincipalId::new(1), false)
        .await
        .expect_err("self-deactivation must fail");
    assert_eq!(err.code(), ErrorCode::InvalidOperation);
}

#[tokio::test]
async fn administrative_accounts_cannot_be_deactivated() {
    let manager = principal(1, "gerente", Role::Manager);
    let other_manager = principal(2, "chefe", Role::Manager);
    let mut store = MockPrincipalStore::new();
    store
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(other_manager)));
    store.expect_save().times(0);

    let err = service(store, MockPasswordHasher::new())
        .set_active(&manager, PrincipalId::new(2), false)
        .await
        .expect_err("administrative target must fail");
    assert_eq!(err.code(), ErrorCode::InvalidOperation);
}

#[tokio::test]
async fn deactivation_persists_the_toggled_flag() {
    let manager = principal(1, "gerente", Role::Manager);
    let clerk = principal(101, "atendente", Role::Clerk);
    let mut store = MockPrincipalStore::new();
    store
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(clerk)));
    store
        .expect_save()
        .withf(|saved: &Principal| !saved.is_active())
        .times(1)
        .returning(|_| Ok(()));

    service(store, MockPasswordHasher::new())
        .set_active(&manager, PrincipalId::new(101), false)
        .await
        .expect("deactivation succeeds");
}

#[tokio::test]
async fn missing_targets_are_not_found() {
    let manager = principal(1, "gerente", Role::Manager);
    let mut store = MockPrincipalStore::new();
    store.expect_find_by_id().times(1).returning(|_| Ok(None));
    store.expect_save().times(0);

    let err = service(store, MockPasswordHasher::new())
        .set_active(&manager, PrincipalId::new(999), false)
        .await
        .expect_err("unknown target must fail");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn permission_updates_replace_the_map_wholesale() {
    let manager = principal(1, "gerente", Role::Manager);
    let clerk = principal(101, "atendente", Role::Clerk);
    let mut store = MockPrincipalStore::new();
    store
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(clerk)));
    store
        .expect_save()
        .withf(|saved: &Principal| {
            saved.has_permission(Permission::ManageInventory)
                && !saved.has_permission(Permission::PerformSale)
                && Permission::ALL
                    .iter()
                    .all(|p| saved.permissions().contains_key(p))
        })
        .times(1)
        .returning(|_| Ok(()));

    service(store, MockPasswordHasher::new())
        .update_permissions(
            &manager,
            PrincipalId::new(101),
            HashMap::from([(Permission::ManageInventory, true)]),
        )
        .await
        .expect("permission update succeeds");
}

#[rstest]
#[tokio::test]
async fn the_roster_is_only_listed_with_manage_accounts(clerk: Principal, manager: Principal) {
    let roster = vec![manager.clone(), clerk.clone()];
    let mut store = MockPrincipalStore::new();
    store
        .expect_list_all()
        .times(1)
        .return_once(move || Ok(roster));

    let access = service(store, MockPasswordHasher::new());
    let err = access
        .list_accounts(&clerk)
        .await
        .expect_err("clerk cannot list the roster");
    assert_eq!(err.code(), ErrorCode::AccessDenied);

    let listed = access
        .list_accounts(&manager)
        .await
        .expect("manager lists the roster");
    assert_eq!(listed.len(), 2);
}
