//! Tests for the principal entity and its permission map invariants.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn clerk() -> Principal {
    Principal::new(
        PrincipalId::new(101),
        "Andreisy Neves",
        LoginName::new("andreisy").expect("valid login"),
        "digest::clerk",
        Role::Clerk,
    )
    .expect("valid clerk")
}

#[fixture]
fn manager() -> Principal {
    Principal::new(
        PrincipalId::new(1),
        "Isabella Paranhos",
        LoginName::new("isabella").expect("valid login"),
        "digest::manager",
        Role::Manager,
    )
    .expect("valid manager")
}

#[rstest]
fn clerk_receives_the_standard_grants(clerk: Principal) {
    assert!(clerk.has_permission(Permission::PerformSale));
    assert!(clerk.has_permission(Permission::ViewInventory));
    assert!(!clerk.has_permission(Permission::ManageInventory));
    assert!(!clerk.has_permission(Permission::RegisterProduct));
    assert!(!clerk.has_permission(Permission::ManageAccounts));
}

#[rstest]
fn permission_map_always_covers_every_permission(clerk: Principal) {
    for permission in Permission::ALL {
        assert!(
            clerk.permissions().contains_key(&permission),
            "missing entry for {permission:?}"
        );
    }
}

#[rstest]
fn manager_holds_every_permission_after_construction(manager: Principal) {
    for permission in Permission::ALL {
        assert!(manager.has_permission(permission), "{permission:?} denied");
    }
}

#[rstest]
fn promotion_reapplies_the_administrative_grants(mut clerk: Principal) {
    clerk.set_role(Role::Manager);
    for permission in Permission::ALL {
        assert!(clerk.has_permission(permission), "{permission:?} denied");
    }
}

#[rstest]
fn demotion_reseeds_the_standard_grants(mut manager: Principal) {
    manager.set_role(Role::Clerk);
    assert!(manager.has_permission(Permission::PerformSale));
    assert!(!manager.has_permission(Permission::ManageAccounts));
}

#[rstest]
fn replacement_maps_are_normalised(mut clerk: Principal) {
    clerk.replace_permissions(HashMap::from([(Permission::ManageInventory, true)]));

    assert!(clerk.has_permission(Permission::ManageInventory));
    // Entries not named in the replacement exist and default to false.
    for permission in Permission::ALL {
        assert!(clerk.permissions().contains_key(&permission));
    }
    assert!(!clerk.has_permission(Permission::PerformSale));
}

#[rstest]
fn accounts_start_active_and_toggle(mut clerk: Principal) {
    assert!(clerk.is_active());
    clerk.set_active(false);
    assert!(!clerk.is_active());
}

#[rstest]
#[case("", "login", PrincipalValidationError::EmptyDisplayName)]
#[case("  ", "login", PrincipalValidationError::EmptyDisplayName)]
fn blank_display_names_are_rejected(
    #[case] display_name: &str,
    #[case] login: &str,
    #[case] expected: PrincipalValidationError,
) {
    let err = Principal::new(
        PrincipalId::new(7),
        display_name,
        LoginName::new(login).expect("valid login"),
        "digest",
        Role::Clerk,
    )
    .expect_err("blank display name must fail");
    assert_eq!(err, expected);
}

#[rstest]
#[case("", PrincipalValidationError::EmptyLoginName)]
#[case("   ", PrincipalValidationError::EmptyLoginName)]
#[case(" padded", PrincipalValidationError::LoginNamePadded)]
#[case("padded ", PrincipalValidationError::LoginNamePadded)]
fn malformed_login_names_are_rejected(
    #[case] login: &str,
    #[case] expected: PrincipalValidationError,
) {
    let err = LoginName::new(login).expect_err("malformed login must fail");
    assert_eq!(err, expected);
}

#[rstest]
fn empty_digests_are_rejected(mut clerk: Principal) {
    let err = clerk
        .set_credential_digest("")
        .expect_err("empty digest must fail");
    assert_eq!(err, PrincipalValidationError::EmptyCredentialDigest);
}

#[rstest]
fn serde_round_trip_preserves_grants_and_status(mut clerk: Principal) {
    clerk.replace_permissions(HashMap::from([
        (Permission::PerformSale, true),
        (Permission::ManageInventory, true),
    ]));
    clerk.set_active(false);

    let encoded = serde_json::to_string(&clerk).expect("principal serialises");
    let decoded: Principal = serde_json::from_str(&encoded).expect("principal deserialises");

    assert_eq!(decoded, clerk);
}

#[rstest]
fn deserialisation_normalises_partial_permission_maps() {
    let decoded: Principal = serde_json::from_str(
        r#"{
            "id": 9,
            "displayName": "Lorena Borges",
            "loginName": "lorena",
            "credentialDigest": "digest::x",
            "role": "clerk",
            "permissions": { "perform_sale": true },
            "active": true
        }"#,
    )
    .expect("principal deserialises");

    for permission in Permission::ALL {
        assert!(decoded.permissions().contains_key(&permission));
    }
    assert!(decoded.has_permission(Permission::PerformSale));
    assert!(!decoded.has_permission(Permission::ManageAccounts));
}

#[rstest]
fn stored_grants_win_over_role_seeding_on_deserialisation() {
    // A manager record whose stored map was edited stays as stored; the
    // all-true map is applied at construction and promotion only.
    let decoded: Principal = serde_json::from_str(
        r#"{
            "id": 2,
            "displayName": "Gerente",
            "loginName": "gerente",
            "credentialDigest": "digest::g",
            "role": "manager",
            "permissions": { "manage_accounts": false },
            "active": true
        }"#,
    )
    .expect("principal deserialises");

    assert!(!decoded.has_permission(Permission::ManageAccounts));
}
