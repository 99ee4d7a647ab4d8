//! Authentication and authorization for every privileged operation.
//!
//! Authorization is a data lookup, not a type hierarchy: [`authorize`] reads
//! the principal's permission map and [`require`] turns a missing grant into
//! an [`ErrorCode::AccessDenied`](super::ErrorCode::AccessDenied) failure.
//! Every entry point that mutates shared state calls [`require`] before any
//! side effect.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;

use crate::domain::auth::LoginCredentials;
use crate::domain::error::Error;
use crate::domain::permission::Permission;
use crate::domain::ports::{
    PasswordHashError, PasswordHasher, PrincipalStore, PrincipalStoreError,
};
use crate::domain::principal::{LoginName, Principal, PrincipalId};

/// Whether `principal` holds `permission`.
///
/// Pure lookup in the permission map, defaulting to `false` when the entry
/// is absent. Roles are never consulted here.
pub fn authorize(principal: &Principal, permission: Permission) -> bool {
    principal.has_permission(permission)
}

/// Fail with `AccessDenied` unless `principal` holds `permission`.
///
/// The error carries the human-readable label of the missing permission so
/// calling layers can surface it directly.
pub fn require(principal: &Principal, permission: Permission) -> Result<(), Error> {
    if authorize(principal, permission) {
        return Ok(());
    }
    Err(
        Error::access_denied(format!("missing permission: {}", permission.label()))
            .with_details(json!({ "permission": permission.label() })),
    )
}

/// Authentication and roster management over a [`PrincipalStore`].
pub struct AccessService<P, H> {
    principals: Arc<P>,
    hasher: Arc<H>,
}

// Manual impl: cloning shares the collaborators and needs no `Clone` bounds.
impl<P, H> Clone for AccessService<P, H> {
    fn clone(&self) -> Self {
        Self {
            principals: Arc::clone(&self.principals),
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<P, H> AccessService<P, H> {
    /// Create a new service over the given store and credential primitive.
    pub fn new(principals: Arc<P>, hasher: Arc<H>) -> Self {
        Self { principals, hasher }
    }
}

impl<P, H> AccessService<P, H>
where
    P: PrincipalStore,
    H: PasswordHasher,
{
    fn map_store_error(error: PrincipalStoreError) -> Error {
        Error::storage(error.to_string())
    }

    fn map_hash_error(error: PasswordHashError) -> Error {
        Error::storage(error.to_string())
    }

    /// Resolve and verify a login.
    ///
    /// Fails with `NotFound` when no account carries the login name,
    /// `AccountInactive` when the account is deactivated (checked before the
    /// digest so a deactivated account never exercises verification), and
    /// `InvalidCredentials` when the digest does not verify. This is the
    /// only place plaintext credentials are handled.
    pub async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Principal, Error> {
        let login = LoginName::new(credentials.login_name())
            .map_err(|err| Error::invalid_argument(err.to_string()))?;
        let principal = self
            .principals
            .find_by_login_name(&login)
            .await
            .map_err(Self::map_store_error)?
            .ok_or_else(|| Error::not_found(format!("no account with login name {login}")))?;

        if !principal.is_active() {
            return Err(Error::account_inactive(format!(
                "account {} is deactivated",
                principal.id()
            )));
        }

        let verified = self
            .hasher
            .verify(credentials.password(), principal.credential_digest())
            .map_err(Self::map_hash_error)?;
        if !verified {
            return Err(Error::invalid_credentials("login name or password is wrong"));
        }

        Ok(principal)
    }

    /// Register a new account.
    ///
    /// Requires [`Permission::ManageAccounts`]; fails with
    /// `DuplicateIdentifier` when the identifier is already on the roster.
    pub async fn register_account(
        &self,
        acting: &Principal,
        new_principal: &Principal,
    ) -> Result<(), Error> {
        require(acting, Permission::ManageAccounts)?;

        let existing = self
            .principals
            .find_by_id(new_principal.id())
            .await
            .map_err(Self::map_store_error)?;
        if existing.is_some() {
            return Err(Error::duplicate_identifier(format!(
                "account identifier {} is already registered",
                new_principal.id()
            )));
        }

        self.principals
            .save(new_principal)
            .await
            .map_err(Self::map_store_error)?;
        tracing::info!(
            actor = %acting.id(),
            account = %new_principal.id(),
            role = ?new_principal.role(),
            "account registered"
        );
        Ok(())
    }

    /// Activate or deactivate an account.
    ///
    /// Requires [`Permission::ManageAccounts`]. Self-deactivation and
    /// deactivating an administrative account both fail with
    /// `InvalidOperation`; reactivating yourself is allowed.
    pub async fn set_active(
        &self,
        acting: &Principal,
        target: PrincipalId,
        active: bool,
    ) -> Result<(), Error> {
        require(acting, Permission::ManageAccounts)?;

        if acting.id() == target && !active {
            return Err(Error::invalid_operation(
                "an account cannot deactivate itself",
            ));
        }

        let mut principal = self
            .principals
            .find_by_id(target)
            .await
            .map_err(Self::map_store_error)?
            .ok_or_else(|| Error::not_found(format!("no account with identifier {target}")))?;

        if principal.role().is_administrative() && !active {
            return Err(Error::invalid_operation(
                "administrative accounts cannot be deactivated",
            ));
        }

        principal.set_active(active);
        self.principals
            .save(&principal)
            .await
            .map_err(Self::map_store_error)?;
        tracing::info!(actor = %acting.id(), account = %target, active, "account status changed");
        Ok(())
    }

    /// Replace an account's permission map wholesale.
    ///
    /// Requires [`Permission::ManageAccounts`]. The replacement is not
    /// merged with the existing grants; entries missing from `permissions`
    /// become `false`.
    pub async fn update_permissions(
        &self,
        acting: &Principal,
        target: PrincipalId,
        permissions: HashMap<Permission, bool>,
    ) -> Result<(), Error> {
        require(acting, Permission::ManageAccounts)?;

        let mut principal = self
            .principals
            .find_by_id(target)
            .await
            .map_err(Self::map_store_error)?
            .ok_or_else(|| Error::not_found(format!("no account with identifier {target}")))?;

        principal.replace_permissions(permissions);
        self.principals
            .save(&principal)
            .await
            .map_err(Self::map_store_error)?;
        tracing::info!(actor = %acting.id(), account = %target, "permissions replaced");
        Ok(())
    }

    /// Every account on the roster.
    ///
    /// Requires [`Permission::ManageAccounts`]; only the management surface
    /// ever lists accounts.
    pub async fn list_accounts(&self, acting: &Principal) -> Result<Vec<Principal>, Error> {
        require(acting, Permission::ManageAccounts)?;
        self.principals
            .list_all()
            .await
            .map_err(Self::map_store_error)
    }
}
