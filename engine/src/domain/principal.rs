//! Principal data model: an authenticated actor and its permission map.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::permission::{Permission, Role};

/// Validation errors returned by the [`Principal`] constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrincipalValidationError {
    /// Display name was blank once trimmed.
    EmptyDisplayName,
    /// Login name was blank once trimmed.
    EmptyLoginName,
    /// Login name carried surrounding whitespace.
    LoginNamePadded,
    /// Credential digest was blank.
    EmptyCredentialDigest,
}

impl fmt::Display for PrincipalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDisplayName => write!(f, "display name must not be empty"),
            Self::EmptyLoginName => write!(f, "login name must not be empty"),
            Self::LoginNamePadded => {
                write!(f, "login name must not contain surrounding whitespace")
            }
            Self::EmptyCredentialDigest => write!(f, "credential digest must not be empty"),
        }
    }
}

impl std::error::Error for PrincipalValidationError {}

/// Stable numeric account identifier (the employee number on the badge).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PrincipalId(u32);

impl PrincipalId {
    /// Wrap a raw employee number.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// The raw numeric value.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PrincipalId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Unique login name used for authentication lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LoginName(String);

impl LoginName {
    /// Validate and construct a [`LoginName`].
    pub fn new(value: impl Into<String>) -> Result<Self, PrincipalValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(PrincipalValidationError::EmptyLoginName);
        }
        if raw.trim() != raw {
            return Err(PrincipalValidationError::LoginNamePadded);
        }
        Ok(Self(raw))
    }

    /// Borrow the login name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for LoginName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for LoginName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LoginName> for String {
    fn from(value: LoginName) -> Self {
        value.0
    }
}

impl TryFrom<String> for LoginName {
    type Error = PrincipalValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// An authenticated actor: identity, credential digest, role, permissions.
///
/// ## Invariants
/// - The permission map holds an entry for every known [`Permission`];
///   lookups still default to `false` when a key is absent.
/// - A [`Role::Manager`] holds every permission, applied at construction and
///   re-applied on promotion — never re-derived at check time.
/// - `credential_digest` is a hash produced by the credential port; the
///   entity never sees plaintext.
///
/// Accounts are soft-deactivated through the `active` flag and never hard
/// deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "PrincipalDto", into = "PrincipalDto")]
pub struct Principal {
    id: PrincipalId,
    display_name: String,
    login_name: LoginName,
    credential_digest: String,
    role: Role,
    permissions: HashMap<Permission, bool>,
    active: bool,
}

impl Principal {
    /// Build a new account with the permission grants its role implies.
    pub fn new(
        id: PrincipalId,
        display_name: impl Into<String>,
        login_name: LoginName,
        credential_digest: impl Into<String>,
        role: Role,
    ) -> Result<Self, PrincipalValidationError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(PrincipalValidationError::EmptyDisplayName);
        }
        let credential_digest = credential_digest.into();
        if credential_digest.is_empty() {
            return Err(PrincipalValidationError::EmptyCredentialDigest);
        }

        Ok(Self {
            id,
            display_name,
            login_name,
            credential_digest,
            role,
            permissions: Self::grants_for(role),
            active: true,
        })
    }

    /// Stable account identifier.
    pub fn id(&self) -> PrincipalId {
        self.id
    }

    /// Full display name.
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Login name used for authentication lookups.
    pub fn login_name(&self) -> &LoginName {
        &self.login_name
    }

    /// Stored credential digest. Never plaintext.
    pub fn credential_digest(&self) -> &str {
        self.credential_digest.as_str()
    }

    /// Role tag.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether the account may authenticate.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The full permission map.
    pub fn permissions(&self) -> &HashMap<Permission, bool> {
        &self.permissions
    }

    /// Whether the account holds `permission`, defaulting to `false` when
    /// the entry is absent.
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.get(&permission).copied().unwrap_or(false)
    }

    /// Change the role, re-seeding the grants the new role implies.
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.permissions = Self::grants_for(role);
    }

    /// Toggle the active flag.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Replace the permission map wholesale.
    ///
    /// The replacement is normalised so every known [`Permission`] keeps an
    /// entry; permissions missing from `permissions` become `false`.
    pub fn replace_permissions(&mut self, permissions: HashMap<Permission, bool>) {
        self.permissions = Self::normalize(permissions);
    }

    /// Replace the stored credential digest.
    pub fn set_credential_digest(
        &mut self,
        digest: impl Into<String>,
    ) -> Result<(), PrincipalValidationError> {
        let digest = digest.into();
        if digest.is_empty() {
            return Err(PrincipalValidationError::EmptyCredentialDigest);
        }
        self.credential_digest = digest;
        Ok(())
    }

    /// The grants a freshly constructed account of `role` receives.
    ///
    /// Clerks sell and view inventory; managers hold everything.
    fn grants_for(role: Role) -> HashMap<Permission, bool> {
        Permission::ALL
            .into_iter()
            .map(|permission| {
                let granted = role.is_administrative()
                    || matches!(
                        permission,
                        Permission::PerformSale | Permission::ViewInventory
                    );
                (permission, granted)
            })
            .collect()
    }

    fn normalize(mut permissions: HashMap<Permission, bool>) -> HashMap<Permission, bool> {
        for permission in Permission::ALL {
            permissions.entry(permission).or_insert(false);
        }
        permissions
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrincipalDto {
    id: PrincipalId,
    display_name: String,
    login_name: String,
    credential_digest: String,
    role: Role,
    permissions: HashMap<Permission, bool>,
    active: bool,
}

impl From<Principal> for PrincipalDto {
    fn from(value: Principal) -> Self {
        let Principal {
            id,
            display_name,
            login_name,
            credential_digest,
            role,
            permissions,
            active,
        } = value;
        Self {
            id,
            display_name,
            login_name: login_name.into(),
            credential_digest,
            role,
            permissions,
            active,
        }
    }
}

impl TryFrom<PrincipalDto> for Principal {
    type Error = PrincipalValidationError;

    fn try_from(value: PrincipalDto) -> Result<Self, Self::Error> {
        let PrincipalDto {
            id,
            display_name,
            login_name,
            credential_digest,
            role,
            permissions,
            active,
        } = value;

        let mut principal = Principal::new(
            id,
            display_name,
            LoginName::new(login_name)?,
            credential_digest,
            role,
        )?;
        principal.replace_permissions(permissions);
        principal.active = active;
        Ok(principal)
    }
}

#[cfg(test)]
mod tests;
