//! The closed capability set and role tags used by authorization.
//!
//! Permission checks are data, not inheritance: a role is a preset
//! permission map applied when an account is constructed or promoted, so no
//! role-specific code path exists at check time.

use serde::{Deserialize, Serialize};

/// One capability a [`Principal`](super::Principal) may or may not hold.
///
/// The set is process-wide and immutable; it is the key type for every
/// permission map in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Register new sales.
    PerformSale,
    /// View the product list and on-hand quantities.
    ViewInventory,
    /// Add or remove stock of existing products.
    ManageInventory,
    /// Register new products in the catalog.
    RegisterProduct,
    /// Manage other accounts: register, activate/deactivate, edit grants.
    ManageAccounts,
}

impl Permission {
    /// Every known permission, in a stable order.
    pub const ALL: [Self; 5] = [
        Self::PerformSale,
        Self::ViewInventory,
        Self::ManageInventory,
        Self::RegisterProduct,
        Self::ManageAccounts,
    ];

    /// Human-readable label suitable for display surfaces.
    pub fn label(self) -> &'static str {
        match self {
            Self::PerformSale => "Perform Sales",
            Self::ViewInventory => "View Inventory",
            Self::ManageInventory => "Manage Inventory",
            Self::RegisterProduct => "Register Products",
            Self::ManageAccounts => "Manage Accounts",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Role tag carried by every [`Principal`](super::Principal).
///
/// Exactly one of a closed two-tier set. The tag only matters when an
/// account is constructed or its role changes: a [`Role::Manager`] is seeded
/// with every permission, a [`Role::Clerk`] with the standard grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Standard role: sells and views inventory by default.
    Clerk,
    /// Administrative role: holds every permission.
    Manager,
}

impl Role {
    /// Whether the role is the administrative tier.
    pub fn is_administrative(self) -> bool {
        matches!(self, Self::Manager)
    }
}
