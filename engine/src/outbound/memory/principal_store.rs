//! In-memory account roster adapter.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{PrincipalStore, PrincipalStoreError};
use crate::domain::principal::{LoginName, Principal, PrincipalId};

/// Principal store over a guarded map keyed by identifier.
///
/// Login-name lookups scan the map, mirroring the secondary-index query the
/// network store runs.
#[derive(Debug, Default)]
pub struct MemoryPrincipalStore {
    rows: RwLock<HashMap<PrincipalId, Principal>>,
}

impl MemoryPrincipalStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PrincipalStore for MemoryPrincipalStore {
    async fn find_by_login_name(
        &self,
        login_name: &LoginName,
    ) -> Result<Option<Principal>, PrincipalStoreError> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .find(|principal| principal.login_name() == login_name)
            .cloned())
    }

    async fn find_by_id(
        &self,
        id: PrincipalId,
    ) -> Result<Option<Principal>, PrincipalStoreError> {
        let rows = self.rows.read().await;
        Ok(rows.get(&id).cloned())
    }

    async fn save(&self, principal: &Principal) -> Result<(), PrincipalStoreError> {
        let mut rows = self.rows.write().await;
        rows.insert(principal.id(), principal.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Principal>, PrincipalStoreError> {
        let rows = self.rows.read().await;
        let mut all: Vec<Principal> = rows.values().cloned().collect();
        all.sort_by_key(Principal::id);
        Ok(all)
    }
}
