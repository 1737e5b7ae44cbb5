//! Identity store interface.
//!
//! The store of record for accounts lives outside this workspace. Services
//! reach it through [`IdentityStore`]; [`StaticIdentityStore`] is a read-only
//! implementation loaded once from a JSON file of
//! `{"email", "password_hash", "role"}` objects.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use squadgate_core::AppError;

use crate::identity::IdentityRecord;

#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Looks up an account by its exact email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<IdentityRecord>, AppError>;
}

#[derive(Debug, Default)]
pub struct StaticIdentityStore {
    records: HashMap<String, IdentityRecord>,
}

impl StaticIdentityStore {
    pub fn from_records(records: impl IntoIterator<Item = IdentityRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.email().to_string(), record))
                .collect(),
        }
    }

    pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read identity file {}", path.display()))?;
        let records: Vec<IdentityRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse identity file {}", path.display()))?;

        tracing::info!(count = records.len(), "loaded identity records");
        Ok(Self::from_records(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl IdentityStore for StaticIdentityStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<IdentityRecord>, AppError> {
        Ok(self.records.get(email).cloned())
    }
}
