//! In-memory implementation of the Registry trait.
//!
//! Records live for the lifetime of the registry. The map is split into
//! shards, each behind its own `RwLock`, so concurrent issuance workers and
//! verify requests rarely contend on the same lock.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use eventeye_core::{VerificationRecord, VerificationToken};

use crate::error::{RegistryError, Result};
use crate::traits::Registry;

/// Default number of shards.
pub const DEFAULT_SHARDS: usize = 16;

type Shard = RwLock<HashMap<VerificationToken, VerificationRecord>>;

/// Lock-striped in-memory registry.
pub struct MemoryRegistry {
    shards: Vec<Shard>,
}

impl MemoryRegistry {
    /// Create a new empty registry with [`DEFAULT_SHARDS`] shards.
    pub fn new() -> Self {
        Self::with_shards(DEFAULT_SHARDS)
    }

    /// Create a registry with a specific shard count (at least one).
    pub fn with_shards(count: usize) -> Self {
        let shards = (0..count.max(1))
            .map(|_| RwLock::new(HashMap::new()))
            .collect();
        Self { shards }
    }

    /// Number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    // Tokens are uniformly random, so their leading bytes spread evenly.
    fn shard(&self, token: &VerificationToken) -> &Shard {
        let bytes = token.as_bytes();
        let key = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;
        &self.shards[key % self.shards.len()]
    }
}

impl Default for MemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Registry for MemoryRegistry {
    async fn register(
        &self,
        token: &VerificationToken,
        record: &VerificationRecord,
    ) -> Result<()> {
        let mut shard = self
            .shard(token)
            .write()
            .map_err(|_| RegistryError::LockPoisoned)?;

        if shard.contains_key(token) {
            return Err(RegistryError::DuplicateToken(*token));
        }
        shard.insert(*token, record.clone());
        Ok(())
    }

    async fn lookup(&self, token: &VerificationToken) -> Result<Option<VerificationRecord>> {
        let shard = self
            .shard(token)
            .read()
            .map_err(|_| RegistryError::LockPoisoned)?;
        Ok(shard.get(token).cloned())
    }

    async fn len(&self) -> Result<usize> {
        let mut total = 0;
        for shard in &self.shards {
            total += shard.read().map_err(|_| RegistryError::LockPoisoned)?.len();
        }
        Ok(total)
    }
}
