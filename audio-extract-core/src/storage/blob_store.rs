use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::models::error::ExtractError;

/// Revocable reference to a blob held by a [`BlobStore`] (`blob:<uuid>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRef(String);

impl ResourceRef {
    fn generate() -> Self {
        Self(format!("blob:{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable bytes plus their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub bytes: Arc<[u8]>,
    pub mime_type: String,
}

#[derive(Default)]
struct StoreInner {
    blobs: HashMap<ResourceRef, Blob>,
    revocations: HashMap<ResourceRef, u32>,
}

/// Session-scoped registry of revocable blob references.
///
/// Every `create` must eventually be matched by one `revoke`, otherwise the
/// bytes stay alive for the rest of the session. Nothing is ever written to
/// disk.
#[derive(Default)]
pub struct BlobStore {
    inner: Mutex<StoreInner>,
}

impl BlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` and return a fresh reference to them.
    pub fn create(&self, bytes: impl Into<Arc<[u8]>>, mime_type: &str) -> ResourceRef {
        let reference = ResourceRef::generate();
        let blob = Blob {
            bytes: bytes.into(),
            mime_type: mime_type.to_string(),
        };
        log::debug!("created {} ({} bytes, {})", reference, blob.bytes.len(), mime_type);
        self.inner.lock().blobs.insert(reference.clone(), blob);
        reference
    }

    pub fn resolve(&self, reference: &ResourceRef) -> Result<Blob, ExtractError> {
        self.inner
            .lock()
            .blobs
            .get(reference)
            .cloned()
            .ok_or_else(|| ExtractError::Storage(format!("unknown or revoked resource: {}", reference)))
    }

    /// Release the blob behind `reference`.
    ///
    /// Returns true only for the call that actually released it.
    pub fn revoke(&self, reference: &ResourceRef) -> bool {
        let mut inner = self.inner.lock();
        *inner.revocations.entry(reference.clone()).or_insert(0) += 1;
        let released = inner.blobs.remove(reference).is_some();
        if released {
            log::debug!("revoked {}", reference);
        } else {
            log::warn!("revoke of unknown or already revoked resource {}", reference);
        }
        released
    }

    pub fn is_live(&self, reference: &ResourceRef) -> bool {
        self.inner.lock().blobs.contains_key(reference)
    }

    /// Number of references not yet revoked.
    pub fn live_count(&self) -> usize {
        self.inner.lock().blobs.len()
    }

    /// How many times `revoke` has been called for `reference`.
    pub fn revocation_count(&self, reference: &ResourceRef) -> u32 {
        self.inner
            .lock()
            .revocations
            .get(reference)
            .copied()
            .unwrap_or(0)
    }
}
