use sha2::{Digest, Sha256};

use crate::models::artifact::ArtifactMetadata;
use crate::models::error::ExtractError;

/// SHA-256 hex digest of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Serialize artifact metadata as pretty-printed JSON.
pub fn encode_metadata(metadata: &ArtifactMetadata) -> Result<String, ExtractError> {
    serde_json::to_string_pretty(metadata)
        .map_err(|e| ExtractError::Storage(format!("failed to serialize metadata: {}", e)))
}

pub fn decode_metadata(json: &str) -> Result<ArtifactMetadata, ExtractError> {
    serde_json::from_str(json).map_err(|e| ExtractError::Storage(format!("failed to parse metadata: {}", e)))
}
