use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::audio_models::StreamFormat;
use crate::storage::blob_store::ResourceRef;

/// Finalized output of a recording session, before it is published to the blob store.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedAudio {
    /// Concatenation of every recorded chunk, in delivery order.
    pub bytes: Arc<[u8]>,
    pub mime_type: String,
    pub extension: String,
    pub format: StreamFormat,
    pub duration_secs: f64,
    pub chunk_count: usize,
}

/// The published result of a successful extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedArtifact {
    pub resource_ref: ResourceRef,
    /// Source label plus the configured suffix, without extension.
    pub suggested_name: String,
    pub mime_type: String,
    pub extension: String,
    pub duration_secs: f64,
    pub chunk_count: usize,
    pub byte_len: usize,
    pub metadata: ArtifactMetadata,
}

impl ExtractedArtifact {
    /// File name a download trigger should save the artifact under.
    pub fn file_name(&self) -> String {
        if self.extension.is_empty() {
            return self.suggested_name.clone();
        }
        format!("{}.{}", self.suggested_name, self.extension)
    }
}

/// Descriptive record of an artifact.
///
/// Serializable for hand-off to a frontend or an export step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub id: String,
    pub created_at: String,
    pub source_label: String,
    pub mime_type: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub duration_secs: f64,
    pub chunk_count: usize,
    pub byte_len: usize,
    pub checksum: String,
}

impl ArtifactMetadata {
    pub fn new(source_label: &str, audio: &RecordedAudio, checksum: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            source_label: source_label.to_string(),
            mime_type: audio.mime_type.clone(),
            sample_rate: audio.format.sample_rate,
            channels: audio.format.channels,
            duration_secs: audio.duration_secs,
            chunk_count: audio.chunk_count,
            byte_len: audio.bytes.len(),
            checksum: checksum.to_string(),
        }
    }
}

/// Everything an external download trigger needs to save the artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactDownload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Arc<[u8]>,
}
