use std::sync::Arc;

use crate::loader::sniff;
use crate::models::error::ExtractError;
use crate::models::media::{MediaHandle, SourceFile};
use crate::storage::blob_store::BlobStore;

/// Label used when the file name reduces to nothing (e.g. `.mp4`).
const FALLBACK_LABEL: &str = "audio";

/// Binds selected files to revocable references the playback surface can consume.
///
/// The loader never decodes. Revoking a superseded handle is the caller's job.
pub struct MediaLoader {
    store: Arc<BlobStore>,
}

impl MediaLoader {
    pub fn new(store: Arc<BlobStore>) -> Self {
        Self { store }
    }

    pub fn load(&self, file: SourceFile) -> Result<MediaHandle, ExtractError> {
        if file.bytes.is_empty() {
            return Err(ExtractError::InvalidSource(format!("{} is empty", file.name)));
        }

        let mime_type = match file.mime_type.as_deref() {
            Some(declared) if sniff::is_media_mime(declared) => declared.to_string(),
            Some(declared) => {
                return Err(ExtractError::InvalidSource(format!(
                    "{} is not a media type ({})",
                    file.name, declared
                )))
            }
            None => sniff::sniff_container(&file.bytes)
                .ok_or_else(|| {
                    ExtractError::InvalidSource(format!("{} has no recognizable media container", file.name))
                })?
                .to_string(),
        };

        let mut label = sniff::derive_label(&file.name);
        if label.is_empty() {
            label = FALLBACK_LABEL.to_string();
        }

        let byte_len = file.bytes.len();
        let source_ref = self.store.create(file.bytes, &mime_type);
        log::info!("loaded {} as {} ({}, {} bytes)", file.name, source_ref, mime_type, byte_len);

        Ok(MediaHandle {
            source_ref,
            label,
            file_name: file.name,
            mime_type,
            byte_len,
        })
    }
}
