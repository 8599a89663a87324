use crate::models::audio_models::StreamFormat;
use crate::models::error::ExtractError;

/// Turns captured PCM into an audio container, chunk by chunk.
///
/// The recorder writes `header` in front of the first chunk, `encode`s every
/// buffer, concatenates all chunks on stop and hands the result to
/// `finalize` for any size fields that are only known at the end.
pub trait AudioEncoder: Send + Sync {
    fn mime_type(&self) -> &str;

    /// File extension without the leading dot.
    fn extension(&self) -> &str;

    /// Bytes opening the container. Empty for headerless formats.
    fn header(&self, format: StreamFormat) -> Vec<u8>;

    /// Encode interleaved f32 samples.
    fn encode(&self, samples: &[f32]) -> Vec<u8>;

    /// Patch the assembled container in place.
    fn finalize(&self, assembled: &mut [u8], format: StreamFormat) -> Result<(), ExtractError>;

    fn clone_box(&self) -> Box<dyn AudioEncoder>;
}

impl Clone for Box<dyn AudioEncoder> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
