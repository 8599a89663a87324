//! WAV container helpers.
//!
//! The recorder streams a header with placeholder sizes in front of the
//! first chunk; once every chunk has been concatenated the sizes are patched
//! in place.

use crate::models::audio_models::StreamFormat;
use crate::models::error::ExtractError;

/// Size of the standard WAV RIFF header in bytes.
pub const WAV_HEADER_SIZE: usize = 44;

/// Generate a 44-byte PCM WAV header.
///
/// Layout:
/// ```text
/// [0-3]    "RIFF"
/// [4-7]    file size - 8 (36 + data_size)
/// [8-11]   "WAVE"
/// [12-15]  "fmt "
/// [16-19]  16 (PCM format chunk size)
/// [20-21]  1 (PCM format code)
/// [22-23]  channels
/// [24-27]  sample_rate
/// [28-31]  byte_rate = sample_rate * channels * bit_depth / 8
/// [32-33]  block_align = channels * bit_depth / 8
/// [34-35]  bit_depth
/// [36-39]  "data"
/// [40-43]  data_size
/// ```
pub fn generate_wav_header(format: StreamFormat, bit_depth: u16, data_size: u32) -> [u8; WAV_HEADER_SIZE] {
    let byte_rate = format.sample_rate * format.channels as u32 * bit_depth as u32 / 8;
    let block_align = format.channels * bit_depth / 8;
    let chunk_size = 36u32.saturating_add(data_size);

    let mut header = [0u8; WAV_HEADER_SIZE];

    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&chunk_size.to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");

    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes());
    header[20..22].copy_from_slice(&1u16.to_le_bytes());
    header[22..24].copy_from_slice(&format.channels.to_le_bytes());
    header[24..28].copy_from_slice(&format.sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&byte_rate.to_le_bytes());
    header[32..34].copy_from_slice(&block_align.to_le_bytes());
    header[34..36].copy_from_slice(&bit_depth.to_le_bytes());

    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_size.to_le_bytes());

    header
}

/// Patch the RIFF chunk size (offset 4) and data size (offset 40) of a
/// complete in-memory WAV file from its actual length.
pub fn patch_sizes(file: &mut [u8]) -> Result<(), ExtractError> {
    if file.len() < WAV_HEADER_SIZE || &file[0..4] != b"RIFF" || &file[36..40] != b"data" {
        return Err(ExtractError::Encoding("buffer does not start with a WAV header".into()));
    }
    let total = u32::try_from(file.len())
        .map_err(|_| ExtractError::Encoding("WAV output exceeds 4 GiB".into()))?;

    let chunk_size = total - 8;
    let data_size = total - WAV_HEADER_SIZE as u32;
    file[4..8].copy_from_slice(&chunk_size.to_le_bytes());
    file[40..44].copy_from_slice(&data_size.to_le_bytes());
    Ok(())
}

/// Read the format and declared data size back from a WAV header.
pub fn parse_header(file: &[u8]) -> Option<(StreamFormat, u16, u32)> {
    if file.len() < WAV_HEADER_SIZE || &file[0..4] != b"RIFF" || &file[8..12] != b"WAVE" {
        return None;
    }
    let channels = u16::from_le_bytes([file[22], file[23]]);
    let sample_rate = u32::from_le_bytes([file[24], file[25], file[26], file[27]]);
    let bit_depth = u16::from_le_bytes([file[34], file[35]]);
    let data_size = u32::from_le_bytes([file[40], file[41], file[42], file[43]]);
    Some((StreamFormat::new(sample_rate, channels), bit_depth, data_size))
}
