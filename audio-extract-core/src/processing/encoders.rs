use crate::models::audio_models::{OutputFormat, StreamFormat};
use crate::models::error::ExtractError;
use crate::processing::{pcm, wav_format};
use crate::traits::audio_encoder::AudioEncoder;

/// RIFF/WAVE, 16-bit little-endian PCM.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavEncoder;

impl AudioEncoder for WavEncoder {
    fn mime_type(&self) -> &str {
        OutputFormat::Wav.mime_type()
    }

    fn extension(&self) -> &str {
        OutputFormat::Wav.extension()
    }

    fn header(&self, format: StreamFormat) -> Vec<u8> {
        // data size placeholder, patched in finalize
        wav_format::generate_wav_header(format, 16, 0).to_vec()
    }

    fn encode(&self, samples: &[f32]) -> Vec<u8> {
        pcm::convert_to_int16_pcm(samples)
    }

    fn finalize(&self, assembled: &mut [u8], _format: StreamFormat) -> Result<(), ExtractError> {
        wav_format::patch_sizes(assembled)
    }

    fn clone_box(&self) -> Box<dyn AudioEncoder> {
        Box::new(*self)
    }
}

/// Headerless 16-bit little-endian PCM.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawPcmEncoder;

impl AudioEncoder for RawPcmEncoder {
    fn mime_type(&self) -> &str {
        OutputFormat::RawPcm.mime_type()
    }

    fn extension(&self) -> &str {
        OutputFormat::RawPcm.extension()
    }

    fn header(&self, _format: StreamFormat) -> Vec<u8> {
        Vec::new()
    }

    fn encode(&self, samples: &[f32]) -> Vec<u8> {
        pcm::convert_to_int16_pcm(samples)
    }

    fn finalize(&self, _assembled: &mut [u8], _format: StreamFormat) -> Result<(), ExtractError> {
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn AudioEncoder> {
        Box::new(*self)
    }
}

/// Built-in encoder for `format`.
pub fn encoder_for(format: OutputFormat) -> Box<dyn AudioEncoder> {
    match format {
        OutputFormat::Wav => Box::new(WavEncoder),
        OutputFormat::RawPcm => Box::new(RawPcmEncoder),
    }
}
