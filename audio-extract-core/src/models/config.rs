use super::audio_models::OutputFormat;
use crate::processing::encoders;
use crate::traits::audio_encoder::AudioEncoder;

/// Configuration for an extraction.
#[derive(Clone)]
pub struct ExtractionConfig {
    /// Container written by the built-in encoders (default: WAV).
    pub output_format: OutputFormat,

    /// Custom encoder; overrides `output_format` when set.
    pub encoder: Option<Box<dyn AudioEncoder>>,

    /// Output sample rate in Hz, or None to keep the source rate.
    pub sample_rate: Option<u32>,

    /// Output channel count (1 or 2), or None to keep the source layout.
    pub channels: Option<u16>,

    /// Audio duration covered by each recorded chunk, in milliseconds (default: 1000).
    pub timeslice_ms: u64,

    /// Appended to the source label to build the artifact name (default: "-audio").
    pub name_suffix: String,
}

impl ExtractionConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.timeslice_ms == 0 {
            return Err("timeslice must be positive".into());
        }
        if let Some(rate) = self.sample_rate {
            if rate == 0 {
                return Err("sample rate must be positive".into());
            }
        }
        if let Some(channels) = self.channels {
            if ![1, 2].contains(&channels) {
                return Err(format!("unsupported channel count: {}", channels));
            }
        }
        if self.name_suffix.contains('/') {
            return Err(format!("name suffix must not contain '/': {}", self.name_suffix));
        }
        Ok(())
    }

    /// A fresh encoder for one recording session.
    pub fn make_encoder(&self) -> Box<dyn AudioEncoder> {
        match &self.encoder {
            Some(encoder) => encoder.clone(),
            None => encoders::encoder_for(self.output_format),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Wav,
            encoder: None,
            sample_rate: None,
            channels: None,
            timeslice_ms: 1000,
            name_suffix: "-audio".into(),
        }
    }
}
