use serde::{Deserialize, Serialize};

/// Sample rate and interleaved channel count of a PCM stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamFormat {
    pub sample_rate: u32,
    pub channels: u16,
}

impl StreamFormat {
    pub fn new(sample_rate: u32, channels: u16) -> Self {
        Self {
            sample_rate,
            channels,
        }
    }

    /// Number of whole frames contained in `samples` interleaved samples.
    pub fn frames_in(&self, samples: usize) -> u64 {
        if self.channels == 0 {
            return 0;
        }
        (samples / self.channels as usize) as u64
    }

    /// Duration in seconds of `frames` frames at this rate.
    pub fn duration_secs(&self, frames: u64) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        frames as f64 / self.sample_rate as f64
    }
}

/// Container produced by the built-in encoders.
///
/// The declared MIME type always describes the bytes actually written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// RIFF/WAVE with 16-bit little-endian PCM.
    #[default]
    Wav,
    /// Headerless 16-bit little-endian PCM.
    RawPcm,
}

impl OutputFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::RawPcm => "audio/L16",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::RawPcm => "pcm",
        }
    }
}
