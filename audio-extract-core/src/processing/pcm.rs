//! Pure-math PCM helpers: channel remixing, streaming resampling, 16-bit conversion.
//!
//! All operations work on interleaved `&[f32]` buffers with no platform
//! dependencies.

use crate::models::audio_models::StreamFormat;

/// Converts captured buffers to the recording's output format.
///
/// `None` targets keep the corresponding property of the incoming stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PcmConverter {
    pub target_sample_rate: Option<u32>,
    pub target_channels: Option<u16>,
}

impl PcmConverter {
    pub fn new(target_sample_rate: Option<u32>, target_channels: Option<u16>) -> Self {
        Self {
            target_sample_rate,
            target_channels,
        }
    }

    /// Output format for a stream arriving in `input`.
    pub fn output_format(&self, input: StreamFormat) -> StreamFormat {
        StreamFormat {
            sample_rate: self.target_sample_rate.unwrap_or(input.sample_rate),
            channels: self.target_channels.unwrap_or(input.channels),
        }
    }

    /// Resampler from `input` to the rate of `output`, over `output`'s channel layout.
    pub fn resampler(&self, input: StreamFormat, output: StreamFormat) -> StreamResampler {
        StreamResampler::new(output.channels, input.sample_rate, output.sample_rate)
    }
}

/// Change the channel count of interleaved audio.
///
/// Many → mono averages every frame; mono → many duplicates the sample;
/// any other pair maps output channel `c` onto input channel `c % from`.
pub fn remix(samples: &[f32], from: u16, to: u16) -> Vec<f32> {
    if from == to || from == 0 || to == 0 {
        return samples.to_vec();
    }
    if to == 1 {
        return downmix_to_mono(samples, from as usize);
    }

    let from = from as usize;
    let to = to as usize;
    let frame_count = samples.len() / from;
    let mut output = Vec::with_capacity(frame_count * to);
    for frame in 0..frame_count {
        for ch in 0..to {
            output.push(samples[frame * from + ch % from]);
        }
    }
    output
}

/// Downmix interleaved multi-channel audio to mono by averaging channels per frame.
pub fn downmix_to_mono(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    let frame_count = samples.len() / channels;
    let scale = 1.0 / channels as f32;
    samples
        .chunks_exact(channels)
        .take(frame_count)
        .map(|frame| frame.iter().sum::<f32>() * scale)
        .collect()
}

/// Streaming linear-interpolation resampler for interleaved audio.
///
/// The read position and the last input frame carry over between calls, so
/// splitting a stream into buffers of any size yields the same output as
/// resampling it in one piece. Call [`flush`](Self::flush) at the end of the
/// stream to emit the frames that still depend on the held frame.
#[derive(Debug, Clone)]
pub struct StreamResampler {
    channels: usize,
    source_rate: u32,
    target_rate: u32,
    /// Next read position in input frames, scaled by `target_rate`.
    /// Frame 0 is the held frame when there is one.
    position: u64,
    /// Last input frame of the previous buffer (empty before the first buffer).
    held: Vec<f32>,
}

impl StreamResampler {
    pub fn new(channels: u16, source_rate: u32, target_rate: u32) -> Self {
        Self {
            channels: channels as usize,
            source_rate,
            target_rate,
            position: 0,
            held: Vec::new(),
        }
    }

    pub fn source_rate(&self) -> u32 {
        self.source_rate
    }

    fn is_passthrough(&self) -> bool {
        self.source_rate == self.target_rate || self.source_rate == 0 || self.target_rate == 0 || self.channels == 0
    }

    /// Resample the next buffer of the stream. Trailing partial frames are ignored.
    pub fn process(&mut self, samples: &[f32]) -> Vec<f32> {
        if self.is_passthrough() {
            return samples.to_vec();
        }

        let channels = self.channels;
        let incoming = samples.len() / channels;
        if incoming == 0 {
            return Vec::new();
        }

        let held = std::mem::take(&mut self.held);
        let total = held.len() / channels + incoming;
        let scale = self.target_rate as u64;
        let step = self.source_rate as u64;

        let mut output = Vec::with_capacity((incoming * scale as usize / step as usize + 2) * channels);
        while (self.position / scale) as usize + 1 < total {
            let index = (self.position / scale) as usize;
            let fraction = (self.position % scale) as f32 / scale as f32;
            let a = frame_at(&held, samples, channels, index);
            let b = frame_at(&held, samples, channels, index + 1);
            for ch in 0..channels {
                output.push(a[ch] * (1.0 - fraction) + b[ch] * fraction);
            }
            self.position += step;
        }

        self.position -= (total as u64 - 1) * scale;
        self.held = frame_at(&held, samples, channels, total - 1).to_vec();
        output
    }

    /// Emit the output frames left between the held frame and the end of the stream.
    pub fn flush(&mut self) -> Vec<f32> {
        let mut output = Vec::new();
        if self.is_passthrough() || self.held.is_empty() {
            return output;
        }
        while self.position < self.target_rate as u64 {
            output.extend_from_slice(&self.held);
            self.position += self.source_rate as u64;
        }
        self.held.clear();
        self.position = 0;
        output
    }
}

/// Frame `index` of the held frame followed by `samples`.
fn frame_at<'a>(held: &'a [f32], samples: &'a [f32], channels: usize, index: usize) -> &'a [f32] {
    let held_frames = held.len() / channels;
    if index < held_frames {
        &held[index * channels..(index + 1) * channels]
    } else {
        let start = (index - held_frames) * channels;
        &samples[start..start + channels]
    }
}

/// Convert f32 samples `[-1.0, 1.0]` to 16-bit PCM (little-endian bytes).
///
/// Clamps out-of-range values. Output length = `samples.len() * 2` bytes.
pub fn convert_to_int16_pcm(samples: &[f32]) -> Vec<u8> {
    let mut data = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        let clamped = sample.clamp(-1.0, 1.0);
        let int16_value = (clamped * i16::MAX as f32) as i16;
        data.extend_from_slice(&int16_value.to_le_bytes());
    }
    data
}
