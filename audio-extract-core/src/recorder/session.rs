use std::sync::Arc;

use parking_lot::Mutex;

use crate::graph::capture_stream::{CaptureStream, SubscriptionId};
use crate::models::artifact::RecordedAudio;
use crate::models::audio_models::StreamFormat;
use crate::models::config::ExtractionConfig;
use crate::models::error::ExtractError;
use crate::models::state::RecorderState;
use crate::processing::pcm::{self, PcmConverter, StreamResampler};
use crate::traits::audio_encoder::AudioEncoder;

/// State shared between the session and its stream subscription.
struct Shared {
    state: RecorderState,
    /// Encoded fragments in delivery order. Append-only.
    chunks: Vec<Vec<u8>>,
    /// Converted samples not yet covering a full timeslice.
    pending: Vec<f32>,
    /// Output format, fixed by the first delivered buffer.
    format: Option<StreamFormat>,
    /// Carries interpolation state across buffers; rebuilt if the input rate changes.
    resampler: Option<StreamResampler>,
    frames_recorded: u64,
}

impl Shared {
    fn new() -> Self {
        Self {
            state: RecorderState::Idle,
            chunks: Vec::new(),
            pending: Vec::new(),
            format: None,
            resampler: None,
            frames_recorded: 0,
        }
    }

    /// Convert one delivered buffer to the output format and queue it.
    fn ingest(&mut self, converter: &PcmConverter, samples: &[f32], input: StreamFormat) -> StreamFormat {
        let output = *self.format.get_or_insert_with(|| converter.output_format(input));
        let remixed = pcm::remix(samples, input.channels, output.channels);

        if self.resampler.as_ref().is_some_and(|r| r.source_rate() != input.sample_rate) {
            log::debug!("input rate changed to {} Hz", input.sample_rate);
            self.flush_resampler();
        }
        let resampler = self
            .resampler
            .get_or_insert_with(|| converter.resampler(input, output));
        let converted = resampler.process(&remixed);
        self.queue(&converted, output);
        output
    }

    /// Drain the frames the resampler is still holding back.
    fn flush_resampler(&mut self) {
        let (Some(mut resampler), Some(output)) = (self.resampler.take(), self.format) else {
            return;
        };
        let tail = resampler.flush();
        self.queue(&tail, output);
    }

    fn queue(&mut self, converted: &[f32], output: StreamFormat) {
        self.frames_recorded += output.frames_in(converted.len());
        self.pending.extend_from_slice(converted);
    }

    /// Encode `samples` as the next chunk; the container header leads the first one.
    fn emit_chunk(&mut self, encoder: &dyn AudioEncoder, samples: &[f32]) {
        let Some(format) = self.format else {
            return;
        };
        let mut chunk = if self.chunks.is_empty() {
            encoder.header(format)
        } else {
            Vec::new()
        };
        chunk.extend(encoder.encode(samples));
        self.chunks.push(chunk);
    }
}

/// Records a capture stream into encoded chunks and finalizes them into one artifact.
///
/// Chunks are cut every `timeslice_ms` of audio as buffers arrive; the
/// remainder is flushed when `stop` is observed.
pub struct RecordingSession {
    encoder: Box<dyn AudioEncoder>,
    converter: PcmConverter,
    timeslice_ms: u64,
    shared: Arc<Mutex<Shared>>,
    subscription: Option<(Arc<CaptureStream>, SubscriptionId)>,
    artifact: Option<RecordedAudio>,
}

impl RecordingSession {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            encoder: config.make_encoder(),
            converter: PcmConverter::new(config.sample_rate, config.channels),
            timeslice_ms: config.timeslice_ms.max(1),
            shared: Arc::new(Mutex::new(Shared::new())),
            subscription: None,
            artifact: None,
        }
    }

    /// Create a session and start it against `stream`.
    pub fn record(config: &ExtractionConfig, stream: &Arc<CaptureStream>) -> Result<Self, ExtractError> {
        let mut session = Self::new(config);
        session.start(stream)?;
        Ok(session)
    }

    pub fn state(&self) -> RecorderState {
        self.shared.lock().state
    }

    pub fn chunk_count(&self) -> usize {
        self.shared.lock().chunks.len()
    }

    /// Copy of the chunks recorded so far.
    pub fn chunks(&self) -> Vec<Vec<u8>> {
        self.shared.lock().chunks.clone()
    }

    /// The finalized artifact, present only once `complete`.
    pub fn artifact(&self) -> Option<&RecordedAudio> {
        self.artifact.as_ref()
    }

    /// Subscribe to `stream`. Transitions: idle → recording.
    pub fn start(&mut self, stream: &Arc<CaptureStream>) -> Result<(), ExtractError> {
        {
            let mut shared = self.shared.lock();
            match shared.state {
                RecorderState::Idle => {}
                RecorderState::Recording | RecorderState::Finalizing => {
                    return Err(ExtractError::RecorderState(format!(
                        "cannot start a session that is {:?}",
                        shared.state
                    )))
                }
                RecorderState::Complete | RecorderState::Failed => {
                    return Err(ExtractError::RecorderState(
                        "session already finished; start a new one".into(),
                    ))
                }
            }
            shared.state = RecorderState::Recording;
        }

        let shared = Arc::clone(&self.shared);
        let encoder = self.encoder.clone();
        let converter = self.converter;
        let timeslice_ms = self.timeslice_ms;

        let callback = Arc::new(move |samples: &[f32], sample_rate: u32, channels: u16| {
            let mut s = shared.lock();
            if s.state != RecorderState::Recording {
                return;
            }

            let output = s.ingest(&converter, samples, StreamFormat::new(sample_rate, channels));

            let slice_frames = (output.sample_rate as u64 * timeslice_ms / 1000).max(1);
            let slice_len = slice_frames as usize * output.channels.max(1) as usize;
            while s.pending.len() >= slice_len {
                let slice: Vec<f32> = s.pending.drain(..slice_len).collect();
                s.emit_chunk(encoder.as_ref(), &slice);
            }
        });

        let Some(id) = stream.subscribe(callback) else {
            self.shared.lock().state = RecorderState::Failed;
            return Err(ExtractError::RecorderState("capture stream is already closed".into()));
        };
        self.subscription = Some((Arc::clone(stream), id));
        log::debug!("recording started ({} ms timeslice)", self.timeslice_ms);
        Ok(())
    }

    /// Stop recording and assemble every chunk into one artifact.
    ///
    /// Transitions: recording → finalizing → complete, or → failed when no
    /// audio was delivered. On an already complete session this returns the
    /// existing artifact.
    pub fn stop(&mut self) -> Result<RecordedAudio, ExtractError> {
        match self.state() {
            RecorderState::Recording => {}
            RecorderState::Complete => {
                if let Some(artifact) = &self.artifact {
                    return Ok(artifact.clone());
                }
                return Err(ExtractError::RecorderState("complete session has no artifact".into()));
            }
            other => {
                return Err(ExtractError::RecorderState(format!(
                    "cannot stop a session that is {:?}",
                    other
                )))
            }
        }

        self.unsubscribe();

        let mut shared = self.shared.lock();
        shared.state = RecorderState::Finalizing;

        shared.flush_resampler();
        let remainder = std::mem::take(&mut shared.pending);
        if !remainder.is_empty() {
            shared.emit_chunk(self.encoder.as_ref(), &remainder);
        }

        let recorded_format = shared.format;
        let format = match recorded_format {
            Some(format) if !shared.chunks.is_empty() => format,
            _ => {
                shared.state = RecorderState::Failed;
                log::warn!("recording stopped before any audio was delivered");
                return Err(ExtractError::EmptyCapture);
            }
        };

        let total: usize = shared.chunks.iter().map(Vec::len).sum();
        let mut assembled = Vec::with_capacity(total);
        for chunk in &shared.chunks {
            assembled.extend_from_slice(chunk);
        }
        if let Err(e) = self.encoder.finalize(&mut assembled, format) {
            shared.state = RecorderState::Failed;
            return Err(e);
        }

        let audio = RecordedAudio {
            bytes: assembled.into(),
            mime_type: self.encoder.mime_type().to_string(),
            extension: self.encoder.extension().to_string(),
            format,
            duration_secs: format.duration_secs(shared.frames_recorded),
            chunk_count: shared.chunks.len(),
        };
        shared.state = RecorderState::Complete;
        drop(shared);

        log::info!(
            "recording finalized: {:.2}s, {} chunks, {} bytes",
            audio.duration_secs,
            audio.chunk_count,
            audio.bytes.len()
        );
        self.artifact = Some(audio.clone());
        Ok(audio)
    }

    /// Abandon the session without producing anything.
    pub fn discard(mut self) {
        self.unsubscribe();
        let mut shared = self.shared.lock();
        if shared.state.is_active() {
            log::debug!("discarding recording with {} chunks", shared.chunks.len());
            shared.state = RecorderState::Failed;
        }
        shared.pending.clear();
    }

    fn unsubscribe(&mut self) {
        if let Some((stream, id)) = self.subscription.take() {
            stream.unsubscribe(id);
        }
    }
}

impl Drop for RecordingSession {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
