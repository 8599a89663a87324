//! Headless playback surface that decodes blobs with symphonia.
//!
//! Playback runs on a dedicated thread. Decoded buffers are delivered to the
//! connected audio output at the configured pace. Ended listeners fire once
//! the decoder reaches the end of the source; error listeners fire instead
//! when decoding fails partway through.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use audio_extract_core::{
    AudioBufferCallback, BlobStore, ExtractError, ListenerId, OutputTapId, PlaybackEndedCallback,
    PlaybackErrorCallback, PlaybackSurface, ResourceRef, SurfaceId,
};
use parking_lot::Mutex;

use crate::config::{Pacing, SurfaceConfig};
use crate::decode::SourceDecoder;

/// Longest single sleep while pacing, so a pause is noticed promptly.
const PACING_SLICE: Duration = Duration::from_millis(20);

#[derive(Default)]
struct SurfaceShared {
    source: Option<ResourceRef>,
    playing: bool,
    ended: bool,
    position_frames: u64,
    /// Bumped on every `play`; a playback thread stops once its run is stale.
    run_id: u64,
    outputs: Vec<(OutputTapId, AudioBufferCallback)>,
    listeners: Vec<(ListenerId, PlaybackEndedCallback)>,
    error_listeners: Vec<(ListenerId, PlaybackErrorCallback)>,
    next_id: u64,
}

impl SurfaceShared {
    fn is_current(&self, run_id: u64) -> bool {
        self.playing && self.run_id == run_id
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Playback surface backed by a [`BlobStore`] and symphonia decoding.
///
/// A surface routes its audio to at most one output at a time, mirroring a
/// media element that can only feed a single capture graph.
pub struct DecodedPlaybackSurface {
    id: SurfaceId,
    store: Arc<BlobStore>,
    config: SurfaceConfig,
    shared: Arc<Mutex<SurfaceShared>>,
    playback_handle: Mutex<Option<thread::JoinHandle<()>>>,
}

impl DecodedPlaybackSurface {
    pub fn new(store: Arc<BlobStore>, config: SurfaceConfig) -> Result<Self, ExtractError> {
        config.validate().map_err(ExtractError::Configuration)?;
        Ok(Self {
            id: SurfaceId::next(),
            store,
            config,
            shared: Arc::new(Mutex::new(SurfaceShared::default())),
            playback_handle: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Frames delivered since the source was bound or playback restarted.
    pub fn position_frames(&self) -> u64 {
        self.shared.lock().position_frames
    }

    pub fn has_ended(&self) -> bool {
        self.shared.lock().ended
    }

    pub fn has_audio_output(&self) -> bool {
        !self.shared.lock().outputs.is_empty()
    }

    pub fn ended_listener_count(&self) -> usize {
        self.shared.lock().listeners.len()
    }

    pub fn error_listener_count(&self) -> usize {
        self.shared.lock().error_listeners.len()
    }

    fn join_playback_thread(&self) {
        let handle = self.playback_handle.lock().take();
        if let Some(handle) = handle {
            // Pausing from inside an output or ended callback: the thread
            // exits on its own once it sees its run is stale.
            if handle.thread().id() == thread::current().id() {
                return;
            }
            if handle.join().is_err() {
                log::error!("playback thread panicked");
            }
        }
    }
}

impl PlaybackSurface for DecodedPlaybackSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn set_source(&self, source: Option<&ResourceRef>) -> Result<(), ExtractError> {
        if let Some(reference) = source {
            if !self.store.is_live(reference) {
                return Err(ExtractError::InvalidSource(format!("{} is not a live resource", reference)));
            }
        }
        self.pause();

        let mut shared = self.shared.lock();
        shared.source = source.cloned();
        shared.position_frames = 0;
        shared.ended = false;
        Ok(())
    }

    fn source(&self) -> Option<ResourceRef> {
        self.shared.lock().source.clone()
    }

    fn play(&self) -> Result<(), ExtractError> {
        if self.shared.lock().playing {
            return Ok(());
        }
        // A previous run has finished or been paused; reap its thread.
        self.join_playback_thread();

        let (source, start_frame) = {
            let mut shared = self.shared.lock();
            if shared.playing {
                return Ok(());
            }
            let source = shared
                .source
                .clone()
                .ok_or_else(|| ExtractError::Playback("no source bound to the surface".into()))?;
            if shared.ended {
                shared.ended = false;
                shared.position_frames = 0;
            }
            (source, shared.position_frames)
        };

        let blob = self
            .store
            .resolve(&source)
            .map_err(|e| ExtractError::Playback(e.to_string()))?;
        let decoder = SourceDecoder::open(blob.bytes, Some(blob.mime_type.as_str()))?;

        let run_id = {
            let mut shared = self.shared.lock();
            if shared.playing {
                return Ok(());
            }
            shared.playing = true;
            shared.run_id += 1;
            shared.run_id
        };

        let shared = Arc::clone(&self.shared);
        let pacing = self.config.pacing;
        let handle = thread::Builder::new()
            .name("symphonia-playback".into())
            .spawn(move || playback_loop(decoder, shared, run_id, start_frame, pacing))
            .map_err(|e| {
                self.shared.lock().playing = false;
                ExtractError::Playback(format!("failed to spawn playback thread: {}", e))
            })?;

        *self.playback_handle.lock() = Some(handle);
        log::debug!("playback of {} started at frame {}", source, start_frame);
        Ok(())
    }

    fn pause(&self) {
        self.shared.lock().playing = false;
        self.join_playback_thread();
    }

    fn is_playing(&self) -> bool {
        self.shared.lock().playing
    }

    fn add_ended_listener(&self, callback: PlaybackEndedCallback) -> ListenerId {
        let mut shared = self.shared.lock();
        let id = ListenerId(shared.next_id());
        shared.listeners.push((id, callback));
        id
    }

    fn remove_ended_listener(&self, id: ListenerId) -> bool {
        let mut shared = self.shared.lock();
        let before = shared.listeners.len();
        shared.listeners.retain(|(listener, _)| *listener != id);
        shared.listeners.len() != before
    }

    fn add_error_listener(&self, callback: PlaybackErrorCallback) -> ListenerId {
        let mut shared = self.shared.lock();
        let id = ListenerId(shared.next_id());
        shared.error_listeners.push((id, callback));
        id
    }

    fn remove_error_listener(&self, id: ListenerId) -> bool {
        let mut shared = self.shared.lock();
        let before = shared.error_listeners.len();
        shared.error_listeners.retain(|(listener, _)| *listener != id);
        shared.error_listeners.len() != before
    }

    fn connect_audio_output(&self, callback: AudioBufferCallback) -> Result<OutputTapId, ExtractError> {
        let mut shared = self.shared.lock();
        if !shared.outputs.is_empty() {
            return Err(ExtractError::GraphAttach(
                "surface audio output is already connected".into(),
            ));
        }
        let tap = OutputTapId(shared.next_id());
        shared.outputs.push((tap, callback));
        Ok(tap)
    }

    fn disconnect_audio_output(&self, tap: OutputTapId) -> bool {
        let mut shared = self.shared.lock();
        let before = shared.outputs.len();
        shared.outputs.retain(|(id, _)| *id != tap);
        shared.outputs.len() != before
    }
}

impl Drop for DecodedPlaybackSurface {
    fn drop(&mut self) {
        self.pause();
    }
}

/// Playback loop running on the `symphonia-playback` thread.
///
/// Frames before `start_frame` were delivered by an earlier run and are
/// skipped. A decode failure stops the run and notifies the error listeners
/// instead of the ended listeners.
fn playback_loop(
    mut decoder: SourceDecoder,
    shared: Arc<Mutex<SurfaceShared>>,
    run_id: u64,
    start_frame: u64,
    pacing: Pacing,
) {
    let started = Instant::now();
    let mut decoded_frames = 0u64;
    let mut played_secs = 0.0f64;

    loop {
        let buffer = match decoder.next_buffer() {
            Ok(Some(buffer)) => buffer,
            Ok(None) => break,
            Err(e) => {
                log::error!("playback stopped early: {}", e);
                notify_failure(&shared, run_id, &e);
                return;
            }
        };

        let channels = buffer.channels.max(1) as usize;
        let buffer_start = decoded_frames;
        decoded_frames += buffer.frames() as u64;
        if decoded_frames <= start_frame {
            continue;
        }
        let skip = start_frame.saturating_sub(buffer_start) as usize * channels;
        let samples = &buffer.samples[skip..];

        let outputs: Vec<AudioBufferCallback> = {
            let shared = shared.lock();
            if !shared.is_current(run_id) {
                return;
            }
            shared.outputs.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        for output in &outputs {
            output(samples, buffer.sample_rate, buffer.channels);
        }

        let delivered = (samples.len() / channels) as u64;
        {
            let mut shared = shared.lock();
            if shared.run_id != run_id {
                return;
            }
            shared.position_frames += delivered;
        }

        if buffer.sample_rate > 0 {
            played_secs += delivered as f64 / buffer.sample_rate as f64;
        }
        if let Some(target) = pacing.wall_clock_for(played_secs) {
            if !sleep_until(started + target, &shared, run_id) {
                return;
            }
        }
    }

    let listeners: Vec<PlaybackEndedCallback> = {
        let mut shared = shared.lock();
        if !shared.is_current(run_id) {
            return;
        }
        shared.playing = false;
        shared.ended = true;
        shared.listeners.iter().map(|(_, cb)| Arc::clone(cb)).collect()
    };
    log::debug!("playback reached the end after {} frames", decoded_frames);
    for listener in listeners {
        listener();
    }
}

fn notify_failure(shared: &Mutex<SurfaceShared>, run_id: u64, error: &ExtractError) {
    let listeners: Vec<PlaybackErrorCallback> = {
        let mut shared = shared.lock();
        if !shared.is_current(run_id) {
            return;
        }
        shared.playing = false;
        shared.error_listeners.iter().map(|(_, cb)| Arc::clone(cb)).collect()
    };
    for listener in listeners {
        listener(error);
    }
}

/// Sleep until `deadline` in short slices. Returns false once the run is stale.
fn sleep_until(deadline: Instant, shared: &Mutex<SurfaceShared>, run_id: u64) -> bool {
    loop {
        if !shared.lock().is_current(run_id) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep((deadline - now).min(PACING_SLICE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> (Arc<BlobStore>, DecodedPlaybackSurface) {
        let store = Arc::new(BlobStore::new());
        let surface = DecodedPlaybackSurface::new(Arc::clone(&store), SurfaceConfig::unpaced()).unwrap();
        (store, surface)
    }

    #[test]
    fn play_without_source_fails() {
        let (_, surface) = surface();
        assert!(matches!(surface.play(), Err(ExtractError::Playback(_))));
        assert!(!surface.is_playing());
    }

    #[test]
    fn revoked_reference_is_rejected() {
        let (store, surface) = surface();
        let reference = store.create(vec![1u8, 2, 3], "video/mp4");
        store.revoke(&reference);
        assert!(matches!(
            surface.set_source(Some(&reference)),
            Err(ExtractError::InvalidSource(_))
        ));
        assert!(surface.source().is_none());
    }

    #[test]
    fn undecodable_source_fails_to_play() {
        let (store, surface) = surface();
        let reference = store.create(vec![0u8; 64], "video/mp4");
        surface.set_source(Some(&reference)).unwrap();
        assert!(matches!(surface.play(), Err(ExtractError::Playback(_))));
        assert!(!surface.is_playing());
    }

    #[test]
    fn only_one_output_at_a_time() {
        let (_, surface) = surface();
        let noop: AudioBufferCallback = Arc::new(|_, _, _| {});
        let tap = surface.connect_audio_output(Arc::clone(&noop)).unwrap();
        assert!(matches!(
            surface.connect_audio_output(Arc::clone(&noop)),
            Err(ExtractError::GraphAttach(_))
        ));
        assert!(surface.disconnect_audio_output(tap));
        assert!(!surface.disconnect_audio_output(tap));
        assert!(surface.connect_audio_output(noop).is_ok());
    }

    #[test]
    fn listeners_are_removed_by_id() {
        let (_, surface) = surface();
        let first = surface.add_ended_listener(Arc::new(|| {}));
        let second = surface.add_ended_listener(Arc::new(|| {}));
        assert_ne!(first, second);
        assert!(surface.remove_ended_listener(first));
        assert!(!surface.remove_ended_listener(first));
        assert_eq!(surface.ended_listener_count(), 1);

        let on_error = surface.add_error_listener(Arc::new(|_: &ExtractError| {}));
        assert_ne!(on_error, second);
        assert!(!surface.remove_ended_listener(on_error));
        assert!(surface.remove_error_listener(on_error));
        assert_eq!(surface.error_listener_count(), 0);
    }

    #[test]
    fn rejects_invalid_config() {
        let store = Arc::new(BlobStore::new());
        let config = SurfaceConfig {
            pacing: Pacing::Accelerated(-1.0),
        };
        assert!(matches!(
            DecodedPlaybackSurface::new(store, config),
            Err(ExtractError::Configuration(_))
        ));
    }
}
