use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::graph::capture_graph::{CaptureGraph, CaptureGraphManager};
use crate::loader::media_loader::MediaLoader;
use crate::models::artifact::{ArtifactDownload, ArtifactMetadata, ExtractedArtifact, RecordedAudio};
use crate::models::config::ExtractionConfig;
use crate::models::error::ExtractError;
use crate::models::media::{MediaHandle, SourceFile};
use crate::models::state::ExtractionState;
use crate::recorder::session::RecordingSession;
use crate::storage::blob_store::BlobStore;
use crate::storage::metadata;
use crate::traits::extraction_delegate::ExtractionDelegate;
use crate::traits::playback_surface::{ListenerId, PlaybackSurface};

/// Asynchronous notifications queued by surface callbacks.
///
/// Every extraction gets a new generation; events carrying an older one
/// belong to a canceled extraction and are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionEvent {
    PlaybackEnded { generation: u64 },
    PlaybackFailed { generation: u64, error: ExtractError },
}

impl ExtractionEvent {
    pub fn generation(&self) -> u64 {
        match self {
            Self::PlaybackEnded { generation } | Self::PlaybackFailed { generation, .. } => *generation,
        }
    }
}

/// Coordinates loader, capture graph, recorder and playback into one extraction.
///
/// Data flow:
/// ```text
/// SourceFile → [MediaLoader] → MediaHandle ─→ surface.set_source
///                                              │
/// extract_audio: [CaptureGraphManager.attach] → [RecordingSession.start] → surface.play
///                                              │
/// playback ended → stop recording → pause → release graph → publish artifact
/// ```
///
/// The orchestrator exclusively owns the live graph and recording session.
/// Callbacks from the playback thread only enqueue [`ExtractionEvent`]s; state
/// changes happen when the owner calls [`process_events`](Self::process_events)
/// or [`wait_until_settled`](Self::wait_until_settled).
pub struct AudioExtractor {
    surface: Arc<dyn PlaybackSurface>,
    store: Arc<BlobStore>,
    loader: MediaLoader,
    graphs: CaptureGraphManager,
    config: ExtractionConfig,
    delegate: Option<Arc<dyn ExtractionDelegate>>,

    state: ExtractionState,
    media: Option<MediaHandle>,
    artifact: Option<ExtractedArtifact>,

    // Live capture resources, released together by `release_all`
    graph: Option<CaptureGraph>,
    recording: Option<RecordingSession>,
    ended_listener: Option<ListenerId>,
    error_listener: Option<ListenerId>,

    generation: u64,
    events_tx: Sender<ExtractionEvent>,
    events_rx: Receiver<ExtractionEvent>,
}

impl AudioExtractor {
    pub fn new(
        surface: Arc<dyn PlaybackSurface>,
        store: Arc<BlobStore>,
        config: ExtractionConfig,
    ) -> Result<Self, ExtractError> {
        config.validate().map_err(ExtractError::Configuration)?;

        let (events_tx, events_rx) = mpsc::channel();
        Ok(Self {
            surface,
            loader: MediaLoader::new(Arc::clone(&store)),
            store,
            graphs: CaptureGraphManager::new(),
            config,
            delegate: None,
            state: ExtractionState::Idle,
            media: None,
            artifact: None,
            graph: None,
            recording: None,
            ended_listener: None,
            error_listener: None,
            generation: 0,
            events_tx,
            events_rx,
        })
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn ExtractionDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn state(&self) -> &ExtractionState {
        &self.state
    }

    /// The currently loaded source.
    pub fn media(&self) -> Option<&MediaHandle> {
        self.media.as_ref()
    }

    /// The most recently published artifact.
    pub fn artifact(&self) -> Option<&ExtractedArtifact> {
        self.artifact.as_ref()
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<BlobStore> {
        &self.store
    }

    /// Whether a capture graph or recording session is currently live.
    pub fn has_live_capture(&self) -> bool {
        self.graph.is_some()
            || self.recording.is_some()
            || self.ended_listener.is_some()
            || self.error_listener.is_some()
    }

    /// Select a new source. Transitions: any → source_loaded, or → failed.
    ///
    /// Cancels an in-flight extraction and revokes the previous source and
    /// artifact before the new source is bound.
    pub fn load_source(&mut self, file: SourceFile) {
        if self.state.is_extracting() {
            log::info!("new source selected; canceling extraction #{}", self.generation);
        }
        self.release_all();
        self.revoke_artifact();
        self.revoke_media();

        let handle = match self.loader.load(file) {
            Ok(handle) => handle,
            Err(e) => {
                self.detach_surface_source();
                self.fail(e);
                return;
            }
        };

        if let Err(e) = self.surface.set_source(Some(&handle.source_ref)) {
            self.store.revoke(&handle.source_ref);
            self.fail(e);
            return;
        }

        self.media = Some(handle);
        self.set_state(ExtractionState::SourceLoaded);
    }

    /// Start extracting the loaded source. Returns immediately.
    ///
    /// Transitions: source_loaded / ready / failed → extracting, or → failed if
    /// the graph, recorder or playback cannot be started. Ignored without a
    /// loaded source or while already extracting.
    pub fn extract_audio(&mut self) {
        if !self.state.can_extract() {
            log::warn!("extract_audio ignored while {} (extraction #{})", self.state.name(), self.generation);
            return;
        }
        if self.media.is_none() {
            log::warn!("extract_audio ignored: no source loaded");
            return;
        }

        self.release_all();
        self.revoke_artifact();
        self.generation += 1;
        self.set_state(ExtractionState::Extracting);

        if let Err(e) = self.start_capture() {
            self.release_all();
            self.fail(e);
        }
    }

    /// Apply every queued event. Returns how many were handled.
    pub fn process_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Block until the orchestrator leaves `extracting` or `timeout` elapses.
    pub fn wait_until_settled(&mut self, timeout: Duration) -> &ExtractionState {
        let deadline = Instant::now() + timeout;
        self.process_events();
        while self.state.is_extracting() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match self.events_rx.recv_timeout(remaining) {
                Ok(event) => self.handle_event(event),
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        &self.state
    }

    pub fn handle_event(&mut self, event: ExtractionEvent) {
        if event.generation() != self.generation || !self.state.is_extracting() {
            log::debug!(
                "ignoring {:?} (current extraction #{}, {})",
                event,
                self.generation,
                self.state.name()
            );
            return;
        }
        match event {
            ExtractionEvent::PlaybackEnded { .. } => self.finish_extraction(),
            ExtractionEvent::PlaybackFailed { error, .. } => {
                log::warn!("extraction #{} aborted: {}", self.generation, error);
                self.release_all();
                self.fail(error);
            }
        }
    }

    /// Bytes and file name for the external download trigger.
    pub fn download(&self) -> Option<ArtifactDownload> {
        let artifact = self.artifact.as_ref()?;
        let blob = self.store.resolve(&artifact.resource_ref).ok()?;
        Some(ArtifactDownload {
            file_name: artifact.file_name(),
            mime_type: blob.mime_type,
            bytes: blob.bytes,
        })
    }

    /// Release every live capture resource. Idempotent.
    ///
    /// Order: playback listeners, recording session, playback, capture
    /// graph (source node before context).
    pub fn release_all(&mut self) {
        if let Some(listener) = self.ended_listener.take() {
            self.surface.remove_ended_listener(listener);
        }
        if let Some(listener) = self.error_listener.take() {
            self.surface.remove_error_listener(listener);
        }
        let had_capture = self.recording.is_some() || self.graph.is_some();
        if let Some(recording) = self.recording.take() {
            recording.discard();
        }
        if had_capture {
            self.surface.pause();
        }
        if let Some(mut graph) = self.graph.take() {
            self.graphs.release(&mut graph);
        }
    }

    /// Unmount: release capture, revoke the source and artifact, clear the surface.
    pub fn shutdown(&mut self) {
        self.teardown();
        if !self.state.is_idle() {
            self.set_state(ExtractionState::Idle);
        }
    }

    // --- Internal helpers ---

    fn start_capture(&mut self) -> Result<(), ExtractError> {
        let graph = self.graphs.attach(&self.surface)?;
        let stream = graph.stream();
        self.graph = Some(graph);

        self.recording = Some(RecordingSession::record(&self.config, &stream)?);

        let generation = self.generation;
        let events = self.events_tx.clone();
        let listener = self.surface.add_ended_listener(Arc::new(move || {
            let _ = events.send(ExtractionEvent::PlaybackEnded { generation });
        }));
        self.ended_listener = Some(listener);

        let events = self.events_tx.clone();
        let listener = self.surface.add_error_listener(Arc::new(move |error: &ExtractError| {
            let _ = events.send(ExtractionEvent::PlaybackFailed {
                generation,
                error: error.clone(),
            });
        }));
        self.error_listener = Some(listener);

        self.surface.play()?;
        log::info!("extraction #{} started", self.generation);
        Ok(())
    }

    fn finish_extraction(&mut self) {
        if let Some(graph) = &self.graph {
            log::debug!("{} delivered {} frames", graph.id(), graph.stream().frames_delivered());
        }
        let recorded = match self.recording.as_mut() {
            Some(recording) => recording.stop(),
            None => Err(ExtractError::RecorderState("no active recording".into())),
        };
        self.release_all();

        match recorded.map(|audio| self.publish(audio)) {
            Ok(artifact) => {
                log::info!("extraction #{} ready: {}", self.generation, artifact.file_name());
                self.artifact = Some(artifact.clone());
                if let Some(ref delegate) = self.delegate {
                    delegate.on_artifact_ready(&artifact);
                }
                self.set_state(ExtractionState::Ready(Box::new(artifact)));
            }
            Err(e) => self.fail(e),
        }
    }

    fn publish(&self, audio: RecordedAudio) -> ExtractedArtifact {
        let label = self.media.as_ref().map(|m| m.label.as_str()).unwrap_or("audio");
        let checksum = metadata::sha256_hex(&audio.bytes);
        let metadata = ArtifactMetadata::new(label, &audio, &checksum);
        let resource_ref = self.store.create(Arc::clone(&audio.bytes), &audio.mime_type);

        ExtractedArtifact {
            resource_ref,
            suggested_name: format!("{}{}", label, self.config.name_suffix),
            mime_type: audio.mime_type,
            extension: audio.extension,
            duration_secs: audio.duration_secs,
            chunk_count: audio.chunk_count,
            byte_len: audio.bytes.len(),
            metadata,
        }
    }

    fn teardown(&mut self) {
        self.release_all();
        self.revoke_artifact();
        if self.revoke_media() {
            self.detach_surface_source();
        }
    }

    fn revoke_artifact(&mut self) {
        if let Some(artifact) = self.artifact.take() {
            self.store.revoke(&artifact.resource_ref);
        }
    }

    fn revoke_media(&mut self) -> bool {
        match self.media.take() {
            Some(media) => {
                self.store.revoke(&media.source_ref);
                true
            }
            None => false,
        }
    }

    fn detach_surface_source(&self) {
        if let Err(e) = self.surface.set_source(None) {
            log::warn!("failed to clear playback surface source: {}", e);
        }
    }

    fn fail(&mut self, error: ExtractError) {
        log::error!("extraction failed: {}", error);
        if let Some(ref delegate) = self.delegate {
            delegate.on_error(&error);
        }
        self.set_state(ExtractionState::Failed(error));
    }

    fn set_state(&mut self, new_state: ExtractionState) {
        log::debug!("state {} → {}", self.state.name(), new_state.name());
        self.state = new_state;
        if let Some(ref delegate) = self.delegate {
            delegate.on_state_changed(&self.state);
        }
    }
}

impl Drop for AudioExtractor {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::wav_format;
    use crate::test_support::ScriptedSurface;
    use approx::assert_abs_diff_eq;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingDelegate {
        states: Mutex<Vec<&'static str>>,
        errors: Mutex<Vec<ExtractError>>,
        artifacts: Mutex<Vec<ExtractedArtifact>>,
    }

    impl ExtractionDelegate for RecordingDelegate {
        fn on_state_changed(&self, state: &ExtractionState) {
            self.states.lock().push(state.name());
        }

        fn on_error(&self, error: &ExtractError) {
            self.errors.lock().push(error.clone());
        }

        fn on_artifact_ready(&self, artifact: &ExtractedArtifact) {
            self.artifacts.lock().push(artifact.clone());
        }
    }

    struct Harness {
        surface: Arc<ScriptedSurface>,
        store: Arc<BlobStore>,
        delegate: Arc<RecordingDelegate>,
        extractor: AudioExtractor,
    }

    fn harness() -> Harness {
        let surface = ScriptedSurface::new();
        let store = Arc::new(BlobStore::new());
        let delegate = Arc::new(RecordingDelegate::default());
        let shared: Arc<dyn PlaybackSurface> = surface.clone();
        let mut extractor = AudioExtractor::new(shared, Arc::clone(&store), ExtractionConfig::default()).unwrap();
        extractor.set_delegate(delegate.clone());
        Harness {
            surface,
            store,
            delegate,
            extractor,
        }
    }

    fn video(name: &str) -> SourceFile {
        SourceFile::new(name, vec![0u8; 256]).with_mime_type("video/mp4")
    }

    /// One second of 8 kHz mono silence.
    fn one_second(surface: &ScriptedSurface) {
        surface.emit(&[0.0; 8000], 8000, 1);
    }

    #[test]
    fn full_extraction_walks_idle_to_ready() {
        let mut h = harness();
        assert!(h.extractor.state().is_idle());

        h.extractor.load_source(video("holiday.mp4"));
        h.extractor.extract_audio();
        assert!(h.surface.is_playing());
        for _ in 0..3 {
            one_second(&h.surface);
        }
        h.surface.finish();
        assert_eq!(h.extractor.process_events(), 1);

        assert_eq!(*h.delegate.states.lock(), vec!["source_loaded", "extracting", "ready"]);
        let artifact = h.extractor.state().artifact().cloned().unwrap();
        assert_abs_diff_eq!(artifact.duration_secs, 3.0, epsilon = 1e-9);
        assert_eq!(artifact.chunk_count, 3);
        assert_eq!(artifact.suggested_name, "holiday-audio");
        assert_eq!(artifact.metadata.source_label, "holiday");

        // No graph or listener survives `ready`.
        assert!(!h.extractor.has_live_capture());
        assert_eq!(h.surface.output_count(), 0);
        assert_eq!(h.surface.listener_count(), 0);
        assert!(!h.surface.is_playing());

        let download = h.extractor.download().unwrap();
        assert_eq!(download.file_name, "holiday-audio.wav");
        assert_eq!(download.mime_type, "audio/wav");
        let (_, _, data_size) = wav_format::parse_header(&download.bytes).unwrap();
        assert_eq!(data_size, 3 * 8000 * 2);
        assert_eq!(h.delegate.artifacts.lock().len(), 1);
    }

    #[test]
    fn new_source_cancels_in_flight_extraction() {
        let mut h = harness();
        h.extractor.load_source(video("a.mp4"));
        let first = h.extractor.media().cloned().unwrap();
        h.extractor.extract_audio();
        one_second(&h.surface);

        h.extractor.load_source(video("b.mp4"));

        assert_eq!(*h.extractor.state(), ExtractionState::SourceLoaded);
        assert_eq!(h.extractor.media().unwrap().label, "b");
        assert!(!h.extractor.has_live_capture());
        assert_eq!(h.surface.output_count(), 0);
        assert_eq!(h.surface.listener_count(), 0);
        assert_eq!(h.store.revocation_count(&first.source_ref), 1);

        h.surface.finish();
        h.extractor.process_events();
        assert_eq!(*h.extractor.state(), ExtractionState::SourceLoaded);
        assert!(h.delegate.artifacts.lock().is_empty());
        assert!(h.extractor.artifact().is_none());
    }

    #[test]
    fn stale_playback_end_is_ignored() {
        let mut h = harness();
        h.extractor.load_source(video("a.mp4"));
        h.extractor.extract_audio();
        one_second(&h.surface);
        // Queued but not yet processed when the user picks another file.
        h.surface.finish();

        h.extractor.load_source(video("b.mp4"));
        h.extractor.extract_audio();
        h.extractor.process_events();

        assert!(h.extractor.state().is_extracting());
        assert!(h.delegate.artifacts.lock().is_empty());
    }

    #[test]
    fn attach_failure_settles_in_failed_and_releases() {
        let mut h = harness();
        h.surface.state.lock().reject_taps = true;
        h.extractor.load_source(video("a.mp4"));

        h.extractor.extract_audio();

        assert!(matches!(h.extractor.state(), ExtractionState::Failed(ExtractError::GraphAttach(_))));
        assert!(!h.extractor.has_live_capture());
        assert_eq!(h.surface.listener_count(), 0);
        assert_eq!(h.surface.state.lock().play_calls, 0);
        assert_eq!(h.delegate.errors.lock().len(), 1);

        // Failed accepts a retry.
        h.surface.state.lock().reject_taps = false;
        h.extractor.extract_audio();
        assert!(h.extractor.state().is_extracting());
    }

    #[test]
    fn play_failure_releases_partial_graph() {
        let mut h = harness();
        h.surface.state.lock().play_error = Some(ExtractError::Playback("unsupported codec".into()));
        h.extractor.load_source(video("a.mp4"));

        h.extractor.extract_audio();

        assert_eq!(
            *h.extractor.state(),
            ExtractionState::Failed(ExtractError::Playback("unsupported codec".into()))
        );
        assert_eq!(h.surface.output_count(), 0);
        assert_eq!(h.surface.state.lock().disconnects, 1);
        assert_eq!(h.surface.listener_count(), 0);
    }

    #[test]
    fn empty_capture_fails_without_artifact() {
        let mut h = harness();
        h.extractor.load_source(video("silent.mp4"));
        h.extractor.extract_audio();

        h.surface.finish();
        h.extractor.process_events();

        assert_eq!(*h.extractor.state(), ExtractionState::Failed(ExtractError::EmptyCapture));
        assert!(h.extractor.artifact().is_none());
        assert!(h.delegate.artifacts.lock().is_empty());
        // Only the source is still registered.
        assert_eq!(h.store.live_count(), 1);
        assert!(!h.extractor.has_live_capture());
    }

    #[test]
    fn rerun_revokes_previous_artifact() {
        let mut h = harness();
        h.extractor.load_source(video("a.mp4"));
        h.extractor.extract_audio();
        one_second(&h.surface);
        h.surface.finish();
        h.extractor.process_events();
        let first = h.extractor.artifact().cloned().unwrap();

        h.extractor.extract_audio();
        assert!(h.extractor.state().is_extracting());
        assert!(!h.store.is_live(&first.resource_ref));
        assert_eq!(h.store.revocation_count(&first.resource_ref), 1);

        one_second(&h.surface);
        h.surface.finish();
        h.extractor.process_events();

        let second = h.extractor.artifact().cloned().unwrap();
        assert_ne!(first.resource_ref, second.resource_ref);
        assert!(h.store.is_live(&second.resource_ref));
        assert_eq!(h.surface.state.lock().connects, 2);
    }

    #[test]
    fn superseded_sources_are_revoked_exactly_once() {
        let mut h = harness();
        let mut handles = Vec::new();
        for (i, name) in ["a.mp4", "b.mp4", "c.mp4", "d.mp4"].iter().enumerate() {
            h.extractor.load_source(video(name));
            handles.push(h.extractor.media().cloned().unwrap());
            if i % 2 == 0 {
                h.extractor.extract_audio();
                one_second(&h.surface);
            }
        }

        let (current, superseded) = handles.split_last().unwrap();
        for handle in superseded {
            assert_eq!(h.store.revocation_count(&handle.source_ref), 1);
        }
        assert_eq!(h.extractor.media(), Some(current));
        assert_eq!(h.surface.source(), Some(current.source_ref.clone()));
        assert_eq!(h.store.live_count(), 1);
    }

    #[test]
    fn invalid_source_fails_and_clears_previous() {
        let mut h = harness();
        h.extractor.load_source(video("a.mp4"));
        let first = h.extractor.media().cloned().unwrap();

        h.extractor.load_source(SourceFile::new("notes.txt", b"hi".to_vec()).with_mime_type("text/plain"));

        assert!(matches!(h.extractor.state(), ExtractionState::Failed(ExtractError::InvalidSource(_))));
        assert!(h.extractor.media().is_none());
        assert!(h.surface.source().is_none());
        assert_eq!(h.store.revocation_count(&first.source_ref), 1);

        // Nothing to extract: ignored.
        h.extractor.extract_audio();
        assert!(h.extractor.state().is_failed());
        assert_eq!(h.surface.state.lock().play_calls, 0);
    }

    #[test]
    fn playback_error_fails_without_publishing() {
        let mut h = harness();
        h.extractor.load_source(video("broken.mp4"));
        h.extractor.extract_audio();
        one_second(&h.surface);
        h.surface
            .fail_playback(ExtractError::Playback("failed to read packet".into()));
        assert_eq!(h.extractor.process_events(), 1);

        assert!(matches!(
            h.extractor.state(),
            ExtractionState::Failed(ExtractError::Playback(_))
        ));
        assert!(h.extractor.artifact().is_none());
        assert!(h.delegate.artifacts.lock().is_empty());
        assert_eq!(h.delegate.errors.lock().len(), 1);
        assert!(!h.extractor.has_live_capture());
        assert_eq!(h.surface.output_count(), 0);
        assert_eq!(h.surface.listener_count(), 0);
        assert_eq!(h.surface.error_listener_count(), 0);
        // Only the source remains referenced.
        assert_eq!(h.store.live_count(), 1);
    }

    #[test]
    fn stale_playback_error_is_ignored() {
        let mut h = harness();
        h.extractor.load_source(video("a.mp4"));
        h.extractor.extract_audio();
        let stale = ExtractionEvent::PlaybackFailed {
            generation: 0,
            error: ExtractError::Playback("old run".into()),
        };
        h.extractor.handle_event(stale);

        assert!(h.extractor.state().is_extracting());
        assert!(h.extractor.has_live_capture());
        assert_eq!(h.surface.error_listener_count(), 1);
    }

    #[test]
    fn extract_while_extracting_is_ignored() {
        let mut h = harness();
        h.extractor.load_source(video("a.mp4"));
        h.extractor.extract_audio();
        h.extractor.extract_audio();

        assert_eq!(h.surface.state.lock().play_calls, 1);
        assert_eq!(*h.delegate.states.lock(), vec!["source_loaded", "extracting"]);
    }

    #[test]
    fn extract_without_source_is_ignored() {
        let mut h = harness();
        h.extractor.extract_audio();

        assert!(h.extractor.state().is_idle());
        assert!(h.delegate.states.lock().is_empty());
    }

    #[test]
    fn shutdown_releases_everything_and_is_idempotent() {
        let mut h = harness();
        h.extractor.load_source(video("a.mp4"));
        h.extractor.extract_audio();
        one_second(&h.surface);
        h.surface.finish();
        h.extractor.process_events();
        assert_eq!(h.store.live_count(), 2);

        h.extractor.shutdown();
        h.extractor.shutdown();

        assert!(h.extractor.state().is_idle());
        assert_eq!(h.store.live_count(), 0);
        assert!(h.surface.source().is_none());
        assert!(h.extractor.download().is_none());
    }

    #[test]
    fn dropping_mid_extraction_releases_capture() {
        let h = harness();
        let Harness {
            surface,
            store,
            mut extractor,
            ..
        } = h;
        extractor.load_source(video("a.mp4"));
        extractor.extract_audio();
        one_second(&surface);

        drop(extractor);

        assert_eq!(surface.output_count(), 0);
        assert_eq!(surface.listener_count(), 0);
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let surface: Arc<dyn PlaybackSurface> = ScriptedSurface::new();
        let config = ExtractionConfig {
            timeslice_ms: 0,
            ..Default::default()
        };
        let result = AudioExtractor::new(surface, Arc::new(BlobStore::new()), config);
        assert!(matches!(result, Err(ExtractError::Configuration(_))));
    }
}
