use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::models::error::ExtractError;
use crate::storage::blob_store::ResourceRef;

/// Callback invoked when the surface produces decoded audio.
///
/// Parameters:
/// - `samples`: Interleaved f32 samples.
/// - `sample_rate`: Sample rate of the delivered audio in Hz.
/// - `channels`: Number of interleaved channels.
pub type AudioBufferCallback = Arc<dyn Fn(&[f32], u32, u16) + Send + Sync + 'static>;

/// Callback invoked when playback reaches the natural end of the source.
pub type PlaybackEndedCallback = Arc<dyn Fn() + Send + Sync + 'static>;

/// Callback invoked when playback stops on an error before reaching the end.
pub type PlaybackErrorCallback = Arc<dyn Fn(&ExtractError) + Send + Sync + 'static>;

static NEXT_SURFACE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a playback surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(u64);

impl SurfaceId {
    pub fn next() -> Self {
        Self(NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Token returned by [`PlaybackSurface::add_ended_listener`] and
/// [`PlaybackSurface::add_error_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Token returned by [`PlaybackSurface::connect_audio_output`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputTapId(pub u64);

/// A playable element that decodes a source and renders its audio.
///
/// The surface is shared between the loader, the capture graph manager and
/// the orchestrator, so every method takes `&self`. Only the orchestrator
/// issues `play`/`pause`.
///
/// Implementations must never invoke a callback while holding one of their
/// own locks: callbacks may call back into the surface.
pub trait PlaybackSurface: Send + Sync {
    fn id(&self) -> SurfaceId;

    /// Bind (or clear) the source. Stops any ongoing playback and rewinds.
    fn set_source(&self, source: Option<&ResourceRef>) -> Result<(), ExtractError>;

    fn source(&self) -> Option<ResourceRef>;

    /// Start or resume playback. Restarts from the beginning once playback has ended.
    ///
    /// Fails with `ExtractError::Playback` when there is no source or the
    /// source cannot be decoded.
    fn play(&self) -> Result<(), ExtractError>;

    /// Pause playback. No audio is delivered after this returns.
    fn pause(&self);

    fn is_playing(&self) -> bool;

    /// Subscribe to end-of-playback notifications.
    fn add_ended_listener(&self, callback: PlaybackEndedCallback) -> ListenerId;

    /// Returns false when the listener was not registered.
    fn remove_ended_listener(&self, id: ListenerId) -> bool;

    /// Subscribe to playback failures. A failed run never fires the ended listeners.
    fn add_error_listener(&self, callback: PlaybackErrorCallback) -> ListenerId;

    fn remove_error_listener(&self, id: ListenerId) -> bool;

    /// Route decoded audio to `callback` (the source node of a capture graph).
    fn connect_audio_output(&self, callback: AudioBufferCallback) -> Result<OutputTapId, ExtractError>;

    /// Returns false when the tap was not connected.
    fn disconnect_audio_output(&self, tap: OutputTapId) -> bool;
}
