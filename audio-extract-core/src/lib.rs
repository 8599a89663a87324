//! # audio-extract-core
//!
//! Platform-agnostic core for extracting a video's soundtrack into an audio file.
//!
//! Playback backends implement the `PlaybackSurface` trait; the
//! `AudioExtractor` orchestrator taps the surface with a capture graph,
//! records the tapped stream while the source plays, and publishes the
//! result as a revocable blob when playback ends.
//!
//! ## Architecture
//!
//! ```text
//! audio-extract-core (this crate)
//! ├── traits/       ← PlaybackSurface, ExtractionDelegate, AudioEncoder
//! ├── models/       ← ExtractError, ExtractionState, ExtractionConfig, MediaHandle, ExtractedArtifact
//! ├── loader/       ← MediaLoader, container sniffing
//! ├── graph/        ← CaptureGraphManager, CaptureGraph, CaptureStream
//! ├── recorder/     ← RecordingSession
//! ├── processing/   ← PCM conversion, WAV container, built-in encoders
//! ├── session/      ← AudioExtractor (orchestrator)
//! └── storage/      ← BlobStore (revocable references), metadata
//! ```

pub mod graph;
pub mod loader;
pub mod models;
pub mod processing;
pub mod recorder;
pub mod session;
pub mod storage;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export key types at crate root for convenience.
pub use graph::capture_graph::{CaptureGraph, CaptureGraphManager, GraphId};
pub use graph::capture_stream::CaptureStream;
pub use loader::media_loader::MediaLoader;
pub use models::artifact::{ArtifactDownload, ArtifactMetadata, ExtractedArtifact, RecordedAudio};
pub use models::audio_models::{OutputFormat, StreamFormat};
pub use models::config::ExtractionConfig;
pub use models::error::ExtractError;
pub use models::media::{MediaHandle, SourceFile};
pub use models::state::{ExtractionState, RecorderState};
pub use recorder::session::RecordingSession;
pub use session::orchestrator::{AudioExtractor, ExtractionEvent};
pub use storage::blob_store::{Blob, BlobStore, ResourceRef};
pub use traits::audio_encoder::AudioEncoder;
pub use traits::extraction_delegate::ExtractionDelegate;
pub use traits::playback_surface::{
    AudioBufferCallback, ListenerId, OutputTapId, PlaybackEndedCallback, PlaybackErrorCallback, PlaybackSurface,
    SurfaceId,
};
