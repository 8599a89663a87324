//! # audio-extract-symphonia
//!
//! Headless playback backend for audio-extract-kit.
//!
//! Provides:
//! - `DecodedPlaybackSurface`: `PlaybackSurface` that decodes blobs with symphonia on a playback thread
//! - `SourceDecoder`: demux + decode of a source's first playable audio track
//! - `SurfaceConfig`: delivery pacing (realtime, accelerated or unpaced)
//!
//! ## Supported containers
//! Everything symphonia's `all` feature set can demux: MP4/MOV, MKV/WebM,
//! Ogg, WAV, AIFF, CAF, FLAC, MP3 and ADTS AAC. Video tracks are ignored.
//!
//! ## Usage
//! ```ignore
//! use std::sync::Arc;
//! use audio_extract_core::{AudioExtractor, BlobStore, ExtractionConfig, SourceFile};
//! use audio_extract_symphonia::{DecodedPlaybackSurface, SurfaceConfig};
//!
//! let store = Arc::new(BlobStore::new());
//! let surface = Arc::new(DecodedPlaybackSurface::new(Arc::clone(&store), SurfaceConfig::unpaced())?);
//! let mut extractor = AudioExtractor::new(surface, store, ExtractionConfig::default())?;
//! extractor.load_source(SourceFile::new("clip.mp4", bytes));
//! extractor.extract_audio();
//! extractor.wait_until_settled(std::time::Duration::from_secs(60));
//! let download = extractor.download();
//! ```

pub mod config;
pub mod decode;
pub mod decoded_surface;

pub use config::{Pacing, SurfaceConfig};
pub use decode::{DecodedBuffer, SourceDecoder};
pub use decoded_surface::DecodedPlaybackSurface;
