use thiserror::Error;

/// Errors that can occur while loading a source or extracting its audio.
///
/// None of these escape the [`AudioExtractor`](crate::AudioExtractor): it
/// releases every partially-built resource and settles in
/// `ExtractionState::Failed` carrying the error instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The bytes handed to the loader cannot be interpreted as media.
    #[error("invalid source: {0}")]
    InvalidSource(String),

    /// A capture graph is already tapping the playback surface.
    #[error("graph attach failed: {0}")]
    GraphAttach(String),

    /// A recorder operation was issued in a state that does not allow it.
    #[error("recorder state error: {0}")]
    RecorderState(String),

    /// The recorder was stopped before any audio was delivered.
    #[error("no audio was captured")]
    EmptyCapture,

    /// The playback surface could not play the source (unsupported format, no audio track).
    #[error("playback failed: {0}")]
    Playback(String),

    #[error("encoding failed: {0}")]
    Encoding(String),

    #[error("configuration failed: {0}")]
    Configuration(String),

    #[error("storage error: {0}")]
    Storage(String),
}
