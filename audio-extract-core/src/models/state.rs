use super::artifact::ExtractedArtifact;
use super::error::ExtractError;

/// Extraction orchestrator state machine.
///
/// State transitions:
/// ```text
///          load            extract_audio         playback ended
/// idle ──────────→ source_loaded ──────────→ extracting ──────────→ ready
///   ↑ (any state) load ─┘  ↑                      │                  │
///                          │                      ↓                  │
///                          └──── load ──────── failed ←──────────────┘
///                                                    (stop with no audio)
/// ```
///
/// `ready` and `failed` accept both a new `extract_audio()` and a new load.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionState {
    Idle,
    SourceLoaded,
    Extracting,
    Ready(Box<ExtractedArtifact>),
    Failed(ExtractError),
}

impl ExtractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_extracting(&self) -> bool {
        matches!(self, Self::Extracting)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Whether `extract_audio()` may start from this state (given a loaded source).
    pub fn can_extract(&self) -> bool {
        matches!(self, Self::SourceLoaded | Self::Ready(_) | Self::Failed(_))
    }

    pub fn artifact(&self) -> Option<&ExtractedArtifact> {
        match self {
            Self::Ready(artifact) => Some(artifact),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ExtractError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Short lowercase name, used in logs and event payloads.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::SourceLoaded => "source_loaded",
            Self::Extracting => "extracting",
            Self::Ready(_) => "ready",
            Self::Failed(_) => "failed",
        }
    }
}

/// Recording session state.
///
/// ```text
/// idle → recording → finalizing → complete
///                         ↓
///                       failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording,
    Finalizing,
    Complete,
    Failed,
}

impl RecorderState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Recording | Self::Finalizing)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }
}
