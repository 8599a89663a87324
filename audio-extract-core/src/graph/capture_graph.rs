use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::graph::capture_stream::CaptureStream;
use crate::models::error::ExtractError;
use crate::traits::playback_surface::{AudioBufferCallback, OutputTapId, PlaybackSurface, SurfaceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphId(u64);

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "graph-{}", self.0)
    }
}

/// Live graphs keyed by the surface they tap. Shared with every graph so a
/// dropped graph can unregister itself.
#[derive(Default)]
struct GraphRegistry {
    live: HashMap<SurfaceId, GraphId>,
    next_id: u64,
}

type SharedRegistry = Arc<Mutex<GraphRegistry>>;

/// Source node: the tap on the playback surface's decoded audio.
struct SourceNode {
    surface: Arc<dyn PlaybackSurface>,
    tap: Option<OutputTapId>,
}

/// Sink node: the processing context whose output stream can be recorded.
struct SinkNode {
    stream: Arc<CaptureStream>,
}

/// Live audio routing from one playback surface to a capturable stream.
///
/// ```text
/// [PlaybackSurface] → (tap) → [SourceNode] → [SinkNode] → [CaptureStream] → recorder
/// ```
///
/// Teardown runs exactly once: on [`CaptureGraphManager::release`] or, failing
/// that, on drop.
pub struct CaptureGraph {
    id: GraphId,
    surface_id: SurfaceId,
    source: SourceNode,
    sink: SinkNode,
    registry: SharedRegistry,
    released: bool,
}

impl CaptureGraph {
    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn surface_id(&self) -> SurfaceId {
        self.surface_id
    }

    /// The sink's output stream.
    pub fn stream(&self) -> Arc<CaptureStream> {
        Arc::clone(&self.sink.stream)
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Disconnect the source node, then close the sink's context.
    ///
    /// Returns false when the graph was already torn down.
    fn teardown(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;

        if let Some(tap) = self.source.tap.take() {
            if !self.source.surface.disconnect_audio_output(tap) {
                log::warn!("{}: surface had already dropped its audio tap", self.id);
            }
        }
        self.sink.stream.close();

        let mut registry = self.registry.lock();
        if registry.live.get(&self.surface_id) == Some(&self.id) {
            registry.live.remove(&self.surface_id);
        }
        log::debug!("{} released from surface {}", self.id, self.surface_id.as_u64());
        true
    }
}

impl Drop for CaptureGraph {
    fn drop(&mut self) {
        if self.teardown() {
            log::warn!("{} dropped without an explicit release", self.id);
        }
    }
}

/// Creates capture graphs and guarantees at most one per playback surface.
#[derive(Default)]
pub struct CaptureGraphManager {
    registry: SharedRegistry,
}

impl CaptureGraphManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tap `surface` and route its audio into a new capture stream.
    ///
    /// Fails with `GraphAttach` if a live graph already taps the surface; that
    /// graph is left untouched.
    pub fn attach(&self, surface: &Arc<dyn PlaybackSurface>) -> Result<CaptureGraph, ExtractError> {
        let surface_id = surface.id();

        // Reserve the surface before calling into it.
        let id = {
            let mut registry = self.registry.lock();
            if let Some(existing) = registry.live.get(&surface_id) {
                return Err(ExtractError::GraphAttach(format!(
                    "surface {} is already tapped by {}",
                    surface_id.as_u64(),
                    existing
                )));
            }
            registry.next_id += 1;
            let id = GraphId(registry.next_id);
            registry.live.insert(surface_id, id);
            id
        };

        let stream = Arc::new(CaptureStream::new());
        let sink = Arc::clone(&stream);
        let callback: AudioBufferCallback = Arc::new(move |samples: &[f32], sample_rate: u32, channels: u16| {
            sink.push(samples, sample_rate, channels);
        });

        let tap = match surface.connect_audio_output(callback) {
            Ok(tap) => tap,
            Err(e) => {
                self.registry.lock().live.remove(&surface_id);
                return Err(match e {
                    ExtractError::GraphAttach(_) => e,
                    other => ExtractError::GraphAttach(other.to_string()),
                });
            }
        };

        log::info!("{} attached to surface {}", id, surface_id.as_u64());

        Ok(CaptureGraph {
            id,
            surface_id,
            source: SourceNode {
                surface: Arc::clone(surface),
                tap: Some(tap),
            },
            sink: SinkNode { stream },
            registry: Arc::clone(&self.registry),
            released: false,
        })
    }

    /// Tear `graph` down. Calling it again, or after a drop-time teardown, is a no-op.
    pub fn release(&self, graph: &mut CaptureGraph) {
        graph.teardown();
    }

    pub fn is_attached(&self, surface_id: SurfaceId) -> bool {
        self.registry.lock().live.contains_key(&surface_id)
    }

    /// Number of graphs currently attached.
    pub fn live_count(&self) -> usize {
        self.registry.lock().live.len()
    }
}
