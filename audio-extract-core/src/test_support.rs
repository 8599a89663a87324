//! Scripted playback surface for unit tests: audio and end-of-playback are
//! emitted by the test instead of a decoder.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::error::ExtractError;
use crate::storage::blob_store::ResourceRef;
use crate::traits::playback_surface::{
    AudioBufferCallback, ListenerId, OutputTapId, PlaybackEndedCallback, PlaybackErrorCallback, PlaybackSurface,
    SurfaceId,
};

#[derive(Default)]
pub(crate) struct ScriptState {
    pub source: Option<ResourceRef>,
    pub playing: bool,
    pub play_calls: u32,
    pub pause_calls: u32,
    pub connects: u32,
    pub disconnects: u32,
    pub outputs: Vec<(OutputTapId, AudioBufferCallback)>,
    pub listeners: Vec<(ListenerId, PlaybackEndedCallback)>,
    pub error_listeners: Vec<(ListenerId, PlaybackErrorCallback)>,
    pub play_error: Option<ExtractError>,
    pub reject_taps: bool,
    next_id: u64,
}

pub(crate) struct ScriptedSurface {
    id: SurfaceId,
    pub state: Mutex<ScriptState>,
}

impl ScriptedSurface {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            id: SurfaceId::next(),
            state: Mutex::new(ScriptState::default()),
        })
    }

    /// Deliver a buffer to every connected output.
    pub fn emit(&self, samples: &[f32], sample_rate: u32, channels: u16) {
        let outputs: Vec<AudioBufferCallback> = self.state.lock().outputs.iter().map(|(_, cb)| Arc::clone(cb)).collect();
        for output in outputs {
            output(samples, sample_rate, channels);
        }
    }

    /// Simulate the natural end of playback.
    pub fn finish(&self) {
        let listeners: Vec<PlaybackEndedCallback> = {
            let mut state = self.state.lock();
            state.playing = false;
            state.listeners.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        for listener in listeners {
            listener();
        }
    }

    /// Simulate playback stopping on an error partway through.
    pub fn fail_playback(&self, error: ExtractError) {
        let listeners: Vec<PlaybackErrorCallback> = {
            let mut state = self.state.lock();
            state.playing = false;
            state.error_listeners.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        for listener in listeners {
            listener(&error);
        }
    }

    pub fn error_listener_count(&self) -> usize {
        self.state.lock().error_listeners.len()
    }

    pub fn output_count(&self) -> usize {
        self.state.lock().outputs.len()
    }

    pub fn listener_count(&self) -> usize {
        self.state.lock().listeners.len()
    }
}

impl PlaybackSurface for ScriptedSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn set_source(&self, source: Option<&ResourceRef>) -> Result<(), ExtractError> {
        let mut state = self.state.lock();
        state.playing = false;
        state.source = source.cloned();
        Ok(())
    }

    fn source(&self) -> Option<ResourceRef> {
        self.state.lock().source.clone()
    }

    fn play(&self) -> Result<(), ExtractError> {
        let mut state = self.state.lock();
        state.play_calls += 1;
        if let Some(error) = state.play_error.clone() {
            return Err(error);
        }
        if state.source.is_none() {
            return Err(ExtractError::Playback("no source".into()));
        }
        state.playing = true;
        Ok(())
    }

    fn pause(&self) {
        let mut state = self.state.lock();
        state.pause_calls += 1;
        state.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.state.lock().playing
    }

    fn add_ended_listener(&self, callback: PlaybackEndedCallback) -> ListenerId {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = ListenerId(state.next_id);
        state.listeners.push((id, callback));
        id
    }

    fn remove_ended_listener(&self, id: ListenerId) -> bool {
        let mut state = self.state.lock();
        let before = state.listeners.len();
        state.listeners.retain(|(listener, _)| *listener != id);
        state.listeners.len() != before
    }

    fn add_error_listener(&self, callback: PlaybackErrorCallback) -> ListenerId {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = ListenerId(state.next_id);
        state.error_listeners.push((id, callback));
        id
    }

    fn remove_error_listener(&self, id: ListenerId) -> bool {
        let mut state = self.state.lock();
        let before = state.error_listeners.len();
        state.error_listeners.retain(|(listener, _)| *listener != id);
        state.error_listeners.len() != before
    }

    fn connect_audio_output(&self, callback: AudioBufferCallback) -> Result<OutputTapId, ExtractError> {
        let mut state = self.state.lock();
        if state.reject_taps {
            return Err(ExtractError::GraphAttach("surface refused the tap".into()));
        }
        state.connects += 1;
        state.next_id += 1;
        let id = OutputTapId(state.next_id);
        state.outputs.push((id, callback));
        Ok(id)
    }

    fn disconnect_audio_output(&self, tap: OutputTapId) -> bool {
        let mut state = self.state.lock();
        let before = state.outputs.len();
        state.outputs.retain(|(id, _)| *id != tap);
        let removed = state.outputs.len() != before;
        if removed {
            state.disconnects += 1;
        }
        removed
    }
}
