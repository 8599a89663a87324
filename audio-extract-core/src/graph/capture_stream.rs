use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::audio_models::StreamFormat;
use crate::traits::playback_surface::AudioBufferCallback;

/// Token returned by [`CaptureStream::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct StreamInner {
    subscribers: Vec<(SubscriptionId, AudioBufferCallback)>,
    next_id: u64,
    closed: bool,
    frames_delivered: u64,
}

/// Capturable output of a capture graph's sink node.
///
/// Fans every pushed buffer out to the current subscribers, in push order.
/// Once closed the stream drops pushes and refuses new subscribers.
#[derive(Default)]
pub struct CaptureStream {
    inner: Mutex<StreamInner>,
}

impl CaptureStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one buffer to every subscriber.
    ///
    /// Subscribers are called without the stream lock held.
    pub fn push(&self, samples: &[f32], sample_rate: u32, channels: u16) {
        let subscribers: Vec<AudioBufferCallback> = {
            let mut inner = self.inner.lock();
            if inner.closed {
                return;
            }
            inner.frames_delivered += StreamFormat::new(sample_rate, channels).frames_in(samples.len());
            inner.subscribers.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        for subscriber in subscribers {
            subscriber(samples, sample_rate, channels);
        }
    }

    /// Returns None if the stream is already closed.
    pub fn subscribe(&self, callback: AudioBufferCallback) -> Option<SubscriptionId> {
        let mut inner = self.inner.lock();
        if inner.closed {
            return None;
        }
        inner.next_id += 1;
        let id = SubscriptionId(inner.next_id);
        inner.subscribers.push((id, callback));
        Some(id)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(subscription, _)| *subscription != id);
        inner.subscribers.len() != before
    }

    /// Close the stream and drop every subscriber. Idempotent.
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        inner.closed = true;
        inner.subscribers.clear();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    pub fn frames_delivered(&self) -> u64 {
        self.inner.lock().frames_delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }
}
