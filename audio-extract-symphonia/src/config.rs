use std::time::Duration;

/// How fast decoded audio is handed to the surface's output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pacing {
    /// One second of audio per wall-clock second, like an on-screen player.
    Realtime,
    /// Realtime scaled by a positive factor (2.0 = twice as fast).
    Accelerated(f64),
    /// As fast as the decoder produces buffers.
    Unpaced,
}

impl Pacing {
    /// Wall-clock time at which `played_secs` of audio should have been delivered.
    pub fn wall_clock_for(&self, played_secs: f64) -> Option<Duration> {
        match *self {
            Self::Realtime => Some(Duration::from_secs_f64(played_secs)),
            Self::Accelerated(factor) => Some(Duration::from_secs_f64(played_secs / factor)),
            Self::Unpaced => None,
        }
    }
}

/// Configuration for a [`DecodedPlaybackSurface`](crate::DecodedPlaybackSurface).
#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    /// Delivery pace (default: realtime).
    pub pacing: Pacing,
}

impl SurfaceConfig {
    pub fn unpaced() -> Self {
        Self {
            pacing: Pacing::Unpaced,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Pacing::Accelerated(factor) = self.pacing {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(format!("acceleration factor must be positive: {}", factor));
            }
        }
        Ok(())
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            pacing: Pacing::Realtime,
        }
    }
}
