pub mod audio_encoder;
pub mod extraction_delegate;
pub mod playback_surface;
