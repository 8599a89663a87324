//! Demuxing and decoding of a source's first playable audio track.

use std::io::Cursor;
use std::sync::Arc;

use audio_extract_core::ExtractError;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{Decoder, DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// One decoded packet as interleaved f32 samples.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl DecodedBuffer {
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }
}

/// Pull decoder over the audio track of an in-memory container.
pub struct SourceDecoder {
    format: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,
}

impl SourceDecoder {
    /// Probe `bytes` and open a decoder for the first track symphonia can decode.
    ///
    /// Video tracks are skipped. Fails with `ExtractError::Playback` when the
    /// container is unknown or carries no decodable audio.
    pub fn open(bytes: impl Into<Arc<[u8]>>, mime_type: Option<&str>) -> Result<Self, ExtractError> {
        let source: Arc<[u8]> = bytes.into();
        let mss = MediaSourceStream::new(Box::new(Cursor::new(source)), Default::default());

        let mut hint = Hint::new();
        if let Some(mime) = mime_type {
            hint.mime_type(mime);
            if let Some(extension) = extension_hint(mime) {
                hint.with_extension(extension);
            }
        }

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
            .map_err(|e| ExtractError::Playback(format!("unsupported container: {}", e)))?;
        let format = probed.format;

        let codecs = symphonia::default::get_codecs();
        let (track_id, codec_params) = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL && codecs.get_codec(t.codec_params.codec).is_some())
            .map(|t| (t.id, t.codec_params.clone()))
            .ok_or_else(|| ExtractError::Playback("no decodable audio track".into()))?;

        let decoder = codecs
            .make(&codec_params, &DecoderOptions::default())
            .map_err(|e| ExtractError::Playback(format!("failed to create audio decoder: {}", e)))?;

        log::debug!(
            "opened audio track {} ({:?} Hz, {:?} channels)",
            track_id,
            codec_params.sample_rate,
            codec_params.channels.map(|c| c.count())
        );

        Ok(Self {
            format,
            decoder,
            track_id,
        })
    }

    /// Decode the next non-empty buffer, or None at end of stream.
    ///
    /// Corrupt packets are skipped.
    pub fn next_buffer(&mut self) -> Result<Option<DecodedBuffer>, ExtractError> {
        loop {
            let packet = match self.format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    return Ok(None)
                }
                Err(SymphoniaError::ResetRequired) => {
                    self.decoder.reset();
                    continue;
                }
                Err(e) => return Err(ExtractError::Playback(format!("failed to read packet: {}", e))),
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            match self.decoder.decode(&packet) {
                Ok(decoded) => {
                    if decoded.frames() == 0 {
                        continue;
                    }
                    let spec = *decoded.spec();
                    let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                    buffer.copy_interleaved_ref(decoded);
                    return Ok(Some(DecodedBuffer {
                        samples: buffer.samples().to_vec(),
                        sample_rate: spec.rate,
                        channels: spec.channels.count() as u16,
                    }));
                }
                Err(SymphoniaError::DecodeError(e)) => {
                    log::warn!("skipping undecodable packet: {}", e);
                    continue;
                }
                Err(e) => return Err(ExtractError::Playback(format!("decode failed: {}", e))),
            }
        }
    }
}

/// File extension symphonia's probe associates with a MIME type.
fn extension_hint(mime_type: &str) -> Option<&'static str> {
    let essence = mime_type.split(';').next().unwrap_or_default().trim();
    match essence {
        "video/mp4" | "audio/mp4" | "video/quicktime" | "audio/x-m4a" => Some("mp4"),
        "video/webm" | "audio/webm" => Some("webm"),
        "video/x-matroska" | "audio/x-matroska" => Some("mkv"),
        "audio/wav" | "audio/x-wav" | "audio/wave" => Some("wav"),
        "audio/aiff" | "audio/x-aiff" => Some("aiff"),
        "audio/mpeg" => Some("mp3"),
        "audio/aac" => Some("aac"),
        "audio/flac" => Some("flac"),
        "audio/x-caf" => Some("caf"),
        "audio/ogg" | "video/ogg" | "application/ogg" => Some("ogg"),
        _ => None,
    }
}
