//! Container sniffing and label derivation.
//!
//! Only looks at leading signature bytes; decoding is left to the playback surface.

/// Guess the container MIME type from the leading bytes.
pub fn sniff_container(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" {
        return Some("video/mp4");
    }
    if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" {
        return match &bytes[8..12] {
            b"WAVE" => Some("audio/wav"),
            b"AVI " => Some("video/x-msvideo"),
            _ => None,
        };
    }
    if bytes.len() >= 12 && &bytes[0..4] == b"FORM" && matches!(&bytes[8..12], b"AIFF" | b"AIFC") {
        return Some("audio/aiff");
    }
    if bytes.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]) {
        return Some("video/webm");
    }
    if bytes.starts_with(b"OggS") {
        return Some("application/ogg");
    }
    if bytes.starts_with(b"fLaC") {
        return Some("audio/flac");
    }
    if bytes.starts_with(b"caff") {
        return Some("audio/x-caf");
    }
    if bytes.starts_with(b"ID3") {
        return Some("audio/mpeg");
    }
    if bytes.starts_with(&[0x00, 0x00, 0x01, 0xBA]) {
        return Some("video/mpeg");
    }
    if bytes.len() >= 2 && bytes[0] == 0xFF {
        // 12-bit sync with layer bits 00 is ADTS; 11-bit sync otherwise is an MPEG audio frame.
        if bytes[1] & 0xF6 == 0xF0 {
            return Some("audio/aac");
        }
        if bytes[1] & 0xE0 == 0xE0 {
            return Some("audio/mpeg");
        }
    }
    if bytes.len() >= 188 && bytes[0] == 0x47 && (bytes.len() == 188 || bytes[188] == 0x47) {
        return Some("video/mp2t");
    }
    None
}

/// Whether a declared MIME type may carry playable media.
pub fn is_media_mime(mime_type: &str) -> bool {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence.starts_with("video/") || essence.starts_with("audio/") || essence == "application/octet-stream"
}

/// File name with its last extension removed.
///
/// `clip.final.mp4` → `clip.final`; names without an extension are kept.
pub fn derive_label(file_name: &str) -> String {
    if let Some(dot) = file_name.rfind('.') {
        let extension = &file_name[dot + 1..];
        if !extension.is_empty() && !extension.contains('/') {
            return file_name[..dot].to_string();
        }
    }
    file_name.to_string()
}
