//! WAV fixtures written with hound.

#![allow(dead_code)]

use std::f32::consts::PI;
use std::io::Cursor;

fn write_wav(sample_rate: u32, channels: u16, frames: u32, sample: impl Fn(u32) -> i16) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut bytes = Vec::new();
    {
        let mut writer = hound::WavWriter::new(Cursor::new(&mut bytes), spec).unwrap();
        for frame in 0..frames {
            let value = sample(frame);
            for _ in 0..channels {
                writer.write_sample(value).unwrap();
            }
        }
        writer.finalize().unwrap();
    }
    bytes
}

/// Silent 16-bit PCM WAV.
pub fn silent_wav(seconds: f32, sample_rate: u32, channels: u16) -> Vec<u8> {
    let frames = (seconds * sample_rate as f32) as u32;
    write_wav(sample_rate, channels, frames, |_| 0)
}

/// Half-scale sine tone, identical on every channel.
pub fn tone_wav(seconds: f32, frequency: f32, sample_rate: u32, channels: u16) -> Vec<u8> {
    let frames = (seconds * sample_rate as f32) as u32;
    write_wav(sample_rate, channels, frames, |frame| {
        let t = frame as f32 / sample_rate as f32;
        ((2.0 * PI * frequency * t).sin() * 0.5 * i16::MAX as f32) as i16
    })
}

/// Decode WAV bytes back into (spec, samples).
pub fn read_wav(bytes: &[u8]) -> (hound::WavSpec, Vec<i16>) {
    let mut reader = hound::WavReader::new(Cursor::new(bytes.to_vec())).unwrap();
    let spec = reader.spec();
    let samples = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    (spec, samples)
}
