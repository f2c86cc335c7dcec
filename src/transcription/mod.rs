//! Speech-to-text transcription.
//!
//! Turns a raw audio payload plus a best-effort content type into a
//! transcript string. Client-reported content types are unreliable, so an
//! unrecognized type is never a hard failure by itself; the call is
//! attempted regardless.

mod whisper;

pub use whisper::WhisperTranscriber;

use crate::error::{FieldcastError, Result};
use async_trait::async_trait;

/// Maximum accepted audio payload (25 MiB), checked before any API call.
pub const MAX_AUDIO_BYTES: usize = 25 * 1024 * 1024;

/// Trait for transcription services.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio payload and return the transcript text.
    async fn transcribe(&self, audio: &[u8], content_type: &str, language: &str)
        -> Result<String>;
}

/// Reject payloads above [`MAX_AUDIO_BYTES`].
pub fn check_payload_size(audio: &[u8]) -> Result<()> {
    if audio.len() > MAX_AUDIO_BYTES {
        return Err(FieldcastError::PayloadTooLarge {
            size: audio.len(),
            max: MAX_AUDIO_BYTES,
        });
    }
    Ok(())
}

/// Pick a filename extension for the upload from the declared content type.
/// Unknown types fall back to webm, the most common capture container.
pub(crate) fn filename_for(content_type: &str) -> &'static str {
    let ct = content_type.to_lowercase();
    if ct.contains("mpeg") || ct.contains("mp3") {
        "audio.mp3"
    } else if ct.contains("wav") {
        "audio.wav"
    } else if ct.contains("ogg") {
        "audio.ogg"
    } else if ct.contains("mp4") || ct.contains("m4a") {
        "audio.m4a"
    } else if ct.contains("flac") {
        "audio.flac"
    } else {
        "audio.webm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_size_limit() {
        assert!(check_payload_size(&[0u8; 16]).is_ok());

        let oversized = vec![0u8; MAX_AUDIO_BYTES + 1];
        match check_payload_size(&oversized) {
            Err(FieldcastError::PayloadTooLarge { size, max }) => {
                assert_eq!(size, MAX_AUDIO_BYTES + 1);
                assert_eq!(max, MAX_AUDIO_BYTES);
            }
            other => panic!("expected PayloadTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_filename_for_unknown_type_falls_back() {
        assert_eq!(filename_for("application/octet-stream"), "audio.webm");
        assert_eq!(filename_for("audio/mpeg"), "audio.mp3");
        assert_eq!(filename_for("audio/mp4"), "audio.m4a");
    }
}
