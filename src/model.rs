//! Core entities: recordings, episodes, missions.
//!
//! Field names serialize in camelCase to match the wire format consumed by
//! client dashboards.

use crate::error::{FieldcastError, Result};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Review status of a promoter recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingStatus {
    /// Captured but not yet transcribed.
    Pending,
    /// Has a transcript, awaiting admin review.
    Transcribed,
    /// Approved for episode generation (terminal).
    Approved,
    /// Rejected by review (terminal); excluded from default candidate selection.
    Rejected,
}

impl RecordingStatus {
    /// Whether this status is terminal in the review workflow.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RecordingStatus::Approved | RecordingStatus::Rejected)
    }
}

impl std::str::FromStr for RecordingStatus {
    type Err = FieldcastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(RecordingStatus::Pending),
            "transcribed" => Ok(RecordingStatus::Transcribed),
            "approved" => Ok(RecordingStatus::Approved),
            "rejected" => Ok(RecordingStatus::Rejected),
            _ => Err(FieldcastError::InvalidInput(format!(
                "Unknown recording status: {}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for RecordingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordingStatus::Pending => write!(f, "pending"),
            RecordingStatus::Transcribed => write!(f, "transcribed"),
            RecordingStatus::Approved => write!(f, "approved"),
            RecordingStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Lifecycle status of an episode.
///
/// `Generating` is declared for wire compatibility but the synthesizer
/// creates episodes directly in `InReview`; nothing currently sets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeStatus {
    #[serde(rename = "generating")]
    Generating,
    #[serde(rename = "in-review")]
    InReview,
    #[serde(rename = "published")]
    Published,
}

impl std::str::FromStr for EpisodeStatus {
    type Err = FieldcastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "generating" => Ok(EpisodeStatus::Generating),
            "in-review" => Ok(EpisodeStatus::InReview),
            "published" => Ok(EpisodeStatus::Published),
            _ => Err(FieldcastError::InvalidInput(format!(
                "Unknown episode status: {}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for EpisodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EpisodeStatus::Generating => write!(f, "generating"),
            EpisodeStatus::InReview => write!(f, "in-review"),
            EpisodeStatus::Published => write!(f, "published"),
        }
    }
}

/// Where an audio payload lives.
///
/// `Inline` is a transient wire form only; the store normalizes it to
/// `Remote` before an entity is considered persisted, so rows never carry
/// raw audio bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioLocator {
    /// Raw audio bytes, not yet uploaded.
    Inline(Vec<u8>),
    /// Externally addressable locator (URL or `blob:<uuid>` reference).
    Remote(String),
}

impl AudioLocator {
    /// Parse a wire string: `data:` URLs decode to `Inline`, anything else
    /// is treated as a remote locator.
    pub fn parse(s: &str) -> Result<Self> {
        if let Some(rest) = s.strip_prefix("data:") {
            let payload = rest.split_once(',').map(|(_, p)| p).ok_or_else(|| {
                FieldcastError::InvalidInput("Malformed data URL: missing payload".to_string())
            })?;
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(payload)
                .map_err(|e| {
                    FieldcastError::InvalidInput(format!("Invalid base64 audio payload: {}", e))
                })?;
            Ok(AudioLocator::Inline(bytes))
        } else {
            Ok(AudioLocator::Remote(s.to_string()))
        }
    }

    /// Whether the audio still needs to be uploaded.
    pub fn is_inline(&self) -> bool {
        matches!(self, AudioLocator::Inline(_))
    }

    /// Wire representation. Inline payloads re-encode as a `data:` URL.
    pub fn to_wire(&self) -> String {
        match self {
            AudioLocator::Remote(url) => url.clone(),
            AudioLocator::Inline(bytes) => format!(
                "data:audio/webm;base64,{}",
                base64::engine::general_purpose::STANDARD.encode(bytes)
            ),
        }
    }
}

impl Serialize for AudioLocator {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire())
    }
}

impl<'de> Deserialize<'de> for AudioLocator {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        AudioLocator::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Guide-adherence analysis of a single recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingAnalysis {
    /// Adherence score, 0-100.
    pub score: u8,
    /// Guide points the promoter covered.
    pub covered: Vec<String>,
    /// Guide points the promoter missed.
    pub missing: Vec<String>,
    /// One-line summary of the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// One promoter's voice report tied to a mission and a store visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    pub id: String,
    pub mission_id: String,
    pub mission_title: String,
    pub promoter_id: String,
    pub promoter_name: String,
    pub store_id: String,
    pub store_name: String,
    pub store_city: String,
    /// Audio locator; `None` when no audio was attached to the capture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioLocator>,
    /// Transcript text; empty until transcribed.
    #[serde(default)]
    pub transcript: String,
    /// Duration in seconds, >= 0.
    pub duration_seconds: f64,
    /// Adherence score, 0-100, default 0.
    #[serde(default)]
    pub score: u8,
    pub status: RecordingStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<RecordingAnalysis>,
}

impl Recording {
    /// Whether this recording carries a usable transcript.
    pub fn has_transcript(&self) -> bool {
        !self.transcript.trim().is_empty()
    }
}

/// A synthesized audio+script artifact aggregating recordings for a mission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: String,
    pub mission_id: String,
    pub mission_title: String,
    pub title: String,
    pub summary: String,
    /// Narration script, intended for TTS.
    pub script: String,
    /// Ids of contributing recordings; non-empty, each had a transcript
    /// at generation time.
    pub recording_ids: Vec<String>,
    pub total_recordings: usize,
    pub key_insights: Vec<String>,
    /// Present only after narration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioLocator>,
    pub status: EpisodeStatus,
    pub created_at: DateTime<Utc>,
    /// Set if and only if status is `Published`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl Episode {
    /// Create a new episode in review from parsed generation output.
    pub fn new(
        mission_id: &str,
        mission_title: &str,
        title: String,
        summary: String,
        script: String,
        recording_ids: Vec<String>,
        key_insights: Vec<String>,
    ) -> Self {
        let total_recordings = recording_ids.len();
        Self {
            id: format!("ep_{}", Uuid::new_v4()),
            mission_id: mission_id.to_string(),
            mission_title: mission_title.to_string(),
            title,
            summary,
            script,
            recording_ids,
            total_recordings,
            key_insights,
            audio: None,
            status: EpisodeStatus::InReview,
            created_at: Utc::now(),
            published_at: None,
        }
    }
}

/// A campaign defining a topic and a guide promoters should address.
/// Read-only to the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    pub category: String,
    /// Ordered checklist of prose prompts, used to steer recordings and
    /// score adherence.
    #[serde(default)]
    pub guide: Vec<String>,
    pub target_responses: u32,
    pub total_responses: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_status_roundtrip() {
        for s in ["pending", "transcribed", "approved", "rejected"] {
            let status: RecordingStatus = s.parse().unwrap();
            assert_eq!(status.to_string(), s);
        }
        assert!("bogus".parse::<RecordingStatus>().is_err());
    }

    #[test]
    fn test_episode_status_wire_values() {
        let status: EpisodeStatus = "in-review".parse().unwrap();
        assert_eq!(status, EpisodeStatus::InReview);
        assert_eq!(
            serde_json::to_string(&EpisodeStatus::Published).unwrap(),
            "\"published\""
        );
    }

    #[test]
    fn test_audio_locator_data_url() {
        let locator = AudioLocator::parse("data:audio/webm;base64,aGVsbG8=").unwrap();
        assert_eq!(locator, AudioLocator::Inline(b"hello".to_vec()));
        assert!(locator.is_inline());
    }

    #[test]
    fn test_audio_locator_remote() {
        let locator = AudioLocator::parse("https://cdn.example.com/a.mp3").unwrap();
        assert_eq!(
            locator,
            AudioLocator::Remote("https://cdn.example.com/a.mp3".to_string())
        );
        assert_eq!(locator.to_wire(), "https://cdn.example.com/a.mp3");
    }

    #[test]
    fn test_audio_locator_malformed_data_url() {
        assert!(AudioLocator::parse("data:audio/webm").is_err());
    }

    #[test]
    fn test_episode_new_counts_recordings() {
        let episode = Episode::new(
            "m1",
            "Shelf check",
            "Title".to_string(),
            "Summary".to_string(),
            "Script".to_string(),
            vec!["r1".to_string(), "r2".to_string()],
            vec![],
        );
        assert_eq!(episode.total_recordings, 2);
        assert_eq!(episode.status, EpisodeStatus::InReview);
        assert!(episode.published_at.is_none());
    }
}
