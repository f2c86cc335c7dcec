//! Persistence abstraction for recordings, episodes, and missions.
//!
//! Trait-based interface so the pipeline can be tested against an
//! in-memory database. Entity updates are independent, non-transactional
//! writes; each one is individually atomic at the store layer, with no
//! cross-entity locking.

mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::model::{
    AudioLocator, Episode, EpisodeStatus, Mission, Recording, RecordingAnalysis, RecordingStatus,
};
use async_trait::async_trait;
use serde::Serialize;

/// Store operations for promoter recordings.
#[async_trait]
pub trait RecordingStore: Send + Sync {
    /// Persist a recording. Inline audio is normalized to a remote locator
    /// before the row is written; the returned entity reflects that.
    async fn insert(&self, recording: &Recording) -> Result<Recording>;

    async fn get(&self, id: &str) -> Result<Option<Recording>>;

    /// All recordings for a mission, newest first.
    async fn list_by_mission(&self, mission_id: &str) -> Result<Vec<Recording>>;

    /// Recordings by explicit id, scoped to a mission, newest first.
    /// Ids not found (or belonging to other missions) are omitted.
    async fn list_by_ids(&self, mission_id: &str, ids: &[String]) -> Result<Vec<Recording>>;

    async fn list_all(&self) -> Result<Vec<Recording>>;

    async fn update_transcript(&self, id: &str, transcript: &str) -> Result<()>;

    async fn update_status(&self, id: &str, status: RecordingStatus) -> Result<()>;

    async fn update_analysis(&self, id: &str, analysis: &RecordingAnalysis) -> Result<()>;

    /// Resolve a `blob:<uuid>` locator to the stored audio bytes.
    async fn fetch_audio_blob(&self, blob_id: &str) -> Result<Option<Vec<u8>>>;
}

/// Store operations for episodes.
#[async_trait]
pub trait EpisodeStore: Send + Sync {
    async fn insert(&self, episode: &Episode) -> Result<Episode>;

    async fn get(&self, id: &str) -> Result<Option<Episode>>;

    /// All episodes, newest first.
    async fn list(&self) -> Result<Vec<Episode>>;

    /// Attach narration audio. Inline audio is normalized to a remote
    /// locator; the normalized locator is returned.
    async fn update_audio(&self, id: &str, audio: &AudioLocator) -> Result<AudioLocator>;

    /// Set the episode status. Transitioning into `Published` sets
    /// `published_at` exactly once and requires an audio locator.
    async fn update_status(&self, id: &str, status: EpisodeStatus) -> Result<()>;
}

/// Read-mostly mission catalog.
#[async_trait]
pub trait MissionStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Mission>>;

    async fn list(&self) -> Result<Vec<Mission>>;

    /// Used by seeding only; missions are read-only to the pipeline.
    async fn insert(&self, mission: &Mission) -> Result<()>;
}

/// Aggregate counts for the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_recordings: usize,
    pub pending_transcriptions: usize,
    pub approved_recordings: usize,
    pub total_episodes: usize,
    pub published_episodes: usize,
}
