//! SQLite-backed store implementation.
//!
//! Audio payloads never live inline on entity rows: inline bytes are moved
//! into a blob side table on write and the row keeps a `blob:<uuid>`
//! locator, keeping rows bounded.

use super::{EpisodeStore, MissionStore, RecordingStore, Stats};
use crate::error::{FieldcastError, Result};
use crate::model::{
    AudioLocator, Episode, EpisodeStatus, Mission, Recording, RecordingAnalysis, RecordingStatus,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, instrument};
use uuid::Uuid;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS recordings (
    id TEXT PRIMARY KEY,
    mission_id TEXT NOT NULL,
    mission_title TEXT NOT NULL,
    promoter_id TEXT NOT NULL,
    promoter_name TEXT NOT NULL,
    store_id TEXT NOT NULL,
    store_name TEXT NOT NULL,
    store_city TEXT NOT NULL,
    audio_url TEXT,
    transcript TEXT NOT NULL DEFAULT '',
    duration_seconds REAL NOT NULL DEFAULT 0,
    score INTEGER NOT NULL DEFAULT 0,
    status TEXT NOT NULL,
    created_at TEXT NOT NULL,
    analysis_json TEXT
);

CREATE INDEX IF NOT EXISTS idx_recordings_mission_id ON recordings(mission_id);

CREATE TABLE IF NOT EXISTS episodes (
    id TEXT PRIMARY KEY,
    mission_id TEXT NOT NULL,
    mission_title TEXT NOT NULL,
    title TEXT NOT NULL,
    summary TEXT NOT NULL,
    script TEXT NOT NULL,
    recording_ids_json TEXT NOT NULL,
    total_recordings INTEGER NOT NULL,
    key_insights_json TEXT NOT NULL,
    audio_url TEXT,
    status TEXT NOT NULL,
    created_at TEXT NOT NULL,
    published_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_episodes_mission_id ON episodes(mission_id);

CREATE TABLE IF NOT EXISTS missions (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    question TEXT,
    category TEXT NOT NULL,
    guide_json TEXT NOT NULL,
    target_responses INTEGER NOT NULL,
    total_responses INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS audio_blobs (
    id TEXT PRIMARY KEY,
    data BLOB NOT NULL,
    created_at TEXT NOT NULL
);
"#;

/// SQLite store for recordings, episodes, and missions.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a store at the given path.
    #[instrument(skip_all)]
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;

        info!("Initialized SQLite store at {:?}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| FieldcastError::Persistence(format!("Failed to acquire lock: {}", e)))
    }

    /// Move inline audio into the blob table; remote locators pass through.
    fn normalize_audio(conn: &Connection, audio: &AudioLocator) -> Result<String> {
        match audio {
            AudioLocator::Remote(url) => Ok(url.clone()),
            AudioLocator::Inline(bytes) => {
                let blob_id = Uuid::new_v4().to_string();
                conn.execute(
                    "INSERT INTO audio_blobs (id, data, created_at) VALUES (?1, ?2, ?3)",
                    params![blob_id, bytes, Utc::now().to_rfc3339()],
                )?;
                Ok(format!("blob:{}", blob_id))
            }
        }
    }

    /// Fetch stored audio bytes by blob id.
    pub fn get_audio(&self, blob_id: &str) -> Result<Option<Vec<u8>>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT data FROM audio_blobs WHERE id = ?1")?;
        let mut rows = stmt.query(params![blob_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Aggregate dashboard counts.
    pub fn stats(&self) -> Result<Stats> {
        let conn = self.lock()?;

        let count = |sql: &str| -> Result<usize> {
            let n: i64 = conn.query_row(sql, [], |row| row.get(0))?;
            Ok(n as usize)
        };

        Ok(Stats {
            total_recordings: count("SELECT COUNT(*) FROM recordings")?,
            pending_transcriptions: count(
                "SELECT COUNT(*) FROM recordings WHERE status = 'pending'",
            )?,
            approved_recordings: count(
                "SELECT COUNT(*) FROM recordings WHERE status = 'approved'",
            )?,
            total_episodes: count("SELECT COUNT(*) FROM episodes")?,
            published_episodes: count("SELECT COUNT(*) FROM episodes WHERE status = 'published'")?,
        })
    }
}

fn conversion_err(e: impl std::error::Error + Send + Sync + 'static) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
}

fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(conversion_err)
}

fn row_to_recording(row: &Row<'_>) -> rusqlite::Result<Recording> {
    let status: String = row.get("status")?;
    let created_at: String = row.get("created_at")?;
    let audio_url: Option<String> = row.get("audio_url")?;
    let analysis_json: Option<String> = row.get("analysis_json")?;

    let analysis: Option<RecordingAnalysis> = match analysis_json {
        Some(json) => Some(serde_json::from_str(&json).map_err(conversion_err)?),
        None => None,
    };

    Ok(Recording {
        id: row.get("id")?,
        mission_id: row.get("mission_id")?,
        mission_title: row.get("mission_title")?,
        promoter_id: row.get("promoter_id")?,
        promoter_name: row.get("promoter_name")?,
        store_id: row.get("store_id")?,
        store_name: row.get("store_name")?,
        store_city: row.get("store_city")?,
        audio: audio_url.map(AudioLocator::Remote),
        transcript: row.get("transcript")?,
        duration_seconds: row.get("duration_seconds")?,
        score: row.get::<_, i64>("score")? as u8,
        status: status.parse::<RecordingStatus>().map_err(conversion_err)?,
        created_at: parse_datetime(&created_at)?,
        analysis,
    })
}

fn row_to_episode(row: &Row<'_>) -> rusqlite::Result<Episode> {
    let status: String = row.get("status")?;
    let created_at: String = row.get("created_at")?;
    let published_at: Option<String> = row.get("published_at")?;
    let audio_url: Option<String> = row.get("audio_url")?;
    let recording_ids_json: String = row.get("recording_ids_json")?;
    let key_insights_json: String = row.get("key_insights_json")?;

    Ok(Episode {
        id: row.get("id")?,
        mission_id: row.get("mission_id")?,
        mission_title: row.get("mission_title")?,
        title: row.get("title")?,
        summary: row.get("summary")?,
        script: row.get("script")?,
        recording_ids: serde_json::from_str(&recording_ids_json).map_err(conversion_err)?,
        total_recordings: row.get::<_, i64>("total_recordings")? as usize,
        key_insights: serde_json::from_str(&key_insights_json).map_err(conversion_err)?,
        audio: audio_url.map(AudioLocator::Remote),
        status: status.parse::<EpisodeStatus>().map_err(conversion_err)?,
        created_at: parse_datetime(&created_at)?,
        published_at: match published_at {
            Some(s) => Some(parse_datetime(&s)?),
            None => None,
        },
    })
}

fn row_to_mission(row: &Row<'_>) -> rusqlite::Result<Mission> {
    let guide_json: String = row.get("guide_json")?;

    Ok(Mission {
        id: row.get("id")?,
        title: row.get("title")?,
        question: row.get("question")?,
        category: row.get("category")?,
        guide: serde_json::from_str(&guide_json).map_err(conversion_err)?,
        target_responses: row.get::<_, i64>("target_responses")? as u32,
        total_responses: row.get::<_, i64>("total_responses")? as u32,
    })
}

const RECORDING_COLUMNS: &str = "id, mission_id, mission_title, promoter_id, promoter_name, \
     store_id, store_name, store_city, audio_url, transcript, duration_seconds, score, \
     status, created_at, analysis_json";

const EPISODE_COLUMNS: &str = "id, mission_id, mission_title, title, summary, script, \
     recording_ids_json, total_recordings, key_insights_json, audio_url, status, \
     created_at, published_at";

#[async_trait]
impl RecordingStore for SqliteStore {
    #[instrument(skip(self, recording), fields(id = %recording.id))]
    async fn insert(&self, recording: &Recording) -> Result<Recording> {
        let conn = self.lock()?;

        let audio_url = match &recording.audio {
            Some(locator) => Some(Self::normalize_audio(&conn, locator)?),
            None => None,
        };

        let analysis_json = recording
            .analysis
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        conn.execute(
            &format!(
                "INSERT INTO recordings ({}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
                RECORDING_COLUMNS
            ),
            params![
                recording.id,
                recording.mission_id,
                recording.mission_title,
                recording.promoter_id,
                recording.promoter_name,
                recording.store_id,
                recording.store_name,
                recording.store_city,
                audio_url,
                recording.transcript,
                recording.duration_seconds,
                recording.score as i64,
                recording.status.to_string(),
                recording.created_at.to_rfc3339(),
                analysis_json,
            ],
        )?;

        let mut saved = recording.clone();
        saved.audio = audio_url.map(AudioLocator::Remote);
        Ok(saved)
    }

    async fn get(&self, id: &str) -> Result<Option<Recording>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM recordings WHERE id = ?1",
            RECORDING_COLUMNS
        ))?;
        let mut rows = stmt.query_map(params![id], row_to_recording)?;
        rows.next().transpose().map_err(Into::into)
    }

    async fn list_by_mission(&self, mission_id: &str) -> Result<Vec<Recording>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM recordings WHERE mission_id = ?1 ORDER BY created_at DESC",
            RECORDING_COLUMNS
        ))?;
        let rows = stmt.query_map(params![mission_id], row_to_recording)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    async fn list_by_ids(&self, mission_id: &str, ids: &[String]) -> Result<Vec<Recording>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.lock()?;
        let placeholders = (0..ids.len())
            .map(|i| format!("?{}", i + 2))
            .collect::<Vec<_>>()
            .join(", ");
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM recordings WHERE mission_id = ?1 AND id IN ({}) \
             ORDER BY created_at DESC",
            RECORDING_COLUMNS, placeholders
        ))?;

        let bound = std::iter::once(mission_id.to_string()).chain(ids.iter().cloned());
        let rows = stmt.query_map(rusqlite::params_from_iter(bound), row_to_recording)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    async fn list_all(&self) -> Result<Vec<Recording>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM recordings ORDER BY created_at DESC",
            RECORDING_COLUMNS
        ))?;
        let rows = stmt.query_map([], row_to_recording)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    async fn update_transcript(&self, id: &str, transcript: &str) -> Result<()> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE recordings SET transcript = ?2 WHERE id = ?1",
            params![id, transcript],
        )?;
        if changed == 0 {
            return Err(FieldcastError::NotFound(format!("recording {}", id)));
        }
        Ok(())
    }

    async fn update_status(&self, id: &str, status: RecordingStatus) -> Result<()> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE recordings SET status = ?2 WHERE id = ?1",
            params![id, status.to_string()],
        )?;
        if changed == 0 {
            return Err(FieldcastError::NotFound(format!("recording {}", id)));
        }
        Ok(())
    }

    async fn update_analysis(&self, id: &str, analysis: &RecordingAnalysis) -> Result<()> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE recordings SET analysis_json = ?2, score = ?3 WHERE id = ?1",
            params![id, serde_json::to_string(analysis)?, analysis.score as i64],
        )?;
        if changed == 0 {
            return Err(FieldcastError::NotFound(format!("recording {}", id)));
        }
        Ok(())
    }

    async fn fetch_audio_blob(&self, blob_id: &str) -> Result<Option<Vec<u8>>> {
        self.get_audio(blob_id)
    }
}

#[async_trait]
impl EpisodeStore for SqliteStore {
    #[instrument(skip(self, episode), fields(id = %episode.id))]
    async fn insert(&self, episode: &Episode) -> Result<Episode> {
        let conn = self.lock()?;

        let audio_url = match &episode.audio {
            Some(locator) => Some(Self::normalize_audio(&conn, locator)?),
            None => None,
        };

        conn.execute(
            &format!(
                "INSERT INTO episodes ({}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                EPISODE_COLUMNS
            ),
            params![
                episode.id,
                episode.mission_id,
                episode.mission_title,
                episode.title,
                episode.summary,
                episode.script,
                serde_json::to_string(&episode.recording_ids)?,
                episode.total_recordings as i64,
                serde_json::to_string(&episode.key_insights)?,
                audio_url,
                episode.status.to_string(),
                episode.created_at.to_rfc3339(),
                episode.published_at.map(|dt| dt.to_rfc3339()),
            ],
        )?;

        let mut saved = episode.clone();
        saved.audio = audio_url.map(AudioLocator::Remote);
        Ok(saved)
    }

    async fn get(&self, id: &str) -> Result<Option<Episode>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM episodes WHERE id = ?1",
            EPISODE_COLUMNS
        ))?;
        let mut rows = stmt.query_map(params![id], row_to_episode)?;
        rows.next().transpose().map_err(Into::into)
    }

    async fn list(&self) -> Result<Vec<Episode>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM episodes ORDER BY created_at DESC",
            EPISODE_COLUMNS
        ))?;
        let rows = stmt.query_map([], row_to_episode)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    async fn update_audio(&self, id: &str, audio: &AudioLocator) -> Result<AudioLocator> {
        let conn = self.lock()?;
        let audio_url = Self::normalize_audio(&conn, audio)?;
        let changed = conn.execute(
            "UPDATE episodes SET audio_url = ?2 WHERE id = ?1",
            params![id, audio_url],
        )?;
        if changed == 0 {
            return Err(FieldcastError::NotFound(format!("episode {}", id)));
        }
        Ok(AudioLocator::Remote(audio_url))
    }

    async fn update_status(&self, id: &str, status: EpisodeStatus) -> Result<()> {
        let conn = self.lock()?;

        if status == EpisodeStatus::Published {
            let (audio_url, published_at): (Option<String>, Option<String>) = conn
                .query_row(
                    "SELECT audio_url, published_at FROM episodes WHERE id = ?1",
                    params![id],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .map_err(|e| match e {
                    rusqlite::Error::QueryReturnedNoRows => {
                        FieldcastError::NotFound(format!("episode {}", id))
                    }
                    other => other.into(),
                })?;

            if audio_url.is_none() {
                return Err(FieldcastError::MissingAudio(id.to_string()));
            }

            // published_at is set on the first publish only
            let timestamp = published_at.unwrap_or_else(|| Utc::now().to_rfc3339());
            conn.execute(
                "UPDATE episodes SET status = ?2, published_at = ?3 WHERE id = ?1",
                params![id, status.to_string(), timestamp],
            )?;
            return Ok(());
        }

        let changed = conn.execute(
            "UPDATE episodes SET status = ?2 WHERE id = ?1",
            params![id, status.to_string()],
        )?;
        if changed == 0 {
            return Err(FieldcastError::NotFound(format!("episode {}", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl MissionStore for SqliteStore {
    async fn get(&self, id: &str) -> Result<Option<Mission>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, question, category, guide_json, target_responses, \
             total_responses FROM missions WHERE id = ?1",
        )?;
        let mut rows = stmt.query_map(params![id], row_to_mission)?;
        rows.next().transpose().map_err(Into::into)
    }

    async fn list(&self) -> Result<Vec<Mission>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, question, category, guide_json, target_responses, \
             total_responses FROM missions ORDER BY title",
        )?;
        let rows = stmt.query_map([], row_to_mission)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    async fn insert(&self, mission: &Mission) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO missions \
             (id, title, question, category, guide_json, target_responses, total_responses) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                mission.id,
                mission.title,
                mission.question,
                mission.category,
                serde_json::to_string(&mission.guide)?,
                mission.target_responses as i64,
                mission.total_responses as i64,
            ],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_recording(id: &str, mission_id: &str, transcript: &str) -> Recording {
        Recording {
            id: id.to_string(),
            mission_id: mission_id.to_string(),
            mission_title: "Shelf check".to_string(),
            promoter_id: "p1".to_string(),
            promoter_name: "Ana".to_string(),
            store_id: "s1".to_string(),
            store_name: "Mercado Azul".to_string(),
            store_city: "Recife".to_string(),
            audio: None,
            transcript: transcript.to_string(),
            duration_seconds: 42.0,
            score: 0,
            status: RecordingStatus::Transcribed,
            created_at: Utc::now(),
            analysis: None,
        }
    }

    fn sample_episode(id: &str) -> Episode {
        let mut episode = Episode::new(
            "m1",
            "Shelf check",
            "Episode title".to_string(),
            "Summary".to_string(),
            "Script".to_string(),
            vec!["r1".to_string()],
            vec!["insight".to_string()],
        );
        episode.id = id.to_string();
        episode
    }

    #[tokio::test]
    async fn test_recording_roundtrip() {
        let store = SqliteStore::in_memory().unwrap();
        let rec = sample_recording("r1", "m1", "all good");
        RecordingStore::insert(&store, &rec).await.unwrap();

        let fetched = RecordingStore::get(&store, "r1").await.unwrap().unwrap();
        assert_eq!(fetched.promoter_name, "Ana");
        assert_eq!(fetched.status, RecordingStatus::Transcribed);
        assert_eq!(fetched.transcript, "all good");
    }

    #[tokio::test]
    async fn test_inline_audio_normalized_on_insert() {
        let store = SqliteStore::in_memory().unwrap();
        let mut rec = sample_recording("r1", "m1", "");
        rec.audio = Some(AudioLocator::Inline(b"fake audio".to_vec()));

        let saved = RecordingStore::insert(&store, &rec).await.unwrap();
        let locator = saved.audio.unwrap();
        let url = match &locator {
            AudioLocator::Remote(url) => url.clone(),
            other => panic!("expected remote locator, got {:?}", other),
        };
        assert!(url.starts_with("blob:"));

        let blob_id = url.strip_prefix("blob:").unwrap();
        let bytes = store.get_audio(blob_id).unwrap().unwrap();
        assert_eq!(bytes, b"fake audio");
    }

    #[tokio::test]
    async fn test_list_by_ids_scoped_to_mission() {
        let store = SqliteStore::in_memory().unwrap();
        RecordingStore::insert(&store, &sample_recording("r1", "m1", "a"))
            .await
            .unwrap();
        RecordingStore::insert(&store, &sample_recording("r2", "m2", "b"))
            .await
            .unwrap();

        let found = store
            .list_by_ids("m1", &["r1".to_string(), "r2".to_string()])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "r1");
    }

    #[tokio::test]
    async fn test_update_status_missing_recording() {
        let store = SqliteStore::in_memory().unwrap();
        let err = RecordingStore::update_status(&store, "nope", RecordingStatus::Approved)
            .await
            .unwrap_err();
        assert!(matches!(err, FieldcastError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_publish_requires_audio() {
        let store = SqliteStore::in_memory().unwrap();
        let ep = EpisodeStore::insert(&store, &sample_episode("ep1")).await.unwrap();
        assert!(ep.audio.is_none());

        let err = EpisodeStore::update_status(&store, "ep1", EpisodeStatus::Published)
            .await
            .unwrap_err();
        assert!(matches!(err, FieldcastError::MissingAudio(_)));
    }

    #[tokio::test]
    async fn test_publish_sets_timestamp_once() {
        let store = SqliteStore::in_memory().unwrap();
        EpisodeStore::insert(&store, &sample_episode("ep1")).await.unwrap();
        store
            .update_audio("ep1", &AudioLocator::Inline(b"mp3".to_vec()))
            .await
            .unwrap();

        EpisodeStore::update_status(&store, "ep1", EpisodeStatus::Published)
            .await
            .unwrap();
        let first = EpisodeStore::get(&store, "ep1").await.unwrap().unwrap();
        let published_at = first.published_at.expect("published_at set");
        assert_eq!(first.status, EpisodeStatus::Published);

        // Second publish is idempotent
        EpisodeStore::update_status(&store, "ep1", EpisodeStatus::Published)
            .await
            .unwrap();
        let second = EpisodeStore::get(&store, "ep1").await.unwrap().unwrap();
        assert_eq!(second.published_at, Some(published_at));
    }

    #[tokio::test]
    async fn test_mission_roundtrip() {
        let store = SqliteStore::in_memory().unwrap();
        let mission = Mission {
            id: "m1".to_string(),
            title: "Shelf check".to_string(),
            question: Some("How are the shelves?".to_string()),
            category: "execution".to_string(),
            guide: vec!["Check stock".to_string()],
            target_responses: 10,
            total_responses: 2,
        };
        MissionStore::insert(&store, &mission).await.unwrap();

        let fetched = MissionStore::get(&store, "m1").await.unwrap().unwrap();
        assert_eq!(fetched.guide, vec!["Check stock"]);
        assert_eq!(fetched.target_responses, 10);
    }

    #[tokio::test]
    async fn test_stats_counts() {
        let store = SqliteStore::in_memory().unwrap();
        let mut pending = sample_recording("r1", "m1", "");
        pending.status = RecordingStatus::Pending;
        RecordingStore::insert(&store, &pending).await.unwrap();
        RecordingStore::insert(&store, &sample_recording("r2", "m1", "text"))
            .await
            .unwrap();
        RecordingStore::update_status(&store, "r2", RecordingStatus::Approved)
            .await
            .unwrap();
        EpisodeStore::insert(&store, &sample_episode("ep1")).await.unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.total_recordings, 2);
        assert_eq!(stats.pending_transcriptions, 1);
        assert_eq!(stats.approved_recordings, 1);
        assert_eq!(stats.total_episodes, 1);
        assert_eq!(stats.published_episodes, 0);
    }
}
