//! Episode synthesis pipeline.
//!
//! Coordinates recording selection, transcript backfill, prompt compilation,
//! model invocation, output parsing, and episode persistence, plus the
//! narration stage.
//!
//! The transcript backfill mutates recordings (transcript + status) even if
//! a later step fails or the caller abandons the run. There is no
//! compensating rollback; the side effect is at-least-once and visible to
//! operators. Concurrent runs for the same mission may select overlapping
//! recordings and produce two episodes referencing the same ids; this is a
//! known race, accepted rather than prevented.

use crate::config::Settings;
use crate::error::{FieldcastError, Result};
use crate::generation::{parser, prompts, OpenAiGenerator, TextGenerator};
use crate::model::{AudioLocator, Episode, EpisodeStatus, Recording, RecordingStatus};
use crate::narration::{Narrator, OpenAiNarrator};
use crate::store::{EpisodeStore, MissionStore, RecordingStore, SqliteStore};
use crate::transcription::{Transcriber, WhisperTranscriber};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Fallback episode title when the model returns none.
const DEFAULT_EPISODE_TITLE: &str = "New episode";

/// The episode synthesis pipeline.
pub struct EpisodeSynthesizer {
    transcriber: Arc<dyn Transcriber>,
    generator: Arc<dyn TextGenerator>,
    narrator: Arc<dyn Narrator>,
    recordings: Arc<dyn RecordingStore>,
    episodes: Arc<dyn EpisodeStore>,
    missions: Arc<dyn MissionStore>,
    http: reqwest::Client,
    language: String,
    max_concurrent: usize,
}

impl EpisodeSynthesizer {
    /// Create a synthesizer with the default OpenAI capabilities and the
    /// SQLite store from settings.
    pub fn new(settings: &Settings) -> Result<Self> {
        let store = Arc::new(SqliteStore::new(&settings.sqlite_path())?);
        let transcriber = Arc::new(WhisperTranscriber::new(
            &settings.openai,
            &settings.transcription,
        )?);
        let generator = Arc::new(OpenAiGenerator::new(&settings.openai, &settings.generation)?);
        let narrator = Arc::new(OpenAiNarrator::new(&settings.openai, &settings.narration)?);

        Ok(Self::with_components(
            transcriber,
            generator,
            narrator,
            store.clone(),
            store.clone(),
            store,
            &settings.transcription.language,
            settings.transcription.max_concurrent,
        ))
    }

    /// Create a synthesizer with custom components.
    #[allow(clippy::too_many_arguments)]
    pub fn with_components(
        transcriber: Arc<dyn Transcriber>,
        generator: Arc<dyn TextGenerator>,
        narrator: Arc<dyn Narrator>,
        recordings: Arc<dyn RecordingStore>,
        episodes: Arc<dyn EpisodeStore>,
        missions: Arc<dyn MissionStore>,
        language: &str,
        max_concurrent: usize,
    ) -> Self {
        Self {
            transcriber,
            generator,
            narrator,
            recordings,
            episodes,
            missions,
            http: reqwest::Client::new(),
            language: language.to_string(),
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Generate an episode for a mission.
    ///
    /// With explicit recording ids the candidate set is exactly those
    /// recordings (scoped to the mission, rejected ones included — an admin
    /// may override rejection per episode); otherwise every approved or
    /// transcribed recording of the mission.
    #[instrument(skip(self, explicit_recording_ids), fields(mission_id = %mission_id))]
    pub async fn generate_episode(
        &self,
        mission_id: &str,
        explicit_recording_ids: Option<&[String]>,
    ) -> Result<Episode> {
        let mission = self
            .missions
            .get(mission_id)
            .await?
            .ok_or_else(|| FieldcastError::NotFound(format!("mission {}", mission_id)))?;

        // Step 1: resolve the candidate set
        let candidates = match explicit_recording_ids {
            Some(ids) if !ids.is_empty() => self.recordings.list_by_ids(mission_id, ids).await?,
            _ => self
                .recordings
                .list_by_mission(mission_id)
                .await?
                .into_iter()
                .filter(|r| {
                    matches!(
                        r.status,
                        RecordingStatus::Approved | RecordingStatus::Transcribed
                    )
                })
                .collect(),
        };

        if candidates.is_empty() {
            return Err(FieldcastError::NoRecordingsSelected(mission_id.to_string()));
        }
        info!("Selected {} candidate recordings", candidates.len());

        // Step 3: best-effort transcript backfill, then re-fetch in the
        // candidate set's original order
        let transcribed = self.backfill_transcripts(&candidates).await?;

        if transcribed.is_empty() {
            return Err(FieldcastError::NoTranscribedRecordings(
                mission_id.to_string(),
            ));
        }
        info!("{} recordings carry transcripts", transcribed.len());

        // Steps 5-6: compile the prompt and invoke the generator
        let compiled = prompts::compile_transcripts(&transcribed);
        let prompt = prompts::episode_prompt(&mission.title, transcribed.len(), &compiled);
        debug!("Compiled prompt of {} characters", prompt.len());

        let raw = self.generator.complete(&prompt).await?;

        // Step 8: parse; on failure nothing is persisted
        let draft = parser::parse_episode_draft(&raw)?;

        // Steps 9-10: construct and persist
        let title = if draft.title.is_empty() {
            DEFAULT_EPISODE_TITLE.to_string()
        } else {
            draft.title
        };
        let episode = Episode::new(
            mission_id,
            &mission.title,
            title,
            draft.summary,
            draft.script,
            transcribed.iter().map(|r| r.id.clone()).collect(),
            draft.key_insights,
        );

        let saved = self
            .episodes
            .insert(&episode)
            .await
            .map_err(|e| FieldcastError::Persistence(e.to_string()))?;

        info!(episode_id = %saved.id, recordings = saved.total_recordings, "Episode generated");
        Ok(saved)
    }

    /// Narrate a persisted episode's script and attach the audio.
    #[instrument(skip(self))]
    pub async fn narrate_episode(&self, episode_id: &str) -> Result<AudioLocator> {
        let episode = self
            .episodes
            .get(episode_id)
            .await?
            .ok_or_else(|| FieldcastError::NotFound(format!("episode {}", episode_id)))?;

        if episode.script.trim().is_empty() {
            return Err(FieldcastError::NoScript(episode_id.to_string()));
        }

        // Narrator failure leaves the episode untouched
        let audio = self.narrator.synthesize(&episode.script).await?;
        info!("Narration produced {} bytes", audio.len());

        let locator = self
            .episodes
            .update_audio(episode_id, &AudioLocator::Inline(audio))
            .await?;
        self.episodes
            .update_status(episode_id, EpisodeStatus::InReview)
            .await?;

        Ok(locator)
    }

    /// Transcribe candidates lacking a transcript (bounded concurrency) and
    /// return the usable set, re-fetched, in the original candidate order.
    /// Items whose transcription fails are dropped with a warning rather
    /// than aborting the run.
    async fn backfill_transcripts(&self, candidates: &[Recording]) -> Result<Vec<Recording>> {
        let missing: Vec<&Recording> = candidates.iter().filter(|r| !r.has_transcript()).collect();

        if !missing.is_empty() {
            info!("Backfilling transcripts for {} recordings", missing.len());

            // Explicit per-item results so callers can tell exactly which
            // items were dropped and why
            let work: Vec<(String, Option<AudioLocator>)> = missing
                .iter()
                .map(|rec| (rec.id.clone(), rec.audio.clone()))
                .collect();
            let results: Vec<(String, Result<String>)> =
                stream::iter(work)
                    .map(|(id, audio)| async move {
                        let result = self.transcribe_one(&id, audio.as_ref()).await;
                        (id, result)
                    })
                .buffer_unordered(self.max_concurrent)
                .collect()
                .await;

            for (id, result) in results {
                match result {
                    Ok(transcript) => {
                        self.recordings.update_transcript(&id, &transcript).await?;
                        self.recordings
                            .update_status(&id, RecordingStatus::Transcribed)
                            .await?;
                        debug!(recording_id = %id, "Transcript backfilled");
                    }
                    Err(e) => {
                        warn!(recording_id = %id, "Dropping recording, transcription failed: {}", e);
                    }
                }
            }
        }

        // Re-fetch after the mutating step; keep the original stable order
        let mut usable = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if let Some(current) = self.recordings.get(&candidate.id).await? {
                if current.has_transcript() {
                    usable.push(current);
                }
            }
        }
        Ok(usable)
    }

    /// Resolve a recording's audio and transcribe it.
    async fn transcribe_one(
        &self,
        recording_id: &str,
        audio: Option<&AudioLocator>,
    ) -> Result<String> {
        let locator = audio.ok_or_else(|| {
            FieldcastError::TranscriptionFailed(format!(
                "Recording {} has no audio to transcribe",
                recording_id
            ))
        })?;

        let bytes = self.resolve_audio(locator).await?;
        self.transcriber
            .transcribe(&bytes, "audio/webm", &self.language)
            .await
    }

    /// Fetch audio bytes for a locator: inline payloads pass through, blob
    /// references hit the store, anything else is fetched over HTTP.
    async fn resolve_audio(&self, locator: &AudioLocator) -> Result<Vec<u8>> {
        match locator {
            AudioLocator::Inline(bytes) => Ok(bytes.clone()),
            AudioLocator::Remote(url) => {
                if let Some(blob_id) = url.strip_prefix("blob:") {
                    self.recordings
                        .fetch_audio_blob(blob_id)
                        .await?
                        .ok_or_else(|| {
                            FieldcastError::TranscriptionFailed(format!(
                                "Audio blob {} not found",
                                blob_id
                            ))
                        })
                } else {
                    let response = self.http.get(url).send().await?.error_for_status()?;
                    Ok(response.bytes().await?.to_vec())
                }
            }
        }
    }
}
