//! Guide-adherence analysis.
//!
//! Compares a recording's transcript against the mission guide via the
//! text generator and stores the resulting score/coverage on the recording.

use crate::error::{FieldcastError, Result};
use crate::generation::{parser, prompts, TextGenerator};
use crate::model::RecordingAnalysis;
use crate::store::{MissionStore, RecordingStore};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Analyzer over the recording and mission stores.
pub struct AdherenceAnalyzer {
    generator: Arc<dyn TextGenerator>,
    recordings: Arc<dyn RecordingStore>,
    missions: Arc<dyn MissionStore>,
}

impl AdherenceAnalyzer {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        recordings: Arc<dyn RecordingStore>,
        missions: Arc<dyn MissionStore>,
    ) -> Self {
        Self {
            generator,
            recordings,
            missions,
        }
    }

    /// Analyze a recording's adherence to its mission guide and persist
    /// the result. An unparseable model reply degrades to a neutral
    /// analysis instead of failing the request.
    #[instrument(skip(self))]
    pub async fn analyze_recording(&self, recording_id: &str) -> Result<RecordingAnalysis> {
        let recording = self
            .recordings
            .get(recording_id)
            .await?
            .ok_or_else(|| FieldcastError::NotFound(format!("recording {}", recording_id)))?;

        if !recording.has_transcript() {
            return Err(FieldcastError::InvalidInput(format!(
                "Recording {} has no transcript to analyze",
                recording_id
            )));
        }

        let mission = self
            .missions
            .get(&recording.mission_id)
            .await?
            .ok_or_else(|| FieldcastError::NotFound(format!("mission {}", recording.mission_id)))?;

        let prompt = prompts::analysis_prompt(&mission, &recording.transcript);
        let raw = self.generator.complete(&prompt).await?;

        let analysis = match parser::parse_json_object::<RecordingAnalysis>(&raw) {
            Ok(mut analysis) => {
                analysis.score = analysis.score.min(100);
                analysis
            }
            Err(e) => {
                warn!("Analysis reply was not parseable, using neutral fallback: {}", e);
                RecordingAnalysis {
                    score: 75,
                    covered: Vec::new(),
                    missing: Vec::new(),
                    summary: Some("Report received; detailed analysis unavailable".to_string()),
                }
            }
        };

        self.recordings
            .update_analysis(recording_id, &analysis)
            .await?;
        info!(score = analysis.score, "Recording analyzed");

        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Mission, Recording, RecordingStatus};
    use crate::store::SqliteStore;
    use async_trait::async_trait;
    use chrono::Utc;

    struct FixedGenerator(String);

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    async fn seeded_store() -> Arc<SqliteStore> {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        MissionStore::insert(
            store.as_ref(),
            &Mission {
                id: "m1".to_string(),
                title: "Shelf check".to_string(),
                question: None,
                category: "execution".to_string(),
                guide: vec!["Check stock".to_string(), "Note prices".to_string()],
                target_responses: 10,
                total_responses: 0,
            },
        )
        .await
        .unwrap();

        RecordingStore::insert(
            store.as_ref(),
            &Recording {
                id: "r1".to_string(),
                mission_id: "m1".to_string(),
                mission_title: "Shelf check".to_string(),
                promoter_id: "p1".to_string(),
                promoter_name: "Ana".to_string(),
                store_id: "s1".to_string(),
                store_name: "Mercado Azul".to_string(),
                store_city: "Recife".to_string(),
                audio: None,
                transcript: "Stock was low, prices unchanged.".to_string(),
                duration_seconds: 20.0,
                score: 0,
                status: RecordingStatus::Transcribed,
                created_at: Utc::now(),
                analysis: None,
            },
        )
        .await
        .unwrap();

        store
    }

    #[tokio::test]
    async fn test_analysis_persisted_with_score() {
        let store = seeded_store().await;
        let generator = Arc::new(FixedGenerator(
            r#"{"score": 80, "covered": ["Check stock"], "missing": ["Note prices"], "summary": "Low stock"}"#
                .to_string(),
        ));
        let analyzer = AdherenceAnalyzer::new(generator, store.clone(), store.clone());

        let analysis = analyzer.analyze_recording("r1").await.unwrap();
        assert_eq!(analysis.score, 80);
        assert_eq!(analysis.covered, vec!["Check stock"]);

        let rec = RecordingStore::get(store.as_ref(), "r1").await.unwrap().unwrap();
        assert_eq!(rec.score, 80);
        assert_eq!(rec.analysis.unwrap().missing, vec!["Note prices"]);
    }

    #[tokio::test]
    async fn test_unparseable_reply_falls_back() {
        let store = seeded_store().await;
        let generator = Arc::new(FixedGenerator("sorry, cannot help".to_string()));
        let analyzer = AdherenceAnalyzer::new(generator, store.clone(), store.clone());

        let analysis = analyzer.analyze_recording("r1").await.unwrap();
        assert_eq!(analysis.score, 75);
        assert!(analysis.covered.is_empty());
    }

    #[tokio::test]
    async fn test_empty_transcript_rejected() {
        let store = seeded_store().await;
        RecordingStore::update_transcript(store.as_ref(), "r1", "")
            .await
            .unwrap();
        let generator = Arc::new(FixedGenerator("{}".to_string()));
        let analyzer = AdherenceAnalyzer::new(generator, store.clone(), store.clone());

        let err = analyzer.analyze_recording("r1").await.unwrap_err();
        assert!(matches!(err, FieldcastError::InvalidInput(_)));
    }
}
