//! HTTP API server for capture clients and review dashboards.
//!
//! Exposes recording intake and review, episode generation and narration,
//! the mission catalog, stored audio blobs, and aggregate stats.

use crate::analysis::AdherenceAnalyzer;
use crate::cli::Output;
use crate::config::Settings;
use crate::error::FieldcastError;
use crate::generation::{OpenAiGenerator, TextGenerator};
use crate::model::{AudioLocator, EpisodeStatus, Recording, RecordingStatus};
use crate::narration::{Narrator, OpenAiNarrator};
use crate::review::ReviewWorkflow;
use crate::store::{EpisodeStore, MissionStore, RecordingStore, SqliteStore};
use crate::synthesis::EpisodeSynthesizer;
use crate::transcription::{check_payload_size, Transcriber, WhisperTranscriber};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;
use uuid::Uuid;

/// Shared application state.
struct AppState {
    store: Arc<SqliteStore>,
    transcriber: Arc<dyn Transcriber>,
    synthesizer: EpisodeSynthesizer,
    review: ReviewWorkflow,
    analyzer: AdherenceAnalyzer,
    language: String,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let store = Arc::new(SqliteStore::new(&settings.sqlite_path())?);
    let transcriber: Arc<dyn Transcriber> = Arc::new(WhisperTranscriber::new(
        &settings.openai,
        &settings.transcription,
    )?);
    let generator: Arc<dyn TextGenerator> =
        Arc::new(OpenAiGenerator::new(&settings.openai, &settings.generation)?);
    let narrator: Arc<dyn Narrator> =
        Arc::new(OpenAiNarrator::new(&settings.openai, &settings.narration)?);

    let synthesizer = EpisodeSynthesizer::with_components(
        transcriber.clone(),
        generator.clone(),
        narrator,
        store.clone(),
        store.clone(),
        store.clone(),
        &settings.transcription.language,
        settings.transcription.max_concurrent,
    );
    let review = ReviewWorkflow::new(store.clone());
    let analyzer = AdherenceAnalyzer::new(generator, store.clone(), store.clone());

    let state = Arc::new(AppState {
        store,
        transcriber,
        synthesizer,
        review,
        analyzer,
        language: settings.transcription.language.clone(),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/missions", get(list_missions))
        .route("/missions/{id}", get(get_mission))
        .route("/recordings", post(create_recording).get(list_recordings))
        .route("/recordings/{id}", get(get_recording))
        .route("/recordings/{id}/status", patch(set_recording_status))
        .route("/recordings/{id}/analyze", post(analyze_recording))
        .route("/episodes/generate", post(generate_episode))
        .route("/episodes", get(list_episodes))
        .route("/episodes/{id}", get(get_episode))
        .route("/episodes/{id}/narrate", post(narrate_episode))
        .route("/episodes/{id}/status", patch(set_episode_status))
        .route("/audio/{blob_id}", get(fetch_audio))
        .route("/stats", get(stats))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Fieldcast API Server");
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET   /health");
    Output::kv("Missions", "GET   /missions, /missions/:id");
    Output::kv("Recordings", "POST  /recordings, GET /recordings?missionId=");
    Output::kv("Review", "PATCH /recordings/:id/status");
    Output::kv("Analyze", "POST  /recordings/:id/analyze");
    Output::kv("Generate", "POST  /episodes/generate");
    Output::kv("Episodes", "GET   /episodes, /episodes/:id");
    Output::kv("Narrate", "POST  /episodes/:id/narrate");
    Output::kv("Publish", "PATCH /episodes/:id/status");
    Output::kv("Audio", "GET   /audio/:blob_id");
    Output::kv("Stats", "GET   /stats");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRecordingRequest {
    mission_id: String,
    promoter_id: String,
    promoter_name: String,
    store_id: String,
    store_name: String,
    store_city: String,
    /// Audio as a data: URL or remote locator.
    #[serde(default)]
    audio: Option<AudioLocator>,
    /// Declared content type of the audio payload.
    #[serde(default)]
    content_type: Option<String>,
    /// Transcript supplied by the client, if it already has one.
    #[serde(default)]
    transcript: Option<String>,
    #[serde(default)]
    duration_seconds: f64,
}

#[derive(Deserialize)]
struct RecordingsQuery {
    #[serde(rename = "missionId", alias = "mission_id", default)]
    mission_id: Option<String>,
}

#[derive(Deserialize)]
struct StatusRequest {
    status: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateEpisodeRequest {
    mission_id: String,
    #[serde(default)]
    recording_ids: Option<Vec<String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NarrateResponse {
    success: bool,
    audio_url: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Error mapping ===

/// Map a pipeline error to an HTTP status.
///
/// Caller mistakes are 400s, absent entities 404, oversized audio 413, and
/// vendor failures 502 so clients can distinguish retryable upstream
/// trouble from requests that will never succeed.
fn error_status(err: &FieldcastError) -> StatusCode {
    use FieldcastError::*;
    match err {
        InvalidInput(_)
        | NoRecordingsSelected(_)
        | NoTranscribedRecordings(_)
        | NoScript(_)
        | MissingAudio(_) => StatusCode::BAD_REQUEST,
        NotFound(_) => StatusCode::NOT_FOUND,
        PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        TranscriptionFailed(_) | GenerationUnavailable(_) | NarrationUnavailable(_) => {
            StatusCode::BAD_GATEWAY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: FieldcastError) -> Response {
    (
        error_status(&err),
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn list_missions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match MissionStore::list(state.store.as_ref()).await {
        Ok(missions) => Json(missions).into_response(),
        Err(e) => error_response(e),
    }
}

async fn get_mission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match MissionStore::get(state.store.as_ref(), &id).await {
        Ok(Some(mission)) => Json(mission).into_response(),
        Ok(None) => error_response(FieldcastError::NotFound(format!("mission {}", id))),
        Err(e) => error_response(e),
    }
}

/// Recording intake. Transcription at intake is best-effort: a vendor
/// failure leaves the recording pending rather than rejecting the capture.
async fn create_recording(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateRecordingRequest>,
) -> impl IntoResponse {
    let mission = match MissionStore::get(state.store.as_ref(), &req.mission_id).await {
        Ok(Some(mission)) => mission,
        Ok(None) => {
            return error_response(FieldcastError::NotFound(format!(
                "mission {}",
                req.mission_id
            )))
        }
        Err(e) => return error_response(e),
    };

    let mut transcript = req.transcript.unwrap_or_default();
    let mut status = if transcript.trim().is_empty() {
        RecordingStatus::Pending
    } else {
        RecordingStatus::Transcribed
    };

    if status == RecordingStatus::Pending {
        if let Some(AudioLocator::Inline(bytes)) = &req.audio {
            if let Err(e) = check_payload_size(bytes) {
                return error_response(e);
            }
            let content_type = req.content_type.as_deref().unwrap_or("audio/webm");
            match state
                .transcriber
                .transcribe(bytes, content_type, &state.language)
                .await
            {
                Ok(text) => {
                    transcript = text;
                    status = RecordingStatus::Transcribed;
                }
                Err(e) => {
                    warn!("Intake transcription failed, recording stays pending: {}", e);
                }
            }
        }
    }

    let recording = Recording {
        id: format!("rec_{}", Uuid::new_v4()),
        mission_id: req.mission_id,
        mission_title: mission.title,
        promoter_id: req.promoter_id,
        promoter_name: req.promoter_name,
        store_id: req.store_id,
        store_name: req.store_name,
        store_city: req.store_city,
        audio: req.audio,
        transcript,
        duration_seconds: req.duration_seconds.max(0.0),
        score: 0,
        status,
        created_at: Utc::now(),
        analysis: None,
    };

    match RecordingStore::insert(state.store.as_ref(), &recording).await {
        Ok(saved) => (StatusCode::CREATED, Json(saved)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn list_recordings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecordingsQuery>,
) -> impl IntoResponse {
    let result = match &query.mission_id {
        Some(mission_id) => state.store.list_by_mission(mission_id).await,
        None => state.store.list_all().await,
    };
    match result {
        Ok(recordings) => Json(recordings).into_response(),
        Err(e) => error_response(e),
    }
}

async fn get_recording(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match RecordingStore::get(state.store.as_ref(), &id).await {
        Ok(Some(recording)) => Json(recording).into_response(),
        Ok(None) => error_response(FieldcastError::NotFound(format!("recording {}", id))),
        Err(e) => error_response(e),
    }
}

async fn set_recording_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<StatusRequest>,
) -> impl IntoResponse {
    let status: RecordingStatus = match req.status.parse() {
        Ok(status) => status,
        Err(e) => return error_response(e),
    };
    match state.review.set_status(&id, status).await {
        Ok(recording) => Json(recording).into_response(),
        Err(e) => error_response(e),
    }
}

async fn analyze_recording(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.analyzer.analyze_recording(&id).await {
        Ok(analysis) => Json(analysis).into_response(),
        Err(e) => error_response(e),
    }
}

async fn generate_episode(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateEpisodeRequest>,
) -> impl IntoResponse {
    match state
        .synthesizer
        .generate_episode(&req.mission_id, req.recording_ids.as_deref())
        .await
    {
        Ok(episode) => (StatusCode::CREATED, Json(episode)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn list_episodes(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match EpisodeStore::list(state.store.as_ref()).await {
        Ok(episodes) => Json(episodes).into_response(),
        Err(e) => error_response(e),
    }
}

async fn get_episode(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match EpisodeStore::get(state.store.as_ref(), &id).await {
        Ok(Some(episode)) => Json(episode).into_response(),
        Ok(None) => error_response(FieldcastError::NotFound(format!("episode {}", id))),
        Err(e) => error_response(e),
    }
}

async fn narrate_episode(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.synthesizer.narrate_episode(&id).await {
        Ok(locator) => Json(NarrateResponse {
            success: true,
            audio_url: locator.to_wire(),
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

async fn set_episode_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<StatusRequest>,
) -> impl IntoResponse {
    let status: EpisodeStatus = match req.status.parse() {
        Ok(status) => status,
        Err(e) => return error_response(e),
    };
    if let Err(e) = EpisodeStore::update_status(state.store.as_ref(), &id, status).await {
        return error_response(e);
    }
    match EpisodeStore::get(state.store.as_ref(), &id).await {
        Ok(Some(episode)) => Json(episode).into_response(),
        Ok(None) => error_response(FieldcastError::NotFound(format!("episode {}", id))),
        Err(e) => error_response(e),
    }
}

async fn fetch_audio(
    State(state): State<Arc<AppState>>,
    Path(blob_id): Path<String>,
) -> impl IntoResponse {
    match state.store.get_audio(&blob_id) {
        Ok(Some(bytes)) => ([(header::CONTENT_TYPE, "audio/mpeg")], bytes).into_response(),
        Ok(None) => error_response(FieldcastError::NotFound(format!("audio blob {}", blob_id))),
        Err(e) => error_response(e),
    }
}

async fn stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.stats() {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcription::MAX_AUDIO_BYTES;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            error_status(&FieldcastError::NoRecordingsSelected("m1".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&FieldcastError::NoScript("ep1".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&FieldcastError::NotFound("episode ep1".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&FieldcastError::PayloadTooLarge {
                size: MAX_AUDIO_BYTES + 1,
                max: MAX_AUDIO_BYTES
            }),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            error_status(&FieldcastError::GenerationUnavailable("timeout".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            error_status(&FieldcastError::UnparseableModelOutput {
                reason: "no JSON object found".into(),
                raw: "sorry".into()
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            error_status(&FieldcastError::Persistence("disk full".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_create_recording_request_wire_format() {
        let req: CreateRecordingRequest = serde_json::from_str(
            r#"{
                "missionId": "m1",
                "promoterId": "p1",
                "promoterName": "Ana",
                "storeId": "s1",
                "storeName": "Mercado Azul",
                "storeCity": "Recife",
                "audio": "data:audio/webm;base64,aGVsbG8=",
                "durationSeconds": 42.5
            }"#,
        )
        .unwrap();
        assert_eq!(req.mission_id, "m1");
        assert_eq!(req.duration_seconds, 42.5);
        assert!(matches!(req.audio, Some(AudioLocator::Inline(_))));
        assert!(req.transcript.is_none());
    }

    #[test]
    fn test_generate_request_ids_optional() {
        let req: GenerateEpisodeRequest =
            serde_json::from_str(r#"{"missionId": "m1"}"#).unwrap();
        assert!(req.recording_ids.is_none());

        let req: GenerateEpisodeRequest =
            serde_json::from_str(r#"{"missionId": "m1", "recordingIds": ["r1", "r2"]}"#).unwrap();
        assert_eq!(req.recording_ids.unwrap().len(), 2);
    }
}
