//! List command implementation.

use crate::cli::output::{content_preview, format_duration};
use crate::cli::Output;
use crate::config::Settings;
use crate::store::{EpisodeStore, MissionStore, RecordingStore, SqliteStore};
use anyhow::{bail, Result};

/// Run the list command.
pub async fn run_list(entity: &str, settings: Settings) -> Result<()> {
    let store = SqliteStore::new(&settings.sqlite_path())?;

    match entity {
        "recordings" => list_recordings(&store).await,
        "episodes" => list_episodes(&store).await,
        "missions" => list_missions(&store).await,
        other => bail!("Unknown entity '{}'. Expected recordings, episodes, or missions.", other),
    }
}

async fn list_recordings(store: &SqliteStore) -> Result<()> {
    let recordings = store.list_all().await?;
    if recordings.is_empty() {
        Output::info("No recordings yet. Capture clients POST them to /recordings.");
        return Ok(());
    }

    Output::header(&format!("Recordings ({})", recordings.len()));
    for r in &recordings {
        Output::list_item(&format!(
            "{} - {} at {} ({}) [{}] {} score {}",
            r.id,
            r.promoter_name,
            r.store_name,
            r.store_city,
            r.status,
            format_duration(r.duration_seconds),
            r.score,
        ));
    }
    Ok(())
}

async fn list_episodes(store: &SqliteStore) -> Result<()> {
    let episodes = EpisodeStore::list(store).await?;
    if episodes.is_empty() {
        Output::info("No episodes yet. Use 'fieldcast generate <mission-id>' to create one.");
        return Ok(());
    }

    Output::header(&format!("Episodes ({})", episodes.len()));
    for e in &episodes {
        Output::list_item(&format!(
            "{} - {} [{}] {} recordings",
            e.id, e.title, e.status, e.total_recordings,
        ));
        if !e.summary.is_empty() {
            println!("      {}", content_preview(&e.summary, 120));
        }
    }
    Ok(())
}

async fn list_missions(store: &SqliteStore) -> Result<()> {
    let missions = MissionStore::list(store).await?;
    if missions.is_empty() {
        Output::info("No missions in the catalog. Run 'fieldcast init' to seed starters.");
        return Ok(());
    }

    Output::header(&format!("Missions ({})", missions.len()));
    for m in &missions {
        Output::list_item(&format!(
            "{} - {} ({}) {}/{} responses",
            m.id, m.title, m.category, m.total_responses, m.target_responses,
        ));
    }
    Ok(())
}
