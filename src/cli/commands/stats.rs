//! Stats command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::store::SqliteStore;
use anyhow::Result;

/// Run the stats command.
pub async fn run_stats(settings: Settings) -> Result<()> {
    let store = SqliteStore::new(&settings.sqlite_path())?;
    let stats = store.stats()?;

    Output::header("Pipeline Stats");
    Output::kv("Total recordings", &stats.total_recordings.to_string());
    Output::kv(
        "Pending transcriptions",
        &stats.pending_transcriptions.to_string(),
    );
    Output::kv("Approved recordings", &stats.approved_recordings.to_string());
    Output::kv("Total episodes", &stats.total_episodes.to_string());
    Output::kv("Published episodes", &stats.published_episodes.to_string());

    Ok(())
}
