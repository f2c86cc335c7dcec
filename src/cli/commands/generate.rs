//! Generate command implementation.

use crate::cli::output::content_preview;
use crate::cli::Output;
use crate::config::Settings;
use crate::synthesis::EpisodeSynthesizer;
use anyhow::Result;

/// Run the generate command.
pub async fn run_generate(
    mission_id: &str,
    recording_ids: &[String],
    settings: Settings,
) -> Result<()> {
    let synthesizer = EpisodeSynthesizer::new(&settings)?;

    let explicit = if recording_ids.is_empty() {
        None
    } else {
        Some(recording_ids)
    };

    Output::info(&format!("Generating episode for mission {}...", mission_id));

    match synthesizer.generate_episode(mission_id, explicit).await {
        Ok(episode) => {
            Output::header(&format!("Episode: {}", episode.title));
            Output::kv("Id", &episode.id);
            Output::kv("Mission", &episode.mission_title);
            Output::kv("Recordings", &episode.total_recordings.to_string());
            Output::kv("Status", &episode.status.to_string());
            Output::kv("Summary", &content_preview(&episode.summary, 200));
            if !episode.key_insights.is_empty() {
                println!();
                println!("Key insights:");
                for insight in &episode.key_insights {
                    Output::list_item(insight);
                }
            }
            println!();
            Output::info(&format!(
                "Narrate it with: fieldcast narrate {}",
                episode.id
            ));
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Episode generation failed: {}", e));
            Err(e.into())
        }
    }
}
