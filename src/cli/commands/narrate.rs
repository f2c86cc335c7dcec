//! Narrate command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::synthesis::EpisodeSynthesizer;
use anyhow::Result;

/// Run the narrate command.
pub async fn run_narrate(episode_id: &str, settings: Settings) -> Result<()> {
    let synthesizer = EpisodeSynthesizer::new(&settings)?;

    Output::info(&format!("Narrating episode {}...", episode_id));

    match synthesizer.narrate_episode(episode_id).await {
        Ok(locator) => {
            Output::success("Narration attached");
            Output::kv("Audio", &locator.to_wire());
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Narration failed: {}", e));
            Err(e.into())
        }
    }
}
