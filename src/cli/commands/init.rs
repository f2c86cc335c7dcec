//! Init command - first-run setup.

use crate::cli::Output;
use crate::config::Settings;
use crate::model::Mission;
use crate::store::{MissionStore, SqliteStore};

/// Run the init command: config file, data directory, database schema, and
/// a starter mission catalog when the database is empty.
pub async fn run_init(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Fieldcast Setup");

    // Data directory
    let data_dir = settings.data_dir();
    if data_dir.exists() {
        Output::info(&format!("Data directory exists: {}", data_dir.display()));
    } else {
        std::fs::create_dir_all(&data_dir)?;
        Output::success(&format!("Created data directory: {}", data_dir.display()));
    }

    // Config file
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::info(&format!("Config file exists: {}", config_path.display()));
    } else {
        settings.save_to(&config_path)?;
        Output::success(&format!("Created config file: {}", config_path.display()));
    }

    // API key
    if settings.openai.resolve_api_key().is_none() {
        Output::warning(
            "No OpenAI API key configured. Set OPENAI_API_KEY or the openai.api_key \
             config value before transcribing, generating, or narrating.",
        );
    } else {
        Output::success("OpenAI API key is configured");
    }

    // Database + starter missions
    let store = SqliteStore::new(&settings.sqlite_path())?;
    let existing = MissionStore::list(&store).await?;
    if existing.is_empty() {
        for mission in starter_missions() {
            MissionStore::insert(&store, &mission).await?;
        }
        Output::success("Seeded starter mission catalog (3 missions)");
    } else {
        Output::info(&format!("Mission catalog has {} missions", existing.len()));
    }

    println!();
    Output::info("Next steps:");
    Output::list_item("fieldcast serve                  start the HTTP API");
    Output::list_item("fieldcast list missions          see the mission catalog");
    Output::list_item("fieldcast generate <mission-id>  compile an episode");

    Ok(())
}

/// Missions seeded on first run so the pipeline is usable out of the box.
fn starter_missions() -> Vec<Mission> {
    vec![
        Mission {
            id: "mission-shelf".to_string(),
            title: "Shelf availability check".to_string(),
            question: Some("How does our product look on the shelf today?".to_string()),
            category: "execution".to_string(),
            guide: vec![
                "State the stock level you found".to_string(),
                "Count the facings versus the planogram".to_string(),
                "Name any missing SKUs".to_string(),
            ],
            target_responses: 20,
            total_responses: 0,
        },
        Mission {
            id: "mission-pricing".to_string(),
            title: "Competitor pricing survey".to_string(),
            question: Some("What are competitors charging this week?".to_string()),
            category: "intelligence".to_string(),
            guide: vec![
                "Read the shelf price of each competitor".to_string(),
                "Mention any active discounts".to_string(),
            ],
            target_responses: 15,
            total_responses: 0,
        },
        Mission {
            id: "mission-promo".to_string(),
            title: "Promotion compliance".to_string(),
            question: Some("Is the current promotion set up correctly?".to_string()),
            category: "execution".to_string(),
            guide: vec![
                "Confirm the promotional display is assembled".to_string(),
                "Check the promotional price tag".to_string(),
                "Describe the display location in the store".to_string(),
            ],
            target_responses: 10,
            total_responses: 0,
        },
    ]
}
