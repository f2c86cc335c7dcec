//! Configuration management for Fieldcast.

mod settings;

pub use settings::{
    GeneralSettings, GenerationSettings, NarrationSettings, OpenAiSettings, Settings,
    StoreSettings, TranscriptionSettings,
};
