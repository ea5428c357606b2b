pub mod args;
pub mod load;
pub mod types;

pub use args::Args;
pub use types::{
    DEFAULT_PHOTOGRAPHER, DEFAULT_PREVIEW_SUFFIX, DEFAULT_SETTINGS_FILE, ExternalTools, FilmType,
    RunConfig, UserSettings,
};
