use crate::assistant::DEFAULT_MODEL;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Folder holding the persisted custom layer file.
    pub storage_folder: PathBuf,
    /// Optional folder of extra vector files loaded as built-in layers.
    pub data_folder: Option<PathBuf>,
    /// Gemini API key; without it the assistant endpoint is disabled.
    pub api_key: Option<String>,
    pub assistant_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8000,
            storage_folder: PathBuf::from("storage"),
            data_folder: None,
            api_key: None,
            assistant_model: DEFAULT_MODEL.to_string(),
        }
    }
}
