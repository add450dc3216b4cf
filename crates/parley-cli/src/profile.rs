use anyhow::{Context, Result};
use parley::providers::configs::OpenAiProviderConfig;
use parley::providers::openai::OpenAiModel;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const PROFILE_DEFAULT_NAME: &str = "default";

// Profile types and structures
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Profile {
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default)]
    pub verbose: bool,
}

impl Profile {
    /// Layer this profile over a configuration loaded from the environment.
    pub fn apply(&self, config: OpenAiProviderConfig) -> Result<OpenAiProviderConfig> {
        let model: OpenAiModel = self
            .model
            .parse()
            .with_context(|| format!("Profile names unknown model '{}'", self.model))?;

        let mut config = config;
        config.model = model;
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        config.verbose |= self.verbose;
        Ok(config)
    }
}

#[derive(Serialize, Deserialize, Default)]
pub struct Profiles {
    pub profile_items: HashMap<String, Profile>,
}

pub fn profile_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home_dir.join(".config").join("parley").join("profiles.json"))
}

pub fn load_profiles_from(path: &Path) -> Result<HashMap<String, Profile>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let profiles: Profiles = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(profiles.profile_items)
}

pub fn save_profile_to(path: &Path, name: &str, profile: Profile) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let mut profile_items = load_profiles_from(path)?;
    profile_items.insert(name.to_string(), profile);
    let content = serde_json::to_string_pretty(&Profiles { profile_items })?;
    fs::write(path, content)?;
    Ok(())
}

pub fn save_profile(name: &str, profile: Profile) -> Result<()> {
    save_profile_to(&profile_path()?, name, profile)
}

pub fn find_existing_profile(name: &str) -> Result<Option<Profile>> {
    let profiles = load_profiles_from(&profile_path()?)?;
    Ok(profiles.get(name).cloned())
}
