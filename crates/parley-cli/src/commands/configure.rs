use anyhow::Result;
use console::style;
use parley::providers::openai::{OpenAiModel, OPENAI_HOST};
use strum::IntoEnumIterator;

use crate::profile::{find_existing_profile, profile_path, save_profile, Profile};

pub async fn handle_configure(
    provided_profile_name: Option<String>,
    provided_model: Option<String>,
    provided_host: Option<String>,
) -> Result<()> {
    cliclack::intro(style(" configure-parley ").on_cyan().black())?;

    let profile_name = if let Some(name) = provided_profile_name {
        name
    } else {
        cliclack::input("Which profile should we configure?")
            .default_input("default")
            .interact()?
    };

    // Use default values from existing profile
    let existing_profile = find_existing_profile(&profile_name)?;
    if existing_profile.is_some() {
        let _ = cliclack::log::info(format!(
            "We are updating the existing profile for {}",
            profile_name
        ));
    }

    let model = if let Some(model) = provided_model {
        model.parse::<OpenAiModel>()?.to_string()
    } else {
        let default_model = existing_profile
            .as_ref()
            .map_or_else(|| OpenAiModel::default().to_string(), |p| p.model.clone());
        let items: Vec<(String, String, &str)> = OpenAiModel::iter()
            .map(|m| (m.to_string(), m.to_string(), ""))
            .collect();
        cliclack::select("Which model should we use?")
            .initial_value(default_model)
            .items(&items)
            .interact()?
    };

    let host = if let Some(host) = provided_host {
        host
    } else {
        let default_host = existing_profile
            .as_ref()
            .and_then(|p| p.host.clone())
            .unwrap_or_else(|| OPENAI_HOST.to_string());
        cliclack::input("Which API host should we call?")
            .default_input(&default_host)
            .interact()?
    };

    let verbose = cliclack::confirm("Echo prompts and replies while running?")
        .initial_value(existing_profile.as_ref().is_some_and(|p| p.verbose))
        .interact()?;

    let profile = Profile {
        model,
        host: (host != OPENAI_HOST).then_some(host),
        verbose,
    };
    save_profile(&profile_name, profile)?;

    cliclack::outro(format!(
        "Profile {} saved to {}",
        style(&profile_name).green(),
        style(profile_path()?.display()).dim()
    ))?;
    Ok(())
}
