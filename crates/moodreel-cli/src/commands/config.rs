use super::prompts;
use super::session::load_config;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use moodreel_config::{
    is_real_key, Config, CredentialStore, PathManager, OMDB_PLACEHOLDER_KEY, TMDB_PLACEHOLDER_KEY,
};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(full, output),
        crate::ConfigCommands::Init { force } => init_config(force, output),
        crate::ConfigCommands::SetKey { tmdb: _, omdb, value } => {
            let service = if omdb { KeyService::Omdb } else { KeyService::Tmdb };
            set_key(service, value, output)
        }
    }
}

fn section(title: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config_file = paths.config_file();
    if !config_file.exists() {
        output.warn(format!("Configuration file not found at: {}", config_file.display()));
        output.info("Using defaults. Run 'moodreel config init' to write them to disk.");
    }
    let config = load_config(&paths)?;

    let key_display = |key: &str, placeholder: &str| {
        if full {
            key.to_string()
        } else {
            mask_key(key, placeholder)
        }
    };
    let tmdb_key = key_display(&config.tmdb.api_key, TMDB_PLACEHOLDER_KEY);
    let omdb_key = config
        .omdb
        .as_ref()
        .map(|omdb| key_display(&omdb.api_key, OMDB_PLACEHOLDER_KEY));

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file.display().to_string(),
            "store_dir": paths.store_dir().display().to_string(),
            "tmdb": {
                "api_key": tmdb_key,
                "configured": config.is_tmdb_configured(),
                "base_url": config.tmdb.base_url,
                "image_base_url": config.tmdb.image_base_url,
                "poster_size": config.tmdb.poster_size,
                "min_vote_count": config.tmdb.min_vote_count,
            },
            "omdb": config.omdb.as_ref().map(|omdb| json!({
                "enabled": omdb.enabled,
                "api_key": omdb_key,
                "configured": config.is_omdb_configured(),
                "base_url": omdb.base_url,
            })),
            "watchlist": {
                "capacity": config.watchlist.capacity,
                "storage_key": config.watchlist.storage_key,
            },
            "logging": {
                "file": config.logging.file.as_ref().map(|p| p.display().to_string()),
            },
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    println!("\n{}", "Configuration".bright_cyan().bold());

    let mut files = section("Files");
    files.add_row(vec![Cell::new("Config"), Cell::new(config_file.display())]);
    files.add_row(vec![Cell::new("Credentials"), Cell::new(paths.credentials_file().display())]);
    files.add_row(vec![Cell::new("Watchlist store"), Cell::new(paths.store_dir().display())]);
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| format!("stderr only (set [logging] file, e.g. {})", paths.log_dir().join("moodreel.log").display()));
    files.add_row(vec![Cell::new("Log file"), Cell::new(log_file)]);
    println!("{}", files);

    let mut tmdb = section("TMDb");
    tmdb.add_row(vec![Cell::new("API Key"), Cell::new(&tmdb_key)]);
    tmdb.add_row(vec![Cell::new("Base URL"), Cell::new(&config.tmdb.base_url)]);
    tmdb.add_row(vec![Cell::new("Image Base URL"), Cell::new(&config.tmdb.image_base_url)]);
    tmdb.add_row(vec![Cell::new("Poster Size"), Cell::new(&config.tmdb.poster_size)]);
    tmdb.add_row(vec![Cell::new("Min Vote Count"), Cell::new(config.tmdb.min_vote_count)]);
    println!("{}", tmdb);

    if let Some(omdb) = &config.omdb {
        let mut table = section("OMDb (fallback)");
        table.add_row(vec![Cell::new("Enabled"), Cell::new(omdb.enabled)]);
        table.add_row(vec![Cell::new("API Key"), Cell::new(omdb_key.unwrap_or_default())]);
        table.add_row(vec![Cell::new("Base URL"), Cell::new(&omdb.base_url)]);
        println!("{}", table);
    }

    let mut watchlist = section("Watchlist");
    watchlist.add_row(vec![Cell::new("Capacity"), Cell::new(config.watchlist.capacity)]);
    watchlist.add_row(vec![Cell::new("Storage Key"), Cell::new(&config.watchlist.storage_key)]);
    println!("{}", watchlist);

    if !config.is_tmdb_configured() {
        output.warn("TMDb API key is not set. Run 'moodreel config set-key --tmdb'.");
    }
    Ok(())
}

fn init_config(force: bool, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config_file = paths.config_file();

    if config_file.exists() && !force {
        let overwrite = prompts::prompt_yes_no(
            &format!("{} already exists. Overwrite with defaults?", config_file.display()),
            false,
        )?;
        if !overwrite {
            output.info("Configuration left unchanged.");
            return Ok(());
        }
    }

    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create directories: {}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyService {
    Tmdb,
    Omdb,
}

impl KeyService {
    fn name(self) -> &'static str {
        match self {
            KeyService::Tmdb => "TMDb",
            KeyService::Omdb => "OMDb",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            KeyService::Tmdb => TMDB_PLACEHOLDER_KEY,
            KeyService::Omdb => OMDB_PLACEHOLDER_KEY,
        }
    }
}

/// Store an API key in the credentials file, prompting when not given.
fn set_key(service: KeyService, value: Option<String>, output: &Output) -> Result<()> {
    let key = match value {
        Some(value) => value,
        None => prompts::prompt_password(&format!("{} API key", service.name()))?,
    };
    let key = key.trim().to_string();
    if !is_real_key(&key, service.placeholder()) {
        return Err(eyre!("{} API key cannot be empty", service.name()));
    }

    let paths = PathManager::default();
    let mut credentials = CredentialStore::new(paths.credentials_file());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
    match service {
        KeyService::Tmdb => credentials.set_tmdb_api_key(key.clone()),
        KeyService::Omdb => credentials.set_omdb_api_key(key.clone()),
    }
    credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    output.success(format!(
        "{} API key saved ({}) to {}",
        service.name(),
        mask_key(&key, service.placeholder()),
        credentials.path().display()
    ));
    Ok(())
}

fn mask_key(key: &str, placeholder: &str) -> String {
    if !is_real_key(key, placeholder) {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
