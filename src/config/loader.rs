use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use super::env::{Env, parse_bool};
use super::schema::{ConfigFile, OutputFormat, OutputSettings, Profile, Settings};
use crate::paginator::{DEFAULT_PER_PAGE, DEFAULT_WINDOW_SIZE};

const LOCAL_CANDIDATES: [&str; 3] = [
    ".pagenav/config.yaml",
    ".pagenav/config.yml",
    ".pagenav/config.json",
];

const GLOBAL_CANDIDATES: [&str; 3] = [
    "pagenav/config.yaml",
    "pagenav/config.yml",
    "pagenav/config.json",
];

#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    pub profile: Option<String>,
    pub url_prefix: Option<String>,
    pub per_page: Option<u64>,
    pub window_size: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub cli: CliOverrides,
    pub cwd: PathBuf,
    pub home_dir: Option<PathBuf>,
    pub xdg_config_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config_path: Option<PathBuf>,
    pub profile_name: String,
    pub paging: PagingSettings,
    pub settings: SettingsResolved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingSettings {
    pub url_prefix: Option<String>,
    pub per_page: u64,
    pub window_size: u64,
}

impl Default for PagingSettings {
    fn default() -> Self {
        Self {
            url_prefix: None,
            per_page: DEFAULT_PER_PAGE,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettingsResolved {
    pub output: OutputSettingsResolved,
}

#[derive(Debug, Clone)]
pub struct OutputSettingsResolved {
    pub default_format: OutputFormat,
    pub json: JsonSettingsResolved,
}

#[derive(Debug, Clone)]
pub struct JsonSettingsResolved {
    pub pretty: bool,
}

impl Default for SettingsResolved {
    fn default() -> Self {
        Self {
            output: OutputSettingsResolved {
                default_format: OutputFormat::Pretty,
                json: JsonSettingsResolved { pretty: true },
            },
        }
    }
}

pub fn load_config(options: &LoadOptions, env: &Env) -> Result<ResolvedConfig> {
    let config_path = resolve_config_path(options, env)?;
    let config_file = match &config_path {
        Some(path) => load_config_file(path)?,
        None => ConfigFile::default(),
    };

    let profile_name = resolve_profile_name(options, env, config_file.default_profile.as_deref());

    let mut paging = PagingSettings::default();
    let mut settings = SettingsResolved::default();

    if let Some(settings_cfg) = &config_file.settings {
        apply_settings(&mut settings, settings_cfg);
    }

    match config_file.profiles.get(&profile_name) {
        Some(profile) => apply_profile(&mut paging, &mut settings, profile),
        None if config_path.is_some() => {
            tracing::debug!("Profile '{}' not found in config", profile_name);
        }
        None => {}
    }

    apply_env_overrides(&mut paging, &mut settings, env);
    apply_cli_overrides(&mut paging, &options.cli);
    validate_paging(&paging)?;

    Ok(ResolvedConfig {
        config_path,
        profile_name,
        paging,
        settings,
    })
}

fn resolve_profile_name(options: &LoadOptions, env: &Env, default_profile: Option<&str>) -> String {
    if let Some(profile) = options.cli.profile.as_deref() {
        return profile.to_string();
    }
    if let Some(profile) = env.get("PAGENAV_PROFILE") {
        return profile;
    }
    if let Some(profile) = default_profile {
        return profile.to_string();
    }
    "default".to_string()
}

fn resolve_config_path(options: &LoadOptions, env: &Env) -> Result<Option<PathBuf>> {
    if let Some(path) = &options.cli.config_path {
        if !path.exists() {
            return Err(anyhow!("Config file not found: {}", path.display()));
        }
        return Ok(Some(path.clone()));
    }

    if let Some(path) = env.get("PAGENAV_CONFIG") {
        let path = PathBuf::from(path);
        if !path.exists() {
            return Err(anyhow!("Config file not found: {}", path.display()));
        }
        return Ok(Some(path));
    }

    if let Some(path) = find_local_config(&options.cwd, options.home_dir.as_deref()) {
        return Ok(Some(path));
    }

    if let Some(path) = find_global_config(options.xdg_config_dir.as_deref()) {
        return Ok(Some(path));
    }

    Ok(None)
}

fn find_local_config(start: &Path, home: Option<&Path>) -> Option<PathBuf> {
    for dir in start.ancestors() {
        for candidate in &LOCAL_CANDIDATES {
            let path = dir.join(candidate);
            if path.is_file() {
                return Some(path);
            }
        }

        if let Some(home_dir) = home {
            if dir == home_dir {
                break;
            }
        }
    }

    None
}

fn find_global_config(xdg_config: Option<&Path>) -> Option<PathBuf> {
    let base = xdg_config?;
    GLOBAL_CANDIDATES
        .iter()
        .map(|candidate| base.join(candidate))
        .find(|path| path.is_file())
}

fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&content).context("Failed to parse YAML config")
        }
        Some("json") => serde_json::from_str(&content).context("Failed to parse JSON config"),
        _ => Err(anyhow!("Unsupported config file extension")),
    }
}

fn apply_profile(paging: &mut PagingSettings, settings: &mut SettingsResolved, profile: &Profile) {
    if let Some(url_prefix) = &profile.url_prefix {
        paging.url_prefix = Some(url_prefix.clone());
    }
    if let Some(per_page) = profile.per_page {
        paging.per_page = per_page;
    }
    if let Some(window_size) = profile.window_size {
        paging.window_size = window_size;
    }

    if let Some(settings_profile) = &profile.settings {
        apply_settings(settings, settings_profile);
    }
}

fn apply_settings(settings: &mut SettingsResolved, overrides: &Settings) {
    if let Some(output) = &overrides.output {
        apply_output_settings(&mut settings.output, output);
    }
}

fn apply_output_settings(settings: &mut OutputSettingsResolved, overrides: &OutputSettings) {
    if let Some(default_format) = overrides.default_format {
        settings.default_format = default_format;
    }
    if let Some(json) = &overrides.json {
        if let Some(pretty) = json.pretty {
            settings.json.pretty = pretty;
        }
    }
}

fn apply_env_overrides(paging: &mut PagingSettings, settings: &mut SettingsResolved, env: &Env) {
    if let Some(url_prefix) = env.get("PAGENAV_URL_PREFIX") {
        paging.url_prefix = Some(url_prefix);
    }
    if let Some(per_page) = env.get_u64("PAGENAV_PER_PAGE") {
        paging.per_page = per_page;
    }
    if let Some(window_size) = env.get_u64("PAGENAV_WINDOW_SIZE") {
        paging.window_size = window_size;
    }
    if let Some(pretty) = env
        .get("PAGENAV_JSON_PRETTY")
        .and_then(|v| parse_bool(&v))
    {
        settings.output.json.pretty = pretty;
    }
}

fn apply_cli_overrides(paging: &mut PagingSettings, cli: &CliOverrides) {
    if let Some(url_prefix) = &cli.url_prefix {
        paging.url_prefix = Some(url_prefix.clone());
    }
    if let Some(per_page) = cli.per_page {
        paging.per_page = per_page;
    }
    if let Some(window_size) = cli.window_size {
        paging.window_size = window_size;
    }
}

fn validate_paging(paging: &PagingSettings) -> Result<()> {
    if paging.per_page == 0 {
        return Err(anyhow!("perPage must be greater than zero"));
    }
    if paging.window_size == 0 {
        return Err(anyhow!("windowSize must be greater than zero"));
    }
    if paging.window_size % 2 == 0 {
        tracing::warn!(
            "windowSize {} is even; the link window may show {} pages",
            paging.window_size,
            paging.window_size + 1
        );
    }
    Ok(())
}
