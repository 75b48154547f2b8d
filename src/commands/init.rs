use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use serde_json::json;

use crate::cli::{CliArgs, InitArgs};
use crate::commands::common;
use crate::config::OutputFormat;
use crate::output::json as json_out;

pub fn run(args: &CliArgs, cmd: &InitArgs) -> Result<()> {
    let resolved = common::load_config(args)?;
    let format = common::output_format(args, &resolved);

    let profile_name = cmd.profile.as_deref().unwrap_or("default");
    let target = resolve_target_path(cmd.path.as_ref());

    if target.exists() && !cmd.force {
        return Err(anyhow!("Config already exists: {}", target.display()));
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }

    let template = if target.extension().and_then(|s| s.to_str()) == Some("json") {
        json_out::emit_json_value(&config_template_json(profile_name), true)?
    } else {
        render_config_template(profile_name)?
    };
    fs::write(&target, template)?;

    if args.quiet {
        return Ok(());
    }

    if matches!(format, OutputFormat::Json) {
        let payload = json!({
            "path": target.display().to_string(),
            "created": true,
            "overwritten": cmd.force,
        });
        let body = json_out::emit_json_value(&payload, common::json_pretty(&resolved))?;
        println!("{}", body);
    } else {
        println!("Wrote config to {}", target.display());
    }

    Ok(())
}

fn resolve_target_path(path: Option<&PathBuf>) -> PathBuf {
    match path {
        Some(path)
            if path
                .extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| matches!(ext, "yaml" | "yml" | "json")) =>
        {
            path.clone()
        }
        Some(path) => path.join(".pagenav").join("config.yaml"),
        None => Path::new(".pagenav").join("config.yaml"),
    }
}

/// Render `value` as a single-line YAML scalar, quoting it when the plain
/// form would change meaning.
fn yaml_scalar(value: &str) -> Result<String> {
    let rendered = serde_yaml::to_string(value)?;
    let rendered = rendered.trim_end();
    if rendered.contains('\n') {
        return Ok(serde_json::to_string(value)?);
    }
    Ok(rendered.to_string())
}

fn render_config_template(profile: &str) -> Result<String> {
    let profile = yaml_scalar(profile)?;
    Ok(format!(
        r#"# pagenav configuration

defaultProfile: {profile}
settings:
  output:
    # defaultFormat controls output when no explicit flag is used.
    # Values: pretty | markdown | json
    defaultFormat: pretty
    json:
      # pretty controls indentation when emitting JSON.
      pretty: true

profiles:
  {profile}:
    # Links are generated as /{{urlPrefix}}/?page=n. The value is not escaped.
    urlPrefix: {profile}
    perPage: 10
    # Odd values keep the current page centered.
    windowSize: 7
"#
    ))
}

fn config_template_json(profile: &str) -> serde_json::Value {
    json!({
        "defaultProfile": profile,
        "settings": {
            "output": {
                "defaultFormat": "pretty",
                "json": { "pretty": true },
            }
        },
        "profiles": {
            profile: {
                "urlPrefix": profile,
                "perPage": 10,
                "windowSize": 7,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_target_gets_default_file() {
        let target = resolve_target_path(Some(&PathBuf::from("/srv/app")));
        assert_eq!(target, PathBuf::from("/srv/app/.pagenav/config.yaml"));
    }

    #[test]
    fn explicit_file_target_is_kept() {
        let target = resolve_target_path(Some(&PathBuf::from("/srv/app/views.json")));
        assert_eq!(target, PathBuf::from("/srv/app/views.json"));
    }

    #[test]
    fn template_is_valid_yaml() {
        let body = render_config_template("articles").expect("template");
        let value: serde_yaml::Value = serde_yaml::from_str(&body).expect("yaml");
        assert_eq!(value["defaultProfile"].as_str(), Some("articles"));
        assert_eq!(value["profiles"]["articles"]["perPage"].as_u64(), Some(10));
    }

    #[test]
    fn template_quotes_awkward_profile_names() {
        for name in ["a: b", "#draft", "yes", "line\nbreak", "it's"] {
            let body = render_config_template(name).expect("template");
            let config: crate::config::ConfigFile = serde_yaml::from_str(&body).expect("yaml");
            assert_eq!(config.default_profile.as_deref(), Some(name));
            assert_eq!(config.profiles[name].url_prefix.as_deref(), Some(name));
        }
    }

    #[test]
    fn json_template_parses_as_config() {
        let body = json_out::emit_json_value(&config_template_json("news"), true).expect("json");
        let config: crate::config::ConfigFile = serde_json::from_str(&body).expect("config");
        assert_eq!(config.default_profile.as_deref(), Some("news"));
        assert_eq!(config.profiles["news"].window_size, Some(7));
    }
}
