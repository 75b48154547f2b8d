use serde::Serialize;
use serde_json::json;

use crate::config::ResolvedConfig;
use crate::paginator::Paginator;

pub fn emit_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(serde_json::to_string(value)?)
    }
}

pub fn emit_json_value(value: &serde_json::Value, pretty: bool) -> anyhow::Result<String> {
    emit_json(value, pretty)
}

pub fn error_json(message: &str, kind: &str) -> serde_json::Value {
    json!({
        "error": {
            "message": message,
            "kind": kind,
        }
    })
}

pub fn render_to_json(paginator: &Paginator) -> serde_json::Value {
    json!({
        "html": paginator.render(),
        "currentPage": paginator.current_page(),
        "totalPages": paginator.total_pages(),
    })
}

pub fn links_to_json(paginator: &Paginator) -> serde_json::Value {
    json!({
        "currentPage": paginator.current_page(),
        "totalPages": paginator.total_pages(),
        "links": paginator.links(),
    })
}

pub fn config_to_json(resolved: &ResolvedConfig) -> serde_json::Value {
    json!({
        "configPath": resolved.config_path.as_ref().map(|p| p.display().to_string()),
        "profileName": resolved.profile_name,
        "paging": {
            "urlPrefix": resolved.paging.url_prefix,
            "perPage": resolved.paging.per_page,
            "windowSize": resolved.paging.window_size,
        },
        "settings": {
            "output": {
                "defaultFormat": resolved.settings.output.default_format.as_str(),
                "json": {
                    "pretty": resolved.settings.output.json.pretty,
                },
            }
        }
    })
}
