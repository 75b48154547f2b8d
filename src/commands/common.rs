use anyhow::Result;

use crate::cli::{CliArgs, PageArgs};
use crate::config::OutputFormat;
use crate::config::{self, CliOverrides, ResolvedConfig};
use crate::error::{AppError, ErrorKind};
use crate::output;
use crate::paginator::{PageOptions, Paginator, RequestedPage};

pub fn overrides_from_args(args: &CliArgs) -> CliOverrides {
    CliOverrides {
        config_path: args.config_path.clone(),
        env_file: args.env_file.clone(),
        profile: args.profile.clone(),
        url_prefix: args.url_prefix.clone(),
        per_page: args.per_page,
        window_size: args.window_size,
    }
}

pub fn load_config(args: &CliArgs) -> Result<ResolvedConfig> {
    let overrides = overrides_from_args(args);
    config::load_from_system(&overrides)
        .map_err(|err| AppError::new(ErrorKind::Config, err.to_string()).into())
}

pub fn output_format(args: &CliArgs, resolved: &ResolvedConfig) -> OutputFormat {
    output::select_format(&args.output, &resolved.settings)
}

pub fn json_pretty(resolved: &ResolvedConfig) -> bool {
    resolved.settings.output.json.pretty
}

pub fn build_paginator(resolved: &ResolvedConfig, page: &PageArgs) -> Result<Paginator> {
    let url_prefix = resolved.paging.url_prefix.clone().ok_or_else(|| {
        AppError::new(
            ErrorKind::Config,
            format!(
                "No URL prefix for profile '{}'; pass --prefix or set urlPrefix",
                resolved.profile_name
            ),
        )
    })?;
    let options = PageOptions::new(resolved.paging.per_page, resolved.paging.window_size);
    let requested = RequestedPage::from(page.page.as_deref());
    Ok(Paginator::with_options(page.total, requested, url_prefix, options))
}
