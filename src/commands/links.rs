use std::io::{self, Write};

use anyhow::Result;
use serde_json::json;
use tracing::info;

use crate::cli::{CliArgs, LinksArgs};
use crate::commands::common;
use crate::config::OutputFormat;
use crate::error::{AppError, ErrorKind};
use crate::output::{TableOptions, csv as csv_out, json as json_out, table};

pub fn run(args: &CliArgs, cmd: &LinksArgs) -> Result<()> {
    let resolved = common::load_config(args)?;
    let format = common::output_format(args, &resolved);
    let paginator = common::build_paginator(&resolved, &cmd.page)?;
    let links = paginator.links();

    if let Some(path) = &cmd.csv {
        csv_out::write_links(path, &links).map_err(|err| {
            AppError::new(
                ErrorKind::Output,
                format!("Failed to write CSV {}: {}", path.display(), err),
            )
        })?;
        info!("Wrote {} links to {}", links.len(), path.display());

        if args.quiet {
            return Ok(());
        }
        if matches!(format, OutputFormat::Json) {
            let payload = json!({
                "path": path.display().to_string(),
                "count": links.len(),
            });
            let body = json_out::emit_json_value(&payload, common::json_pretty(&resolved))?;
            writeln!(io::stdout(), "{}", body)?;
        } else {
            let count = links.len();
            writeln!(io::stdout(), "Wrote {} links to {}", count, path.display())?;
        }
        return Ok(());
    }

    if args.quiet {
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            let payload = json_out::links_to_json(&paginator);
            let body = json_out::emit_json_value(&payload, common::json_pretty(&resolved))?;
            writeln!(io::stdout(), "{}", body)?;
        }
        _ => {
            let rendered = table::render_links_table(
                &links,
                paginator.total_pages(),
                format,
                &TableOptions::default(),
            );
            writeln!(io::stdout(), "{}", rendered)?;
        }
    }

    Ok(())
}
