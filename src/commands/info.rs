use std::io::{self, Write};

use anyhow::Result;

use crate::cli::{CliArgs, PageArgs};
use crate::commands::common;
use crate::config::OutputFormat;
use crate::output::{TableOptions, json as json_out, table};

pub fn run(args: &CliArgs, cmd: &PageArgs) -> Result<()> {
    let resolved = common::load_config(args)?;
    let format = common::output_format(args, &resolved);
    let summary = common::build_paginator(&resolved, cmd)?.summary();

    if args.quiet {
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            let body = json_out::emit_json(&summary, common::json_pretty(&resolved))?;
            writeln!(io::stdout(), "{}", body)?;
        }
        _ => {
            let rows = table::summary_rows(&summary);
            let options = TableOptions::default();
            let rendered = table::render_key_value_table("Pagination", &rows, format, &options);
            writeln!(io::stdout(), "{}", rendered)?;
        }
    }

    Ok(())
}
