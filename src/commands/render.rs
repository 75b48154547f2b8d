use std::io::{self, Write};

use anyhow::Result;

use crate::cli::{CliArgs, PageArgs};
use crate::commands::common;
use crate::config::OutputFormat;
use crate::output::json as json_out;

pub fn run(args: &CliArgs, cmd: &PageArgs) -> Result<()> {
    let resolved = common::load_config(args)?;
    let format = common::output_format(args, &resolved);
    let paginator = common::build_paginator(&resolved, cmd)?;

    if args.quiet {
        return Ok(());
    }

    if matches!(format, OutputFormat::Json) {
        let payload = json_out::render_to_json(&paginator);
        let body = json_out::emit_json_value(&payload, common::json_pretty(&resolved))?;
        writeln!(io::stdout(), "{}", body)?;
    } else {
        writeln!(io::stdout(), "{}", paginator)?;
    }

    Ok(())
}
