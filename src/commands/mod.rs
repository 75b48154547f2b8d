mod common;
mod completions;
mod config;
mod help;
mod info;
mod init;
mod links;
mod render;

use anyhow::Result;

use crate::cli::{CliArgs, CommandKind};

pub fn dispatch(args: &CliArgs) -> Result<()> {
    match &args.command {
        CommandKind::Help { all, command } => help::run(*all, command.as_deref()),
        CommandKind::Render(cmd) => render::run(args, cmd),
        CommandKind::Info(cmd) => info::run(args, cmd),
        CommandKind::Links(cmd) => links::run(args, cmd),
        CommandKind::Init(cmd) => init::run(args, cmd),
        CommandKind::Config(_) => config::run(args),
        CommandKind::Completions(cmd) => completions::run(args, cmd),
    }
}
