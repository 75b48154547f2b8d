mod args;

pub use args::{
    CliArgs, CommandKind, CompletionsArgs, ConfigArgs, InitArgs, LinksArgs, OutputFlags, PageArgs,
    build_cli,
};

pub fn parse() -> CliArgs {
    args::parse_args()
}
