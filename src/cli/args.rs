use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};

#[derive(Debug, Clone)]
pub struct OutputFlags {
    pub json: bool,
    pub markdown: bool,
    pub pretty: bool,
}

#[derive(Debug, Clone)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    pub profile: Option<String>,
    pub url_prefix: Option<String>,
    pub per_page: Option<u64>,
    pub window_size: Option<u64>,
    pub output: OutputFlags,
    pub verbose: u8,
    pub quiet: bool,
    pub command: CommandKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    Help { all: bool, command: Option<String> },
    Render(PageArgs),
    Info(PageArgs),
    Links(LinksArgs),
    Init(InitArgs),
    Config(ConfigArgs),
    Completions(CompletionsArgs),
}

/// Inputs shared by every command that builds a paginator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageArgs {
    pub total: u64,
    /// Raw page value; parsed fail-soft, so anything is accepted here.
    pub page: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinksArgs {
    pub page: PageArgs,
    pub csv: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitArgs {
    pub path: Option<PathBuf>,
    pub force: bool,
    pub profile: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigArgs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionsArgs {
    pub shell: Option<String>,
}

pub fn build_cli(show_all: bool) -> Command {
    let mut cmd = Command::new("pagenav")
        .about("Compute pagination windows and render page navigation")
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(true)
        .disable_help_subcommand(true)
        .subcommand_value_name("COMMAND");

    cmd = add_global_args(cmd);

    cmd = cmd.subcommand(command_help());

    cmd = cmd.subcommand(command_render(show_all));
    cmd = cmd.subcommand(command_info(show_all));
    cmd = cmd.subcommand(command_links(show_all));
    cmd = cmd.subcommand(command_init(show_all));
    cmd = cmd.subcommand(command_config(show_all));

    cmd = cmd.subcommand(command_completions(show_all));

    cmd
}

pub fn parse_args() -> CliArgs {
    let matches = build_cli(false).get_matches();
    parse_matches(&matches)
}

fn add_global_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("config")
            .long("config")
            .value_name("PATH")
            .value_hint(ValueHint::FilePath)
            .global(true)
            .help("Override config file location"),
    )
    .arg(
        Arg::new("env-file")
            .long("env-file")
            .value_name("PATH")
            .value_hint(ValueHint::FilePath)
            .global(true)
            .help("Load environment variables from file (default: .env)"),
    )
    .arg(
        Arg::new("profile")
            .long("profile")
            .value_name("NAME")
            .global(true)
            .help("Select list-view profile"),
    )
    .arg(
        Arg::new("prefix")
            .long("prefix")
            .value_name("PREFIX")
            .global(true)
            .help("URL path segment used in page links (/{prefix}/?page=n)"),
    )
    .arg(
        Arg::new("per-page")
            .long("per-page")
            .value_name("N")
            .value_parser(clap::value_parser!(u64))
            .global(true)
            .help("Records per page (default: 10)"),
    )
    .arg(
        Arg::new("window-size")
            .long("window-size")
            .value_name("N")
            .value_parser(clap::value_parser!(u64))
            .global(true)
            .help("Page links shown at once; odd values center the current page (default: 7)"),
    )
    .arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .global(true)
            .help("Output as JSON"),
    )
    .arg(
        Arg::new("markdown")
            .long("markdown")
            .action(ArgAction::SetTrue)
            .global(true)
            .help("Force markdown table output"),
    )
    .arg(
        Arg::new("pretty")
            .long("pretty")
            .action(ArgAction::SetTrue)
            .global(true)
            .help("Force pretty-printed table output"),
    )
    .arg(
        Arg::new("verbose")
            .short('v')
            .long("verbose")
            .action(ArgAction::Count)
            .global(true)
            .help("Enable debug logging"),
    )
    .arg(
        Arg::new("quiet")
            .short('q')
            .long("quiet")
            .action(ArgAction::SetTrue)
            .global(true)
            .help("Suppress non-error output"),
    )
}

fn command_help() -> Command {
    Command::new("help")
        .about("Show help for commands")
        .arg(
            Arg::new("all")
                .long("all")
                .action(ArgAction::SetTrue)
                .help("Show all commands, including advanced ones"),
        )
        .arg(Arg::new("command").value_name("COMMAND"))
}

fn command_core(
    name: &'static str,
    about: &'static str,
    aliases: &'static [&'static str],
    _show_all: bool,
) -> Command {
    let mut cmd = Command::new(name).about(about);
    for alias in aliases {
        cmd = cmd.visible_alias(*alias);
    }
    cmd
}

fn command_advanced(
    name: &'static str,
    about: &'static str,
    aliases: &'static [&'static str],
    show_all: bool,
) -> Command {
    let mut cmd = Command::new(name).about(about);
    for alias in aliases {
        cmd = cmd.visible_alias(*alias);
    }
    if !show_all {
        cmd = cmd.hide(true);
    }
    cmd
}

fn page_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("total")
            .long("total")
            .value_name("n")
            .required(true)
            .value_parser(clap::value_parser!(u64))
            .help("Total number of records"),
    )
    .arg(
        Arg::new("page")
            .long("page")
            .value_name("page")
            .allow_hyphen_values(true)
            .help("Requested page; non-numeric values fall back to 1"),
    )
}

fn command_render(show_all: bool) -> Command {
    page_args(command_core(
        "render",
        "Render the page navigation HTML",
        &["html"],
        show_all,
    ))
}

fn command_info(show_all: bool) -> Command {
    page_args(command_core(
        "info",
        "Show current page, window and offsets",
        &[],
        show_all,
    ))
}

fn command_links(show_all: bool) -> Command {
    page_args(command_core(
        "links",
        "List the visible page links",
        &[],
        show_all,
    ))
    .arg(
        Arg::new("csv")
            .long("csv")
            .value_name("path")
            .value_hint(ValueHint::FilePath)
            .help("Write links to a CSV file instead of stdout"),
    )
}

fn command_init(show_all: bool) -> Command {
    command_core("init", "Create config file", &[], show_all)
        .arg(
            Arg::new("path")
                .long("path")
                .value_name("path")
                .value_hint(ValueHint::FilePath),
        )
        .arg(Arg::new("force").long("force").action(ArgAction::SetTrue))
        .arg(Arg::new("profile").long("profile").value_name("name"))
}

fn command_config(show_all: bool) -> Command {
    command_core("config", "Display resolved config", &[], show_all)
}

fn command_completions(show_all: bool) -> Command {
    command_advanced("completions", "Generate shell completions", &[], show_all).arg(
        Arg::new("shell")
            .long("shell")
            .value_name("name")
            .value_parser(["bash", "zsh", "fish", "powershell", "elvish"]),
    )
}

fn parse_matches(matches: &ArgMatches) -> CliArgs {
    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let env_file = matches.get_one::<String>("env-file").map(PathBuf::from);
    let profile = matches.get_one::<String>("profile").cloned();
    let url_prefix = matches.get_one::<String>("prefix").cloned();
    let per_page = matches.get_one::<u64>("per-page").copied();
    let window_size = matches.get_one::<u64>("window-size").copied();
    let output = OutputFlags {
        json: matches.get_flag("json"),
        markdown: matches.get_flag("markdown"),
        pretty: matches.get_flag("pretty"),
    };
    let verbose = matches.get_count("verbose");
    let quiet = matches.get_flag("quiet");

    let command = match matches.subcommand() {
        Some(("help", sub_m)) => CommandKind::Help {
            all: sub_m.get_flag("all"),
            command: sub_m.get_one::<String>("command").cloned(),
        },
        Some(("render", sub_m)) => CommandKind::Render(parse_page_args(sub_m)),
        Some(("info", sub_m)) => CommandKind::Info(parse_page_args(sub_m)),
        Some(("links", sub_m)) => CommandKind::Links(LinksArgs {
            page: parse_page_args(sub_m),
            csv: sub_m.get_one::<String>("csv").map(PathBuf::from),
        }),
        Some(("init", sub_m)) => CommandKind::Init(InitArgs {
            path: sub_m.get_one::<String>("path").map(PathBuf::from),
            force: sub_m.get_flag("force"),
            profile: sub_m.get_one::<String>("profile").cloned(),
        }),
        Some(("config", _)) => CommandKind::Config(ConfigArgs),
        Some(("completions", sub_m)) => CommandKind::Completions(CompletionsArgs {
            shell: sub_m.get_one::<String>("shell").cloned(),
        }),
        _ => CommandKind::Help {
            all: false,
            command: None,
        },
    };

    CliArgs {
        config_path,
        env_file,
        profile,
        url_prefix,
        per_page,
        window_size,
        output,
        verbose,
        quiet,
        command,
    }
}

fn parse_page_args(matches: &ArgMatches) -> PageArgs {
    PageArgs {
        total: matches.get_one::<u64>("total").copied().unwrap_or(0),
        page: matches.get_one::<String>("page").cloned(),
    }
}
