//! Command-line interface for yg
//! This binary reads a yg file, parses it and prints the tree, the tokens or just the diagnostics.
//!
//! Usage:
//!   yg parse `<path>` [--format `<format>`] [--config `<file>`] [--no-recover] [--max-errors `<n>`]
//!   yg tokens `<path>`                                  - Print the token stream
//!   yg check `<path>`                                   - Print diagnostics only
//!   yg formats                                        - List the available output formats
//!
//! Diagnostics go to stderr. The exit status is 1 when any diagnostic was produced.

use clap::{Arg, ArgAction, ArgMatches, Command};
use yg::yg::config::{Loader, OutputFormat, YgConfig};
use yg::yg::diagnostics::{Diagnostic, Diagnostics};
use yg::yg::formats::FormatRegistry;
use yg::{parse_with_options, tokenize};

fn main() {
    env_logger::init();

    let path_arg = || {
        Arg::new("path")
            .help("Path to the yg file")
            .required(true)
            .index(1)
    };
    let config_arg = || {
        Arg::new("config")
            .long("config")
            .short('c')
            .help("TOML file layered over the built-in defaults")
    };

    let matches = Command::new("yg")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing and inspecting yg grammar files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("parse")
                .about("Parse a file and print its syntax tree")
                .arg(path_arg())
                .arg(config_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (overrides output.format)")
                        .value_parser(clap::value_parser!(OutputFormat)),
                )
                .arg(
                    Arg::new("no-recover")
                        .long("no-recover")
                        .help("Stop at the first syntax error")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("max-errors")
                        .long("max-errors")
                        .help("Stop after this many diagnostics")
                        .value_parser(clap::value_parser!(u32)),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream of a file")
                .arg(path_arg())
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("check")
                .about("Parse a file and report diagnostics only")
                .arg(path_arg())
                .arg(config_arg()),
        )
        .subcommand(Command::new("formats").about("List available output formats"))
        .get_matches();

    let status = match matches.subcommand() {
        Some(("parse", sub)) => handle_parse_command(sub),
        Some(("tokens", sub)) => handle_tokens_command(sub),
        Some(("check", sub)) => handle_check_command(sub),
        Some(("formats", _)) => handle_formats_command(),
        _ => unreachable!(),
    };
    std::process::exit(status);
}

/// Layer `--config` and the parse flags over the defaults
fn load_config(matches: &ArgMatches) -> YgConfig {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    let loader = loader.with_env();

    let overrides = || -> Result<Loader, config::ConfigError> {
        let mut loader = loader.clone();
        if matches.try_get_one::<bool>("no-recover").ok().flatten() == Some(&true) {
            loader = loader.set_override("parse.recover", false)?;
        }
        if let Some(max) = matches.try_get_one::<u32>("max-errors").ok().flatten() {
            loader = loader.set_override("parse.max_errors", u64::from(*max))?;
        }
        if let Some(format) = matches.try_get_one::<OutputFormat>("format").ok().flatten() {
            loader = loader.set_override("output.format", format.as_str())?;
        }
        Ok(loader)
    };

    overrides()
        .and_then(Loader::build)
        .unwrap_or_else(|e| {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        })
}

fn read_source(matches: &ArgMatches) -> (String, String) {
    let path = matches
        .get_one::<String>("path")
        .cloned()
        .unwrap_or_default();
    let source = std::fs::read_to_string(&path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    });
    (path, source)
}

fn report(diagnostics: &Diagnostics, path: &str, source: &str, config: &YgConfig) -> i32 {
    if diagnostics.is_empty() {
        return 0;
    }
    if let Err(e) = diagnostics.emit(path, source, config.output.color.into()) {
        eprintln!("Error rendering diagnostics: {}", e);
    }
    1
}

/// Handle the parse command
fn handle_parse_command(matches: &ArgMatches) -> i32 {
    let config = load_config(matches);
    let (path, source) = read_source(matches);
    let output = parse_with_options(&source, &config.parse);

    let registry = FormatRegistry::with_defaults();
    match registry.serialize(&output.program, config.output.format.as_str()) {
        Ok(text) => {
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
        }
        Err(e) => {
            eprintln!("Format error: {}", e);
            return 1;
        }
    }

    report(&output.diagnostics, &path, &source, &config)
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches) -> i32 {
    let config = load_config(matches);
    let (path, source) = read_source(matches);
    let (tokens, errors) = tokenize(&source);

    for token in &tokens {
        println!("{}\t{:?}\t{}", token.span, token.kind, token.lexeme);
    }

    let mut diagnostics = Diagnostics::new();
    for error in errors {
        diagnostics.push(Diagnostic::error(error));
    }
    report(&diagnostics, &path, &source, &config)
}

/// Handle the check command
fn handle_check_command(matches: &ArgMatches) -> i32 {
    let config = load_config(matches);
    let (path, source) = read_source(matches);
    let output = parse_with_options(&source, &config.parse);
    let status = report(&output.diagnostics, &path, &source, &config);
    if status == 0 {
        println!(
            "{}: ok ({} statements)",
            path,
            output.program.statements.len()
        );
    }
    status
}

/// Handle the formats command
fn handle_formats_command() -> i32 {
    let registry = FormatRegistry::with_defaults();
    println!("Available formats:\n");
    for (name, description) in registry.entries() {
        println!("  {}", name);
        if !description.is_empty() {
            println!("    {}", description);
        }
    }
    0
}
