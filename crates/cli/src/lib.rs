#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the thin command-line front end for the teleport
//! workspace. Two subcommands cover the supported surface: `tree` prints a
//! rule-filtered directory listing, and `pack` exports the filtered tree's
//! text files into one annotated document. All rule assembly, traversal, and
//! rendering live in the library crates; this crate only parses arguments,
//! wires the pieces together, and maps failures to exit codes.
//!
//! # Design
//!
//! The crate exposes [`run`] as the primary entry point. The function accepts
//! an iterator of arguments together with handles for standard output and
//! error, which keeps the whole surface testable without spawning a process.
//! Argument parsing uses a `clap` builder command definition; repeated `-v`
//! flags raise the `tracing` filter level.
//!
//! # Invariants
//!
//! - [`run`] never panics; failures surface as diagnostics on the error
//!   handle and a non-zero exit code.
//! - Library errors are printed once, prefixed with the program name, and
//!   map to exit code 1. Argument errors use `clap`'s own exit codes.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let code = cli::run(["teleport", "--help"], &mut stdout, &mut stderr);
//!
//! assert_eq!(code, 0);
//! assert!(!stdout.is_empty());
//! ```

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use thiserror::Error;
use tracing::debug;

use rules::{CompositeRule, KEYWORD_GITIGNORE, KEYWORD_HIDDEN_FILE, RuleError, RuleFactory};
use singlefile::{SingleFile, SingleFileError};
use tree::{TreeBuilder, TreeError};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    SingleFile(#[from] SingleFileError),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Parses arguments, executes the selected subcommand, and returns the
/// process exit code.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
    Out: Write,
    Err: Write,
{
    let matches = match command().try_get_matches_from(arguments) {
        Ok(matches) => matches,
        Err(error) => {
            let rendered = error.render();
            if error.use_stderr() {
                let _ = write!(stderr, "{rendered}");
            } else {
                let _ = write!(stdout, "{rendered}");
            }
            return error.exit_code();
        }
    };

    init_tracing(matches.get_count("verbose"));

    match execute(&matches, stdout) {
        Ok(()) => 0,
        Err(error) => {
            let _ = writeln!(stderr, "teleport: {error}");
            1
        }
    }
}

fn execute(matches: &ArgMatches, stdout: &mut impl Write) -> Result<(), CliError> {
    match matches.subcommand() {
        Some(("tree", sub)) => run_tree(sub, stdout),
        Some(("pack", sub)) => run_pack(sub, stdout),
        _ => unreachable!("subcommand is required"),
    }
}

fn run_tree(matches: &ArgMatches, stdout: &mut impl Write) -> Result<(), CliError> {
    let tree = build_tree(matches)?;
    write!(stdout, "{}", tree.render())?;
    Ok(())
}

fn run_pack(matches: &ArgMatches, stdout: &mut impl Write) -> Result<(), CliError> {
    let tree = build_tree(matches)?;
    let mut export = SingleFile::new(tree)?;
    if let Some(template) = matches.get_one::<String>("template") {
        export = export.template(template.clone())?;
    }
    if let Some(output) = matches.get_one::<PathBuf>("output") {
        export = export.output(output);
    }
    let line_numbers = matches.get_flag("line-numbers");
    export.write(line_numbers)?;
    writeln!(stdout, "wrote {}", export.output_path().display())?;
    Ok(())
}

fn build_tree(matches: &ArgMatches) -> Result<tree::Tree, CliError> {
    let root = matches
        .get_one::<PathBuf>("root")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    let rule = build_rule(matches)?;
    debug!(root = %root.display(), "building tree");
    Ok(TreeBuilder::new(root).rule(rule).build()?)
}

fn build_rule(matches: &ArgMatches) -> Result<CompositeRule, CliError> {
    if let Some(path) = matches.get_one::<PathBuf>("rules") {
        let text = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.clone(),
            source,
        })?;
        let mut composite = CompositeRule::default();
        composite.append(RuleFactory::from_json(&text)?);
        return Ok(composite);
    }

    let include = collect_patterns(matches, "include");
    let exclude = collect_patterns(matches, "exclude");
    let gitignore = matches.get_one::<PathBuf>("gitignore");

    let mut keywords = Vec::new();
    if !matches.get_flag("hidden") {
        keywords.push(KEYWORD_HIDDEN_FILE);
    }
    if gitignore.is_some() {
        keywords.push(KEYWORD_GITIGNORE);
    }

    Ok(RuleFactory::standard(
        include,
        exclude,
        keywords,
        gitignore.map(PathBuf::as_path),
    )?)
}

fn collect_patterns(matches: &ArgMatches, id: &str) -> Option<Vec<String>> {
    let patterns: Vec<String> = matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    if patterns.is_empty() {
        None
    } else {
        Some(patterns)
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Repeated invocations in one process keep the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(io::stderr)
        .try_init();
}

/// Builds the `clap` command used for parsing.
fn command() -> Command {
    Command::new("teleport")
        .about("Filter, reshape, and export directory trees")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .help("Increase log verbosity; may be repeated.")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(with_filter_args(
            Command::new("tree").about("Print the rule-filtered directory tree"),
        ))
        .subcommand(
            with_filter_args(
                Command::new("pack")
                    .about("Export the filtered tree's text files into one document"),
            )
            .arg(
                Arg::new("output")
                    .long("output")
                    .short('o')
                    .value_name("PATH")
                    .help("Write the document to PATH instead of onefile.txt.")
                    .value_parser(value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("template")
                    .long("template")
                    .value_name("TEMPLATE")
                    .help("Header template; must contain the {file_name} placeholder."),
            )
            .arg(
                Arg::new("line-numbers")
                    .long("line-numbers")
                    .help("Prefix each exported line with its number.")
                    .action(ArgAction::SetTrue),
            ),
        )
}

fn with_filter_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("root")
                .value_name("ROOT")
                .help("Directory to walk; defaults to the current directory.")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("hidden")
                .long("hidden")
                .help("Keep dot-prefixed entries instead of filtering them.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("gitignore")
                .long("gitignore")
                .value_name("PATH")
                .help("Filter entries through a gitignore file; defaults to ./.gitignore.")
                .num_args(0..=1)
                .default_missing_value("./.gitignore")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("include")
                .long("include")
                .value_name("PATTERN")
                .help("Keep only entries matching PATTERN; may be repeated.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("exclude")
                .long("exclude")
                .value_name("PATTERN")
                .help("Drop entries matching PATTERN; may be repeated.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("rules")
                .long("rules")
                .value_name("FILE")
                .help("Build the filter from a JSON rule descriptor instead of flags.")
                .value_parser(value_parser!(PathBuf))
                .conflicts_with_all(["hidden", "gitignore", "include", "exclude"]),
        )
}
