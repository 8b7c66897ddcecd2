//! Command line front end for line sorting
//!
//! Reads lines from files or stdin, sorts them with one of the line
//! sorting modes and writes them to stdout or a file.

use clap::{Arg, ArgAction, Command};
use std::process;
use tracing_subscriber::EnvFilter;

use line_sort::{
    config::{SortConfig, SortConfigBuilder, SortMode},
    error::{SortError, SortResult},
    sort,
};

fn main() {
    let result = run();
    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("linesort: {e}");
            process::exit(e.exit_code());
        }
    }
}

fn run() -> SortResult<i32> {
    let matches = build_cli().get_matches();
    let config = parse_config_from_matches(&matches)?;
    init_logging(config.debug);
    sort(&config)
}

/// Log to stderr; `--debug` lowers the default level, `RUST_LOG` overrides it
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn build_cli() -> Command {
    Command::new("linesort")
        .version(env!("CARGO_PKG_VERSION"))
        .override_usage("linesort [OPTION]... [FILE]...")
        .about("Sort lines of text lexicographically or by their leading number")
        .long_about("Sort lines of text lexicographically or by their leading number.\n\nNumeric modes read the number at the start of each line and ignore anything after it. Blank lines are moved to the top in ascending order and to the bottom in descending order. Lines with equal keys keep their input order.")

        // Input files
        .arg(Arg::new("files")
            .help("Input files to sort (use '-' or omit for stdin)")
            .num_args(0..)
            .value_name("FILE"))

        // Sort modes (mutually exclusive)
        .arg(Arg::new("mode")
            .short('m')
            .long("mode")
            .help("Sort according to WORD")
            .long_help("Sort according to WORD: lexicographic (default), integer, decimal-comma, decimal-dot")
            .value_name("WORD")
            .value_parser(["lexicographic", "integer", "decimal-comma", "decimal-dot"]))
        .arg(Arg::new("integer")
            .short('n')
            .long("integer")
            .help("Compare according to the leading integer")
            .action(ArgAction::SetTrue)
            .conflicts_with_all(["mode", "decimal-comma", "decimal-dot"]))
        .arg(Arg::new("decimal-comma")
            .long("decimal-comma")
            .help("Compare according to the leading decimal number written as 1,5")
            .action(ArgAction::SetTrue)
            .conflicts_with_all(["mode", "decimal-dot"]))
        .arg(Arg::new("decimal-dot")
            .long("decimal-dot")
            .help("Compare according to the leading decimal number written as 1.5")
            .action(ArgAction::SetTrue)
            .conflicts_with("mode"))

        // Sort modifiers
        .arg(Arg::new("reverse")
            .short('r')
            .long("reverse")
            .help("Sort in descending order")
            .action(ArgAction::SetTrue))

        // I/O options
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .help("Write result to FILE instead of standard output")
            .value_name("FILE"))
        .arg(Arg::new("zero-terminated")
            .short('z')
            .long("zero-terminated")
            .help("Line delimiter is NUL, not newline")
            .action(ArgAction::SetTrue))

        // Operation modes
        .arg(Arg::new("check")
            .short('c')
            .long("check")
            .help("Check for sorted input; do not sort")
            .action(ArgAction::SetTrue))

        // Performance options
        .arg(Arg::new("parallel")
            .long("parallel")
            .help("Change the number of sorting threads to N")
            .value_name("N"))

        .arg(Arg::new("debug")
            .long("debug")
            .help("Log diagnostics to stderr")
            .action(ArgAction::SetTrue))
}

/// Parse configuration from command line matches
fn parse_config_from_matches(matches: &clap::ArgMatches) -> SortResult<SortConfig> {
    let mut builder = SortConfigBuilder::new();

    let sort_mode = if matches.get_flag("integer") {
        SortMode::Integer
    } else if matches.get_flag("decimal-comma") {
        SortMode::DecimalComma
    } else if matches.get_flag("decimal-dot") {
        SortMode::DecimalDot
    } else if let Some(word) = matches.get_one::<String>("mode") {
        word.parse()?
    } else {
        SortMode::Lexicographic
    };

    builder = builder.mode(sort_mode);

    if matches.get_flag("reverse") {
        builder = builder.reverse();
    }
    if matches.get_flag("check") {
        builder = builder.check();
    }
    if matches.get_flag("zero-terminated") {
        builder = builder.zero_terminated();
    }
    if matches.get_flag("debug") {
        builder = builder.debug();
    }
    if let Some(output) = matches.get_one::<String>("output") {
        builder = builder.output_file(output.clone());
    }
    if let Some(parallel_str) = matches.get_one::<String>("parallel") {
        let threads: usize = parallel_str
            .parse()
            .map_err(|_| SortError::parse_error(&format!("invalid thread count: {parallel_str}")))?;
        builder = builder.parallel_threads(threads);
    }

    let input_files: Vec<String> = matches
        .get_many::<String>("files")
        .unwrap_or_default()
        .cloned()
        .collect();
    builder = builder.input_files(input_files);

    builder.build()
}
