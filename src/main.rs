//! Command-line interface for scss-export
//!
//! Usage:
//!   scss-export `<inputs>...` [-o `<file>`] [-d `<path>`]... [-t structured|array] [-f json|yaml] [-s]

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{error, info};

use scss_export::error::IoContext;
use scss_export::logging;
use scss_export::{Converter, ExportOptions, ExportResult, OutputFormat, OutputType, SassCli};

fn cli() -> Command {
    Command::new("scss-export")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Export SCSS variables, maps and mixins as JSON")
        .arg_required_else_help(true)
        .arg(
            Arg::new("inputs")
                .help("SCSS files or glob patterns, concatenated in order")
                .num_args(1..)
                .required_unless_present("config"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Write the export to this file instead of stdout"),
        )
        .arg(
            Arg::new("dependencies")
                .long("dependencies")
                .short('d')
                .help("Include path handed to the Sass compiler (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("type")
                .long("type")
                .short('t')
                .help("Output type: structured or array"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: json or yaml"),
        )
        .arg(
            Arg::new("detailed")
                .long("detailed")
                .short('s')
                .help("Export full declaration records instead of values")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("JSON options file; command-line flags take precedence"),
        )
        .arg(
            Arg::new("sass")
                .long("sass")
                .help("Sass compiler program (defaults to $SCSS_EXPORT_SASS or `sass`)"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write logs to this file instead of stderr"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log verbosity (repeatable)")
                .action(ArgAction::Count),
        )
}

fn main() {
    let matches = cli().get_matches();

    let level = logging::level_for_verbosity(matches.get_count("verbose"));
    let log_file = matches.get_one::<String>("log-file").map(PathBuf::from);
    if let Err(e) = logging::init_logger(level, log_file.as_deref()) {
        eprintln!("Failed to initialize logger: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(&matches) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Merge the options file (if any) with command-line flags
fn build_options(matches: &ArgMatches) -> ExportResult<ExportOptions> {
    let mut options = match matches.get_one::<String>("config") {
        Some(path) => ExportOptions::from_json_file(&PathBuf::from(path))?,
        None => ExportOptions::default(),
    };

    if let Some(inputs) = matches.get_many::<String>("inputs") {
        options.input_files = inputs.cloned().collect();
    }
    if let Some(paths) = matches.get_many::<String>("dependencies") {
        options.include_paths = paths.map(PathBuf::from).collect();
    }
    if let Some(value) = matches.get_one::<String>("type") {
        options.output_type = value.parse::<OutputType>()?;
    }
    if let Some(value) = matches.get_one::<String>("format") {
        options.format = value.parse::<OutputFormat>()?;
    }
    if matches.get_flag("detailed") {
        options.detailed = true;
    }

    Ok(options)
}

fn run(matches: &ArgMatches) -> ExportResult<()> {
    let options = build_options(matches)?;
    let compiler = match matches.get_one::<String>("sass") {
        Some(program) => SassCli::new(program),
        None => SassCli::from_env(),
    };
    info!("Exporting {:?} with compiler {}", options.input_files, compiler.program().display());

    let format = options.format;
    let converter = Converter::new(options, compiler);
    let rendered = format.render(&converter.export()?)?;

    match matches.get_one::<String>("output") {
        Some(path) => {
            fs::write(path, rendered).with_io_context(path, "Failed to write output file")?;
            info!("Export written to {}", path);
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
