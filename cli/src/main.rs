use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use markdown::{Emitter, ParseWarning, Pipeline};
use shortcodes::{Config, Mode};

#[derive(Parser)]
#[command(name = "shortcodes", version, about = "Shortcode recognizer for markdown documents")]
struct Cli {
    /// Disable colored warning output
    #[arg(long, global = true)]
    no_color: bool,

    /// Opening delimiter (overrides the config file)
    #[arg(long, global = true)]
    start_block: Option<String>,

    /// Closing delimiter (overrides the config file)
    #[arg(long, global = true)]
    end_block: Option<String>,

    /// Recognize occurrences inside inline text instead of at block level
    #[arg(long, global = true)]
    inline: bool,

    /// TOML file with start_block / end_block / mode keys
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a file and print the recognized document tree
    Parse(ParseArgs),

    /// Parse a file and print its canonical re-serialization
    Format(FormatArgs),
}

#[derive(clap::Args)]
struct ParseArgs {
    /// Markdown source file
    file: String,

    /// Print the recognized shortcode nodes as JSON
    #[arg(long)]
    json: bool,

    /// Parse only; report a summary instead of the tree
    #[arg(long)]
    check: bool,
}

#[derive(clap::Args)]
struct FormatArgs {
    /// Markdown source file
    file: String,
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {}", message);
            process::exit(1);
        }
    };

    match &cli.command {
        Command::Parse(args) => do_parse(args, config, cli.no_color),
        Command::Format(args) => do_format(args, config, cli.no_color),
    }
}

/// Resolve the run configuration: defaults, then the TOML file if given,
/// then flag overrides.
fn load_config(cli: &Cli) -> Result<Config, String> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read '{}': {}", path, e))?;
            toml::from_str(&text).map_err(|e| format!("invalid config '{}': {}", path, e))?
        }
        None => Config::default(),
    };
    if let Some(start_block) = &cli.start_block {
        config.start_block = start_block.clone();
    }
    if let Some(end_block) = &cli.end_block {
        config.end_block = end_block.clone();
    }
    if cli.inline {
        config.mode = Mode::Inline;
    }
    Ok(config)
}

fn do_parse(args: &ParseArgs, config: Config, no_color: bool) {
    let source = read_source(&args.file);

    let mut files = SimpleFiles::new();
    let file_id = files.add(args.file.clone(), source.clone());

    let pipeline = Pipeline::new(config);
    let (document, warnings) = pipeline.parse(&source, file_id);
    emit_warnings(&files, &warnings, no_color);

    if args.check {
        eprintln!(
            "ok: {} parsed, {} shortcode(s), {} warning(s)",
            args.file,
            document.shortcodes().len(),
            warnings.len()
        );
        return;
    }

    if args.json {
        match serde_json::to_string_pretty(&document.shortcodes()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: cannot serialize nodes: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    println!("{:#?}", document);
}

fn do_format(args: &FormatArgs, config: Config, no_color: bool) {
    let source = read_source(&args.file);

    let mut files = SimpleFiles::new();
    let file_id = files.add(args.file.clone(), source.clone());

    let pipeline = Pipeline::new(config);
    let (document, warnings) = pipeline.parse(&source, file_id);
    emit_warnings(&files, &warnings, no_color);

    let emitter = Emitter::new(pipeline.serializer());
    print!("{}", emitter.emit(&document));
}

fn read_source(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", path, e);
            process::exit(1);
        }
    }
}

fn emit_warnings(files: &SimpleFiles<String, String>, warnings: &[ParseWarning], no_color: bool) {
    if warnings.is_empty() {
        return;
    }
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();
    for warning in warnings {
        let diagnostic = warning.to_diagnostic();
        let _ = term::emit_to_write_style(&mut writer.lock(), &config, files, &diagnostic);
    }
}
