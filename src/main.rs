//! CLI for usfm2json - USFM to JSON converter

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use usfm2json::{
    DiscardMarkers, JsonRenderer, LeveledHandler, MissingPrefix, ParseOptions, Renderer,
    UsfmParser, UsfmRenderer,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Usfm,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input USFM file path
    input: PathBuf,

    /// Output file path (optional, prints to stdout if not specified)
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: Format,

    /// Emit JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Fail on lines that do not start with a marker
    #[arg(long)]
    strict: bool,

    /// Drop the content of these inline markers (repeatable, e.g. --discard f)
    #[arg(long, value_name = "MARKER")]
    discard: Vec<String>,

    /// Treat these tags as leveled, e.g. --leveled s gives `\s` level 1
    #[arg(long, value_name = "KEY")]
    leveled: Vec<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let options = ParseOptions {
        missing_prefix: if args.strict {
            MissingPrefix::Reject
        } else {
            MissingPrefix::Keep
        },
        ..Default::default()
    };

    let mut parser = UsfmParser::new(options);
    for key in &args.leveled {
        parser = parser.with_handler(LeveledHandler::new(key.as_str()));
    }
    if !args.discard.is_empty() {
        parser = parser.with_element_hook(DiscardMarkers::new(args.discard.iter().cloned()));
    }

    let document = match parser.parse_file(&args.input) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Error parsing USFM: {}", e);
            std::process::exit(1);
        }
    };

    let rendered = match args.format {
        Format::Json => JsonRenderer {
            pretty: !args.compact,
        }
        .render(&document),
        Format::Usfm => UsfmRenderer.render(&document),
    };

    match rendered {
        Ok(output_text) => {
            if let Some(output) = args.output {
                if let Err(e) = std::fs::write(&output, &output_text) {
                    eprintln!("Error writing output: {}", e);
                    std::process::exit(1);
                }
                println!("Successfully converted to {:?}", output);
            } else {
                println!("{}", output_text);
            }
        }
        Err(e) => {
            eprintln!("Error rendering output: {}", e);
            std::process::exit(1);
        }
    }
}
