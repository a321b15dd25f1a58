//! Lamassu - incremental SGML/XML and CSS tokenization
//!
//! Usage: lamassu --xml <file>

use std::env;
use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use log::debug;

use lamassu_css::{CssHandlers, CssTokenizer};
use lamassu_markup::{EventHandlers, Mode, Parser};
use lamassu_text::detect_encoding;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Feed size used when streaming a document through the parser
const CHUNK: usize = 4096;

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        return ExitCode::FAILURE;
    }

    let command = args[1].as_str();
    debug!("command: {}", command);

    match command {
        "--help" | "-h" => {
            print_usage(&args[0]);
            ExitCode::SUCCESS
        }
        "--version" | "-V" => {
            println!("Lamassu {}", VERSION);
            ExitCode::SUCCESS
        }
        "--sgml" | "--xml" => {
            if args.len() < 3 {
                eprintln!("Usage: {} {} <PATH>", args[0], command);
                return ExitCode::FAILURE;
            }
            let mode = if command == "--sgml" { Mode::Sgml } else { Mode::Xml };
            run(tokenize_markup(mode, &args[2]))
        }
        "--css" => {
            if args.len() < 3 {
                eprintln!("Usage: {} --css <PATH>", args[0]);
                return ExitCode::FAILURE;
            }
            run(tokenize_css(&args[2]))
        }
        "--sniff" => {
            if args.len() < 3 {
                eprintln!("Usage: {} --sniff <PATH>", args[0]);
                return ExitCode::FAILURE;
            }
            run(sniff(&args[2]))
        }
        other => {
            eprintln!("Unknown option: {}", other);
            print_usage(&args[0]);
            ExitCode::FAILURE
        }
    }
}

fn run(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_usage(program: &str) {
    println!(
        r#"Lamassu {} - incremental SGML/XML and CSS tokenization

USAGE:
    {} <OPTION> <PATH>

OPTIONS:
    -h, --help        Print this help message
    -V, --version     Print version information
    --sgml <PATH>     Tokenize a document in SGML mode, one event per line
    --xml <PATH>      Tokenize a document in XML mode, one event per line
    --css <PATH>      Tokenize a stylesheet, one token per line
    --sniff <PATH>    Detect the encoding of an XML document

EXAMPLES:
    {} --xml page.xml
    {} --css style.css
"#,
        VERSION, program, program, program
    );
}

/// Stream a document through the markup parser in fixed-size chunks,
/// printing one line per event
fn tokenize_markup(mode: Mode, path: &str) -> anyhow::Result<()> {
    let input = fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;

    let mut parser = Parser::new(mode);
    parser.register(
        EventHandlers::new()
            .on_enter_start_tag(|name| println!("starttag   {}", name))
            .on_leave_start_tag(|name| println!("starttag+  {}", name))
            .on_end_tag(|name| println!("endtag     {}", name))
            .on_enter_attr(|name| println!("attr       {}", name))
            .on_leave_attr(|name| println!("attr+      {}", name))
            .on_text(|text| println!("text       {:?}", text))
            .on_cdata(|text| println!("cdata      {:?}", text))
            .on_comment(|text| println!("comment    {:?}", text))
            .on_special(|text| println!("special    {:?}", text))
            .on_entity_ref(|name| println!("entityref  {}", name))
            .on_char_ref(|body| println!("charref    {}", body))
            .on_proc(|target, data| println!("proc       {} {:?}", target, data)),
    );

    let chars: Vec<char> = input.chars().collect();
    for chunk in chars.chunks(CHUNK) {
        let piece: String = chunk.iter().collect();
        parser.feed(&piece)?;
    }
    parser.close()?;
    Ok(())
}

/// Print `KIND "raw"` for every token in a stylesheet
fn tokenize_css(path: &str) -> anyhow::Result<()> {
    let input = fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;

    let mut tokenizer = CssTokenizer::new();
    tokenizer.register(
        CssHandlers::new().on_token(|kind, raw| println!("{} {:?}", kind, raw)),
    );
    tokenizer.parse(&input)?;
    Ok(())
}

/// Report the detected encoding of an XML document
fn sniff(path: &str) -> anyhow::Result<()> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path))?;
    match detect_encoding(&bytes, true)? {
        Some(name) => println!("{}", name),
        None => println!("undetermined"),
    }
    Ok(())
}
