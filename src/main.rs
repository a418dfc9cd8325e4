mod debug_report;

use serde::Serialize;
use std::fs;
use std::io::{self, IsTerminal, Read};
use termtrie::{
    Boundary, CharFold, CharPolicy, Continuation, MatchError, MatchMode, MatcherConfig, ScanMetrics,
    StringMatcher, TokenFold, TokenMatcher, TokenPolicy, tokenize,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let entries = match load_entries(&config.entries) {
        Ok(entries) => entries,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let report = match run(&config, &entries) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    if config.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: failed to encode report: {err}");
                std::process::exit(1);
            }
        }
    } else {
        debug_report::print_report(&report, config.color);
    }
}

struct CliConfig {
    entries: String,
    input: String,
    tokens: bool,
    mode: MatchMode,
    continuation: Continuation,
    boundary: Boundary,
    ignore_case: bool,
    ignore_punct: bool,
    json: bool,
    color: bool,
}

/// One line of the entry file.
struct EntryLine {
    line: usize,
    entry: String,
    payload: String,
}

/// A match as printed by the CLI. Offsets are bytes into `input`; token
/// mode also reports the token range.
#[derive(Debug, Serialize)]
pub(crate) struct Found {
    pub start: usize,
    pub end: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<(usize, usize)>,
    pub text: String,
    pub payloads: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Report {
    pub input: String,
    pub engine: &'static str,
    pub entries: usize,
    pub matches: Vec<Found>,
    pub metrics: ScanMetrics,
}

fn run(config: &CliConfig, entries: &[EntryLine]) -> Result<Report, String> {
    let matcher_config = MatcherConfig::default()
        .with_mode(config.mode)
        .with_continuation(config.continuation)
        .with_boundary(config.boundary);
    let opts = matcher_config.scan_options();
    let at_line = |line: usize, err: MatchError| format!("{}:{line}: {err}", config.entries);

    if config.tokens {
        let mut fold = TokenFold::NFKC | TokenFold::IGNORE_BLANK;
        fold.set(TokenFold::LOWERCASE, config.ignore_case);
        fold.set(TokenFold::IGNORE_PUNCTUATION, config.ignore_punct);
        let mut matcher = TokenMatcher::new(TokenPolicy::new(fold), matcher_config).map_err(|err| err.to_string())?;
        for e in entries {
            let tokens: Vec<&str> = tokenize(&e.entry).iter().map(|t| t.text).collect();
            matcher.insert(&tokens, e.payload.clone()).map_err(|err| at_line(e.line, err))?;
        }

        let spans = tokenize(&config.input);
        let scan = matcher.find_with_metrics(&spans, &opts);
        let matches = scan
            .matches
            .iter()
            .map(|m| {
                let (start, end) = (spans[m.start].start, spans[m.end - 1].end);
                Found {
                    start,
                    end,
                    tokens: Some((m.start, m.end)),
                    text: config.input[start..end].to_string(),
                    payloads: m.payloads.iter().map(|p| p.to_string()).collect(),
                }
            })
            .collect();
        Ok(Report { input: config.input.clone(), engine: "token", entries: matcher.len(), matches, metrics: scan.metrics })
    } else {
        let mut fold = CharFold::empty();
        fold.set(CharFold::LOWERCASE, config.ignore_case);
        fold.set(CharFold::IGNORE_PUNCTUATION, config.ignore_punct);
        let mut matcher = StringMatcher::new(CharPolicy::new(fold), matcher_config);
        for e in entries {
            matcher.insert(&e.entry, e.payload.clone()).map_err(|err| at_line(e.line, err))?;
        }

        let scan = matcher.find_with_metrics(&config.input, &opts);
        let matches = scan
            .matches
            .iter()
            .map(|m| Found {
                start: m.start,
                end: m.end,
                tokens: None,
                text: m.raw.to_string(),
                payloads: m.payloads.iter().map(|p| p.to_string()).collect(),
            })
            .collect();
        Ok(Report { input: config.input.clone(), engine: "string", entries: matcher.len(), matches, metrics: scan.metrics })
    }
}

fn load_entries(path: &str) -> Result<Vec<EntryLine>, String> {
    let content = fs::read_to_string(path).map_err(|err| format!("error: failed to read '{path}': {err}"))?;
    Ok(parse_entries(&content))
}

/// Parse `entry[<TAB>payload]` lines, skipping blanks and `#` comments.
fn parse_entries(content: &str) -> Vec<EntryLine> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty() && !line.starts_with('#'))
        .map(|(idx, line)| {
            let (entry, payload) = line.split_once('\t').unwrap_or((line, line));
            EntryLine { line: idx + 1, entry: entry.to_string(), payload: payload.to_string() }
        })
        .collect()
}

fn parse_args() -> Result<CliConfig, String> {
    let mut entries: Option<String> = None;
    let mut input: Option<String> = None;
    let mut tokens = false;
    let mut mode = MatchMode::Longest;
    let mut continuation = Continuation::Skip;
    let mut boundary = Boundary::Any;
    let mut ignore_case = false;
    let mut ignore_punct = false;
    let mut json = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("termtrie {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--tokens" => tokens = true,
            "--all" => mode = MatchMode::All,
            "--noskip" => continuation = Continuation::NoSkip,
            "--word" => boundary = Boundary::NonWord,
            "--ignore-case" | "-i" => ignore_case = true,
            "--ignore-punct" => ignore_punct = true,
            "--json" => json = true,
            "--entries" | "-e" => {
                let value = args.next().ok_or_else(|| "error: --entries expects a file".to_string())?;
                entries = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.is_empty() {
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--entries=") => {
                entries = Some(arg.trim_start_matches("--entries=").to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                input = Some(std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" "));
                break;
            }
        }
    }

    let entries = entries.ok_or_else(|| format!("error: --entries is required\n\n{}", help_text()))?;
    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    Ok(CliConfig { entries, input, tokens, mode, continuation, boundary, ignore_case, ignore_punct, json, color })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "termtrie {version}

Find gazetteer entries in text.

Usage:
  termtrie --entries <file> [OPTIONS] [--] <text...>

Reads the text from stdin when none is given on the command line.

Entry file:
  One entry per line, optionally followed by a TAB and a payload. The payload
  defaults to the entry itself. Blank lines and lines starting with '#' are
  skipped.

Options:
  -e, --entries <file>   Entry file (required).
  --tokens               Match token by token instead of character by character.
  --all                  Report every entry ending at a start, not only the longest.
  --noskip               Try every start position, allowing overlapping matches.
  --word                 Only match at word boundaries (character mode only).
  -i, --ignore-case      Compare case-insensitively.
  --ignore-punct         Skip punctuation in entries and text.
  --json                 Print the report as JSON.
  --color                Force ANSI color output.
  --no-color             Disable ANSI color output.
  -h, --help             Show this help message.
  -V, --version          Print version information.

Environment:
  RUST_LOG               Log filter for diagnostics on stderr, e.g. termtrie=debug.

Exit codes:
  0  Success.
  1  Unreadable or invalid entry file.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}
