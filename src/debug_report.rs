use crate::{Found, Report};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

const PREVIEW_CHARS: usize = 60;

pub fn print_report(report: &Report, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Scanning: \"{}\"", preview(&report.input)), ansi::CYAN)));
    println!(
        "  {} {}  {} {}",
        palette.dim("engine:"),
        palette.paint(report.engine, ansi::BLUE),
        palette.dim("│ entries:"),
        palette.paint(report.entries.to_string(), ansi::BLUE),
    );

    println!("\n{}", palette.paint("━━━ Matches ━━━", ansi::GRAY));
    if report.matches.is_empty() {
        println!("{}", palette.dim("  No matches"));
    } else {
        print_matches(&report.matches, &palette);
    }

    let metrics = &report.metrics;
    println!("\n{}", palette.paint("━━━ Scan ━━━", ansi::GRAY));
    println!(
        "  Starts: {}  │  Descents: {}  │  Visited: {}",
        palette.paint(metrics.starts.to_string(), ansi::YELLOW),
        palette.paint(metrics.descents.to_string(), ansi::YELLOW),
        palette.paint(metrics.visited.to_string(), ansi::YELLOW),
    );
    println!("  Total: {}", palette.paint(format!("{:?}", metrics.elapsed), ansi::GREEN));
    println!();
}

fn print_matches(matches: &[Found], palette: &ansi::Palette) {
    for (idx, found) in matches.iter().enumerate() {
        let span = match found.tokens {
            Some((start, end)) => format!("tokens {start}..{end}"),
            None => format!("span {}..{}", found.start, found.end),
        };
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.bold(palette.paint(&found.text, ansi::GREEN)),
            palette.dim("│"),
            palette.paint(span, ansi::YELLOW),
        );
        println!("      {} {}", palette.dim("payloads:"), palette.paint(found.payloads.join(", "), ansi::BLUE));
    }
}

fn preview(input: &str) -> String {
    let line = input.trim_end();
    if line.chars().count() <= PREVIEW_CHARS {
        return line.to_string();
    }
    let cut: String = line.chars().take(PREVIEW_CHARS).collect();
    format!("{cut}…")
}
