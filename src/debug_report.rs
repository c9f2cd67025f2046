use datemend::{DateType, Datetype, PassOutcome, ProcessResultVerbose, Qualifiable};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
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

pub fn print_run(input: &str, res: &ProcessResultVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Processing: \"{}\"", input), ansi::CYAN)));
    if !res.details.buckets.is_empty() {
        println!("  {} {}", palette.dim("buckets:"), palette.paint(res.details.buckets.join(" "), ansi::BLUE));
    }

    println!("\n{}", palette.paint("━━━ Passes ━━━", ansi::GRAY));
    print_passes(res, &palette);

    println!("\n{}", palette.paint("━━━ Results ━━━", ansi::GRAY));
    print_results(res, &palette);

    let result = &res.result;
    if !result.warnings.is_empty() {
        println!("\n{}", palette.paint("━━━ Warnings ━━━", ansi::GRAY));
        for warning in &result.warnings {
            println!("  {} {}", palette.paint("!", ansi::YELLOW), warning);
        }
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Lex: {}  │  Passes: {}  │  Resolve: {}",
        palette.paint(format!("{:?}", res.details.total), ansi::GREEN),
        palette.dim(format!("{:?}", res.details.lex)),
        palette.paint(format!("{:?}", res.details.passes_total), ansi::CYAN),
        palette.dim(format!("{:?}", res.details.resolve)),
    );
    println!();
}

fn print_passes(res: &ProcessResultVerbose, palette: &ansi::Palette) {
    if res.details.passes.is_empty() {
        println!("{}", palette.dim("  No passes ran (pre-check or lexer decided the outcome)"));
        return;
    }

    let width = res.details.passes.iter().map(|p| p.name.len()).max().unwrap_or(0);
    for pass in &res.details.passes {
        let marker = match pass.outcome {
            PassOutcome::Applied => palette.paint("✓", ansi::GREEN),
            PassOutcome::Unchanged => palette.dim("·"),
            PassOutcome::Skipped => palette.dim("-"),
            PassOutcome::Failed => palette.paint("✗", ansi::RED),
        };
        let types = match pass.outcome {
            PassOutcome::Applied | PassOutcome::Failed => palette.paint(&pass.types, ansi::YELLOW),
            _ => palette.dim(&pass.types),
        };
        println!(
            "  {} {} {} {}",
            marker,
            palette.paint(format!("{:<width$}", pass.name), ansi::BLUE),
            palette.dim(format!("{:>10}", format!("{:?}", pass.duration))),
            types
        );
    }
}

fn print_results(res: &ProcessResultVerbose, palette: &ansi::Palette) {
    let result = &res.result;
    if let Some(failure) = &result.failure {
        println!(
            "  {} {} {}",
            palette.paint("failed", ansi::RED),
            palette.dim("│"),
            palette.paint(failure.to_string(), ansi::RED)
        );
        return;
    }

    if let Some(set_type) = result.set_type {
        println!("  {} {}", palette.dim("set:"), palette.paint(set_type.as_str(), ansi::CYAN));
    }
    if result.inferred_date {
        println!("  {} {}", palette.dim("inferred:"), palette.paint("yes", ansi::CYAN));
    }

    for (idx, date) in result.dates.iter().enumerate() {
        let span = match (date.earliest_at_granularity(), date.latest_at_granularity()) {
            (Some(a), Some(b)) => format!("{a} .. {b}"),
            _ => "no bounds".to_string(),
        };
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.bold(palette.paint(span, ansi::GREEN)),
            palette.dim("│"),
            palette.paint(date.type_name(), ansi::BLUE),
        );
        println!("      {} {}", palette.dim("lexeme:"), palette.paint(date.lexeme(), ansi::CYAN));
        let qualifiers = describe_qualifiers(date);
        if !qualifiers.is_empty() {
            println!("      {} {}", palette.dim("qualifiers:"), palette.paint(qualifiers, ansi::YELLOW));
        }
    }
}

fn describe_qualifiers(date: &DateType) -> String {
    let whole = date.qualifiers().iter().map(|q| format!("{} ({})", q.kind.as_str(), q.precision.as_str()));
    let parts = date
        .part_qualifiers()
        .iter()
        .map(|pq| format!("{} on {}", pq.qualifier.kind.as_str(), pq.part.as_str()));
    whole.chain(parts).collect::<Vec<_>>().join(", ")
}
