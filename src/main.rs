mod debug_report;

use chrono::NaiveDate;
use datemend::{Context, Options, parse_verbose_with};
use std::io::{self, IsTerminal, Read};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let ctx = match config.reference_date {
        Some(date) => Context::new(date),
        None => Context::default(),
    };
    let res = parse_verbose_with(&config.input, &ctx, &config.options);
    debug_report::print_run(&config.input, &res, config.color);
}

struct CliConfig {
    input: String,
    reference_date: Option<NaiveDate>,
    options: Options,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut reference_date = None;
    let mut options = Options::default();
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("datemend {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--reference" => {
                let value = args.next().ok_or_else(|| "error: --reference expects a value".to_string())?;
                reference_date = Some(parse_reference(&value)?);
            }
            "--option" | "-o" => {
                let value = args.next().ok_or_else(|| "error: --option expects key=value".to_string())?;
                options.set_pair(&value).map_err(|err| format!("error: {err}"))?;
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--reference=") => {
                let value = arg.trim_start_matches("--reference=");
                reference_date = Some(parse_reference(value)?);
            }
            _ if arg.starts_with("--option=") => {
                let value = arg.trim_start_matches("--option=");
                options.set_pair(value).map_err(|err| format!("error: {err}"))?;
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') && arg.len() > 1 => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    options.validate().map_err(|err| format!("error: {err}"))?;

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input: input.trim().to_string(), reference_date, options, color })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn parse_reference(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("error: invalid --reference '{value}' (expected YYYY-MM-DD)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "datemend {version}

Normalize a free-text date expression and show how it was read.

Usage:
  datemend [OPTIONS] [--] <input...>
  datemend [OPTIONS] --input <text>

Options:
  -i, --input <text>         Input text to process. If omitted, reads remaining
                             args or stdin when no args are provided.
  -o, --option <key=value>   Set a processing option (repeatable), e.g.
                             ambiguous_month_day=as_day_month
  --reference <date>         Reference date in YYYY-MM-DD. Default: today.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Option keys:
  {keys}

Exit codes:
  0  Success (including inputs that could not be processed).
  2  Invalid arguments, invalid options or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        keys = datemend::options::KEYS.join("\n  "),
    )
}
