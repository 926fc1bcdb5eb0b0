mod console;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use sibyl::{Language, Messages, Script, Session};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(config) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(config: CliConfig) -> anyhow::Result<()> {
    let script = match &config.script_dir {
        Some(dir) => Script::from_dir(dir, config.language)
            .with_context(|| format!("failed to load script pack from `{}`", dir.display()))?,
        None => Script::builtin(config.language).context("failed to load built-in script pack")?,
    };
    let mut session = Session::new(Arc::new(script));

    match config.input {
        Some(input) => {
            println!("{}", session.respond(&input));
            Ok(())
        }
        None => {
            let messages = match &config.script_dir {
                Some(dir) => Messages::from_dir(dir, config.language)
                    .with_context(|| format!("failed to load messages from `{}`", dir.display()))?,
                None => Messages::builtin(config.language).context("failed to load built-in messages")?,
            };
            console::run_shell(&mut session, &messages, config.color)
        }
    }
}

struct CliConfig {
    language: Language,
    script_dir: Option<PathBuf>,
    input: Option<String>,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut language = Language::Us;
    let mut script_dir: Option<PathBuf> = None;
    let mut input: Option<String> = None;
    let mut color = std::io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("sibyl {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--lang" | "-l" => {
                let value = args.next().ok_or_else(|| "error: --lang expects a value".to_string())?;
                language = parse_language(&value)?;
            }
            "--script-dir" => {
                let value = args.next().ok_or_else(|| "error: --script-dir expects a value".to_string())?;
                script_dir = Some(PathBuf::from(value));
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
            _ if arg.starts_with("--lang=") => {
                language = parse_language(arg.trim_start_matches("--lang="))?;
            }
            _ if arg.starts_with("--script-dir=") => {
                script_dir = Some(PathBuf::from(arg.trim_start_matches("--script-dir=")));
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
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

    Ok(CliConfig { language, script_dir, input, color })
}

fn parse_language(value: &str) -> Result<Language, String> {
    Language::from_str(value).map_err(|err| format!("error: {err}"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "sibyl {version}

Rule-driven, ELIZA-style conversation engine CLI.

Usage:
  sibyl [OPTIONS]
  sibyl [OPTIONS] --input <text>
  sibyl [OPTIONS] [--] <text...>

Options:
  -i, --input <text>      Respond to a single line on stdout and exit.
                          Without input, an interactive session starts.
  -l, --lang <code>       Script-pack language: us or fr. Default: us.
  --script-dir <path>     Load script packs from a directory instead of the
                          built-in packs.
  --color                 Force ANSI color output.
  --no-color              Disable ANSI color output.
  -h, --help              Show this help message.
  -V, --version           Print version information.

Exit codes:
  0  Success.
  1  Internal error (for example a script pack that fails to load).
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION")
    )
}
