//! cmdchain: render a JSON command descriptor as a shell command line.
//!
//! Reads one descriptor from stdin (or `--input FILE`), validates it, and
//! prints the rendered command on stdout. Nothing is executed.

use std::io::Read;
use std::process::ExitCode;

use cmdchain::config::Config;
use cmdchain::error::Error;

const USAGE: &str = "\
usage: cmdchain [OPTIONS] < descriptor.json

options:
  --input FILE     read the descriptor from FILE instead of stdin
  --config FILE    merge FILE over the embedded defaults
  --check          verify the output parses as bash
  --json           print {\"command\": \"...\"} instead of the bare command
  --dump-config    print the effective configuration and exit
  -h, --help       show this help";

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    config: Option<String>,
    check: bool,
    json: bool,
    dump_config: bool,
    help: bool,
}

fn parse_args(mut argv: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut args = Args::default();
    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--input" => args.input = Some(argv.next().ok_or("--input needs a file")?),
            "--config" => args.config = Some(argv.next().ok_or("--config needs a file")?),
            "--check" => args.check = true,
            "--json" => args.json = true,
            "--dump-config" => args.dump_config = true,
            "-h" | "--help" => args.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(args)
}

fn read_input(path: Option<&str>) -> Result<String, Error> {
    let mut input = String::new();
    match path {
        Some(p) => {
            input = std::fs::read_to_string(p).map_err(|source| Error::Io {
                context: format!("reading {p}"),
                source,
            })?;
        }
        None => {
            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(|source| Error::Io {
                    context: "reading stdin".into(),
                    source,
                })?;
        }
    }
    Ok(input)
}

fn run(args: &Args) -> Result<(), Error> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    if args.check {
        config.settings.check_syntax = true;
    }
    cmdchain::logging::init(&config.logging);

    if args.dump_config {
        match toml::to_string_pretty(&config) {
            Ok(s) => print!("{s}"),
            Err(e) => log::error!("cannot serialise config: {e}"),
        }
        return Ok(());
    }

    let input = read_input(args.input.as_deref())?;
    let command = cmdchain::render_json(&input, &config)?;

    println!("{}", format_output(&command, args.json));
    Ok(())
}

fn format_output(command: &str, json: bool) -> String {
    if json {
        serde_json::json!({ "command": command }).to_string()
    } else {
        command.to_string()
    }
}

/// 2 for output that fails the syntax check, 1 for every other failure.
fn exit_code(err: &Error) -> u8 {
    match err {
        Error::Syntax(_) => 2,
        _ => 1,
    }
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("cmdchain: {e}\n\n{USAGE}");
            return ExitCode::from(1);
        }
    };
    if args.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("cmdchain: {e}");
            ExitCode::from(exit_code(&e))
        }
    }
}
