//! cellgrid - A small dependency-aware spreadsheet in the terminal

mod app;
mod command;
mod config;
mod error;
mod render;

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use app::{App, Flow};
use cellgrid_core::Sheet;

fn print_usage() {
    eprintln!("Usage: cellgrid [OPTIONS]");
    eprintln!();
    eprintln!("Reads commands from stdin unless -c is given (type `help` for commands).");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --command <CMD>       Run a command and exit (can be repeated, `;` separates)");
    eprintln!("  --rows <N>                Number of rows, at most 65536 (default: 20)");
    eprintln!("  --cols <N>                Number of columns, at most 26 (default: 10)");
    eprintln!("  --config <FILE>           Load settings from a TOML file");
    eprintln!("  --no-config               Ignore the user config file");
    eprintln!("  --json                    Print results as JSON");
    eprintln!("  -h, --help                Print help");
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn parse_count(flag: &str, value: Option<&String>) -> usize {
    let Some(value) = value else {
        fail(&format!("{} requires a value", flag));
    };
    value
        .parse()
        .unwrap_or_else(|_| fail(&format!("{} expects a number, got {:?}", flag, value)))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();

    let mut commands: Vec<String> = Vec::new();
    let mut rows: Option<usize> = None;
    let mut cols: Option<usize> = None;
    let mut config_file: Option<PathBuf> = None;
    let mut no_config = false;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "-c" | "--command" => {
                i += 1;
                if i >= args.len() {
                    fail("--command requires a value");
                }
                commands.extend(args[i].split(';').map(str::to_string));
            }
            "--rows" => {
                i += 1;
                rows = Some(parse_count("--rows", args.get(i)));
            }
            "--cols" => {
                i += 1;
                cols = Some(parse_count("--cols", args.get(i)));
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    fail("--config requires a file path");
                }
                config_file = Some(PathBuf::from(&args[i]));
            }
            "--no-config" => no_config = true,
            "--json" => json = true,
            arg => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = if no_config {
        config::Config::default()
    } else {
        let (config, warnings) = config::load_config(config_file.as_ref());
        for warning in warnings {
            eprintln!("Warning: {}", warning);
        }
        config
    };
    config.rows = rows.unwrap_or(config.rows);
    config.cols = cols.unwrap_or(config.cols);
    log::debug!("starting with {:?}", config);

    let sheet = match Sheet::new(config.rows, config.cols) {
        Ok(sheet) => sheet,
        Err(e) => fail(&e.to_string()),
    };
    let mut app = App::new(sheet, config.column_width, json);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !commands.is_empty() {
        for command in &commands {
            match app.execute(command, &mut out) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => fail(&format!("{:#}", e)),
            }
        }
        return;
    }

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => fail(&e.to_string()),
        };
        match app.execute(&line, &mut out) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                if let Err(e) = writeln!(out, "Error: {:#}", e) {
                    fail(&e.to_string());
                }
            }
        }
        if let Err(e) = out.flush() {
            fail(&e.to_string());
        }
    }
}
