use std::io::{Read, Write};

use anyhow::{Context, Result};
use clap::Parser;
use fieldkit_core::transform::{Builtin, Mode};
use fieldkit_shared::{graphemes, string_ext::StringExt};
use strum::IntoEnumIterator;

use crate::config::{
    ConfigFile,
    cli::{Args, Command},
};

mod config;
mod logging;
mod ui;

fn main() -> Result<()> {
    let args = Args::parse();
    match args.command {
        Some(Command::Config { current: false }) => {
            println!("{}", ConfigFile::default().to_ron()?);
        }
        Some(Command::Config { current: true }) => {
            let mut file = std::fs::File::open(&args.config).with_context(|| {
                format!("Config file was not found at '{}'", args.config.display())
            })?;
            let mut config = String::new();
            file.read_to_string(&mut config)?;
            println!("{config}");
        }
        Some(Command::Version) => {
            println!("fieldkit {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Command::Transforms) => {
            let mut stdout = std::io::stdout().lock();
            for builtin in Builtin::iter() {
                writeln!(stdout, "{builtin}")?;
            }
        }
        Some(Command::Length { text }) => {
            let mut stdout = std::io::stdout().lock();
            for line in input_lines(text)? {
                writeln!(stdout, "{}", graphemes::length(&line))?;
            }
        }
        Some(Command::Transform { text, live, transforms }) => {
            let _logger = logging::init_console().context("Logger to initialize")?;
            let config = read_config_file(&args.config)
                .into_config(args.limit, args.value)
                .context("Invalid configuration")?;

            let mut pipeline = config.build_pipeline()?;
            for name in transforms {
                pipeline.append(name.as_str())?;
            }

            let mode = if live { Mode::Live } else { Mode::Final };
            let mut stdout = std::io::stdout().lock();
            for line in input_lines(text)? {
                let mut result = pipeline.apply(&line, mode);
                if let Some(limit) = config.limit
                    && result.truncate_clusters(limit)
                {
                    log::warn!(limit, input = line.as_str(); "Result was truncated");
                }
                writeln!(stdout, "{result}")?;
            }
        }
        None => {
            let _logger = logging::init().context("Logger to initialize")?;
            log::debug!(version = env!("CARGO_PKG_VERSION"); "fieldkit started");

            let config = read_config_file(&args.config)
                .into_config(args.limit, args.value)
                .context("Invalid configuration")?;
            ui::run(&config)?;
        }
    }

    Ok(())
}

fn input_lines(text: Option<String>) -> Result<Vec<String>> {
    match text {
        Some(text) => Ok(vec![text]),
        None => Ok(std::io::stdin().lines().collect::<Result<_, _>>()?),
    }
}

fn read_config_file(path: &std::path::Path) -> ConfigFile {
    match ConfigFile::read(path) {
        Ok(file) => file,
        Err(err) => {
            log::warn!(err:?, path:?; "Failed to read config. Using default values");
            ConfigFile::default()
        }
    }
}
