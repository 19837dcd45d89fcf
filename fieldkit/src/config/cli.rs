use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    #[arg(short, long, value_name = "FILE", default_value = get_default_config_path().into_os_string())]
    pub config: PathBuf,
    #[command(subcommand)]
    pub command: Option<Command>,
    #[arg(short, long)]
    /// Override the maximum number of grapheme clusters. Zero removes the limit.
    pub limit: Option<usize>,
    #[arg(long)]
    /// Override the initial value of the field.
    pub value: Option<String>,
}

#[derive(Subcommand, Clone, Debug, PartialEq)]
#[clap(rename_all = "lower")]
pub enum Command {
    /// Prints the default config. Can be used to bootstrap your config file.
    Config {
        /// Prints the config file that is currently in use instead.
        #[arg(short, long, default_value = "false")]
        current: bool,
    },
    /// Runs TEXT, or every line of stdin, through the configured transforms.
    Transform {
        /// Text to transform. Lines are read from stdin when omitted.
        text: Option<String>,
        /// Run the transforms the way they run on every keystroke instead of on commit.
        #[arg(long, default_value = "false")]
        live: bool,
        /// Additional transform appended after the configured ones. Can be repeated.
        #[arg(short, long = "transform", value_name = "NAME")]
        transforms: Vec<String>,
    },
    /// Prints the number of grapheme clusters in TEXT, or in every line of stdin.
    Length {
        /// Text to measure. Lines are read from stdin when omitted.
        text: Option<String>,
    },
    /// Lists the names of the available transforms.
    Transforms,
    /// Prints the fieldkit version
    Version,
}

fn get_default_config_path() -> PathBuf {
    let mut path = PathBuf::new();
    if let Ok(dir) = std::env::var("XDG_CONFIG_HOME") {
        path.push(dir);
    } else if let Ok(home) = std::env::var("HOME") {
        path.push(home);
        path.push(".config");
    } else {
        return path;
    }
    path.push(env!("CARGO_CRATE_NAME"));
    #[cfg(debug_assertions)]
    path.push("config.debug.ron");
    #[cfg(not(debug_assertions))]
    path.push("config.ron");
    path
}
