use clap::Parser;
use srcpack_lib::{ConfigurationError, DEFAULT_OUTPUT, DEFAULT_SOURCE, ExtensionSet, PackConfig};
use std::convert::Infallible;
use std::path::PathBuf;

mod fs_utils;
mod logging;
mod packaging;
mod process;
mod sink;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Zip all .cs and .asmdef files from the current (or a specified) directory.",
    long_about = None
)]
pub struct Cli {
    /// Source directory (defaults to current directory)
    #[arg(short, long, default_value = DEFAULT_SOURCE, value_parser = parse_source)]
    pub source: PathBuf,

    /// Output .zip file name (defaults to cs_files.zip)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    logging::init_tracing()?;
    let cli = Cli::parse();

    if let Err(err) = process::process_files(&cli_to_config(cli)) {
        if let Some(config_err) = err.downcast_ref::<ConfigurationError>() {
            eprintln!("Error: {config_err}");
            std::process::exit(1);
        }
        return Err(err);
    }

    Ok(())
}

/// An empty `--source` means the current directory.
fn parse_source(value: &str) -> Result<PathBuf, Infallible> {
    if value.is_empty() {
        Ok(PathBuf::from(DEFAULT_SOURCE))
    } else {
        Ok(PathBuf::from(value))
    }
}

/// Converts CLI struct into PackConfig
fn cli_to_config(cli: Cli) -> PackConfig {
    PackConfig {
        source: cli.source,
        output: cli.output,
        extensions: ExtensionSet::default(),
    }
}
