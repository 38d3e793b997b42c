#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::correctness)]
#![warn(rust_2018_idioms)]
#![warn(clippy::pedantic)]

mod cli;
mod logger;

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use ytlinkslib::config::config_extra::SettingsVersionedDefaulted;
use ytlinkslib::config::{OutputFormat, Settings, SettingsOverlay};
use ytlinkslib::player_response::{extract_links_from_bytes, LinkRecord};
use ytlinkslib::utils::get_app_config_path;

#[macro_use]
extern crate log;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    let _logger = logger::setup(&args.log_options)?;

    info!("ytlinks version {}", ytlinkslib::VERSION);

    let config = get_config(&args)?;
    let (source, data) = read_input(&args)?;
    debug!("Read {} bytes from {source}", data.len());

    let links = extract_links_from_bytes(&data)
        .with_context(|| format!("extracting links from {source}"))?;
    info!("Found {} links in {source}", links.len());

    let rendered = render(&links, config.get_format(), config.get_pretty())?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;

    Ok(())
}

fn get_config(args: &cli::Args) -> Result<SettingsOverlay> {
    let config = load_settings(args.config.as_deref(), get_app_config_path)?;

    let overlay = SettingsOverlay {
        settings: config,
        format_overwrite: args.format.map(Into::into),
        pretty_overwrite: args.compact.then_some(false),
    };

    Ok(overlay)
}

/// Load the settings from `config` if given, otherwise from the config file in `config_dir`
///
/// `config_dir` is only called (and so created) if there is no explicit config file
fn load_settings<F>(config: Option<&Path>, config_dir: F) -> Result<Settings>
where
    F: FnOnce() -> Result<PathBuf>,
{
    let settings = if let Some(path) = config {
        SettingsVersionedDefaulted::from_file(path)
            .with_context(|| format!("config path: \"{}\"", path.display()))?
    } else {
        SettingsVersionedDefaulted::from_config_dir(&config_dir()?)?
    };

    Ok(settings.into_settings())
}

/// Read the whole input, returning a description of where it came from alongside
fn read_input(args: &cli::Args) -> Result<(String, Vec<u8>)> {
    if let Some(path) = args.input_file() {
        read_file(path)
    } else {
        let mut data = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut data)
            .context("reading stdin")?;
        Ok(("stdin".to_string(), data))
    }
}

fn read_file(path: &Path) -> Result<(String, Vec<u8>)> {
    let source = format!("\"{}\"", path.display());
    let mut data = Vec::new();
    let mut file = std::fs::File::open(path).with_context(|| format!("opening file {source}"))?;
    file.read_to_end(&mut data)
        .with_context(|| format!("reading file {source}"))?;

    Ok((source, data))
}

/// Render the links in the requested format, always ending with a newline if not empty
fn render(links: &[LinkRecord], format: OutputFormat, pretty: bool) -> Result<String> {
    let mut out = match format {
        OutputFormat::Json => {
            if pretty {
                serde_json::to_string_pretty(links)?
            } else {
                serde_json::to_string(links)?
            }
        }
        OutputFormat::Plain => links
            .iter()
            .map(|link| {
                format!(
                    "{}\t{}",
                    link.get("quality").map_or("", String::as_str),
                    link.get("url").map_or("", String::as_str)
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    };

    if !out.is_empty() {
        out.push('\n');
    }

    Ok(out)
}
