//! CLI entry point for reflex-showcase.

use std::io;

use clap::{CommandFactory, Parser};
use color_eyre::eyre::{Result, WrapErr};
use tracing::debug;

use reflex_showcase::cli::{Cli, Command, SiteCommand};
use reflex_showcase::config::ShowcaseConfig;
use reflex_showcase::export::export;
use reflex_showcase::logging::init_logging;
use reflex_showcase::site::{SiteProfile, navigation, resolve_base_path_from_env};
use reflex_showcase::theme::Palette;
use reflex_showcase::tui;
use reflex_showcase::viewer::ViewerState;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if let Command::Completions { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            "reflex-showcase",
            &mut io::stdout(),
        );
        return Ok(());
    }

    // The TUI owns the terminal and always logs to a file; other commands
    // only log when asked to.
    let _guard = match (&cli.command, cli.log_file.as_deref()) {
        (Command::Tui { .. }, path) | (_, path @ Some(_)) => {
            Some(init_logging(path, &cli.log_level).wrap_err("Failed to initialize logging")?)
        }
        (_, None) => None,
    };

    let config = ShowcaseConfig::load(cli.config.as_deref(), &cli.to_config_overrides())
        .wrap_err("Failed to load configuration")?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Command::List => list(&config),
        Command::Render { key, format } => {
            let viewer = build_viewer(&config)?;
            let viewer = match key {
                Some(key) => viewer
                    .select_tab(&key)
                    .wrap_err_with(|| format!("Cannot render '{key}'"))?,
                None => viewer,
            };
            let palette = Palette::from_config(&config.theme).wrap_err("Invalid theme colours")?;
            let rendered = export(viewer.active_snippet(), format.into(), &palette)
                .wrap_err("Failed to export snippet")?;
            print!("{rendered}");
            Ok(())
        }
        Command::Tui { .. } => tui::run(&config),
        Command::Site { command } => match command {
            SiteCommand::BasePath { profile } => {
                println!(
                    "{}",
                    resolve_base_path_from_env(profile.into(), &config.site)
                );
                Ok(())
            }
            SiteCommand::Nav { profile } => {
                let profile = SiteProfile::from(profile);
                let base = resolve_base_path_from_env(profile, &config.site);
                let nav = navigation(profile, &base);
                println!(
                    "{}",
                    serde_json::to_string_pretty(&nav)
                        .wrap_err("Failed to serialize navigation")?
                );
                Ok(())
            }
        },
        Command::Completions { .. } => Ok(()),
    }
}

fn build_viewer(config: &ShowcaseConfig) -> Result<ViewerState> {
    config
        .viewer
        .build_viewer()
        .wrap_err("Failed to build snippet catalog")
}

/// Print one row per tab, marking the one shown first.
fn list(config: &ShowcaseConfig) -> Result<()> {
    let viewer = build_viewer(config)?;
    let width = viewer
        .catalog()
        .keys()
        .map(str::len)
        .max()
        .unwrap_or_default();

    for snippet in viewer.catalog() {
        let marker = if viewer.is_active(&snippet.key) {
            '*'
        } else {
            ' '
        };
        println!(
            "{marker} {:<width$}  {} ({})",
            snippet.key, snippet.label, snippet.language
        );
    }
    Ok(())
}
