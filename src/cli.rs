//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::catalog::CatalogKind;
use crate::config::{ConfigOverrides, ViewerOverrides};
use crate::export::ExportFormat;
use crate::site::SiteProfile;

/// CLI-compatible catalog selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CatalogArg {
    /// The TodoMVC example split into its five building blocks
    Showcase,
    /// Install, initialize, use from a component, enable devtools
    QuickStart,
}

impl From<CatalogArg> for CatalogKind {
    fn from(arg: CatalogArg) -> Self {
        match arg {
            CatalogArg::Showcase => CatalogKind::Showcase,
            CatalogArg::QuickStart => CatalogKind::QuickStart,
        }
    }
}

/// CLI-compatible export format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Source text only
    Plain,
    /// Coloured for a 24-bit terminal
    #[default]
    Ansi,
    /// Prism-style HTML markup
    Html,
    /// Token lines as JSON
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Plain => ExportFormat::Plain,
            FormatArg::Ansi => ExportFormat::Ansi,
            FormatArg::Html => ExportFormat::Html,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

/// CLI-compatible site profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    /// Marketing site (VITE_BASE)
    #[default]
    Website,
    /// Documentation site (VITEPRESS_BASE)
    Docs,
}

impl From<ProfileArg> for SiteProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Website => SiteProfile::Website,
            ProfileArg::Docs => SiteProfile::Docs,
        }
    }
}

/// Tabbed, syntax-highlighted code showcase for Reflex.
#[derive(Parser, Debug)]
#[command(name = "reflex-showcase")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load configuration from a TOML file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Snippet file replacing the bundled catalog
    #[arg(long, global = true, value_name = "FILE")]
    pub snippets: Option<PathBuf>,

    /// Bundled catalog to use
    #[arg(long, global = true, value_enum)]
    pub catalog: Option<CatalogArg>,

    /// Write logs to this file (the TUI always logs to a file)
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the tabs of the selected catalog
    List,

    /// Print one snippet, highlighted
    Render {
        /// Tab key; defaults to the catalog's default tab
        key: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = FormatArg::Ansi)]
        format: FormatArg,
    },

    /// Browse the snippets interactively
    Tui {
        /// Tab shown first
        #[arg(long, value_name = "KEY")]
        tab: Option<String>,
    },

    /// Static site settings
    Site {
        #[command(subcommand)]
        command: SiteCommand,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum SiteCommand {
    /// Print the URL prefix the site is served under
    BasePath {
        #[arg(long, value_enum, default_value_t = ProfileArg::Website)]
        profile: ProfileArg,
    },

    /// Print the navigation tables as JSON, links joined onto the base path
    Nav {
        #[arg(long, value_enum, default_value_t = ProfileArg::Website)]
        profile: ProfileArg,
    },
}

impl Cli {
    /// Configuration values set explicitly on the command line.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let default_tab = match &self.command {
            Command::Tui { tab } => tab.clone(),
            _ => None,
        };
        ConfigOverrides {
            viewer: ViewerOverrides {
                catalog: self.catalog.map(CatalogKind::from),
                snippets: self.snippets.clone(),
                default_tab,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "reflex-showcase",
            "render",
            "events",
            "--format",
            "html",
            "--catalog",
            "quick-start",
        ])
        .unwrap();

        assert_eq!(cli.catalog, Some(CatalogArg::QuickStart));
        let Command::Render { key, format } = &cli.command else {
            panic!("expected render");
        };
        assert_eq!(key.as_deref(), Some("events"));
        assert_eq!(*format, FormatArg::Html);
    }

    #[test]
    fn test_overrides_only_carry_explicit_values() {
        let cli = Cli::try_parse_from(["reflex-showcase", "list"]).unwrap();
        let overrides = cli.to_config_overrides();
        assert!(overrides.viewer.catalog.is_none());
        assert!(overrides.viewer.snippets.is_none());
        assert!(overrides.viewer.default_tab.is_none());

        let cli = Cli::try_parse_from(["reflex-showcase", "tui", "--tab", "effects"]).unwrap();
        assert_eq!(
            cli.to_config_overrides().viewer.default_tab.as_deref(),
            Some("effects")
        );
    }
}
