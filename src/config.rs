//! Layered configuration: defaults, TOML file, environment, CLI.
//!
//! Layers are merged with figment in that order, so later layers win.
//! Environment variables use the `REFLEX_SHOWCASE_` prefix with `__` as the
//! section separator, e.g. `REFLEX_SHOWCASE_VIEWER__DEFAULT_TAB=events`.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogKind, LoadedCatalog, SnippetCatalog};
use crate::error::{CatalogError, ConfigError};
use crate::site::SiteConfig;
use crate::theme::ThemeConfig;
use crate::viewer::ViewerState;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "REFLEX_SHOWCASE_";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub viewer: ViewerConfig,
    pub theme: ThemeConfig,
    pub site: SiteConfig,
}

/// Which snippets to show and where to start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Bundled catalog, ignored when `snippets` is set
    pub catalog: CatalogKind,
    /// Snippet file replacing the bundled catalog
    pub snippets: Option<PathBuf>,
    /// Tab shown first; falls back to the catalog's own default
    pub default_tab: Option<String>,
}

/// Values set explicitly on the command line.
///
/// Unset fields are skipped when serialized so they don't mask lower layers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    pub viewer: ViewerOverrides,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewerOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CatalogKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippets: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_tab: Option<String>,
}

impl ShowcaseConfig {
    /// Build the figment for defaults + optional file + environment.
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(ShowcaseConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load configuration, failing if an explicitly named file is missing.
    pub fn load(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(path) = path
            && !path.exists()
        {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }

        let config = Self::figment(path)
            .merge(Serialized::defaults(overrides))
            .extract()?;
        Ok(config)
    }

    /// Load configuration from a TOML string only (no environment).
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config = Figment::from(Serialized::defaults(ShowcaseConfig::default()))
            .merge(Toml::string(content))
            .extract()?;
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }
}

impl ViewerConfig {
    /// Build the viewer state this configuration describes.
    pub fn build_viewer(&self) -> Result<ViewerState, CatalogError> {
        let (catalog, declared_default) = match self.snippets {
            Some(ref path) => {
                let loaded = LoadedCatalog::load(path)?;
                (loaded.catalog, loaded.default_key)
            }
            None => (
                SnippetCatalog::builtin(self.catalog)?,
                Some(self.catalog.default_key().to_string()),
            ),
        };

        let default_key = self
            .default_tab
            .clone()
            .or(declared_default)
            .unwrap_or_else(|| catalog.first().key.clone());

        ViewerState::initialize(catalog, &default_key)
    }
}
