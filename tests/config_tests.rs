//! Configuration layering and theme parsing.

use std::path::Path;

use figment::Jail;
use reflex_showcase::catalog::CatalogKind;
use reflex_showcase::config::{ConfigOverrides, ShowcaseConfig, ViewerOverrides};
use reflex_showcase::error::ConfigError;
use reflex_showcase::highlighting::TokenClass;
use reflex_showcase::theme::{Palette, Rgb, ThemeConfig};

#[test]
fn test_full_config_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "showcase.toml",
            r##"
[viewer]
catalog = "quick-start"
default_tab = "component"

[theme]
background = "black"
keyword = "rgb(255, 0, 128)"
comment = "#6a9955"

[site]
repository = "reflex-preview"
"##,
        )?;

        let config = ShowcaseConfig::load(Some(Path::new("showcase.toml")), &Default::default())
            .map_err(|e| e.to_string())?;
        assert_eq!(config.viewer.catalog, CatalogKind::QuickStart);
        assert_eq!(config.site.repository, "reflex-preview");

        let viewer = config.viewer.build_viewer().map_err(|e| e.to_string())?;
        assert_eq!(viewer.active_key(), "component");

        let palette = Palette::from_config(&config.theme).map_err(|e| e.to_string())?;
        assert_eq!(palette.background, Rgb(0, 0, 0));
        assert_eq!(palette.color(TokenClass::Keyword), Rgb(255, 0, 128));
        assert_eq!(palette.color(TokenClass::Comment).to_hex(), "#6a9955");
        Ok(())
    });
}

#[test]
fn test_env_selects_catalog() {
    Jail::expect_with(|jail| {
        jail.set_env("REFLEX_SHOWCASE_VIEWER__CATALOG", "quick-start");
        jail.set_env("REFLEX_SHOWCASE_THEME__STRING", "#00ff00");

        let config =
            ShowcaseConfig::load(None, &ConfigOverrides::default()).map_err(|e| e.to_string())?;
        assert_eq!(config.viewer.catalog, CatalogKind::QuickStart);
        assert_eq!(config.theme.string, "#00ff00");
        Ok(())
    });
}

#[test]
fn test_cli_overrides_beat_env() {
    Jail::expect_with(|jail| {
        jail.set_env("REFLEX_SHOWCASE_VIEWER__CATALOG", "quick-start");

        let overrides = ConfigOverrides {
            viewer: ViewerOverrides {
                catalog: Some(CatalogKind::Showcase),
                ..Default::default()
            },
        };
        let config = ShowcaseConfig::load(None, &overrides).map_err(|e| e.to_string())?;
        assert_eq!(config.viewer.catalog, CatalogKind::Showcase);
        Ok(())
    });
}

#[test]
fn test_invalid_theme_colour_names_field() {
    let theme = ThemeConfig {
        keyword: "not-a-colour".to_string(),
        ..Default::default()
    };
    let err = Palette::from_config(&theme).unwrap_err();
    match err {
        ConfigError::InvalidColor { field, value } => {
            assert_eq!(field, "keyword");
            assert_eq!(value, "not-a-colour");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_malformed_file_is_reported() {
    Jail::expect_with(|jail| {
        jail.create_file("bad.toml", "[viewer\ncatalog = ")?;
        let result = ShowcaseConfig::load(Some(Path::new("bad.toml")), &Default::default());
        assert!(matches!(result, Err(ConfigError::Figment(_))));
        Ok(())
    });
}

#[test]
fn test_default_theme_parses() {
    let palette = Palette::from_config(&ThemeConfig::default()).unwrap();
    assert_eq!(palette, Palette::default());
}
