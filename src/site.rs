//! Static site configuration: base-path resolution and navigation tables.
//!
//! The website and the docs site are each served under a base path chosen at
//! build time: an explicit override wins, otherwise a GitHub Pages build uses
//! the repository path, otherwise the site lives at `/`.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which of the two static sites a base path is resolved for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SiteProfile {
    /// The marketing page
    #[default]
    Website,
    /// The documentation site
    Docs,
}

impl SiteProfile {
    /// Environment variable that overrides the base path outright.
    pub fn override_var(self) -> &'static str {
        match self {
            Self::Website => "VITE_BASE",
            Self::Docs => "VITEPRESS_BASE",
        }
    }
}

/// Site settings from the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Repository name used for the Pages path when `GITHUB_REPOSITORY` is unset.
    pub repository: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            repository: "reflex-website".to_string(),
        }
    }
}

/// Resolve the base path using `env` to look up environment variables.
///
/// Empty variables count as unset.
pub fn resolve_base_path<F>(profile: SiteProfile, config: &SiteConfig, env: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    if let Some(explicit) = var(profile.override_var()) {
        debug!(?profile, base = %explicit, "base path from override");
        return normalize_base(&explicit);
    }

    if var("GITHUB_ACTIONS").as_deref() == Some("true") {
        let base = match profile {
            SiteProfile::Website => {
                let repo = var("GITHUB_REPOSITORY")
                    .and_then(|full| full.split('/').nth(1).map(str::to_string))
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| config.repository.clone());
                format!("/{repo}/")
            }
            SiteProfile::Docs => "/docs/".to_string(),
        };
        debug!(?profile, %base, "base path from GitHub Actions");
        return base;
    }

    "/".to_string()
}

/// Resolve the base path from the process environment.
pub fn resolve_base_path_from_env(profile: SiteProfile, config: &SiteConfig) -> String {
    resolve_base_path(profile, config, |name| std::env::var(name).ok())
}

/// Ensure a base path starts and ends with `/`. Absolute URLs keep their scheme.
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim();
    let mut out = if trimmed.contains("://") || trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };
    if !out.ends_with('/') {
        out.push('/');
    }
    out
}

/// Prefix site-relative links with the base path; leave everything else alone.
pub fn join_base(base: &str, link: &str) -> String {
    if link.starts_with('/') {
        format!("{}{}", base.trim_end_matches('/'), link)
    } else {
        link.to_string()
    }
}

// ============================================================================
// Navigation tables
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub text: &'static str,
    pub link: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SidebarGroup {
    pub text: &'static str,
    pub items: &'static [NavLink],
}

const fn link(text: &'static str, link: &'static str) -> NavLink {
    NavLink { text, link }
}

/// Docs site top navigation.
pub const DOCS_NAV: &[NavLink] = &[
    link("Home", "/"),
    link("Quick Start", "/quick-start"),
    link("API Reference", "/api-reference"),
];

/// Docs site sidebar.
pub const DOCS_SIDEBAR: &[SidebarGroup] = &[
    SidebarGroup {
        text: "Getting Started",
        items: &[
            link("Introduction", "/"),
            link("Quick Start", "/quick-start"),
            link("FAQ", "/faq"),
        ],
    },
    SidebarGroup {
        text: "Reference",
        items: &[
            link("API Reference", "/api-reference"),
            link("Best Practices", "/best-practices"),
        ],
    },
];

/// Website footer.
pub const FOOTER_LINKS: &[NavLink] = &[
    link("Documentation", "/docs/"),
    link("GitHub", "https://github.com/flexsurfer/reflex"),
    link(
        "README",
        "https://github.com/flexsurfer/reflex#-quick-start",
    ),
    link(
        "MIT License",
        "https://github.com/flexsurfer/reflex/blob/main/LICENSE",
    ),
];

/// A link with its final href.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLink {
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedGroup {
    pub text: String,
    pub items: Vec<ResolvedLink>,
}

/// Navigation for one site with every link resolved against its base path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteNavigation {
    pub base: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nav: Vec<ResolvedLink>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sidebar: Vec<ResolvedGroup>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub footer: Vec<ResolvedLink>,
}

fn resolve_links(base: &str, links: &[NavLink]) -> Vec<ResolvedLink> {
    links
        .iter()
        .map(|l| ResolvedLink {
            text: l.text.to_string(),
            href: join_base(base, l.link),
        })
        .collect()
}

/// Build the navigation tables for `profile` under `base`.
pub fn navigation(profile: SiteProfile, base: &str) -> SiteNavigation {
    match profile {
        SiteProfile::Website => SiteNavigation {
            base: base.to_string(),
            nav: Vec::new(),
            sidebar: Vec::new(),
            footer: resolve_links(base, FOOTER_LINKS),
        },
        SiteProfile::Docs => SiteNavigation {
            base: base.to_string(),
            nav: resolve_links(base, DOCS_NAV),
            sidebar: DOCS_SIDEBAR
                .iter()
                .map(|g| ResolvedGroup {
                    text: g.text.to_string(),
                    items: resolve_links(base, g.items),
                })
                .collect(),
            footer: Vec::new(),
        },
    }
}
