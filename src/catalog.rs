//! Snippet catalogs: the fixed, ordered sets of code samples a viewer can show.
//!
//! A [`SnippetCatalog`] is validated once when it is built and never changes
//! afterwards. Two catalogs ship with the crate (the TodoMVC showcase and the
//! quick-start steps); others can be loaded from a TOML file.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CatalogError;

/// One labelled code sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    /// Stable identifier, referenced by tab controls.
    pub key: String,
    /// Display name shown on the tab.
    pub label: String,
    /// Tokenizer hint, e.g. `bash`, `typescript` or `tsx`.
    pub language: String,
    /// Literal code to display. Never executed.
    #[serde(rename = "code")]
    pub source_text: String,
    /// Optional one-line explanation shown under the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Snippet {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        language: impl Into<String>,
        source_text: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            language: language.into(),
            source_text: source_text.into(),
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// An ordered, non-empty set of snippets with unique keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetCatalog {
    entries: Vec<Snippet>,
}

impl SnippetCatalog {
    /// Build a catalog, rejecting empty input and empty or duplicate keys.
    pub fn new(entries: Vec<Snippet>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for (idx, snippet) in entries.iter().enumerate() {
            if snippet.key.trim().is_empty() {
                return Err(CatalogError::EmptyKey(idx));
            }
            if !seen.insert(snippet.key.as_str()) {
                return Err(CatalogError::DuplicateKey(snippet.key.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// Build one of the catalogs bundled with the crate.
    pub fn builtin(kind: CatalogKind) -> Result<Self, CatalogError> {
        let table = match kind {
            CatalogKind::Showcase => SHOWCASE,
            CatalogKind::QuickStart => QUICK_START,
        };
        Self::new(table.iter().map(BuiltinSnippet::to_snippet).collect())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed catalog; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Snippet> {
        self.entries.iter().find(|s| s.key == key)
    }

    pub fn get_index(&self, index: usize) -> Option<&Snippet> {
        self.entries.get(index)
    }

    /// Position of `key` in catalog order.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|s| s.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// The first entry, used as the default tab when none is configured.
    pub fn first(&self) -> &Snippet {
        // Non-empty by construction.
        &self.entries[0]
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.key.as_str())
    }

    pub fn as_slice(&self) -> &[Snippet] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snippet> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a SnippetCatalog {
    type Item = &'a Snippet;
    type IntoIter = std::slice::Iter<'a, Snippet>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Which bundled catalog to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogKind {
    /// The five building blocks of the TodoMVC example
    #[default]
    Showcase,
    /// Install, initialize, use from a component, enable devtools
    QuickStart,
}

impl CatalogKind {
    /// Key of the tab shown first.
    pub fn default_key(self) -> &'static str {
        match self {
            Self::Showcase => "db",
            Self::QuickStart => "install",
        }
    }
}

// ============================================================================
// Snippet files
// ============================================================================

/// On-disk layout of a user-supplied snippet file.
///
/// ```toml
/// default = "hello"
///
/// [[snippets]]
/// key = "hello"
/// label = "Hello"
/// language = "bash"
/// code = "echo hello"
/// ```
#[derive(Debug, Deserialize)]
struct SnippetFile {
    default: Option<String>,
    #[serde(default)]
    snippets: Vec<Snippet>,
}

/// A catalog loaded from a file, plus the default tab it declares.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: SnippetCatalog,
    pub default_key: Option<String>,
}

impl LoadedCatalog {
    /// Parse a snippet file from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: SnippetFile = toml::from_str(content)?;
        let catalog = SnippetCatalog::new(file.snippets)?;

        if let Some(ref key) = file.default
            && !catalog.contains(key)
        {
            return Err(CatalogError::UnknownDefault(key.clone()));
        }

        Ok(Self {
            catalog,
            default_key: file.default,
        })
    }

    /// Load a snippet file from disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let loaded = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), snippets = loaded.catalog.len(), "loaded snippet file");
        Ok(loaded)
    }
}

// ============================================================================
// Bundled snippets
// ============================================================================

struct BuiltinSnippet {
    key: &'static str,
    label: &'static str,
    language: &'static str,
    code: &'static str,
    caption: Option<&'static str>,
}

impl BuiltinSnippet {
    fn to_snippet(&self) -> Snippet {
        Snippet {
            key: self.key.to_string(),
            label: self.label.to_string(),
            language: self.language.to_string(),
            source_text: self.code.to_string(),
            caption: self.caption.map(str::to_string),
        }
    }
}

const SHOWCASE: &[BuiltinSnippet] = &[
    BuiltinSnippet {
        key: "db",
        label: "Database",
        language: "typescript",
        code: include_str!("snippets/showcase/db.ts"),
        caption: None,
    },
    BuiltinSnippet {
        key: "events",
        label: "Events",
        language: "typescript",
        code: include_str!("snippets/showcase/events.ts"),
        caption: None,
    },
    BuiltinSnippet {
        key: "effects",
        label: "Effects",
        language: "typescript",
        code: include_str!("snippets/showcase/effects.ts"),
        caption: None,
    },
    BuiltinSnippet {
        key: "subscriptions",
        label: "Subscriptions",
        language: "typescript",
        code: include_str!("snippets/showcase/subs.ts"),
        caption: None,
    },
    BuiltinSnippet {
        key: "view",
        label: "View",
        language: "tsx",
        code: include_str!("snippets/showcase/views.tsx"),
        caption: None,
    },
];

const QUICK_START: &[BuiltinSnippet] = &[
    BuiltinSnippet {
        key: "install",
        label: "Install packages",
        language: "bash",
        code: include_str!("snippets/quick_start/install.sh"),
        caption: Some("Core runtime plus optional devtools for deep inspection."),
    },
    BuiltinSnippet {
        key: "init",
        label: "Initialize your app",
        language: "typescript",
        code: include_str!("snippets/quick_start/init.ts"),
        caption: Some("Bootstrap your app database, register events, and create subscriptions."),
    },
    BuiltinSnippet {
        key: "component",
        label: "In your React component",
        language: "tsx",
        code: include_str!("snippets/quick_start/component.tsx"),
        caption: Some("Consume your events and subscriptions from React components."),
    },
    BuiltinSnippet {
        key: "devtools",
        label: "Enable tracing & devtools [Optional]",
        language: "typescript",
        code: include_str!("snippets/quick_start/devtools.ts"),
        caption: Some("Visualize event flow and subscription graphs in development."),
    },
];
