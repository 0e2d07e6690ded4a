//! Tokenizer turning snippet source into styled token lines.
//!
//! Scanning is driven by the syntect grammars bundled in two-face. Each region
//! of a line is classified by walking its scope stack from the innermost scope
//! outward and taking the first scope that maps to a [`TokenClass`]. Unknown language tags
//! fall back to one plain token per line.

use std::str::SplitInclusive;
use std::sync::LazyLock;

use serde::Serialize;
use syntect::easy::ScopeRegionIterator;
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};
use tracing::{debug, warn};

use crate::catalog::Snippet;

/// Cached syntax set - expensive to load, so we cache it globally.
///
/// syntect's own defaults lack TypeScript and JSX, so the extended set from
/// two-face is used instead.
pub static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(two_face::syntax::extra_newlines);

/// Language tags that don't match a bundled grammar directly.
const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("typescript", "ts"),
    ("jsx", "tsx"),
    ("javascript", "js"),
    ("shell", "bash"),
    ("zsh", "bash"),
    ("console", "bash"),
];

/// Style class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenClass {
    Plain,
    Comment,
    Keyword,
    String,
    Number,
    Constant,
    Function,
    Type,
    Tag,
    Attribute,
    Variable,
    Operator,
    Punctuation,
    Escape,
    Regex,
}

/// Scope prefixes and the class they map to, most specific first.
const SCOPE_CLASSES: &[(&str, TokenClass)] = &[
    ("comment", TokenClass::Comment),
    ("punctuation.definition.comment", TokenClass::Comment),
    ("punctuation.definition.string", TokenClass::String),
    ("constant.character.escape", TokenClass::Escape),
    ("string.regexp", TokenClass::Regex),
    ("string", TokenClass::String),
    ("constant.numeric", TokenClass::Number),
    ("constant", TokenClass::Constant),
    ("keyword.operator", TokenClass::Operator),
    ("keyword", TokenClass::Keyword),
    ("storage", TokenClass::Keyword),
    ("entity.name.function", TokenClass::Function),
    ("support.function", TokenClass::Function),
    ("variable.function", TokenClass::Function),
    ("entity.name.type", TokenClass::Type),
    ("entity.name.class", TokenClass::Type),
    ("entity.other.inherited-class", TokenClass::Type),
    ("support.type", TokenClass::Type),
    ("support.class", TokenClass::Type),
    ("entity.name.tag", TokenClass::Tag),
    ("entity.other.attribute-name", TokenClass::Attribute),
    ("variable", TokenClass::Variable),
    ("punctuation", TokenClass::Punctuation),
];

impl TokenClass {
    pub const ALL: [TokenClass; 15] = [
        Self::Plain,
        Self::Comment,
        Self::Keyword,
        Self::String,
        Self::Number,
        Self::Constant,
        Self::Function,
        Self::Type,
        Self::Tag,
        Self::Attribute,
        Self::Variable,
        Self::Operator,
        Self::Punctuation,
        Self::Escape,
        Self::Regex,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Comment => "comment",
            Self::Keyword => "keyword",
            Self::String => "string",
            Self::Number => "number",
            Self::Constant => "constant",
            Self::Function => "function",
            Self::Type => "type",
            Self::Tag => "tag",
            Self::Attribute => "attribute",
            Self::Variable => "variable",
            Self::Operator => "operator",
            Self::Punctuation => "punctuation",
            Self::Escape => "escape",
            Self::Regex => "regex",
        }
    }

    /// Class for a single scope name such as `string.quoted.single.js`.
    pub fn from_scope(scope: &str) -> Option<Self> {
        SCOPE_CLASSES
            .iter()
            .find(|(prefix, _)| scope_matches(scope, prefix))
            .map(|(_, class)| *class)
    }

    /// Class for a full scope stack, innermost scope winning.
    fn from_stack(stack: &ScopeStack) -> Self {
        stack
            .as_slice()
            .iter()
            .rev()
            .find_map(|scope| Self::from_scope(&scope.build_string()))
            .unwrap_or(Self::Plain)
    }
}

impl std::fmt::Display for TokenClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `string` matches `string` and `string.quoted`, not `stringy`.
fn scope_matches(scope: &str, prefix: &str) -> bool {
    scope
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}

/// A run of text sharing one style class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub class: TokenClass,
}

impl Token {
    pub fn new(text: impl Into<String>, class: TokenClass) -> Self {
        Self {
            text: text.into(),
            class,
        }
    }
}

/// All tokens of one source line, without the line terminator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TokenLine {
    pub tokens: Vec<Token>,
}

impl TokenLine {
    /// Concatenated token text; equals the source line minus its terminator.
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    /// Append text, merging with the previous token when the class matches.
    fn push(&mut self, text: &str, class: TokenClass) {
        if text.is_empty() {
            return;
        }
        match self.tokens.last_mut() {
            Some(last) if last.class == class => last.text.push_str(text),
            _ => self.tokens.push(Token::new(text, class)),
        }
    }
}

/// Resolve a language tag to a bundled grammar.
///
/// Returns `None` for tags no grammar claims; those render as plain text.
pub fn find_syntax(language: &str) -> Option<&'static SyntaxReference> {
    let tag = language.trim().to_ascii_lowercase();
    if tag.is_empty() {
        return None;
    }
    let token = LANGUAGE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == tag)
        .map(|(_, target)| *target)
        .unwrap_or(tag.as_str());
    SYNTAX_SET.find_syntax_by_token(token)
}

/// Tokenize a snippet according to its language tag.
pub fn render(snippet: &Snippet) -> Rendering<'_> {
    tokenize(&snippet.source_text, &snippet.language)
}

/// Tokenize arbitrary source text.
pub fn tokenize<'a>(source: &'a str, language: &str) -> Rendering<'a> {
    let syntax = find_syntax(language);
    match syntax {
        Some(s) => debug!(language, syntax = %s.name, "resolved syntax"),
        None => debug!(language, "no grammar for language, rendering plain text"),
    }
    Rendering { source, syntax }
}

/// A tokenization plan for one source text.
///
/// Nothing is scanned until [`Rendering::lines`] is iterated, and every call to
/// `lines` starts a fresh scan, so the sequence can be replayed at will.
#[derive(Debug, Clone, Copy)]
pub struct Rendering<'a> {
    source: &'a str,
    syntax: Option<&'static SyntaxReference>,
}

impl<'a> Rendering<'a> {
    /// Lazily scanned token lines.
    pub fn lines(&self) -> TokenLines<'a> {
        TokenLines {
            lines: self.source.split_inclusive('\n'),
            scanner: self.syntax.map(|syntax| Scanner {
                state: ParseState::new(syntax),
                stack: ScopeStack::new(),
            }),
        }
    }

    /// Whether a grammar was found for the language tag.
    pub fn is_highlighted(&self) -> bool {
        self.syntax.is_some()
    }

    /// Display name of the grammar in use.
    pub fn syntax_name(&self) -> &'static str {
        self.syntax.map_or("Plain Text", |s| s.name.as_str())
    }

    pub fn collect_lines(&self) -> Vec<TokenLine> {
        self.lines().collect()
    }
}

impl<'a> IntoIterator for Rendering<'a> {
    type Item = TokenLine;
    type IntoIter = TokenLines<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines()
    }
}

struct Scanner {
    state: ParseState,
    stack: ScopeStack,
}

impl Scanner {
    fn scan(&mut self, line: &str) -> TokenLine {
        let ops = match self.state.parse_line(line, &SYNTAX_SET) {
            Ok(ops) => ops,
            Err(e) => {
                warn!(error = %e, "failed to parse line, rendering it plain");
                return plain_line(line);
            }
        };

        // Regions are clipped to the content so only the terminator is dropped.
        let content = strip_terminator(line);
        let mut out = TokenLine::default();
        let mut offset = 0;
        for (region, op) in ScopeRegionIterator::new(&ops, line) {
            if let Err(e) = self.stack.apply(op) {
                warn!(error = ?e, "scope stack out of sync");
            }
            let start = offset.min(content.len());
            offset += region.len();
            let end = offset.min(content.len());
            out.push(&content[start..end], TokenClass::from_stack(&self.stack));
        }

        if out.tokens.is_empty() {
            return plain_line(line);
        }
        out
    }
}

/// Iterator over the token lines of a [`Rendering`].
pub struct TokenLines<'a> {
    lines: SplitInclusive<'a, char>,
    scanner: Option<Scanner>,
}

impl Iterator for TokenLines<'_> {
    type Item = TokenLine;

    fn next(&mut self) -> Option<TokenLine> {
        let line = self.lines.next()?;
        Some(match self.scanner {
            Some(ref mut scanner) => scanner.scan(line),
            None => plain_line(line),
        })
    }
}

/// One plain token holding the whole line, even when it is empty.
fn plain_line(line: &str) -> TokenLine {
    TokenLine {
        tokens: vec![Token::new(strip_terminator(line), TokenClass::Plain)],
    }
}

fn strip_terminator(text: &str) -> &str {
    text.trim_end_matches(['\n', '\r'])
}
