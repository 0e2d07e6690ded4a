//! Projections of token lines into printable formats.

use ratatui::crossterm::style::{Color as TermColor, Stylize, style};
use serde::Serialize;

use crate::catalog::Snippet;
use crate::highlighting::{self, TokenClass, TokenLine};
use crate::theme::Palette;

/// Output format for a rendered snippet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Source text reconstructed from tokens
    Plain,
    /// 24-bit colour escape sequences
    #[default]
    Ansi,
    /// Prism-style `<span class="token …">` markup
    Html,
    /// Token lines as JSON
    Json,
}

/// Render `snippet` in `format`.
///
/// Only the JSON projection can fail.
pub fn export(
    snippet: &Snippet,
    format: ExportFormat,
    palette: &Palette,
) -> serde_json::Result<String> {
    let lines = highlighting::render(snippet).collect_lines();
    Ok(match format {
        ExportFormat::Plain => to_plain(&lines),
        ExportFormat::Ansi => to_ansi(&lines, palette),
        ExportFormat::Html => to_html(&lines, &snippet.language),
        ExportFormat::Json => to_json(snippet, &lines)?,
    })
}

pub fn to_plain(lines: &[TokenLine]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&line.text());
        out.push('\n');
    }
    out
}

pub fn to_ansi(lines: &[TokenLine], palette: &Palette) -> String {
    let mut out = String::new();
    for line in lines {
        for token in &line.tokens {
            let rgb = palette.color(token.class);
            let color = TermColor::Rgb {
                r: rgb.0,
                g: rgb.1,
                b: rgb.2,
            };
            let styled = style(token.text.as_str()).with(color);
            let styled = match token.class {
                TokenClass::Comment => styled.italic(),
                _ => styled,
            };
            out.push_str(&styled.to_string());
        }
        out.push('\n');
    }
    out
}

pub fn to_html(lines: &[TokenLine], language: &str) -> String {
    let mut out = format!(
        "<pre class=\"language-{}\"><code>\n",
        escape_html(language.trim())
    );
    for line in lines {
        out.push_str("<div class=\"token-line\">");
        for token in &line.tokens {
            out.push_str(&format!(
                "<span class=\"token {}\">{}</span>",
                token.class,
                escape_html(&token.text)
            ));
        }
        out.push_str("</div>\n");
    }
    out.push_str("</code></pre>\n");
    out
}

#[derive(Serialize)]
struct SnippetExport<'a> {
    key: &'a str,
    label: &'a str,
    language: &'a str,
    lines: &'a [TokenLine],
}

pub fn to_json(snippet: &Snippet, lines: &[TokenLine]) -> serde_json::Result<String> {
    let export = SnippetExport {
        key: &snippet.key,
        label: &snippet.label,
        language: &snippet.language,
        lines,
    };
    serde_json::to_string_pretty(&export)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlighting::Token;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_plain_reconstructs_source() {
        let snippet = Snippet::new("s", "S", "typescript", "const a = 1\n// done\n");
        let out = export(&snippet, ExportFormat::Plain, &Palette::default()).unwrap();
        assert_eq!(out, "const a = 1\n// done\n");
    }

    #[test]
    fn test_html_wraps_each_line() {
        let lines = vec![
            TokenLine {
                tokens: vec![
                    Token::new("if", TokenClass::Keyword),
                    Token::new(" a < b", TokenClass::Plain),
                ],
            },
            TokenLine::default(),
        ];
        let html = to_html(&lines, "js");
        assert!(html.starts_with("<pre class=\"language-js\"><code>\n"));
        assert!(html.contains(
            "<div class=\"token-line\"><span class=\"token keyword\">if</span>\
             <span class=\"token plain\"> a &lt; b</span></div>"
        ));
        assert_eq!(html.matches("<div class=\"token-line\">").count(), 2);
    }

    #[test]
    fn test_ansi_keeps_text() {
        let lines = vec![TokenLine {
            tokens: vec![Token::new("echo", TokenClass::Function)],
        }];
        let out = to_ansi(&lines, &Palette::default());
        assert!(out.contains("echo"));
        assert!(out.contains("\u{1b}["));
    }

    #[test]
    fn test_json_shape() {
        let snippet = Snippet::new("k", "Label", "xyz", "one\ntwo");
        let out = export(&snippet, ExportFormat::Json, &Palette::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["key"], "k");
        assert_eq!(value["lines"].as_array().unwrap().len(), 2);
        assert_eq!(value["lines"][1][0]["text"], "two");
        assert_eq!(value["lines"][1][0]["class"], "plain");
    }

    #[test]
    fn test_ansi_italic_comments_and_full_text() {
        let lines = vec![TokenLine {
            tokens: vec![
                Token::new("// note", TokenClass::Comment),
                Token::new(" x", TokenClass::Plain),
            ],
        }];
        let out = to_ansi(&lines, &Palette::default());
        // SGR 3 is italic
        assert!(out.contains("\u{1b}[3m"));
        assert!(out.contains("// note"));
        assert!(out.contains(" x"));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_to_json_returns_document() {
        let snippet = Snippet::new("k", "Label", "xyz", "one");
        let lines = highlighting::render(&snippet).collect_lines();
        let out = to_json(&snippet, &lines).unwrap();
        assert!(out.starts_with('{'));
        assert!(out.contains("\"label\": \"Label\""));
    }
}
