//! Colour palette mapping token classes to display colours.

use csscolorparser::Color as CssColor;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::highlighting::TokenClass;

/// An RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

/// Parse any CSS colour string into an [`Rgb`], dropping alpha.
pub fn parse_color(input: &str) -> Result<Rgb, String> {
    let css_color: CssColor = input
        .parse()
        .map_err(|e| format!("Invalid color '{}': {}", input, e))?;
    let [r, g, b, _a] = css_color.to_rgba8();
    Ok(Rgb(r, g, b))
}

/// Colour settings as written in the config file.
///
/// Defaults reproduce the VS Dark palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub background: String,
    pub foreground: String,
    pub gutter: String,
    pub border: String,
    pub comment: String,
    pub keyword: String,
    pub string: String,
    pub number: String,
    pub constant: String,
    pub function: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub tag: String,
    pub attribute: String,
    pub variable: String,
    pub operator: String,
    pub punctuation: String,
    pub escape: String,
    pub regex: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: "#1e1e1e".to_string(),
            foreground: "#9cdcfe".to_string(),
            gutter: "#858585".to_string(),
            border: "#3c3c3c".to_string(),
            comment: "#6a9955".to_string(),
            keyword: "#569cd6".to_string(),
            string: "#ce9178".to_string(),
            number: "#b5cea8".to_string(),
            constant: "#4fc1ff".to_string(),
            function: "#dcdcaa".to_string(),
            type_name: "#4ec9b0".to_string(),
            tag: "#569cd6".to_string(),
            attribute: "#9cdcfe".to_string(),
            variable: "#9cdcfe".to_string(),
            operator: "#d4d4d4".to_string(),
            punctuation: "#d4d4d4".to_string(),
            escape: "#d7ba7d".to_string(),
            regex: "#d16969".to_string(),
        }
    }
}

/// Resolved colours for every token class.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub background: Rgb,
    pub gutter: Rgb,
    pub border: Rgb,
    classes: [Rgb; TokenClass::ALL.len()],
}

impl Palette {
    /// Parse every colour of a theme config.
    pub fn from_config(config: &ThemeConfig) -> Result<Self, ConfigError> {
        let parse = |field: &'static str, value: &str| {
            parse_color(value).map_err(|_| ConfigError::InvalidColor {
                field,
                value: value.to_string(),
            })
        };

        let mut classes = [Rgb(0, 0, 0); TokenClass::ALL.len()];
        for class in TokenClass::ALL {
            let value = match class {
                TokenClass::Plain => &config.foreground,
                TokenClass::Comment => &config.comment,
                TokenClass::Keyword => &config.keyword,
                TokenClass::String => &config.string,
                TokenClass::Number => &config.number,
                TokenClass::Constant => &config.constant,
                TokenClass::Function => &config.function,
                TokenClass::Type => &config.type_name,
                TokenClass::Tag => &config.tag,
                TokenClass::Attribute => &config.attribute,
                TokenClass::Variable => &config.variable,
                TokenClass::Operator => &config.operator,
                TokenClass::Punctuation => &config.punctuation,
                TokenClass::Escape => &config.escape,
                TokenClass::Regex => &config.regex,
            };
            let field = match class {
                TokenClass::Plain => "foreground",
                other => other.as_str(),
            };
            classes[class as usize] = parse(field, value)?;
        }

        Ok(Self {
            background: parse("background", &config.background)?,
            gutter: parse("gutter", &config.gutter)?,
            border: parse("border", &config.border)?,
            classes,
        })
    }

    pub fn color(&self, class: TokenClass) -> Rgb {
        self.classes[class as usize]
    }

    /// Foreground-only style for a token; the widget supplies the background.
    pub fn style(&self, class: TokenClass) -> Style {
        let style = Style::new().fg(self.color(class).into());
        match class {
            TokenClass::Comment => style.add_modifier(Modifier::ITALIC),
            _ => style,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        // The bundled defaults are all valid hex literals.
        Self::from_config(&ThemeConfig::default()).unwrap_or(Self {
            background: Rgb(0x1e, 0x1e, 0x1e),
            gutter: Rgb(0x85, 0x85, 0x85),
            border: Rgb(0x3c, 0x3c, 0x3c),
            classes: [Rgb(0xd4, 0xd4, 0xd4); TokenClass::ALL.len()],
        })
    }
}
