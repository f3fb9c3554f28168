use std::fmt;

use crate::foundation::error::{LetterfxError, LetterfxResult};

pub use kurbo::Rect;

/// A CSS `<time>` literal such as `0.3s` or `250ms`.
///
/// The original literal is kept so generated CSS repeats the user's text verbatim.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CssTime {
    literal: String,
    seconds: f64,
}

impl CssTime {
    /// Parse a CSS time literal. A bare `0` is accepted.
    pub fn parse(s: &str) -> LetterfxResult<Self> {
        let literal = s.trim();
        let seconds = if literal == "0" {
            0.0
        } else if let Some(v) = literal.strip_suffix("ms") {
            parse_non_negative(v, literal)? / 1000.0
        } else if let Some(v) = literal.strip_suffix('s') {
            parse_non_negative(v, literal)?
        } else {
            return Err(LetterfxError::validation(format!(
                "'{literal}' is not a CSS time (expected e.g. '0.3s' or '300ms')"
            )));
        };
        Ok(Self {
            literal: literal.to_string(),
            seconds,
        })
    }

    /// `0s`.
    pub fn zero() -> Self {
        Self {
            literal: "0s".to_string(),
            seconds: 0.0,
        }
    }

    /// Build from a number of seconds, rendered as `<n>s`.
    pub fn from_seconds(seconds: f64) -> Self {
        Self {
            literal: format!("{seconds}s"),
            seconds,
        }
    }

    /// Duration in seconds.
    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// The literal as written.
    pub fn as_str(&self) -> &str {
        &self.literal
    }

    /// True when the duration is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.seconds == 0.0
    }
}

impl TryFrom<String> for CssTime {
    type Error = LetterfxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CssTime> for String {
    fn from(value: CssTime) -> Self {
        value.literal
    }
}

impl fmt::Display for CssTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

const LENGTH_UNITS: &[&str] = &[
    "px", "em", "rem", "%", "vh", "vw", "vmin", "vmax", "pt", "ch", "ex",
];

/// A CSS `<length>` literal such as `5px` or `1.2em`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CssLength {
    literal: String,
    value: f64,
}

impl CssLength {
    /// Parse a CSS length literal. A bare `0` is accepted.
    pub fn parse(s: &str) -> LetterfxResult<Self> {
        let literal = s.trim();
        if literal == "0" {
            return Ok(Self {
                literal: literal.to_string(),
                value: 0.0,
            });
        }
        // Longest unit first so `rem` wins over `em`.
        let mut units: Vec<&str> = LENGTH_UNITS.to_vec();
        units.sort_by_key(|u| std::cmp::Reverse(u.len()));
        for unit in units {
            if let Some(v) = literal.strip_suffix(unit) {
                let value = parse_non_negative(v, literal)?;
                return Ok(Self {
                    literal: literal.to_string(),
                    value,
                });
            }
        }
        Err(LetterfxError::validation(format!(
            "'{literal}' is not a CSS length (expected e.g. '5px' or '1.2em')"
        )))
    }

    /// Build a pixel length.
    pub fn px(value: f64) -> Self {
        Self {
            literal: format!("{value}px"),
            value,
        }
    }

    /// Numeric part of the literal.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The literal as written.
    pub fn as_str(&self) -> &str {
        &self.literal
    }
}

impl TryFrom<String> for CssLength {
    type Error = LetterfxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CssLength> for String {
    fn from(value: CssLength) -> Self {
        value.literal
    }
}

impl fmt::Display for CssLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

/// A `#RRGGBBAA` colour (the colour pickers emit 8 digits; `#RRGGBB` is tolerated).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    literal: String,
    rgba: [u8; 4],
}

impl HexColor {
    /// Parse a hex colour literal.
    pub fn parse(s: &str) -> LetterfxResult<Self> {
        let literal = s.trim();
        let bad = || LetterfxError::validation(format!("'{literal}' is not a #RRGGBBAA colour"));
        let digits = literal.strip_prefix('#').ok_or_else(bad)?;
        if !(digits.len() == 8 || digits.len() == 6)
            || !digits.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(bad());
        }
        let mut rgba = [0, 0, 0, 255];
        for (i, slot) in rgba.iter_mut().enumerate().take(digits.len() / 2) {
            *slot = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).map_err(|_| bad())?;
        }
        Ok(Self {
            literal: literal.to_string(),
            rgba,
        })
    }

    /// Build from straight RGBA channels; the literal is `#RRGGBBAA`.
    pub fn from_rgba(rgba: [u8; 4]) -> Self {
        let [r, g, b, a] = rgba;
        Self {
            literal: format!("#{r:02X}{g:02X}{b:02X}{a:02X}"),
            rgba,
        }
    }

    /// Straight (non-premultiplied) RGBA channels.
    pub fn rgba(&self) -> [u8; 4] {
        self.rgba
    }

    /// The literal as written.
    pub fn as_str(&self) -> &str {
        &self.literal
    }
}

impl TryFrom<String> for HexColor {
    type Error = LetterfxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.literal
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

/// The CSS class that joins generated styles, generated script and the user's markup.
///
/// Must match `^[a-zA-Z0-9_-]+$`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Validate and wrap an identifier.
    pub fn new(s: impl Into<String>) -> LetterfxResult<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(LetterfxError::validation("animation identifier must be non-empty"));
        }
        if let Some(bad) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(LetterfxError::validation(format!(
                "animation identifier '{s}' contains '{bad}' (allowed: a-z, A-Z, 0-9, '_', '-')"
            )));
        }
        Ok(Self(s))
    }

    /// The raw class name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Class put on every generated character span.
    pub fn child_class(&self) -> String {
        format!("{}-char", self.0)
    }

    /// Name of the per-character keyframes.
    pub fn keyframes_name(&self) -> String {
        format!("{}-keyframes", self.0)
    }

    /// Name of the keyframes used by the second layer of layered effects.
    pub fn second_keyframes_name(&self) -> String {
        format!("{}-keyframes-second", self.0)
    }

    /// Name of the pre-start hold keyframes.
    pub fn pre_delay_keyframes_name(&self) -> String {
        format!("{}-pre-delay", self.0)
    }

    /// Inline `animation` value that runs the pre-start hold for `pause`.
    ///
    /// The name is escaped exactly as the stylesheet's `@keyframes` declares it.
    pub fn pre_delay_animation(&self, pause: &CssTime) -> String {
        format!(
            "{} {}",
            escape_css_ident(&self.pre_delay_keyframes_name()),
            pause.as_str()
        )
    }
}

impl TryFrom<String> for Identifier {
    type Error = LetterfxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Serialize `ident` as a CSS identifier (CSSOM "serialize an identifier").
pub fn escape_css_ident(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    let chars: Vec<char> = ident.chars().collect();
    if chars.len() == 1 && chars[0] == '-' {
        return "\\-".to_string();
    }
    for (i, &c) in chars.iter().enumerate() {
        let leading_digit =
            c.is_ascii_digit() && (i == 0 || (i == 1 && chars[0] == '-'));
        match c {
            '\0' => out.push('\u{FFFD}'),
            '\u{1}'..='\u{1f}' | '\u{7f}' => out.push_str(&format!("\\{:x} ", c as u32)),
            _ if leading_digit => out.push_str(&format!("\\{:x} ", c as u32)),
            _ if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() => {
                out.push(c)
            }
            _ => {
                out.push('\\');
                out.push(c);
            }
        }
    }
    out
}

/// Format seconds as a CSS time literal without trailing noise (`0.05s`, `1s`).
pub fn format_seconds(seconds: f64) -> String {
    let rounded = (seconds * 1_000_000.0).round() / 1_000_000.0;
    format!("{rounded}s")
}

fn parse_non_negative(number: &str, literal: &str) -> LetterfxResult<f64> {
    // CSS numbers touch their unit: no inner whitespace, no `inf`/`NaN` words.
    if !number
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
    {
        return Err(LetterfxError::validation(format!(
            "'{literal}' is not a plain number followed by its unit"
        )));
    }
    let v: f64 = number.parse().map_err(|_| {
        LetterfxError::validation(format!("'{literal}' does not start with a number"))
    })?;
    if !v.is_finite() || v < 0.0 {
        return Err(LetterfxError::validation(format!(
            "'{literal}' must be a finite, non-negative value"
        )));
    }
    Ok(v)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
