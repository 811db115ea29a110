//! Key identity and lexical rendering.

use std::fmt;
use std::hash::{Hash, Hasher};

/// How a key's lexical form is quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// An unquoted key matching `[A-Za-z0-9_-]+`.
    Bare,
    /// A `"double quoted"` key, escapes processed.
    Basic,
    /// A `'single quoted'` key, no escape processing.
    Literal,
}

fn is_bare(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// A TOML key: a logical name plus the lexical details needed to reproduce
/// its original rendering.
///
/// Equality and hashing use `name` only — two `Key`s naming the same
/// identifier are the same key for map-view purposes, whatever quoting they
/// happen to carry.
#[derive(Debug, Clone)]
pub struct Key {
    name: String,
    kind: KeyKind,
    /// Separator text between the key and its value, e.g. `" = "`.
    pub sep: String,
    /// True if this key is one segment of a `a.b.c` dotted definition.
    pub dotted: bool,
    /// The exact original rendering (including quotes), if this key came
    /// from parsed text rather than being constructed programmatically.
    original: Option<String>,
}

impl Key {
    /// A new bare-or-quoted key with the default `" = "` separator,
    /// auto-detecting whether `name` can be rendered bare.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = if is_bare(&name) {
            KeyKind::Bare
        } else {
            KeyKind::Basic
        };
        Key {
            name,
            kind,
            sep: " = ".to_string(),
            dotted: false,
            original: None,
        }
    }

    pub fn with_kind(name: impl Into<String>, kind: KeyKind) -> Self {
        let mut key = Key::new(name);
        key.kind = kind;
        key
    }

    /// Construct a key carrying its exact original lexical rendering, as
    /// produced by a parser.
    pub fn parsed(name: impl Into<String>, kind: KeyKind, sep: impl Into<String>, original: impl Into<String>) -> Self {
        Key {
            name: name.into(),
            kind,
            sep: sep.into(),
            dotted: false,
            original: Some(original.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    pub fn dotted(mut self, dotted: bool) -> Self {
        self.dotted = dotted;
        self
    }

    /// The key's lexical rendering: the original text if parsed, otherwise
    /// a freshly quoted/escaped form derived from `name` and `kind`.
    pub fn as_string(&self) -> String {
        if let Some(original) = &self.original {
            return original.clone();
        }
        match self.kind {
            KeyKind::Bare => self.name.clone(),
            KeyKind::Basic => format!("\"{}\"", escape_basic(&self.name)),
            KeyKind::Literal => format!("'{}'", self.name),
        }
    }
}

fn escape_basic(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::new(name)
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::new(name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bare_detection() {
        let k = Key::new("foo_bar-1");
        assert_eq!(k.kind(), KeyKind::Bare);
        assert_eq!(k.as_string(), "foo_bar-1");
    }

    #[test]
    fn quoting_for_non_bare() {
        let k = Key::new("has space");
        assert_eq!(k.kind(), KeyKind::Basic);
        assert_eq!(k.as_string(), "\"has space\"");
    }

    #[test]
    fn equality_ignores_quoting() {
        let a = Key::new("x");
        let b = Key::with_kind("x", KeyKind::Literal);
        assert_eq!(a, b);
    }

    #[test]
    fn parsed_key_preserves_original_rendering() {
        let k = Key::parsed("x y", KeyKind::Basic, " =  ", "\"x y\"");
        assert_eq!(k.as_string(), "\"x y\"");
        assert_eq!(k.sep, " =  ");
    }
}
