//! The item taxonomy: every kind of value (and non-value trivia) that can
//! occupy a slot in a [`crate::container::Container`]'s body.
//!
//! Each scalar variant carries both its native value and its `raw` lexical
//! form, so re-serializing an untouched item reproduces the original text
//! byte-for-byte (underscores in integers, hex/octal/binary bases, trailing
//! zeros in floats, the exact offset spelling of a datetime). Arithmetic on
//! `Integer`/`Float` returns a *new* item with a freshly derived `raw`
//! rather than mutating in place — see the module docs on [`Integer`].

use std::fmt;
use std::ops::{Add, Sub};

use crate::array::Array;
use crate::error::{Result, TomlDocError};
use crate::table::{Aot, InlineTable, Table};
use crate::trivia::Trivia;

/// Stable tag identifying an [`Item`] variant, independent of its payload.
/// Exists so callers (and tests) can match on "what kind of thing is this"
/// without destructuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discriminant {
    Whitespace,
    Comment,
    Integer,
    Float,
    Bool,
    String,
    Date,
    Time,
    DateTime,
    Array,
    InlineTable,
    Table,
    Aot,
    Null,
}

/// A run of whitespace occupying its own body slot (a blank line between
/// entries, for instance).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Whitespace {
    pub raw: String,
    /// If true, auto-layout must not collapse or relocate this whitespace —
    /// it was explicitly requested by a caller or is load-bearing for a
    /// super-table merge.
    pub fixed: bool,
}

impl Whitespace {
    pub fn new(raw: impl Into<String>) -> Self {
        Whitespace { raw: raw.into(), fixed: false }
    }

    pub fn fixed(raw: impl Into<String>) -> Self {
        Whitespace { raw: raw.into(), fixed: true }
    }

    pub fn ends_with_newline(&self) -> bool {
        self.raw.ends_with('\n')
    }
}

/// A standalone comment line occupying its own body slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentItem {
    pub trivia: Trivia,
}

impl CommentItem {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let comment = if text.starts_with('#') { text } else { format!("#{}", text) };
        CommentItem {
            trivia: Trivia { comment, trail: "\n".to_string(), ..Trivia::default() },
        }
    }
}

/// An integer value. `raw` preserves sign, underscores, and base prefix
/// (`0x`/`0o`/`0b`) exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integer {
    pub value: i64,
    pub raw: String,
    pub trivia: Trivia,
}

impl Integer {
    pub fn new(value: i64) -> Self {
        Integer { value, raw: value.to_string(), trivia: Trivia::new() }
    }

    pub fn from_str(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let cleaned: String = raw.chars().filter(|c| *c != '_').collect();
        let value = parse_int(&cleaned).ok_or(TomlDocError::unsupported_coercion("integer"))?;
        Ok(Integer { value, raw, trivia: Trivia::new() })
    }
}

fn parse_int(s: &str) -> Option<i64> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()
    } else if let Some(oct) = s.strip_prefix("0o") {
        i64::from_str_radix(oct, 8).ok()
    } else if let Some(bin) = s.strip_prefix("0b") {
        i64::from_str_radix(bin, 2).ok()
    } else {
        s.parse().ok()
    }
}

impl Add for Integer {
    type Output = Integer;
    fn add(self, rhs: Integer) -> Integer {
        Integer::new(self.value + rhs.value)
    }
}

impl Sub for Integer {
    type Output = Integer;
    fn sub(self, rhs: Integer) -> Integer {
        Integer::new(self.value - rhs.value)
    }
}

/// A float value. `raw` preserves the exact written form (trailing zeros,
/// underscores, `inf`/`nan` spellings).
#[derive(Debug, Clone, PartialEq)]
pub struct Float {
    pub value: f64,
    pub raw: String,
    pub trivia: Trivia,
}

impl Float {
    pub fn new(value: f64) -> Self {
        Float { value, raw: format_float(value), trivia: Trivia::new() }
    }

    pub fn from_str(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let cleaned: String = raw.chars().filter(|c| *c != '_').collect();
        let value: f64 = cleaned.parse().map_err(|_| TomlDocError::unsupported_coercion("float"))?;
        Ok(Float { value, raw, trivia: Trivia::new() })
    }
}

fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

impl Add for Float {
    type Output = Float;
    fn add(self, rhs: Float) -> Float {
        Float::new(self.value + rhs.value)
    }
}

impl Sub for Float {
    type Output = Float;
    fn sub(self, rhs: Float) -> Float {
        Float::new(self.value - rhs.value)
    }
}

/// A boolean value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bool {
    pub value: bool,
    pub trivia: Trivia,
}

impl Bool {
    pub fn new(value: bool) -> Self {
        Bool { value, trivia: Trivia::new() }
    }
}

/// The four TOML string lexical forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrKind {
    SingleBasic,
    MultiBasic,
    SingleLiteral,
    MultiLiteral,
}

/// A string value: the decoded `value` plus its `original` escaped
/// rendering, so an untouched string round-trips its exact escapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringItem {
    pub value: String,
    pub kind: StrKind,
    original: Option<String>,
    pub trivia: Trivia,
}

impl StringItem {
    pub fn new(value: impl Into<String>) -> Self {
        StringItem {
            value: value.into(),
            kind: StrKind::SingleBasic,
            original: None,
            trivia: Trivia::new(),
        }
    }

    pub fn with_kind(value: impl Into<String>, kind: StrKind) -> Self {
        let mut s = StringItem::new(value);
        s.kind = kind;
        s
    }

    pub fn parsed(value: impl Into<String>, kind: StrKind, original: impl Into<String>) -> Self {
        StringItem {
            value: value.into(),
            kind,
            original: Some(original.into()),
            trivia: Trivia::new(),
        }
    }

    /// The quoted lexical rendering of this string.
    pub fn quoted(&self) -> String {
        if let Some(original) = &self.original {
            return original.clone();
        }
        match self.kind {
            StrKind::SingleBasic => format!("\"{}\"", escape_basic(&self.value)),
            StrKind::MultiBasic => format!("\"\"\"{}\"\"\"", self.value),
            StrKind::SingleLiteral => format!("'{}'", self.value),
            StrKind::MultiLiteral => format!("'''{}'''", self.value),
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
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

impl Add<&str> for StringItem {
    type Output = StringItem;
    fn add(self, rhs: &str) -> StringItem {
        StringItem::new(format!("{}{}", self.value, rhs))
    }
}

/// A calendar date: `year`/`month`/`day` as zero-padded decimal strings,
/// matching TOML's fixed-width lexical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Date {
    pub year: String,
    pub month: String,
    pub day: String,
}

impl Date {
    pub fn from_str(year: impl Into<String>, month: impl Into<String>, day: impl Into<String>) -> Result<Self> {
        let date = Date { year: year.into(), month: month.into(), day: day.into() };
        if date.validate() {
            Ok(date)
        } else {
            Err(TomlDocError::unsupported_coercion("date"))
        }
    }

    pub fn validate(&self) -> bool {
        if self.year.len() != 4 || self.month.len() != 2 || self.day.len() != 2 {
            return false;
        }
        self.validate_numbers()
    }

    fn validate_numbers(&self) -> bool {
        let y: usize = match self.year.parse() {
            Ok(y) => y,
            Err(_) => return false,
        };
        if y == 0 {
            return false;
        }
        let m: usize = match self.month.parse() {
            Ok(m) => m,
            Err(_) => return false,
        };
        if m < 1 || m > 12 {
            return false;
        }
        let d: usize = match self.day.parse() {
            Ok(d) => d,
            Err(_) => return false,
        };
        if d < 1 {
            return false;
        }
        let max_day = match m {
            2 => {
                let leap = (y % 4 == 0 && y % 100 != 0) || y % 400 == 0;
                if leap { 29 } else { 28 }
            }
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            _ => 30,
        };
        d <= max_day
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}

/// `+HH:MM`, `-HH:MM`, or `Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOffset {
    Zulu,
    Fixed { positive: bool, hour: u8, minute: u8 },
}

impl fmt::Display for TimeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeOffset::Zulu => write!(f, "Z"),
            TimeOffset::Fixed { positive, hour, minute } => {
                write!(f, "{}{:02}:{:02}", if *positive { '+' } else { '-' }, hour, minute)
            }
        }
    }
}

/// The time-of-day part of a `DateTime`, with optional fractional seconds
/// and timezone offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Time {
    pub hour: String,
    pub minute: String,
    pub second: String,
    pub fraction: Option<String>,
    pub offset: Option<TimeOffset>,
}

impl Time {
    pub fn from_str(
        hour: impl Into<String>,
        minute: impl Into<String>,
        second: impl Into<String>,
        fraction: Option<String>,
        offset: Option<TimeOffset>,
    ) -> Result<Self> {
        let time = Time {
            hour: hour.into(),
            minute: minute.into(),
            second: second.into(),
            fraction,
            offset,
        };
        if time.validate() {
            Ok(time)
        } else {
            Err(TomlDocError::unsupported_coercion("time"))
        }
    }

    pub fn validate(&self) -> bool {
        if self.hour.len() != 2 || self.minute.len() != 2 || self.second.len() != 2 {
            return false;
        }
        let h: u32 = match self.hour.parse() {
            Ok(h) => h,
            Err(_) => return false,
        };
        let m: u32 = match self.minute.parse() {
            Ok(m) => m,
            Err(_) => return false,
        };
        let s: u32 = match self.second.parse() {
            Ok(s) => s,
            Err(_) => return false,
        };
        h <= 23 && m <= 59 && s <= 59
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.hour, self.minute, self.second)?;
        if let Some(frac) = &self.fraction {
            write!(f, ".{}", frac)?;
        }
        if let Some(offset) = &self.offset {
            write!(f, "{}", offset)?;
        }
        Ok(())
    }
}

/// A full date-time value, with the date and time parts each optional so
/// this type also represents bare local-date and local-time values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTime {
    pub date: Option<Date>,
    pub time: Option<Time>,
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.date, &self.time) {
            (Some(date), Some(time)) => write!(f, "{}T{}", date, time),
            (Some(date), None) => write!(f, "{}", date),
            (None, Some(time)) => write!(f, "{}", time),
            (None, None) => Ok(()),
        }
    }
}

/// A tagged item wrapper: native value + `raw` lexeme + [`Trivia`], shared
/// by `Date`/`Time`/`DateTime`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateItem {
    pub value: Date,
    pub trivia: Trivia,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeItem {
    pub value: Time,
    pub trivia: Trivia,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeItem {
    pub value: DateTime,
    pub trivia: Trivia,
}

/// Everything that can occupy a slot in a container's body.
///
/// Scalar variants carry `Trivia` directly; `Array`/`Table`/`InlineTable`/
/// `Aot` carry their own internal structure which supplies formatting.
/// `Whitespace`/`Comment` are keyless entries (see
/// [`crate::container::Container::append`]); `Null` is a tombstone left by
/// [`crate::container::Container::remove`].
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Whitespace(Whitespace),
    Comment(CommentItem),
    Integer(Integer),
    Float(Float),
    Bool(Bool),
    String(StringItem),
    Date(DateItem),
    Time(TimeItem),
    DateTime(DateTimeItem),
    Array(Array),
    InlineTable(InlineTable),
    Table(Table),
    Aot(Aot),
    Null,
}

impl Item {
    pub fn discriminant(&self) -> Discriminant {
        match self {
            Item::Whitespace(_) => Discriminant::Whitespace,
            Item::Comment(_) => Discriminant::Comment,
            Item::Integer(_) => Discriminant::Integer,
            Item::Float(_) => Discriminant::Float,
            Item::Bool(_) => Discriminant::Bool,
            Item::String(_) => Discriminant::String,
            Item::Date(_) => Discriminant::Date,
            Item::Time(_) => Discriminant::Time,
            Item::DateTime(_) => Discriminant::DateTime,
            Item::Array(_) => Discriminant::Array,
            Item::InlineTable(_) => Discriminant::InlineTable,
            Item::Table(_) => Discriminant::Table,
            Item::Aot(_) => Discriminant::Aot,
            Item::Null => Discriminant::Null,
        }
    }

    pub fn is_table_like(&self) -> bool {
        matches!(self.discriminant(), Discriminant::Table | Discriminant::Aot)
    }

    pub fn is_trivia(&self) -> bool {
        matches!(self.discriminant(), Discriminant::Whitespace | Discriminant::Comment | Discriminant::Null)
    }

    pub fn trivia(&self) -> Option<&Trivia> {
        match self {
            Item::Comment(c) => Some(&c.trivia),
            Item::Integer(i) => Some(&i.trivia),
            Item::Float(f) => Some(&f.trivia),
            Item::Bool(b) => Some(&b.trivia),
            Item::String(s) => Some(&s.trivia),
            Item::Date(d) => Some(&d.trivia),
            Item::Time(t) => Some(&t.trivia),
            Item::DateTime(dt) => Some(&dt.trivia),
            _ => None,
        }
    }

    pub fn trivia_mut(&mut self) -> Option<&mut Trivia> {
        match self {
            Item::Comment(c) => Some(&mut c.trivia),
            Item::Integer(i) => Some(&mut i.trivia),
            Item::Float(f) => Some(&mut f.trivia),
            Item::Bool(b) => Some(&mut b.trivia),
            Item::String(s) => Some(&mut s.trivia),
            Item::Date(d) => Some(&mut d.trivia),
            Item::Time(t) => Some(&mut t.trivia),
            Item::DateTime(dt) => Some(&mut dt.trivia),
            _ => None,
        }
    }

    /// Full lexical rendering of this item, including its trivia.
    pub fn as_string(&self) -> String {
        match self {
            Item::Whitespace(w) => w.raw.clone(),
            Item::Comment(c) => format!("{}{}", c.trivia.indent, c.trivia.render_tail()),
            Item::Integer(i) => format!("{}{}", i.raw, i.trivia.render_tail()),
            Item::Float(f) => format!("{}{}", f.raw, f.trivia.render_tail()),
            Item::Bool(b) => format!("{}{}", if b.value { "true" } else { "false" }, b.trivia.render_tail()),
            Item::String(s) => format!("{}{}", s.quoted(), s.trivia.render_tail()),
            Item::Date(d) => format!("{}{}", d.value, d.trivia.render_tail()),
            Item::Time(t) => format!("{}{}", t.value, t.trivia.render_tail()),
            Item::DateTime(dt) => format!("{}{}", dt.value, dt.trivia.render_tail()),
            Item::Array(a) => a.as_string(),
            Item::InlineTable(t) => t.as_string(),
            Item::Table(t) => t.as_string_body(),
            Item::Aot(a) => a.as_string_body(),
            Item::Null => String::new(),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn integer_round_trip_preserves_raw() {
        let i = Integer::from_str("1_000").unwrap();
        assert_eq!(i.value, 1000);
        assert_eq!(i.raw, "1_000");
    }

    #[test]
    fn integer_arithmetic_derives_new_raw() {
        let sum = Integer::new(2) + Integer::new(3);
        assert_eq!(sum.value, 5);
        assert_eq!(sum.raw, "5");
    }

    #[test]
    fn date_validate_rejects_feb_30() {
        assert!(Date::from_str("2023", "02", "30").is_err());
        assert!(Date::from_str("2024", "02", "29").is_ok());
        assert!(Date::from_str("2023", "02", "29").is_err());
    }

    #[test]
    fn string_quoting_escapes_basic() {
        let s = StringItem::new("a\"b");
        assert_eq!(s.quoted(), "\"a\\\"b\"");
    }
}
