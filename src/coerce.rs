//! Promotes plain host values to [`Item`]s with default [`Trivia`].
//!
//! Mirrors `atoml.items.item()`: booleans, integers, floats, and strings map
//! directly; mappings become `Table`s (or `InlineTable`s when coercing a
//! value that will live inside an `Array`) with every scalar-valued key
//! ordered before any mapping-valued key (S9); sequences become an `Aot` if
//! every element is itself a mapping, otherwise a plain `Array`.

use crate::array::Array;
use crate::error::{Result, TomlDocError};
use crate::item::{
    Bool, Date, DateItem, DateTime, DateTimeItem, Float, Integer, Item, StringItem, Time, TimeItem, TimeOffset,
};
use crate::key::Key;
use crate::table::{InlineTable, Table};
use crate::trivia::Trivia;

/// A host value that can be coerced into a TOML [`Item`]. Implemented for
/// the primitive types directly; composite coercion (maps, sequences of
/// maps) goes through [`table_from_entries`] / [`array_from_values`] since
/// Rust has no single dynamically-typed "value" to dispatch on the way the
/// original's `item()` does.
pub trait IntoItem {
    fn into_item(self) -> Item;
}

macro_rules! impl_into_item_int {
    ($($t:ty),*) => {
        $(impl IntoItem for $t {
            fn into_item(self) -> Item {
                Item::Integer(Integer::new(self as i64))
            }
        })*
    };
}
impl_into_item_int!(i8, i16, i32, i64, isize, u8, u16, u32);

impl IntoItem for f64 {
    fn into_item(self) -> Item {
        Item::Float(Float::new(self))
    }
}

impl IntoItem for bool {
    fn into_item(self) -> Item {
        Item::Bool(Bool::new(self))
    }
}

impl IntoItem for &str {
    fn into_item(self) -> Item {
        Item::String(StringItem::new(self))
    }
}

impl IntoItem for String {
    fn into_item(self) -> Item {
        Item::String(StringItem::new(self))
    }
}

impl IntoItem for Item {
    fn into_item(self) -> Item {
        self
    }
}

impl IntoItem for Date {
    fn into_item(self) -> Item {
        Item::Date(DateItem { value: self, trivia: Trivia::new() })
    }
}

impl IntoItem for Time {
    fn into_item(self) -> Item {
        Item::Time(TimeItem { value: normalize_utc_offset(self), trivia: Trivia::new() })
    }
}

impl IntoItem for DateTime {
    fn into_item(self) -> Item {
        let time = self.time.map(normalize_utc_offset);
        Item::DateTime(DateTimeItem { value: DateTime { date: self.date, time }, trivia: Trivia::new() })
    }
}

/// A `+00:00` offset is UTC; TOML's ISO 8601 grammar lets it be written as
/// either `+00:00` or `Z`, and the original collapses it to `Z` on coercion.
fn normalize_utc_offset(mut time: Time) -> Time {
    if let Some(TimeOffset::Fixed { positive: true, hour: 0, minute: 0 }) = time.offset {
        time.offset = Some(TimeOffset::Zulu);
    }
    time
}

pub fn item(value: impl IntoItem) -> Item {
    value.into_item()
}

/// Builds a `Table` from `entries`, placing every scalar-valued key before
/// any mapping-valued key regardless of input order (S9).
pub fn table_from_entries(entries: Vec<(String, Item)>) -> Result<Item> {
    let mut table = Table::new(false);
    let (scalars, tables): (Vec<_>, Vec<_>) = entries.into_iter().partition(|(_, v)| !v.is_table_like());
    for (k, v) in scalars.into_iter().chain(tables) {
        table.append(Key::new(k), v)?;
    }
    Ok(Item::Table(table))
}

/// Same ordering rule as [`table_from_entries`], but for a value that will
/// live inside an `Array` (inline tables can't contain standalone tables).
pub fn inline_table_from_entries(entries: Vec<(String, Item)>) -> Result<Item> {
    let mut table = InlineTable::new();
    let (scalars, tables): (Vec<_>, Vec<_>) = entries.into_iter().partition(|(_, v)| !v.is_table_like());
    for (k, v) in scalars.into_iter().chain(tables) {
        table.append(Key::new(k), v)?;
    }
    Ok(Item::InlineTable(table))
}

/// Builds an `Array` from already-coerced items.
pub fn array_from_values(values: Vec<Item>) -> Item {
    let mut array = Array::new();
    for v in values {
        let idx = array.len();
        array.insert(idx, v);
    }
    Item::Array(array)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn scalar_coercion() {
        assert_eq!(item(42), Item::Integer(Integer::new(42)));
        assert_eq!(item(true), Item::Bool(Bool::new(true)));
        assert_eq!(item("hi"), Item::String(StringItem::new("hi")));
    }

    #[test]
    fn date_time_datetime_coerce_with_iso_8601_raw() {
        let date = Date::from_str("1979", "05", "27").unwrap();
        match item(date) {
            Item::Date(d) => assert_eq!(d.value.to_string(), "1979-05-27"),
            _ => panic!("expected a Date item"),
        }

        let time = Time::from_str("07", "32", "00", None, None).unwrap();
        match item(time) {
            Item::Time(t) => assert_eq!(t.value.to_string(), "07:32:00"),
            _ => panic!("expected a Time item"),
        }
    }

    #[test]
    fn utc_fixed_offset_normalizes_to_zulu_on_coercion() {
        let utc = Time::from_str("00", "32", "00", None, Some(TimeOffset::Fixed { positive: true, hour: 0, minute: 0 }))
            .unwrap();
        match item(utc) {
            Item::Time(t) => assert_eq!(t.value.offset, Some(TimeOffset::Zulu)),
            _ => panic!("expected a Time item"),
        }

        let not_utc = Time::from_str("00", "32", "00", None, Some(TimeOffset::Fixed { positive: true, hour: 2, minute: 0 }))
            .unwrap();
        match item(not_utc) {
            Item::Time(t) => {
                assert_eq!(t.value.offset, Some(TimeOffset::Fixed { positive: true, hour: 2, minute: 0 }))
            }
            _ => panic!("expected a Time item"),
        }
    }

    #[test]
    fn s9_table_from_entries_orders_scalars_before_tables() {
        let nested = table_from_entries(vec![("inner".to_string(), item(1))]).unwrap();
        let entries = vec![
            ("sub".to_string(), nested),
            ("name".to_string(), item("x")),
            ("count".to_string(), item(3)),
        ];
        let table = table_from_entries(entries).unwrap();
        if let Item::Table(t) = table {
            let keys: Vec<&str> = t.container.keys().collect();
            assert_eq!(keys, vec!["name", "count", "sub"]);
        } else {
            panic!("expected a table");
        }
    }
}
