//! Style-preserving arrays.
//!
//! An `Array`'s internal `value` interleaves element items with `Whitespace`
//! and `Comment` items exactly as written; a separate `index_map` maps
//! public element indices (skipping trivia) to physical positions, so
//! `array.get(1)` means "the second *value*", not "the second slot".

use crate::error::{Result, TomlDocError};
use crate::item::{CommentItem, Item, Whitespace};

#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    value: Vec<Item>,
    index_map: Vec<usize>,
    /// Whether the array renders with a newline before its closing `]`
    /// (used by parser-built multi-line arrays).
    pub multiline: bool,
}

impl Array {
    pub fn new() -> Self {
        Array { value: Vec::new(), index_map: Vec::new(), multiline: false }
    }

    fn reindex(&mut self) {
        self.index_map = self
            .value
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.is_trivia())
            .map(|(i, _)| i)
            .collect();
    }

    pub fn len(&self) -> usize {
        self.index_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index_map.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.index_map.get(index).map(|&pos| &self.value[pos])
    }

    pub fn set(&mut self, index: usize, mut item: Item) -> Result<()> {
        let pos = *self
            .index_map
            .get(index)
            .ok_or_else(TomlDocError::slice_assign_not_supported)?;
        strip_line_trivia(&mut item);
        self.value[pos] = item;
        Ok(())
    }

    /// Inserts `item` as the new element at public index `index`, choosing a
    /// separator style that matches the array's existing whitespace: if the
    /// array is multi-line (its prior separator contains `\n`), a four-space
    /// indent is used, otherwise a single space after the comma.
    pub fn insert(&mut self, index: usize, mut item: Item) {
        strip_line_trivia(&mut item);
        if self.index_map.is_empty() {
            self.value.push(item);
            self.reindex();
            return;
        }
        let multiline_sep = self.separator_style_is_multiline();
        let sep = if multiline_sep { ",\n    " } else { ", " };
        if index >= self.index_map.len() {
            let last_pos = *self.index_map.last().unwrap();
            self.value.insert(last_pos + 1, Item::Whitespace(Whitespace::new(sep)));
            self.value.insert(last_pos + 2, item);
        } else {
            let pos = self.index_map[index];
            self.value.insert(pos, Item::Whitespace(Whitespace::new(sep)));
            self.value.insert(pos, item);
        }
        self.reindex();
    }

    fn separator_style_is_multiline(&self) -> bool {
        self.value
            .iter()
            .any(|item| matches!(item, Item::Whitespace(w) if w.raw.contains('\n')))
    }

    /// Removes the element at public index `index`, along with any trailing
    /// whitespace up to (but not including) the next value or the closing
    /// bracket.
    pub fn delete(&mut self, index: usize) -> Result<Item> {
        let pos = *self
            .index_map
            .get(index)
            .ok_or_else(TomlDocError::slice_assign_not_supported)?;
        let removed = self.value.remove(pos);
        while pos < self.value.len() && self.value[pos].is_trivia() {
            self.value.remove(pos);
        }
        // also drop a now-orphaned leading separator directly before `pos`
        if pos > 0 && pos - 1 < self.value.len() {
            if let Item::Whitespace(w) = &self.value[pos - 1] {
                if w.raw.trim_start_matches(|c: char| c == ',' || c.is_whitespace()).is_empty() {
                    self.value.remove(pos - 1);
                }
            }
        }
        self.reindex();
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.index_map.clear();
    }

    /// Appends `item` as a new line within a multi-line array: an optional
    /// leading indent, the item, an optional trailing comma, an optional
    /// comment, and a trailing newline. Rejects `Comment`/`Whitespace`
    /// values — those aren't array *elements*.
    pub fn add_line(
        &mut self,
        indent: &str,
        mut item: Item,
        add_comma: bool,
        comment: Option<&str>,
    ) -> Result<()> {
        if item.is_trivia() {
            return Err(TomlDocError::unkeyed_item());
        }
        strip_line_trivia(&mut item);
        if !indent.is_empty() {
            self.value.push(Item::Whitespace(Whitespace::new(indent)));
        }
        self.value.push(item);
        if add_comma {
            self.value.push(Item::Whitespace(Whitespace::new(",")));
        }
        if let Some(text) = comment {
            self.value.push(Item::Comment(CommentItem::new(text)));
        }
        self.value.push(Item::Whitespace(Whitespace::new("\n")));
        self.multiline = true;
        self.reindex();
        Ok(())
    }

    pub fn values(&self) -> impl Iterator<Item = &Item> {
        self.index_map.iter().map(move |&pos| &self.value[pos])
    }

    pub fn as_string(&self) -> String {
        let mut out = String::from("[");
        for item in &self.value {
            out.push_str(&item.as_string());
        }
        out.push(']');
        out
    }
}

impl Default for Array {
    fn default() -> Self {
        Array::new()
    }
}

/// Array elements manage their separators and line breaks through explicit
/// `Whitespace`/`Comment` slots rather than their own trivia, so any trail or
/// comment a value happened to carry (e.g. from `Integer::new`'s line-item
/// default) would otherwise render as a stray extra newline or comment.
fn strip_line_trivia(item: &mut Item) {
    if let Some(trivia) = item.trivia_mut() {
        trivia.comment.clear();
        trivia.comment_ws.clear();
        trivia.trail.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::item::Integer;

    fn int(n: i64) -> Item {
        let mut item = Item::Integer(Integer::new(n));
        strip_line_trivia(&mut item);
        item
    }

    #[test]
    fn insert_preserves_single_line_style() {
        let mut arr = Array::new();
        arr.value.push(int(1));
        arr.value.push(Item::Whitespace(Whitespace::new(", ")));
        arr.value.push(int(2));
        arr.value.push(Item::Whitespace(Whitespace::new(", ")));
        arr.value.push(int(3));
        arr.reindex();

        arr.insert(1, int(99));
        assert_eq!(arr.as_string(), "[1, 99, 2, 3]");
        assert_eq!(arr.len(), 4);
        assert_eq!(arr.get(1), Some(&int(99)));
    }

    #[test]
    fn delete_removes_value_and_trailing_whitespace() {
        let mut arr = Array::new();
        arr.value.push(int(1));
        arr.value.push(Item::Whitespace(Whitespace::new(", ")));
        arr.value.push(int(2));
        arr.reindex();

        arr.delete(0).unwrap();
        assert_eq!(arr.len(), 1);
        assert_eq!(arr.get(0), Some(&int(2)));
    }

    #[test]
    fn clear_empties_everything() {
        let mut arr = Array::new();
        arr.value.push(int(1));
        arr.reindex();
        arr.clear();
        assert_eq!(arr.len(), 0);
        assert_eq!(arr.as_string(), "[]");
    }
}
