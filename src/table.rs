//! `Table`, `InlineTable`, and `Aot` (array of tables): the three item
//! kinds that wrap a nested [`Container`].

use crate::container::Container;
use crate::error::Result;
use crate::item::Item;
use crate::key::Key;

/// A `[header]` table. Wraps its own [`Container`] holding the table's
/// children.
///
/// A table is a **super-table** when it exists only to namespace deeper
/// dotted children (e.g. `[a]` was never written, but `[a.b]` was) — its
/// header is elided on render unless it has a visible non-table child of
/// its own (see [`Container::render_table`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub container: Box<Container>,
    /// True when this table is one element of an `[[array]]` of tables.
    pub is_aot_element: bool,
    pub is_super_table: bool,
    /// The key this table was defined under, absent a dotted prefix.
    pub name: Option<String>,
    /// Cached fully-dotted header text, invalidated whenever an ancestor's
    /// key changes.
    pub display_name: Option<String>,
}

impl Table {
    pub fn new(parsed: bool) -> Self {
        Table {
            container: Box::new(Container::new(parsed)),
            is_aot_element: false,
            is_super_table: false,
            name: None,
            display_name: None,
        }
    }

    pub fn named(name: impl Into<String>, parsed: bool) -> Self {
        let mut t = Table::new(parsed);
        t.name = Some(name.into());
        t
    }

    pub fn append(&mut self, key: impl Into<Key>, item: Item) -> Result<()> {
        self.container.append(Some(key.into()), item)
    }

    /// If this table's own indent has trailing spaces, prepends those
    /// spaces to every child's indent so nested tables render with a
    /// consistent offset from their parent.
    pub fn indent(&mut self, prefix: &str) {
        for (_, item) in self.container.body.iter_mut() {
            if let Some(trivia) = item.trivia_mut() {
                trivia.indent = format!("{}{}", prefix, trivia.indent);
            }
        }
    }

    /// Clears the cached display name across this table and all nested
    /// tables, forcing a recompute of the dotted header next render.
    pub fn invalidate_display_name(&mut self) {
        self.display_name = None;
        for (_, item) in self.container.body.iter_mut() {
            if let Item::Table(t) = item {
                t.invalidate_display_name();
            }
            if let Item::Aot(a) = item {
                for t in a.tables.iter_mut() {
                    t.invalidate_display_name();
                }
            }
        }
    }

    /// The table's children rendered without a `[header]` line — used when
    /// a parent renderer has already decided whether/how to print the
    /// header.
    pub fn as_string_body(&self) -> String {
        self.container.as_string()
    }
}

/// An array of tables: `[[name]]` repeated once per element.
#[derive(Debug, Clone, PartialEq)]
pub struct Aot {
    pub tables: Vec<Table>,
    pub name: Option<String>,
}

impl Aot {
    pub fn new() -> Self {
        Aot { tables: Vec::new(), name: None }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Aot { tables: Vec::new(), name: Some(name.into()) }
    }

    pub fn push(&mut self, mut table: Table) {
        table.is_aot_element = true;
        table.invalidate_display_name();
        self.tables.push(table);
    }

    /// Inserts `table` at `index`; if the document is not in raw-parser
    /// mode, a blank line is inherited from the previous element so
    /// adjacent `[[name]]` blocks stay visually separated.
    pub fn insert(&mut self, index: usize, mut table: Table, parsed: bool) {
        table.is_aot_element = true;
        table.invalidate_display_name();
        if !parsed && !self.tables.is_empty() {
            if let Some((_, first_item)) = table.container.body.first_mut() {
                if let Some(trivia) = first_item.trivia_mut() {
                    if trivia.indent.is_empty() {
                        trivia.indent = "\n".to_string();
                    }
                }
            }
        }
        self.tables.insert(index.min(self.tables.len()), table);
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Table> {
        self.tables.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Table> {
        self.tables.get_mut(index)
    }

    /// An array of tables has no single-element index assignment: replacing
    /// one `[[name]]` element in place would need to re-derive its blank-line
    /// separation from its new neighbors, which the document model doesn't
    /// track per-element. Use `push`/`insert` instead.
    pub fn set(&mut self, _index: usize, _table: Table) -> Result<()> {
        Err(crate::error::TomlDocError::unsupported_aot_assignment())
    }

    /// Renders every element as its own `[[name]]` block, in order.
    pub fn as_string_body(&self) -> String {
        let name = self.name.as_deref().unwrap_or("");
        let mut out = String::new();
        for table in &self.tables {
            let header = table.display_name.clone().unwrap_or_else(|| name.to_string());
            out.push_str(&format!("[[{}]]\n", header));
            out.push_str(&table.as_string_body());
        }
        out
    }
}

impl Default for Aot {
    fn default() -> Self {
        Aot::new()
    }
}

/// `{ key = value, ... }`. Always renders on one line; unlike `Table`, a
/// freshly appended comment is dropped rather than rendered, and the
/// trailing-comma policy differs between parser-built (`new = false`) and
/// caller-built (`new = true`) inline tables.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineTable {
    pub container: Box<Container>,
    pub new: bool,
}

impl InlineTable {
    pub fn new() -> Self {
        InlineTable { container: Box::new(Container::new(false)), new: true }
    }

    pub fn parsed() -> Self {
        InlineTable { container: Box::new(Container::new(true)), new: false }
    }

    pub fn append(&mut self, key: impl Into<Key>, mut item: Item) -> Result<()> {
        // inline tables never carry their children's comments
        if let Some(trivia) = item.trivia_mut() {
            trivia.comment.clear();
            trivia.comment_ws.clear();
            trivia.trail.clear();
        }
        self.container.append(Some(key.into()), item)
    }

    pub fn as_string(&self) -> String {
        let entries: Vec<String> = self
            .container
            .body
            .iter()
            .filter(|(k, _)| k.is_some())
            .map(|(k, v)| {
                let key = k.as_ref().unwrap();
                format!("{}{}{}", key.as_string(), key.sep, v.as_string().trim_end_matches('\n'))
            })
            .collect();
        let sep = if self.new { ", " } else { "," };
        format!("{{{}}}", entries.join(sep))
    }
}

impl Default for InlineTable {
    fn default() -> Self {
        InlineTable::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::TomlDocError;

    #[test]
    fn aot_index_assignment_is_rejected() {
        let mut aot = Aot::named("x");
        aot.push(Table::new(false));
        let err = aot.set(0, Table::new(false)).unwrap_err();
        assert_eq!(err, TomlDocError::UnsupportedAotAssignment);
    }
}
