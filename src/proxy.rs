//! View over a logical table whose definition is scattered across several
//! physical body positions (an out-of-order super-table, e.g. `[a.b]`
//! appearing, then an unrelated table, then `[a.d]`).
//!
//! Rust can't hold a `&mut Container` alongside `&mut` references into that
//! same container's body the way the original's object-reference design
//! does (see `DESIGN.md`, "`OutOfOrderTableProxy` aliasing"). Instead this
//! is a **snapshot-plus-cursor**: built from an immutable borrow of the
//! parent at lookup time (so constructing one never aliases), reads go
//! through the owned snapshot, and writes take `&mut Container` explicitly
//! and are routed to the correct fragment or the parent by key name. A
//! proxy built before a structural mutation to its bucket is stale and
//! must be re-requested.

use std::collections::HashMap;

use crate::container::{Container, Lookup};
use crate::error::{Result, TomlDocError};
use crate::item::Item;
use crate::key::Key;

pub struct OutOfOrderTableProxy {
    /// Body positions in the parent that make up this logical table.
    positions: Vec<usize>,
    /// The subset of `positions` holding `Table` fragments, in order.
    fragment_positions: Vec<usize>,
    /// child key name -> index into `fragment_positions`.
    child_owner: HashMap<String, usize>,
    /// child key name -> parent body position, for bucket entries that are
    /// not themselves tables (a key defined directly alongside the
    /// fragments rather than nested inside one).
    direct_owner: HashMap<String, usize>,
    /// Owned aggregate of every fragment's children, built once at
    /// construction, used to answer reads without re-borrowing the parent.
    snapshot: Container,
}

impl OutOfOrderTableProxy {
    pub(crate) fn build(parent: &Container, positions: Vec<usize>) -> Self {
        let mut snapshot = Container::new(true);
        let mut fragment_positions = Vec::new();
        let mut child_owner = HashMap::new();
        let mut direct_owner = HashMap::new();

        for &pos in &positions {
            let (key, item) = &parent.body[pos];
            match item {
                Item::Table(t) => {
                    let frag_idx = fragment_positions.len();
                    fragment_positions.push(pos);
                    for (child_key, child_item) in t.container.body.iter() {
                        if let Some(child_key) = child_key {
                            child_owner.insert(child_key.name().to_string(), frag_idx);
                            let _ = snapshot.append(Some(child_key.clone()), child_item.clone());
                        }
                    }
                }
                other => {
                    if let Some(key) = key {
                        direct_owner.insert(key.name().to_string(), pos);
                        let _ = snapshot.append(Some(key.clone()), other.clone());
                    }
                }
            }
        }

        OutOfOrderTableProxy {
            positions,
            fragment_positions,
            child_owner,
            direct_owner,
            snapshot,
        }
    }

    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.snapshot.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Item> {
        self.snapshot.get(key)
    }

    pub fn item(&self, key: &str) -> Result<Lookup<'_>> {
        self.snapshot.item(key)
    }

    pub fn value(&self) -> crate::container::DocValue {
        self.snapshot.value()
    }

    /// Writes `item` for `key`, routing to whichever fragment (or the
    /// parent itself) currently owns that key.
    pub fn set(&self, parent: &mut Container, key: &str, item: Item) -> Result<()> {
        if let Some(&pos) = self.direct_owner.get(key) {
            parent.replace_at(pos, item)
        } else if let Some(&frag_idx) = self.child_owner.get(key) {
            let frag_pos = self.fragment_positions[frag_idx];
            match &mut parent.body[frag_pos].1 {
                Item::Table(t) => t.container.set(key, item),
                _ => Err(TomlDocError::non_existent_key(Key::new(key))),
            }
        } else if let Some(&frag_pos) = self.fragment_positions.first() {
            match &mut parent.body[frag_pos].1 {
                Item::Table(t) => t.container.append(Some(Key::new(key)), item),
                _ => Err(TomlDocError::non_existent_key(Key::new(key))),
            }
        } else {
            parent.set(key, item)
        }
    }

    /// Removes `key`, routing to whichever fragment (or the parent itself)
    /// currently owns it.
    pub fn remove(&self, parent: &mut Container, key: &str) -> Result<()> {
        if let Some(&pos) = self.direct_owner.get(key) {
            parent.body[pos] = (None, Item::Null);
            Ok(())
        } else if let Some(&frag_idx) = self.child_owner.get(key) {
            let frag_pos = self.fragment_positions[frag_idx];
            match &mut parent.body[frag_pos].1 {
                Item::Table(t) => t.container.remove(key),
                _ => Err(TomlDocError::non_existent_key(Key::new(key))),
            }
        } else {
            Err(TomlDocError::non_existent_key(Key::new(key)))
        }
    }

    /// Number of physical fragments backing this logical table.
    pub fn fragment_count(&self) -> usize {
        self.positions.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::item::Integer;
    use crate::table::Table;

    fn parse_out_of_order_super_table() -> Container {
        // mimics: [a.b]\nx = 1\n[c]\ny = 2\n[a.d]\nz = 3\n
        let mut root = Container::new(true);

        let mut a1 = Table::new(true);
        a1.is_super_table = true;
        let mut b = Table::new(true);
        b.append("x", Item::Integer(Integer::new(1))).unwrap();
        a1.append("b", Item::Table(b)).unwrap();
        root.append(Some(Key::new("a")), Item::Table(a1)).unwrap();

        let mut c = Table::new(true);
        c.append("y", Item::Integer(Integer::new(2))).unwrap();
        root.append(Some(Key::new("c")), Item::Table(c)).unwrap();

        // second out-of-order fragment for `a`
        let mut a2 = Table::new(true);
        a2.is_super_table = true;
        let mut d = Table::new(true);
        d.append("z", Item::Integer(Integer::new(3))).unwrap();
        a2.append("d", Item::Table(d)).unwrap();
        root.append(Some(Key::new("a")), Item::Table(a2)).unwrap();

        root
    }

    #[test]
    fn s4_out_of_order_super_table_reads_through_both_fragments() {
        let root = parse_out_of_order_super_table();
        match root.item("a").unwrap() {
            Lookup::Table(proxy) => {
                assert_eq!(proxy.fragment_count(), 2);
                match proxy.item("b").unwrap() {
                    Lookup::Item(Item::Table(b)) => {
                        assert_eq!(b.container.get("x"), Some(&Item::Integer(Integer::new(1))));
                    }
                    _ => panic!("expected table 'b'"),
                }
                match proxy.item("d").unwrap() {
                    Lookup::Item(Item::Table(d)) => {
                        assert_eq!(d.container.get("z"), Some(&Item::Integer(Integer::new(3))));
                    }
                    _ => panic!("expected table 'd'"),
                }
            }
            _ => panic!("expected an out-of-order proxy"),
        }
    }
}
