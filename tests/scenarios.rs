//! Integration tests exercising the testable scenarios from the design
//! document end to end, through the public API only.

mod common;

use tomldoc::array::Array;
use tomldoc::coerce::{inline_table_from_entries, item, table_from_entries};
use tomldoc::container::{Container, Lookup};
use tomldoc::item::{Integer, Item, StringItem};
use tomldoc::key::Key;
use tomldoc::table::{Aot, Table};

#[test]
fn s1_dotted_keys_build_and_render_a_super_table() {
    let mut doc = Container::new(false);
    doc.append_dotted(&["owner", "name"], item("tom")).unwrap();
    doc.append_dotted(&["owner", "dob"], item(1979)).unwrap();

    assert_eq!(doc.as_string(), "owner.name = \"tom\"\nowner.dob = 1979\n");

    match doc.item("owner").unwrap() {
        Lookup::Item(Item::Table(t)) => {
            assert_eq!(t.container.get("name"), Some(&item("tom")));
        }
        _ => panic!("expected a plain table, not a scattered fragment"),
    }
}

#[test]
fn s2_second_table_definition_promotes_to_array_of_tables() {
    let mut doc = Container::new(true);

    let mut first = Table::new(true);
    first.append("name", item("apple")).unwrap();
    doc.append(Some(Key::new("fruit")), Item::Table(first)).unwrap();

    assert!(matches!(doc.item("fruit").unwrap(), Lookup::Item(Item::Table(_))));

    let mut second = Table::new(true);
    second.is_aot_element = true;
    second.append("name", item("banana")).unwrap();
    doc.append(Some(Key::new("fruit")), Item::Table(second)).unwrap();

    match doc.item("fruit").unwrap() {
        Lookup::Item(Item::Aot(a)) => {
            assert_eq!(a.len(), 2);
            assert_eq!(a.get(0).unwrap().container.get("name"), Some(&item("apple")));
            assert_eq!(a.get(1).unwrap().container.get("name"), Some(&item("banana")));
        }
        _ => panic!("expected the second definition to promote 'fruit' to an array of tables"),
    }

    let rendered = doc.as_string();
    assert_eq!(rendered.matches("[[fruit]]").count(), 2);
}

#[test]
fn s2_array_of_tables_built_directly_renders_each_element() {
    let mut aot = Aot::named("servers");
    let mut alpha = Table::new(false);
    alpha.append("ip", item("10.0.0.1")).unwrap();
    aot.push(alpha);
    let mut beta = Table::new(false);
    beta.append("ip", item("10.0.0.2")).unwrap();
    aot.push(beta);

    let mut doc = Container::new(false);
    doc.append(Some(Key::new("servers")), Item::Aot(aot)).unwrap();

    let rendered = doc.as_string();
    assert_eq!(rendered.matches("[[servers]]").count(), 2);
    assert!(rendered.contains("ip = \"10.0.0.1\""));
    assert!(rendered.contains("ip = \"10.0.0.2\""));
}

#[test]
fn s7_array_insert_preserves_existing_single_line_style() {
    let mut arr = Array::new();
    arr.insert(0, item(1));
    arr.insert(1, item(2));
    assert_eq!(arr.as_string(), "[1, 2]");

    arr.insert(1, item(99));
    assert_eq!(arr.as_string(), "[1, 99, 2]");
    assert_eq!(arr.len(), 3);
}

#[test]
fn s7_array_add_line_switches_to_multiline_rendering() {
    let mut arr = Array::new();
    arr.add_line("    ", item(1), true, None).unwrap();
    arr.add_line("    ", item(2), true, Some(" trailing")).unwrap();
    assert!(arr.multiline);
    assert_eq!(arr.as_string(), "[    1,\n    2,# trailing\n\n]");
    assert_eq!(arr.len(), 2);
}

#[test]
fn s8_inline_table_comma_policy_differs_for_new_vs_parsed() {
    let built = inline_table_from_entries(vec![
        ("a".to_string(), item(1)),
        ("b".to_string(), item(2)),
    ])
    .unwrap();
    assert_eq!(built.as_string(), "{a = 1, b = 2}");

    let mut parsed = tomldoc::table::InlineTable::parsed();
    parsed.append("a", item(1)).unwrap();
    parsed.append("b", item(2)).unwrap();
    assert_eq!(parsed.as_string(), "{a = 1,b = 2}");
}

#[test]
fn s9_table_from_entries_orders_scalars_before_nested_tables() {
    let inner = table_from_entries(vec![("city".to_string(), item("nowhere"))]).unwrap();
    let table = table_from_entries(vec![
        ("address".to_string(), inner),
        ("name".to_string(), item("tom")),
        ("age".to_string(), item(30)),
    ])
    .unwrap();

    if let Item::Table(t) = table {
        let keys: Vec<&str> = t.container.keys().collect();
        assert_eq!(keys, vec!["name", "age", "address"]);
    } else {
        panic!("expected a table");
    }
}

#[test]
fn key_already_present_error_carries_the_offending_key() {
    let mut doc = Container::new(false);
    doc.append(Some(Key::new("x")), item(1)).unwrap();
    let err = doc.append(Some(Key::new("x")), item(2)).unwrap_err();
    assert_eq!(err, tomldoc::TomlDocError::KeyAlreadyPresent(Key::new("x")));
}

#[test]
fn replace_scalar_value_keeps_its_position() {
    let mut doc = Container::new(true);
    doc.append(Some(Key::new("a")), item(1)).unwrap();
    doc.append(Some(Key::new("b")), item(2)).unwrap();
    doc.replace("a", Item::Integer(Integer::new(42))).unwrap();
    assert_eq!(doc.as_string(), "a = 42\nb = 2\n");
}

#[test]
fn redefining_a_super_table_as_a_plain_table_is_rejected() {
    let mut doc = Container::new(false);
    doc.append_dotted(&["owner", "name"], item("tom")).unwrap();

    let mut redefined = Table::new(false);
    redefined.append("name", item("again")).unwrap();
    let err = doc.append(Some(Key::new("owner")), Item::Table(redefined)).unwrap_err();
    assert_eq!(err, tomldoc::TomlDocError::Redefinition(Key::new("owner")));
}

#[test]
fn replacing_an_array_of_tables_by_key_is_rejected() {
    let mut aot = Aot::named("fruit");
    let mut first = Table::new(false);
    first.append("name", item("apple")).unwrap();
    aot.push(first);

    let mut doc = Container::new(false);
    doc.append(Some(Key::new("fruit")), Item::Aot(aot)).unwrap();

    let mut replacement = Table::new(false);
    replacement.append("name", item("pear")).unwrap();
    let err = doc.replace("fruit", Item::Table(replacement)).unwrap_err();
    assert_eq!(err, tomldoc::TomlDocError::UnsupportedAotAssignment);
}

#[test]
fn string_item_round_trips_through_container() {
    let mut doc = Container::new(false);
    doc.append(Some(Key::new("greeting")), Item::String(StringItem::new("hello"))).unwrap();
    assert_eq!(doc.get("greeting"), Some(&Item::String(StringItem::new("hello"))));
    assert_eq!(doc.as_string(), "greeting = \"hello\"\n");
}
