//! A style-preserving TOML document model.
//!
//! `tomldoc` represents a parsed TOML document as an ordered [`Container`]
//! body of keyed items, so the document can be read either as a plain
//! nested map or as the exact sequence of comments, blank lines, and table
//! fragments that made up the original text — and mutated through either
//! view without losing the other's formatting. The code began life as
//! [`tomllib`](https://github.com/joelself/tomllib) and grew a document
//! model in place of its original parser; see `DESIGN.md` in the
//! repository for the grounding behind each module.
//!
//! The lexer/parser that turns TOML text into a [`Container`] is out of
//! scope for this crate: callers build containers by appending [`Item`]s
//! (directly, or via [`coerce::item`] for plain Rust values), and read them
//! back out with [`Container::item`], [`Container::get`], and
//! [`Container::value`].
//!
//! # Examples
//!
//! ```
//! use tomldoc::container::Container;
//! use tomldoc::item::{Integer, Item};
//! use tomldoc::key::Key;
//!
//! let mut doc = Container::new(false);
//! doc.append(Some(Key::new("answer")), Item::Integer(Integer::new(42))).unwrap();
//! assert_eq!(doc.as_string(), "answer = 42\n");
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::too_many_lines)]

pub mod array;
pub mod coerce;
pub mod container;
pub mod error;
pub mod item;
pub mod key;
pub mod proxy;
pub mod table;
pub mod trivia;

pub use crate::container::Container;
pub use crate::error::TomlDocError;
pub use crate::item::Item;
pub use crate::key::Key;
