//! Per-item formatting metadata.

/// Formatting that surrounds a value in the document but carries no
/// semantic weight: the whitespace before it, an optional trailing comment,
/// and the newline(s) that terminate its line.
///
/// `Whitespace` and `Comment` items don't carry a `Trivia` of their own —
/// their text *is* the trivia.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trivia {
    /// Whitespace prefix before the item on its line.
    pub indent: String,
    /// Whitespace between the value and a trailing `#comment`, if any.
    pub comment_ws: String,
    /// Literal comment text, including the leading `#`. Empty if there is
    /// no comment.
    pub comment: String,
    /// Newline(s) terminating the item's line(s).
    pub trail: String,
}

impl Trivia {
    /// A `Trivia` with no indent/comment and a single trailing newline,
    /// the default for items appended programmatically.
    pub fn new() -> Self {
        Trivia {
            indent: String::new(),
            comment_ws: String::new(),
            comment: String::new(),
            trail: "\n".to_string(),
        }
    }

    /// A `Trivia` with nothing at all, not even a trailing newline — used
    /// for array elements and inline-table entries, which terminate with a
    /// comma or brace rather than a line.
    pub fn bare() -> Self {
        Trivia::default()
    }

    pub fn has_comment(&self) -> bool {
        !self.comment.is_empty()
    }

    /// Renders `indent + comment_ws + comment + trail`, the common suffix
    /// shared by every scalar item's `as_string`.
    pub fn render_tail(&self) -> String {
        let mut out = String::with_capacity(
            self.comment_ws.len() + self.comment.len() + self.trail.len(),
        );
        out.push_str(&self.comment_ws);
        out.push_str(&self.comment);
        out.push_str(&self.trail);
        out
    }
}
