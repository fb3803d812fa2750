//! Text editing helpers for the number box surface
//!
//! Positions are character indices, as a host text widget reports them. The
//! helpers never touch the box itself: they compute the text an edit *would*
//! produce so the value strategy can vet it before anything changes.

// =============================================================================
// Selection
// =============================================================================

/// Caret position plus selected run, in characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub length: usize,
}

impl Selection {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// A collapsed selection (just a caret).
    pub fn caret(position: usize) -> Self {
        Self::new(position, 0)
    }

    /// Select the whole of a text `len` characters long.
    pub fn all(len: usize) -> Self {
        Self::new(0, len)
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Fit the selection inside a text `len` characters long.
    pub fn clamp(self, len: usize) -> Self {
        let start = self.start.min(len);
        let length = self.length.min(len - start);
        Self { start, length }
    }
}

// =============================================================================
// Edits
// =============================================================================

/// A candidate surface: the resulting text and where the caret lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub text: String,
    pub caret: usize,
}

/// Number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of the character at `index`, or the end of `text`.
fn byte_index(text: &str, index: usize) -> usize {
    text.char_indices()
        .nth(index)
        .map_or(text.len(), |(offset, _)| offset)
}

/// Remove `selection` from `text`.
fn remove_range(text: &str, selection: Selection) -> String {
    let start = byte_index(text, selection.start);
    let end = byte_index(text, selection.end());
    let mut result = String::with_capacity(text.len());
    result.push_str(&text[..start]);
    result.push_str(&text[end..]);
    result
}

/// Replace the selection with `insert`; the caret lands after the insertion.
pub fn replace_selection(text: &str, selection: Selection, insert: &str) -> Edit {
    let selection = selection.clamp(char_len(text));
    let mut result = remove_range(text, selection);
    result.insert_str(byte_index(&result, selection.start), insert);
    Edit {
        text: result,
        caret: selection.start + char_len(insert),
    }
}

/// Backspace: remove the selection, or the character before the caret.
///
/// Returns `None` when there is nothing to remove.
pub fn delete_backward(text: &str, selection: Selection) -> Option<Edit> {
    let selection = selection.clamp(char_len(text));
    if !selection.is_empty() {
        Some(Edit {
            text: remove_range(text, selection),
            caret: selection.start,
        })
    } else if selection.start > 0 {
        let caret = selection.start - 1;
        Some(Edit {
            text: remove_range(text, Selection::new(caret, 1)),
            caret,
        })
    } else {
        None
    }
}

/// Delete: remove the selection, or the character after the caret.
///
/// Returns `None` when there is nothing to remove.
pub fn delete_forward(text: &str, selection: Selection) -> Option<Edit> {
    let len = char_len(text);
    let selection = selection.clamp(len);
    if !selection.is_empty() {
        Some(Edit {
            text: remove_range(text, selection),
            caret: selection.start,
        })
    } else if selection.start < len {
        Some(Edit {
            text: remove_range(text, Selection::new(selection.start, 1)),
            caret: selection.start,
        })
    } else {
        None
    }
}

// =============================================================================
// Caret Navigation
// =============================================================================

/// Left arrow: collapse a selection to its start, or move one character back.
pub fn move_left(selection: Selection) -> Selection {
    if selection.is_empty() {
        Selection::caret(selection.start.saturating_sub(1))
    } else {
        Selection::caret(selection.start)
    }
}

/// Right arrow: collapse a selection to its end, or move one character on.
pub fn move_right(selection: Selection, len: usize) -> Selection {
    if selection.is_empty() {
        Selection::caret((selection.start + 1).min(len))
    } else {
        Selection::caret(selection.end().min(len))
    }
}
