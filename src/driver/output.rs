//! Terminal layout of generated passwords.

use std::io::{self, Write};

/// Assumed terminal width.
pub const TERM_WIDTH: usize = 80;

/// Rows printed when no count is given.
const DEFAULT_ROWS: usize = 20;

/// How passwords are laid out on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Space separated, this many per row.
    Columns(usize),
    /// One password per line.
    Single,
}

impl Layout {
    /// Fits as many `length`-character columns as [`TERM_WIDTH`] allows.
    pub fn for_length(columns: bool, length: usize) -> Self {
        if columns {
            Layout::Columns((TERM_WIDTH / (length + 1)).max(1))
        } else {
            Layout::Single
        }
    }

    /// Passwords per row.
    pub fn per_row(&self) -> usize {
        match self {
            Layout::Columns(n) => *n,
            Layout::Single => 1,
        }
    }

    /// Batch size used when the caller gives none.
    pub fn default_count(&self) -> usize {
        match self {
            Layout::Columns(n) => n * DEFAULT_ROWS,
            Layout::Single => 1,
        }
    }
}

/// Writes passwords according to `layout`. A partial last row still ends
/// with a newline.
pub fn write_passwords<W: Write>(
    out: &mut W,
    passwords: &[String],
    layout: Layout,
) -> io::Result<()> {
    let per_row = layout.per_row();
    for (i, password) in passwords.iter().enumerate() {
        out.write_all(password.as_bytes())?;
        if i % per_row == per_row - 1 {
            out.write_all(b"\n")?;
        } else {
            out.write_all(b" ")?;
        }
    }
    if passwords.len() % per_row != 0 {
        out.write_all(b"\n")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(passwords: &[&str], layout: Layout) -> String {
        let passwords: Vec<String> = passwords.iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        write_passwords(&mut out, &passwords, layout).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_column_count() {
        assert_eq!(Layout::for_length(true, 8), Layout::Columns(8));
        assert_eq!(Layout::for_length(true, 12), Layout::Columns(6));
        assert_eq!(Layout::for_length(true, 100), Layout::Columns(1));
        assert_eq!(Layout::for_length(false, 8), Layout::Single);
    }

    #[test]
    fn test_default_count() {
        assert_eq!(Layout::Columns(8).default_count(), 160);
        assert_eq!(Layout::Single.default_count(), 1);
    }

    #[test]
    fn test_single_layout() {
        assert_eq!(render(&["ab", "cd"], Layout::Single), "ab\ncd\n");
    }

    #[test]
    fn test_full_rows() {
        assert_eq!(
            render(&["a", "b", "c", "d"], Layout::Columns(2)),
            "a b\nc d\n"
        );
    }

    #[test]
    fn test_partial_last_row_terminated() {
        assert_eq!(
            render(&["a", "b", "c"], Layout::Columns(2)),
            "a b\nc \n"
        );
    }
}
