use std::fmt;

/// Number of a storage cell, written `C<n>` in source.
pub type Cell = u32;

/// `C` followed by one or more ASCII digits.
pub fn is_cell_shaped(token: &str) -> bool {
    match token.strip_prefix('C') {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Cell number of a cell-shaped token.
pub fn cell_number(token: &str) -> Option<Cell> {
    if is_cell_shaped(token) {
        token[1..].parse().ok()
    } else {
        None
    }
}

/// One or more of `[A-Za-z0-9_]`.
pub fn is_word(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

// ----------------------------------------------------------------------------
// Operand

/// Something a `MOV` or a syscall argument can address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    Cell(Cell),
    Name(String),
}

impl Operand {
    /// Cell-shaped tokens become cells, anything else a name.
    pub fn classify(token: &str) -> Operand {
        match cell_number(token) {
            Some(cell) => Operand::Cell(cell),
            None => Operand::Name(token.to_string()),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Cell(cell) => write!(f, "C{}", cell),
            Operand::Name(name) => write!(f, "{}", name),
        }
    }
}

// ----------------------------------------------------------------------------
// Target

/// Left-hand side of a `SET`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Cell(Cell),
    Range(Cell, Cell),
    Name(String),
}

impl Target {
    /// Cells written by this target, empty for a name.
    pub fn cells(&self) -> Vec<Cell> {
        match self {
            Target::Cell(cell) => vec![*cell],
            Target::Range(begin, end) => (*begin..=*end).collect(),
            Target::Name(_) => vec![],
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Cell(cell) => write!(f, "C{}", cell),
            Target::Range(begin, end) => write!(f, "C{}..C{}", begin, end),
            Target::Name(name) => write!(f, "{}", name),
        }
    }
}

// ----------------------------------------------------------------------------
// Cell list

/// Formats an expanded cell list back into `C0..C3, C7` form.
pub struct CellList<'a>(pub &'a [Cell]);

impl fmt::Display for CellList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut runs: Vec<(Cell, Cell)> = vec![];
        for &cell in self.0 {
            match runs.last_mut() {
                Some((_, end)) if end.checked_add(1) == Some(cell) => *end = cell,
                _ => runs.push((cell, cell)),
            }
        }
        for (idx, (begin, end)) in runs.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            if begin == end {
                write!(f, "C{}", begin)?;
            } else {
                write!(f, "C{}..C{}", begin, end)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_tokens() {
        assert_eq!(Operand::classify("C12"), Operand::Cell(12));
        assert_eq!(Operand::classify("Count"), Operand::Name("Count".into()));
        assert_eq!(Operand::classify("C"), Operand::Name("C".into()));
        assert!(!is_cell_shaped("c1"));
        assert!(is_word("buf_1"));
        assert!(!is_word("buf-1"));
    }

    #[test]
    fn compact_cell_list() {
        assert_eq!(CellList(&[0, 1, 2, 3, 7]).to_string(), "C0..C3, C7");
        assert_eq!(CellList(&[5, 5]).to_string(), "C5, C5");
        assert_eq!(CellList(&[4]).to_string(), "C4");
    }

    #[test]
    fn range_cells() {
        assert_eq!(Target::Range(2, 5).cells(), vec![2, 3, 4, 5]);
        assert!(Target::Name("x".into()).cells().is_empty());
    }
}
