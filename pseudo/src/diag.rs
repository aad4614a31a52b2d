use color_print::cprintln;
use serde::Serialize;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A positioned finding. `line` is 0-based, the highlighted span is
/// `column..column + length` on that line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub column: usize,
    pub length: usize,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn error(line: usize, column: usize, length: usize, message: String) -> Self {
        Diagnostic {
            line,
            column,
            length,
            message,
            severity: Severity::Error,
        }
    }

    pub fn warning(line: usize, column: usize, length: usize, message: String) -> Self {
        Diagnostic {
            line,
            column,
            length,
            message,
            severity: Severity::Warning,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// `(line, start column, end column)` for editors that highlight ranges.
    pub fn span(&self) -> (usize, usize, usize) {
        (self.line, self.column, self.column + self.length)
    }

    /// Print in the rustc layout with the offending source line underlined.
    pub fn print(&self, file: &str, source: &str) {
        match self.severity {
            Severity::Error => cprintln!("<red,bold>error</>: {}", self.message),
            Severity::Warning => cprintln!("<yellow,bold>warn</>: {}", self.message),
        }
        let raw = source.lines().nth(self.line).unwrap_or("");
        let marker = format!(
            "{}{}",
            " ".repeat(self.column),
            "^".repeat(self.length.max(1))
        );
        cprintln!("     <blue>--></> <underline>{}:{}</>", file, self.line + 1);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", self.line + 1, raw);
        match self.severity {
            Severity::Error => cprintln!("      <blue>|</> <red,bold>{}</>", marker),
            Severity::Warning => cprintln!("      <blue>|</> <yellow,bold>{}</>", marker),
        }
    }
}

pub fn has_error(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_and_severity() {
        let diag = Diagnostic::warning(3, 0, 5, "shared".into());
        assert_eq!(diag.span(), (3, 0, 5));
        assert!(!diag.is_error());
        assert!(!has_error(&[diag.clone()]));
        assert!(has_error(&[diag, Diagnostic::error(0, 0, 1, "x".into())]));
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
