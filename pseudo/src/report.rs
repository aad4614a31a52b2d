use crate::analyzer::{Analysis, CellInfo, Event};
use crate::diag::{has_error, Diagnostic, Severity};
use crate::parser::parse;
use lang::cell::Cell;
use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of checking one source file.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub file: String,
    pub statements: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub cells: Vec<CellInfo>,
    #[serde(skip)]
    pub claims: BTreeMap<Cell, usize>,
    #[serde(skip)]
    pub history: Vec<(Cell, Vec<Event>)>,
}

impl Report {
    /// Parse and validate. A parse failure becomes the only diagnostic, anchored
    /// at its line with no span.
    pub fn check(file: &str, source: &str) -> Self {
        let program = match parse(source) {
            Ok(program) => program,
            Err(err) => {
                return Report {
                    file: file.to_string(),
                    statements: 0,
                    diagnostics: vec![Diagnostic::error(
                        err.line.saturating_sub(1),
                        0,
                        0,
                        err.to_string(),
                    )],
                    cells: vec![],
                    claims: BTreeMap::new(),
                    history: vec![],
                };
            }
        };

        let analysis = Analysis::run(&program);
        Report {
            file: file.to_string(),
            statements: program.len(),
            diagnostics: analysis.diagnostics().to_vec(),
            cells: analysis.snapshot().into_values().collect(),
            claims: analysis
                .cells()
                .iter()
                .map(|(cell, claims)| (cell, claims.len()))
                .collect(),
            history: analysis
                .cells()
                .touched()
                .map(|(cell, events)| (cell, events.to_vec()))
                .collect(),
        }
    }

    pub fn errors(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warnings(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }

    /// Errors always fail, warnings only when denied.
    pub fn failed(&self, deny_warnings: bool) -> bool {
        has_error(&self.diagnostics) || (deny_warnings && self.warnings() > 0)
    }
}
