mod cellmap;
mod conflict;
mod context;
mod declare;
mod usage;

pub use cellmap::{Allocation, CellInfo, CellMap, Event, EventKind, Shared};
pub use context::{Analysis, Decl};

use crate::diag::Diagnostic;
use lang::{ast::Program, cell::Cell};
use std::collections::BTreeMap;

/// Runs all three passes and returns every diagnostic found.
pub fn validate(program: &Program) -> Vec<Diagnostic> {
    Analysis::run(program).into_diagnostics()
}

/// Latest allocation of every claimed cell, ordered by cell number.
pub fn cell_allocation_snapshot(program: &Program) -> BTreeMap<Cell, CellInfo> {
    Analysis::run(program).snapshot()
}

/// Handle for callers that want an analyzer value. Every call starts from empty tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct Analyzer;

impl Analyzer {
    pub fn new() -> Self {
        Analyzer
    }

    pub fn validate(&self, program: &Program) -> Vec<Diagnostic> {
        validate(program)
    }

    pub fn cell_allocation_snapshot(&self, program: &Program) -> BTreeMap<Cell, CellInfo> {
        cell_allocation_snapshot(program)
    }
}
