use super::cellmap::{CellInfo, CellMap};
use crate::diag::Diagnostic;
use indexmap::IndexMap;
use lang::{
    ast::{Init, Param, Program, Variable},
    cell::Cell,
    kind::CellKind,
};
use std::collections::BTreeMap;

/// The statement that introduced a name.
#[derive(Debug, Clone, Copy)]
pub enum Decl<'a> {
    Param(&'a Param),
    Variable(&'a Variable),
}

impl<'a> Decl<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            Decl::Param(param) => &param.name,
            Decl::Variable(var) => &var.name,
        }
    }

    pub fn cells(&self) -> &'a [Cell] {
        match *self {
            Decl::Param(param) => &param.cells,
            Decl::Variable(var) => &var.cells,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            Decl::Param(param) => param.line,
            Decl::Variable(var) => var.line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            Decl::Param(param) => param.column,
            Decl::Variable(var) => var.column,
        }
    }

    /// Variables always claim `INT` cells.
    pub fn kind(&self) -> CellKind {
        match self {
            Decl::Param(param) => param.kind.into(),
            Decl::Variable(_) => CellKind::INT,
        }
    }
}

/// Tables of one analysis run. Built from empty by [`Analysis::run`] and
/// borrowing names and nodes from the analyzed program.
#[derive(Debug)]
pub struct Analysis<'a> {
    pub(super) symbols: IndexMap<&'a str, Decl<'a>>,
    pub(super) syscalls: IndexMap<&'a str, &'a Init>,
    pub(super) cells: CellMap,
    pub(super) diagnostics: Vec<Diagnostic>,
}

impl<'a> Analysis<'a> {
    pub fn run(program: &'a Program) -> Self {
        let mut analysis = Analysis {
            symbols: IndexMap::new(),
            syscalls: IndexMap::new(),
            cells: CellMap::new(),
            diagnostics: vec![],
        };
        analysis.declare(program.stmts());
        analysis.check_usage(program.stmts());
        analysis.detect_conflicts();
        analysis
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn symbol(&self, name: &str) -> Option<Decl<'a>> {
        self.symbols.get(name).copied()
    }

    /// Declared names in declaration order.
    pub fn symbols(&self) -> impl Iterator<Item = Decl<'a>> + '_ {
        self.symbols.values().copied()
    }

    pub fn syscall(&self, name: &str) -> Option<&'a Init> {
        self.syscalls.get(name).copied()
    }

    pub fn cells(&self) -> &CellMap {
        &self.cells
    }

    pub fn snapshot(&self) -> BTreeMap<Cell, CellInfo> {
        self.cells.snapshot()
    }

    pub(super) fn error(&mut self, line: usize, column: usize, length: usize, message: String) {
        self.diagnostics
            .push(Diagnostic::error(line, column, length, message));
    }

    pub(super) fn warning(&mut self, line: usize, column: usize, length: usize, message: String) {
        self.diagnostics
            .push(Diagnostic::warning(line, column, length, message));
    }
}
