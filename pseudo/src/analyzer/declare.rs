use super::context::{Analysis, Decl};
use lang::{ast::Stmt, kind::CellKind};

impl<'a> Analysis<'a> {
    /// Pass 1: register syscalls and names, claim their cells.
    pub(super) fn declare(&mut self, stmts: &'a [Stmt]) {
        for stmt in stmts {
            match stmt {
                Stmt::Init(init) => {
                    // Re-initializing a syscall replaces the earlier handle
                    self.syscalls.insert(&init.syscall, init);
                    self.cells
                        .allocate(init.cell, &init.syscall, CellKind::SYSCALL, 1, init.line);
                }
                Stmt::Param(param) => self.declare_symbol(Decl::Param(param)),
                Stmt::Variable(var) => self.declare_symbol(Decl::Variable(var)),
                Stmt::While(block) => self.declare(&block.body),
                Stmt::Set(_) | Stmt::Mov(_) | Stmt::Syscall(_) => {}
            }
        }
    }

    fn declare_symbol(&mut self, decl: Decl<'a>) {
        let name = decl.name();
        if self.symbols.contains_key(name) {
            self.error(
                decl.line(),
                decl.column(),
                name.len(),
                format!("Variable '{}' already declared", name),
            );
            return;
        }
        self.symbols.insert(name, decl);

        let cells = decl.cells();
        for &cell in cells {
            self.cells
                .allocate(cell, name, decl.kind(), cells.len(), decl.line());
        }
    }
}
