use super::context::Analysis;
use lang::{
    ast::{Mov, Set, Stmt, Syscall},
    cell::{cell_number, is_cell_shaped, Operand, Target},
};

const MOV_SPAN: usize = 10;
const ARITY_SPAN: usize = 20;
const ARG_SPAN: usize = 10;

impl<'a> Analysis<'a> {
    /// Pass 2: every name, cell and syscall a statement refers to.
    pub(super) fn check_usage(&mut self, stmts: &'a [Stmt]) {
        for stmt in stmts {
            match stmt {
                Stmt::Set(set) => self.check_set(set),
                Stmt::Mov(mov) => self.check_mov(mov),
                Stmt::Syscall(call) => self.check_syscall(call),
                Stmt::While(block) => self.check_usage(&block.body),
                Stmt::Init(_) | Stmt::Param(_) | Stmt::Variable(_) => {}
            }
        }
    }

    fn check_set(&mut self, set: &Set) {
        match &set.target {
            Target::Name(name) => {
                if !self.symbols.contains_key(name.as_str()) {
                    self.error(
                        set.line,
                        set.column,
                        name.len(),
                        format!("Undefined variable '{}'", name),
                    );
                }
            }
            target => {
                for cell in target.cells() {
                    self.cells.touch(cell, "SET_operation", set.line);
                }
            }
        }

        let Some(target) = set.value.reference() else {
            return;
        };
        if is_cell_shaped(target) {
            // A cell number past u32 can never have been allocated
            let allocated = cell_number(target).is_some_and(|cell| self.cells.is_allocated(cell));
            if !allocated {
                self.warning(
                    set.line,
                    set.column,
                    target.len(),
                    format!(
                        "Reference to unallocated cell '{}'. Consider declaring it first",
                        target
                    ),
                );
            }
        } else if !self.symbols.contains_key(target) {
            self.error(
                set.line,
                set.column,
                target.len(),
                format!("Reference to undefined variable '{}'", target),
            );
        }
    }

    fn check_mov(&mut self, mov: &Mov) {
        for (operand, tag) in [(&mov.from, "MOV_source"), (&mov.to, "MOV_target")] {
            match operand {
                Operand::Name(name) if !self.symbols.contains_key(name.as_str()) => self.error(
                    mov.line,
                    mov.column,
                    MOV_SPAN,
                    format!("Undefined variable '{}'", name),
                ),
                Operand::Name(_) => {}
                Operand::Cell(cell) => self.cells.touch(*cell, tag, mov.line),
            }
        }
    }

    fn check_syscall(&mut self, call: &Syscall) {
        let Some(init) = self.syscall(&call.name) else {
            self.error(
                call.line,
                call.column,
                call.name.len(),
                format!("Undefined syscall '{}'. Use INIT to declare it.", call.name),
            );
            return;
        };

        if call.args.len() != init.arg_count {
            self.error(
                call.line,
                call.column,
                ARITY_SPAN,
                format!(
                    "{} expects {} arguments, got {}",
                    call.name,
                    init.arg_count,
                    call.args.len()
                ),
            );
        }

        let tag = format!("{}_arg", call.name);
        for arg in &call.args {
            match arg {
                Operand::Name(name) => match self.symbol(name) {
                    Some(decl) => {
                        for &cell in decl.cells() {
                            self.cells.touch(cell, &tag, call.line);
                        }
                    }
                    None => self.error(
                        call.line,
                        call.column,
                        ARG_SPAN,
                        format!("Undefined variable '{}' in syscall", name),
                    ),
                },
                Operand::Cell(cell) => self.cells.touch(*cell, &tag, call.line),
            }
        }
    }
}
