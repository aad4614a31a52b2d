use crate::{
    cell::{Cell, CellList, Operand, Target},
    kind::DataKind,
    value::Value,
};
use std::fmt;

/// Parsed source, one entry per statement line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program(pub Vec<Stmt>);

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Init(Init),         // INIT SYS_name AT C0 WITH 3
    Param(Param),       // PARAM name (C0..C4): TYPE[size] = value
    Variable(Variable), // name (C0, C1) = value
    Set(Set),           // SET C0 42 | SET C0..C4 0 | SET name value
    Mov(Mov),           // MOV C0 C1 | MOV name C1
    Syscall(Syscall),   // SYS_name(C0, name)
    While(While),       // while: ... endwhile
}

#[derive(Debug, Clone, PartialEq)]
pub struct Init {
    pub line: usize,
    pub column: usize,
    pub syscall: String,
    pub cell: Cell,
    pub arg_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub line: usize,
    pub column: usize,
    pub name: String,
    pub cells: Vec<Cell>,
    pub kind: DataKind,
    pub size: Option<u32>,
    pub value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub line: usize,
    pub column: usize,
    pub name: String,
    pub cells: Vec<Cell>,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Set {
    pub line: usize,
    pub column: usize,
    pub target: Target,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mov {
    pub line: usize,
    pub column: usize,
    pub from: Operand,
    pub to: Operand,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Syscall {
    pub line: usize,
    pub column: usize,
    pub name: String,
    pub args: Vec<Operand>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub line: usize,
    pub column: usize,
    pub body: Vec<Stmt>,
}

impl Stmt {
    /// 0-based source line.
    pub fn line(&self) -> usize {
        match self {
            Stmt::Init(s) => s.line,
            Stmt::Param(s) => s.line,
            Stmt::Variable(s) => s.line,
            Stmt::Set(s) => s.line,
            Stmt::Mov(s) => s.line,
            Stmt::Syscall(s) => s.line,
            Stmt::While(s) => s.line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            Stmt::Init(s) => s.column,
            Stmt::Param(s) => s.column,
            Stmt::Variable(s) => s.column,
            Stmt::Set(s) => s.column,
            Stmt::Mov(s) => s.column,
            Stmt::Syscall(s) => s.column,
            Stmt::While(s) => s.column,
        }
    }
}

impl Program {
    pub fn stmts(&self) -> &[Stmt] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

// ----------------------------------------------------------------------------
// Source form

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Init(s) => write!(
                f,
                "INIT {} AT C{} WITH {}",
                s.syscall, s.cell, s.arg_count
            ),
            Stmt::Param(s) => {
                write!(f, "PARAM {} ({}): {}", s.name, CellList(&s.cells), s.kind)?;
                if let Some(size) = s.size {
                    write!(f, "[{}]", size)?;
                }
                if let Some(value) = &s.value {
                    write!(f, " = {}", value)?;
                }
                Ok(())
            }
            Stmt::Variable(s) => write!(f, "{} ({}) = {}", s.name, CellList(&s.cells), s.value),
            Stmt::Set(s) => write!(f, "SET {} {}", s.target, s.value),
            Stmt::Mov(s) => write!(f, "MOV {} {}", s.from, s.to),
            Stmt::Syscall(s) => {
                let args: Vec<String> = s.args.iter().map(|arg| arg.to_string()).collect();
                write!(f, "{}({})", s.name, args.join(", "))
            }
            Stmt::While(s) => {
                writeln!(f, "while:")?;
                for stmt in &s.body {
                    match stmt {
                        // Blocks do not nest, an inner header has no body of its own
                        Stmt::While(_) => writeln!(f, "while:")?,
                        stmt => writeln!(f, "{}", stmt)?,
                    }
                }
                write!(f, "endwhile")
            }
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.0 {
            writeln!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_form() {
        let program = Program(vec![
            Stmt::Init(Init {
                line: 0,
                column: 0,
                syscall: "SYS_WRITE".into(),
                cell: 0,
                arg_count: 3,
            }),
            Stmt::While(While {
                line: 1,
                column: 0,
                body: vec![Stmt::Mov(Mov {
                    line: 2,
                    column: 0,
                    from: Operand::Cell(1),
                    to: Operand::Name("fd".into()),
                })],
            }),
        ]);
        assert_eq!(
            program.to_string(),
            "INIT SYS_WRITE AT C0 WITH 3\nwhile:\nMOV C1 fd\nendwhile\n"
        );
    }
}
