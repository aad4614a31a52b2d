use crate::error::{ParseError, SyntaxError};
use crate::grammer::literal;
use lang::{
    ast::{Init, Mov, Param, Program, Set, Stmt, Syscall, Variable, While},
    cell::{cell_number, is_cell_shaped, is_word, Cell, Operand, Target},
    kind::DataKind,
    value::Value,
};

/// Parses a whole document. The first malformed line aborts with its 1-based line number.
///
/// Lines that start no known statement are skipped. A `while:` block runs to the next
/// `endwhile`, or to the end of input when there is none. Blocks do not nest: a `while:`
/// inside a block becomes an empty loop.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let mut lines = source
        .lines()
        .enumerate()
        .map(|(idx, raw)| (idx, strip_comment(raw)))
        .filter(|(_, code)| !code.is_empty());

    let mut stmts = vec![];
    while let Some((idx, code)) = lines.next() {
        match parse_line(code, idx).map_err(|kind| ParseError::new(idx, kind))? {
            Some(Stmt::While(mut block)) => {
                while let Some((idx, code)) = lines.next() {
                    if code == "endwhile" {
                        break;
                    }
                    if let Some(stmt) =
                        parse_line(code, idx).map_err(|kind| ParseError::new(idx, kind))?
                    {
                        block.body.push(stmt);
                    }
                }
                stmts.push(Stmt::While(block));
            }
            Some(stmt) => stmts.push(stmt),
            None => {}
        }
    }
    Ok(Program(stmts))
}

fn strip_comment(raw: &str) -> &str {
    match raw.split_once('#') {
        Some((code, _)) => code.trim(),
        None => raw.trim(),
    }
}

// ----------------------------------------------------------------------------
// Statement

/// Parses one comment-free, trimmed line. `Ok(None)` for lines that start no statement.
pub fn parse_line(code: &str, line: usize) -> Result<Option<Stmt>, SyntaxError> {
    let column = 0;

    // INIT SYS_SOCKET AT C0 WITH 3
    if code.starts_with("INIT SYS_") {
        let words: Vec<&str> = code.split(' ').collect();
        return match words.as_slice() {
            ["INIT", name, "AT", cell, "WITH", count] if is_syscall_name(name) => {
                let cell = cell_number(cell).ok_or(SyntaxError::Init)?;
                let arg_count = digits(count).ok_or(SyntaxError::Init)?;
                Ok(Some(Stmt::Init(Init {
                    line,
                    column,
                    syscall: name.to_string(),
                    cell,
                    arg_count,
                })))
            }
            _ => Err(SyntaxError::Init),
        };
    }

    // PARAM name (C0..C4): TYPE[size] = value
    if let Some(rest) = code.strip_prefix("PARAM ") {
        return parse_param(code, rest, line, column).map(Some);
    }

    // SET C0 42 | SET C0..C4 0 | SET name value
    if let Some(rest) = code.strip_prefix("SET ") {
        let (target, value) = rest.split_once(' ').ok_or(SyntaxError::Set)?;
        let target = if target.contains("..") {
            let (begin, end) = parse_range(target)?;
            Target::Range(begin, end)
        } else if is_cell_shaped(target) {
            Target::Cell(cell_number(target).ok_or(SyntaxError::Set)?)
        } else if is_word(target) {
            Target::Name(target.to_string())
        } else {
            return Err(SyntaxError::Set);
        };
        return Ok(Some(Stmt::Set(Set {
            line,
            column,
            target,
            value: parse_value(value),
        })));
    }

    // MOV C0 C1 | MOV name C1
    if let Some(rest) = code.strip_prefix("MOV ") {
        let words: Vec<&str> = rest.split(' ').collect();
        return match words.as_slice() {
            [from, to] => Ok(Some(Stmt::Mov(Mov {
                line,
                column,
                from: operand(from).ok_or(SyntaxError::Mov)?,
                to: operand(to).ok_or(SyntaxError::Mov)?,
            }))),
            _ => Err(SyntaxError::Mov),
        };
    }

    // while: ... endwhile (the body is collected by `parse`)
    if code == "while:" {
        return Ok(Some(Stmt::While(While {
            line,
            column,
            body: vec![],
        })));
    }

    // A stray endwhile closes nothing
    if code == "endwhile" {
        return Ok(None);
    }

    // SYS_WRITE(C0, C1, C2)
    if code.starts_with("SYS_") {
        let (name, rest) = code.split_once('(').ok_or(SyntaxError::Syscall)?;
        let args = rest.strip_suffix(')').ok_or(SyntaxError::Syscall)?;
        if !is_syscall_name(name) || args.contains(')') {
            return Err(SyntaxError::Syscall);
        }
        let args = if args.trim().is_empty() {
            vec![]
        } else {
            args.split(',')
                .map(|arg| operand(arg.trim()).ok_or(SyntaxError::Syscall))
                .collect::<Result<Vec<_>, _>>()?
        };
        return Ok(Some(Stmt::Syscall(Syscall {
            line,
            column,
            name: name.to_string(),
            args,
        })));
    }

    // name (C0, C1) = value
    if code.contains("(C") && code.contains(')') && code.contains('=') {
        let (name, rest) = code.split_once(" (").ok_or(SyntaxError::Variable)?;
        let (cells, value) = rest.split_once(") = ").ok_or(SyntaxError::Variable)?;
        if !is_word(name) || value.trim().is_empty() {
            return Err(SyntaxError::Variable);
        }
        return Ok(Some(Stmt::Variable(Variable {
            line,
            column,
            name: name.to_string(),
            cells: parse_cell_list(cells)?,
            value: parse_value(value),
        })));
    }

    Ok(None)
}

fn parse_param(code: &str, rest: &str, line: usize, column: usize) -> Result<Stmt, SyntaxError> {
    let invalid = || SyntaxError::Param(code.to_string());

    let (name, rest) = rest.split_once(" (").ok_or_else(invalid)?;
    let (cells, rest) = rest.split_once("):").ok_or_else(invalid)?;
    if !is_word(name) {
        return Err(invalid());
    }

    // TYPE[size] = value
    let (decl, value) = match rest.split_once('=') {
        Some((decl, value)) => (decl.trim(), Some(value.trim())),
        None => (rest.trim(), None),
    };
    if value.is_some_and(str::is_empty) {
        return Err(invalid());
    }
    let (kind, size) = match decl.split_once('[') {
        Some((kind, size)) => {
            let size = size.strip_suffix(']').and_then(digits).ok_or_else(invalid)?;
            (kind, Some(size))
        }
        None => (decl, None),
    };
    if !is_word(kind) {
        return Err(invalid());
    }
    let kind = DataKind::parse(kind).map_err(|_| SyntaxError::UnknownType(kind.to_string()))?;

    Ok(Stmt::Param(Param {
        line,
        column,
        name: name.to_string(),
        cells: parse_cell_list(cells)?,
        kind,
        size,
        value: value.map(parse_value),
    }))
}

// ----------------------------------------------------------------------------
// Cells and operands

/// Expands `C0, C2..C4` into `[0, 2, 3, 4]`.
pub fn parse_cell_list(list: &str) -> Result<Vec<Cell>, SyntaxError> {
    let mut cells = vec![];
    for part in list.split(',').map(str::trim) {
        if part.contains("..") {
            let (begin, end) = parse_range(part)?;
            cells.extend(begin..=end);
        } else {
            if !part.starts_with('C') {
                return Err(SyntaxError::CellPrefix(part.to_string()));
            }
            let cell = cell_number(part).ok_or_else(|| SyntaxError::CellNumber(part.to_string()))?;
            cells.push(cell);
        }
    }
    Ok(cells)
}

/// Widest range a single `C<a>..C<b>` item may expand to.
pub const MAX_RANGE_CELLS: u32 = 65536;

/// `C<a>..C<b>` with `a <= b`.
fn parse_range(part: &str) -> Result<(Cell, Cell), SyntaxError> {
    let sides: Vec<&str> = part.split("..").map(str::trim).collect();
    let [begin, end] = sides.as_slice() else {
        return Err(SyntaxError::RangeFormat(part.to_string()));
    };
    if !begin.starts_with('C') || !end.starts_with('C') {
        return Err(SyntaxError::RangePrefix(part.to_string()));
    }
    match (cell_number(begin), cell_number(end)) {
        (Some(begin), Some(end)) if begin > end => {
            Err(SyntaxError::RangeInverted(part.to_string()))
        }
        (Some(begin), Some(end)) if end - begin >= MAX_RANGE_CELLS => Err(
            SyntaxError::RangeTooWide(part.to_string(), MAX_RANGE_CELLS),
        ),
        (Some(begin), Some(end)) => Ok((begin, end)),
        _ => Err(SyntaxError::RangeNumber(part.to_string())),
    }
}

fn operand(token: &str) -> Option<Operand> {
    if !is_word(token) {
        return None;
    }
    // C99999999999 does not fit a cell number and is no name either
    if is_cell_shaped(token) && cell_number(token).is_none() {
        return None;
    }
    Some(Operand::classify(token))
}

fn is_syscall_name(name: &str) -> bool {
    name.len() > "SYS_".len() && name.starts_with("SYS_") && is_word(name)
}

fn digits<T: std::str::FromStr>(s: &str) -> Option<T> {
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

// ----------------------------------------------------------------------------
// Value

/// Reads the right-hand side of a declaration or `SET`. Never fails: text that is no
/// literal is kept as `Value::Str`, a literal that does not parse as `Value::Raw`.
pub fn parse_value(text: &str) -> Value {
    let trimmed = text.trim();

    // &name | &C3
    if let Some(target) = trimmed.strip_prefix('&') {
        let target = target.trim();
        if !is_word(target) {
            return Value::Raw(trimmed.to_string());
        }
        return Value::Reference {
            target: target.to_string(),
        };
    }

    // 0x1F
    if let Some(hex) = trimmed.strip_prefix("0x") {
        return match u64::from_str_radix(hex, 16) {
            Ok(n) if !hex.starts_with('+') => Value::Hex(n),
            _ => Value::Raw(trimmed.to_string()),
        };
    }

    // 42
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return match trimmed.parse() {
            Ok(n) => Value::Int(n),
            Err(_) => Value::Raw(trimmed.to_string()),
        };
    }

    // { key: value, list: [1, 2] }
    if trimmed.starts_with('{') {
        return match literal::object(trimmed) {
            Ok(fields) => Value::Object(fields),
            Err(_) => Value::Raw(trimmed.to_string()),
        };
    }

    // [1, 2, 3]
    if trimmed.starts_with('[') {
        return match literal::array(trimmed) {
            Ok(items) => Value::Array(items),
            Err(_) => Value::Raw(trimmed.to_string()),
        };
    }

    Value::Str(trimmed.to_string())
}
