use lang::kind::CellKind;
use pseudo::analyzer::{Analysis, EventKind};
use pseudo::config::{Config, Format};
use pseudo::{cell_allocation_snapshot, parse, validate, Analyzer, Diagnostic, Report, Severity};

fn check(code: &str) -> Vec<Diagnostic> {
    for (line_idx, line) in code.lines().enumerate() {
        println!("{:>2}: {}", line_idx, line);
    }
    let program = match parse(code) {
        Ok(program) => program,
        Err(err) => panic!("Parse failed: {}", err),
    };
    let diagnostics = validate(&program);
    for diag in &diagnostics {
        println!("{:?}", diag);
    }
    diagnostics
}

fn assert(code: &str, expect: &[(Severity, usize, &str)]) {
    let found: Vec<(Severity, usize, String)> = check(code)
        .into_iter()
        .map(|diag| (diag.severity, diag.line, diag.message))
        .collect();
    let expect: Vec<(Severity, usize, String)> = expect
        .iter()
        .map(|(severity, line, message)| (*severity, *line, message.to_string()))
        .collect();
    assert_eq!(found, expect);
}

macro_rules! case {
    ($name:ident, $code:expr) => {
        #[test]
        fn $name() {
            assert($code, &[]);
        }
    };
    ($name:ident, $code:expr, $($severity:ident $line:expr => $message:expr),+ $(,)?) => {
        #[test]
        fn $name() {
            assert($code, &[$((Severity::$severity, $line, $message)),+]);
        }
    };
}

case!(
    clean_program,
    "INIT SYS_WRITE AT C0 WITH 3\nPARAM fd (C1): INT = 1\nbuf (C2..C4) = [1, 2]\nSYS_WRITE(fd, buf, C5)\nMOV C1 C5\nSET buf &fd"
);

case!(
    redeclared_name,
    "PARAM x (C0): INT\nPARAM x (C0): INT",
    Error 1 => "Variable 'x' already declared"
);

case!(
    shared_cell,
    "PARAM a (C0): INT\nPARAM b (C0): INT",
    Warning 1 => "Cell C0 shared between: a, b. Ensure this is intentional for space optimization."
);

case!(
    shared_by_syscall,
    "INIT SYS_OPEN AT C0 WITH 1\nfd (C0, C1) = 0\nPARAM p (C1): PTR",
    Warning 1 => "Cell C0 shared between: SYS_OPEN, fd. Ensure this is intentional for space optimization.",
    Warning 2 => "Cell C1 shared between: fd, p. Ensure this is intentional for space optimization."
);

case!(self_overlap, "PARAM a (C0, C0..C1): INT");

case!(
    arity,
    "INIT SYS_WRITE AT C0 WITH 3\nSYS_WRITE(C1, C2)",
    Error 1 => "SYS_WRITE expects 3 arguments, got 2"
);

case!(arity_ok, "INIT SYS_WRITE AT C0 WITH 3\nSYS_WRITE(C1, C2, C3)");

case!(
    undefined_syscall,
    "SYS_READ(C0, ghost)",
    Error 0 => "Undefined syscall 'SYS_READ'. Use INIT to declare it."
);

case!(
    syscall_args,
    "INIT SYS_WRITE AT C0 WITH 1\nSYS_WRITE(ghost, C1)",
    Error 1 => "SYS_WRITE expects 1 arguments, got 2",
    Error 1 => "Undefined variable 'ghost' in syscall"
);

case!(
    set_undefined,
    "SET ghost 1\nSET C9 &C8\nSET C9 &nobody",
    Error 0 => "Undefined variable 'ghost'",
    Warning 1 => "Reference to unallocated cell 'C8'. Consider declaring it first",
    Error 2 => "Reference to undefined variable 'nobody'"
);

case!(
    mov_undefined,
    "x (C0) = 1\nMOV x y\nMOV z C0",
    Error 1 => "Undefined variable 'y'",
    Error 2 => "Undefined variable 'z'"
);

case!(
    while_scope,
    "while:\nPARAM n (C0): INT\nendwhile\nSET n 1\nn (C1) = 2",
    Error 4 => "Variable 'n' already declared"
);

case!(
    reference_cell_overflow,
    "SET C0 &C99999999999",
    Warning 0 => "Reference to unallocated cell 'C99999999999'. Consider declaring it first"
);

case!(reference_empty, "x (C0) = &\nSET C0 &");

case!(late_declaration, "SET C0 &C1\nPARAM p (C1): INT");

case!(
    pass_order,
    "SET ghost 1\na (C0) = 1\nb (C0) = 2\na (C1) = 3",
    Error 3 => "Variable 'a' already declared",
    Error 0 => "Undefined variable 'ghost'",
    Warning 2 => "Cell C0 shared between: a, b. Ensure this is intentional for space optimization."
);

#[test]
fn spans() {
    let diags = check("INIT SYS_W AT C0 WITH 2\nSYS_W(C1)\nMOV ghost C1\nlongname (C0) = 1");
    let spans: Vec<(usize, usize, usize)> = diags.iter().map(Diagnostic::span).collect();
    // arity, MOV operand, shared cell (latest owner `longname`)
    assert_eq!(spans, vec![(1, 0, 20), (2, 0, 10), (3, 0, 8)]);
}

#[test]
fn redeclared_keeps_first() {
    let program = parse("PARAM x (C0): INT\nPARAM x (C5..C6): PTR").unwrap();
    let analysis = Analysis::run(&program);
    let decl = analysis.symbol("x").unwrap();
    assert_eq!(decl.cells(), &[0]);
    assert_eq!(decl.line(), 0);
    assert!(!analysis.cells().is_allocated(5));
    assert_eq!(analysis.symbols().count(), 1);
}

#[test]
fn idempotent() {
    let program = parse(
        "INIT SYS_W AT C0 WITH 1\na (C0) = 1\nSYS_W(a, b)\nwhile:\nb (C0) = 2\nendwhile",
    )
    .unwrap();
    let analyzer = Analyzer::new();
    let first = analyzer.validate(&program);
    let second = analyzer.validate(&program);
    assert!(!first.is_empty());
    assert_eq!(first, second);
    assert_eq!(
        analyzer.cell_allocation_snapshot(&program),
        cell_allocation_snapshot(&program)
    );
}

#[test]
fn snapshot_latest() {
    let program =
        parse("INIT SYS_W AT C3 WITH 1\nbuf (C0..C2) = 0\nPARAM p (C1): STRUCT[8]").unwrap();
    let snapshot = cell_allocation_snapshot(&program);
    let rows: Vec<(u32, &str, CellKind, usize)> = snapshot
        .values()
        .map(|info| (info.cell, info.owner.as_str(), info.kind, info.size))
        .collect();
    assert_eq!(
        rows,
        vec![
            (0, "buf", CellKind::INT, 3),
            (1, "p", CellKind::STRUCT, 1),
            (2, "buf", CellKind::INT, 3),
            (3, "SYS_W", CellKind::SYSCALL, 1),
        ]
    );
}

#[test]
fn usage_history() {
    let program = parse(
        "INIT SYS_W AT C0 WITH 1\nfd (C1, C2) = 1\nSET C3..C4 0\nMOV C1 C3\nSYS_W(fd)",
    )
    .unwrap();
    let analysis = Analysis::run(&program);
    let tags = |cell| -> Vec<(String, usize, EventKind)> {
        analysis
            .cells()
            .history(cell)
            .iter()
            .map(|event| (event.owner.clone(), event.line, event.kind))
            .collect()
    };
    assert_eq!(
        tags(1),
        vec![
            (format!("fd"), 1, EventKind::Allocation),
            (format!("MOV_source"), 3, EventKind::Usage),
            (format!("SYS_W_arg"), 4, EventKind::Usage),
        ]
    );
    assert_eq!(
        tags(3),
        vec![
            (format!("SET_operation"), 2, EventKind::Usage),
            (format!("MOV_target"), 3, EventKind::Usage),
        ]
    );
    assert_eq!(tags(4).len(), 1);
    assert_eq!(analysis.syscall("SYS_W").map(|init| init.arg_count), Some(1));
}

#[test]
fn report_parse_failure() {
    let report = Report::check("bad.pseudo", "SET C0 1\nMOV C0");
    assert_eq!(report.errors(), 1);
    assert_eq!(report.diagnostics[0].line, 1);
    assert_eq!(report.diagnostics[0].message, "Line 2: Invalid MOV syntax");
    assert!(report.cells.is_empty());
    assert!(report.failed(false));
}

#[test]
fn report_warnings() {
    let report = Report::check("ok.pseudo", "a (C0) = 1\nb (C0) = 2");
    assert_eq!((report.errors(), report.warnings()), (0, 1));
    assert!(!report.failed(false));
    assert!(report.failed(true));
    assert_eq!(report.claims.get(&0), Some(&2));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["diagnostics"][0]["severity"], "warning");
    assert_eq!(json["cells"][0]["owner"], "b");
    assert_eq!(json["cells"][0]["kind"], "INT");
    assert!(json.get("history").is_none());
}

#[test]
fn config_yaml() {
    let config = Config::from_yaml("deny_warnings: true\nformat: json\n").unwrap();
    assert!(config.deny_warnings);
    assert!(!config.cell_map);
    assert_eq!(config.format, Format::Json);
    assert_eq!(Config::from_yaml("{}").unwrap(), Config::default());
}
