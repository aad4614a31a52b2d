use crate::analyzer::{CellInfo, Event, EventKind};
use color_print::{cprint, cprintln};
use lang::{cell::Cell, kind::CellKind};
use std::collections::BTreeMap;

/// Cell map table, one row per claimed cell.
pub fn cellprint(cells: &[CellInfo], claims: &BTreeMap<Cell, usize>) {
    println!("+--[Cell]--+--[Kind]--+------------------------------------------------------");
    for info in cells {
        cprint!("| {:>8} | ", format!("C{}", info.cell));
        let kind = info.kind.to_string();
        match info.kind {
            CellKind::INT => cprint!("<green>{:<8}</green>", kind),
            CellKind::STRUCT => cprint!("<blue>{:<8}</blue>", kind),
            CellKind::PTR => cprint!("<magenta>{:<8}</magenta>", kind),
            CellKind::SYSCALL => cprint!("<red>{:<8}</red>", kind),
        }
        cprint!(" | <bold>{}</bold> (size {})", info.owner, info.size);
        let claims = claims.get(&info.cell).copied().unwrap_or(1);
        if claims > 1 {
            cprint!(" <yellow>shared x{}</yellow>", claims);
        }
        println!();
    }
    println!("+----------+----------+------------------------------------------------------");
}

/// Every event on every touched cell, in program order per cell.
pub fn historyprint(history: &[(Cell, Vec<Event>)]) {
    for (cell, events) in history {
        cprintln!("<bold>C{}</bold>", cell);
        for event in events {
            let kind = event.kind.to_string();
            match event.kind {
                EventKind::Allocation => cprintln!(
                    "  {:>4} | <cyan>{:<10}</cyan> {}",
                    event.line + 1,
                    kind,
                    event.owner
                ),
                EventKind::Usage => cprintln!(
                    "  {:>4} | <yellow>{:<10}</yellow> {}",
                    event.line + 1,
                    kind,
                    event.owner
                ),
            }
        }
    }
}
