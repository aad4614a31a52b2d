use indexmap::IndexSet;
use lang::{cell::Cell, kind::CellKind};
use serde::Serialize;
use std::collections::BTreeMap;
use strum::Display;

/// One claim on a cell by a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub owner: String,
    pub kind: CellKind,
    pub size: usize,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventKind {
    Allocation,
    Usage,
}

/// Something that touched a cell. `owner` is the declaring name for an
/// allocation and the operation tag (`MOV_source`, `SYS_WRITE_arg`, ...) for a usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub owner: String,
    pub line: usize,
    pub kind: EventKind,
}

/// Latest allocation of one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellInfo {
    pub cell: Cell,
    pub owner: String,
    pub kind: CellKind,
    pub size: usize,
}

/// A cell claimed by more than one owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shared {
    pub cell: Cell,
    pub owners: Vec<String>,
    pub latest: Allocation,
}

#[derive(Debug, Default)]
pub struct CellMap {
    allocations: BTreeMap<Cell, Vec<Allocation>>,
    history: BTreeMap<Cell, Vec<Event>>,
}

impl CellMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `cell`. Earlier claims stay, the latest one is current.
    pub fn allocate(&mut self, cell: Cell, owner: &str, kind: CellKind, size: usize, line: usize) {
        self.allocations.entry(cell).or_default().push(Allocation {
            owner: owner.to_string(),
            kind,
            size,
            line,
        });
        self.record(cell, owner, line, EventKind::Allocation);
    }

    /// Record a read or write of `cell` outside its declaration.
    pub fn touch(&mut self, cell: Cell, tag: &str, line: usize) {
        self.record(cell, tag, line, EventKind::Usage);
    }

    fn record(&mut self, cell: Cell, owner: &str, line: usize, kind: EventKind) {
        self.history.entry(cell).or_default().push(Event {
            owner: owner.to_string(),
            line,
            kind,
        });
    }

    pub fn is_allocated(&self, cell: Cell) -> bool {
        self.allocations.contains_key(&cell)
    }

    /// Every claim on `cell` in declaration order.
    pub fn allocations(&self, cell: Cell) -> &[Allocation] {
        self.allocations.get(&cell).map_or(&[], Vec::as_slice)
    }

    pub fn history(&self, cell: Cell) -> &[Event] {
        self.history.get(&cell).map_or(&[], Vec::as_slice)
    }

    pub fn current(&self, cell: Cell) -> Option<&Allocation> {
        self.allocations.get(&cell).and_then(|claims| claims.last())
    }

    /// Claimed cells in ascending order with all their claims.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &[Allocation])> + '_ {
        self.allocations
            .iter()
            .map(|(cell, claims)| (*cell, claims.as_slice()))
    }

    /// Cells that have a usage history, in ascending order.
    pub fn touched(&self) -> impl Iterator<Item = (Cell, &[Event])> + '_ {
        self.history
            .iter()
            .map(|(cell, events)| (*cell, events.as_slice()))
    }

    /// Latest allocation per cell, ascending by cell number.
    pub fn snapshot(&self) -> BTreeMap<Cell, CellInfo> {
        self.iter()
            .filter_map(|(cell, claims)| {
                let latest = claims.last()?;
                let info = CellInfo {
                    cell,
                    owner: latest.owner.clone(),
                    kind: latest.kind,
                    size: latest.size,
                };
                Some((cell, info))
            })
            .collect()
    }

    /// Cells with claims from two or more distinct owners.
    pub fn shared(&self) -> Vec<Shared> {
        let mut shared = vec![];
        for (cell, claims) in self.iter() {
            let owners: IndexSet<&str> = claims.iter().map(|claim| claim.owner.as_str()).collect();
            if owners.len() < 2 {
                continue;
            }
            if let Some(latest) = claims.last() {
                shared.push(Shared {
                    cell,
                    owners: owners.into_iter().map(str::to_string).collect(),
                    latest: latest.clone(),
                });
            }
        }
        shared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_claim_is_current() {
        let mut map = CellMap::new();
        map.allocate(0, "a", CellKind::INT, 1, 0);
        map.allocate(0, "b", CellKind::PTR, 2, 3);
        assert_eq!(map.allocations(0).len(), 2);
        assert_eq!(map.current(0).map(|claim| claim.owner.as_str()), Some("b"));
        assert_eq!(
            map.snapshot().get(&0),
            Some(&CellInfo {
                cell: 0,
                owner: "b".into(),
                kind: CellKind::PTR,
                size: 2
            })
        );
    }

    #[test]
    fn shared_needs_distinct_owners() {
        let mut map = CellMap::new();
        map.allocate(4, "a", CellKind::INT, 2, 0);
        map.allocate(4, "a", CellKind::INT, 2, 0);
        assert!(map.shared().is_empty());

        map.allocate(4, "b", CellKind::INT, 1, 1);
        map.allocate(4, "a", CellKind::INT, 1, 2);
        let shared = map.shared();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].owners, vec!["a", "b"]);
        assert_eq!(shared[0].latest.line, 2);
    }

    #[test]
    fn history_keeps_order() {
        let mut map = CellMap::new();
        map.allocate(1, "fd", CellKind::INT, 1, 0);
        map.touch(1, "MOV_source", 2);
        map.touch(9, "SET_operation", 3);
        let kinds: Vec<EventKind> = map.history(1).iter().map(|event| event.kind).collect();
        assert_eq!(kinds, vec![EventKind::Allocation, EventKind::Usage]);
        assert!(!map.is_allocated(9));
        assert_eq!(map.history(9).len(), 1);
        assert_eq!(EventKind::Usage.to_string(), "usage");
    }
}
