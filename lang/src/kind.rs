use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Type annotation of a `PARAM` declaration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, EnumString, Display,
)]
pub enum DataKind {
    #[default]
    INT,
    STRUCT,
    PTR,
}

impl DataKind {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.parse::<Self>() {
            Ok(kind) => Ok(kind),
            Err(_) => Err(format!("Unknown data type: {s}")),
        }
    }
}

/// What claimed a cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, EnumString, Display,
)]
pub enum CellKind {
    #[default]
    INT,
    STRUCT,
    PTR,
    SYSCALL,
}

impl From<DataKind> for CellKind {
    fn from(kind: DataKind) -> Self {
        match kind {
            DataKind::INT => CellKind::INT,
            DataKind::STRUCT => CellKind::STRUCT,
            DataKind::PTR => CellKind::PTR,
        }
    }
}
