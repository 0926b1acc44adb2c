//! Predefined structures and unit systems.
//!
//! The solver itself is unit-agnostic; a [`UnitSystem`] only supplies a
//! consistent default elastic modulus (steel) and labels for reports.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::Support::{self, Free, Pinned, RollerY};
use crate::model::{Element, Load, Node, NodeId, Structure};

/// Cross-sectional area given to preset members.
pub const DEFAULT_AREA: f64 = 10.0;

/// A consistent set of force and length units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitSystem {
    /// Kilonewtons and metres.
    #[default]
    SiKnM,
    /// Newtons and millimetres.
    SiNMm,
    /// Kips and feet.
    Imperial,
}

impl UnitSystem {
    /// All unit systems.
    pub const ALL: [UnitSystem; 3] = [UnitSystem::SiKnM, UnitSystem::SiNMm, UnitSystem::Imperial];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            UnitSystem::SiKnM => "SI (kN, m)",
            UnitSystem::SiNMm => "SI (N, mm)",
            UnitSystem::Imperial => "Imperial (kip, ft)",
        }
    }

    /// Force unit label.
    #[must_use]
    pub const fn force_unit(self) -> &'static str {
        match self {
            UnitSystem::SiKnM => "kN",
            UnitSystem::SiNMm => "N",
            UnitSystem::Imperial => "kip",
        }
    }

    /// Length unit label.
    #[must_use]
    pub const fn length_unit(self) -> &'static str {
        match self {
            UnitSystem::SiKnM => "m",
            UnitSystem::SiNMm => "mm",
            UnitSystem::Imperial => "ft",
        }
    }

    /// Elastic modulus of steel in this system's stress unit.
    #[must_use]
    pub const fn steel_modulus(self) -> f64 {
        match self {
            UnitSystem::SiKnM => 210.0e6,
            UnitSystem::SiNMm => 210_000.0,
            UnitSystem::Imperial => 29_000.0,
        }
    }

    /// Command-line key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            UnitSystem::SiKnM => "si-kn-m",
            UnitSystem::SiNMm => "si-n-mm",
            UnitSystem::Imperial => "imperial",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        UnitSystem::ALL
            .into_iter()
            .find(|units| units.key() == value)
            .ok_or_else(|| {
                let keys: Vec<_> = UnitSystem::ALL.iter().map(|units| units.key()).collect();
                format!("unknown unit system '{value}', expected one of {}", keys.join(", "))
            })
    }
}

/// A named example structure.
#[derive(Clone, Copy, Debug)]
pub struct Preset {
    /// Lookup key.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Node coordinates and supports; node ids are positions plus one.
    nodes: &'static [(f64, f64, Support)],
    /// Members as pairs of node positions.
    members: &'static [(usize, usize)],
    /// Loads as `(node position, fx, fy)`.
    loads: &'static [(usize, f64, f64)],
}

impl Preset {
    /// Build the structure with steel members in `units`.
    #[must_use]
    pub fn structure(&self, units: UnitSystem) -> Structure {
        let modulus = units.steel_modulus();
        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .map(|(position, &(x, y, support))| {
                Node::new(one_based(position), x, y).with_support(support)
            })
            .collect();
        let elements = self
            .members
            .iter()
            .enumerate()
            .map(|(position, &(a, b))| {
                Element::new(
                    one_based(position),
                    one_based(a),
                    one_based(b),
                    modulus,
                    DEFAULT_AREA,
                )
            })
            .collect();
        let loads = self
            .loads
            .iter()
            .map(|&(node, fx, fy)| Load::new(one_based(node), fx, fy))
            .collect();
        Structure::new(nodes, elements, loads)
    }
}

/// Preset ids are one-based positions.
fn one_based(position: usize) -> NodeId {
    (position + 1) as NodeId
}

/// The built-in structures.
pub static PRESETS: [Preset; 4] = [
    Preset {
        key: "triangle",
        name: "Simple triangle",
        description: "Three members, a pin and a roller",
        nodes: &[(0.0, 0.0, Pinned), (4.0, 0.0, RollerY), (2.0, 3.0, Free)],
        members: &[(0, 1), (1, 2), (2, 0)],
        loads: &[(2, 0.0, -10.0)],
    },
    Preset {
        key: "warren",
        name: "Warren",
        description: "Classic bridge truss",
        nodes: &[
            (0.0, 0.0, Pinned),
            (2.0, 0.0, Free),
            (4.0, 0.0, Free),
            (6.0, 0.0, RollerY),
            (1.0, 1.5, Free),
            (3.0, 1.5, Free),
            (5.0, 1.5, Free),
        ],
        members: &[
            (0, 1),
            (1, 2),
            (2, 3),
            (4, 5),
            (5, 6),
            (0, 4),
            (4, 1),
            (1, 5),
            (5, 2),
            (2, 6),
            (6, 3),
        ],
        loads: &[(5, 0.0, -10.0)],
    },
    Preset {
        key: "pratt",
        name: "Pratt",
        description: "Industrial roof truss",
        nodes: &[
            (0.0, 0.0, Pinned),
            (2.0, 0.0, Free),
            (4.0, 0.0, Free),
            (6.0, 0.0, Free),
            (8.0, 0.0, RollerY),
            (0.0, 2.0, Free),
            (2.0, 2.0, Free),
            (4.0, 2.0, Free),
            (6.0, 2.0, Free),
            (8.0, 2.0, Free),
        ],
        members: &[
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (5, 6),
            (6, 7),
            (7, 8),
            (8, 9),
            (0, 5),
            (1, 6),
            (2, 7),
            (3, 8),
            (4, 9),
            (5, 1),
            (6, 2),
            (7, 3),
            (8, 4),
        ],
        loads: &[(7, 0.0, -15.0)],
    },
    Preset {
        key: "cantilever",
        name: "Cantilever",
        description: "Truss built out from a wall",
        nodes: &[
            (0.0, 0.0, Pinned),
            (0.0, 2.0, Pinned),
            (3.0, 0.0, Free),
            (3.0, 2.0, Free),
            (6.0, 0.0, Free),
            (6.0, 2.0, Free),
        ],
        members: &[
            (0, 2),
            (2, 4),
            (1, 3),
            (3, 5),
            (0, 1),
            (2, 3),
            (4, 5),
            (1, 2),
            (3, 4),
        ],
        loads: &[(4, 0.0, -10.0), (5, 0.0, -10.0)],
    },
];

/// Find a preset by key.
#[must_use]
pub fn preset(key: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.key == key)
}
