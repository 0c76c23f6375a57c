use crate::common::constants::{
    BOND_DISTANCE_CUTOFF, HEAVY_ATOM_BOND_CUTOFF, HEAVY_ATOM_MIN_ATOMIC_NUMBER,
    HYDROGEN_BOND_CUTOFF,
};
use crate::domain::{AtomRecord, Geometry};
use serde::Serialize;
use std::collections::BTreeSet;

/// Unordered bonded pair keyed as (lower index, higher index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BondPair {
    pub first: usize,
    pub second: usize,
}

impl BondPair {
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            first: a.min(b),
            second: a.max(b),
        }
    }
}

/// One accepting ordered evaluation, as handed to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BondSegment {
    pub from: usize,
    pub to: usize,
}

/// Evaluates a contact from `from`'s side only.
///
/// The hydrogen cutoff is far below a typical X-H bond length; the contact is
/// still drawn because the partner atom's own evaluation accepts it.
pub fn accepts_bond(from: &AtomRecord, distance: f64) -> bool {
    if from.atomic_number == 1 && distance > HYDROGEN_BOND_CUTOFF {
        return false;
    }
    if from.atomic_number >= HEAVY_ATOM_MIN_ATOMIC_NUMBER && distance > HEAVY_ATOM_BOND_CUTOFF {
        return false;
    }
    distance < BOND_DISTANCE_CUTOFF
}

/// Raw segment list: a contact accepted from both sides appears twice.
pub fn bond_segments(geometry: &Geometry) -> Vec<BondSegment> {
    let atoms = &geometry.atoms;
    let mut segments = Vec::new();
    for (from, origin) in atoms.iter().enumerate() {
        for (to, target) in atoms.iter().enumerate() {
            if from == to {
                continue;
            }
            let distance = distance3(origin.position(), target.position());
            if accepts_bond(origin, distance) {
                segments.push(BondSegment { from, to });
            }
        }
    }
    segments
}

pub fn compute_bonds(geometry: &Geometry) -> BTreeSet<BondPair> {
    bond_segments(geometry)
        .into_iter()
        .map(|segment| BondPair::new(segment.from, segment.to))
        .collect()
}

/// End points of each segment, for line rendering.
pub fn segment_coordinates(geometry: &Geometry, segments: &[BondSegment]) -> Vec<[[f64; 3]; 2]> {
    segments
        .iter()
        .filter_map(|segment| {
            let from = geometry.atoms.get(segment.from)?;
            let to = geometry.atoms.get(segment.to)?;
            Some([from.position(), to.position()])
        })
        .collect()
}

fn distance3(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}
