pub mod bonds;
pub mod ranking;
pub mod serialization;

pub use bonds::{BondPair, BondSegment, bond_segments, compute_bonds, segment_coordinates};
pub use ranking::{RankedEnergies, rank, reference_index, relative_energies};
