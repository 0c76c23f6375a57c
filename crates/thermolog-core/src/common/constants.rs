//! Unit conversions and heuristic thresholds shared by the extractors and
//! the batch ranking.

pub const HARTREE_TO_KJ_PER_MOL: f64 = 2_625.499_639_479_9_f64;

/// Low-frequency magnitudes below this (cm^-1) are rigid translation/rotation noise.
pub const IMAGINARY_FREQUENCY_THRESHOLD: f64 = 30.0;

pub const BOND_DISTANCE_CUTOFF: f64 = 1.95;
pub const HYDROGEN_BOND_CUTOFF: f64 = 0.5;
pub const HEAVY_ATOM_BOND_CUTOFF: f64 = 1.7;
pub const HEAVY_ATOM_MIN_ATOMIC_NUMBER: u32 = 18;

#[cfg(test)]
mod tests {
    use super::{
        BOND_DISTANCE_CUTOFF, HARTREE_TO_KJ_PER_MOL, HEAVY_ATOM_BOND_CUTOFF, HYDROGEN_BOND_CUTOFF,
    };

    #[test]
    fn hartree_conversion_matches_codata_value() {
        assert!((HARTREE_TO_KJ_PER_MOL - 2625.4996394799).abs() <= 1.0e-10);
    }

    #[test]
    fn element_specific_cutoffs_are_tighter_than_the_generic_one() {
        assert!(HYDROGEN_BOND_CUTOFF < BOND_DISTANCE_CUTOFF);
        assert!(HEAVY_ATOM_BOND_CUTOFF < BOND_DISTANCE_CUTOFF);
    }
}
