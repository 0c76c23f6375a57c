use crate::common::constants::HARTREE_TO_KJ_PER_MOL;
use crate::domain::{MoleculeRecord, Outcome, RelativeEnergies, ThermoRecord};

/// Result of the batch-wide reduction. `relative` is index-aligned with the
/// outcomes it was computed from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedEnergies {
    pub reference: Option<usize>,
    pub relative: Vec<Option<RelativeEnergies>>,
}

/// Index of the successful record with the lowest total electronic energy;
/// the earliest one wins a tie.
pub fn reference_index(outcomes: &[Outcome]) -> Option<usize> {
    outcomes
        .iter()
        .enumerate()
        .filter_map(|(index, outcome)| {
            outcome
                .as_success()
                .map(|record| (index, record.thermo.total_electronic_energy))
        })
        .fold(None, |best: Option<(usize, f64)>, (index, energy)| match best {
            Some((_, best_energy)) if best_energy <= energy => best,
            _ => Some((index, energy)),
        })
        .map(|(index, _)| index)
}

/// Needs the whole batch: the reference is only known once every outcome
/// has been materialized.
pub fn rank(outcomes: &[Outcome]) -> RankedEnergies {
    let reference = reference_index(outcomes);
    let reference_thermo = reference
        .and_then(|index| outcomes[index].as_success())
        .map(|record| record.thermo);

    let relative = outcomes
        .iter()
        .map(|outcome| {
            let record = outcome.as_success()?;
            reference_thermo.map(|thermo| relative_energies(&thermo, record))
        })
        .collect();

    RankedEnergies {
        reference,
        relative,
    }
}

pub fn relative_energies(reference: &ThermoRecord, record: &MoleculeRecord) -> RelativeEnergies {
    let thermo = &record.thermo;
    RelativeEnergies {
        total_electronic: relative_kj_per_mol(
            reference.total_electronic_energy,
            thermo.total_electronic_energy,
        ),
        electronic_plus_zpe: relative_kj_per_mol(
            reference.electronic_plus_zpe_energy,
            thermo.electronic_plus_zpe_energy,
        ),
        enthalpy: relative_kj_per_mol(reference.thermal_enthalpy, thermo.thermal_enthalpy),
        free_energy: relative_kj_per_mol(reference.thermal_free_energy, thermo.thermal_free_energy),
    }
}

/// |reference - value| converted from Hartree to kJ/mol, one decimal.
pub fn relative_kj_per_mol(reference: f64, value: f64) -> f64 {
    round_to_tenth((reference - value).abs() * HARTREE_TO_KJ_PER_MOL)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
