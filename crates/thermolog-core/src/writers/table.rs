use super::{FAILED_FILE_NOTICE, display_name};
use crate::domain::{BatchEntry, BatchResult, Outcome, RelativeEnergies};

pub const TABLE_COLUMNS: [&str; 13] = [
    "File name",
    "Header",
    "Charge",
    "Multiplicity",
    "Imag",
    "E-tot (Hartree)",
    "E-tot / rel (kJ/mol)",
    "E-ok (Hartree)",
    "E-ok / rel (kJ/mol)",
    "H-298k (Hartree)",
    "H-298k / rel (kJ/mol)",
    "G-298k (Hartree)",
    "G-298k / rel (kJ/mol)",
];

/// Tab-separated relative-energy table, one row per input file.
pub fn render_table(batch: &BatchResult) -> String {
    let mut lines = Vec::with_capacity(batch.len() + 1);
    lines.push(TABLE_COLUMNS.join("\t"));
    lines.extend(batch.entries.iter().map(table_row));

    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}

fn table_row(entry: &BatchEntry) -> String {
    let record = match &entry.outcome {
        Outcome::Success(record) => record,
        Outcome::Failure(failure) => {
            return format!("{}\t{}", display_name(&failure.source_file), FAILED_FILE_NOTICE);
        }
    };

    let thermo = &record.thermo;
    let relative = |pick: fn(&RelativeEnergies) -> f64| {
        entry
            .relative
            .as_ref()
            .map(|values| format!("{:.1}", pick(values)))
            .unwrap_or_default()
    };

    [
        display_name(&record.source_file).to_string(),
        record.header.clone(),
        record.charge.to_string(),
        record.multiplicity.to_string(),
        record.imaginary_frequency.to_string(),
        format!("{:.6}", thermo.total_electronic_energy),
        relative(|values| values.total_electronic),
        format!("{:.6}", thermo.electronic_plus_zpe_energy),
        relative(|values| values.electronic_plus_zpe),
        format!("{:.6}", thermo.thermal_enthalpy),
        relative(|values| values.enthalpy),
        format!("{:.6}", thermo.thermal_free_energy),
        relative(|values| values.free_energy),
    ]
    .join("\t")
}
