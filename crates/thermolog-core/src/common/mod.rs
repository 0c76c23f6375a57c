pub mod constants;
pub mod elements;

pub use elements::{MAX_ATOMIC_NUMBER, atomic_number_for_symbol, element_symbol};
