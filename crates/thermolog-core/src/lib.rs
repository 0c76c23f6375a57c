//! Extraction of thermochemistry and final geometries from Gaussian
//! frequency-calculation logs, with batch ranking by relative energy.

pub mod common;
pub mod domain;
pub mod modules;
pub mod parser;
pub mod pipelines;
pub mod writers;
