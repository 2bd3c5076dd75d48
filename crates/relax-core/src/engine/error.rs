use crate::core::restraints::RestraintError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RelaxError {
    #[error(
        "Coordinate buffers disagree: {coords} current vs {reference} reference positions"
    )]
    CoordinateMismatch { coords: usize, reference: usize },

    #[error("Restraint construction failed: {source}")]
    Restraint {
        #[from]
        source: RestraintError,
    },

    #[error("Degenerate geometry: atoms {atom_a} and {atom_b} are coincident")]
    DegenerateGeometry { atom_a: usize, atom_b: usize },
}
