pub mod geometry;
pub mod restraints;
