use crate::core::restraints::RestraintSet;
use crate::engine::error::RelaxError;
use nalgebra::{Point3, Vector3};

/// Below this separation the force direction is undefined and the restraint
/// is reported as degenerate rather than divided through.
pub const MIN_SEPARATION: f32 = 1e-6;

/// Accumulates the harmonic forces of one restraint set into `forces` and
/// returns the set's total potential energy.
///
/// Forces are added, never overwritten, so several restraint sets can be
/// superposed into the same buffer before integration. For each pair the
/// force on the two atoms is equal and opposite.
pub fn accumulate_harmonic_forces(
    coords: &[Point3<f32>],
    forces: &mut [Vector3<f32>],
    set: &RestraintSet,
) -> Result<f32, RelaxError> {
    let mut potential = 0.0f32;

    for restraint in set.iter() {
        let displacement = coords[restraint.atom_b] - coords[restraint.atom_a];
        let separation = displacement.norm();
        if separation < MIN_SEPARATION {
            return Err(RelaxError::DegenerateGeometry {
                atom_a: restraint.atom_a,
                atom_b: restraint.atom_b,
            });
        }

        let deviation = separation - restraint.rest_length;
        potential += 0.5 * restraint.spring_k * deviation * deviation;

        let scale = -restraint.spring_k * deviation / separation;
        forces[restraint.atom_a] -= scale * displacement;
        forces[restraint.atom_b] += scale * displacement;
    }

    Ok(potential)
}
