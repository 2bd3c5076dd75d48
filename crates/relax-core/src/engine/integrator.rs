use crate::core::restraints::RestraintSet;
use crate::engine::config::RelaxConfig;
use crate::engine::error::RelaxError;
use crate::engine::forces::accumulate_harmonic_forces;
use nalgebra::{Point3, Vector3};
use tracing::trace;

/// Runs the damped explicit-Euler relaxation loop over `coords` in place and
/// returns the potential energy of the final step (0.0 if no steps ran).
///
/// Momentum and force buffers are scoped to this call; nothing persists
/// between invocations. Each step zeroes the force buffer, superposes every
/// restraint set into it, advances momenta and positions, then attenuates
/// momenta so the system bleeds kinetic energy toward a local minimum.
pub fn run(
    coords: &mut [Point3<f32>],
    restraint_sets: &[&RestraintSet],
    config: &RelaxConfig,
) -> Result<f32, RelaxError> {
    let n_atoms = coords.len();
    let mut momenta = vec![Vector3::zeros(); n_atoms];
    let mut forces = vec![Vector3::zeros(); n_atoms];
    let mut potential = 0.0f32;

    for step in 0..config.iterations() {
        for force in forces.iter_mut() {
            *force = Vector3::zeros();
        }

        potential = 0.0;
        for set in restraint_sets {
            potential += accumulate_harmonic_forces(coords, &mut forces, set)?;
        }

        for j in 0..n_atoms {
            momenta[j] += config.step_size * forces[j];
            coords[j] += config.step_size * momenta[j] / config.particle_mass;
        }

        for momentum in momenta.iter_mut() {
            *momentum *= config.momentum_scale;
        }

        trace!(step, potential, "Integration step complete.");
    }

    Ok(potential)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::restraints::build_chain_restraints;

    fn stretched_pair() -> (Vec<Point3<f32>>, RestraintSet) {
        let coords_ref = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let chain = build_chain_restraints(&coords_ref, 10.0);
        let coords = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)];
        (coords, chain)
    }

    fn pair_distance(coords: &[Point3<f32>]) -> f32 {
        (coords[1] - coords[0]).norm()
    }

    #[test]
    fn zero_iteration_budget_is_a_no_op() {
        let (mut coords, chain) = stretched_pair();
        let before = coords.clone();
        let mut config = RelaxConfig::default();
        config.resource_limit = 0.0;
        let energy = run(&mut coords, &[&chain], &config).unwrap();
        assert_eq!(coords, before);
        assert_eq!(energy, 0.0);
    }

    #[test]
    fn zero_stiffness_moves_nothing_regardless_of_budget() {
        let coords_ref = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let chain = build_chain_restraints(&coords_ref, 0.0);
        let mut coords = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(5.0, 0.0, 0.0)];
        let before = coords.clone();
        let mut config = RelaxConfig::default();
        config.resource_limit = 200.0;
        run(&mut coords, &[&chain], &config).unwrap();
        assert_eq!(coords, before);
    }

    #[test]
    fn pair_at_rest_length_does_not_move() {
        let coords_ref = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.25, 0.0, 0.0)];
        let chain = build_chain_restraints(&coords_ref, 5.0);
        let mut coords = coords_ref.clone();
        let mut config = RelaxConfig::default();
        config.resource_limit = 1.0;
        run(&mut coords, &[&chain], &config).unwrap();
        assert_eq!(coords, coords_ref);
    }

    #[test]
    fn stretched_pair_contracts_toward_its_rest_length() {
        let (mut coords, chain) = stretched_pair();
        let initial_deviation = (pair_distance(&coords) - 1.0).abs();
        let mut config = RelaxConfig::default();
        config.resource_limit = 100.0;
        run(&mut coords, &[&chain], &config).unwrap();
        let final_deviation = (pair_distance(&coords) - 1.0).abs();
        assert!(final_deviation < initial_deviation);
    }

    #[test]
    fn relaxation_is_deterministic_across_runs() {
        let (coords_template, chain) = stretched_pair();
        let mut config = RelaxConfig::default();
        config.resource_limit = 50.0;

        let mut first = coords_template.clone();
        run(&mut first, &[&chain], &config).unwrap();
        let mut second = coords_template.clone();
        run(&mut second, &[&chain], &config).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn repeated_runs_keep_moving_a_strained_system() {
        let (mut coords, chain) = stretched_pair();
        let mut config = RelaxConfig::default();
        config.resource_limit = 10.0;
        run(&mut coords, &[&chain], &config).unwrap();
        let after_first = coords.clone();
        run(&mut coords, &[&chain], &config).unwrap();
        assert_ne!(coords, after_first);
    }

    #[test]
    fn fractional_budget_truncates_to_the_same_step_count() {
        let (coords_template, chain) = stretched_pair();

        let mut whole = coords_template.clone();
        let mut config = RelaxConfig::default();
        config.resource_limit = 3.0;
        run(&mut whole, &[&chain], &config).unwrap();

        let mut fractional = coords_template.clone();
        config.resource_limit = 3.9;
        run(&mut fractional, &[&chain], &config).unwrap();

        assert_eq!(whole, fractional);
    }

    #[test]
    fn final_energy_decreases_for_a_strained_pair() {
        let (mut coords, chain) = stretched_pair();
        let mut config = RelaxConfig::default();
        config.resource_limit = 1.0;
        let first_energy = run(&mut coords, &[&chain], &config).unwrap();
        config.resource_limit = 200.0;
        let relaxed_energy = run(&mut coords, &[&chain], &config).unwrap();
        assert!(relaxed_energy < first_energy);
    }
}
