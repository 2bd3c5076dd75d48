use crate::core::restraints::{DuplexRange, build_chain_restraints, build_rigid_restraints};
use crate::engine::config::RelaxConfig;
use crate::engine::error::RelaxError;
use crate::engine::integrator;
use nalgebra::Point3;
use tracing::{Level, debug, enabled, info, instrument, trace};

/// Summary of one completed relaxation call.
///
/// The in-place mutation of the coordinate buffer is the call's contract;
/// the report only surfaces counters and the last step's potential energy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelaxReport {
    pub steps: usize,
    pub chain_restraints: usize,
    pub rigid_restraints: usize,
    pub final_energy: f32,
}

/// Relaxes `coords` toward the reference conformation in place.
///
/// Chain restraints connect each atom to its sequence neighbors; every
/// `DuplexRange` additionally welds two index intervals into one rigid unit.
/// Rest lengths come from `coords_ref`, which is never mutated. The borrow of
/// `coords` ends with the call; no state survives between invocations, so the
/// function is freely reentrant.
#[instrument(skip_all, name = "relax_workflow")]
pub fn run(
    coords: &mut [Point3<f32>],
    coords_ref: &[Point3<f32>],
    duplex_ranges: &[DuplexRange],
    config: &RelaxConfig,
) -> Result<RelaxReport, RelaxError> {
    if coords.len() != coords_ref.len() {
        return Err(RelaxError::CoordinateMismatch {
            coords: coords.len(),
            reference: coords_ref.len(),
        });
    }

    let chain = build_chain_restraints(coords_ref, config.k_chain);
    let rigid = build_rigid_restraints(coords_ref, duplex_ranges, config.k_rigid)?;
    debug!(
        n_atoms = coords.len(),
        chain_restraints = chain.len(),
        rigid_restraints = rigid.len(),
        "Built restraint sets."
    );
    if enabled!(Level::TRACE) {
        for restraint in chain.iter() {
            trace!(
                atom_a = restraint.atom_a,
                atom_b = restraint.atom_b,
                rest_length = restraint.rest_length,
                "Chain restraint."
            );
        }
    }

    let final_energy = integrator::run(coords, &[&chain, &rigid], config)?;

    let report = RelaxReport {
        steps: config.iterations(),
        chain_restraints: chain.len(),
        rigid_restraints: rigid.len(),
        final_energy,
    };
    info!(
        steps = report.steps,
        final_energy = report.final_energy,
        "Relaxation complete."
    );
    Ok(report)
}
