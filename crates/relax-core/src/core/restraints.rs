use super::geometry::distance;
use nalgebra::Point3;
use thiserror::Error;

/// Number of successors along the chain each atom is restrained to.
pub const CHAIN_WINDOW: usize = 23;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RestraintError {
    #[error("Rigid-body index {index} is outside the coordinate range 0..{n_atoms}")]
    AtomIndexOutOfRange { index: i32, n_atoms: usize },
    #[error(
        "Rigid-body intervals [{first_min}, {first_max}] and [{second_min}, {second_max}] overlap"
    )]
    OverlappingIntervals {
        first_min: usize,
        first_max: usize,
        second_min: usize,
        second_max: usize,
    },
}

/// One harmonic spring between two atoms, with a stiffness and a target
/// distance fixed at construction time from the reference conformation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Restraint {
    pub atom_a: usize,
    pub atom_b: usize,
    pub spring_k: f32,
    pub rest_length: f32,
}

/// An ordered collection of restraints built once per relaxation call.
///
/// Enumeration order is fixed so that floating-point force and energy
/// summation is reproducible across runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestraintSet {
    restraints: Vec<Restraint>,
}

impl RestraintSet {
    pub fn len(&self) -> usize {
        self.restraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restraints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Restraint> {
        self.restraints.iter()
    }
}

/// Two closed index intervals that together move as one rigid unit.
///
/// Endpoints may be given in either order; each interval is normalized to
/// `[min, max]` before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplexRange {
    pub first_start: i32,
    pub first_end: i32,
    pub second_start: i32,
    pub second_end: i32,
}

impl DuplexRange {
    pub fn new(first_start: i32, first_end: i32, second_start: i32, second_end: i32) -> Self {
        Self {
            first_start,
            first_end,
            second_start,
            second_end,
        }
    }

    /// Checks that every endpoint addresses a real atom and that the two
    /// intervals are disjoint (overlap would produce self-restraints).
    pub fn validate(&self, n_atoms: usize) -> Result<(), RestraintError> {
        for index in [
            self.first_start,
            self.first_end,
            self.second_start,
            self.second_end,
        ] {
            if index < 0 || index as usize >= n_atoms {
                return Err(RestraintError::AtomIndexOutOfRange { index, n_atoms });
            }
        }
        let (first_min, first_max, second_min, second_max) = self.normalized();
        if first_max >= second_min && second_max >= first_min {
            return Err(RestraintError::OverlappingIntervals {
                first_min,
                first_max,
                second_min,
                second_max,
            });
        }
        Ok(())
    }

    /// Interval bounds as `(first_min, first_max, second_min, second_max)`.
    /// Only meaningful after [`validate`](Self::validate) has passed.
    fn normalized(&self) -> (usize, usize, usize, usize) {
        (
            self.first_start.min(self.first_end).max(0) as usize,
            self.first_start.max(self.first_end).max(0) as usize,
            self.second_start.min(self.second_end).max(0) as usize,
            self.second_start.max(self.second_end).max(0) as usize,
        )
    }

    /// Number of atoms covered by both intervals together.
    fn span(&self) -> usize {
        let (first_min, first_max, second_min, second_max) = self.normalized();
        (first_max - first_min + 1) + (second_max - second_min + 1)
    }
}

/// Closed-form size of the chain restraint set for `n_atoms` particles.
///
/// With `n = min(CHAIN_WINDOW, n_atoms)` the banded enumeration below yields
/// exactly `n*(n_atoms - n) + (n*n - n)/2` pairs; degenerate systems
/// (`n_atoms` of 0 or 1) yield zero.
pub fn chain_pair_count(n_atoms: usize) -> usize {
    let n = CHAIN_WINDOW.min(n_atoms);
    n * (n_atoms - n) + (n * n - n) / 2
}

/// Closed-form size of the restraint set for one rigid body: every unordered
/// pair over the union of its two intervals, `(m*m - m)/2` for `m` atoms.
pub fn duplex_pair_count(range: &DuplexRange) -> usize {
    let m = range.span();
    (m * m - m) / 2
}

/// Builds the banded chain restraint set: each atom is connected to its next
/// up-to-[`CHAIN_WINDOW`] successors, preserving local backbone geometry.
/// Rest lengths are taken from the reference conformation.
pub fn build_chain_restraints(coords_ref: &[Point3<f32>], k_chain: f32) -> RestraintSet {
    let n_atoms = coords_ref.len();
    let window = CHAIN_WINDOW.min(n_atoms);
    let mut restraints = Vec::with_capacity(chain_pair_count(n_atoms));

    for i in 0..n_atoms.saturating_sub(1) {
        let last = (i + window).min(n_atoms - 1);
        for j in (i + 1)..=last {
            restraints.push(Restraint {
                atom_a: i,
                atom_b: j,
                spring_k: k_chain,
                rest_length: distance(&coords_ref[i], &coords_ref[j]),
            });
        }
    }

    debug_assert_eq!(restraints.len(), chain_pair_count(n_atoms));
    RestraintSet { restraints }
}

/// Builds the rigid-body restraint set: for each range, a fully connected
/// graph over the union of its two intervals (pairs within each interval plus
/// every cross pair), so the combined point set moves as one rigid unit.
pub fn build_rigid_restraints(
    coords_ref: &[Point3<f32>],
    ranges: &[DuplexRange],
    k_rigid: f32,
) -> Result<RestraintSet, RestraintError> {
    let n_atoms = coords_ref.len();
    let total: usize = ranges.iter().map(duplex_pair_count).sum();
    let mut restraints = Vec::with_capacity(total);

    let push = |restraints: &mut Vec<Restraint>, a: usize, b: usize| {
        restraints.push(Restraint {
            atom_a: a,
            atom_b: b,
            spring_k: k_rigid,
            rest_length: distance(&coords_ref[a], &coords_ref[b]),
        });
    };

    for range in ranges {
        range.validate(n_atoms)?;
        let (first_min, first_max, second_min, second_max) = range.normalized();

        for j in first_min..=first_max {
            for k in (j + 1)..=first_max {
                push(&mut restraints, j, k);
            }
            for k in second_min..=second_max {
                push(&mut restraints, j, k);
            }
        }
        for j in second_min..second_max {
            for k in (j + 1)..=second_max {
                push(&mut restraints, j, k);
            }
        }
    }

    debug_assert_eq!(restraints.len(), total);
    Ok(RestraintSet { restraints })
}
