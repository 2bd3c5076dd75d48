//! C ABI bridge for the relaxation kernel.
//!
//! Hosts hand in flat caller-owned buffers: `3 * n_atoms` floats per
//! coordinate array and `4 * n_rigid_bodies` ints describing duplex ranges.
//! The current-coordinate buffer is mutated in place; everything else is
//! read-only. The return value is a status code, 0 on success.

use nalgebra::Point3;
use relaxmd::core::restraints::DuplexRange;
use relaxmd::engine::config::RelaxConfig;
use relaxmd::engine::error::RelaxError;
use relaxmd::workflows::relax;
use std::os::raw::{c_float, c_int};

/// Null pointer or negative count.
pub const STATUS_BAD_POINTER: c_int = -1;
/// Input validation failed (mismatched lengths, bad duplex range).
pub const STATUS_INVALID_ARGUMENT: c_int = -2;
/// Two restrained atoms became coincident during integration.
pub const STATUS_DEGENERATE_GEOMETRY: c_int = -3;

fn unpack_coordinates(flat: &[c_float]) -> Vec<Point3<f32>> {
    flat.chunks_exact(3)
        .map(|c| Point3::new(c[0], c[1], c[2]))
        .collect()
}

fn print_coordinate_table(coords: &[Point3<f32>]) {
    for (i, c) in coords.iter().enumerate() {
        eprintln!("{i:3}: {:7.3} {:7.3} {:7.3}", c.x, c.y, c.z);
    }
}

/// Relaxes `coords` toward `coords_ref` under chain and rigid-body harmonic
/// restraints. See the crate docs for the buffer layout contract.
///
/// `resource_limit` is the iteration budget (fractional values truncate
/// toward zero). When `verbose` is nonzero the coordinate table is printed to
/// stderr before and after relaxation.
///
/// # Safety
///
/// `coords` and `coords_ref` must point to `3 * n_atoms` readable floats
/// (`coords` also writable), and `rigid_bodies` to `4 * n_rigid_bodies`
/// readable ints, all valid for the duration of the call and unaliased by
/// concurrent writers.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn relax_coordinates(
    n_atoms: c_int,
    coords: *mut c_float,
    coords_ref: *const c_float,
    resource_limit: c_float,
    n_rigid_bodies: c_int,
    rigid_bodies: *const c_int,
    k_chain: c_float,
    k_rigid: c_float,
    verbose: c_int,
) -> c_int {
    if coords.is_null() || coords_ref.is_null() || n_atoms < 0 || n_rigid_bodies < 0 {
        return STATUS_BAD_POINTER;
    }
    if n_rigid_bodies > 0 && rigid_bodies.is_null() {
        return STATUS_BAD_POINTER;
    }

    let n_atoms = n_atoms as usize;
    let n_rigid_bodies = n_rigid_bodies as usize;

    let coords_flat = unsafe { std::slice::from_raw_parts_mut(coords, 3 * n_atoms) };
    let coords_ref_flat = unsafe { std::slice::from_raw_parts(coords_ref, 3 * n_atoms) };
    let ranges_flat = if n_rigid_bodies > 0 {
        unsafe { std::slice::from_raw_parts(rigid_bodies, 4 * n_rigid_bodies) }
    } else {
        &[]
    };

    // nalgebra's point layout is not a documented ABI contract, so the flat
    // buffers are copied into owned vectors rather than reinterpreted.
    let mut positions = unpack_coordinates(coords_flat);
    let reference = unpack_coordinates(coords_ref_flat);
    let ranges: Vec<DuplexRange> = ranges_flat
        .chunks_exact(4)
        .map(|r| DuplexRange::new(r[0], r[1], r[2], r[3]))
        .collect();

    let config = RelaxConfig {
        k_chain,
        k_rigid,
        resource_limit,
        ..RelaxConfig::default()
    };

    if verbose != 0 {
        print_coordinate_table(&positions);
    }

    let status = match relax::run(&mut positions, &reference, &ranges, &config) {
        Ok(_) => 0,
        Err(RelaxError::DegenerateGeometry { .. }) => STATUS_DEGENERATE_GEOMETRY,
        Err(_) => STATUS_INVALID_ARGUMENT,
    };
    if status != 0 {
        return status;
    }

    for (slot, p) in coords_flat.chunks_exact_mut(3).zip(positions.iter()) {
        slot[0] = p.x;
        slot[1] = p.y;
        slot[2] = p.z;
    }

    if verbose != 0 {
        print_coordinate_table(&positions);
    }
    0
}
