//! # RelaxMD Core Library
//!
//! A small, deterministic relaxation kernel for strained chain geometries (RNA
//! backbone refinement): coordinates are pulled toward a reference conformation
//! by harmonic restraints along the chain and within designated rigid bodies,
//! integrated with a damped explicit-Euler scheme.
//!
//! ## Architectural Philosophy
//!
//! The library keeps a strict layering so the numerical kernel stays pure,
//! testable, and callable from any host:
//!
//! - **[`core`]: The Foundation.** Stateless building blocks — geometry
//!   utilities and the restraint data model with its pair-list builders.
//!
//! - **[`engine`]: The Logic Core.** Configuration, the error taxonomy, the
//!   harmonic force evaluator, and the bounded-iteration integrator.
//!
//! - **[`workflows`]: The Public API.** The highest-level entry point. It
//!   validates caller buffers, builds the restraint sets once, and drives the
//!   integrator over the caller's coordinates in place.

pub mod core;
pub mod engine;
pub mod workflows;
