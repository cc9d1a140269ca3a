//! Route assembly: timing, distances, and time window checks.

mod assembler;

pub use assembler::RouteAssembler;
