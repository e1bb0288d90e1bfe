//! Hybrid-memory address-space partitioning and controller-topology core.
//!
//! Takes a target physical address space and a capacity split between two
//! memory tiers, derives disjoint per-tier address ranges, builds immutable
//! controller descriptors with shared interleaving parameters, and merges
//! them behind a single upstream bus port. Construction is one-shot and
//! synchronous; every failure is a typed configuration error.

/// Address-range value object and the tier-split calculator.
pub mod range;
pub use range::{compute_ranges, AddressRange, TierRanges};

/// Channel-interleaving granularity policy.
pub mod interleave;
pub use interleave::{interleave_granularity, MIN_INTERLEAVE_BYTES};

/// Memory technology tags and controller-family resolution.
pub mod technology;
pub use technology::{TechnologyFamily, TechnologyKind, TECHNOLOGY_NAME_TABLE};

/// Per-tier controller descriptor assembly.
pub mod controller;
pub use controller::{create_controller, ControllerDescriptor, MemoryTierSpec};

/// Bus topology construction and address decode.
pub mod topology;
pub use topology::{
    build_topology, BusTopology, TierChannelCounts, TierTechnologies, TopologyConfig, UpstreamPort,
};

/// Configuration error taxonomy.
pub mod error;
pub use error::ConfigError;

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
