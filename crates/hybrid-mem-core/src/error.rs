use thiserror::Error;

/// Configuration errors detected while partitioning the address space and
/// assembling the controller topology.
///
/// All variants are synchronous, non-retryable build-time failures: the core
/// performs no I/O, so every error aborts construction immediately and is
/// surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ConfigError {
    /// The fast tier was configured larger than the whole address space.
    #[error("fast-tier capacity {fast_tier_size} exceeds total address space {total_size}")]
    TierOverflow {
        /// Total configured address space size in bytes.
        total_size: u64,
        /// Configured fast-tier capacity in bytes.
        fast_tier_size: u64,
    },
    /// The configured total address space is zero bytes.
    #[error("total address space size is zero")]
    EmptyAddressSpace,
    /// A technology identifier did not resolve to a known controller family.
    #[error("unknown memory technology `{0}`")]
    UnknownTechnology(String),
    /// No tier produced a controller, leaving nothing to attach to the bus.
    #[error("topology has no controllers to attach")]
    NoControllers,
}
