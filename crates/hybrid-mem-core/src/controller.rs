//! Controller-descriptor assembly for one memory tier.

use crate::{AddressRange, ConfigError, TechnologyFamily, TechnologyKind};

/// Immutable configuration for one memory tier, consumed once when its
/// controller descriptor is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MemoryTierSpec {
    /// Configured technology identifier, resolved against
    /// [`crate::TECHNOLOGY_NAME_TABLE`].
    pub technology: String,
    /// Tier capacity in bytes.
    pub capacity_bytes: u64,
    /// Number of channels the tier's addresses interleave across.
    pub channel_count: u32,
    /// Explicit ranks-per-channel override, honored for DRAM-family
    /// technologies only.
    pub rank_override: Option<u32>,
}

/// Immutable record describing one memory controller's technology, address
/// range, and channel/rank configuration.
///
/// Descriptors are owned by the topology after creation and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ControllerDescriptor {
    /// Resolved memory technology driven by this controller.
    pub technology: TechnologyKind,
    /// Disjoint slice of the physical address space this controller decodes.
    pub address_range: AddressRange,
    /// Byte stride at which consecutive addresses spread across channels.
    pub interleave_bytes: u32,
    /// Index of this controller among the tier's channels.
    pub channel_index: u32,
    /// Total channels the tier's addresses interleave across.
    pub channel_count: u32,
    /// Ranks per channel after any override was applied.
    pub rank_count: u32,
}

impl ControllerDescriptor {
    /// Controller family of the technology behind this descriptor.
    #[must_use]
    pub const fn family(&self) -> TechnologyFamily {
        self.technology.family()
    }

    /// Channel serving `addr` under the interleave stride, or `None` when
    /// `addr` is outside the controller's range or the interleave parameters
    /// are degenerate.
    #[must_use]
    pub fn channel_of(&self, addr: u64) -> Option<u32> {
        if !self.address_range.contains(addr)
            || self.channel_count == 0
            || self.interleave_bytes == 0
        {
            return None;
        }
        let stride = (addr - self.address_range.start()) / u64::from(self.interleave_bytes);
        u32::try_from(stride % u64::from(self.channel_count)).ok()
    }
}

/// Builds the controller descriptor for one memory tier.
///
/// Pure assembly: nothing is mutated beyond the returned descriptor. The
/// tier's `rank_override` applies only when the technology resolves to the
/// DRAM family; non-DRAM technologies keep their default rank count and the
/// override is silently ignored.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownTechnology`] when the tier's technology
/// identifier does not resolve to a known controller family.
pub fn create_controller(
    tier: &MemoryTierSpec,
    range: AddressRange,
    channel_index: u32,
    interleave_bytes: u32,
) -> Result<ControllerDescriptor, ConfigError> {
    let technology = TechnologyKind::resolve(&tier.technology)?;
    let rank_count = match (technology.family(), tier.rank_override) {
        (TechnologyFamily::Dram, Some(ranks)) => ranks,
        (TechnologyFamily::Dram | TechnologyFamily::Nvm, _) => technology.default_rank_count(),
    };

    Ok(ControllerDescriptor {
        technology,
        address_range: range,
        interleave_bytes,
        channel_index,
        channel_count: tier.channel_count,
        rank_count,
    })
}
