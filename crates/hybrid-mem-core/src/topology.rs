//! One-shot topology construction: partition the address space, create one
//! controller per present tier, and attach them behind a shared bus.

use crate::{
    compute_ranges, create_controller, interleave_granularity, ConfigError, ControllerDescriptor,
    MemoryTierSpec,
};

/// Per-tier channel counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct TierChannelCounts {
    /// Channels for the slow tier at the bottom of the address space.
    pub slow: u32,
    /// Channels for the fast tier at the top of the address space.
    pub fast: u32,
}

/// Per-tier technology identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct TierTechnologies {
    /// Technology identifier for the slow tier, e.g. `ddr3_1600_x64_pcm`.
    pub slow: String,
    /// Technology identifier for the fast tier, e.g. `ddr3_1600_x64`.
    pub fast: String,
}

/// Complete configuration surface consumed by [`build_topology`].
///
/// These fields are the persisted interface of the core; an external config
/// loader is responsible for parsing them before calling in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct TopologyConfig {
    /// Total physical address space size in bytes.
    pub total_size: u64,
    /// Capacity of the fast tier at the top of the address space, in bytes.
    pub fast_tier_size: u64,
    /// Cache-line-size hint used to derive the shared interleave granularity.
    pub cache_line_size: u32,
    /// Per-tier channel counts.
    pub channels: TierChannelCounts,
    /// Explicit ranks-per-channel override for DRAM-family tiers.
    pub rank_override: Option<u32>,
    /// Per-tier technology identifiers.
    pub technologies: TierTechnologies,
}

/// The bus's single upstream-facing port, bound by the caller to the parent
/// interconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct UpstreamPort {
    /// Number of downstream controller ports merged behind this port.
    pub downstream_port_count: usize,
}

/// Controller descriptors attached behind a shared virtual crossbar.
///
/// Attachment order is creation order (slow tier first, then fast) and doubles
/// as the downstream port index, so index-based port wiring stays
/// reproducible across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct BusTopology {
    controllers: Vec<ControllerDescriptor>,
}

impl BusTopology {
    /// Attached controller descriptors in downstream-port order.
    #[must_use]
    pub fn controllers(&self) -> &[ControllerDescriptor] {
        &self.controllers
    }

    /// Number of attached controllers.
    #[must_use]
    pub fn controller_count(&self) -> usize {
        self.controllers.len()
    }

    /// The single upstream port exposed to the rest of the system.
    #[must_use]
    pub fn upstream_port(&self) -> UpstreamPort {
        UpstreamPort {
            downstream_port_count: self.controllers.len(),
        }
    }

    /// Controller whose address range contains `addr`, or `None` when `addr`
    /// falls outside the configured address space.
    #[must_use]
    pub fn decode(&self, addr: u64) -> Option<&ControllerDescriptor> {
        self.controllers
            .iter()
            .find(|ctrl| ctrl.address_range.contains(addr))
    }
}

/// Builds the hybrid-memory bus topology for the configured address space.
///
/// The interleave granularity is computed once and shared by both tiers so
/// address decoding stays uniform across the combined space. The slow tier is
/// attached first and the fast tier second regardless of which tiers are
/// present, giving callers a stable downstream port order.
///
/// # Errors
///
/// Returns [`ConfigError::EmptyAddressSpace`] or [`ConfigError::TierOverflow`]
/// from the range split, [`ConfigError::UnknownTechnology`] from controller
/// creation, and [`ConfigError::NoControllers`] when no tier range is present.
pub fn build_topology(config: &TopologyConfig) -> Result<BusTopology, ConfigError> {
    let interleave_bytes = interleave_granularity(config.cache_line_size);
    let ranges = compute_ranges(config.total_size, config.fast_tier_size)?;

    let mut controllers = Vec::with_capacity(ranges.present_count());
    if let Some(range) = ranges.slow {
        let tier = MemoryTierSpec {
            technology: config.technologies.slow.clone(),
            capacity_bytes: range.size_bytes(),
            channel_count: config.channels.slow,
            rank_override: config.rank_override,
        };
        controllers.push(create_controller(&tier, range, 0, interleave_bytes)?);
    }
    if let Some(range) = ranges.fast {
        let tier = MemoryTierSpec {
            technology: config.technologies.fast.clone(),
            capacity_bytes: range.size_bytes(),
            channel_count: config.channels.fast,
            rank_override: config.rank_override,
        };
        controllers.push(create_controller(&tier, range, 0, interleave_bytes)?);
    }

    if controllers.is_empty() {
        return Err(ConfigError::NoControllers);
    }

    Ok(BusTopology { controllers })
}

#[cfg(test)]
mod tests {
    use super::{build_topology, TierChannelCounts, TierTechnologies, TopologyConfig};
    use crate::{ConfigError, TechnologyFamily, TechnologyKind};

    fn config(total_size: u64, fast_tier_size: u64) -> TopologyConfig {
        TopologyConfig {
            total_size,
            fast_tier_size,
            cache_line_size: 64,
            channels: TierChannelCounts { slow: 1, fast: 1 },
            rank_override: None,
            technologies: TierTechnologies {
                slow: "ddr3_1600_x64_pcm".to_owned(),
                fast: "ddr3_1600_x64".to_owned(),
            },
        }
    }

    #[test]
    fn hybrid_split_attaches_slow_then_fast() {
        let topology = build_topology(&config(4096, 1024)).expect("valid configuration");
        assert_eq!(topology.controller_count(), 2);

        let slow = &topology.controllers()[0];
        assert_eq!(slow.technology, TechnologyKind::Pcm);
        assert_eq!((slow.address_range.start(), slow.address_range.end()), (0, 3071));

        let fast = &topology.controllers()[1];
        assert_eq!(fast.technology, TechnologyKind::Ddr3);
        assert_eq!(
            (fast.address_range.start(), fast.address_range.end()),
            (3072, 4095)
        );

        assert_eq!(slow.interleave_bytes, 128);
        assert_eq!(fast.interleave_bytes, 128);
    }

    #[test]
    fn fast_only_configuration_yields_one_controller() {
        let topology = build_topology(&config(2048, 2048)).expect("valid configuration");
        assert_eq!(topology.controller_count(), 1);
        let ctrl = &topology.controllers()[0];
        assert_eq!(ctrl.technology, TechnologyKind::Ddr3);
        assert_eq!((ctrl.address_range.start(), ctrl.address_range.end()), (0, 2047));
    }

    #[test]
    fn slow_only_configuration_yields_one_controller() {
        let topology = build_topology(&config(2048, 0)).expect("valid configuration");
        assert_eq!(topology.controller_count(), 1);
        let ctrl = &topology.controllers()[0];
        assert_eq!(ctrl.technology, TechnologyKind::Pcm);
        assert_eq!((ctrl.address_range.start(), ctrl.address_range.end()), (0, 2047));
    }

    #[test]
    fn upstream_port_reports_downstream_fanout() {
        let both = build_topology(&config(4096, 1024)).expect("valid configuration");
        assert_eq!(both.upstream_port().downstream_port_count, 2);
        let single = build_topology(&config(2048, 0)).expect("valid configuration");
        assert_eq!(single.upstream_port().downstream_port_count, 1);
    }

    #[test]
    fn decode_routes_addresses_to_the_owning_controller() {
        let topology = build_topology(&config(4096, 1024)).expect("valid configuration");
        assert_eq!(
            topology.decode(0).expect("in range").technology,
            TechnologyKind::Pcm
        );
        assert_eq!(
            topology.decode(3071).expect("in range").technology,
            TechnologyKind::Pcm
        );
        assert_eq!(
            topology.decode(3072).expect("in range").technology,
            TechnologyKind::Ddr3
        );
        assert_eq!(
            topology.decode(4095).expect("in range").technology,
            TechnologyKind::Ddr3
        );
        assert!(topology.decode(4096).is_none());
    }

    #[test]
    fn rank_override_applies_per_tier_family() {
        let mut cfg = config(4096, 1024);
        cfg.rank_override = Some(4);
        let topology = build_topology(&cfg).expect("valid configuration");
        let slow = &topology.controllers()[0];
        let fast = &topology.controllers()[1];
        assert_eq!(slow.family(), TechnologyFamily::Nvm);
        assert_eq!(slow.rank_count, TechnologyKind::Pcm.default_rank_count());
        assert_eq!(fast.family(), TechnologyFamily::Dram);
        assert_eq!(fast.rank_count, 4);
    }

    #[test]
    fn configuration_errors_propagate_from_the_range_split() {
        assert_eq!(
            build_topology(&config(0, 0)),
            Err(ConfigError::EmptyAddressSpace)
        );
        assert_eq!(
            build_topology(&config(1024, 4096)),
            Err(ConfigError::TierOverflow {
                total_size: 1024,
                fast_tier_size: 4096,
            })
        );
    }

    #[test]
    fn unknown_tier_technology_aborts_the_build() {
        let mut cfg = config(4096, 1024);
        cfg.technologies.fast = "hbm2".to_owned();
        assert_eq!(
            build_topology(&cfg),
            Err(ConfigError::UnknownTechnology("hbm2".to_owned()))
        );
    }
}
