//! Prints the derived controller topology for a representative hybrid
//! DRAM/PCM configuration.

use hybrid_mem_core::{
    build_topology, ConfigError, TierChannelCounts, TierTechnologies, TopologyConfig,
};
use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

fn main() -> Result<(), ConfigError> {
    let config = TopologyConfig {
        total_size: 4 << 30,
        fast_tier_size: 1 << 30,
        cache_line_size: 64,
        channels: TierChannelCounts { slow: 1, fast: 1 },
        rank_override: Some(2),
        technologies: TierTechnologies {
            slow: "ddr3_1600_x64_pcm".to_owned(),
            fast: "ddr3_1600_x64".to_owned(),
        },
    };

    let topology = build_topology(&config)?;
    println!(
        "upstream port fanout: {}",
        topology.upstream_port().downstream_port_count
    );
    for (port, ctrl) in topology.controllers().iter().enumerate() {
        println!(
            "port {port}: {:?} ({:?}) range [{:#x}, {:#x}] interleave {} ranks {}",
            ctrl.technology,
            ctrl.family(),
            ctrl.address_range.start(),
            ctrl.address_range.end(),
            ctrl.interleave_bytes,
            ctrl.rank_count,
        );
    }
    Ok(())
}
