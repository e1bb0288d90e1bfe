#![no_main]

use hybrid_mem_core::{
    build_topology, TechnologyKind, TierChannelCounts, TierTechnologies, TopologyConfig,
    TECHNOLOGY_NAME_TABLE,
};
use libfuzzer_sys::fuzz_target;

fn technology(selector: u8) -> String {
    let (name, _) = TECHNOLOGY_NAME_TABLE[usize::from(selector) % TECHNOLOGY_NAME_TABLE.len()];
    name.to_owned()
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 24 {
        return;
    }

    let total_size = u64::from_be_bytes(data[0..8].try_into().unwrap());
    let fast_tier_size = u64::from_be_bytes(data[8..16].try_into().unwrap());
    let cache_line_size = u32::from_be_bytes(data[16..20].try_into().unwrap());

    let config = TopologyConfig {
        total_size,
        fast_tier_size,
        cache_line_size,
        channels: TierChannelCounts {
            slow: u32::from(data[20]),
            fast: u32::from(data[21]),
        },
        rank_override: (data[22] != 0).then_some(u32::from(data[22])),
        technologies: TierTechnologies {
            slow: technology(data[23]),
            fast: technology(data[23].wrapping_add(1)),
        },
    };

    let Ok(topology) = build_topology(&config) else {
        return;
    };

    assert!(topology.controller_count() >= 1);
    assert_eq!(
        topology.upstream_port().downstream_port_count,
        topology.controller_count()
    );

    let controllers = topology.controllers();
    let covered: u64 = controllers
        .iter()
        .map(|ctrl| ctrl.address_range.size_bytes())
        .sum();
    assert_eq!(covered, total_size);
    for pair in controllers.windows(2) {
        assert!(!pair[0].address_range.overlaps(pair[1].address_range));
        assert!(pair[0].address_range.end() < pair[1].address_range.start());
    }
    for ctrl in controllers {
        assert!(ctrl.interleave_bytes >= 128);
        assert!(TechnologyKind::resolve(ctrl.technology.config_name()).is_ok());
    }
});
