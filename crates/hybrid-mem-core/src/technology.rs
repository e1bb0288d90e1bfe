//! Memory technology tags and controller-family resolution.

use crate::ConfigError;

/// Controller family a technology resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum TechnologyFamily {
    /// DRAM-family controllers with per-rank modeling.
    Dram,
    /// Non-volatile technologies without per-rank modeling.
    Nvm,
}

/// Concrete memory technologies known to the topology builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum TechnologyKind {
    /// Single DDR3-1600 x64 channel in an 8x8 device configuration, timings
    /// based on a 4 Gbit datasheet.
    Ddr3,
    /// Single DDR4-2400 x64 channel.
    Ddr4,
    /// Single LPDDR3-1600 x32 channel.
    Lpddr3,
    /// Phase-change memory on a DDR3-1600-style channel with stretched
    /// activate and precharge timings, after Lee et al., "Architecting phase
    /// change memory as a scalable DRAM alternative" (ISCA 2009).
    Pcm,
}

/// Single source-of-truth table mapping configured technology identifiers to
/// kinds.
pub const TECHNOLOGY_NAME_TABLE: &[(&str, TechnologyKind)] = &[
    ("ddr3_1600_x64", TechnologyKind::Ddr3),
    ("ddr4_2400_x64", TechnologyKind::Ddr4),
    ("lpddr3_1600_x32", TechnologyKind::Lpddr3),
    ("ddr3_1600_x64_pcm", TechnologyKind::Pcm),
];

impl TechnologyKind {
    /// Resolves a configured technology identifier to a known kind.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownTechnology`] when `name` does not map to
    /// a known controller family.
    pub fn resolve(name: &str) -> Result<Self, ConfigError> {
        TECHNOLOGY_NAME_TABLE
            .iter()
            .find_map(|(entry, kind)| (*entry == name).then_some(*kind))
            .ok_or_else(|| ConfigError::UnknownTechnology(name.to_owned()))
    }

    /// Controller family this technology belongs to.
    #[must_use]
    pub const fn family(self) -> TechnologyFamily {
        match self {
            Self::Ddr3 | Self::Ddr4 | Self::Lpddr3 => TechnologyFamily::Dram,
            Self::Pcm => TechnologyFamily::Nvm,
        }
    }

    /// Ranks per channel used when no explicit override applies.
    #[must_use]
    pub const fn default_rank_count(self) -> u32 {
        match self {
            Self::Ddr3 | Self::Ddr4 => 2,
            Self::Lpddr3 | Self::Pcm => 1,
        }
    }

    /// Canonical configuration identifier for this kind.
    #[must_use]
    pub const fn config_name(self) -> &'static str {
        match self {
            Self::Ddr3 => "ddr3_1600_x64",
            Self::Ddr4 => "ddr4_2400_x64",
            Self::Lpddr3 => "lpddr3_1600_x32",
            Self::Pcm => "ddr3_1600_x64_pcm",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{ConfigError, TechnologyFamily, TechnologyKind, TECHNOLOGY_NAME_TABLE};

    #[test]
    fn table_contains_unique_names_and_kinds() {
        let names: HashSet<_> = TECHNOLOGY_NAME_TABLE.iter().map(|(name, _)| *name).collect();
        let kinds: HashSet<_> = TECHNOLOGY_NAME_TABLE.iter().map(|(_, kind)| *kind).collect();
        assert_eq!(names.len(), TECHNOLOGY_NAME_TABLE.len());
        assert_eq!(kinds.len(), TECHNOLOGY_NAME_TABLE.len());
    }

    #[test]
    fn every_kind_resolves_from_its_canonical_name() {
        for (name, kind) in TECHNOLOGY_NAME_TABLE {
            assert_eq!(TechnologyKind::resolve(name), Ok(*kind));
            assert_eq!(kind.config_name(), *name);
        }
    }

    #[test]
    fn unknown_identifiers_are_rejected_with_the_offending_name() {
        assert_eq!(
            TechnologyKind::resolve("hbm2"),
            Err(ConfigError::UnknownTechnology("hbm2".to_owned()))
        );
        assert_eq!(
            TechnologyKind::resolve(""),
            Err(ConfigError::UnknownTechnology(String::new()))
        );
    }

    #[test]
    fn family_classification_separates_dram_from_nvm() {
        assert_eq!(TechnologyKind::Ddr3.family(), TechnologyFamily::Dram);
        assert_eq!(TechnologyKind::Ddr4.family(), TechnologyFamily::Dram);
        assert_eq!(TechnologyKind::Lpddr3.family(), TechnologyFamily::Dram);
        assert_eq!(TechnologyKind::Pcm.family(), TechnologyFamily::Nvm);
    }

    #[test]
    fn default_rank_counts_match_channel_configurations() {
        assert_eq!(TechnologyKind::Ddr3.default_rank_count(), 2);
        assert_eq!(TechnologyKind::Ddr4.default_rank_count(), 2);
        assert_eq!(TechnologyKind::Lpddr3.default_rank_count(), 1);
        assert_eq!(TechnologyKind::Pcm.default_rank_count(), 1);
    }
}
