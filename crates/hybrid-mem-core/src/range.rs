//! Address-range arithmetic splitting one physical address space between two
//! memory tiers.

use crate::ConfigError;

/// Inclusive, byte-addressed range of physical addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct AddressRange {
    start: u64,
    end: u64,
}

impl AddressRange {
    /// Creates a range covering `start`, `end`, and every address between.
    ///
    /// Returns `None` when `end < start`; an `AddressRange` is never empty.
    #[must_use]
    pub const fn new(start: u64, end: u64) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// First byte address in the range.
    #[must_use]
    pub const fn start(self) -> u64 {
        self.start
    }

    /// Last byte address in the range.
    #[must_use]
    pub const fn end(self) -> u64 {
        self.end
    }

    /// Number of bytes the range covers.
    #[must_use]
    pub const fn size_bytes(self) -> u64 {
        self.end - self.start + 1
    }

    /// Returns `true` when `addr` falls inside the range.
    #[must_use]
    pub const fn contains(self, addr: u64) -> bool {
        addr >= self.start && addr <= self.end
    }

    /// Returns `true` when `self` and `other` share at least one address.
    #[must_use]
    pub const fn overlaps(self, other: Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Disjoint tier ranges produced by [`compute_ranges`]: the slow tier sits at
/// the bottom of the address space and the fast tier at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct TierRanges {
    /// Bottom-of-space range for the slow tier; absent when the fast tier
    /// covers the whole space.
    pub slow: Option<AddressRange>,
    /// Top-of-space range for the fast tier; absent when its capacity is zero.
    pub fast: Option<AddressRange>,
}

impl TierRanges {
    /// Number of present tier ranges.
    #[must_use]
    pub const fn present_count(&self) -> usize {
        let mut count = 0;
        if self.slow.is_some() {
            count += 1;
        }
        if self.fast.is_some() {
            count += 1;
        }
        count
    }

    /// Present ranges in deterministic attachment order: slow first, then
    /// fast.
    #[must_use]
    pub fn in_attachment_order(&self) -> impl Iterator<Item = AddressRange> {
        self.slow.into_iter().chain(self.fast)
    }
}

/// Splits `total_size` bytes of physical address space between a slow tier at
/// the bottom and a fast tier of `fast_tier_size` bytes at the top.
///
/// The fast tier always occupies the top of the address space, keeping the
/// faster technology nearest the region hot data migrates into. When one tier
/// covers the whole space the other range is absent. Present ranges are
/// contiguous, disjoint, and together cover exactly `[0, total_size - 1]`.
///
/// # Errors
///
/// Returns [`ConfigError::EmptyAddressSpace`] when `total_size` is zero and
/// [`ConfigError::TierOverflow`] when `fast_tier_size` exceeds `total_size`.
pub const fn compute_ranges(
    total_size: u64,
    fast_tier_size: u64,
) -> Result<TierRanges, ConfigError> {
    if total_size == 0 {
        return Err(ConfigError::EmptyAddressSpace);
    }
    if fast_tier_size > total_size {
        return Err(ConfigError::TierOverflow {
            total_size,
            fast_tier_size,
        });
    }

    let slow = if fast_tier_size == total_size {
        None
    } else {
        Some(AddressRange {
            start: 0,
            end: total_size - fast_tier_size - 1,
        })
    };
    let fast = if fast_tier_size == 0 {
        None
    } else {
        Some(AddressRange {
            start: total_size - fast_tier_size,
            end: total_size - 1,
        })
    };

    Ok(TierRanges { slow, fast })
}
