//! Channel-interleaving policy shared by every attached controller.

/// Minimum byte stride at which consecutive addresses spread across channels.
pub const MIN_INTERLEAVE_BYTES: u32 = 128;

/// Derives the channel-interleave granularity from a cache-line-size hint.
///
/// Channels interleave on 128-byte granularity, or cache-line granularity if
/// larger, so a single line never straddles two channels. The 128-byte floor
/// is based on the locality seen across a large range of workloads; it is a
/// fixed policy, not tunable per call.
#[must_use]
pub const fn interleave_granularity(cache_line_size: u32) -> u32 {
    if cache_line_size > MIN_INTERLEAVE_BYTES {
        cache_line_size
    } else {
        MIN_INTERLEAVE_BYTES
    }
}
