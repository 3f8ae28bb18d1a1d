use super::configuration::HeapConfiguration;
use super::constants::*;

/// Picks the semi-space capacity (in KB) for a device with `physical_memory`
/// bytes installed.
///
/// Devices are classified into three discrete tiers: under 1GB gets a single
/// page per pointer-multiplier, up to 2GB gets six, anything larger gets the
/// maximum. More memory than that doesn't buy a bigger young generation since
/// it only makes scavenges longer.
pub fn select_semi_space_size(config: &HeapConfiguration, physical_memory: u64) -> u32 {
    if physical_memory < LOW_MEMORY_DEVICE_THRESHOLD {
        config.min_semi_space_size_kb()
    } else if physical_memory < HIGH_MEMORY_DEVICE_THRESHOLD {
        config.medium_semi_space_size_kb()
    } else {
        config.max_semi_space_size_kb()
    }
}
