use super::configuration::HeapConfiguration;
use super::constants::*;

/// Computes the old generation ceiling for a device with `physical_memory`
/// bytes installed.
///
/// A quarter of physical memory (scaled by the pointer multiplier) is offered
/// to the old generation and then clamped to the configured bounds. This is
/// only the ceiling; the heap still grows towards it cycle by cycle.
pub fn compute_max_old_generation_size(config: &HeapConfiguration, physical_memory: u64) -> u64 {
    let proposed = (physical_memory / PHYSICAL_MEMORY_TO_OLD_GENERATION_RATIO)
        .saturating_mul(config.pointer_multiplier());
    proposed
        .min(config.max_old_generation_size())
        .max(config.min_old_generation_size())
}
