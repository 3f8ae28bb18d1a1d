pub const KB: u64 = 1024;
pub const MB: u64 = 1024 * KB;
pub const GB: u64 = 1024 * MB;

/// Size of a heap page. Semi-space tiers are whole multiples of it.
pub const PAGE_SIZE: u64 = 512 * KB;

/// 1 on 32-bit targets, 2 on 64-bit ones. Every size constant below is scaled
/// by it because wider pointers make the same object graph take more bytes.
pub const POINTER_MULTIPLIER: u64 = (core::mem::size_of::<usize>() / 4) as u64;

/// Physical memory below this is a low-memory device and gets the smallest
/// semi-space.
pub const LOW_MEMORY_DEVICE_THRESHOLD: u64 = GB;
/// Physical memory at or above this gets the largest semi-space.
pub const HIGH_MEMORY_DEVICE_THRESHOLD: u64 = 2 * GB;

/// Semi-space tiers in pages (multiplied by the pointer multiplier).
pub const MIN_SEMI_SPACE_PAGES: u64 = 1;
pub const MEDIUM_SEMI_SPACE_PAGES: u64 = 6;
pub const MAX_SEMI_SPACE_PAGES: u64 = 16;

/// Old generation bounds in MB (multiplied by the pointer multiplier).
pub const MIN_OLD_GENERATION_SIZE_MB: u64 = 128;
pub const MAX_OLD_GENERATION_SIZE_MB: u64 = 1024;

/// The old generation may use up to 1/N of physical memory.
pub const PHYSICAL_MEMORY_TO_OLD_GENERATION_RATIO: u64 = 4;

/// Before the first collection the limit is 1/N of the old generation maximum.
pub const INITIAL_OLD_GENERATION_LIMIT_FACTOR: u64 = 2;

pub const MIN_GROWING_FACTOR: f64 = 1.1;
pub const MAX_GROWING_FACTOR: f64 = 4.0;
pub const MEMORY_CONSTRAINED_GROWING_FACTOR: f64 = 2.0;
pub const CONSERVATIVE_GROWING_FACTOR: f64 = 1.3;

/// Fraction of wall-clock time the mutator should get between collections.
/// The growing factor is derived from it.
pub const TARGET_MUTATOR_UTILIZATION: f64 = 0.97;

/// Minimum growth of the allocation limit, in units of `max(PAGE_SIZE, MB)`.
pub const REGULAR_ALLOCATION_LIMIT_GROWING_STEP: u64 = 8;
pub const LOW_MEMORY_ALLOCATION_LIMIT_GROWING_STEP: u64 = 2;
