use super::constants::*;

/// Static sizing parameters of a heap.
///
/// Built once from the pointer multiplier while the heap is constructed and
/// passed by reference to every sizing routine. All sizes are derived with
/// saturating arithmetic, so an absurd multiplier pins them to `u64::MAX`
/// instead of wrapping around to something small. Fields are only reachable
/// through accessors, which keeps `min <= max` for every bound pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeapConfiguration {
    pointer_multiplier: u64,
    /// Heap page size in bytes.
    page_size: u64,
    /// Semi-space tiers, in KB.
    min_semi_space_size_kb: u32,
    medium_semi_space_size_kb: u32,
    max_semi_space_size_kb: u32,
    /// Old generation bounds, in bytes.
    min_old_generation_size: u64,
    max_old_generation_size: u64,
}

impl HeapConfiguration {
    pub fn new(pointer_multiplier: u64) -> Self {
        let pointer_multiplier = pointer_multiplier.max(1);
        let page_size_kb = PAGE_SIZE / KB;
        let semi_space_tier = |pages: u64| -> u32 {
            let kb = pointer_multiplier
                .saturating_mul(pages)
                .saturating_mul(page_size_kb);
            kb.min(u32::MAX as u64) as u32
        };
        Self {
            pointer_multiplier,
            page_size: PAGE_SIZE,
            min_semi_space_size_kb: semi_space_tier(MIN_SEMI_SPACE_PAGES),
            medium_semi_space_size_kb: semi_space_tier(MEDIUM_SEMI_SPACE_PAGES),
            max_semi_space_size_kb: semi_space_tier(MAX_SEMI_SPACE_PAGES),
            min_old_generation_size: MIN_OLD_GENERATION_SIZE_MB
                .saturating_mul(pointer_multiplier)
                .saturating_mul(MB),
            max_old_generation_size: MAX_OLD_GENERATION_SIZE_MB
                .saturating_mul(pointer_multiplier)
                .saturating_mul(MB),
        }
    }

    /// Configuration for a 32-bit address space.
    pub fn narrow() -> Self {
        Self::new(1)
    }

    /// Configuration for a 64-bit address space.
    pub fn wide() -> Self {
        Self::new(2)
    }

    pub fn pointer_multiplier(&self) -> u64 {
        self.pointer_multiplier
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn page_size_kb(&self) -> u32 {
        (self.page_size / KB) as u32
    }

    pub fn min_semi_space_size_kb(&self) -> u32 {
        self.min_semi_space_size_kb
    }

    pub fn medium_semi_space_size_kb(&self) -> u32 {
        self.medium_semi_space_size_kb
    }

    pub fn max_semi_space_size_kb(&self) -> u32 {
        self.max_semi_space_size_kb
    }

    pub fn min_old_generation_size(&self) -> u64 {
        self.min_old_generation_size
    }

    pub fn max_old_generation_size(&self) -> u64 {
        self.max_old_generation_size
    }
}

impl Default for HeapConfiguration {
    fn default() -> Self {
        Self::new(POINTER_MULTIPLIER)
    }
}
