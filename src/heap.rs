use configuration::HeapConfiguration;
use constants::*;
use growing::{heap_growing_factor, max_growing_factor};
use old_generation::compute_max_old_generation_size;
use semi_space::select_semi_space_size;
use std::sync::atomic::{AtomicU64, Ordering};
use util::align_u64;

use crate::runtime::options::Options;

pub mod configuration;
pub mod constants;
pub mod growing;
pub mod old_generation;
pub mod semi_space;
pub mod util;

/// How eagerly the old generation is allowed to grow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryMode {
    /// Growth is decided by the heuristics alone.
    Normal,
    /// Low memory device (under `LOW_MEMORY_DEVICE_THRESHOLD`) or memory
    /// pressure: growth is capped at
    /// `MEMORY_CONSTRAINED_GROWING_FACTOR`.
    MemoryConstrained,
    /// Optimizing for footprint: growth is capped at
    /// `CONSERVATIVE_GROWING_FACTOR`.
    GrowSlowly,
    /// Shrink as much as possible: always `MIN_GROWING_FACTOR`.
    ReduceMemory,
}

/// Sizing state of a generational heap.
///
/// Derives the semi-space capacity and the old generation ceiling from
/// physical memory once at construction and maintains the old generation
/// allocation limit across collection cycles. Cycle updates and
/// reconfiguration take `&mut self` and must run while mutators are stopped;
/// the limit itself is published with release ordering so any thread may poll
/// it through `&self`.
pub struct Heap {
    config: HeapConfiguration,
    options: Options,
    physical_memory: u64,
    semi_space_size_kb: u32,
    max_old_generation_size: u64,
    old_generation_allocation_limit: AtomicU64,
    memory_mode: MemoryMode,
}

impl Heap {
    pub fn new(options: Options) -> Self {
        Self::with_configuration(HeapConfiguration::default(), options)
    }

    pub fn with_configuration(config: HeapConfiguration, options: Options) -> Self {
        let physical_memory = options
            .physical_memory
            .unwrap_or_else(wtf_rs::physical_memory::physical_memory);
        let memory_mode = if options.optimize_for_size {
            MemoryMode::GrowSlowly
        } else if physical_memory < LOW_MEMORY_DEVICE_THRESHOLD {
            MemoryMode::MemoryConstrained
        } else {
            MemoryMode::Normal
        };
        let mut heap = Self {
            config,
            options,
            physical_memory,
            semi_space_size_kb: 0,
            max_old_generation_size: 0,
            old_generation_allocation_limit: AtomicU64::new(0),
            memory_mode,
        };
        heap.configure(physical_memory);
        let initial_limit = heap.max_old_generation_size / INITIAL_OLD_GENERATION_LIMIT_FACTOR;
        heap.publish_old_generation_allocation_limit(initial_limit);

        log_if!(
            heap.options.verbose_gc,
            "- Heap configured for {}MB of physical memory: semi-space {}KB, old generation max {}MB, initial limit {}MB",
            physical_memory / MB,
            heap.semi_space_size_kb,
            heap.max_old_generation_size / MB,
            initial_limit / MB
        );
        heap
    }

    /// Derives the static sizes for `physical_memory`. Size options take
    /// precedence over the heuristics but are kept inside the configured
    /// bounds.
    fn configure(&mut self, physical_memory: u64) {
        let config = &self.config;
        self.physical_memory = physical_memory;

        self.semi_space_size_kb = match self.options.max_semi_space_size {
            Some(bytes) => {
                let kb = align_u64(bytes, config.page_size()) / KB;
                (kb.min(config.max_semi_space_size_kb() as u64) as u32)
                    .max(config.min_semi_space_size_kb())
            }
            None => select_semi_space_size(config, physical_memory),
        };

        self.max_old_generation_size = match self.options.max_old_space_size {
            Some(bytes) => align_u64(bytes, MB)
                .min(config.max_old_generation_size())
                .max(config.min_old_generation_size()),
            None => compute_max_old_generation_size(config, physical_memory),
        };

        log::debug!(
            "heap sizing: physical memory {} bytes, semi-space {}KB, old generation max {} bytes",
            physical_memory,
            self.semi_space_size_kb,
            self.max_old_generation_size
        );
    }

    fn publish_old_generation_allocation_limit(&self, limit: u64) {
        self.old_generation_allocation_limit
            .store(limit, Ordering::Release);
    }

    /// Updates the old generation allocation limit after a collection that
    /// left `old_generation_size` live bytes. Returns the growing factor that
    /// was applied.
    pub fn set_old_generation_allocation_limit(
        &mut self,
        old_generation_size: u64,
        gc_speed: f64,
        mutator_speed: f64,
    ) -> f64 {
        let max_factor = max_growing_factor(&self.config, old_generation_size);
        let mut factor = heap_growing_factor(gc_speed, mutator_speed, max_factor);

        match self.memory_mode {
            MemoryMode::Normal => {}
            MemoryMode::MemoryConstrained => {
                factor = factor.min(MEMORY_CONSTRAINED_GROWING_FACTOR);
            }
            MemoryMode::GrowSlowly => {
                factor = factor.min(CONSERVATIVE_GROWING_FACTOR);
            }
            MemoryMode::ReduceMemory => {
                factor = MIN_GROWING_FACTOR;
            }
        }

        if self.options.heap_growing_percent > 0 {
            factor = (1.0 + self.options.heap_growing_percent as f64 / 100.0)
                .min(MAX_GROWING_FACTOR)
                .max(MIN_GROWING_FACTOR);
        }

        let limit = self.calculate_old_generation_allocation_limit(factor, old_generation_size);
        self.publish_old_generation_allocation_limit(limit);

        log::trace!(
            "heap sizing: gc speed {}, mutator speed {}, max factor {:.3}, factor {:.3}",
            gc_speed,
            mutator_speed,
            max_factor,
            factor
        );
        log_if!(
            self.options.verbose_gc,
            "- Grow: old generation {:.3}KiB, factor {:.3} (max {:.3}), new limit {:.3}KiB",
            old_generation_size as f64 / 1024.0,
            factor,
            max_factor,
            limit as f64 / 1024.0
        );
        factor
    }

    /// Limit for an old generation of `old_generation_size` bytes grown by
    /// `factor`. Grows by at least `minimum_allocation_limit_growing_step`,
    /// leaves room for one semi-space worth of promotion and never goes past
    /// halfway between the current size and the maximum.
    pub fn calculate_old_generation_allocation_limit(
        &self,
        factor: f64,
        old_generation_size: u64,
    ) -> u64 {
        // `as` saturates float to int conversions.
        let mut limit = (old_generation_size as f64 * factor) as u64;
        limit = limit.max(
            old_generation_size.saturating_add(self.minimum_allocation_limit_growing_step()),
        );
        limit = limit.saturating_add(self.semi_space_size());
        let halfway_to_the_max =
            ((old_generation_size as u128 + self.max_old_generation_size as u128) / 2) as u64;
        limit.min(halfway_to_the_max)
    }

    pub fn minimum_allocation_limit_growing_step(&self) -> u64 {
        let step = if self.memory_mode == MemoryMode::Normal {
            REGULAR_ALLOCATION_LIMIT_GROWING_STEP
        } else {
            LOW_MEMORY_ALLOCATION_LIMIT_GROWING_STEP
        };
        self.config.page_size().max(MB).saturating_mul(step)
    }

    /// Current limit as published by the last collection.
    pub fn old_generation_allocation_limit(&self) -> u64 {
        self.old_generation_allocation_limit.load(Ordering::Acquire)
    }

    /// Whether an old generation of `old_generation_size` bytes has reached
    /// the allocation limit and a full collection should start.
    pub fn old_generation_limit_reached(&self, old_generation_size: u64) -> bool {
        old_generation_size >= self.old_generation_allocation_limit()
    }

    /// Re-derives the static sizes after the host reported a new amount of
    /// available memory. Must run at a safepoint.
    pub fn memory_pressure_notification(&mut self, physical_memory: u64) {
        let previous = self.physical_memory;
        self.configure(physical_memory);

        if physical_memory < previous && self.memory_mode == MemoryMode::Normal {
            self.memory_mode = MemoryMode::MemoryConstrained;
        }

        let limit = self
            .old_generation_allocation_limit()
            .min(self.max_old_generation_size);
        self.publish_old_generation_allocation_limit(limit);

        log_if!(
            self.options.verbose_gc,
            "- Memory pressure: {}MB -> {}MB physical memory, old generation max {}MB, limit {:.3}KiB, mode {:?}",
            previous / MB,
            physical_memory / MB,
            self.max_old_generation_size / MB,
            limit as f64 / 1024.0,
            self.memory_mode
        );
    }

    pub fn set_memory_mode(&mut self, mode: MemoryMode) {
        self.memory_mode = mode;
    }

    pub fn memory_mode(&self) -> MemoryMode {
        self.memory_mode
    }

    pub fn configuration(&self) -> &HeapConfiguration {
        &self.config
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn physical_memory(&self) -> u64 {
        self.physical_memory
    }

    pub fn semi_space_size_kb(&self) -> u32 {
        self.semi_space_size_kb
    }

    /// Semi-space capacity in bytes.
    pub fn semi_space_size(&self) -> u64 {
        self.semi_space_size_kb as u64 * KB
    }

    pub fn max_old_generation_size(&self) -> u64 {
        self.max_old_generation_size
    }
}
