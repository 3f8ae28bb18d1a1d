use std::num::ParseIntError;

/// Parses sizes like `512KB`, `64mb`, `2GB` or a plain byte count.
/// Oversized values saturate at `u64::MAX`.
pub fn parse_size_from_str(s: &str) -> Result<u64, ParseIntError> {
    let s = s.trim().to_lowercase();
    let (number, unit) = s.split_at(s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len()));
    let multiplier: u64 = match unit {
        "kb" | "k" => 1024,
        "mb" | "m" => 1024 * 1024,
        "gb" | "g" => 1024 * 1024 * 1024,
        "" | "b" => 1,
        // not a unit we know, let the integer parser report it
        _ => return s.parse::<u64>(),
    };

    number
        .parse::<u64>()
        .map(|x| x.saturating_mul(multiplier))
}

use structopt::StructOpt;

#[derive(Debug, StructOpt, Clone, PartialEq)]
#[structopt(name = "heap-sizing", about = "Heap sizing options")]
pub struct Options {
    #[structopt(
        long = "physical-memory",
        help = "Use this amount of physical memory instead of querying the host",
        parse(try_from_str = parse_size_from_str)
    )]
    pub physical_memory: Option<u64>,
    #[structopt(
        long = "max-semi-space-size",
        help = "Set maximum semi-space size (rounded up to whole pages)",
        parse(try_from_str = parse_size_from_str)
    )]
    pub max_semi_space_size: Option<u64>,
    #[structopt(
        long = "max-old-space-size",
        help = "Set maximum old generation size (rounded up to whole megabytes)",
        parse(try_from_str = parse_size_from_str)
    )]
    pub max_old_space_size: Option<u64>,
    #[structopt(
        long = "heap-growing-percent",
        help = "Grow the old generation by this percentage after each GC instead of using heuristics",
        default_value = "0"
    )]
    pub heap_growing_percent: u32,
    #[structopt(
        long = "optimize-for-size",
        help = "Grow the heap slowly, favoring footprint over throughput"
    )]
    pub optimize_for_size: bool,
    #[structopt(long = "verbose-gc", help = "Enable verbose GC logging")]
    pub verbose_gc: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            physical_memory: None,
            max_semi_space_size: None,
            max_old_space_size: None,
            heap_growing_percent: 0,
            optimize_for_size: false,
            verbose_gc: false,
        }
    }
}

impl Options {
    pub fn with_physical_memory(mut self, bytes: u64) -> Self {
        self.physical_memory = Some(bytes);
        self
    }

    pub fn with_max_semi_space_size(mut self, bytes: u64) -> Self {
        self.max_semi_space_size = Some(bytes);
        self
    }

    pub fn with_max_old_space_size(mut self, bytes: u64) -> Self {
        self.max_old_space_size = Some(bytes);
        self
    }

    pub fn with_heap_growing_percent(mut self, percent: u32) -> Self {
        self.heap_growing_percent = percent;
        self
    }

    pub fn with_optimize_for_size(mut self, enable: bool) -> Self {
        self.optimize_for_size = enable;
        self
    }

    pub fn with_verbose_gc(mut self, enable: bool) -> Self {
        self.verbose_gc = enable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sizes() {
        assert_eq!(parse_size_from_str("512"), Ok(512));
        assert_eq!(parse_size_from_str("512KB"), Ok(512 * 1024));
        assert_eq!(parse_size_from_str("64mb"), Ok(64 * 1024 * 1024));
        assert_eq!(parse_size_from_str("2GB"), Ok(2 * 1024 * 1024 * 1024));
        assert_eq!(parse_size_from_str(" 8g "), Ok(8 * 1024 * 1024 * 1024));
        assert_eq!(parse_size_from_str("100b"), Ok(100));
    }

    #[test]
    fn parse_size_saturates() {
        assert_eq!(parse_size_from_str("18446744073709551615GB"), Ok(u64::MAX));
    }

    #[test]
    fn parse_size_rejects_garbage() {
        assert!(parse_size_from_str("").is_err());
        assert!(parse_size_from_str("GB").is_err());
        assert!(parse_size_from_str("12parsecs").is_err());
        assert!(parse_size_from_str("-1MB").is_err());
    }

    #[test]
    fn options_from_args() {
        let options = Options::from_iter(&[
            "heap-sizing",
            "--physical-memory",
            "4GB",
            "--max-old-space-size",
            "512MB",
            "--heap-growing-percent",
            "50",
            "--optimize-for-size",
            "--verbose-gc",
        ]);
        assert_eq!(options.physical_memory, Some(4 * 1024 * 1024 * 1024));
        assert_eq!(options.max_old_space_size, Some(512 * 1024 * 1024));
        assert_eq!(options.max_semi_space_size, None);
        assert_eq!(options.heap_growing_percent, 50);
        assert!(options.optimize_for_size);
        assert!(options.verbose_gc);
    }

    #[test]
    fn default_options_match_empty_args() {
        assert_eq!(Options::from_iter(&["heap-sizing"]), Options::default());
    }

    #[test]
    fn malformed_size_is_rejected() {
        let result = Options::from_iter_safe(&["heap-sizing", "--physical-memory", "lots"]);
        assert!(result.is_err());
    }

    #[test]
    fn builders() {
        let options = Options::default()
            .with_physical_memory(1024)
            .with_max_semi_space_size(2048)
            .with_max_old_space_size(4096)
            .with_heap_growing_percent(10)
            .with_optimize_for_size(true)
            .with_verbose_gc(true);
        assert_eq!(options.physical_memory, Some(1024));
        assert_eq!(options.max_semi_space_size, Some(2048));
        assert_eq!(options.max_old_space_size, Some(4096));
        assert_eq!(options.heap_growing_percent, 10);
        assert!(options.optimize_for_size);
        assert!(options.verbose_gc);
    }
}
