//! Heap sizing heuristics for a generational garbage collector.
//!
//! Decides how large the young generation (semi-space) and the old generation
//! may get on the current host, and how far the old generation allocation
//! limit may grow after each collection.
#[macro_export]
macro_rules! log_if {
    ($val: expr,$($rest:tt)*) => {
        if $val {
            eprintln!($($rest)*);
        }
    };
}
pub mod heap;
pub mod runtime;

pub use heap::configuration::HeapConfiguration;
pub use heap::{Heap, MemoryMode};
pub use runtime::options::Options;
