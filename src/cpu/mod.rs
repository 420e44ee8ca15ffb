//! # CPU Accounting
//!
//! Reads cumulative CPU time-in-state from the kernel accounting source and
//! converts it into active/idle tick pairs. One tick is 1/100 of a second.
//!
//! ```rust
//! use drain_metrics::cpu::parse_cpu_line;
//!
//! let times = parse_cpu_line("cpu  4705 356 584 3699 23 23 0 0 0 0").unwrap();
//! assert_eq!(times.idle_ticks, 3699);
//! ```

mod constants;
mod stat;
mod types;

pub use constants::*;
pub use stat::*;
pub use types::*;
