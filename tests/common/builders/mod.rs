pub mod counters;
pub mod power;
