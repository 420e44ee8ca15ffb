#![allow(dead_code)]

pub mod builders;

pub use builders::counters::ScriptedCounters;
pub use builders::power::TestProfileBuilder;
pub use builders::proc_files::ProcFixture;
