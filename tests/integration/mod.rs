#![allow(missing_docs)]

mod proc_source;
mod session;
