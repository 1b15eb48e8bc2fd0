#![forbid(unsafe_code)]

pub mod defaults;
pub mod filter;
pub mod model;
pub mod quiz;
pub mod shuffle;
pub mod study;
pub mod time;

pub use time::Clock;
