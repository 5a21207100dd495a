//! Presence analyzer turns a log of daily clock-in/clock-out times into per weekday statistics.
//! The data file is parsed into an immutable [storage::entities::Dataset], cached for a fixed
//! amount of time and aggregated on demand, either through the JSON API or the command line.
//!

pub mod analysis;
pub mod cli;
pub mod server;
pub mod storage;
pub mod utils;
