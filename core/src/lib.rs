pub mod addressing;
pub mod audit;
pub mod config;
pub mod determinism;
pub mod naming;
pub mod registry;

pub mod error;
