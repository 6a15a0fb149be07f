pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod generate;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod profile;
pub mod stats;
pub mod storage;
