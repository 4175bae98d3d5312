// Library for tests to access modules

pub mod aggregator;
pub mod assembler;
pub mod chart;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod routes;
pub mod upstream_repo;
pub mod version;
