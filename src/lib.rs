//! gallery - photo gallery service with criteria-based queries
//!
//! List endpoints accept per-field filters (`equals`, `in`, `specified`,
//! ranges, `contains`). The filters compile into a single predicate tree
//! that the store evaluates, so every filter combination shares one query
//! path.

pub mod cli;
pub mod config;
pub mod criteria;
pub mod domain;
pub mod executor;
pub mod filter;
pub mod http_server;
pub mod observability;
pub mod planner;
pub mod rest_api;
pub mod search;
pub mod service;
pub mod storage;
