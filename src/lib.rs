//! `ntc-index` library crate.
//!
//! Annual Accumulated Cyclone Energy and Net Tropical Cyclone activity from revised
//! best-track records and operational ("cone") forecasts.
//!
//! The binary (`ntc`) is a thin wrapper around this library so that:
//!
//! - the aggregation pipeline is testable against in-memory data sources
//! - the data source stays swappable behind `data::StormSource`

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod ntc;
pub mod operational;
pub mod report;
pub mod season;
