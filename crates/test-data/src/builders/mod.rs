//! Fluent builder APIs for test scenarios.
//!
//! The [`ScenarioBuilder`] assembles a complete meet: a host club, an event
//! catalog, a roster, individual entries and relay teams.

mod scenario;

pub use scenario::{Scenario, ScenarioBuilder, ScenarioMetrics};
