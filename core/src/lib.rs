pub mod check;
pub mod dataset;
pub mod error;
pub mod model;
pub mod strategy;

// Runner-facing scaffolding: context, allocation tracking, export
pub mod perf;
pub mod report;

pub use check::check_size;
pub use dataset::{Dataset, parse_scale};
pub use error::{JoinError, JoinResult};
pub use model::{Customer, CustomerAggregate, CustomerPreference, JoinedRow};
pub use strategy::StrategyKind;
