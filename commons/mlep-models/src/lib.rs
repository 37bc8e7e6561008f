pub mod alarm;
pub mod endpoint;
pub mod invocation;
pub mod metadata;
pub mod metrics;

pub use alarm::*;
pub use endpoint::*;
pub use invocation::*;
pub use metadata::*;
pub use metrics::*;

/// Metric namespace the managed inference service publishes under.
pub const DEFAULT_METRIC_NAMESPACE: &str = "AWS/SageMaker";
