//! Metric collaborators of the preprocessed sequence.
//!
//! Metrics are selected by name at the boundary and dispatched through the
//! closed `MetricKind` enum:
//!
//! - `Metric` - Trait every metric implements
//! - `MetricKind` - Static dispatch over all supported metrics
//! - `Count` - Detection, id and frame counts
//! - `MetricResult` - Closed set of metric outputs

mod count;
mod dispatch;
mod traits;

pub use count::{Count, CountResult};
pub use dispatch::{MetricKind, MetricResult};
pub use traits::Metric;
