//! basketbridge-core: the BasketBridge metrics and scenario engine.
//!
//! Pure, synchronous, and deterministic. The server crate layers the HTTP
//! surface and the upstream model call on top; nothing here touches the
//! network or holds mutable state.

pub mod dataset;
pub mod error;
pub mod gate;
pub mod metrics;
pub mod prompt;
pub mod scenario;
pub mod types;

pub use dataset::{CategoryMix, Dataset, Hierarchy, MetricSet};
pub use error::{CoreError, CoreResult};
