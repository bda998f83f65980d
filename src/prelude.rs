pub use crate::builder::LfuCacheBuilder;
pub use crate::ds::{Arena, FrequencyIndex, Handle, LinkedList, ProbeTable};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::policy::lfu::LfuCache;
pub use crate::traits::{CoreCache, LfuCacheTrait, MutableCache};

#[cfg(feature = "concurrency")]
pub use crate::policy::lfu::ConcurrentLfuCache;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::LfuMetricsSnapshot;
