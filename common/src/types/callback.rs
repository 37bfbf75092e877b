use std::sync::Arc;
use uuid::Uuid;

/// Sink invoked with the id it was registered under and the published item.
pub type Callback<T> = Arc<dyn Fn(Uuid, Arc<T>) + Send + Sync>;
