use crate::types::Callback;
use uuid::Uuid;

/// Anything that can be registered as a sink of a publisher.
pub trait Notifiable<T>: Sync + Send {
    fn get_callback(&self) -> Callback<T>;
    fn set_id(&mut self, id: Uuid);
    fn get_id(&self) -> Option<Uuid>;
}
