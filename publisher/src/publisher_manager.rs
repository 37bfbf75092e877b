use dashmap::DashMap;
use std::cmp::Eq;
use std::hash::Hash;
use std::sync::Arc;
use uuid::Uuid;

use crate::publisher::{Publishable, Publisher, PublisherError};
use common::traits::publisher::Notifiable;

/// Manages one publisher per key and the listeners registered to each of them.
/// Every listener id is mapped back to its key, so listeners can be removed knowing
/// only their id.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use uuid::Uuid;
/// use common::SensorKind;
/// use publisher::{Listener, PublisherManager};
///
/// // Create PublisherManager with one publisher per sensor kind
/// let manager = PublisherManager::<f64, SensorKind>::new(&SensorKind::ALL);
///
/// // add listener to existing Accelerometer publisher
/// let mut listener = Listener::new(|_id: Uuid, value: Arc<f64>| println!("{}", value));
/// let id = manager.add_listener(&mut listener, &SensorKind::Accelerometer).unwrap();
/// assert_eq!(manager.listener_count(&SensorKind::Accelerometer), 1);
///
/// // remove listener from Accelerometer publisher
/// assert_eq!(manager.remove_listener(id).unwrap(), SensorKind::Accelerometer);
/// ```
pub struct PublisherManager<T, S>
where
    S: Hash + Eq,
{
    publishers: Arc<DashMap<S, Publisher<T>>>,
    control: Arc<DashMap<Uuid, S>>,
}

impl<T, S> Clone for PublisherManager<T, S>
where
    S: Hash + Eq,
{
    fn clone(&self) -> Self {
        Self {
            publishers: self.publishers.clone(),
            control: self.control.clone(),
        }
    }
}

impl<T, S> PublisherManager<T, S>
where
    T: Send + Sync + 'static,
    S: Send + Sync + Hash + Eq + Clone + Ord,
{
    pub fn new(publisher_types: &[S]) -> Self {
        let collection = DashMap::<S, Publisher<T>>::new();
        for publisher_type in publisher_types {
            collection.insert(publisher_type.clone(), Publisher::new());
        }

        Self {
            publishers: Arc::new(collection),
            control: Arc::new(DashMap::new()),
        }
    }

    pub fn add_publisher(&self, publisher_type: S) {
        self.publishers
            .entry(publisher_type)
            .or_insert_with(Publisher::new);
    }

    pub fn remove_publisher(&self, publisher_type: &S) {
        if let Some((_, publisher)) = self.publishers.remove(publisher_type) {
            publisher.unregister_all();
            self.control.retain(|_, key| key != publisher_type);
        }
    }

    pub fn get_available_publisher_types(&self) -> Vec<S> {
        let mut publisher_types: Vec<S> = self
            .publishers
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        publisher_types.sort();
        publisher_types
    }

    /// Returns a handle sharing the listeners of the publisher registered under `publisher_type`.
    pub fn get_publisher(&self, publisher_type: &S) -> Option<Publisher<T>> {
        self.publishers
            .get(publisher_type)
            .map(|publisher| publisher.value().clone())
    }

    pub fn add_listener(
        &self,
        listener: &mut dyn Notifiable<T>,
        publisher_type: &S,
    ) -> Result<Uuid, PublisherError> {
        let publisher = self
            .publishers
            .get(publisher_type)
            .ok_or(PublisherError::PublisherNotFound)?;
        let id = publisher.register_listener(listener);
        self.control.insert(id, publisher_type.clone());
        Ok(id)
    }

    /// Removes a listener and returns the key of the publisher it was registered to.
    pub fn remove_listener(&self, id: Uuid) -> Result<S, PublisherError> {
        let (_, publisher_type) = self
            .control
            .remove(&id)
            .ok_or(PublisherError::ListenerNotFound(id))?;
        let publisher = self
            .publishers
            .get(&publisher_type)
            .ok_or(PublisherError::PublisherNotFound)?;
        publisher.unregister_listener(id)?;
        Ok(publisher_type)
    }

    /// Key of the publisher a listener is registered to.
    pub fn publisher_type_of(&self, id: &Uuid) -> Option<S> {
        self.control.get(id).map(|entry| entry.value().clone())
    }

    pub fn listener_count(&self, publisher_type: &S) -> usize {
        self.publishers
            .get(publisher_type)
            .map_or(0, |publisher| publisher.len())
    }

    pub fn notify_listeners(&self, publisher_type: &S, data: Arc<T>) {
        if let Some(publisher) = self.get_publisher(publisher_type) {
            publisher.notify_listeners(data);
        }
    }

    /// Unregisters every listener of every publisher. Publishers are kept.
    pub fn unregister_all(&self) {
        for entry in self.publishers.iter() {
            entry.value().unregister_all();
        }
        self.control.clear();
    }
}
