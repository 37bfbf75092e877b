use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use uuid::Uuid;

use common::traits::Notifiable;
use common::types::Callback;

#[derive(Clone)]
pub struct Listener<T> {
    callback: Callback<T>,
    id: Option<Uuid>,
}

impl<T> Listener<T>
where
    T: Send + Sync + 'static,
{
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(Uuid, Arc<T>) + Send + Sync + 'static,
    {
        let callback = Arc::new(move |id: Uuid, data: Arc<T>| {
            callback(id, data);
        });

        Listener { callback, id: None }
    }
}

impl<T> Notifiable<T> for Listener<T> {
    fn get_callback(&self) -> Callback<T> {
        self.callback.clone()
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    fn get_id(&self) -> Option<Uuid> {
        self.id
    }
}

/// Returns a listener forwarding every item into an unbounded channel, together with
/// the receiving end. Items published after the receiver is dropped are discarded.
pub fn channel_listener<T>() -> (Listener<T>, UnboundedReceiver<Arc<T>>)
where
    T: Send + Sync + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let listener = Listener::new(move |_id: Uuid, data: Arc<T>| {
        if tx.send(data).is_err() {
            log::trace!("Receiver dropped, discarding item");
        }
    });
    (listener, rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener;
    use std::sync::Mutex;

    struct TestHandler {
        data: Arc<Mutex<Vec<i32>>>,
    }

    impl TestHandler {
        fn new() -> Self {
            Self {
                data: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn handle(&self, _id: Uuid, value: Arc<Vec<i32>>) {
            let mut data = self.data.lock().unwrap();
            *data = (*value).clone();
        }
    }

    #[test]
    fn test_new_listener() {
        let listener = Listener::new(move |_id: Uuid, value: Arc<i32>| {
            assert_eq!(*value, 42);
        });

        let callback = listener.get_callback();
        callback(Uuid::new_v4(), Arc::new(42));
    }

    #[test]
    fn test_listener_with_macro() {
        let handler = Arc::new(TestHandler::new());

        let listener = listener!(handler.handle);

        let callback = listener.get_callback();
        callback(Uuid::new_v4(), Arc::new(vec![400]));
        assert_eq!(handler.data.lock().unwrap()[0], 400);
    }

    #[test]
    fn test_set_id() {
        let mut listener = Listener::new(|_id: Uuid, _value: Arc<i32>| {});
        assert!(listener.get_id().is_none());
        let id = Uuid::new_v4();
        listener.set_id(id);
        assert_eq!(listener.get_id(), Some(id));
    }

    #[tokio::test]
    async fn test_channel_listener() {
        let (listener, mut rx) = channel_listener::<i32>();
        let callback = listener.get_callback();
        callback(Uuid::new_v4(), Arc::new(1));
        callback(Uuid::new_v4(), Arc::new(2));

        assert_eq!(*rx.recv().await.unwrap(), 1);
        assert_eq!(*rx.recv().await.unwrap(), 2);
    }

    #[test]
    fn test_channel_listener_after_receiver_dropped() {
        let (listener, rx) = channel_listener::<i32>();
        drop(rx);
        let callback = listener.get_callback();
        callback(Uuid::new_v4(), Arc::new(1));
    }
}
