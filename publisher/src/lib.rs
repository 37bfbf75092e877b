//! # Crate publisher
//!
//! ## publisher
//!
//! The `publisher` crate provides a mechanism for registering and notifying listeners
//! of new events of type `T`.
//!
//! Listeners wrap a callback (`Fn(Uuid, Arc<T>)`). Every registered listener receives every
//! event published after its registration, until it is unregistered. A `PublisherManager`
//! groups one publisher per key (e.g. per sensor kind) and remembers which key each
//! listener id belongs to.
//!
//! ### Example
//!
//! ```
//! use std::sync::Arc;
//! use publisher::{Listener, Publishable, Publisher};
//!
//! let publisher = Publisher::<String>::new();
//!
//! // Register a listener
//! let mut listener = Listener::new(|_id, data: Arc<String>| {
//!     println!("Listener received: {}", data);
//! });
//! let listener_id = publisher.register_listener(&mut listener);
//!
//! // Notify all listeners
//! publisher.notify_listeners(Arc::new("Hello, World!".to_string()));
//!
//! // Unregister the listener
//! publisher.unregister_listener(listener_id).expect("Failed to unregister listener");
//!
//! // Verify that no listeners are left
//! assert!(publisher.is_empty());
//! ```

pub mod listener;
pub mod macros;
pub mod publisher;
pub mod publisher_manager;

pub use listener::{channel_listener, Listener};
pub use publisher::{Publishable, Publisher, PublisherError};
pub use publisher_manager::PublisherManager;
