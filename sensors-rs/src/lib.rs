//! # Crate sensors-rs
//!
//! ## sensors-rs
//!
//! The `sensors-rs` crate hosts the motion sensor plugin: it exposes the device motion sensors of a
//! platform sensor service as one event stream per [`SensorKind`](common::SensorKind), plus a
//! method-call endpoint to query availability and adjust the sampling period of each stream.
//!
//! Features include:
//! - Accelerometer, user accelerometer and gravity [m/s^2], gyroscope [rad/s] and magnetometer [uT] streams.
//! - Orientation, quaternion and rotation matrix streams, relative or referenced to magnetic north.
//! - Android-like and Apple-like platform conventions, normalized to a single reading layout.
//! - Registration of listeners (or channel subscriptions) receiving every reading of a stream.
//! - A simulated device so the plugin can be driven without real hardware.
//!
//! ### Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use common::SensorKind;
//! use sensors_rs::{DeviceProfile, PluginConfig, SensorsPlugin, SimulatedDevice};
//!
//! #[tokio::main]
//! async fn main() {
//!     let device = SimulatedDevice::new(DeviceProfile::android()).unwrap();
//!     let plugin = SensorsPlugin::attach(Arc::new(device), PluginConfig::default());
//!
//!     let mut subscription = plugin.subscribe(SensorKind::Gyroscope).unwrap();
//!     if let Some(event) = subscription.recv().await {
//!         println!("{:?}", event);
//!     }
//!     plugin.detach();
//! }
//! ```

pub mod adapters;
pub mod method_call;
pub mod models;
pub mod plugin;
pub mod ports;
pub mod services;
pub mod stream_handler;

pub use adapters::simulated::SimulatedDevice;
pub use method_call::{MethodCall, MethodResponse};
pub use models::config::{DeviceProfile, PluginConfig};
pub use plugin::{SensorsPlugin, Subscription};
pub use ports::{RegistrationId, SensorBackend, SensorEventListener, SensorInfo};
pub use stream_handler::StreamHandler;
