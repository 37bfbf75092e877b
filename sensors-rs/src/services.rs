use log::info;
use std::sync::Arc;
use tokio::sync::Notify;

use common::SensorError;

use crate::adapters::simulated::SimulatedDevice;
use crate::models::config::{DeviceProfile, PluginConfig};
use crate::models::shutdown;
use crate::plugin::SensorsPlugin;

/// Attaches the plugin to a simulated device, and detaches it once `run_for_millis`
/// elapsed, or on Ctrl+C when `None`.
///
/// Returns a tuple containing:
/// - A `tokio::task::JoinHandle<()>` completing when the plugin was detached.
/// - An `Arc<SensorsPlugin>` instance, to register sinks and send method calls.
///
/// An InvalidArgument error is returned if the device profile is inconsistent, and a
/// Runtime error if called outside of a tokio runtime.
pub fn run_mock_service(
    config: PluginConfig,
    profile: DeviceProfile,
    run_for_millis: Option<u64>,
) -> Result<(tokio::task::JoinHandle<()>, Arc<SensorsPlugin>), SensorError> {
    let runtime =
        tokio::runtime::Handle::try_current().map_err(|e| SensorError::Runtime(e.to_string()))?;
    let device = SimulatedDevice::new(profile)?;
    let plugin = Arc::new(SensorsPlugin::attach(Arc::new(device), config));

    let abort_signal = Arc::new(Notify::new());
    let handle = runtime.spawn({
        let plugin = plugin.clone();
        async move {
            let stop = abort_signal.notified();
            let shutdown_handle = shutdown::listen_for_shutdown(abort_signal.clone(), run_for_millis);
            stop.await;
            shutdown_handle.abort();
            plugin.detach();
            info!("Mock sensor service stopped");
        }
    });
    Ok((handle, plugin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::SensorKind;

    #[tokio::test]
    async fn test_run_mock_service() {
        let (handle, plugin) =
            run_mock_service(PluginConfig::default(), DeviceProfile::android(), Some(300)).unwrap();
        assert!(!plugin.is_detached());
        assert!(plugin.is_available(SensorKind::Gyroscope));

        handle.await.unwrap();
        assert!(plugin.is_detached());
    }

    #[test]
    fn test_run_mock_service_without_runtime() {
        let result = run_mock_service(PluginConfig::default(), DeviceProfile::android(), Some(10));
        assert!(matches!(result, Err(SensorError::Runtime(_))));
    }

    #[tokio::test]
    async fn test_run_mock_service_invalid_profile() {
        let result = run_mock_service(
            PluginConfig::default(),
            DeviceProfile::apple().with_noise(-1.0),
            Some(10),
        );
        assert!(matches!(result, Err(SensorError::InvalidArgument(_))));
    }
}
