use log::{error, info};
use serde_json::json;

use common::{SensorKind, StreamEvent};
use sensors_rs::services;
use sensors_rs::{DeviceProfile, MethodCall, PluginConfig};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let profile = DeviceProfile::android().with_noise(0.02);
    let (handle, plugin) = match services::run_mock_service(PluginConfig::default(), profile, Some(5000)) {
        Ok(service) => service,
        Err(e) => {
            error!("Cannot start sensor service: {}", e);
            return;
        }
    };

    for kind in [SensorKind::Accelerometer, SensorKind::AbsoluteOrientation] {
        let response = plugin.handle_method_call(&MethodCall::new(
            &format!("set{}SamplingPeriod", kind.method_fragment()),
            json!(100_000),
        ));
        info!("{} -> {:?}", plugin.event_channel_name(kind), response);

        let mut subscription = match plugin.subscribe(kind) {
            Ok(subscription) => subscription,
            Err(e) => {
                error!("Cannot subscribe to {}: {}", kind, e);
                continue;
            }
        };
        tokio::spawn(async move {
            while let Some(event) = subscription.recv().await {
                match event.as_ref() {
                    StreamEvent::Reading(reading) => info!("{}: {:?}", kind, reading.to_vec()),
                    StreamEvent::Error(e) => error!("{}: {} ({})", kind, e.message, e.code),
                }
            }
        });
    }

    if let Err(e) = handle.await {
        error!("Sensor service failed: {}", e);
    }
}
