//! Location providers for the CLI: a fixed position and a stdin-fed channel.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::BoxStream;
use tokio::sync::{mpsc, Mutex};

use warbler::location::{AcquireOptions, AcquisitionError, Capability, LocationProvider};
use warbler::models::{GeoPoint, LocationSample};

pub type SampleResult = Result<LocationSample, AcquisitionError>;

/// Always reports the same position; used for one-shot checks.
pub struct StaticProvider {
    point: GeoPoint,
}

impl StaticProvider {
    pub fn new(point: GeoPoint) -> Self {
        Self { point }
    }
}

impl LocationProvider for StaticProvider {
    fn capability(&self) -> Capability {
        Capability::Available
    }

    fn current_position(&self, _opts: AcquireOptions) -> BoxFuture<'static, SampleResult> {
        let point = self.point;
        Box::pin(async move { Ok(LocationSample::new(point)) })
    }

    fn watch_position(&self, _opts: AcquireOptions) -> BoxStream<'static, SampleResult> {
        let point = self.point;
        Box::pin(futures::stream::repeat_with(move || {
            Ok(LocationSample::new(point))
        }))
    }
}

/// Pulls samples (or injected error codes) from an in-process channel fed by
/// the stdin reader. Primary and watch requests drain the same queue.
pub struct ChannelProvider {
    rx: Arc<Mutex<mpsc::UnboundedReceiver<SampleResult>>>,
}

impl ChannelProvider {
    pub fn new() -> (Self, mpsc::UnboundedSender<SampleResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                rx: Arc::new(Mutex::new(rx)),
            },
            tx,
        )
    }
}

impl LocationProvider for ChannelProvider {
    fn capability(&self) -> Capability {
        Capability::Available
    }

    fn current_position(&self, _opts: AcquireOptions) -> BoxFuture<'static, SampleResult> {
        let rx = Arc::clone(&self.rx);
        Box::pin(async move {
            // A closed channel means the sample source is gone
            rx.lock()
                .await
                .recv()
                .await
                .unwrap_or(Err(AcquisitionError::Unavailable))
        })
    }

    fn watch_position(&self, _opts: AcquireOptions) -> BoxStream<'static, SampleResult> {
        let rx = Arc::clone(&self.rx);
        Box::pin(futures::stream::unfold(rx, |rx| async move {
            let item = rx.lock().await.recv().await;
            item.map(|item| (item, rx))
        }))
    }
}

/// Parse one stdin line: "lat,lon[,accuracy_m]" or one of the platform
/// error codes (denied/unavailable/timeout).
pub fn parse_sample_line(line: &str) -> Option<SampleResult> {
    match line {
        "denied" => return Some(Err(AcquisitionError::Denied)),
        "unavailable" => return Some(Err(AcquisitionError::Unavailable)),
        "timeout" => return Some(Err(AcquisitionError::Timeout)),
        _ => {}
    }

    let parts: Vec<f64> = line
        .split(',')
        .map(|p| p.trim().parse().ok())
        .collect::<Option<Vec<f64>>>()?;

    match parts.as_slice() {
        [lat, lon] => Some(Ok(LocationSample::new(GeoPoint::new(*lat, *lon)))),
        [lat, lon, accuracy] => Some(Ok(LocationSample::with_accuracy(
            GeoPoint::new(*lat, *lon),
            *accuracy,
        ))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinates() {
        let result = parse_sample_line("42.36, -71.05").unwrap().unwrap();
        assert_eq!(result.point, GeoPoint::new(42.36, -71.05));
        assert_eq!(result.accuracy_m, None);

        let result = parse_sample_line("42.36,-71.05,8.5").unwrap().unwrap();
        assert_eq!(result.accuracy_m, Some(8.5));
    }

    #[test]
    fn test_parse_error_codes() {
        assert_eq!(
            parse_sample_line("denied"),
            Some(Err(AcquisitionError::Denied))
        );
        assert_eq!(
            parse_sample_line("timeout"),
            Some(Err(AcquisitionError::Timeout))
        );
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_sample_line("not a sample"), None);
        assert_eq!(parse_sample_line("1,2,3,4"), None);
    }
}
