//! Platform bridge — the host chat app's embedding API.
//!
//! The wizard only signals lifecycle events and hands over the final
//! booking. Every call is fire-and-forget.

use std::io::Write;
use std::sync::Mutex;

/// Host platform hooks.
pub trait PlatformBridge: Send + Sync {
    /// The app finished initializing.
    fn ready(&self);

    /// Ask the host for a full-height view.
    fn expand(&self);

    /// Deliver the serialized booking.
    fn send_data(&self, payload: &str);
}

/// Writes payloads to stdout, one JSON document per line.
#[derive(Debug, Default)]
pub struct StdoutBridge;

impl StdoutBridge {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformBridge for StdoutBridge {
    fn ready(&self) {
        tracing::debug!("Bridge ready");
    }

    fn expand(&self) {
        tracing::debug!("Bridge expand requested");
    }

    fn send_data(&self, payload: &str) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = writeln!(out, "{payload}").and_then(|_| out.flush()) {
            tracing::warn!("Failed to write booking payload: {}", e);
        }
    }
}

/// Something the wizard told the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    Ready,
    Expand,
    Data(String),
}

/// Keeps every call in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingBridge {
    events: Mutex<Vec<BridgeEvent>>,
}

impl RecordingBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<BridgeEvent> {
        self.events
            .lock()
            .map(|e| e.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Payloads delivered through `send_data`, oldest first.
    pub fn sent(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                BridgeEvent::Data(payload) => Some(payload),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: BridgeEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

impl PlatformBridge for RecordingBridge {
    fn ready(&self) {
        self.record(BridgeEvent::Ready);
    }

    fn expand(&self) {
        self.record(BridgeEvent::Expand);
    }

    fn send_data(&self, payload: &str) {
        self.record(BridgeEvent::Data(payload.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_bridge_keeps_order() {
        let bridge = RecordingBridge::new();
        bridge.ready();
        bridge.expand();
        bridge.send_data("{\"a\":1}");

        assert_eq!(
            bridge.events(),
            [
                BridgeEvent::Ready,
                BridgeEvent::Expand,
                BridgeEvent::Data("{\"a\":1}".into())
            ]
        );
        assert_eq!(bridge.sent(), ["{\"a\":1}"]);
    }

    #[test]
    fn bridge_is_object_safe() {
        let bridge: Box<dyn PlatformBridge> = Box::new(RecordingBridge::new());
        bridge.send_data("x");
    }
}
