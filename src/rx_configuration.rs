//! Configuration types for RxOptional operations

use log::Level;

/// How observer failures inside `if_present` / `if_not_present` are reported
#[derive(Debug, Clone)]
pub struct ObserverConfig {
    pub report_level: Level,
    pub label: Option<String>, // Included in the report to identify the chain
}

impl ObserverConfig {
    pub fn with_level(mut self, level: Level) -> Self {
        self.report_level = level;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            report_level: Level::Error,
            label: None,
        }
    }
}

/// Configuration for moving an Observable's production onto a runtime
#[derive(Debug, Clone)]
pub struct SubscribeOnConfig {
    pub buffer_size: usize,
}

impl Default for SubscribeOnConfig {
    fn default() -> Self {
        Self { buffer_size: 16 }
    }
}
