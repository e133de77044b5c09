//! Configuration types for the stream sink

use serde::{Deserialize, Serialize};

/// Configuration for [`stream_with_config`](crate::sink::stream_with_config)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Queue capacity. 0 hands each element directly to a waiting consumer.
    pub capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self { capacity: 0 }
    }
}

impl StreamConfig {
    /// Create a new stream configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the queue capacity
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// True when the producer blocks until each element is received
    pub fn is_synchronous(&self) -> bool {
        self.capacity == 0
    }
}
