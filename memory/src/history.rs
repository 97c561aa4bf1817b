use std::collections::VecDeque;

use serde::Serialize;

use crate::Exchange;

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 50;

/// Window returned by [`HistoryBuffer::recent`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Recent {
    /// Selected records, oldest first.
    #[serde(rename = "history")]
    pub records: Vec<Exchange>,
    /// Number of records currently retained by the buffer.
    pub total: usize,
}

/// FIFO store holding the most recent `capacity` exchanges.
///
/// ```
/// use memory::{Exchange, HistoryBuffer};
///
/// let mut history = HistoryBuffer::new(2);
/// history.append(Exchange::new("a", "1", "en"));
/// history.append(Exchange::new("b", "2", "en"));
/// history.append(Exchange::new("c", "3", "en"));
/// let recent = history.recent(10);
/// assert_eq!(recent.total, 2);
/// assert_eq!(recent.records[0].user_text, "b");
/// ```
#[derive(Clone, Debug)]
pub struct HistoryBuffer {
    records: VecDeque<Exchange>,
    capacity: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl HistoryBuffer {
    /// Create an empty buffer. A capacity of zero retains nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append `record`, evicting the oldest entries so `len() <= capacity()`.
    pub fn append(&mut self, record: Exchange) {
        self.records.push_back(record);
        while self.records.len() > self.capacity {
            self.records.pop_front();
        }
    }

    /// Return the last `min(limit, len())` records in insertion order.
    pub fn recent(&self, limit: usize) -> Recent {
        let start = self.records.len().saturating_sub(limit);
        Recent {
            records: self.records.iter().skip(start).cloned().collect(),
            total: self.records.len(),
        }
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Iterate over retained records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Exchange> {
        self.records.iter()
    }
}
