//! Bounded concurrent queue backing the stream sink
//!
//! Any number of producers and consumers may share one queue through clones.
//! Each item is delivered to exactly one consumer, in FIFO order overall.

use async_stream::stream;
use futures_util::stream::BoxStream;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicIsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, Mutex, Notify};

/// Error types for Queue operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// Queue has been closed
    #[error("Queue is closed")]
    Closed,
    /// Queue is full, or has no buffer at all (capacity 0)
    #[error("Queue is full")]
    Full,
    /// Every consumer is gone, or the item was dropped before a handoff completed
    #[error("Queue channel disconnected")]
    Disconnected,
}

/// An item in flight. `handoff` is set for capacity-0 queues and is answered
/// by whichever consumer receives the item.
struct Slot<T> {
    item: T,
    handoff: Option<oneshot::Sender<()>>,
}

struct QueueState<T> {
    sender: Mutex<Option<mpsc::Sender<Slot<T>>>>,
    capacity: usize,
    closed: AtomicBool,
    close_notify: Notify,
    // Signed: a consumer may receive an item before its producer counts it.
    item_count: AtomicIsize,
}

/// Bounded concurrent queue with a Stream view
///
/// A capacity of 0 is a synchronous handoff: [`enqueue`](Queue::enqueue)
/// completes only once a consumer has received the item.
pub struct Queue<T> {
    state: Arc<QueueState<T>>,
    receiver: Arc<Mutex<mpsc::Receiver<Slot<T>>>>,
}

impl<T> Clone for Queue<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            receiver: Arc::clone(&self.receiver),
        }
    }
}

impl<T> Queue<T>
where
    T: Send + 'static,
{
    /// Create a new bounded queue with the given capacity
    pub fn bounded(capacity: usize) -> Self {
        // A handoff queue parks at most one item while its producer waits for the ack.
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        Self {
            state: Arc::new(QueueState {
                sender: Mutex::new(Some(sender)),
                capacity,
                closed: AtomicBool::new(false),
                close_notify: Notify::new(),
                item_count: AtomicIsize::new(0),
            }),
            receiver: Arc::new(Mutex::new(receiver)),
        }
    }

    async fn sender(&self) -> Result<mpsc::Sender<Slot<T>>, QueueError> {
        if self.is_closed() {
            return Err(QueueError::Closed);
        }
        self.state
            .sender
            .lock()
            .await
            .clone()
            .ok_or(QueueError::Closed)
    }

    /// Enqueue an item, waiting while the queue is full.
    ///
    /// If the queue is closed while this call waits for space, the item is
    /// dropped and [`QueueError::Closed`] is returned.
    pub async fn enqueue(&self, item: T) -> Result<(), QueueError> {
        let closing = self.state.close_notify.notified();
        tokio::pin!(closing);
        // Register before the closed check in `sender` so a concurrent close is seen.
        closing.as_mut().enable();
        let sender = self.sender().await?;

        let (slot, ack) = if self.state.capacity == 0 {
            let (tx, rx) = oneshot::channel();
            (Slot { item, handoff: Some(tx) }, Some(rx))
        } else {
            (Slot { item, handoff: None }, None)
        };

        tokio::select! {
            biased;
            _ = &mut closing => return Err(QueueError::Closed),
            sent = sender.send(slot) => {
                if sent.is_err() {
                    return Err(QueueError::Disconnected);
                }
            }
        }
        self.state.item_count.fetch_add(1, Ordering::AcqRel);
        drop(sender);

        match ack {
            Some(rx) => rx.await.map_err(|_| QueueError::Disconnected),
            None => Ok(()),
        }
    }

    /// Try to enqueue an item without waiting.
    ///
    /// A capacity-0 queue has no buffer to place the item in, so this always
    /// fails with [`QueueError::Full`] there.
    pub async fn try_enqueue(&self, item: T) -> Result<(), QueueError> {
        if self.state.capacity == 0 {
            return Err(QueueError::Full);
        }
        let sender = self.sender().await?;

        match sender.try_send(Slot { item, handoff: None }) {
            Ok(()) => {
                self.state.item_count.fetch_add(1, Ordering::AcqRel);
                Ok(())
            }
            Err(mpsc::error::TrySendError::Full(_)) => Err(QueueError::Full),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(QueueError::Disconnected),
        }
    }

    fn accept(&self, slot: Slot<T>) -> T {
        self.state.item_count.fetch_sub(1, Ordering::AcqRel);
        if let Some(handoff) = slot.handoff {
            // The producer may have stopped waiting; nothing to do then.
            let _ = handoff.send(());
        }
        slot.item
    }

    /// Receive the next item, waiting for one to arrive.
    ///
    /// Returns `None` once the queue is closed and every queued item has been
    /// received.
    pub async fn recv(&self) -> Option<T> {
        let slot = {
            let mut rx = self.receiver.lock().await;
            rx.recv().await
        }?;
        Some(self.accept(slot))
    }

    /// Get a stream for dequeuing items - returns BoxStream to avoid pinning issues
    pub fn dequeue(&self) -> BoxStream<'static, T> {
        let queue = self.clone();
        let stream = stream! {
            while let Some(item) = queue.recv().await {
                yield item;
            }
        };
        Box::pin(stream)
    }

    /// Close the queue, preventing further enqueues but allowing existing items to be consumed
    pub async fn close(&self) {
        self.state.closed.store(true, Ordering::Release);
        self.state.close_notify.notify_waiters();
        if self.state.sender.lock().await.take().is_some() {
            log::debug!("queue closed with {} items pending", self.len());
        }
    }

    /// Drain the items currently queued without waiting for more.
    ///
    /// Returns nothing while another consumer is parked in [`recv`](Queue::recv),
    /// since that consumer owns the receiving end until an item arrives.
    pub fn drain(&self) -> Vec<T> {
        let mut items = Vec::new();
        let Ok(mut rx) = self.receiver.try_lock() else {
            return items;
        };
        while let Ok(slot) = rx.try_recv() {
            items.push(self.accept(slot));
        }
        items
    }

    /// Check if the queue is closed
    pub fn is_closed(&self) -> bool {
        self.state.closed.load(Ordering::Acquire)
    }

    pub fn capacity(&self) -> usize {
        self.state.capacity
    }

    /// Number of items enqueued and not yet received
    pub fn len(&self) -> usize {
        self.state.item_count.load(Ordering::Acquire).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get queue statistics for monitoring
    pub fn stats(&self) -> QueueStats {
        let length = self.len();
        let capacity = self.capacity();
        let utilization = if capacity > 0 {
            length as f64 / capacity as f64
        } else {
            0.0
        };

        QueueStats {
            length,
            capacity,
            utilization,
            is_closed: self.is_closed(),
        }
    }
}

/// Queue statistics for monitoring and debugging
#[derive(Debug, Clone)]
pub struct QueueStats {
    pub length: usize,
    pub capacity: usize,
    pub utilization: f64, // 0.0 to 1.0, always 0.0 for handoff queues
    pub is_closed: bool,
}

impl fmt::Display for QueueStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.capacity == 0 {
            write!(
                f,
                "Queue(handoff, {} in flight{})",
                self.length,
                if self.is_closed { ", closed" } else { "" }
            )
        } else {
            write!(
                f,
                "Queue({}/{}, {:.1}%{})",
                self.length,
                self.capacity,
                self.utilization * 100.0,
                if self.is_closed { ", closed" } else { "" }
            )
        }
    }
}

impl<T> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue")
            .field("capacity", &self.state.capacity)
            .field("length", &self.state.item_count.load(Ordering::Acquire).max(0))
            .field("is_closed", &self.state.closed.load(Ordering::Acquire))
            .finish()
    }
}
