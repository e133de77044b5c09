//! Concurrent sink: drain a sequence on a tokio task into a bounded queue
//!
//! Every element is published as `Ok(value)`. If the sequence ends with a
//! terminal error, exactly one `Err(error)` follows as the last item. The queue
//! is closed when the drain completes, which ends every consumer's `recv`
//! loop or `dequeue` stream.
//!
//! Without a [`CancelToken`] the producer runs to completion: a consumer that
//! stops reading leaves the producer parked on a full queue. With a token the
//! producer checks it before each pull and while waiting to enqueue, and on
//! cancellation closes the queue without publishing an error.

use crate::cancel::CancelToken;
use crate::error::SeqResult;
use crate::queue::Queue;
use crate::seq::Sequence;
use crate::stream_configuration::StreamConfig;

/// Drain `seq` into a new queue of the given capacity.
///
/// Must be called from within a tokio runtime.
pub fn stream<S>(seq: S, capacity: usize) -> Queue<SeqResult<S::Item>>
where
    S: Sequence + Send + 'static,
    S::Item: Send + 'static,
{
    stream_with_config(seq, StreamConfig::new().capacity(capacity), None)
}

/// Drain `seq` into a new queue built from `config`, optionally cancellable.
///
/// Must be called from within a tokio runtime.
pub fn stream_with_config<S>(
    seq: S,
    config: StreamConfig,
    cancel: Option<CancelToken>,
) -> Queue<SeqResult<S::Item>>
where
    S: Sequence + Send + 'static,
    S::Item: Send + 'static,
{
    let queue = Queue::bounded(config.capacity);
    tokio::spawn(drain_into(seq, queue.clone(), cancel));
    queue
}

fn is_cancelled(cancel: Option<&CancelToken>) -> bool {
    cancel.map_or(false, CancelToken::is_cancelled)
}

/// Returns false if the item could not be published and the producer should stop.
async fn publish<T>(queue: &Queue<T>, item: T, cancel: Option<&CancelToken>) -> bool
where
    T: Send + 'static,
{
    let result = match cancel {
        Some(token) => {
            tokio::select! {
                res = queue.enqueue(item) => res,
                _ = token.cancelled() => {
                    log::warn!("stream producer cancelled while waiting to enqueue");
                    return false;
                }
            }
        }
        None => queue.enqueue(item).await,
    };

    match result {
        Ok(()) => true,
        Err(err) => {
            log::warn!("stream producer stopped: {}", err);
            false
        }
    }
}

async fn drain_into<S>(mut seq: S, queue: Queue<SeqResult<S::Item>>, cancel: Option<CancelToken>)
where
    S: Sequence + Send + 'static,
    S::Item: Send + 'static,
{
    log::debug!("stream producer started, capacity {}", queue.capacity());
    let cancel = cancel.as_ref();
    let mut published = 0usize;

    loop {
        if is_cancelled(cancel) {
            log::warn!("stream producer cancelled after {} elements", published);
            queue.close().await;
            return;
        }
        let Some(item) = seq.next() else { break };
        if !publish(&queue, Ok(item), cancel).await {
            queue.close().await;
            return;
        }
        published += 1;
    }

    let terminal = seq.last_error().cloned();
    if is_cancelled(cancel) {
        log::warn!("stream producer cancelled after {} elements", published);
    } else if let Some(err) = terminal {
        log::debug!("stream producer publishing terminal error: {}", err);
        publish(&queue, Err(err), cancel).await;
    }

    queue.close().await;
    log::debug!("stream producer finished, {} elements published", published);
}
