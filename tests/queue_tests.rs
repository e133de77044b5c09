use futures::StreamExt;
use lazy_seq::queue::{Queue, QueueError};
use std::time::Duration;

#[tokio::test]
async fn test_bounded_queue_basic() {
    let queue = Queue::bounded(2);

    // Test enqueue
    assert!(queue.enqueue(1).await.is_ok());
    assert!(queue.enqueue(2).await.is_ok());

    // Test try_enqueue when full
    assert_eq!(queue.try_enqueue(3).await, Err(QueueError::Full));

    let mut stream = queue.dequeue();
    assert_eq!(stream.next().await, Some(1));
    assert_eq!(stream.next().await, Some(2));

    // Should be able to enqueue again
    assert!(queue.enqueue(3).await.is_ok());
    assert_eq!(stream.next().await, Some(3));
}

#[tokio::test]
async fn test_queue_close() {
    let queue = Queue::bounded(5);

    queue.enqueue(1).await.unwrap();
    queue.enqueue(2).await.unwrap();

    queue.close().await;
    assert!(queue.is_closed());

    // Should not be able to enqueue
    assert_eq!(queue.enqueue(3).await, Err(QueueError::Closed));
    assert_eq!(queue.try_enqueue(3).await, Err(QueueError::Closed));

    // Should still be able to dequeue existing items
    let mut stream = queue.dequeue();
    assert_eq!(stream.next().await, Some(1));
    assert_eq!(stream.next().await, Some(2));

    // Stream should end after existing items
    assert_eq!(stream.next().await, None);
    assert_eq!(queue.recv().await, None);
}

#[tokio::test]
async fn test_close_wakes_blocked_consumer() {
    let queue: Queue<u8> = Queue::bounded(1);
    let consumer = {
        let queue = queue.clone();
        tokio::spawn(async move { queue.recv().await })
    };

    tokio::time::sleep(Duration::from_millis(10)).await;
    queue.close().await;

    let received = tokio::time::timeout(Duration::from_secs(1), consumer)
        .await
        .expect("consumer should wake on close")
        .unwrap();
    assert_eq!(received, None);
}

#[tokio::test]
async fn test_queue_stats() {
    let queue = Queue::bounded(10);

    queue.enqueue(1).await.unwrap();
    queue.enqueue(2).await.unwrap();

    let stats = queue.stats();
    assert_eq!(stats.length, 2);
    assert_eq!(stats.capacity, 10);
    assert_eq!(stats.utilization, 0.2);
    assert!(!stats.is_closed);
    assert_eq!(stats.to_string(), "Queue(2/10, 20.0%)");

    queue.close().await;
    assert_eq!(queue.stats().to_string(), "Queue(2/10, 20.0%, closed)");
}

#[tokio::test]
async fn test_handoff_queue_waits_for_consumer() {
    let queue = Queue::bounded(0);
    assert_eq!(queue.capacity(), 0);
    assert_eq!(queue.try_enqueue(1).await, Err(QueueError::Full));

    let producer = {
        let queue = queue.clone();
        tokio::spawn(async move { queue.enqueue(1).await })
    };

    // No consumer yet: the producer must still be waiting
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!producer.is_finished());

    assert_eq!(queue.recv().await, Some(1));
    let sent = tokio::time::timeout(Duration::from_secs(1), producer)
        .await
        .expect("producer should complete after handoff")
        .unwrap();
    assert!(sent.is_ok());
    assert!(queue.is_empty());
}

#[tokio::test]
async fn test_concurrent_access() {
    let queue = Queue::bounded(100);
    let queue_clone = queue.clone();

    // Producer task
    let producer = tokio::spawn(async move {
        for i in 0..50 {
            queue_clone.enqueue(i).await.unwrap();
        }
        queue_clone.close().await;
    });

    // Consumer task
    let consumer = tokio::spawn(async move {
        let stream = queue.dequeue();
        stream.collect::<Vec<_>>().await
    });

    let (produced, items) = tokio::join!(producer, consumer);
    produced.unwrap();
    let items = items.unwrap();
    assert_eq!(items, (0..50).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_queue_drain() {
    let queue = Queue::bounded(10);

    for i in 0..8 {
        queue.enqueue(i).await.unwrap();
    }
    assert_eq!(queue.len(), 8);

    let drained = queue.drain();
    assert_eq!(drained, (0..8).collect::<Vec<_>>());
    assert!(queue.is_empty());
}

#[tokio::test]
async fn test_drain_does_not_wait_behind_parked_consumer() {
    let queue: Queue<u8> = Queue::bounded(4);
    let consumer = {
        let queue = queue.clone();
        tokio::spawn(async move { queue.recv().await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;

    // The parked consumer holds the receiving end; drain returns straight away
    assert!(queue.drain().is_empty());

    queue.enqueue(7).await.unwrap();
    let received = tokio::time::timeout(Duration::from_secs(1), consumer)
        .await
        .expect("consumer should receive the item")
        .unwrap();
    assert_eq!(received, Some(7));
}

#[tokio::test]
async fn test_close_rejects_enqueue_waiting_for_space() {
    let queue = Queue::bounded(1);
    queue.enqueue(1).await.unwrap();

    // Queue is full, so this producer parks waiting for space
    let producer = {
        let queue = queue.clone();
        tokio::spawn(async move { queue.enqueue(2).await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!producer.is_finished());

    queue.close().await;
    let outcome = tokio::time::timeout(Duration::from_secs(1), producer)
        .await
        .expect("parked producer should wake on close")
        .unwrap();
    assert_eq!(outcome, Err(QueueError::Closed));

    // Only the item enqueued before close is delivered
    let items: Vec<_> = queue.dequeue().collect().await;
    assert_eq!(items, vec![1]);
}

#[tokio::test]
async fn test_stream_pinning() {
    let queue = Queue::bounded(3);

    queue.enqueue("hello").await.unwrap();
    queue.enqueue("world").await.unwrap();
    queue.close().await;

    let mut stream = queue.dequeue();
    assert_eq!(stream.next().await, Some("hello"));
    assert_eq!(stream.next().await, Some("world"));
    assert_eq!(stream.next().await, None);
}
