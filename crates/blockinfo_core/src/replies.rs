//! Queue carrying sampler replies from worker jobs back to the tick thread.

use std::sync::mpsc;

/// Cloned into each sampling job. Sending fails once the engine that asked is gone.
pub struct ReplySender<T> {
    tx: mpsc::Sender<T>,
}

/// Owned by the engine and drained at the start of every tick.
pub struct ReplyQueue<T> {
    rx: mpsc::Receiver<T>,
}

pub fn reply_queue<T>() -> (ReplySender<T>, ReplyQueue<T>) {
    let (tx, rx) = mpsc::channel();
    (ReplySender { tx }, ReplyQueue { rx })
}

impl<T> Clone for ReplySender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> ReplySender<T> {
    pub fn send(&self, reply: T) -> Result<(), mpsc::SendError<T>> {
        self.tx.send(reply)
    }
}

impl<T> ReplyQueue<T> {
    /// Replies that arrived so far, without blocking.
    pub fn drain(&self) -> mpsc::TryIter<'_, T> {
        self.rx.try_iter()
    }

    /// Waits for every sender to be dropped and returns all replies in arrival order.
    pub fn wait_all(self) -> Vec<T> {
        self.rx.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::reply_queue;

    #[test]
    fn drain_returns_queued_replies_in_order() {
        let (tx, queue) = reply_queue();
        let other = tx.clone();

        tx.send(1).expect("queue should be alive");
        other.send(2).expect("queue should be alive");
        tx.send(3).expect("queue should be alive");

        let replies: Vec<i32> = queue.drain().collect();
        assert_eq!(replies, vec![1, 2, 3]);
        assert_eq!(queue.drain().count(), 0);
    }

    #[test]
    fn send_fails_after_queue_drops() {
        let (tx, queue) = reply_queue::<u8>();
        drop(queue);
        assert!(tx.send(7).is_err());
    }

    #[test]
    fn wait_all_ends_when_senders_are_gone() {
        let (tx, queue) = reply_queue();
        let worker = std::thread::spawn(move || {
            for value in 0..3 {
                tx.send(value).expect("queue should be alive");
            }
        });
        worker.join().expect("worker should finish");
        assert_eq!(queue.wait_all(), vec![0, 1, 2]);
    }
}
