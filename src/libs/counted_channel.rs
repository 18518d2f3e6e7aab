//! Unbounded channel that keeps a running count of undelivered messages
//!
//! Key listeners run synchronously inside the host's dispatch, so they only `send`.
//! The game side drains with `recv_all` / `recv_qty` or polls with `try_recv`.

use std::sync::atomic::{ AtomicUsize, Ordering };
use std::sync::Arc;
use tokio::sync::mpsc::{ self, error::SendError, error::TryRecvError, UnboundedReceiver, UnboundedSender };

pub struct CountedChannel;

impl CountedChannel {
    pub fn new() -> (CountedSender, CountedReceiver) {
        let tx_counter = Arc::new(AtomicUsize::new(0));
        let rx_counter = tx_counter.clone();

        let (tx, rx) = mpsc::unbounded_channel();

        let sender = CountedSender {
            sender: tx,
            counter: tx_counter,
        };

        let receiver = CountedReceiver {
            receiver: rx,
            counter: rx_counter,
        };

        (sender, receiver)
    }
}

#[derive(Clone)]
pub struct CountedSender {
    sender: UnboundedSender<String>,
    counter: Arc<AtomicUsize>,
}

impl CountedSender {
    pub fn send(&self, msg: String) -> Result<(), SendError<String>> {
        self.counter.fetch_add(1, Ordering::SeqCst);
        if let Err(error) = self.sender.send(msg) {
            self.counter.fetch_sub(1, Ordering::SeqCst);
            return Err(error);
        }

        Ok(())
    }

    pub fn count(&self) -> usize {
        self.counter.load(Ordering::SeqCst)
    }
}

pub struct CountedReceiver {
    receiver: UnboundedReceiver<String>,
    counter: Arc<AtomicUsize>,
}

impl CountedReceiver {
    fn matches(pattern: Option<&str>, msg: &str) -> bool {
        pattern.is_none_or(|pattern| pattern == msg)
    }

    /// Receive one message
    ///
    /// The count only drops when there is no pattern or the message equals it.
    /// Returns `None` once every sender is gone and the buffer is empty.
    pub async fn recv(&mut self, pattern: Option<&str>) -> Option<String> {
        let msg = self.receiver.recv().await?;
        if Self::matches(pattern, &msg) {
            self.counter.fetch_sub(1, Ordering::SeqCst);
        }
        Some(msg)
    }

    /// Consume messages until the count reaches zero
    pub async fn recv_all(&mut self, pattern: Option<&str>) -> Vec<String> {
        let mut received = Vec::new();
        while self.count() > 0 {
            match self.recv(pattern).await {
                Some(msg) => received.push(msg),
                None => break,
            }
        }
        received
    }

    /// Consume at most `quantity` messages
    pub async fn recv_qty(&mut self, mut quantity: usize) -> Vec<String> {
        let mut received = Vec::new();
        while quantity > 0 {
            let Some(msg) = self.receiver.recv().await else {
                break;
            };
            quantity -= 1;
            self.counter.fetch_sub(1, Ordering::SeqCst);
            received.push(msg);
        }
        received
    }

    /// Non-blocking receive for synchronous drivers
    pub fn try_recv(&mut self) -> Option<String> {
        match self.receiver.try_recv() {
            Ok(msg) => {
                self.counter.fetch_sub(1, Ordering::SeqCst);
                Some(msg)
            }
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    pub fn count(&self) -> usize {
        self.counter.load(Ordering::SeqCst)
    }
}
