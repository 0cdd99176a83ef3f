use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Handle to a background timer posting events into the app channel.
///
/// The timer stops when the handle is cancelled or dropped. Once `cancel`
/// returns, the timer thread has exited and will post nothing further.
#[derive(Debug)]
pub struct Timer {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl Timer {
    pub fn repeating<E>(period: Duration, tx: Sender<E>, event: E) -> Self
    where
        E: Clone + Send + 'static,
    {
        Self::spawn(period, tx, event, true)
    }

    pub fn once<E>(delay: Duration, tx: Sender<E>, event: E) -> Self
    where
        E: Clone + Send + 'static,
    {
        Self::spawn(delay, tx, event, false)
    }

    fn spawn<E>(period: Duration, tx: Sender<E>, event: E, repeat: bool) -> Self
    where
        E: Clone + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let thread = thread::spawn(move || {
            loop {
                match stop_rx.recv_timeout(period) {
                    Err(RecvTimeoutError::Timeout) => {
                        if tx.send(event.clone()).is_err() || !repeat {
                            break;
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });
        Self {
            stop: Some(stop_tx),
            thread: Some(thread),
        }
    }

    pub fn cancel(&mut self) {
        // Dropping the sender wakes the timer thread immediately.
        self.stop.take();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeating_timer_posts_until_cancelled() {
        let (tx, rx) = mpsc::channel();
        let mut timer = Timer::repeating(Duration::from_millis(5), tx, 1u8);
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok(1));
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok(1));
        timer.cancel();
        while rx.try_recv().is_ok() {}
        thread::sleep(Duration::from_millis(30));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn once_fires_a_single_time() {
        let (tx, rx) = mpsc::channel();
        let _timer = Timer::once(Duration::from_millis(5), tx, "done");
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok("done"));
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn dropped_timer_never_fires() {
        let (tx, rx) = mpsc::channel();
        drop(Timer::once(Duration::from_millis(20), tx, 3u32));
        assert!(rx.recv_timeout(Duration::from_millis(80)).is_err());
    }
}
