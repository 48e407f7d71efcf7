use crate::events::AppEvent;
use async_channel::Sender;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Periodic [`AppEvent::AutoplayTick`] source that can be paused and resumed.
///
/// With no interval configured every call is a no-op.
pub struct Autoplay {
    interval: Option<Duration>,
    handle: Handle,
    tx: Sender<AppEvent>,
    task: Option<JoinHandle<()>>,
}

impl Autoplay {
    pub fn new(interval: Option<Duration>, handle: Handle, tx: Sender<AppEvent>) -> Self {
        Self {
            interval: interval.filter(|d| !d.is_zero()),
            handle,
            tx,
            task: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.interval.is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.task.is_some()
    }

    /// (Re)starts the timer. The first tick comes one full interval from now.
    pub fn arm(&mut self) {
        let Some(interval) = self.interval else {
            return;
        };
        self.cancel();

        let tx = self.tx.clone();
        self.task = Some(self.handle.spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(AppEvent::AutoplayTick).await.is_err() {
                    break;
                }
            }
        }));
        log::debug!("Autoplay armed every {:?}", interval);
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            log::debug!("Autoplay paused");
        }
    }

    /// Applies a new interval, keeping the armed state.
    pub fn set_interval(&mut self, interval: Option<Duration>) {
        let was_armed = self.is_armed();
        self.cancel();
        self.interval = interval.filter(|d| !d.is_zero());
        if was_armed {
            self.arm();
        }
    }
}

impl Drop for Autoplay {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT: Duration = Duration::from_millis(10);

    #[tokio::test]
    async fn test_armed_timer_ticks() {
        let (tx, rx) = async_channel::unbounded();
        let mut autoplay = Autoplay::new(Some(SHORT), Handle::current(), tx);
        autoplay.arm();
        assert!(autoplay.is_armed());

        let event = time::timeout(Duration::from_secs(2), rx.recv()).await;
        assert_eq!(event.unwrap().unwrap(), AppEvent::AutoplayTick);
    }

    #[tokio::test]
    async fn test_cancel_stops_ticks() {
        let (tx, rx) = async_channel::unbounded();
        let mut autoplay = Autoplay::new(Some(SHORT), Handle::current(), tx);
        autoplay.arm();
        autoplay.cancel();
        assert!(!autoplay.is_armed());

        let event = time::timeout(Duration::from_millis(100), rx.recv()).await;
        assert!(event.is_err());
    }

    #[tokio::test]
    async fn test_tick_queued_before_cancel_outlives_it() {
        let (tx, rx) = async_channel::unbounded();
        let mut autoplay = Autoplay::new(Some(SHORT), Handle::current(), tx);
        autoplay.arm();
        let queued = time::timeout(Duration::from_secs(2), async {
            while rx.is_empty() {
                time::sleep(SHORT).await;
            }
        });
        queued.await.unwrap();
        autoplay.cancel();

        // the receiver must check is_armed before acting on it
        assert!(!autoplay.is_armed());
        assert_eq!(rx.try_recv().unwrap(), AppEvent::AutoplayTick);
    }

    #[tokio::test]
    async fn test_disabled_never_arms() {
        let (tx, rx) = async_channel::unbounded();
        let mut autoplay = Autoplay::new(Some(Duration::ZERO), Handle::current(), tx);
        assert!(!autoplay.is_enabled());
        autoplay.arm();
        assert!(!autoplay.is_armed());
        assert!(rx.is_empty());
    }

    #[tokio::test]
    async fn test_set_interval_keeps_paused_state() {
        let (tx, _rx) = async_channel::unbounded();
        let mut autoplay = Autoplay::new(None, Handle::current(), tx);
        autoplay.set_interval(Some(SHORT));
        assert!(autoplay.is_enabled());
        assert!(!autoplay.is_armed());

        autoplay.arm();
        autoplay.set_interval(Some(Duration::from_millis(20)));
        assert!(autoplay.is_armed());

        autoplay.set_interval(None);
        assert!(!autoplay.is_armed());
    }
}
