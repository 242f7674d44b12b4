use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};
use log::warn;

/// Event consumed by the app loop. `Tick` only triggers a redraw of the
/// running clock; it never touches race state.
#[derive(Clone, Debug)]
pub enum RaceEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events
pub trait RaceEventSource: Send + 'static {
    /// Waits up to `timeout` for the next event
    fn recv_timeout(&self, timeout: Duration) -> Result<RaceEvent, RecvTimeoutError>;
}

/// Reads crossterm events on a background thread and forwards them
pub struct CrosstermEventSource {
    rx: Receiver<RaceEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                // key releases arrive on some platforms; a keystroke is its press
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                    tx.send(RaceEvent::Key(key))
                }
                Ok(CtEvent::Resize(_, _)) => tx.send(RaceEvent::Resize),
                Ok(_) => Ok(()),
                Err(e) => {
                    warn!("terminal event reader stopped: {e}");
                    break;
                }
            };
            if forwarded.is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RaceEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<RaceEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Channel-fed source for tests and headless runs
pub struct TestEventSource {
    rx: Receiver<RaceEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<RaceEvent>) -> Self {
        Self { rx }
    }
}

impl RaceEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<RaceEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Pulls one event at a time, yielding `Tick` when nothing arrives in time
pub struct Runner<E: RaceEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: RaceEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    pub fn step(&self) -> RaceEvent {
        self.event_source
            .recv_timeout(self.ticker.interval())
            .unwrap_or(RaceEvent::Tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(1)),
        );
        assert!(matches!(runner.step(), RaceEvent::Tick));
    }

    #[test]
    fn step_ticks_after_sender_hangs_up() {
        let (tx, rx) = mpsc::channel::<RaceEvent>();
        drop(tx);
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(1)),
        );
        assert!(matches!(runner.step(), RaceEvent::Tick));
    }

    #[test]
    fn step_passes_events_through_in_order() {
        let (tx, rx) = mpsc::channel();
        tx.send(RaceEvent::Resize).unwrap();
        tx.send(RaceEvent::Key(KeyEvent::new(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
        )))
        .unwrap();
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(10)),
        );

        assert!(matches!(runner.step(), RaceEvent::Resize));
        match runner.step() {
            RaceEvent::Key(key) => assert_eq!(key.code, KeyCode::Char('a')),
            other => panic!("expected key, got {other:?}"),
        }
    }
}
