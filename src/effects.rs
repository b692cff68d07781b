//! Presentation effects, modelled as plain state machines.
//!
//! The generated page runs these effects in the browser (`static/site.js`).
//! The types here describe the same behavior so it can be exercised without a
//! browser, and so an embedding outside a page lifecycle gets an explicit
//! handle to stop the timer.
//!
//! ## Carousel
//!
//! A fixed set of announcement elements, exactly one visible at a time. Each
//! tick hides the current element, advances the index modulo the set size,
//! and shows the new one. After `n` ticks the visible index is `n mod len`.
//! An empty set never shows anything and ticking it does nothing.
//!
//! ## Scroll reveal
//!
//! Elements tagged `data-reveal` become revealed the first time their visible
//! fraction reaches the threshold. Revealing is one-way.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Default rotation period of the announcement carousel.
pub const DEFAULT_CAROUSEL_INTERVAL: Duration = Duration::from_millis(4000);

/// Default visible fraction at which an element is revealed.
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.15;

/// Single-visible rotation over a fixed number of elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    current: usize,
    advances: u64,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            current: 0,
            advances: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the visible element; `None` for an empty carousel.
    pub fn current(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.current)
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.current() == Some(index)
    }

    /// Visibility of every element, in order.
    pub fn visibility(&self) -> Vec<bool> {
        (0..self.len).map(|i| self.is_visible(i)).collect()
    }

    /// Number of completed advances.
    pub fn advances(&self) -> u64 {
        self.advances
    }

    /// Hide the current element and show the next one.
    pub fn advance(&mut self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.len;
        self.advances += 1;
        Some(self.current)
    }
}

/// A carousel advanced on a background timer until stopped.
///
/// Dropping the task stops it as well.
pub struct CarouselTask {
    state: Arc<Mutex<Carousel>>,
    stop: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl CarouselTask {
    /// Start rotating `len` elements every `period`.
    ///
    /// An empty carousel spawns no timer.
    pub fn start(len: usize, period: Duration) -> Self {
        let state = Arc::new(Mutex::new(Carousel::new(len)));
        if len == 0 {
            return Self {
                state,
                stop: None,
                handle: None,
            };
        }

        let (tx, rx) = mpsc::channel::<()>();
        let ticker = Arc::clone(&state);
        let handle = thread::spawn(move || {
            // Disconnect (sender dropped) or an explicit message ends the loop.
            while let Err(RecvTimeoutError::Timeout) = rx.recv_timeout(period) {
                let mut carousel = match ticker.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                carousel.advance();
            }
        });
        tracing::debug!(len, period_ms = period.as_millis() as u64, "carousel started");

        Self {
            state,
            stop: Some(tx),
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Copy of the current carousel state.
    pub fn snapshot(&self) -> Carousel {
        match self.state.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn current(&self) -> Option<usize> {
        self.snapshot().current()
    }

    /// Stop the timer and return the final state.
    pub fn stop(mut self) -> Carousel {
        self.shutdown();
        self.snapshot()
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            tracing::debug!("carousel stopped");
        }
    }
}

impl Drop for CarouselTask {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// One-way reveal state for a fixed set of elements.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    threshold: f64,
    revealed: Vec<bool>,
}

impl RevealTracker {
    pub fn new(count: usize, threshold: f64) -> Self {
        Self {
            threshold,
            revealed: vec![false; count],
        }
    }

    /// Record that `index` is `fraction` visible. Returns whether it is revealed.
    ///
    /// Unknown indices are ignored.
    pub fn observe(&mut self, index: usize, fraction: f64) -> bool {
        let threshold = self.threshold;
        match self.revealed.get_mut(index) {
            Some(revealed) => {
                if fraction >= threshold {
                    *revealed = true;
                }
                *revealed
            }
            None => false,
        }
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|r| **r).count()
    }
}
