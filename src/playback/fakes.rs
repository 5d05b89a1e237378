//! In-memory stand-ins for the controller's ports.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

use super::{
    MediaResource, NotificationId, PlayRequestId, PlayerDisplay, PlayerView, Scheduler, Task,
};

#[derive(Debug)]
struct MediaInner {
    position: f64,
    duration: f64,
    requests: Vec<PlayRequestId>,
    pauses: usize,
    seeks: usize,
}

impl Default for MediaInner {
    fn default() -> Self {
        Self {
            position: 0.0,
            duration: f64::NAN,
            requests: Vec::new(),
            pauses: 0,
            seeks: 0,
        }
    }
}

/// Media element whose state the test can read and poke.
#[derive(Debug, Clone, Default)]
pub struct FakeMedia {
    inner: Rc<RefCell<MediaInner>>,
}

impl FakeMedia {
    pub fn set_duration(&self, seconds: f64) {
        self.inner.borrow_mut().duration = seconds;
    }

    pub fn set_position(&self, seconds: f64) {
        self.inner.borrow_mut().position = seconds;
    }

    pub fn position(&self) -> f64 {
        self.inner.borrow().position
    }

    pub fn play_calls(&self) -> usize {
        self.inner.borrow().requests.len()
    }

    pub fn last_request(&self) -> Option<PlayRequestId> {
        self.inner.borrow().requests.last().copied()
    }

    pub fn pause_calls(&self) -> usize {
        self.inner.borrow().pauses
    }

    pub fn seek_calls(&self) -> usize {
        self.inner.borrow().seeks
    }
}

impl MediaResource for FakeMedia {
    fn play(&mut self, request: PlayRequestId) {
        self.inner.borrow_mut().requests.push(request);
    }

    fn pause(&mut self) {
        self.inner.borrow_mut().pauses += 1;
    }

    fn current_time(&self) -> f64 {
        self.inner.borrow().position
    }

    fn set_current_time(&mut self, seconds: f64) {
        let mut inner = self.inner.borrow_mut();
        inner.position = seconds;
        inner.seeks += 1;
    }

    fn duration(&self) -> f64 {
        self.inner.borrow().duration
    }
}

/// Keeps every rendered frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    frames: Rc<RefCell<Vec<PlayerDisplay>>>,
}

impl RecordingView {
    pub fn last(&self) -> PlayerDisplay {
        self.frames.borrow().last().cloned().unwrap_or_default()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Distinct notifications that were ever on screen, in the order shown.
    pub fn notification_ids(&self) -> Vec<NotificationId> {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for frame in self.frames.borrow().iter() {
            if let Some(notification) = &frame.notification {
                if seen.insert(notification.id) {
                    ids.push(notification.id);
                }
            }
        }
        ids
    }
}

impl PlayerView for RecordingView {
    fn render(&mut self, display: &PlayerDisplay) {
        self.frames.borrow_mut().push(display.clone());
    }
}

#[derive(Debug)]
struct Timer {
    id: u64,
    task: Task,
    due_ms: u64,
    period_ms: Option<u64>,
}

#[derive(Debug, Default)]
struct ClockInner {
    now_ms: u64,
    next_id: u64,
    timers: Vec<Timer>,
}

/// Manually advanced clock. Handles unregister their timer when dropped.
#[derive(Debug, Clone, Default)]
pub struct FakeScheduler {
    inner: Rc<RefCell<ClockInner>>,
}

pub struct FakeHandle {
    id: u64,
    clock: Rc<RefCell<ClockInner>>,
}

impl Drop for FakeHandle {
    fn drop(&mut self) {
        let id = self.id;
        self.clock.borrow_mut().timers.retain(|timer| timer.id != id);
    }
}

impl FakeScheduler {
    fn register(&self, delay: Duration, task: Task, repeat: bool) -> FakeHandle {
        let delay_ms = delay.as_millis() as u64;
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        let due_ms = inner.now_ms + delay_ms;
        inner.timers.push(Timer {
            id,
            task,
            due_ms,
            period_ms: repeat.then_some(delay_ms.max(1)),
        });
        FakeHandle {
            id,
            clock: self.inner.clone(),
        }
    }

    /// Move time forward and return the tasks that fired, in firing order.
    pub fn advance(&self, ms: u64) -> Vec<Task> {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        let target = inner.now_ms + ms;
        let mut fired = Vec::new();

        loop {
            let next = inner
                .timers
                .iter()
                .enumerate()
                .filter(|(_, timer)| timer.due_ms <= target)
                .min_by_key(|(_, timer)| (timer.due_ms, timer.id))
                .map(|(index, _)| index);
            let Some(index) = next else {
                break;
            };

            let due_ms = inner.timers[index].due_ms;
            fired.push(inner.timers[index].task);
            match inner.timers[index].period_ms {
                Some(period) => inner.timers[index].due_ms = due_ms + period,
                None => {
                    inner.timers.remove(index);
                }
            }
            inner.now_ms = due_ms;
        }

        inner.now_ms = target;
        fired
    }

    pub fn live_intervals(&self) -> usize {
        self.inner
            .borrow()
            .timers
            .iter()
            .filter(|timer| timer.period_ms.is_some())
            .count()
    }

    pub fn live_timeouts(&self) -> usize {
        self.inner
            .borrow()
            .timers
            .iter()
            .filter(|timer| timer.period_ms.is_none())
            .count()
    }
}

impl Scheduler for FakeScheduler {
    type Handle = FakeHandle;

    fn every(&mut self, period: Duration, task: Task) -> FakeHandle {
        self.register(period, task, true)
    }

    fn after(&mut self, delay: Duration, task: Task) -> FakeHandle {
        self.register(delay, task, false)
    }
}
