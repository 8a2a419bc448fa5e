//! Scroll listener contract
//!
//! The scroller reports everything it does through a [`ScrollingListener`],
//! synchronously, on the thread that feeds it events and frames.
//!
//! Ordering guarantees for one episode:
//!
//! - `on_started` fires at most once, before the first `on_scroll`
//! - `on_justify` fires when free motion stops
//! - `on_finished` fires exactly once, after the justify pass has settled

use std::cell::RefCell;
use std::rc::Rc;

/// Callbacks emitted by a wheel scroller
pub trait ScrollingListener {
    /// The wheel moved by `distance` pixels along its axis
    fn on_scroll(&mut self, distance: i32);

    /// A pointer went down on the wheel
    fn on_touch(&mut self) {}

    /// The pointer was released while no motion was running
    fn on_touch_up(&mut self) {}

    /// A scroll episode began
    fn on_started(&mut self) {}

    /// The episode ended after justification
    fn on_finished(&mut self) {}

    /// Free motion stopped; return the distance still needed to land on an item
    ///
    /// `Some(distance)` starts a snap scroll of that distance with the default
    /// duration before the justify pass begins.
    fn on_justify(&mut self) -> Option<i32> {
        None
    }
}

impl<L: ScrollingListener + ?Sized> ScrollingListener for Box<L> {
    fn on_scroll(&mut self, distance: i32) {
        (**self).on_scroll(distance)
    }

    fn on_touch(&mut self) {
        (**self).on_touch()
    }

    fn on_touch_up(&mut self) {
        (**self).on_touch_up()
    }

    fn on_started(&mut self) {
        (**self).on_started()
    }

    fn on_finished(&mut self) {
        (**self).on_finished()
    }

    fn on_justify(&mut self) -> Option<i32> {
        (**self).on_justify()
    }
}

/// Shared listener, for hosts that read listener state between frames
impl<L: ScrollingListener> ScrollingListener for Rc<RefCell<L>> {
    fn on_scroll(&mut self, distance: i32) {
        self.borrow_mut().on_scroll(distance)
    }

    fn on_touch(&mut self) {
        self.borrow_mut().on_touch()
    }

    fn on_touch_up(&mut self) {
        self.borrow_mut().on_touch_up()
    }

    fn on_started(&mut self) {
        self.borrow_mut().on_started()
    }

    fn on_finished(&mut self) {
        self.borrow_mut().on_finished()
    }

    fn on_justify(&mut self) -> Option<i32> {
        self.borrow_mut().on_justify()
    }
}

/// One listener callback, as recorded by [`EventLog`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollEvent {
    Touch,
    TouchUp,
    Started,
    Scroll(i32),
    Justify,
    Finished,
}

/// Listener that records every callback in order
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<ScrollEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ScrollEvent] {
        &self.events
    }

    /// Number of recorded events equal to `event`
    pub fn count(&self, event: ScrollEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }

    /// Sum of all scroll distances
    pub fn total_scroll(&self) -> i32 {
        self.events
            .iter()
            .map(|event| match event {
                ScrollEvent::Scroll(distance) => *distance,
                _ => 0,
            })
            .sum()
    }

    /// Index of the first recorded `event`
    pub fn position(&self, event: ScrollEvent) -> Option<usize> {
        self.events.iter().position(|e| *e == event)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl ScrollingListener for EventLog {
    fn on_scroll(&mut self, distance: i32) {
        self.events.push(ScrollEvent::Scroll(distance));
    }

    fn on_touch(&mut self) {
        self.events.push(ScrollEvent::Touch);
    }

    fn on_touch_up(&mut self) {
        self.events.push(ScrollEvent::TouchUp);
    }

    fn on_started(&mut self) {
        self.events.push(ScrollEvent::Started);
    }

    fn on_finished(&mut self) {
        self.events.push(ScrollEvent::Finished);
    }

    fn on_justify(&mut self) -> Option<i32> {
        self.events.push(ScrollEvent::Justify);
        None
    }
}
