//! Item tracking for a picker wheel
//!
//! [`WheelSelection`] turns the pixel deltas a scroller reports into a
//! current item plus a sub-item offset. It implements [`ScrollingListener`]
//! so it can be handed to a scroller directly, or wrapped by a host listener
//! that forwards to it.

use crate::config::MIN_DELTA_FOR_SCROLLING;
use crate::listener::ScrollingListener;

/// Current item and pixel offset of a wheel of equally sized items
#[derive(Clone, Debug, PartialEq)]
pub struct WheelSelection {
    item_count: usize,
    item_extent: i32,
    cyclic: bool,
    current: usize,
    offset: i32,
    labels: Vec<String>,
}

impl WheelSelection {
    /// A non-cyclic wheel of `item_count` items, each `item_extent` px tall
    /// (or wide); extents below 1 are treated as 1
    pub fn new(item_count: usize, item_extent: i32) -> Self {
        Self {
            item_count,
            item_extent: item_extent.max(1),
            cyclic: false,
            current: 0,
            offset: 0,
            labels: Vec::new(),
        }
    }

    /// A wheel showing `labels`, one item per label
    pub fn with_labels<I, S>(labels: I, item_extent: i32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        Self {
            item_count: labels.len(),
            labels,
            ..Self::new(0, item_extent)
        }
    }

    /// Wrap around past the last item instead of stopping
    pub fn cyclic(mut self, cyclic: bool) -> Self {
        self.cyclic = cyclic;
        self
    }

    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn item_extent(&self) -> i32 {
        self.item_extent
    }

    pub fn current_item(&self) -> usize {
        self.current
    }

    /// Pixels the wheel sits away from the current item
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Select `index` directly; out-of-range indices wrap on cyclic wheels
    /// and are ignored otherwise
    pub fn set_current_item(&mut self, index: usize) -> bool {
        if self.item_count == 0 {
            return false;
        }
        let index = if index < self.item_count {
            index
        } else if self.cyclic {
            index % self.item_count
        } else {
            return false;
        };
        self.current = index;
        self.offset = 0;
        true
    }

    /// Index of the item `relative` positions away from the current one
    ///
    /// `None` past either end of a non-cyclic wheel or on an empty wheel.
    pub fn item_at(&self, relative: i32) -> Option<usize> {
        if self.item_count == 0 {
            return None;
        }
        let index = self.current as i64 + relative as i64;
        let count = self.item_count as i64;
        if self.cyclic {
            Some(index.rem_euclid(count) as usize)
        } else if (0..count).contains(&index) {
            Some(index as usize)
        } else {
            None
        }
    }

    /// Label of item `index`, if labels were given and the index exists
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn current_label(&self) -> Option<&str> {
        self.label(self.current)
    }

    /// Accumulate `delta` px of travel and move the current item by every
    /// whole item passed
    ///
    /// Travel beyond half an item rounds to the neighbour. Non-cyclic wheels
    /// stop at their first and last items and keep the overshoot as offset.
    pub fn apply_scroll(&mut self, delta: i32) {
        self.offset = self.offset.saturating_add(delta);
        if self.item_count == 0 {
            return;
        }

        let extent = self.item_extent;
        let count_items = self.item_count as i64;
        let mut count = (self.offset / extent) as i64;
        let mut position = self.current as i64 - count;

        let mut remainder = self.offset % extent;
        if remainder.abs() <= extent / 2 {
            remainder = 0;
        }

        if self.cyclic {
            if remainder > 0 {
                position -= 1;
                count += 1;
            } else if remainder < 0 {
                position += 1;
                count -= 1;
            }
            position = position.rem_euclid(count_items);
        } else if position < 0 {
            count = self.current as i64;
            position = 0;
        } else if position >= count_items {
            count = self.current as i64 - count_items + 1;
            position = count_items - 1;
        } else if position > 0 && remainder > 0 {
            position -= 1;
            count += 1;
        } else if position < count_items - 1 && remainder < 0 {
            position += 1;
            count -= 1;
        }

        if position as usize != self.current {
            tracing::trace!("WheelSelection: item {} -> {}", self.current, position);
            self.current = position as usize;
        }
        self.offset = (self.offset as i64 - count * extent as i64) as i32;
    }

    /// Distance still needed to center the current item, if worth scrolling
    pub fn justify_distance(&self) -> Option<i32> {
        (self.offset.abs() > MIN_DELTA_FOR_SCROLLING).then_some(self.offset)
    }

    /// End of an episode: the wheel rests exactly on the current item
    pub fn finish(&mut self) {
        self.offset = 0;
    }
}

impl ScrollingListener for WheelSelection {
    fn on_scroll(&mut self, distance: i32) {
        self.apply_scroll(distance);
    }

    fn on_finished(&mut self) {
        self.finish();
    }

    fn on_justify(&mut self) -> Option<i32> {
        self.justify_distance()
    }
}
