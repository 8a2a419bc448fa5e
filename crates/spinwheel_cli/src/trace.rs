//! Touch trace files and their replay
//!
//! A trace describes one wheel and a timed list of inputs:
//!
//! ```toml
//! orientation = "vertical"
//!
//! [wheel]
//! item_extent = 48
//! labels = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
//! cyclic = true
//!
//! [[events]]
//! at = 0
//! action = "down"
//! y = 300.0
//!
//! [[events]]
//! at = 120
//! action = "scroll"
//! distance = -96
//! ```
//!
//! Replay runs the trace against a real scroller on a manual clock, pumping
//! one frame every `frame_ms` between inputs, and records every callback.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use spinwheel_platform::{Clock, ManualClock, PointerAction, PointerEvent, ToolType};
use spinwheel_scroll::{
    Axis, ScrollEvent, ScrollerConfig, ScrollingListener, WheelScroller, WheelSelection,
};

/// Frames pumped after the last input before giving up on the wheel settling
const MAX_SETTLE_FRAMES: usize = 10_000;

/// A wheel plus the inputs to feed it
#[derive(Debug, Deserialize)]
pub struct Trace {
    #[serde(default)]
    pub orientation: Axis,
    #[serde(default)]
    pub wheel: WheelSpec,
    /// Overrides the scroller config given on the command line
    #[serde(default)]
    pub scroller: Option<ScrollerConfig>,
    #[serde(default)]
    pub events: Vec<TraceEvent>,
}

/// The wheel the trace is played against
#[derive(Debug, Deserialize)]
pub struct WheelSpec {
    #[serde(default = "default_item_count")]
    pub item_count: usize,
    #[serde(default = "default_item_extent")]
    pub item_extent: i32,
    #[serde(default)]
    pub cyclic: bool,
    /// When present, the item count is the number of labels
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub start_item: usize,
}

fn default_item_count() -> usize {
    10
}

fn default_item_extent() -> i32 {
    48
}

impl Default for WheelSpec {
    fn default() -> Self {
        Self {
            item_count: default_item_count(),
            item_extent: default_item_extent(),
            cyclic: false,
            labels: Vec::new(),
            start_item: 0,
        }
    }
}

impl WheelSpec {
    fn build(&self) -> WheelSelection {
        let selection = if self.labels.is_empty() {
            WheelSelection::new(self.item_count, self.item_extent)
        } else {
            WheelSelection::with_labels(self.labels.iter().cloned(), self.item_extent)
        };
        let mut selection = selection.cyclic(self.cyclic);
        selection.set_current_item(self.start_item);
        selection
    }
}

/// What a trace step does
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TraceAction {
    Down,
    Move,
    Up,
    Cancel,
    /// Programmatic `scroll(distance, duration_ms)`
    Scroll,
    /// Programmatic `stop_scrolling()`
    Stop,
}

/// One timed input
#[derive(Clone, Debug, Deserialize)]
pub struct TraceEvent {
    /// Milliseconds from the start of the trace
    pub at: u64,
    pub action: TraceAction,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub tool: ToolType,
    #[serde(default)]
    pub distance: i32,
    #[serde(default)]
    pub duration_ms: u32,
}

impl TraceEvent {
    fn pointer(&self) -> Option<PointerEvent> {
        let action = match self.action {
            TraceAction::Down => PointerAction::Down,
            TraceAction::Move => PointerAction::Move,
            TraceAction::Up => PointerAction::Up,
            TraceAction::Cancel => PointerAction::Cancel,
            TraceAction::Scroll | TraceAction::Stop => return None,
        };
        Some(PointerEvent::new(action, self.x, self.y, self.at).with_tool(self.tool))
    }
}

impl Trace {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let trace: Self = toml::from_str(text)?;
        trace.validate()?;
        Ok(trace)
    }

    fn validate(&self) -> Result<()> {
        if self.wheel.item_extent <= 0 {
            anyhow::bail!(
                "wheel.item_extent must be positive (got {})",
                self.wheel.item_extent
            );
        }
        if let Some(pair) = self.events.windows(2).find(|pair| pair[1].at < pair[0].at) {
            anyhow::bail!(
                "events must be in time order ({:?} at {}ms follows {}ms)",
                pair[1].action,
                pair[1].at,
                pair[0].at
            );
        }
        if let Some(config) = &self.scroller {
            config.validate()?;
        }
        Ok(())
    }
}

/// One recorded listener callback
#[derive(Clone, Debug, PartialEq)]
pub struct ReplayEntry {
    pub time_ms: u64,
    pub event: ScrollEvent,
    /// Selected item right after the callback
    pub item: usize,
    pub offset: i32,
}

impl fmt::Display for ReplayEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let event = match self.event {
            ScrollEvent::Touch => "touch".to_string(),
            ScrollEvent::TouchUp => "touch-up".to_string(),
            ScrollEvent::Started => "started".to_string(),
            ScrollEvent::Scroll(distance) => format!("scroll {distance:+}"),
            ScrollEvent::Justify => "justify".to_string(),
            ScrollEvent::Finished => "finished".to_string(),
        };
        write!(
            f,
            "{:>6}ms  {:<12} item {:>3}  offset {:>4}",
            self.time_ms, event, self.item, self.offset
        )
    }
}

/// Outcome of a replay
#[derive(Debug)]
pub struct ReplayReport {
    pub entries: Vec<ReplayEntry>,
    pub frames: usize,
    pub selection: WheelSelection,
}

/// Forwards to a [`WheelSelection`] and timestamps every callback
struct Recorder {
    selection: WheelSelection,
    clock: ManualClock,
    entries: Vec<ReplayEntry>,
}

impl Recorder {
    fn record(&mut self, event: ScrollEvent) {
        self.entries.push(ReplayEntry {
            time_ms: self.clock.now_millis(),
            event,
            item: self.selection.current_item(),
            offset: self.selection.offset(),
        });
    }
}

impl ScrollingListener for Recorder {
    fn on_scroll(&mut self, distance: i32) {
        self.selection.on_scroll(distance);
        self.record(ScrollEvent::Scroll(distance));
    }

    fn on_touch(&mut self) {
        self.record(ScrollEvent::Touch);
    }

    fn on_touch_up(&mut self) {
        self.record(ScrollEvent::TouchUp);
    }

    fn on_started(&mut self) {
        self.record(ScrollEvent::Started);
    }

    fn on_finished(&mut self) {
        self.selection.on_finished();
        self.record(ScrollEvent::Finished);
    }

    fn on_justify(&mut self) -> Option<i32> {
        self.record(ScrollEvent::Justify);
        self.selection.on_justify()
    }
}

/// Play `trace` through a scroller, pumping a frame every `frame_ms`
pub fn replay(trace: &Trace, config: ScrollerConfig, frame_ms: u64) -> Result<ReplayReport> {
    if frame_ms == 0 {
        anyhow::bail!("frame interval must be at least 1ms");
    }

    let clock = ManualClock::new();
    let recorder = Recorder {
        selection: trace.wheel.build(),
        clock: clock.clone(),
        entries: Vec::new(),
    };
    let config = trace.scroller.unwrap_or(config);
    let mut scroller =
        WheelScroller::with_clock(trace.orientation, recorder, config, clock.clone());
    let mut frames = 0;

    for event in &trace.events {
        while scroller.has_pending_frame() && clock.now_millis() + frame_ms <= event.at {
            clock.advance(frame_ms);
            scroller.on_frame();
            frames += 1;
        }
        clock.set(event.at);

        tracing::debug!("replay: {:?} at {}ms", event.action, event.at);
        match event.action {
            TraceAction::Scroll => scroller.scroll(event.distance, event.duration_ms),
            TraceAction::Stop => scroller.stop_scrolling(),
            _ => {
                if let Some(pointer) = event.pointer() {
                    scroller.on_touch_event(&pointer);
                }
            }
        }
    }

    let mut settle = 0;
    while scroller.has_pending_frame() {
        if settle == MAX_SETTLE_FRAMES {
            anyhow::bail!("wheel did not settle within {MAX_SETTLE_FRAMES} frames");
        }
        clock.advance(frame_ms);
        scroller.on_frame();
        settle += 1;
    }
    frames += settle;

    let recorder = scroller.into_listener();
    Ok(ReplayReport {
        entries: recorder.entries,
        frames,
        selection: recorder.selection,
    })
}
