//! Output data model: the timeline, the event log, and run statistics.
//!
//! These are the structures handed back to a host by [`crate::simulate`].
//! They derive `Serialize` so an external trace viewer, event-log
//! presenter, or statistics dashboard can consume them directly; this crate
//! has no such consumer of its own.

use std::collections::HashMap;

use serde::Serialize;

use super::fsm::FsmLabel;

/// One tick's worth of visualization data for a single node.
///
/// `info` carries the backoff counter value while the node's visual label
/// is `Backoff`/`BackoffPaused`; it is `None` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineCell {
    pub state: FsmLabel,
    pub info: Option<u32>,
    pub is_collision: bool,
}

impl TimelineCell {
    pub(crate) fn new(state: FsmLabel) -> Self {
        Self {
            state,
            info: None,
            is_collision: false,
        }
    }
}

/// Timeline rows, keyed by node id. Every row has exactly `simDuration`
/// cells.
pub type Timeline = HashMap<u32, Vec<TimelineCell>>;

/// The kind of event a [`LogEntry`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogKind {
    Info,
    Vcs,
    Collision,
    Success,
    Drop,
}

/// One entry in the ordered event log.
///
/// Entries are appended in production order: within a tick,
/// channel-collision logs precede NAV logs, which precede FSM transition
/// logs, and nodes are visited in ascending id.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub tick: u32,
    pub node_id: u32,
    pub kind: LogKind,
    pub message: String,
}

/// Aggregate channel and packet statistics for a completed run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    pub channel_idle_ticks: u32,
    pub channel_tx_ticks: u32,
    pub channel_collision_ticks: u32,
    pub channel_backoff_ticks: u32,

    pub total_packets_generated: u32,
    pub max_queue_depth: u32,
    pub total_latency: u64,
    pub collision_count: u32,

    pub success_count: u32,
    pub success1st: u32,
    pub success2nd: u32,
    pub success3rd: u32,
    pub failure_count: u32,
}

impl Stats {
    /// `totalLatency / successCount`. Provided as a convenience so every
    /// host doesn't reimplement the same division-by-zero guard; it is not
    /// a stored counter.
    pub fn average_latency(&self) -> f64 {
        if self.success_count == 0 {
            0.0
        } else {
            self.total_latency as f64 / self.success_count as f64
        }
    }
}

/// The complete output of one [`crate::simulate`] call.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    pub timeline: Timeline,
    pub logs: Vec<LogEntry>,
    pub stats: Stats,
    pub duration: u32,
}
