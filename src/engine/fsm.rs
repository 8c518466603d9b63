//! Per-node finite state machine driver.
//!
//! One context struct holds all of a node's mutable state and is advanced
//! once per scheduling step: packet arrival, the label transition for the
//! node's current state, and the timeline cell produced for this tick.
//!
//! Runs once per tick, after the channel observer and the NAV engine, and
//! advances every node exactly one step in ascending id order.

use std::collections::VecDeque;

use super::channel::ChannelSnapshot;
use super::config::{Config, PacketGenMode};
use super::nav;
use super::rng::SimRng;
use super::types::{LogEntry, LogKind, Stats, TimelineCell};

/// The node FSM's label set. `Collision` is visualization-only and is never
/// the node's stored label, it only ever appears as an overlay on a
/// transmit sub-state's timeline cell. `Failed` is a one-tick sink entered
/// right after a packet is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum FsmLabel {
    Idle,
    Sensing,
    Backoff,
    BackoffPaused,
    TxPreamble,
    TxFc,
    TxData,
    WaitRifs,
    RxAck,
    Collision,
    Failed,
}

/// `true` for the four labels the channel observer and the collision
/// overlay treat as "currently transmitting": `TxPreamble`, `TxFc`,
/// `TxData`, `RxAck`. `WaitRifs` is excluded: it occupies the channel
/// (counted as Tx time by the channel observer) but does not participate
/// in physical-overlap collision detection.
fn is_transmit_substate(label: FsmLabel) -> bool {
    matches!(label, FsmLabel::TxPreamble | FsmLabel::TxFc | FsmLabel::TxData | FsmLabel::RxAck)
}

/// One node's complete mutable state.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: u32,
    pub label: FsmLabel,
    /// FIFO of birth ticks for packets waiting to be sent.
    pub queue: VecDeque<u32>,
    /// Ticks remaining on the virtual carrier sense counter.
    pub nav: u32,
    /// Failed attempts on the current packet (0 on first attempt).
    pub nb: u32,
    /// Current backoff exponent.
    pub be: u8,
    /// Ticks remaining in the current backoff window.
    pub backoff_counter: u32,
    /// Progress in ticks through the current transmit/ack sub-state.
    pub tx_progress: u32,
    /// Set once the current transmission has overlapped with another.
    pub doomed: bool,
}

impl Node {
    pub fn new(id: u32, min_be: u8) -> Self {
        Self {
            id,
            label: FsmLabel::Idle,
            queue: VecDeque::new(),
            nav: 0,
            nb: 0,
            be: min_be,
            backoff_counter: 0,
            tx_progress: 0,
            doomed: false,
        }
    }

    pub fn is_transmitter(&self) -> bool {
        is_transmit_substate(self.label)
    }
}

fn reset_protocol_state(node: &mut Node, min_be: u8) {
    node.nb = 0;
    node.be = min_be;
    node.nav = 0;
    node.backoff_counter = 0;
    node.tx_progress = 0;
    node.doomed = false;
}

/// Packet arrival, independent of FSM state.
fn handle_arrival(node: &mut Node, config: &Config, tick: u32, rng: &mut SimRng, stats: &mut Stats, logs: &mut Vec<LogEntry>) {
    let arrived = match config.packet_gen_mode {
        // t=0 produces an arrival at every node, since 0 mod k == 0 for any k.
        PacketGenMode::Interval => tick % config.packet_interval == 0,
        PacketGenMode::Random => rng.packet_arrives(config.packet_prob),
    };

    if !arrived {
        return;
    }

    node.queue.push_back(tick);
    stats.total_packets_generated += 1;
    let depth = node.queue.len() as u32;
    if depth > stats.max_queue_depth {
        stats.max_queue_depth = depth;
    }
    logs.push(LogEntry {
        tick,
        node_id: node.id,
        kind: LogKind::Info,
        message: format!("Packet generated (Queue: {depth})"),
    });
}

/// Shared by the `Idle` and `Sensing` branches: draw (or wait on) a backoff
/// window once the channel is observed free.
///
/// A packet that just arrived on an idle node checks the channel
/// immediately using this tick's snapshot; if it's already free, the node
/// skips a separate sensing tick and starts its backoff draw right away.
/// That is why `Idle` falls through into this helper instead of always
/// parking in `Sensing` for at least one tick.
fn sense_and_maybe_backoff(node: &mut Node, snapshot: &ChannelSnapshot, config: &Config, tick: u32, rng: &mut SimRng, logs: &mut Vec<LogEntry>) {
    if !nav::channel_free(node, snapshot) {
        node.label = FsmLabel::Sensing;
        return;
    }

    let window = rng.backoff_window(node.be) + config.pe;
    node.backoff_counter = window;
    logs.push(LogEntry {
        tick,
        node_id: node.id,
        kind: LogKind::Info,
        message: format!("Start Backoff ({window})"),
    });

    if window == 0 {
        node.label = FsmLabel::TxPreamble;
        node.tx_progress = 0;
        node.doomed = false;
    } else {
        node.label = FsmLabel::Backoff;
    }
}

/// `Backoff`/`BackoffPaused` handling. Returns the counter value to carry
/// into the cell's `info` field.
fn handle_backoff(node: &mut Node, snapshot: &ChannelSnapshot, tick: u32, logs: &mut Vec<LogEntry>) -> u32 {
    if !nav::channel_free(node, snapshot) {
        node.label = FsmLabel::BackoffPaused;
        return node.backoff_counter;
    }

    node.label = FsmLabel::Backoff;
    let info = node.backoff_counter;

    if node.backoff_counter > 1 {
        node.backoff_counter -= 1;
    } else {
        // The counter==1 case skips a "0" tick and enters TxPreamble in the
        // same tick it reaches 1.
        node.label = FsmLabel::TxPreamble;
        node.tx_progress = 0;
        node.doomed = false;
        logs.push(LogEntry {
            tick,
            node_id: node.id,
            kind: LogKind::Info,
            message: "Backoff complete, transmitting".to_string(),
        });
    }

    info
}

fn handle_rx_ack(node: &mut Node, tick: u32, config: &Config, stats: &mut Stats, logs: &mut Vec<LogEntry>) {
    node.tx_progress += 1;
    if node.tx_progress < 2 {
        return;
    }

    if !node.doomed {
        let birth = node.queue.pop_front().expect("RxAck implies an in-flight packet");
        stats.total_latency += (tick - birth) as u64;
        stats.success_count += 1;
        match node.nb {
            0 => stats.success1st += 1,
            1 => stats.success2nd += 1,
            _ => stats.success3rd += 1,
        }
        logs.push(LogEntry {
            tick,
            node_id: node.id,
            kind: LogKind::Success,
            message: "ACK received, transaction complete".to_string(),
        });
        reset_protocol_state(node, config.min_be);
        node.label = if node.queue.is_empty() { FsmLabel::Idle } else { FsmLabel::Sensing };
        return;
    }

    node.nb += 1;
    if node.nb > config.max_nb {
        node.queue.pop_front();
        stats.failure_count += 1;
        reset_protocol_state(node, config.min_be);
        node.label = FsmLabel::Failed;
        logs.push(LogEntry {
            tick,
            node_id: node.id,
            kind: LogKind::Drop,
            message: "Max retries reached".to_string(),
        });
    } else {
        node.be = (node.be + 1).min(config.max_be);
        node.nav = 0;
        node.backoff_counter = 0;
        let nb = node.nb;
        let be = node.be;
        node.label = FsmLabel::Sensing;
        logs.push(LogEntry {
            tick,
            node_id: node.id,
            kind: LogKind::Collision,
            message: format!("No ACK. Retrying (NB={nb}, BE={be})"),
        });
    }
}

/// Advance one node exactly one tick: run packet arrival, dispatch the
/// transition for its pre-update label, then produce the timeline cell for
/// this tick.
pub fn step(node: &mut Node, snapshot: &ChannelSnapshot, config: &Config, tick: u32, rng: &mut SimRng, stats: &mut Stats, logs: &mut Vec<LogEntry>) -> TimelineCell {
    let entry_label = node.label;

    handle_arrival(node, config, tick, rng, stats, logs);

    let mut info = None;

    match entry_label {
        FsmLabel::Idle => {
            if !node.queue.is_empty() {
                reset_protocol_state(node, config.min_be);
                sense_and_maybe_backoff(node, snapshot, config, tick, rng, logs);
            }
        }
        FsmLabel::Sensing => sense_and_maybe_backoff(node, snapshot, config, tick, rng, logs),
        FsmLabel::Backoff | FsmLabel::BackoffPaused => {
            info = Some(handle_backoff(node, snapshot, tick, logs));
        }
        FsmLabel::TxPreamble => {
            node.tx_progress += 1;
            if node.tx_progress >= 1 {
                node.label = FsmLabel::TxFc;
                node.tx_progress = 0;
            }
        }
        FsmLabel::TxFc => {
            node.tx_progress += 1;
            if node.tx_progress >= 1 {
                node.label = FsmLabel::TxData;
                node.tx_progress = 0;
            }
        }
        FsmLabel::TxData => {
            node.tx_progress += 1;
            if node.tx_progress >= config.data_slots {
                node.label = FsmLabel::WaitRifs;
                node.tx_progress = 0;
            }
        }
        FsmLabel::WaitRifs => {
            node.tx_progress += 1;
            if node.tx_progress >= 1 {
                node.label = FsmLabel::RxAck;
                node.tx_progress = 0;
            }
        }
        FsmLabel::RxAck => handle_rx_ack(node, tick, config, stats, logs),
        FsmLabel::Failed => {
            node.label = if node.queue.is_empty() { FsmLabel::Idle } else { FsmLabel::Sensing };
        }
        FsmLabel::Collision => unreachable!("Collision is a visualization-only overlay, never a stored label"),
    }

    let mut cell = TimelineCell::new(entry_label);
    cell.info = info;
    if is_transmit_substate(entry_label) && snapshot.collision {
        cell.state = FsmLabel::Collision;
        cell.is_collision = true;
    }
    cell
}
