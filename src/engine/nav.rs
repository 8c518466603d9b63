//! NAV (virtual carrier sense) engine.
//!
//! Tracks, per non-transmitting node, a busy window that must be treated as
//! occupied regardless of that node's own activity: an integer tick
//! countdown, set or extended by what the node hears on the channel and
//! decremented once per tick until it reaches zero.
//!
//! Runs once per tick, after the channel observer and before the FSM
//! driver, and only for nodes that are not themselves transmitting this
//! tick. A transmitter is the source of the signal, not an observer of it.

use super::channel::ChannelSnapshot;
use super::config::Config;
use super::fsm::Node;
use super::types::{LogEntry, LogKind};

/// Update one non-transmitting node's NAV counter for this tick.
///
/// Caller must not invoke this for a node that is currently a transmitter
/// (see `Node::is_transmitter`).
pub fn apply(node: &mut Node, snapshot: &ChannelSnapshot, config: &Config, tick: u32, logs: &mut Vec<LogEntry>) {
    debug_assert!(!node.is_transmitter(), "NAV engine must not run on a transmitting node");

    let nav_prev = node.nav;

    if snapshot.preamble_active {
        node.nav = node.nav.max(config.collision_penalty);
        if nav_prev == 0 {
            logs.push(LogEntry {
                tick,
                node_id: node.id,
                kind: LogKind::Vcs,
                message: format!("Heard Preamble, VCS set to {}", config.collision_penalty),
            });
        }
    }

    // The "Decoded FC" log fires every tick this condition holds for a
    // non-transmitter, not just on the rising edge.
    if snapshot.fc_active && !snapshot.collision {
        let value = config.data_slots + 1 + 1 + 1;
        node.nav = value;
        logs.push(LogEntry {
            tick,
            node_id: node.id,
            kind: LogKind::Vcs,
            message: format!("Decoded FC, NAV set to {}", value),
        });
    }

    if node.nav > 0 {
        node.nav -= 1;
    }
}

/// A node considers the channel idle iff it is not itself transmitting,
/// there is no physical activity, and its NAV has counted down to zero.
pub fn channel_free(node: &Node, snapshot: &ChannelSnapshot) -> bool {
    !snapshot.physical_busy && node.nav == 0
}
