//! Channel observer: per-tick classification of the shared medium.
//!
//! Inspects every node's label once per tick and classifies overlap as a
//! binary physical-overlap model: two or more simultaneous transmitters is
//! a collision, full stop, with no path loss or capture effect involved.
//!
//! Runs once per tick, strictly before the NAV engine and the FSM driver,
//! and reads only the *pre-update* FSM label of every node. The channel
//! observer and the NAV engine both depend on seeing labels as they stood
//! at the start of the tick, before any node's state advances.

use super::fsm::{FsmLabel, Node};
use super::types::{LogEntry, LogKind, Stats};

/// This tick's channel-utilization bucket, in the priority order the spec
/// defines: collision beats transmit-time beats backoff-time beats idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickClass {
    Idle,
    Tx,
    Collision,
    Backoff,
}

/// Read-only facts about this tick's channel state, as seen by the NAV
/// engine and the FSM driver.
#[derive(Debug, Clone, Copy)]
pub struct ChannelSnapshot {
    /// `|T| > 0`: at least one node is in a transmit sub-state.
    pub physical_busy: bool,
    /// `|T| > 1`: more than one node is in a transmit sub-state.
    pub collision: bool,
    /// `|P| > 0`: at least one node is in `TxPreamble`.
    pub preamble_active: bool,
    /// `|F| > 0`: at least one node is in `TxFc`. Only meaningful in
    /// conjunction with `!collision`.
    pub fc_active: bool,
    pub class: TickClass,
}

/// Classify this tick's channel state from every node's pre-update label,
/// flip `doomed` on newly-colliding transmitters, and update the
/// channel-utilization counters in `stats`.
///
/// Must be called before any node's label changes this tick.
pub fn observe(nodes: &mut [Node], tick: u32, stats: &mut Stats, logs: &mut Vec<LogEntry>) -> ChannelSnapshot {
    let mut transmitters = 0u32;
    let mut preamble_count = 0u32;
    let mut fc_count = 0u32;
    let mut wait_rifs_count = 0u32;
    let mut backoff_present = false;

    for node in nodes.iter() {
        match node.label {
            FsmLabel::TxPreamble => {
                transmitters += 1;
                preamble_count += 1;
            }
            FsmLabel::TxFc => {
                transmitters += 1;
                fc_count += 1;
            }
            FsmLabel::TxData | FsmLabel::RxAck => transmitters += 1,
            FsmLabel::WaitRifs => wait_rifs_count += 1,
            FsmLabel::Backoff | FsmLabel::BackoffPaused => backoff_present = true,
            FsmLabel::Idle | FsmLabel::Sensing | FsmLabel::Collision | FsmLabel::Failed => {}
        }
    }

    let physical_busy = transmitters > 0;
    let collision = transmitters > 1;
    let preamble_active = preamble_count > 0;
    let fc_active = fc_count > 0;

    if collision {
        for node in nodes.iter_mut() {
            if node.is_transmitter() && !node.doomed {
                node.doomed = true;
                stats.collision_count += 1;
                logs.push(LogEntry {
                    tick,
                    node_id: node.id,
                    kind: LogKind::Collision,
                    message: "Signal overlap detected".to_string(),
                });
            }
        }
    }

    let class = if collision {
        TickClass::Collision
    } else if physical_busy || wait_rifs_count > 0 {
        TickClass::Tx
    } else if backoff_present {
        TickClass::Backoff
    } else {
        TickClass::Idle
    };

    match class {
        TickClass::Collision => stats.channel_collision_ticks += 1,
        TickClass::Tx => stats.channel_tx_ticks += 1,
        TickClass::Backoff => stats.channel_backoff_ticks += 1,
        TickClass::Idle => stats.channel_idle_ticks += 1,
    }

    ChannelSnapshot {
        physical_busy,
        collision,
        preamble_active,
        fc_active,
        class,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle_node(id: u32) -> Node {
        Node::new(id, 0)
    }

    fn transmitting(id: u32, label: FsmLabel) -> Node {
        let mut n = Node::new(id, 0);
        n.label = label;
        n
    }

    #[test]
    fn all_idle_classifies_idle() {
        let mut nodes = vec![idle_node(0), idle_node(1)];
        let mut stats = Stats::default();
        let mut logs = Vec::new();
        let snap = observe(&mut nodes, 0, &mut stats, &mut logs);
        assert_eq!(snap.class, TickClass::Idle);
        assert!(!snap.physical_busy);
        assert!(!snap.collision);
        assert_eq!(stats.channel_idle_ticks, 1);
    }

    #[test]
    fn single_transmitter_is_tx_not_collision() {
        let mut nodes = vec![transmitting(0, FsmLabel::TxPreamble), idle_node(1)];
        let mut stats = Stats::default();
        let mut logs = Vec::new();
        let snap = observe(&mut nodes, 0, &mut stats, &mut logs);
        assert!(snap.physical_busy);
        assert!(!snap.collision);
        assert_eq!(snap.class, TickClass::Tx);
        assert_eq!(stats.channel_tx_ticks, 1);
        assert!(logs.is_empty());
    }

    #[test]
    fn two_transmitters_collide_and_flip_doomed_once() {
        let mut nodes = vec![transmitting(0, FsmLabel::TxPreamble), transmitting(1, FsmLabel::TxData)];
        let mut stats = Stats::default();
        let mut logs = Vec::new();

        let snap = observe(&mut nodes, 3, &mut stats, &mut logs);
        assert!(snap.collision);
        assert_eq!(snap.class, TickClass::Collision);
        assert!(nodes[0].doomed && nodes[1].doomed);
        assert_eq!(stats.collision_count, 2);
        assert_eq!(logs.len(), 2);
        assert!(logs.iter().all(|l| matches!(l.kind, LogKind::Collision)));

        // Re-observing the same still-doomed transmitters must not double count.
        let _ = observe(&mut nodes, 4, &mut stats, &mut logs);
        assert_eq!(stats.collision_count, 2);
        assert_eq!(logs.len(), 2);
    }

    #[test]
    fn wait_rifs_counts_as_tx_time() {
        let mut nodes = vec![transmitting(0, FsmLabel::WaitRifs)];
        let mut stats = Stats::default();
        let mut logs = Vec::new();
        let snap = observe(&mut nodes, 0, &mut stats, &mut logs);
        assert!(!snap.physical_busy);
        assert_eq!(snap.class, TickClass::Tx);
        assert_eq!(stats.channel_tx_ticks, 1);
    }

    #[test]
    fn backoff_present_with_no_tx_is_backoff_bucket() {
        let mut nodes = vec![transmitting(0, FsmLabel::Backoff)];
        let mut stats = Stats::default();
        let mut logs = Vec::new();
        let snap = observe(&mut nodes, 0, &mut stats, &mut logs);
        assert_eq!(snap.class, TickClass::Backoff);
        assert_eq!(stats.channel_backoff_ticks, 1);
    }
}
