//! The per-tick scheduler: the engine's single public entry point.
//!
//! Owns the node list for the life of a run and drives one phase per tick
//! across it, in a synchronous `for tick in 0..duration` loop: the engine
//! runs to completion in one call and never waits on real time.
//!
//! Per-tick order: channel observer, then the NAV engine for every
//! non-transmitting node in ascending id order, then the FSM driver for
//! every node in ascending id order. This ordering is load-bearing: the
//! channel observer and the NAV engine must both see the *pre-update*
//! labels, and the FSM driver's RNG draws must happen in ascending node id
//! order for a run to be reproducible byte-for-byte across repeated calls
//! with the same seed.

use std::collections::HashMap;

use super::channel;
use super::config::Config;
use super::fsm::{self, Node};
use super::nav;
use super::rng::SimRng;
use super::types::{SimulationResult, Stats, Timeline};

/// Run one complete simulation to completion and return its trace, event
/// log, and aggregate statistics.
///
/// `seed` is the only source of randomness; two calls with the same
/// `config` and `seed` produce byte-identical results.
pub fn simulate(config: &Config, seed: u64) -> SimulationResult {
    let mut nodes: Vec<Node> = (0..config.node_count).map(|id| Node::new(id, config.min_be)).collect();
    let mut rng = SimRng::from_seed(seed);
    let mut stats = Stats::default();
    let mut logs = Vec::new();
    let mut timeline: Timeline = HashMap::with_capacity(nodes.len());
    for node in &nodes {
        timeline.insert(node.id, Vec::with_capacity(config.sim_duration as usize));
    }

    for tick in 0..config.sim_duration {
        let snapshot = channel::observe(&mut nodes, tick, &mut stats, &mut logs);

        for node in nodes.iter_mut() {
            if !node.is_transmitter() {
                nav::apply(node, &snapshot, config, tick, &mut logs);
            }
        }

        for node in nodes.iter_mut() {
            let cell = fsm::step(node, &snapshot, config, tick, &mut rng, &mut stats, &mut logs);
            timeline.get_mut(&node.id).expect("every node has a timeline row").push(cell);
        }

        log::trace!("tick {tick} complete: class={:?}", snapshot.class);
    }

    SimulationResult {
        timeline,
        logs,
        stats,
        duration: config.sim_duration,
    }
}
