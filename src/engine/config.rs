//! Run configuration for the simulation engine.
//!
//! A single `Deserialize`/`Serialize` struct carrying every knob the
//! engine reads, with `camelCase` wire names so hosts can hand the engine
//! JSON/TOML produced by an external configuration surface unchanged.
//!
//! Out-of-range values (`minBe > maxBe`, negative counts, `packetInterval <
//! 1`, ...) are the caller's responsibility to validate; this module adds
//! no validation layer of its own.

use serde::{Deserialize, Serialize};

/// Packet arrival model for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PacketGenMode {
    /// Per-tick Bernoulli trial with probability `packetProb`, drawn
    /// independently per node per tick.
    Random,
    /// A packet arrives every `packetInterval` ticks, including at `t=0`.
    Interval,
}

/// Immutable configuration for one simulation run.
///
/// Units are ticks unless otherwise noted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Total ticks to simulate (>= 1).
    pub sim_duration: u32,
    /// Number of nodes in the collision domain (>= 1).
    pub node_count: u32,
    /// Payload length in ticks (>= 1).
    pub data_slots: u32,
    /// NAV duration set on hearing any preamble.
    pub collision_penalty: u32,
    /// Fixed priority/preamble slots added to every backoff draw.
    pub pe: u32,
    /// Minimum backoff exponent.
    pub min_be: u8,
    /// Maximum backoff exponent (>= `min_be`).
    pub max_be: u8,
    /// Maximum retries before drop; drop occurs when attempt `maxNb + 1`
    /// also fails.
    pub max_nb: u32,
    /// Packet arrival model.
    pub packet_gen_mode: PacketGenMode,
    /// Per-tick arrival probability, used when `packet_gen_mode ==
    /// Random`.
    pub packet_prob: f64,
    /// Arrival period in ticks, used when `packet_gen_mode == Interval`
    /// (>= 1).
    pub packet_interval: u32,
    /// Display-only slot duration in microseconds; not used by engine
    /// logic.
    pub slot_duration_us: u32,
}

impl Config {
    /// Total air-time in ticks of a single transmission attempt:
    /// `P + FC + Data + RIFS + AckP + AckFc = 3 + data_slots + 2`.
    pub fn attempt_air_time(&self) -> u32 {
        3 + self.data_slots + 2
    }
}
