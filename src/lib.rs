//! Deterministic discrete-event simulator for a slotted CSMA/CA medium-access
//! protocol modeled on IEEE 802.15.4.
//!
//! ## Purpose
//!
//! Given a [`Config`](engine::Config) describing per-node traffic and
//! protocol parameters, [`simulate`] produces a tick-by-tick trace of every
//! node's state, an ordered event log, and aggregate channel/packet
//! statistics. The run is a pure, one-shot computation: no async executor,
//! no wall clock, no I/O. Everything that makes two runs differ is either in
//! `config` or in the seed handed to [`simulate`].
//!
//! ## Module Organization
//!
//! - `engine::config`: the immutable run configuration (`Config`,
//!   `PacketGenMode`).
//! - `engine::types`: the node FSM label set and the output data model
//!   (`Timeline`, `LogEntry`, `Stats`, `SimulationResult`).
//! - `engine::rng`: the seeded PRNG wrapper and its documented draw order.
//! - `engine::channel`: the per-tick channel observer (physical busy,
//!   collision, channel-utilization classification).
//! - `engine::nav`: the virtual carrier sense (NAV) engine.
//! - `engine::fsm`: the per-node state machine driver.
//! - `engine::scheduler`: the per-tick loop that composes the above into
//!   [`simulate`].
//!
//! ## Out of scope
//!
//! Configuration input surfaces, UI rendering of the produced trace, event
//! log presentation, statistics dashboards, and persistence are treated as
//! external collaborators. This crate has no binary target and no CLI of
//! its own; it is consumed as a library.

pub mod engine;

pub use engine::channel::{ChannelSnapshot, TickClass};
pub use engine::config::{Config, PacketGenMode};
pub use engine::fsm::FsmLabel;
pub use engine::scheduler::simulate;
pub use engine::types::{LogEntry, LogKind, SimulationResult, Stats, TimelineCell};
