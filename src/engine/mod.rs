//! Simulation engine core.
//!
//! This module provides the complete engine for the slotted CSMA/CA
//! simulation. It integrates:
//! - The immutable run configuration
//! - The node FSM label set and output data model
//! - A seeded, reproducible PRNG with a documented draw order
//! - The per-tick channel observer (physical busy / collision / utilization)
//! - The per-tick NAV (virtual carrier sense) engine
//! - The per-node FSM driver
//! - The per-tick scheduler that composes all of the above
//!
//! ## Module Organization
//!
//! - `config`: `Config`, `PacketGenMode`.
//! - `types`: `FsmLabel`'s output counterparts, `TimelineCell`, `LogEntry`,
//!   `LogKind`, `Stats`, `SimulationResult`.
//! - `rng`: `SimRng`.
//! - `channel`: `ChannelSnapshot`, `TickClass`, `observe`.
//! - `nav`: `apply_nav`.
//! - `fsm`: `FsmLabel`, `Node`, the per-node `step` function.
//! - `scheduler`: `simulate`, the single public entry point.
//!
//! ## Public API
//!
//! The main entry point is [`scheduler::simulate`], re-exported at the crate
//! root as `csma_ca_sim::simulate`.

pub mod channel;
pub mod config;
pub mod fsm;
pub mod nav;
pub mod rng;
pub mod scheduler;
pub mod types;
