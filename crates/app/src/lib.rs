//! # starhook-app
//!
//! Application layer — the sequencer trigger plugins, the equipment catalog,
//! and the **port definitions** (traits) they consume.
//!
//! ## Responsibilities
//! - Define **port traits** for everything owned by the imaging host:
//!   - `Clock` — current local wall-clock time
//!   - `TimeSource` — fixed astronomical times (sunrise, sunset, …)
//!   - `Notifier` — user-visible success toasts
//!   - `Localizer` — string table lookup
//!   - `ProgressSink` — status reporting while a trigger executes
//!   - `EquipmentProvider` — devices offered by an equipment plugin
//! - Implement the **triggers** (`TimedTrigger`, `IntervalTrigger`) behind the
//!   `SequenceTrigger` contract the sequence engine polls
//! - Provide **in-process infrastructure** that doesn't need IO: cancellation
//!   signals, the time-source registry, a static localizer, and a runner that
//!   plays the host's polling contract
//!
//! ## Dependency rule
//! Depends on `starhook-domain` only (plus `tokio::sync` for cancellation and
//! `rand` for the interval trigger). Never imports adapter crates.

pub mod cancellation;
pub mod localizer;
pub mod ports;
pub mod services;
pub mod time_sources;
pub mod trigger_runner;
pub mod triggers;
