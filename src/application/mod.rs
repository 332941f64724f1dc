//! Application layer orchestrating rounds at the table.
//!
//! `CrapsTable` validates wagers, rolls through its `DiceSource`, settles with
//! the pure domain engine, and persists the session through its
//! `SessionStore`. It uses per-session `tokio` locks so each session's
//! balance update is atomic.

pub mod table;
