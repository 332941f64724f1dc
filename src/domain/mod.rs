//! Domain layer: bets, dice, stakes, settlement, and the ports the outer
//! layers implement.
//!
//! Everything here except the ports is synchronous and free of I/O.

pub mod audit;
pub mod bet;
pub mod dice;
pub mod outcome;
pub mod ports;
pub mod session;
pub mod settlement;
pub mod wager;
