//! Net balance aggregation.

pub mod aggregator;

#[cfg(test)]
mod aggregator_props;

pub use aggregator::{Balance, BalanceAggregator, ParticipantSummary};
