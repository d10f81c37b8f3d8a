//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{
    MAX_AMOUNT, SETTLED_TOLERANCE, SPLIT_TOLERANCE, floor_money, is_cent_precise, is_settled,
    round_money, snap_settled, within_split_tolerance,
};
