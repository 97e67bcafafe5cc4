pub mod expression;
pub mod identity;
pub mod motif;
pub mod tissue;
