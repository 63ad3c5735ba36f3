pub mod aggregator;
pub mod criteria;
pub mod filter_spec;
pub mod predicate;
