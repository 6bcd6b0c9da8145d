mod types;

pub use types::{Group, Grouping};
