mod load;
mod parse;

pub use load::load_dataset;
pub use parse::{Dataset, LinkRecord, NodeRecord, parse_dataset};
