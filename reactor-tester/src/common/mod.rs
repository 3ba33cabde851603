pub mod util;

pub use util::{split_csv, timestamp};
