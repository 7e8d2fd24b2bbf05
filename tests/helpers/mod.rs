#![allow(dead_code, unused_imports)]
pub mod store_helpers;
pub mod test_db;

pub use store_helpers::*;
pub use test_db::*;
