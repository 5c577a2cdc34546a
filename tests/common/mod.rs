#![allow(dead_code)]
pub mod test_logs;
pub mod test_prelude;
