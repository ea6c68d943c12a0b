mod common;
pub use common::*;

mod memory;
pub use memory::*;
