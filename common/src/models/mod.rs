mod generate;
pub use generate::*;

mod jobs;
pub use jobs::*;
