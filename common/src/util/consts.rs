pub static VERSION: &str = env!("CARGO_PKG_VERSION");
pub static NAME: &str = "imagegen";

pub const TASK_NOT_FOUND: &str = "Task not found";
pub const CALLBACK_RETRIES: usize = 5;
