pub mod debug_info;
pub mod get_time;

pub use debug_info::DebugInfoTool;
pub use get_time::{GetTimeTool, TimeFormat};
