pub mod echo;
pub mod hello_world;
pub mod math_add;

pub use echo::EchoTool;
pub use hello_world::HelloWorldTool;
pub use math_add::MathAddTool;
