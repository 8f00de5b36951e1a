//! Built-in handlers registered at startup.

pub mod echo;
pub mod greeting;
pub mod readme;

pub use echo::EchoTool;
pub use greeting::GreetingPrompt;
pub use readme::{ReadmeResource, README_URI};
