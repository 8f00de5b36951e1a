//! Request/response value types for the three handler categories.
//!
//! - Action (tools): named arguments in, a list of content blocks out.
//! - Data-read (resources): a URI in, an ordered list of content chunks out.
//! - Template (prompts): string arguments in, role-tagged messages out.
//!
//! None of these types assume a particular wire encoding; they are plain
//! serde values so any transport can carry them.

pub mod category;
pub mod prompt;
pub mod resource;
pub mod tool;

pub use category::Category;
pub use prompt::{GetPromptRequest, GetPromptResult, PromptArgument, PromptDef, PromptMessage, Role};
pub use resource::{ReadResourceRequest, ResourceContents, ResourceDef};
pub use tool::{CallToolRequest, CallToolResult, Content, ToolDef, ToolParam};
