// MCP (Model Context Protocol) building blocks for the Desk gateway:
// protocol types, the closed tool set, and request-scoped dispatch

pub mod dispatch;
pub mod protocol;
pub mod tools;

pub use dispatch::{BoundTool, DispatchBuilder, DispatchError, DispatchTable};
pub use tools::{ToolDomain, ToolError, ToolName, ToolRegistry};
