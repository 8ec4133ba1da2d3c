mod catalog;
mod clients;
mod communications;
mod name;
mod registry;
mod schema;
mod stages;
mod tickets;
mod users;

pub use catalog::CatalogTools;
pub use clients::ClientTools;
pub use communications::CommunicationTools;
pub use name::{ToolDomain, ToolName, UnknownTool};
pub use registry::{descriptor, ToolError, ToolHandler, ToolRegistry};
pub use schema::{
    input_schema, json_schema_boolean, json_schema_integer, json_schema_object,
    json_schema_string,
};
pub use stages::StageTools;
pub use tickets::TicketTools;
pub use users::UserTools;
