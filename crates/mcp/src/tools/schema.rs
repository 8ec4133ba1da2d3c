// Input schemas for every tool

use super::name::ToolName;
use serde_json::{json, Value};

pub fn input_schema(tool: ToolName) -> Value {
    match tool {
        ToolName::ListTickets => json_schema_object(
            json!({
                "status": json_schema_string("Filter by status (e.g. open, pending, resolved, closed)"),
                "client_id": json_schema_integer("Only tickets for this client"),
                "assignee_id": json_schema_integer("Only tickets assigned to this user"),
                "stage_id": json_schema_integer("Only tickets in this stage"),
                "page": json_schema_integer("Page number, starting at 1"),
                "per_page": json_schema_integer("Results per page")
            }),
            vec![],
        ),
        ToolName::GetTicket => json_schema_object(
            json!({ "ticket_id": json_schema_integer("The ticket ID") }),
            vec!["ticket_id"],
        ),
        ToolName::CreateTicket => json_schema_object(
            json!({
                "subject": json_schema_string("Short summary of the issue"),
                "description": json_schema_string("Full description of the issue"),
                "client_id": json_schema_integer("Client the ticket is filed for"),
                "priority": {
                    "type": "string",
                    "description": "Ticket priority",
                    "enum": ["low", "normal", "high", "urgent"]
                },
                "assignee_id": json_schema_integer("User to assign the ticket to"),
                "catalog_item_id": json_schema_integer("Service catalog item the ticket relates to")
            }),
            vec!["subject", "client_id"],
        ),
        ToolName::UpdateTicket => json_schema_object(
            json!({
                "ticket_id": json_schema_integer("The ticket ID"),
                "subject": json_schema_string("New subject"),
                "status": json_schema_string("New status"),
                "priority": {
                    "type": "string",
                    "description": "New priority",
                    "enum": ["low", "normal", "high", "urgent"]
                },
                "assignee_id": json_schema_integer("New assignee"),
                "stage_id": json_schema_integer("New stage")
            }),
            vec!["ticket_id"],
        ),
        ToolName::ListClients | ToolName::ListUsers | ToolName::ListCatalogItems => {
            json_schema_object(
                json!({
                    "search": json_schema_string("Free-text search"),
                    "page": json_schema_integer("Page number, starting at 1"),
                    "per_page": json_schema_integer("Results per page")
                }),
                vec![],
            )
        }
        ToolName::GetClient => json_schema_object(
            json!({ "client_id": json_schema_integer("The client ID") }),
            vec!["client_id"],
        ),
        ToolName::CreateClient => json_schema_object(
            json!({
                "name": json_schema_string("Client name"),
                "email": json_schema_string("Primary contact email"),
                "phone": json_schema_string("Primary contact phone")
            }),
            vec!["name"],
        ),
        ToolName::GetUser => json_schema_object(
            json!({ "user_id": json_schema_integer("The user ID") }),
            vec!["user_id"],
        ),
        ToolName::ListStages => json_schema_object(json!({}), vec![]),
        ToolName::GetCatalogItem => json_schema_object(
            json!({ "item_id": json_schema_integer("The catalog item ID") }),
            vec!["item_id"],
        ),
        ToolName::ListTicketCommunications => json_schema_object(
            json!({ "ticket_id": json_schema_integer("The ticket ID") }),
            vec!["ticket_id"],
        ),
        ToolName::AddTicketCommunication => json_schema_object(
            json!({
                "ticket_id": json_schema_integer("The ticket ID"),
                "body": json_schema_string("Message text"),
                "internal": json_schema_boolean("Post as an internal note instead of a reply (default: false)")
            }),
            vec!["ticket_id", "body"],
        ),
    }
}

// Helper functions for creating tool schemas

pub fn json_schema_object(properties: Value, required: Vec<&str>) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_integer(description: &str) -> Value {
    json!({
        "type": "integer",
        "description": description
    })
}

pub fn json_schema_boolean(description: &str) -> Value {
    json!({
        "type": "boolean",
        "description": description
    })
}
