// Closed set of tool names and the domains that serve them

use std::fmt;
use std::str::FromStr;

/// Area of the Desk API a tool belongs to. Each domain has exactly one
/// handler implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolDomain {
    Tickets,
    Clients,
    Users,
    Stages,
    Catalog,
    Communications,
}

impl fmt::Display for ToolDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Tickets => "tickets",
            Self::Clients => "clients",
            Self::Users => "users",
            Self::Stages => "stages",
            Self::Catalog => "catalog",
            Self::Communications => "communications",
        };
        f.write_str(name)
    }
}

/// Every tool the gateway exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    ListTickets,
    GetTicket,
    CreateTicket,
    UpdateTicket,
    ListClients,
    GetClient,
    CreateClient,
    ListUsers,
    GetUser,
    ListStages,
    ListCatalogItems,
    GetCatalogItem,
    ListTicketCommunications,
    AddTicketCommunication,
}

impl ToolName {
    /// All tools, in the order `tools/list` reports them.
    pub const ALL: [ToolName; 14] = [
        Self::ListTickets,
        Self::GetTicket,
        Self::CreateTicket,
        Self::UpdateTicket,
        Self::ListClients,
        Self::GetClient,
        Self::CreateClient,
        Self::ListUsers,
        Self::GetUser,
        Self::ListStages,
        Self::ListCatalogItems,
        Self::GetCatalogItem,
        Self::ListTicketCommunications,
        Self::AddTicketCommunication,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ListTickets => "list_tickets",
            Self::GetTicket => "get_ticket",
            Self::CreateTicket => "create_ticket",
            Self::UpdateTicket => "update_ticket",
            Self::ListClients => "list_clients",
            Self::GetClient => "get_client",
            Self::CreateClient => "create_client",
            Self::ListUsers => "list_users",
            Self::GetUser => "get_user",
            Self::ListStages => "list_stages",
            Self::ListCatalogItems => "list_catalog_items",
            Self::GetCatalogItem => "get_catalog_item",
            Self::ListTicketCommunications => "list_ticket_communications",
            Self::AddTicketCommunication => "add_ticket_communication",
        }
    }

    pub fn domain(self) -> ToolDomain {
        match self {
            Self::ListTickets | Self::GetTicket | Self::CreateTicket | Self::UpdateTicket => {
                ToolDomain::Tickets
            }
            Self::ListClients | Self::GetClient | Self::CreateClient => ToolDomain::Clients,
            Self::ListUsers | Self::GetUser => ToolDomain::Users,
            Self::ListStages => ToolDomain::Stages,
            Self::ListCatalogItems | Self::GetCatalogItem => ToolDomain::Catalog,
            Self::ListTicketCommunications | Self::AddTicketCommunication => {
                ToolDomain::Communications
            }
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::ListTickets => {
                "List tickets, optionally filtered by status, client, assignee or stage"
            }
            Self::GetTicket => "Get a single ticket by its ID",
            Self::CreateTicket => "Create a new ticket for a client",
            Self::UpdateTicket => "Update the subject, status, priority, assignee or stage of a ticket",
            Self::ListClients => "List client accounts, optionally searching by name or email",
            Self::GetClient => "Get a single client account by its ID",
            Self::CreateClient => "Create a new client account",
            Self::ListUsers => "List agents and administrators of the account",
            Self::GetUser => "Get a single user by their ID",
            Self::ListStages => "List the workflow stages a ticket can be moved through",
            Self::ListCatalogItems => "List service catalog items tickets can be filed against",
            Self::GetCatalogItem => "Get a single service catalog item by its ID",
            Self::ListTicketCommunications => "List the replies and internal notes on a ticket",
            Self::AddTicketCommunication => "Add a reply or an internal note to a ticket",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known tool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool: {0}")]
pub struct UnknownTool(pub String);

impl FromStr for ToolName {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| UnknownTool(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_round_trip_and_are_unique() {
        let mut seen = HashSet::new();
        for tool in ToolName::ALL {
            assert!(seen.insert(tool.as_str()), "duplicate name {}", tool);
            assert_eq!(tool.as_str().parse::<ToolName>(), Ok(tool));
        }
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            "does_not_exist".parse::<ToolName>(),
            Err(UnknownTool("does_not_exist".to_string()))
        );
        // Names are case-sensitive.
        assert!("LIST_TICKETS".parse::<ToolName>().is_err());
    }

    #[test]
    fn test_every_domain_has_a_tool() {
        let domains: HashSet<_> = ToolName::ALL.iter().map(|t| t.domain()).collect();
        assert_eq!(domains.len(), 6);
    }
}
