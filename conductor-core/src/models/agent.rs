use serde::{Deserialize, Serialize};

/// The closed set of agent roles a step can be routed to.
///
/// Parsing an unknown name is an error at this boundary; falling back to
/// [`AgentKind::Generic`] for unregistered kinds is a registry concern, not
/// an enum concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "agent_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Hr,
    Marketing,
    Procurement,
    Product,
    TechSupport,
    Generic,
    Human,
    Planner,
    GroupChatManager,
}

impl AgentKind {
    /// Kinds that carry a tool catalog and can execute step actions.
    pub fn is_tool_agent(&self) -> bool {
        matches!(
            self,
            AgentKind::Hr
                | AgentKind::Marketing
                | AgentKind::Procurement
                | AgentKind::Product
                | AgentKind::TechSupport
                | AgentKind::Generic
        )
    }

    pub fn all_tool_agents() -> &'static [AgentKind] {
        &[
            AgentKind::Hr,
            AgentKind::Marketing,
            AgentKind::Procurement,
            AgentKind::Product,
            AgentKind::TechSupport,
            AgentKind::Generic,
        ]
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentKind::Hr => write!(f, "hr"),
            AgentKind::Marketing => write!(f, "marketing"),
            AgentKind::Procurement => write!(f, "procurement"),
            AgentKind::Product => write!(f, "product"),
            AgentKind::TechSupport => write!(f, "tech_support"),
            AgentKind::Generic => write!(f, "generic"),
            AgentKind::Human => write!(f, "human"),
            AgentKind::Planner => write!(f, "planner"),
            AgentKind::GroupChatManager => write!(f, "group_chat_manager"),
        }
    }
}

impl std::str::FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hr" => Ok(AgentKind::Hr),
            "marketing" => Ok(AgentKind::Marketing),
            "procurement" => Ok(AgentKind::Procurement),
            "product" => Ok(AgentKind::Product),
            "tech_support" => Ok(AgentKind::TechSupport),
            "generic" => Ok(AgentKind::Generic),
            "human" => Ok(AgentKind::Human),
            "planner" => Ok(AgentKind::Planner),
            "group_chat_manager" => Ok(AgentKind::GroupChatManager),
            other => Err(format!("unknown agent kind: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_display_roundtrip() {
        for kind in [
            AgentKind::Hr,
            AgentKind::Marketing,
            AgentKind::Procurement,
            AgentKind::Product,
            AgentKind::TechSupport,
            AgentKind::Generic,
            AgentKind::Human,
            AgentKind::Planner,
            AgentKind::GroupChatManager,
        ] {
            let parsed = AgentKind::from_str(&kind.to_string()).unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_unknown_kind_is_error() {
        assert!(AgentKind::from_str("finance").is_err());
    }

    #[test]
    fn test_tool_agents() {
        assert!(AgentKind::Hr.is_tool_agent());
        assert!(AgentKind::Generic.is_tool_agent());
        assert!(!AgentKind::Human.is_tool_agent());
        assert!(!AgentKind::Planner.is_tool_agent());
        assert!(!AgentKind::GroupChatManager.is_tool_agent());
        assert_eq!(AgentKind::all_tool_agents().len(), 6);
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&AgentKind::TechSupport).unwrap();
        assert_eq!(json, "\"tech_support\"");
        let parsed: AgentKind = serde_json::from_str("\"group_chat_manager\"").unwrap();
        assert_eq!(parsed, AgentKind::GroupChatManager);
    }
}
