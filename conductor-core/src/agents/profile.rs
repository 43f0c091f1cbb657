use crate::error::{ConductorError, ConductorResult};
use crate::models::AgentKind;

use super::tools::ToolCatalog;

/// One configurable agent definition: a kind, a system message, and a static
/// tool catalog. All agents share this shape; there is no per-domain type.
#[derive(Debug, Clone)]
pub struct AgentProfile {
    pub kind: AgentKind,
    pub system_message: String,
    pub catalog: ToolCatalog,
}

impl AgentProfile {
    pub fn new(kind: AgentKind, system_message: impl Into<String>, catalog: ToolCatalog) -> Self {
        Self {
            kind,
            system_message: system_message.into(),
            catalog,
        }
    }

    /// Builtin profile for a tool-carrying agent kind, with its catalog
    /// loaded from the JSON embedded in the crate.
    pub fn builtin(kind: AgentKind) -> ConductorResult<Self> {
        let raw = match kind {
            AgentKind::Hr => include_str!("../../catalogs/hr.json"),
            AgentKind::Marketing => include_str!("../../catalogs/marketing.json"),
            AgentKind::Procurement => include_str!("../../catalogs/procurement.json"),
            AgentKind::Product => include_str!("../../catalogs/product.json"),
            AgentKind::TechSupport => include_str!("../../catalogs/tech_support.json"),
            AgentKind::Generic => include_str!("../../catalogs/generic.json"),
            other => {
                return Err(ConductorError::CatalogLoadFailed {
                    agent: other.to_string(),
                    message: "kind does not carry a tool catalog".to_string(),
                })
            }
        };

        let catalog =
            ToolCatalog::from_json(raw).map_err(|e| ConductorError::CatalogLoadFailed {
                agent: kind.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self::new(kind, builtin_system_message(kind), catalog))
    }

    /// All builtin tool-agent profiles.
    pub fn all_builtin() -> ConductorResult<Vec<Self>> {
        AgentKind::all_tool_agents()
            .iter()
            .map(|kind| Self::builtin(*kind))
            .collect()
    }
}

fn builtin_system_message(kind: AgentKind) -> &'static str {
    match kind {
        AgentKind::Hr => {
            "You are an HR agent. Resolve each instruction with exactly one of your HR tools. \
             Do not invent tools or answer outside your catalog."
        }
        AgentKind::Marketing => {
            "You are a marketing agent. Resolve each instruction with exactly one of your \
             marketing tools. Do not invent tools or answer outside your catalog."
        }
        AgentKind::Procurement => {
            "You are a procurement agent. Resolve each instruction with exactly one of your \
             procurement tools. Do not invent tools or answer outside your catalog."
        }
        AgentKind::Product => {
            "You are a product agent. Resolve each instruction with exactly one of your product \
             tools. Do not invent tools or answer outside your catalog."
        }
        AgentKind::TechSupport => {
            "You are a tech support agent. Resolve each instruction with exactly one of your \
             tech support tools. Do not invent tools or answer outside your catalog."
        }
        _ => {
            "You are a generalist agent. Resolve the instruction with one of your tools, or \
             reply directly when no tool fits."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profiles_load() {
        for kind in AgentKind::all_tool_agents() {
            let profile = AgentProfile::builtin(*kind).unwrap();
            assert_eq!(profile.kind, *kind);
            assert!(!profile.catalog.is_empty(), "{kind} catalog is empty");
            assert!(!profile.system_message.is_empty());
        }
    }

    #[test]
    fn test_builtin_rejects_non_tool_kinds() {
        assert!(AgentProfile::builtin(AgentKind::Human).is_err());
        assert!(AgentProfile::builtin(AgentKind::Planner).is_err());
        assert!(AgentProfile::builtin(AgentKind::GroupChatManager).is_err());
    }

    #[test]
    fn test_all_builtin_count() {
        let profiles = AgentProfile::all_builtin().unwrap();
        assert_eq!(profiles.len(), 6);
    }
}
