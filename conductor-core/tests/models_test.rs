use std::str::FromStr;

use uuid::Uuid;

use conductor_core::models::{
    ActionRequest, ActionResponse, ActionStatus, AgentKind, AgentMessage, Plan, PlanStatus, Step,
    StepStatus,
};

mod agent_kind_tests {
    use super::*;

    #[test]
    fn test_serialization_roundtrip() {
        let kinds = vec![
            AgentKind::Hr,
            AgentKind::Marketing,
            AgentKind::Procurement,
            AgentKind::Product,
            AgentKind::TechSupport,
            AgentKind::Generic,
            AgentKind::Human,
            AgentKind::Planner,
            AgentKind::GroupChatManager,
        ];

        for kind in kinds {
            let json = serde_json::to_string(&kind).unwrap();
            let deserialized: AgentKind = serde_json::from_str(&json).unwrap();
            assert_eq!(kind, deserialized);
        }
    }

    #[test]
    fn test_display_matches_serde() {
        let json = serde_json::to_string(&AgentKind::TechSupport).unwrap();
        assert_eq!(json.trim_matches('"'), AgentKind::TechSupport.to_string());
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!(AgentKind::from_str("sales").is_err());
        assert!(AgentKind::from_str("").is_err());
    }
}

mod plan_tests {
    use super::*;

    #[test]
    fn test_plan_serialization_roundtrip() {
        let plan = Plan::new(Uuid::new_v4(), "organize an offsite");
        let json = serde_json::to_string(&plan).unwrap();
        let deserialized: Plan = serde_json::from_str(&json).unwrap();

        assert_eq!(plan.id, deserialized.id);
        assert_eq!(plan.session_id, deserialized.session_id);
        assert_eq!(plan.initial_goal, deserialized.initial_goal);
        assert_eq!(plan.overall_status, deserialized.overall_status);
    }

    #[test]
    fn test_plan_lifecycle() {
        let mut plan = Plan::new(Uuid::new_v4(), "goal");
        assert_eq!(plan.overall_status, PlanStatus::Created);

        plan.mark_in_progress();
        assert_eq!(plan.overall_status, PlanStatus::InProgress);

        plan.mark_completed();
        assert!(plan.is_completed());
    }
}

mod step_tests {
    use super::*;

    #[test]
    fn test_step_serialization_roundtrip() {
        let mut step = Step::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            AgentKind::Procurement,
            "order laptops",
            3,
        );
        step.human_feedback = Some("looks good".to_string());
        step.identified_target_state = Some("ordered".to_string());

        let json = serde_json::to_string(&step).unwrap();
        let deserialized: Step = serde_json::from_str(&json).unwrap();

        assert_eq!(step.id, deserialized.id);
        assert_eq!(step.agent, deserialized.agent);
        assert_eq!(step.order_index, deserialized.order_index);
        assert_eq!(step.human_feedback, deserialized.human_feedback);
        assert_eq!(
            step.identified_target_state,
            deserialized.identified_target_state
        );
    }

    #[test]
    fn test_step_status_ordering_predicates() {
        assert!(StepStatus::Planned.is_runnable());
        assert!(StepStatus::Approved.is_runnable());
        assert!(!StepStatus::InProgress.is_runnable());
        assert!(!StepStatus::NeedsUpdate.is_runnable());
        assert!(!StepStatus::Completed.is_runnable());
        assert!(!StepStatus::Failed.is_runnable());

        assert!(StepStatus::Completed.is_terminal());
        assert!(StepStatus::Failed.is_terminal());
        assert!(!StepStatus::Planned.is_terminal());
    }
}

mod action_message_tests {
    use super::*;

    fn sample_request() -> ActionRequest {
        ActionRequest {
            step_id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            agent: AgentKind::Hr,
            action: "schedule orientation for Alice".to_string(),
        }
    }

    #[test]
    fn test_action_request_roundtrip_preserves_all_fields() {
        let request = sample_request();
        let json = request.to_json().unwrap();
        let parsed = ActionRequest::from_json(&json).unwrap();

        assert_eq!(parsed.step_id, request.step_id);
        assert_eq!(parsed.plan_id, request.plan_id);
        assert_eq!(parsed.session_id, request.session_id);
        assert_eq!(parsed.agent, request.agent);
        assert_eq!(parsed.action, request.action);
    }

    #[test]
    fn test_action_response_roundtrip_preserves_all_fields() {
        let request = sample_request();
        let response = ActionResponse::failed(&request, "tool blew up");
        let json = response.to_json().unwrap();
        let parsed = ActionResponse::from_json(&json).unwrap();

        assert_eq!(parsed.step_id, request.step_id);
        assert_eq!(parsed.plan_id, request.plan_id);
        assert_eq!(parsed.session_id, request.session_id);
        assert_eq!(parsed.status, ActionStatus::Failed);
        assert_eq!(parsed.message, "tool blew up");
    }

    #[test]
    fn test_action_request_rejects_malformed_json() {
        assert!(ActionRequest::from_json("{not json").is_err());
        assert!(ActionRequest::from_json("{}").is_err());
    }

    #[test]
    fn test_agent_message_roundtrip() {
        let message = AgentMessage::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Some(Uuid::new_v4()),
            AgentKind::Marketing,
            "campaign created",
        );

        let json = serde_json::to_string(&message).unwrap();
        let deserialized: AgentMessage = serde_json::from_str(&json).unwrap();

        assert_eq!(message.id, deserialized.id);
        assert_eq!(message.step_id, deserialized.step_id);
        assert_eq!(message.source, deserialized.source);
        assert_eq!(message.content, deserialized.content);
    }
}
