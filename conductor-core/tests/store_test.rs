use uuid::Uuid;

use conductor_core::models::{AgentKind, AgentMessage, Plan, PlanStatus, Step, StepStatus};
use conductor_core::store::{InMemoryStore, MemoryStore};

#[tokio::test]
async fn test_missing_records_read_as_none_or_empty() {
    let store = InMemoryStore::new();
    let session = Uuid::new_v4();

    assert!(store.get_plan(session, Uuid::new_v4()).await.unwrap().is_none());
    assert!(store.get_step(session, Uuid::new_v4()).await.unwrap().is_none());
    assert!(store
        .get_steps_for_plan(session, Uuid::new_v4())
        .await
        .unwrap()
        .is_empty());
    assert!(store.get_messages_for_session(session).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_writes_overwrite_by_id() {
    let store = InMemoryStore::new();
    let mut plan = Plan::new(Uuid::new_v4(), "goal");
    store.add_plan(&plan).await.unwrap();

    plan.mark_completed();
    store.update_plan(&plan).await.unwrap();

    let loaded = store.get_plan(plan.session_id, plan.id).await.unwrap().unwrap();
    assert_eq!(loaded.overall_status, PlanStatus::Completed);

    let mut step = Step::new(plan.id, plan.session_id, AgentKind::Product, "act", 0);
    store.add_step(&step).await.unwrap();
    step.action = "act differently".to_string();
    store.update_step(&step).await.unwrap();

    let loaded = store.get_step(plan.session_id, step.id).await.unwrap().unwrap();
    assert_eq!(loaded.action, "act differently");
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let store = InMemoryStore::new();
    let plan_a = Plan::new(Uuid::new_v4(), "a");
    let plan_b = Plan::new(Uuid::new_v4(), "b");
    store.add_plan(&plan_a).await.unwrap();
    store.add_plan(&plan_b).await.unwrap();

    let plans_a = store.get_plans_for_session(plan_a.session_id).await.unwrap();
    assert_eq!(plans_a.len(), 1);
    assert_eq!(plans_a[0].id, plan_a.id);

    // a plan is invisible under another session's key
    assert!(store
        .get_plan(plan_b.session_id, plan_a.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_claim_step_moves_runnable_to_in_progress() {
    let store = InMemoryStore::new();
    let plan = Plan::new(Uuid::new_v4(), "goal");
    store.add_plan(&plan).await.unwrap();

    let mut approved = Step::new(plan.id, plan.session_id, AgentKind::Hr, "act", 0);
    approved.status = StepStatus::Approved;
    store.add_step(&approved).await.unwrap();

    let claimed = store
        .claim_step(plan.session_id, approved.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(claimed.status, StepStatus::InProgress);
}

#[tokio::test]
async fn test_claim_step_refuses_non_runnable_statuses() {
    let store = InMemoryStore::new();
    let plan = Plan::new(Uuid::new_v4(), "goal");
    store.add_plan(&plan).await.unwrap();

    for status in [
        StepStatus::NeedsUpdate,
        StepStatus::InProgress,
        StepStatus::Completed,
        StepStatus::Failed,
    ] {
        let mut step = Step::new(plan.id, plan.session_id, AgentKind::Hr, "act", 0);
        step.status = status;
        store.add_step(&step).await.unwrap();

        let claimed = store.claim_step(plan.session_id, step.id).await.unwrap();
        assert!(claimed.is_none(), "claimed a step in status {status}");
    }
}

#[tokio::test]
async fn test_concurrent_claims_have_one_winner() {
    use std::sync::Arc;

    let store = Arc::new(InMemoryStore::new());
    let plan = Plan::new(Uuid::new_v4(), "goal");
    let step = Step::new(plan.id, plan.session_id, AgentKind::Generic, "act", 0);
    store.add_plan(&plan).await.unwrap();
    store.add_step(&step).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = store.clone();
        let session_id = plan.session_id;
        let step_id = step.id;
        handles.push(tokio::spawn(async move {
            store.claim_step(session_id, step_id).await.unwrap()
        }));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap().is_some() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn test_message_log_preserves_insertion_order() {
    let store = InMemoryStore::new();
    let session = Uuid::new_v4();
    let plan_id = Uuid::new_v4();

    for content in ["first", "second", "third"] {
        store
            .add_message(&AgentMessage::new(
                session,
                plan_id,
                None,
                AgentKind::Generic,
                content,
            ))
            .await
            .unwrap();
    }

    let contents: Vec<String> = store
        .get_messages_for_session(session)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.content)
        .collect();
    assert_eq!(contents, vec!["first", "second", "third"]);
}
