use payment_intents::application::controller::{ControllerConfig, PaymentController};
use payment_intents::domain::record::{CreatePayment, PaymentStatus};
use payment_intents::error::PaymentError;
use payment_intents::infrastructure::in_memory::InMemoryRecordStore;
use payment_intents::infrastructure::sandbox::SandboxProcessor;
use std::sync::Arc;

fn controller() -> PaymentController {
    PaymentController::new(
        Box::new(InMemoryRecordStore::new()),
        Box::new(SandboxProcessor::new()),
        ControllerConfig::default(),
    )
}

fn request(amount: i64, user_id: &str, package_id: &str) -> CreatePayment {
    CreatePayment {
        amount,
        user_id: user_id.to_string(),
        package_id: package_id.to_string(),
    }
}

#[tokio::test]
async fn test_create_confirm_get_end_to_end() {
    let controller = controller();

    let created = controller
        .create(request(1000, "u1", "p1"))
        .await
        .unwrap();
    assert_eq!(created.status, PaymentStatus::InProgress);
    assert_eq!(created.amount.value(), 1000);
    assert_eq!(created.payment_intent_id.as_deref(), Some(created.id.as_str()));
    assert_eq!(created.instance_id.as_deref(), Some(created.id.as_str()));

    let confirmed = controller.confirm(&created.id).await.unwrap();
    assert_eq!(confirmed.status, PaymentStatus::Succeeded);

    let fetched = controller.get(&created.id).await.unwrap();
    assert_eq!(fetched, confirmed);
}

#[tokio::test]
async fn test_cancel_end_to_end() {
    let controller = controller();

    let created = controller.create(request(500, "u2", "p2")).await.unwrap();
    let cancelled = controller.cancel(&created.id).await.unwrap();
    assert_eq!(cancelled.status, PaymentStatus::Cancelled);

    let fetched = controller.get(&created.id).await.unwrap();
    assert_eq!(fetched.status, PaymentStatus::Cancelled);
}

#[tokio::test]
async fn test_cancel_twice_is_rejected() {
    let controller = controller();

    let created = controller.create(request(500, "u1", "p1")).await.unwrap();
    controller.cancel(&created.id).await.unwrap();

    let err = controller.cancel(&created.id).await.unwrap_err();
    assert!(matches!(
        err,
        PaymentError::InvalidTransition {
            status: PaymentStatus::Cancelled,
            ..
        }
    ));
}

#[tokio::test]
async fn test_operations_on_unknown_id_are_not_found() {
    let controller = controller();

    for result in [
        controller.confirm("pi_missing").await,
        controller.cancel("pi_missing").await,
        controller.get("pi_missing").await,
    ] {
        assert!(matches!(result.unwrap_err(), PaymentError::NotFound(_)));
    }
}

#[tokio::test]
async fn test_invalid_amount_is_rejected() {
    let controller = controller();

    let err = controller.create(request(0, "u1", "p1")).await.unwrap_err();
    assert!(matches!(err, PaymentError::InvalidRequest(_)));
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let controller = Arc::new(controller());

    let mut handles = Vec::new();
    for i in 0..16 {
        let controller = controller.clone();
        handles.push(tokio::spawn(async move {
            controller
                .create(request(100 + i, "u1", "p1"))
                .await
                .unwrap()
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        let record = handle.await.unwrap();
        assert_eq!(record.status, PaymentStatus::InProgress);
        ids.push(record.id);
    }

    // Every create got its own intent id and its own retrievable record.
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 16);
    for id in &ids {
        assert_eq!(controller.get(id).await.unwrap().id, *id);
    }
}
