use super::*;
use crate::{
    model::membership::{MembershipDto, PaymentDto},
    server::{
        model::{client::Client, membership::Payment},
        service::{entity::EntityService, membership::MembershipService},
    },
};
use chrono::{Duration, Utc};
use test_utils::factory::membership::MembershipFactory;

fn payment(amount_cents: i64) -> PaymentDto {
    PaymentDto {
        amount_cents,
        method: Some("card".to_string()),
        paid_at: None,
    }
}

/// Tests creating a membership with its first payment.
///
/// Expected: payment stored and deducted, membership linked to the client
#[tokio::test]
async fn creates_membership_with_first_payment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let client = factory::create_client(db).await?;
    let now = Utc::now();

    let service = MembershipService::new(db);
    let membership = service
        .create_membership(
            &client.id,
            MembershipDto {
                offer_id: None,
                start_date: now - Duration::days(1),
                end_date: now + Duration::days(30),
                balance_cents: 5_000,
                due_date: Some(now + Duration::days(10)),
            },
            payment(2_000),
        )
        .await?;

    assert_eq!(membership.value.balance_cents, 3_000);
    assert_eq!(membership.value.payments.len(), 1);

    let payments = EntityService::<Payment>::new(db).find(&Filter::new()).await?;
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].id, membership.value.payments[0]);

    let client = EntityService::<Client>::new(db).get_by_id(&client.id).await?;
    assert_eq!(client.value.membership_id, Some(membership.id));

    assert!(service.has_active_membership(&client.id).await?);
    assert!(service.its_allowed_to_reserve(&client.id).await?);

    Ok(())
}

/// Tests creating a membership with an invalid payment.
///
/// Expected: Err(BadRequest) and nothing stored
#[tokio::test]
async fn rejects_non_positive_payment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let client = factory::create_client(db).await?;
    let now = Utc::now();

    let result = MembershipService::new(db)
        .create_membership(
            &client.id,
            MembershipDto {
                offer_id: None,
                start_date: now,
                end_date: now + Duration::days(30),
                balance_cents: 0,
                due_date: None,
            },
            payment(0),
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert!(EntityService::<Payment>::new(db)
        .find(&Filter::new())
        .await?
        .is_empty());

    Ok(())
}

/// Tests the eligibility rules.
///
/// Expected: no membership, expired or overdue clients may not reserve; a balance due in
/// the future does not block reservations
#[tokio::test]
async fn eligibility_rules() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let without = factory::create_client(db).await?;

    let expired = factory::create_client(db).await?;
    MembershipFactory::new(db, &expired.id)
        .expired()
        .build()
        .await?;

    let defaulter = factory::create_client(db).await?;
    MembershipFactory::new(db, &defaulter.id)
        .overdue(1_000, 2)
        .build()
        .await?;

    let owing = factory::create_client(db).await?;
    MembershipFactory::new(db, &owing.id)
        .balance_due(1_000, 5)
        .build()
        .await?;

    let service = MembershipService::new(db);

    assert!(!service.has_active_membership(&without.id).await?);
    assert!(!service.its_allowed_to_reserve(&without.id).await?);

    assert!(!service.has_active_membership(&expired.id).await?);
    assert!(!service.its_allowed_to_reserve(&expired.id).await?);

    assert!(service.has_active_membership(&defaulter.id).await?);
    assert!(service.is_defaulter(&defaulter.id).await?);
    assert!(!service.its_allowed_to_reserve(&defaulter.id).await?);

    assert!(!service.is_defaulter(&owing.id).await?);
    assert!(service.its_allowed_to_reserve(&owing.id).await?);

    assert!(matches!(
        service.is_defaulter("unknown").await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests paying off an overdue balance.
///
/// Expected: balance cleared and the client is allowed to reserve again
#[tokio::test]
async fn apply_charge_clears_default() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let client = factory::create_client(db).await?;
    MembershipFactory::new(db, &client.id)
        .overdue(1_500, 4)
        .build()
        .await?;

    let service = MembershipService::new(db);
    assert!(service.is_defaulter(&client.id).await?);

    let membership = service.apply_charge(&client.id, payment(1_500)).await?;

    assert_eq!(membership.value.balance_cents, 0);
    assert!(!service.is_defaulter(&client.id).await?);
    assert!(service.its_allowed_to_reserve(&client.id).await?);

    Ok(())
}

/// Tests charging a client that has no membership.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn apply_charge_requires_membership() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_document_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let client = factory::create_client(db).await?;

    let result = MembershipService::new(db)
        .apply_charge(&client.id, payment(100))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
