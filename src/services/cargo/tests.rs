//! Unit tests for cargo reads and mutations.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::CargoService;
use crate::api::models::test_support::{listing, priced_listing};
use crate::api::{AuthToken, ClientError, ListingId, MockMarketplaceGateway};
use crate::filter::ListingFilter;
use crate::forms::{CargoForm, CargoUpdateForm, CommentForm};
use crate::services::expiry::SessionExpiry;
use crate::services::loading::LoadingState;
use crate::services::navigator::{Navigator, Route};
use crate::services::notifications::{Notifications, ToastKind};
use crate::services::query_cache::{QueryCache, QueryKey};
use crate::session::{MemoryTokenStore, Session};
use crate::telemetry::test_support::RecordingSink;
use crate::telemetry::{SessionClearReason, TelemetryEvent, TelemetrySink};

struct Harness {
    session: Arc<Session>,
    loading: LoadingState,
    notifications: Arc<Notifications>,
    navigator: Arc<Navigator>,
    cache: Arc<QueryCache>,
    telemetry: Arc<RecordingSink>,
}

impl Harness {
    fn service(&self, gateway: MockMarketplaceGateway) -> CargoService {
        let expiry = SessionExpiry::new(
            Arc::clone(&self.session),
            Arc::clone(&self.navigator),
            Arc::clone(&self.notifications),
            Arc::clone(&self.telemetry) as Arc<dyn TelemetrySink>,
        );
        CargoService::new(
            Arc::new(gateway),
            self.loading.clone(),
            Arc::clone(&self.notifications),
            Arc::clone(&self.cache),
            expiry,
        )
    }
}

#[fixture]
fn harness() -> Harness {
    let token = AuthToken::new("session-token").expect("token should be valid");
    Harness {
        session: Arc::new(Session::new(Arc::new(MemoryTokenStore::with_token(token)))),
        loading: LoadingState::new(),
        notifications: Arc::new(Notifications::new()),
        navigator: Arc::new(Navigator::new()),
        cache: Arc::new(QueryCache::new()),
        telemetry: Arc::new(RecordingSink::default()),
    }
}

fn id(value: u64) -> ListingId {
    ListingId::new(value).expect("id should be positive")
}

fn valid_cargo_form() -> CargoForm {
    CargoForm {
        name: "Olma".to_owned(),
        weight: "12".to_owned(),
        origin: "Toshkent".to_owned(),
        destination: "Buxoro".to_owned(),
        vehicle_type: "Tentli".to_owned(),
        price: Some("1500000".to_owned()),
        description: None,
    }
}

#[rstest]
#[tokio::test]
async fn list_caches_results_under_filter(harness: Harness) {
    let mut gateway = MockMarketplaceGateway::new();
    gateway
        .expect_list_cargos()
        .times(1)
        .returning(|_| Ok(vec![listing(1, "Toshkent", "Samarqand")]));
    let service = harness.service(gateway);
    let filter = ListingFilter::default();

    let listings = service.list(&filter).await;

    assert_eq!(listings.len(), 1);
    assert_eq!(harness.cache.list(&filter).map(|cached| cached.len()), Some(1));
    assert!(!harness.loading.is_loading());
}

#[rstest]
#[tokio::test]
async fn list_failure_yields_empty_list_and_error_toast(harness: Harness) {
    let mut gateway = MockMarketplaceGateway::new();
    gateway.expect_list_cargos().returning(|_| {
        Err(ClientError::Network {
            message: "connection refused".to_owned(),
        })
    });
    let service = harness.service(gateway);

    let listings = service.list(&ListingFilter::default()).await;

    assert!(listings.is_empty());
    let toast = harness.notifications.latest().expect("an error toast");
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "Could not load the cargo list");
    assert!(!harness.loading.is_loading());
}

#[rstest]
#[tokio::test]
async fn list_failure_serves_the_cached_list(harness: Harness) {
    let mut gateway = MockMarketplaceGateway::new();
    let mut calls = 0_u32;
    gateway.expect_list_cargos().times(2).returning(move |_| {
        calls += 1;
        if calls == 1 {
            Ok(vec![listing(1, "Toshkent", "Samarqand")])
        } else {
            Err(ClientError::Network {
                message: "connection reset".to_owned(),
            })
        }
    });
    let service = harness.service(gateway);
    let filter = ListingFilter::default();

    let first = service.list(&filter).await;
    let second = service.list(&filter).await;

    assert_eq!(first, second);
    assert_eq!(second.len(), 1);
    assert_eq!(
        harness.notifications.latest().map(|toast| toast.kind),
        Some(ToastKind::Error)
    );
}

#[rstest]
#[tokio::test]
async fn detail_failure_serves_the_cached_cargo(harness: Harness) {
    let mut gateway = MockMarketplaceGateway::new();
    gateway.expect_cargo().with(eq(id(4))).returning(|_| {
        Err(ClientError::Network {
            message: "timed out".to_owned(),
        })
    });
    let service = harness.service(gateway);
    harness.cache.put_cargo(listing(4, "Buxoro", "Xiva"));

    let detail = service.detail(id(4)).await;

    assert_eq!(detail.map(|cached| cached.origin), Some("Buxoro".to_owned()));
}

#[rstest]
#[tokio::test]
async fn detail_failure_uses_server_message(harness: Harness) {
    let mut gateway = MockMarketplaceGateway::new();
    gateway.expect_cargo().with(eq(id(9))).returning(|_| {
        Err(ClientError::Server {
            status: 404,
            message: "Cargo not found".to_owned(),
        })
    });
    let service = harness.service(gateway);

    let detail = service.detail(id(9)).await;

    assert!(detail.is_none());
    assert_eq!(
        harness.notifications.latest().map(|toast| toast.message),
        Some("Cargo not found".to_owned())
    );
}

#[rstest]
#[tokio::test]
async fn invalid_cargo_form_never_reaches_gateway(harness: Harness) {
    let mut gateway = MockMarketplaceGateway::new();
    gateway.expect_create_cargo().times(0);
    let service = harness.service(gateway);
    let form = CargoForm {
        weight: "0".to_owned(),
        ..valid_cargo_form()
    };

    let result = service.create(&form).await;

    let Err(ClientError::Validation(errors)) = result else {
        panic!("expected validation errors, got {result:?}");
    };
    assert!(errors.message_for("weight").is_some());
    assert!(harness.notifications.latest().is_none());
}

#[rstest]
#[tokio::test]
async fn create_invalidates_lists_and_user_cargos(harness: Harness) {
    let mut gateway = MockMarketplaceGateway::new();
    gateway
        .expect_create_cargo()
        .times(1)
        .returning(|cargo| {
            assert_eq!(cargo.name, "Olma");
            Ok(priced_listing(5, 1_500_000.0))
        });
    let service = harness.service(gateway);
    let filter = ListingFilter::default();
    harness.cache.put_list(&filter, Vec::new());
    harness.cache.put_user_cargos(Vec::new());
    harness.cache.put_cargo(listing(1, "Toshkent", "Samarqand"));

    let created = service.create(&valid_cargo_form()).await.expect("create should succeed");

    assert_eq!(created.id, id(5));
    assert!(!harness.cache.contains(&QueryKey::cargo_list(&filter)));
    assert!(!harness.cache.contains(&QueryKey::UserCargos));
    assert!(harness.cache.contains(&QueryKey::Cargo(id(1))));
    assert_eq!(
        harness.notifications.latest().map(|toast| toast.kind),
        Some(ToastKind::Success)
    );
}

#[rstest]
#[tokio::test]
async fn update_invalidates_the_cargo_entry(harness: Harness) {
    let mut gateway = MockMarketplaceGateway::new();
    gateway
        .expect_update_cargo()
        .times(1)
        .returning(|cargo_id, _| Ok(priced_listing(cargo_id.get(), 900_000.0)));
    let service = harness.service(gateway);
    harness.cache.put_cargo(listing(3, "Toshkent", "Samarqand"));
    let form = CargoUpdateForm {
        price: Some("900000".to_owned()),
        ..CargoUpdateForm::default()
    };

    let updated = service.update(id(3), &form).await.expect("update should succeed");

    assert_eq!(updated.price, Some(900_000.0));
    assert!(!harness.cache.contains(&QueryKey::Cargo(id(3))));
}

#[rstest]
#[tokio::test]
async fn short_comment_is_rejected_locally(harness: Harness) {
    let mut gateway = MockMarketplaceGateway::new();
    gateway.expect_add_comment().times(0);
    let service = harness.service(gateway);
    let form = CommentForm {
        comment: "  ok ".to_owned(),
    };

    let result = service.comment(id(3), &form).await;

    assert!(matches!(result, Err(ClientError::Validation(_))));
}

#[rstest]
#[tokio::test]
async fn comment_invalidates_only_that_cargo(harness: Harness) {
    let mut gateway = MockMarketplaceGateway::new();
    gateway
        .expect_add_comment()
        .times(1)
        .returning(|cargo_id, payload| {
            assert_eq!(payload.comment, "Yaxshi yuk");
            Ok(listing(cargo_id.get(), "Toshkent", "Samarqand"))
        });
    let service = harness.service(gateway);
    let filter = ListingFilter::default();
    harness.cache.put_list(&filter, Vec::new());
    harness.cache.put_cargo(listing(3, "Toshkent", "Samarqand"));
    let form = CommentForm {
        comment: "Yaxshi yuk".to_owned(),
    };

    let commented = service.comment(id(3), &form).await.expect("comment should succeed");

    assert_eq!(commented.id, id(3));
    assert!(!harness.cache.contains(&QueryKey::Cargo(id(3))));
    assert!(harness.cache.contains(&QueryKey::cargo_list(&filter)));
}

#[rstest]
#[tokio::test]
async fn unauthorized_read_ends_the_session(harness: Harness) {
    let mut gateway = MockMarketplaceGateway::new();
    gateway.expect_user_cargos().returning(|| {
        Err(ClientError::Unauthorized {
            message: "Invalid token.".to_owned(),
        })
    });
    let service = harness.service(gateway);
    harness.navigator.navigate(Route::Profile, true);
    harness
        .cache
        .put_user_cargos(vec![listing(2, "Toshkent", "Buxoro")]);

    let listings = service.user_cargos().await;

    assert!(listings.is_empty());
    assert!(!harness.cache.contains(&QueryKey::UserCargos));
    assert_eq!(harness.navigator.current(), Route::Login);
    assert!(!harness.session.is_authenticated());
    assert_eq!(
        harness.telemetry.take(),
        vec![TelemetryEvent::SessionCleared {
            reason: SessionClearReason::Unauthorized
        }]
    );
    assert_eq!(
        harness.notifications.latest().map(|toast| toast.kind),
        Some(ToastKind::Info)
    );
}
