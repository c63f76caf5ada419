//! Unit tests for the session object.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::{MemoryTokenStore, MockTokenStore, Session, TokenStore};
use crate::api::models::test_support::profile;
use crate::api::{AuthToken, ClientError};

#[fixture]
fn token() -> AuthToken {
    AuthToken::new("session-token").expect("token should be valid")
}

#[fixture]
fn session() -> Session {
    Session::new(Arc::new(MemoryTokenStore::default()))
}

#[rstest]
fn new_session_is_signed_out(session: Session) {
    assert!(!session.is_authenticated());
    assert_eq!(session.profile(), None);
}

#[rstest]
fn establish_persists_token_and_caches_profile(session: Session, token: AuthToken) {
    session
        .establish(&token, Some(profile("Aziz")))
        .expect("establish should succeed");

    assert!(session.is_authenticated());
    assert_eq!(session.token().expect("token should load"), Some(token));
    assert_eq!(session.profile().map(|cached| cached.name), Some("Aziz".to_owned()));
}

#[rstest]
fn clear_removes_token_and_profile(session: Session, token: AuthToken) {
    session
        .establish(&token, Some(profile("Aziz")))
        .expect("establish should succeed");
    session.clear().expect("clear should succeed");

    assert!(!session.is_authenticated());
    assert_eq!(session.profile(), None);
}

#[rstest]
fn teardown_keeps_persisted_token(token: AuthToken) {
    let store = Arc::new(MemoryTokenStore::default());
    let session = Session::new(Arc::clone(&store) as Arc<dyn TokenStore>);
    session
        .establish(&token, Some(profile("Aziz")))
        .expect("establish should succeed");

    session.teardown();

    assert_eq!(session.profile(), None);
    assert_eq!(store.load().expect("token should load"), Some(token));
}

#[rstest]
fn merge_profile_caches_when_empty(session: Session) {
    session.merge_profile(profile("Dilnoza"));
    assert_eq!(
        session.profile().map(|cached| cached.name),
        Some("Dilnoza".to_owned())
    );
}

#[rstest]
fn clear_drops_profile_even_when_storage_fails() {
    let mut store = MockTokenStore::new();
    store.expect_save().returning(|_| Ok(()));
    store.expect_clear().times(1).returning(|| {
        Err(ClientError::Storage {
            message: "disk full".to_owned(),
        })
    });
    let session = Session::new(Arc::new(store));
    session.set_profile(profile("Aziz"));

    let result = session.clear();

    assert!(matches!(result, Err(ClientError::Storage { .. })));
    assert_eq!(session.profile(), None);
}

#[rstest]
fn storage_failure_counts_as_signed_out() {
    let mut store = MockTokenStore::new();
    store.expect_load().returning(|| {
        Err(ClientError::Storage {
            message: "locked".to_owned(),
        })
    });
    let session = Session::new(Arc::new(store));
    assert!(!session.is_authenticated());
}
