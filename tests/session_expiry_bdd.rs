//! Behavioural tests for dropping the session when the API rejects the token.

mod support;

use std::sync::Arc;

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};
use yukchi::persistence::{LocalStorage, migrate_database};
use yukchi::services::Route;
use yukchi::session::TOKEN_STORAGE_KEY;
use yukchi::telemetry::test_support::RecordingSink;
use yukchi::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};
use yukchi::{AppServices, YukchiConfig};

use support::marketplace::{MockMarketplace, ensure_marketplace};
use support::{create_temp_dir, database_path};

#[derive(ScenarioState, Default)]
struct ExpiryState {
    marketplace: Slot<MockMarketplace>,
    temp_dir: Slot<TempDir>,
    database_url: Slot<String>,
    telemetry: Slot<Arc<RecordingSink>>,
    services: Slot<AppServices>,
}

#[fixture]
fn expiry_state() -> ExpiryState {
    ExpiryState::default()
}

fn mount(state: &ExpiryState, mocks: Vec<Mock>) {
    ensure_marketplace(&state.marketplace).mount(mocks);
}

fn profile_body() -> serde_json::Value {
    json!({
        "id": 7,
        "name": "Aziz",
        "phone_number": "+998901234567",
        "email": "aziz@example.com"
    })
}

fn unauthorized() -> ResponseTemplate {
    ResponseTemplate::new(401).set_body_json(json!({ "detail": "Invalid token." }))
}

// --- Given steps ---

#[given("a marketplace that accepts the profile but rejects the user's cargos")]
fn marketplace_rejecting_cargos(expiry_state: &ExpiryState) {
    mount(
        expiry_state,
        vec![
            Mock::given(method("GET"))
                .and(path("/profile"))
                .respond_with(ResponseTemplate::new(200).set_body_json(profile_body())),
            Mock::given(method("GET"))
                .and(path("/profile/cargos"))
                .respond_with(unauthorized()),
        ],
    );
}

#[given("a marketplace that rejects every token")]
fn marketplace_rejecting_tokens(expiry_state: &ExpiryState) {
    mount(
        expiry_state,
        vec![Mock::given(method("GET")).respond_with(unauthorized())],
    );
}

#[given("local storage holding the token {token}")]
fn storage_with_token(expiry_state: &ExpiryState, token: String) {
    let temp_dir = create_temp_dir();
    let database_url = database_path(&temp_dir);
    migrate_database(&database_url, &NoopTelemetrySink)
        .unwrap_or_else(|error| panic!("migrations failed: {error}"));
    LocalStorage::new(database_url.clone())
        .and_then(|storage| storage.set(TOKEN_STORAGE_KEY, token.trim_matches('"')))
        .unwrap_or_else(|error| panic!("failed to seed token: {error}"));

    expiry_state.temp_dir.set(temp_dir);
    expiry_state.database_url.set(database_url);
}

// --- When steps ---

#[when("the client starts")]
fn client_starts(expiry_state: &ExpiryState) {
    let marketplace = ensure_marketplace(&expiry_state.marketplace);
    let config = YukchiConfig {
        database_url: expiry_state.database_url.get(),
        ..marketplace.config()
    };
    let telemetry = Arc::new(RecordingSink::default());
    let sink: Arc<dyn TelemetrySink> = Arc::clone(&telemetry) as Arc<dyn TelemetrySink>;

    let (services, _) = marketplace
        .block_on(AppServices::start(&config, sink))
        .unwrap_or_else(|error| panic!("services failed to start: {error}"));

    expiry_state.telemetry.set(telemetry);
    expiry_state.services.set(services);
}

#[when("the user opens their cargos")]
fn user_opens_cargos(expiry_state: &ExpiryState) {
    let marketplace = ensure_marketplace(&expiry_state.marketplace);
    let services = started(expiry_state);
    assert!(
        services.session().is_authenticated(),
        "session should be restored before the cargos are opened"
    );

    let cargos = marketplace.block_on(services.cargo().user_cargos());
    assert!(cargos.is_empty(), "rejected request should yield no cargos");
}

// --- Then steps ---

fn started(expiry_state: &ExpiryState) -> AppServices {
    expiry_state
        .services
        .get()
        .unwrap_or_else(|| panic!("client not started"))
}

#[then("the user is signed out")]
fn user_signed_out(expiry_state: &ExpiryState) {
    assert!(!started(expiry_state).session().is_authenticated());
}

#[then("local storage no longer holds a token")]
fn storage_has_no_token(expiry_state: &ExpiryState) {
    let database_url = expiry_state
        .database_url
        .get()
        .unwrap_or_else(|| panic!("database not initialised"));
    let stored = LocalStorage::new(database_url)
        .and_then(|storage| storage.get(TOKEN_STORAGE_KEY))
        .unwrap_or_else(|error| panic!("failed to read token: {error}"));

    assert_eq!(stored, None);
}

#[then("the user is sent to the login screen")]
fn user_sent_to_login(expiry_state: &ExpiryState) {
    assert_eq!(started(expiry_state).navigator().current(), Route::Login);
}

#[then("telemetry records that the session was cleared as {reason}")]
fn telemetry_records_reason(expiry_state: &ExpiryState, reason: String) {
    let events = expiry_state
        .telemetry
        .with_ref(|sink| sink.take())
        .unwrap_or_else(|| panic!("telemetry not initialised"));
    let rendered: Vec<String> = events
        .iter()
        .filter(|event| matches!(event, TelemetryEvent::SessionCleared { .. }))
        .map(|event| serde_json::to_string(event).unwrap_or_default())
        .collect();
    let expected = format!(
        r#"{{"type":"session_cleared","reason":"{}"}}"#,
        reason.trim_matches('"')
    );

    assert_eq!(rendered, vec![expected]);
}

#[scenario(path = "tests/features/session_expiry.feature", index = 0)]
fn token_rejected_mid_session(expiry_state: ExpiryState) {
    let _ = expiry_state;
}

#[scenario(path = "tests/features/session_expiry.feature", index = 1)]
fn token_rejected_at_start_up(expiry_state: ExpiryState) {
    let _ = expiry_state;
}
