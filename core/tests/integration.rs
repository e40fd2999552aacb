//! Full lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port and drives every resource API
//! over real HTTP. The server verifies each request's HMAC independently,
//! so these tests cover the whole pipeline: casing, PII encryption, digest,
//! signature, and response decoding.

use mock_server::MockConfig;
use onbo_core::loc::application::{ActivationRequest, ApplicationRequest};
use onbo_core::loc::draw_down::DrawRequest;
use onbo_core::loc::repayment::RepaymentRequest;
use onbo_core::webhook::Endpoint;
use onbo_core::{
    Address, Business, Consumer, Onbo, OnboConfig, OnboError, PageOptions, Person, User,
};

const CLIENT_ID: &str = "it-client";
const SECRET: &str = "abcd-1234-efgh-5678";

/// Start the mock server on a random port; returns the base URL.
fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, MockConfig::new(CLIENT_ID, SECRET)).await
        })
        .unwrap();
    });

    format!("http://{addr}/v1")
}

fn client(base_url: &str) -> Onbo {
    Onbo::with_config(OnboConfig::new(CLIENT_ID, SECRET).with_base_url(base_url))
}

fn consumer() -> User {
    User::Consumer(Consumer {
        person: Person {
            first_name: Some("Chip".to_string()),
            last_name: Some("Chipperson".to_string()),
            dob: Some("1990-04-01".to_string()),
            email: Some("chip@example.com".to_string()),
            phone: Some("(515) 555-1212".to_string()),
            ssn: Some("111-22-3333".to_string()),
            address: Some(Address {
                line1: Some("1 Main St".to_string()),
                city: Some("Des Moines".to_string()),
                state: Some("IA".to_string()),
                zip: Some("50309".to_string()),
                country: Some("US".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        },
        ..Default::default()
    })
}

#[test]
fn consumer_lifecycle() {
    let base_url = spawn_server();
    let onbo = client(&base_url);

    // empty to start
    let page = onbo.user.list(None).unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.pagination.unwrap().total, Some(0));

    let created = onbo.user.create(&consumer()).unwrap();
    let uuid = created.uuid().expect("uuid assigned").to_string();
    let User::Consumer(chip) = &created else {
        panic!("expected consumer back");
    };
    // SSN left the process encrypted and comes back as the stored token
    let ssn = chip.person.ssn.as_deref().unwrap();
    assert_ne!(ssn, "111-22-3333");
    assert!(!ssn.contains("111223333"));
    // phone and country were wire-formatted out, restored on the way in
    assert_eq!(chip.person.phone.as_deref(), Some("515-555-1212"));
    let address = chip.person.address.as_ref().unwrap();
    assert_eq!(address.country.as_deref(), Some("US"));
    assert_eq!(address.line1.as_deref(), Some("1 Main St"));

    let fetched = onbo.user.by_id(&uuid).unwrap();
    assert_eq!(fetched, created);

    let page = onbo.user.list(Some(&PageOptions::limit(10))).unwrap();
    assert_eq!(page.data.len(), 1);

    // update keeps the identity and applies the change
    let mut updated = consumer();
    if let User::Consumer(c) = &mut updated {
        c.person.last_name = Some("Chipperson-Smith".to_string());
    }
    let after = onbo.user.update(&uuid, &updated).unwrap();
    let User::Consumer(after) = after else {
        panic!("expected consumer back");
    };
    assert_eq!(after.person.uuid.as_deref(), Some(uuid.as_str()));
    assert_eq!(after.person.last_name.as_deref(), Some("Chipperson-Smith"));

    let confirmation = onbo.user.delete(&uuid).unwrap();
    assert_eq!(confirmation.as_deref(), Some("deleted"));
    assert!(matches!(
        onbo.user.by_id(&uuid),
        Err(OnboError::Api { .. })
    ));
}

#[test]
fn business_user_and_key_people() {
    let base_url = spawn_server();
    let onbo = client(&base_url);

    let business = User::Business(Business {
        first_name: Some("Chipco LLC".to_string()),
        email: Some("ops@chipco.example.com".to_string()),
        phone: Some("515-555-9999".to_string()),
        ein: Some("12-1234567".to_string()),
        start_date: Some("2015-06-01".to_string()),
        entity: Some("LLC".to_string()),
        address: Some(Address {
            line1: Some("200 Commerce Way".to_string()),
            country: Some("US".to_string()),
            ..Default::default()
        }),
        key_people: Some(vec![Person {
            first_name: Some("Dana".to_string()),
            last_name: Some("Ortiz".to_string()),
            ssn: Some("222-33-4444".to_string()),
            phone: Some("(515) 555-0000".to_string()),
            ..Default::default()
        }]),
        ..Default::default()
    });

    let created = onbo.user.create(&business).unwrap();
    let uuid = created.uuid().unwrap().to_string();
    let User::Business(chipco) = &created else {
        panic!("expected business back");
    };
    let ein = chipco.ein.as_deref().unwrap();
    assert_ne!(ein, "12-1234567");
    assert!(!ein.contains("121234567"));
    // nested key people got the same outbound treatment
    let dana = &chipco.key_people.as_ref().unwrap()[0];
    assert_ne!(dana.ssn.as_deref().unwrap(), "222-33-4444");
    assert_eq!(dana.phone.as_deref(), Some("515-555-0000"));

    // individual key person management
    let person = Person {
        first_name: Some("Lee".to_string()),
        last_name: Some("Nguyen".to_string()),
        ssn: Some("333-44-5555".to_string()),
        phone: Some("515.555.7777".to_string()),
        ..Default::default()
    };
    let lee = onbo.user.key_person.create(&uuid, &person).unwrap();
    let lee_id = lee.uuid.as_deref().unwrap().to_string();
    assert_ne!(lee.ssn.as_deref().unwrap(), "333-44-5555");
    assert_eq!(lee.phone.as_deref(), Some("515-555-7777"));

    let page = onbo.user.key_person.list(&uuid, None).unwrap();
    assert_eq!(page.data.len(), 1);

    let fetched = onbo.user.key_person.by_id(&uuid, &lee_id).unwrap();
    assert_eq!(fetched.first_name.as_deref(), Some("Lee"));

    let mut change = person.clone();
    change.last_name = Some("Nguyen-Park".to_string());
    let after = onbo.user.key_person.update(&uuid, &lee_id, &change).unwrap();
    assert_eq!(after.last_name.as_deref(), Some("Nguyen-Park"));

    let confirmation = onbo.user.key_person.delete(&uuid, &lee_id).unwrap();
    assert_eq!(confirmation.as_deref(), Some("deleted"));
    assert!(onbo.user.key_person.list(&uuid, None).unwrap().data.is_empty());
}

#[test]
fn loc_application_through_statement() {
    let base_url = spawn_server();
    let onbo = client(&base_url);

    let user = onbo.user.create(&consumer()).unwrap();
    let user_id = user.uuid().unwrap().to_string();

    let application = ApplicationRequest {
        amount: 5000.0,
        ..Default::default()
    };
    let loc = onbo.loc.application.create(&user_id, &application).unwrap();
    let loc_id = loc.uuid.as_deref().unwrap().to_string();
    assert_eq!(loc.amount, Some(5000.0));
    assert_eq!(loc.status.as_ref().unwrap().name.as_deref(), Some("PENDING"));
    let offer_id = loc.offers[0].uuid.as_deref().unwrap().to_string();
    assert_eq!(loc.offers[0].term_frequency.as_deref(), Some("MONTHLY"));

    let page = onbo.loc.application.list(Some(user_id.as_str()), None).unwrap();
    assert_eq!(page.data.len(), 1);
    let fetched = onbo.loc.application.by_id(&user_id, &loc_id).unwrap();
    assert_eq!(fetched.uuid, loc.uuid);

    let note = onbo
        .loc
        .application
        .promissory_note(&user_id, &offer_id)
        .unwrap();
    let document_uuid = note.document_uuid.expect("document uuid");
    assert!(note.document_url.unwrap().contains(&document_uuid));

    let activation = ActivationRequest {
        status: "ACTIVE".to_string(),
        document_uuid,
        ..Default::default()
    };
    let status = onbo
        .loc
        .application
        .activate(&user_id, &offer_id, &activation)
        .unwrap();
    assert_eq!(status.status.as_deref(), Some("ACTIVE"));

    let summary = onbo
        .loc
        .draw_down
        .create(
            &user_id,
            &offer_id,
            &DrawRequest {
                amount: 1500.0,
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(summary.available_credit, Some(3500.0));
    assert_eq!(summary.current_credit, Some(1500.0));

    let draws = onbo.loc.draw_down.list(&user_id, &offer_id, None).unwrap();
    assert_eq!(draws.data.len(), 1);
    assert_eq!(draws.data[0].amount, Some(1500.0));

    let receipt = onbo
        .loc
        .repayment
        .create(
            &user_id,
            &offer_id,
            &RepaymentRequest {
                amount: 500.0,
                payment_type: "ACH".to_string(),
                payment_date: "2024-01-20".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(receipt.available_credit, Some(4000.0));
    let repayment_id = receipt.repayment_uuid.expect("repayment uuid");

    let repayment = onbo
        .loc
        .repayment
        .by_id(&user_id, &offer_id, &repayment_id)
        .unwrap();
    assert_eq!(repayment.amount, Some(500.0));
    assert_eq!(repayment.payment_type.as_deref(), Some("ACH"));

    let payments = onbo.loc.repayment.list(&user_id, &offer_id, None).unwrap();
    assert_eq!(payments.data.len(), 1);

    let statement = onbo.loc.statement.get(&user_id, &offer_id).unwrap();
    assert_eq!(statement.credit_limit, Some(5000.0));
    assert_eq!(statement.current_credit, Some(1000.0));
    assert_eq!(statement.available_credit, Some(4000.0));

    let locs = onbo.loc.list(Some(user_id.as_str()), None).unwrap();
    assert_eq!(locs.data.len(), 1);
    assert_eq!(
        locs.data[0].status.as_ref().unwrap().name.as_deref(),
        Some("ACTIVE")
    );
}

#[test]
fn webhook_endpoints_and_messages() {
    let base_url = spawn_server();
    let onbo = client(&base_url);

    let endpoint = Endpoint {
        url: Some("https://hooks.example.com/onbo".to_string()),
        description: Some("primary".to_string()),
        events: Some(vec!["payment.updated".to_string()]),
        ..Default::default()
    };
    let created = onbo.webhook.endpoint.create(&endpoint).unwrap();
    let endpoint_id = created.uuid.as_deref().unwrap().to_string();

    let endpoints = onbo.webhook.endpoint.list().unwrap();
    assert_eq!(endpoints.len(), 1);

    let found = onbo
        .webhook
        .endpoint
        .by_url("https://hooks.example.com/onbo")
        .unwrap();
    assert_eq!(found.unwrap().uuid.as_deref(), Some(endpoint_id.as_str()));
    assert!(onbo
        .webhook
        .endpoint
        .by_url("https://hooks.example.com/other")
        .unwrap()
        .is_none());

    let mut change = endpoint.clone();
    change.description = Some("backup".to_string());
    let after = onbo.webhook.endpoint.update(&endpoint_id, &change).unwrap();
    assert_eq!(after.description.as_deref(), Some("backup"));

    onbo.webhook
        .endpoint
        .recover_failed_messages(&endpoint_id, Some("2024-01-01"))
        .unwrap();

    // drive a repayment to produce a message
    let user = onbo.user.create(&consumer()).unwrap();
    let user_id = user.uuid().unwrap().to_string();
    let loc = onbo
        .loc
        .application
        .create(
            &user_id,
            &ApplicationRequest {
                amount: 1000.0,
                ..Default::default()
            },
        )
        .unwrap();
    let offer_id = loc.offers[0].uuid.as_deref().unwrap().to_string();
    onbo.loc
        .repayment
        .create(
            &user_id,
            &offer_id,
            &RepaymentRequest {
                amount: 100.0,
                payment_type: "ACH".to_string(),
                payment_date: "2024-02-01".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

    let messages = onbo.webhook.message.list(None).unwrap();
    assert_eq!(messages.data.len(), 1);
    let message_id = messages.data[0].uuid.as_deref().unwrap().to_string();
    assert_eq!(messages.data[0].event.as_deref(), Some("payment.updated"));
    let payload = messages.data[0].payload.as_ref().unwrap();
    assert_eq!(payload.amount, Some(100.0));

    let message = onbo.webhook.message.by_id(&message_id).unwrap();
    assert_eq!(message.uuid.as_deref(), Some(message_id.as_str()));

    onbo.webhook.message.recover_failed_message(&message_id).unwrap();

    onbo.webhook.endpoint.delete(&endpoint_id).unwrap();
    assert!(onbo.webhook.endpoint.list().unwrap().is_empty());
}

#[test]
fn wrong_secret_is_rejected() {
    let base_url = spawn_server();
    let imposter =
        Onbo::with_config(OnboConfig::new(CLIENT_ID, "wrong-secret").with_base_url(base_url.as_str()));

    match imposter.user.list(None).unwrap_err() {
        OnboError::Api { message } => assert_eq!(message.as_deref(), Some("invalid signature")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn missing_resources_surface_the_server_message() {
    let base_url = spawn_server();
    let onbo = client(&base_url);

    match onbo.user.by_id("no-such-user").unwrap_err() {
        OnboError::Api { message } => assert_eq!(message.as_deref(), Some("not found")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(onbo.webhook.message.by_id("no-such-message").is_err());
}
