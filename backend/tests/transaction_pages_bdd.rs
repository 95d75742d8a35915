//! Behaviour coverage for the transaction pages.
//!
//! The gateway runs in-process with the production app wiring and its real
//! reqwest adapters, pointed at a fake transaction/user service listening on
//! a loopback port.
//
// rstest-bdd generates guard variables with double underscores.
#![allow(non_snake_case)]

use std::future::Future;
use std::net::TcpListener;

use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{test as actix_test, web};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;
use web_gateway::config::GatewaySettings;
use web_gateway::domain::{DeliveryDetailsForm, TRACE_ID_HEADER};
use web_gateway::inbound::http::health::HealthState;
use web_gateway::inbound::http::state::HttpState;
use web_gateway::inbound::http::views::{
    DeliveryDetailsView, DeliveryFormView, TransactionDetailView, TransactionListView,
};

mod support;

use support::{ADA, BROKEN, CHARLES, FakeServices, GRACE, LOOM, PUNCH_CARDS};

#[path = "../src/server/app.rs"]
mod app;
#[path = "../src/server/state_builders.rs"]
mod state_builders;

use app::{AppDependencies, build_app};

#[derive(Debug)]
struct Snapshot {
    status: StatusCode,
    location: Option<String>,
    trace_id: Option<String>,
    session_cookie: Option<Cookie<'static>>,
    body: Option<Value>,
}

struct World {
    fake: Option<FakeServices>,
    http_state: Option<web::Data<HttpState>>,
    key: Key,
    cookie: Option<Cookie<'static>>,
    submitted: Option<DeliveryDetailsForm>,
    response: Option<Snapshot>,
    system: actix_rt::SystemRunner,
}

impl World {
    fn run<T>(&self, future: impl Future<Output = T>) -> T {
        self.system.block_on(future)
    }

    fn serve(&mut self, base: Url) {
        let settings = GatewaySettings {
            host: None,
            port: None,
            transaction_service_url: Some(base.clone()),
            user_service_url: Some(base),
            request_timeout_secs: Some(5),
            show_inline_instruction: true,
        };
        self.http_state = Some(state_builders::build_http_state(&settings).expect("http state"));
    }

    fn fake(&self) -> &FakeServices {
        self.fake.as_ref().expect("fake services running")
    }

    fn send(&mut self, request: actix_test::TestRequest) {
        let request = match &self.cookie {
            Some(cookie) => request.cookie(cookie.clone()),
            None => request,
        };
        let deps = AppDependencies {
            health_state: web::Data::new(HealthState::default()),
            http_state: self.http_state.clone().expect("gateway state"),
            key: self.key.clone(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        };
        let snapshot = self.run(async move {
            let app = actix_test::init_service(build_app(deps)).await;
            let response = actix_test::call_service(&app, request.to_request()).await;
            snapshot(response).await
        });
        self.response = Some(snapshot);
    }

    fn log_in(&mut self, user: &str) {
        self.send(
            actix_test::TestRequest::post()
                .uri("/login")
                .set_form([("userId", user_id(user))]),
        );
    }

    fn submit(&mut self, uri: &str, form: DeliveryDetailsForm) {
        self.send(actix_test::TestRequest::post().uri(uri).set_form(&form));
        self.submitted = Some(form);
    }

    fn response(&self) -> &Snapshot {
        self.response.as_ref().expect("a response was recorded")
    }

    fn view<T: DeserializeOwned>(&self) -> T {
        let body = self.response().body.clone().expect("response body");
        serde_json::from_value(body).expect("view payload")
    }

    fn submitted(&self) -> &DeliveryDetailsForm {
        self.submitted.as_ref().expect("a form was submitted")
    }
}

async fn snapshot(response: ServiceResponse) -> Snapshot {
    let header_text = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned)
    };
    let status = response.status();
    let location = header_text(header::LOCATION.as_str());
    let trace_id = header_text(TRACE_ID_HEADER);
    let session_cookie = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned);
    let bytes = actix_test::read_body(response).await;
    let body = (!bytes.is_empty()).then(|| serde_json::from_slice(&bytes).expect("json body"));
    Snapshot {
        status,
        location,
        trace_id,
        session_cookie,
        body,
    }
}

fn unquote(value: &str) -> &str {
    value.trim_matches('"')
}

fn user_id(name: &str) -> &'static str {
    match name {
        "Ada" => ADA,
        "Charles" => CHARLES,
        "Grace" => GRACE,
        other => panic!("unknown user: {other}"),
    }
}

fn item_id(name: &str) -> &'static str {
    match name {
        "punch cards" => PUNCH_CARDS,
        "loom" => LOOM,
        "broken" => BROKEN,
        other => panic!("unknown item: {other}"),
    }
}

fn address_form() -> DeliveryDetailsForm {
    DeliveryDetailsForm {
        address_line1: "12 Dorset Street".to_owned(),
        address_line2: String::new(),
        city: "London".to_owned(),
        state: "Marylebone".to_owned(),
        postal_code: "W1U 4EH".to_owned(),
        country: "United Kingdom".to_owned(),
    }
}

#[fixture]
fn world() -> World {
    World {
        fake: None,
        http_state: None,
        key: Key::generate(),
        cookie: None,
        submitted: None,
        response: None,
        system: actix_rt::System::new(),
    }
}

#[given("the transaction and user services are running")]
fn the_services_are_running(world: &mut World) {
    let fake = world.run(async { FakeServices::start() });
    world.serve(fake.base());
    world.fake = Some(fake);
}

#[given("the user service is unreachable")]
fn the_user_service_is_unreachable(world: &mut World) {
    let closed = TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .expect("free loopback port");
    world.serve(Url::parse(&format!("http://{closed}/")).expect("closed base url"));
}

#[given("{user} is logged in")]
fn user_is_logged_in(world: &mut World, user: String) {
    world.log_in(&user);
    let login = world.response();
    assert_eq!(login.status, StatusCode::SEE_OTHER, "login as {user}");
    let cookie = login.session_cookie.clone().expect("session cookie");
    world.cookie = Some(cookie);
}

#[when("{user} logs in")]
fn user_logs_in(world: &mut World, user: String) {
    world.log_in(&user);
}

#[when("an anonymous visitor opens the negotiating delivery list")]
fn an_anonymous_visitor_opens_the_list(world: &mut World) {
    world.send(actix_test::TestRequest::get().uri("/transactions/negotiating_delivery"));
}

#[when("an anonymous visitor posts delivery details without flags")]
fn an_anonymous_visitor_posts_without_flags(world: &mut World) {
    world.submit(&format!("/transaction/{PUNCH_CARDS}/delivery"), address_form());
}

#[when("the user opens page {page} of {status} with page size {size}")]
fn the_user_opens_a_list_page(world: &mut World, page: u32, status: String, size: u32) {
    world.send(
        actix_test::TestRequest::get()
            .uri(&format!("/transactions/{status}?page={page}&pageSize={size}")),
    );
}

#[when("the user opens the {item} transaction with trace id {trace}")]
fn the_user_opens_a_transaction_with_trace(world: &mut World, item: String, trace: String) {
    world.send(
        actix_test::TestRequest::get()
            .uri(&format!("/transaction/{}", item_id(&item)))
            .insert_header((TRACE_ID_HEADER, unquote(&trace))),
    );
}

#[when("the user opens the {item} transaction")]
fn the_user_opens_a_transaction(world: &mut World, item: String) {
    world.send(actix_test::TestRequest::get().uri(&format!("/transaction/{}", item_id(&item))));
}

#[when("the user opens the {item} delivery form")]
fn the_user_opens_a_delivery_form(world: &mut World, item: String) {
    world.send(
        actix_test::TestRequest::get().uri(&format!("/transaction/{}/delivery", item_id(&item))),
    );
}

#[when("the user submits the form with address line {line}")]
fn the_user_submits_the_shown_form(world: &mut World, line: String) {
    let shown: DeliveryFormView = world.view();
    let form = DeliveryDetailsForm {
        address_line1: unquote(&line).to_owned(),
        ..address_form()
    };
    world.submit(&shown.submit_path, form);
}

#[when("the user submits the punch cards form with a blank city")]
fn the_user_submits_a_blank_city(world: &mut World) {
    let form = DeliveryDetailsForm {
        city: "   ".to_owned(),
        ..address_form()
    };
    world.submit(
        &format!("/transaction/{PUNCH_CARDS}/delivery?status=NEGOTIATING_DELIVERY&isBuyer=true"),
        form,
    );
}

#[when("the user submits the loom form")]
fn the_user_submits_the_loom_form(world: &mut World) {
    world.submit(
        &format!("/transaction/{LOOM}/delivery?status=PAYMENT_PENDING&isBuyer=true"),
        address_form(),
    );
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &mut World, status: u16) {
    assert_eq!(world.response().status.as_u16(), status);
}

#[then("the transaction service saw no user")]
fn the_service_saw_no_user(world: &mut World) {
    assert!(world.fake().recorded().user_ids.is_empty());
}

#[then("the transaction service received {count} delivery submissions")]
fn the_service_received_submissions(world: &mut World, count: usize) {
    assert_eq!(world.fake().recorded().delivery_puts, count);
}

#[then("the list shows {rows} transactions out of {count}")]
fn the_list_shows(world: &mut World, rows: usize, count: u64) {
    let view: TransactionListView = world.view();
    assert_eq!(view.transactions.len(), rows);
    assert_eq!(view.pagination.map(|pagination| pagination.count), Some(count));
    assert!(view.show_inline_instruction);
    assert_eq!(
        view.nav.current_user.map(|user| user.name).as_deref(),
        Some("Ada Lovelace")
    );
}

#[then("the transaction service was asked for {query}")]
fn the_service_was_asked_for(world: &mut World, query: String) {
    assert_eq!(
        world.fake().recorded().list_queries,
        vec![unquote(&query).to_owned()]
    );
}

fn page_links(world: &World) -> (Option<String>, Option<String>) {
    let view: TransactionListView = world.view();
    let pagination = view.pagination.expect("pagination");
    (pagination.previous, pagination.next)
}

#[then("there is no previous page link")]
fn there_is_no_previous_link(world: &mut World) {
    assert_eq!(page_links(world).0, None);
}

#[then("the previous page link is {link}")]
fn the_previous_link_is(world: &mut World, link: String) {
    assert_eq!(page_links(world).0.as_deref(), Some(unquote(&link)));
}

#[then("there is no next page link")]
fn there_is_no_next_link(world: &mut World) {
    assert_eq!(page_links(world).1, None);
}

#[then("the next page link is {link}")]
fn the_next_link_is(world: &mut World, link: String) {
    assert_eq!(page_links(world).1.as_deref(), Some(unquote(&link)));
}

#[then("the response carries trace id {trace}")]
fn the_response_carries_trace(world: &mut World, trace: String) {
    assert_eq!(world.response().trace_id.as_deref(), Some(unquote(&trace)));
}

#[then("the transaction service saw trace id {trace}")]
fn the_service_saw_trace(world: &mut World, trace: String) {
    let trace = unquote(&trace);
    assert!(world.fake().recorded().trace_ids.iter().any(|seen| seen == trace));
}

#[then("the seller is {seller} and the winner is {winner}")]
fn the_participants_are(world: &mut World, seller: String, winner: String) {
    let view: TransactionDetailView = world.view();
    assert_eq!(
        view.seller.map(|user| user.name).as_deref(),
        Some(unquote(&seller))
    );
    assert_eq!(
        view.winner.map(|user| user.name).as_deref(),
        Some(unquote(&winner))
    );
    assert!(view.error.is_none());
}

#[then("the price reads {price} in {currency}")]
fn the_price_reads(world: &mut World, price: String, currency: String) {
    let view: TransactionDetailView = world.view();
    let transaction = view.transaction.expect("transaction");
    assert_eq!(
        transaction.formatted_item_price.as_deref(),
        Some(unquote(&price))
    );
    assert_eq!(view.currency.as_deref(), Some(unquote(&currency)));
}

#[then("the page shows no transaction and the message {message}")]
fn the_page_shows_the_message(world: &mut World, message: String) {
    let view: TransactionDetailView = world.view();
    assert!(view.transaction.is_none());
    assert!(view.seller.is_none());
    assert!(view.winner.is_none());
    assert_eq!(view.error.as_deref(), Some(unquote(&message)));
}

#[then("the error code is {code}")]
fn the_error_code_is(world: &mut World, code: String) {
    let body: Value = world.view();
    assert_eq!(body["code"], unquote(&code));
    assert_eq!(
        body["message"],
        "The transaction service is currently unavailable"
    );
}

#[then("the form is empty and addressed to the buyer")]
fn the_form_is_empty_for_the_buyer(world: &mut World) {
    let view: DeliveryFormView = world.view();
    assert!(view.is_buyer);
    assert_eq!(view.form, DeliveryDetailsView::default());
}

#[then("the response redirects to the punch cards transaction")]
fn the_response_redirects(world: &mut World) {
    let response = world.response();
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(
        response.location.as_deref(),
        Some(format!("/transaction/{PUNCH_CARDS}").as_str())
    );
}

#[then("the transaction service stored the submitted details")]
fn the_service_stored_the_details(world: &mut World) {
    let stored = world
        .fake()
        .delivery_info(PUNCH_CARDS)
        .expect("stored details");
    assert_eq!(&DeliveryDetailsForm::from(&stored), world.submitted());
}

#[then("the form is prefilled with the submitted details")]
fn the_form_is_prefilled(world: &mut World) {
    let view: DeliveryFormView = world.view();
    assert_eq!(view.form, DeliveryDetailsView::from(world.submitted()));
}

#[then("the form reports an error for {field}")]
fn the_form_reports_an_error(world: &mut World, field: String) {
    let view: DeliveryFormView = world.view();
    assert!(view.errors.contains_key(unquote(&field)));
}

#[then("the form keeps the submitted values")]
fn the_form_keeps_the_values(world: &mut World) {
    let view: DeliveryFormView = world.view();
    assert_eq!(view.form, DeliveryDetailsView::from(world.submitted()));
    assert!(view.is_buyer);
}

#[then("the form explains {message}")]
fn the_form_explains(world: &mut World, message: String) {
    let view: DeliveryFormView = world.view();
    assert_eq!(view.error.as_deref(), Some(unquote(&message)));
    assert!(view.errors.is_empty());
    assert_eq!(view.status, "PAYMENT_PENDING");
    assert!(world.fake().delivery_info(LOOM).is_none());
}

#[scenario(path = "tests/features/transaction_pages.feature", name = "Anonymous visitors are turned away before the backend")]
fn anonymous_visitors_are_turned_away(world: World) {
    drop(world);
}

#[scenario(path = "tests/features/transaction_pages.feature", name = "Anonymous delivery posts without flags are unauthorised")]
fn anonymous_delivery_posts_are_unauthorised(world: World) {
    drop(world);
}

#[scenario(path = "tests/features/transaction_pages.feature", name = "The first list page links forward only")]
fn the_first_list_page_links_forward(world: World) {
    drop(world);
}

#[scenario(path = "tests/features/transaction_pages.feature", name = "A later list page links back only")]
fn a_later_list_page_links_back(world: World) {
    drop(world);
}

#[scenario(path = "tests/features/transaction_pages.feature", name = "An incoming trace id reaches the transaction service")]
fn an_incoming_trace_id_is_forwarded(world: World) {
    drop(world);
}

#[scenario(path = "tests/features/transaction_pages.feature", name = "The detail page names both participants")]
fn the_detail_page_names_participants(world: World) {
    drop(world);
}

#[scenario(path = "tests/features/transaction_pages.feature", name = "Strangers see the service explanation inline")]
fn strangers_see_the_explanation_inline(world: World) {
    drop(world);
}

#[scenario(path = "tests/features/transaction_pages.feature", name = "Unexplained backend failures become service unavailable")]
fn unexplained_failures_become_service_unavailable(world: World) {
    drop(world);
}

#[scenario(path = "tests/features/transaction_pages.feature", name = "Submitted delivery details come back prefilled")]
fn submitted_details_come_back_prefilled(world: World) {
    drop(world);
}

#[scenario(
    path = "tests/features/transaction_pages.feature",
    name = "Invalid delivery details are redisplayed without a backend call"
)]
fn invalid_details_are_redisplayed(world: World) {
    drop(world);
}

#[scenario(
    path = "tests/features/transaction_pages.feature",
    name = "Rejected delivery details keep the values and show the reason"
)]
fn rejected_details_keep_the_values(world: World) {
    drop(world);
}

#[scenario(
    path = "tests/features/transaction_pages.feature",
    name = "Login fails cleanly when the user service is unreachable"
)]
fn login_fails_when_the_user_service_is_unreachable(world: World) {
    drop(world);
}
