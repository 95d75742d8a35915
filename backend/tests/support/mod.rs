//! In-process stand-ins for the transaction and user services.
//!
//! The fake binds `127.0.0.1:0`, speaks the same JSON as the real services
//! and records what the gateway sent so tests can assert on headers and
//! call counts.

use std::net::TcpListener;
use std::sync::Mutex;

use actix_web::dev::ServerHandle;
use actix_web::{HttpRequest, HttpResponse, HttpServer, web};
use pagination::{Page, PageRequest};
use serde::Deserialize;
use serde_json::json;
use url::Url;
use web_gateway::domain::{
    DeliveryDetails, ItemData, ItemId, TransactionInfo, TransactionStatus, TransactionSummary,
    UserId,
};

pub const ADA: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
pub const CHARLES: &str = "9b2d1c4e-6f7a-4b8c-9d0e-1f2a3b4c5d6e";
pub const GRACE: &str = "5c8e9f10-2a3b-4c5d-8e6f-7a8b9c0d1e2f";

/// Item sold by Ada to Charles, awaiting delivery details.
pub const PUNCH_CARDS: &str = "6a1c0e2f-92b4-4d1e-8f4b-2f6e0b7d9c11";
/// Item sold by Ada to Charles, already paid for.
pub const LOOM: &str = "0f4b7c1e-3d2a-4b6c-9e8f-1a2b3c4d5e6f";
/// Item whose lookups fail with an unstructured server error.
pub const BROKEN: &str = "deadbeef-0000-4000-8000-000000000000";

/// Observations made by the fake while serving requests.
#[derive(Debug, Default, Clone)]
pub struct Recorded {
    pub user_ids: Vec<String>,
    pub trace_ids: Vec<String>,
    pub list_queries: Vec<String>,
    pub delivery_puts: usize,
}

#[derive(Default)]
struct FakeState {
    transactions: Mutex<Vec<TransactionInfo>>,
    recorded: Mutex<Recorded>,
}

fn user(raw: &str) -> UserId {
    UserId::new(raw).expect("fixture user id")
}

fn item(raw: &str) -> ItemId {
    ItemId::new(raw.parse().expect("fixture item id"))
}

fn transaction(item_id: &str, title: &str, price: i64, status: TransactionStatus) -> TransactionInfo {
    TransactionInfo {
        item_id: item(item_id),
        creator: user(ADA),
        winner: user(CHARLES),
        item_data: ItemData {
            title: title.to_owned(),
            description: format!("{title}, lightly used"),
            currency_id: "USD".to_owned(),
            increment: 50,
            reserve_price: 1_000,
        },
        item_price: price,
        delivery_info: None,
        delivery_price: None,
        status,
    }
}

fn seed() -> Vec<TransactionInfo> {
    let mut seeded = vec![
        transaction(
            PUNCH_CARDS,
            "Punch cards",
            4_250,
            TransactionStatus::NegotiatingDelivery,
        ),
        transaction(LOOM, "Jacquard loom", 990_000, TransactionStatus::PaymentPending),
    ];
    // Extra rows so the list spans several pages.
    for n in 0..20_u32 {
        seeded.push(transaction(
            &format!("00000000-0000-4000-8000-{n:012}"),
            &format!("Lot {n}"),
            100 + i64::from(n),
            TransactionStatus::ItemShipped,
        ));
    }
    seeded
}

fn rejection(status: actix_web::http::StatusCode, name: &str, detail: &str) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "name": name, "detail": detail }))
}

fn caller(req: &HttpRequest, state: &FakeState) -> Option<UserId> {
    let mut recorded = state.recorded.lock().expect("recorded lock");
    if let Some(trace) = req.headers().get("trace-id").and_then(|v| v.to_str().ok()) {
        recorded.trace_ids.push(trace.to_owned());
    }
    let raw = req.headers().get("User-Id").and_then(|v| v.to_str().ok())?;
    recorded.user_ids.push(raw.to_owned());
    UserId::new(raw).ok()
}

fn unauthenticated() -> HttpResponse {
    rejection(
        actix_web::http::StatusCode::UNAUTHORIZED,
        "NotAuthenticated",
        "User not authenticated",
    )
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListParams {
    status: String,
    page_no: u32,
    page_size: u32,
}

async fn list(
    req: HttpRequest,
    state: web::Data<FakeState>,
    params: web::Query<ListParams>,
) -> HttpResponse {
    let Some(user_id) = caller(&req, &state) else {
        return unauthenticated();
    };
    state
        .recorded
        .lock()
        .expect("recorded lock")
        .list_queries
        .push(req.query_string().to_owned());
    let Ok(status) = params.status.parse::<TransactionStatus>() else {
        return rejection(
            actix_web::http::StatusCode::BAD_REQUEST,
            "BadRequest",
            "Unknown status",
        );
    };
    let matching: Vec<TransactionSummary> = state
        .transactions
        .lock()
        .expect("transactions lock")
        .iter()
        .filter(|info| info.status == status)
        .filter(|info| info.creator == user_id || info.winner == user_id)
        .map(|info| TransactionSummary {
            item_id: info.item_id,
            creator_id: info.creator.clone(),
            winner_id: info.winner.clone(),
            item_title: info.item_data.title.clone(),
            currency_id: info.item_data.currency_id.clone(),
            item_price: info.item_price,
            status: info.status,
        })
        .collect();
    let Ok(request) = PageRequest::new(params.page_no, params.page_size) else {
        return rejection(
            actix_web::http::StatusCode::BAD_REQUEST,
            "BadRequest",
            "Invalid page size",
        );
    };
    let start = (request.page() * request.page_size()) as usize;
    let items = matching
        .iter()
        .skip(start)
        .take(request.page_size() as usize)
        .cloned()
        .collect();
    HttpResponse::Ok().json(Page::new(items, request, matching.len() as u64))
}

fn find(state: &FakeState, raw_id: &str, user_id: &UserId) -> Result<TransactionInfo, HttpResponse> {
    if raw_id == BROKEN {
        return Err(HttpResponse::InternalServerError().body("database on fire"));
    }
    let transactions = state.transactions.lock().expect("transactions lock");
    let Some(info) = transactions
        .iter()
        .find(|info| info.item_id.to_string() == raw_id)
    else {
        return Err(rejection(
            actix_web::http::StatusCode::NOT_FOUND,
            "NotFound",
            &format!("Transaction for item {raw_id} not found"),
        ));
    };
    if &info.creator != user_id && &info.winner != user_id {
        return Err(rejection(
            actix_web::http::StatusCode::FORBIDDEN,
            "Forbidden",
            "Only the item owner and the auction winner can see transaction details",
        ));
    }
    Ok(info.clone())
}

async fn get(
    req: HttpRequest,
    state: web::Data<FakeState>,
    path: web::Path<String>,
) -> HttpResponse {
    let Some(user_id) = caller(&req, &state) else {
        return unauthenticated();
    };
    match find(&state, &path, &user_id) {
        Ok(info) => HttpResponse::Ok().json(info),
        Err(response) => response,
    }
}

async fn put_delivery(
    req: HttpRequest,
    state: web::Data<FakeState>,
    path: web::Path<String>,
    body: web::Json<DeliveryDetails>,
) -> HttpResponse {
    let Some(user_id) = caller(&req, &state) else {
        return unauthenticated();
    };
    state.recorded.lock().expect("recorded lock").delivery_puts += 1;
    let info = match find(&state, &path, &user_id) {
        Ok(info) => info,
        Err(response) => return response,
    };
    if info.winner != user_id {
        return rejection(
            actix_web::http::StatusCode::FORBIDDEN,
            "Forbidden",
            "Only the auction winner can submit delivery details",
        );
    }
    if info.status != TransactionStatus::NegotiatingDelivery {
        return rejection(
            actix_web::http::StatusCode::BAD_REQUEST,
            "BadRequest",
            "Can't update delivery details of a transaction that is no longer negotiating delivery",
        );
    }
    let mut transactions = state.transactions.lock().expect("transactions lock");
    if let Some(stored) = transactions
        .iter_mut()
        .find(|stored| stored.item_id == info.item_id)
    {
        stored.delivery_info = Some(body.into_inner());
    }
    HttpResponse::Ok().finish()
}

async fn users(req: HttpRequest, state: web::Data<FakeState>) -> HttpResponse {
    caller(&req, &state);
    HttpResponse::Ok().json(json!([
        { "id": ADA, "name": "Ada Lovelace" },
        { "id": CHARLES, "name": "Charles Babbage" },
        { "id": GRACE, "name": "Grace Hopper" },
    ]))
}

/// A running fake service; stopped when dropped.
pub struct FakeServices {
    base: Url,
    state: web::Data<FakeState>,
    handle: ServerHandle,
}

impl FakeServices {
    /// Start the fake with its seeded transactions.
    pub fn start() -> Self {
        let state = web::Data::new(FakeState {
            transactions: Mutex::new(seed()),
            recorded: Mutex::new(Recorded::default()),
        });
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fake services");
        let addr = listener.local_addr().expect("fake services address");
        let server_state = state.clone();
        let server = HttpServer::new(move || {
            actix_web::App::new()
                .app_data(server_state.clone())
                .route("/api/transaction", web::get().to(list))
                .route("/api/transaction/{id}", web::get().to(get))
                .route(
                    "/api/transaction/{id}/deliverydetails",
                    web::put().to(put_delivery),
                )
                .route("/api/user", web::get().to(users))
        })
        .workers(1)
        .disable_signals()
        .listen(listener)
        .expect("listen fake services")
        .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        Self {
            base: Url::parse(&format!("http://{addr}/")).expect("fake base url"),
            state,
            handle,
        }
    }

    /// Base URL serving both the transaction and user APIs.
    pub fn base(&self) -> Url {
        self.base.clone()
    }

    /// Snapshot of what the fake has seen so far.
    pub fn recorded(&self) -> Recorded {
        self.state.recorded.lock().expect("recorded lock").clone()
    }

    /// Stored delivery details for `item_id`.
    pub fn delivery_info(&self, item_id: &str) -> Option<DeliveryDetails> {
        self.state
            .transactions
            .lock()
            .expect("transactions lock")
            .iter()
            .find(|info| info.item_id.to_string() == item_id)
            .and_then(|info| info.delivery_info.clone())
    }
}

impl Drop for FakeServices {
    fn drop(&mut self) {
        drop(self.handle.stop(false));
    }
}
