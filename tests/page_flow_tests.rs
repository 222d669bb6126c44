use std::sync::Arc;

use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};

use hexabid::api::models::{BoqItem, CompanyData, NewContact, NewTicket};
use hexabid::api::ApiClient;
use hexabid::config::ClientConfig;
use hexabid::pages::{
    AdminPage, CrmPage, DocumentsPage, NoticeLevel, SupportPage, TenderDetailPage, TendersPage,
};
use hexabid::session::{MemoryTokenStore, Role, SessionStore, User};

fn test_user() -> User {
    User {
        id: "u1".into(),
        email: "jane@acme.in".into(),
        full_name: "Jane Doe".into(),
        company_name: None,
        role: Role::Contractor,
        is_active: true,
        kyc_verified: true,
        created_at: None,
    }
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind 127.0.0.1:0");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{}", addr)
}

/// Client with an already-established session holding `tok123`.
fn signed_in_client(backend: &str) -> ApiClient {
    let session = Arc::new(SessionStore::new(Box::new(MemoryTokenStore::new())));
    session.login("tok123", test_user());
    ApiClient::new(&ClientConfig::new(backend, "/tmp/unused"), session).expect("api client")
}

fn tender_json(id: &str) -> Value {
    json!({
        "id": id,
        "tender_id": format!("GEM-2025-{}", id),
        "title": "Road resurfacing works",
        "organization": "PWD Maharashtra",
        "estimated_value": 5_000_000.0,
        "emd_amount": 100_000.0,
        "category": "Infrastructure",
        "status": "active"
    })
}

#[tokio::test]
async fn list_requests_carry_the_bearer_header() {
    let seen: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let router = Router::new()
        .route(
            "/api/tenders",
            get(|State(seen): State<Arc<Mutex<Option<String>>>>, headers: HeaderMap| async move {
                *seen.lock() = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                Json(json!([tender_json("t1"), tender_json("t2")]))
            }),
        )
        .with_state(seen.clone());
    let backend = serve(router).await;
    let api = signed_in_client(&backend);

    let page = TendersPage::new();
    page.load(&api).await;

    assert_eq!(seen.lock().as_deref(), Some("Bearer tok123"));
    assert_eq!(page.rows().len(), 2);
    assert!(page.notices.is_empty());
}

#[tokio::test]
async fn failed_list_shows_zero_rows_and_one_generic_notice() {
    let router = Router::new().route(
        "/api/tenders",
        get(|| async {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"detail": "database exploded"})))
        }),
    );
    let backend = serve(router).await;
    let api = signed_in_client(&backend);

    let page = TendersPage::new();
    page.load(&api).await;

    assert!(page.rows().is_empty());
    let notices = page.notices.drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].text, "Failed to load tenders");
    // the backend's raw message is logged, never shown
    assert!(!notices[0].text.contains("database exploded"));
}

#[tokio::test]
async fn filters_are_sent_as_query_parameters() {
    let seen: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let router = Router::new()
        .route(
            "/api/tenders",
            get(|State(seen): State<Arc<Mutex<Option<String>>>>, RawQuery(q): RawQuery| async move {
                *seen.lock() = q;
                Json(json!([]))
            }),
        )
        .with_state(seen.clone());
    let backend = serve(router).await;
    let api = signed_in_client(&backend);

    let page = TendersPage::new();
    page.set_category(Some("Infrastructure".into()));
    page.set_status(Some("active".into()));
    page.load(&api).await;

    let q = seen.lock().clone().unwrap_or_default();
    assert!(q.contains("category=Infrastructure"), "query was: {}", q);
    assert!(q.contains("status=active"), "query was: {}", q);
}

#[tokio::test]
async fn detail_treats_missing_analysis_as_not_analyzed_yet() {
    let router = Router::new()
        .route("/api/tenders/{id}", get(|Path(id): Path<String>| async move { Json(tender_json(&id)) }))
        .route(
            "/api/tenders/{id}/analysis",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({"detail": "Analysis not found"}))) }),
        );
    let backend = serve(router).await;
    let api = signed_in_client(&backend);

    let page = TenderDetailPage::new("t1");
    page.load(&api).await;

    assert_eq!(page.tender.ready().unwrap().title, "Road resurfacing works");
    // 404 on the stored analysis is the normal empty state, not a failure
    assert_eq!(page.analysis.ready().map(|a| a.is_none()), Some(true));
    assert!(page.notices.is_empty());
}

#[tokio::test]
async fn admin_load_keeps_the_half_that_succeeded() {
    let router = Router::new()
        .route(
            "/api/admin/stats",
            get(|| async {
                Json(json!({"total_users": 42, "total_tenders": 7, "total_analyses": 3,
                            "revenue_this_month": 15000.0}))
            }),
        )
        .route(
            "/api/admin/users",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"detail": "boom"}))) }),
        );
    let backend = serve(router).await;
    let api = signed_in_client(&backend);

    let page = AdminPage::new();
    page.load(&api).await;

    assert_eq!(page.stats.ready().unwrap().total_users, 42);
    assert!(page.user_rows().is_empty());
    let notices = page.notices.drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].text, "Failed to load admin data");
}

#[tokio::test]
async fn emd_calculator_posts_without_credentials() {
    let seen: Arc<Mutex<(Option<String>, Option<String>)>> = Arc::new(Mutex::new((None, None)));
    let router = Router::new()
        .route(
            "/api/documents/calculate-emd",
            post(
                |State(seen): State<Arc<Mutex<(Option<String>, Option<String>)>>>,
                 RawQuery(q): RawQuery,
                 headers: HeaderMap| async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    *seen.lock() = (q, auth);
                    Json(json!({
                        "tender_value": 5_000_000.0,
                        "emd_percentage": 2.0,
                        "emd_amount": 100_000.0,
                        "emd_amount_formatted": "₹1,00,000"
                    }))
                },
            ),
        )
        .with_state(seen.clone());
    let backend = serve(router).await;
    let api = signed_in_client(&backend);

    let page = DocumentsPage::new();
    let calc = page.calculate_emd(&api, 5_000_000.0, 2.0).await.expect("emd");

    assert_eq!(calc.emd_amount, 100_000.0);
    let (q, auth) = seen.lock().clone();
    assert!(q.unwrap_or_default().contains("tender_value=5000000"));
    assert!(auth.is_none(), "public endpoint must not carry the bearer header");
    assert!(page.notices.is_empty());
}

#[tokio::test]
async fn failed_contact_create_hands_the_form_back() {
    let router = Router::new().route(
        "/api/crm/contacts",
        post(|| async { (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"detail": "email taken"}))) }),
    );
    let backend = serve(router).await;
    let api = signed_in_client(&backend);

    let page = CrmPage::new();
    let submitted = NewContact {
        name: "Acme Infra".into(),
        email: "buyer@acme.in".into(),
        phone: Some("9876543210".into()),
        company: None,
        contact_type: "vendor".into(),
        notes: None,
    };
    let returned = page.add_contact(&api, submitted).await.unwrap_err();

    // the submitted form comes back untouched so nothing is re-entered
    assert_eq!(returned.name, "Acme Infra");
    assert_eq!(returned.email, "buyer@acme.in");
    assert_eq!(returned.phone.as_deref(), Some("9876543210"));
    assert_eq!(returned.contact_type, "vendor");
    let notices = page.notices.drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].text, "Failed to add contact");
}

#[tokio::test]
async fn failed_ticket_create_hands_the_form_back() {
    let router = Router::new().route(
        "/api/support/tickets",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"detail": "boom"}))) }),
    );
    let backend = serve(router).await;
    let api = signed_in_client(&backend);

    let page = SupportPage::new();
    let submitted = NewTicket {
        subject: "Cannot download BOQ".into(),
        description: "Export button does nothing".into(),
        category: "technical".into(),
        priority: "high".into(),
    };
    let returned = page.create_ticket(&api, submitted).await.unwrap_err();

    assert_eq!(returned.subject, "Cannot download BOQ");
    assert_eq!(returned.description, "Export button does nothing");
    assert_eq!(returned.priority, "high");
    let notices = page.notices.drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].text, "Failed to create ticket");
}

#[tokio::test]
async fn failed_boq_generation_hands_the_items_back() {
    let router = Router::new().route(
        "/api/documents/generate-boq",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"detail": "boom"}))) }),
    );
    let backend = serve(router).await;
    let api = signed_in_client(&backend);

    let page = DocumentsPage::new();
    let items = vec![
        BoqItem { description: "Cement bags".into(), unit: "Nos".into(), quantity: 100.0, rate: 380.0 },
        BoqItem { description: "Steel rods".into(), unit: "Ton".into(), quantity: 2.0, rate: 52_000.0 },
    ];
    let returned = page.generate_boq(&api, "t1", items.clone()).await.unwrap_err();

    assert_eq!(returned, items);
    let notices = page.notices.drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].text, "Failed to generate BOQ");
}

#[tokio::test]
async fn failed_cover_letter_hands_the_company_form_back() {
    let router = Router::new().route(
        "/api/documents/generate-cover-letter",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"detail": "boom"}))) }),
    );
    let backend = serve(router).await;
    let api = signed_in_client(&backend);

    let page = DocumentsPage::new();
    let company = CompanyData {
        name: "Acme Infra".into(),
        established_year: "2012".into(),
        gst_number: "27AAAAA0000A1Z5".into(),
        authorized_person: "Jane Doe".into(),
        designation: "Director".into(),
        ..CompanyData::default()
    };
    let returned = page.generate_cover_letter(&api, "t1", company.clone()).await.unwrap_err();

    assert_eq!(returned, company);
    let notices = page.notices.drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].text, "Failed to generate cover letter");
}

#[tokio::test]
async fn templates_and_generators_round_trip() {
    let router = Router::new()
        .route(
            "/api/documents/templates",
            get(|| async {
                Json(json!([
                    {"id": "tpl1", "name": "Technical Bid", "description": "Standard technical bid format"},
                    {"id": "tpl2", "name": "EMD Exemption", "description": "MSME exemption request"}
                ]))
            }),
        )
        .route(
            "/api/documents/generate-company-profile",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["company_data"]["name"], "Acme Infra");
                Json(json!({"message": "Company profile generated successfully",
                            "file_path": "/files/profile.docx"}))
            }),
        );
    let backend = serve(router).await;
    let api = signed_in_client(&backend);

    let page = DocumentsPage::new();
    page.load_templates(&api).await;
    let templates = page.templates.ready().unwrap();
    assert_eq!(templates.len(), 2);
    assert_eq!(templates[0].name, "Technical Bid");

    let company = CompanyData { name: "Acme Infra".into(), ..CompanyData::default() };
    let ack = page.generate_company_profile(&api, company).await.expect("profile");
    assert_eq!(ack.file_path, "/files/profile.docx");

    let notices = page.notices.drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Success);
    assert_eq!(notices[0].text, "Company profile generated successfully");
}

#[tokio::test]
async fn transport_failure_surfaces_as_a_notice_not_a_panic() {
    // nothing listening on this port
    let api = signed_in_client("http://127.0.0.1:9");

    let page = TendersPage::new();
    page.load(&api).await;

    assert!(page.rows().is_empty());
    let notices = page.notices.drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].text, "Failed to load tenders");
}
