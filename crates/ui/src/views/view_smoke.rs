use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use audit_core::model::{Language, Restaurant};
use services::Coordinates;

use crate::views::test_harness::{
    HarnessOptions, ViewKind, app_services, setup_view_harness, setup_view_harness_with,
};

fn method_path(name: &str) -> String {
    format!("/api/method/restaurant_audit.api.audit_api.{name}")
}

async fn mount_ok(server: &MockServer, name: &str, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(method_path(name)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": body })))
        .mount(server)
        .await;
}

async fn mount_restaurants(server: &MockServer) {
    mount_ok(
        server,
        "get_user_dashboard",
        json!({
            "success": true,
            "dashboard": {
                "user": {"name": "auditor@example.com", "full_name": "sara khan"},
                "stats": {"total_audits": 12, "avg_score": 84.26},
                "pending_progress": []
            }
        }),
    )
    .await;
    mount_ok(
        server,
        "get_restaurants_with_week_status",
        json!({
            "success": true,
            "restaurants": [
                {"name": "REST-1", "restaurant_name": "Harbour Grill", "status": "active",
                 "address": "1 Pier Road", "employee_name": "Omar", "designation": "Manager",
                 "can_access": 1, "location_radius": 150},
                {"name": "REST-2", "restaurant_name": "Oak Bistro", "status": "inactive",
                 "can_access": 1}
            ]
        }),
    )
    .await;
    mount_ok(
        server,
        "get_audit_progress",
        json!({"success": true, "has_progress": false}),
    )
    .await;
}

fn selected_restaurant() -> Restaurant {
    serde_json::from_value(json!({
        "name": "REST-1",
        "restaurant_name": "Harbour Grill",
        "can_access": 1
    }))
    .unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn restaurants_view_renders_dashboard_and_every_card() {
    let server = MockServer::start().await;
    mount_restaurants(&server).await;

    let mut harness = setup_view_harness(ViewKind::Restaurants, &server);
    harness.rebuild();
    let html = harness.render_when("Harbour Grill").await;

    assert!(html.contains("Harbour Grill"), "missing card: {html}");
    assert!(html.contains("1 Pier Road"));
    assert!(html.contains("Omar (Manager)"));
    assert!(html.contains("150m radius"));
    assert!(html.contains("Never"));
    assert!(html.contains("Oak Bistro"), "inactive card hidden: {html}");
    let selected = html
        .split("filter-btn active")
        .nth(1)
        .and_then(|rest| rest.split("</button>").next())
        .unwrap_or_default();
    assert!(selected.contains("All"), "all filter not selected: {html}");

    let html = harness.render_when("avatar").await;
    assert!(html.contains("sara khan"));
    assert!(html.contains(">S<"), "missing initial: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn restaurants_view_surfaces_transport_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut harness = setup_view_harness(ViewKind::Restaurants, &server);
    harness.rebuild();
    let html = harness
        .render_when("Could not reach the server. Please try again.")
        .await;

    assert!(html.contains("Could not reach the server. Please try again."));
    assert!(!html.contains("Harbour Grill"));
}

#[tokio::test(flavor = "current_thread")]
async fn restaurants_view_uses_arabic_labels() {
    let server = MockServer::start().await;
    mount_restaurants(&server).await;

    let mut harness = setup_view_harness_with(
        ViewKind::Restaurants,
        app_services(&server),
        HarnessOptions {
            lang: Language::Ar,
            position: None,
        },
    );
    harness.rebuild();
    let html = harness.render_when("Harbour Grill").await;

    assert!(html.contains("بحث"), "missing arabic placeholder: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn audit_view_without_selection_shows_error() {
    let server = MockServer::start().await;

    let mut harness = setup_view_harness(ViewKind::Audit, &server);
    harness.rebuild();
    let html = harness.render_when("no restaurant has been selected").await;

    assert!(html.contains("no restaurant has been selected"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn audit_view_lists_categories_and_verifies_location() {
    let server = MockServer::start().await;
    mount_ok(
        &server,
        "get_checklist_template",
        json!({
            "success": true,
            "templates": [{
                "categories": [{
                    "id": "kitchen",
                    "name": "Kitchen",
                    "questions": [
                        {"id": "q1", "text": "Is the floor clean?", "answer_type": "Yes/No",
                         "is_mandatory": 1},
                        {"id": "q2", "text": "Rate the prep area", "answer_type": "Rating",
                         "is_mandatory": 1}
                    ]
                }]
            }]
        }),
    )
    .await;
    mount_ok(
        &server,
        "validate_location",
        json!({"success": true, "is_within_range": true, "message": "ok"}),
    )
    .await;

    let services = app_services(&server);
    services
        .restaurants()
        .select(&selected_restaurant())
        .await
        .unwrap();
    let mut harness = setup_view_harness_with(
        ViewKind::Audit,
        services,
        HarnessOptions {
            lang: Language::En,
            position: Some(Coordinates {
                latitude: 25.2,
                longitude: 55.3,
            }),
        },
    );
    harness.rebuild();
    let html = harness.render_when("Location Verified").await;

    assert!(html.contains("Harbour Grill"), "{html}");
    assert!(html.contains("Kitchen"));
    assert!(html.contains("0/2"));
    assert!(html.contains("Location Verified"));
    assert!(html.contains("Submit Audit"));
}

#[tokio::test(flavor = "current_thread")]
async fn schedule_view_renders_weeks_and_processes_last_week_once() {
    let server = MockServer::start().await;
    mount_ok(
        &server,
        "get_my_weekly_visits",
        json!({
            "success": true,
            "current_week": {
                "start": "2026-03-02",
                "end": "2026-03-08",
                "visits": [
                    {"name": "V-1", "restaurant": "REST-1", "restaurant_name": "Harbour Grill",
                     "visit_date": "2026-03-03", "status": "Pending"}
                ]
            },
            "next_week": {"start": "2026-03-09", "end": "2026-03-15", "visits": []}
        }),
    )
    .await;
    mount_ok(
        &server,
        "get_weekly_scheduled_audits",
        json!({
            "success": true,
            "current_week": {"scheduled_audits": []},
            "next_week": {"scheduled_audits": []}
        }),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(method_path("process_last_week_status")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": {"success": true, "updates_made": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut harness = setup_view_harness(ViewKind::Schedule, &server);
    harness.rebuild();
    let html = harness.render_when("Harbour Grill").await;

    assert!(html.contains("Harbour Grill"), "{html}");
    assert!(html.contains("You have not scheduled any visits for next week yet."));
    assert!(html.contains("No visits scheduled."));
    assert!(harness.services.schedule().refresh_due().await.map(|due| !due).unwrap());
}

#[tokio::test(flavor = "current_thread")]
async fn daily_view_shows_open_template() {
    let server = MockServer::start().await;
    mount_ok(
        &server,
        "get_daily_templates",
        json!({
            "success": true,
            "templates": [{
                "name": "DAT-0001",
                "template_name": "Opening checks",
                "open_time": "07:00:00",
                "close_time": "09:00:00",
                "questions_count": 5,
                "applies_to_all_restaurants": 1
            }]
        }),
    )
    .await;

    let mut harness = setup_view_harness(ViewKind::DailyAudits, &server);
    harness.rebuild();
    let html = harness.render_when("Opening checks").await;

    assert!(html.contains("Opening checks"), "{html}");
    assert!(html.contains("07:00 - 09:00"));
    assert!(html.contains("All restaurants"));
    assert!(html.contains("Start Audit"));
    assert!(html.contains("Open"));
}

#[tokio::test(flavor = "current_thread")]
async fn daily_session_view_without_payload_links_back() {
    let server = MockServer::start().await;

    let mut harness = setup_view_harness(ViewKind::DailyAuditSession, &server);
    harness.rebuild();
    let html = harness.render_when("No daily audit in progress.").await;

    assert!(html.contains("No daily audit in progress."), "{html}");
    assert!(html.contains("Daily Audits"));
}

#[tokio::test(flavor = "current_thread")]
async fn photo_follow_up_offers_an_image_file_picker() {
    let server = MockServer::start().await;

    let mut harness = setup_view_harness(ViewKind::PhotoFollowUp, &server);
    harness.rebuild();
    let html = harness.render_when("Attach").await;

    assert!(html.contains("type=\"file\""), "{html}");
    assert!(html.contains("accept=\"image/*\""), "{html}");
    assert!(!html.contains("type=\"text\""), "{html}");
    assert!(html.contains("Skip"));
}
