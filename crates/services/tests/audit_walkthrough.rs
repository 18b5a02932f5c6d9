//! Load a checklist from a mock backend, walk it through the chat driver and
//! submit the answers.

use serde_json::{json, Value};
use services::checklist_service::ChecklistService;
use services::rpc::{RpcClient, RpcConfig};
use services::walker::{Effect, WalkerPhase};
use services::{ChatSession, WalkerEvent};

use audit_core::model::{CategoryId, FollowUpKind, FollowUpValue, QuestionId, RestaurantId};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEMPLATE_PATH: &str = "/api/method/restaurant_audit.api.audit_api.get_checklist_template";
const SUBMIT_PATH: &str = "/api/method/restaurant_audit.api.audit_api.submit_audit";

fn template_reply() -> Value {
    json!({
        "message": {
            "success": true,
            "templates": [{
                "categories": [{
                    "id": "kitchen",
                    "name": "Kitchen",
                    "questions": [
                        {
                            "id": "q-rating",
                            "text": "How clean is the prep area?",
                            "answer_type": "Rating",
                            "options": [],
                            "is_mandatory": 1,
                            "allow_image_upload": 0,
                            "comment": null
                        },
                        {
                            "id": "q-fridge",
                            "text": "Is the fridge below 5°C?",
                            "answer_type": "Yes/No",
                            "options": ["Thermometer", "Log sheet"],
                            "is_mandatory": 1,
                            "allow_image_upload": 1,
                            "comment": "Check the display"
                        }
                    ]
                }]
            }]
        }
    })
}

async fn checklist_service(server: &MockServer) -> ChecklistService {
    Mock::given(method("POST"))
        .and(path(TEMPLATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(template_reply()))
        .expect(1)
        .mount(server)
        .await;
    let rpc = RpcClient::new(RpcConfig::parse(&server.uri()).unwrap()).unwrap();
    ChecklistService::new(rpc)
}

async fn answer_current(chat: &mut ChatSession, pick: usize) -> Vec<Effect> {
    let question = chat.walker().current_question().unwrap().clone();
    let choice = question.choices()[pick].clone();
    chat.dispatch(WalkerEvent::Answer {
        question: question.id,
        choice,
        selected_options: Vec::new(),
    })
    .await
    .unwrap()
}

async fn skip_follow_ups(chat: &mut ChatSession) -> Vec<FollowUpKind> {
    let mut skipped = Vec::new();
    while let Some(task) = chat.walker().pending_follow_up().cloned() {
        skipped.push(task.kind);
        chat.dispatch(WalkerEvent::FollowUp {
            task,
            value: FollowUpValue::Skip,
        })
        .await
        .unwrap();
        if chat.walker().phase() != WalkerPhase::AskingFollowUp {
            break;
        }
    }
    skipped
}

#[tokio::test]
async fn skipping_every_follow_up_still_completes_the_category() {
    let server = MockServer::start().await;
    let service = checklist_service(&server).await;
    let checklist = service
        .load_checklist(&RestaurantId::new("REST-1"))
        .await
        .unwrap();
    assert_eq!(checklist.total_questions(), 2);

    let mut chat = ChatSession::headless(checklist);
    let opened = chat
        .dispatch(WalkerEvent::OpenCategory(CategoryId::new("kitchen")))
        .await
        .unwrap();
    assert_eq!(
        opened[0],
        Effect::OpenChat {
            title: "Kitchen Audit".into()
        }
    );

    answer_current(&mut chat, 4).await;
    assert_eq!(skip_follow_ups(&mut chat).await, vec![FollowUpKind::Comment]);

    answer_current(&mut chat, 0).await;
    assert_eq!(
        skip_follow_ups(&mut chat).await,
        vec![FollowUpKind::Image, FollowUpKind::Comment]
    );

    assert!(!chat.is_open());
    let checklist = chat.checklist();
    assert!(checklist.categories()[0].completed);
    assert_eq!(checklist.answers().len(), 2);
    for (_, answer) in checklist.answers().iter() {
        assert_eq!(answer.comment, "");
        assert_eq!(answer.image_data, "");
    }
    assert_eq!(checklist.completion_percent(), 100);
    assert_eq!(checklist.score_percent(), 100);
    assert!(checklist.can_submit());
}

#[tokio::test]
async fn submitted_answers_carry_follow_ups() {
    let server = MockServer::start().await;
    let service = checklist_service(&server).await;
    Mock::given(method("POST"))
        .and(path(SUBMIT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": {"success": true, "message": "Audit submitted successfully!"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let restaurant = RestaurantId::new("REST-1");
    let checklist = service.load_checklist(&restaurant).await.unwrap();
    let mut chat = ChatSession::headless(checklist);
    chat.dispatch(WalkerEvent::OpenCategory(CategoryId::new("kitchen")))
        .await
        .unwrap();

    answer_current(&mut chat, 2).await;
    let comment = chat.walker().pending_follow_up().cloned().unwrap();
    chat.dispatch(WalkerEvent::FollowUp {
        task: comment,
        value: FollowUpValue::Comment("Crumbs under the slicer".into()),
    })
    .await
    .unwrap();

    answer_current(&mut chat, 1).await;
    let image = chat.walker().pending_follow_up().cloned().unwrap();
    let photo = FollowUpValue::image_file("fridge.jpg", &[0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
    let effects = chat
        .dispatch(WalkerEvent::FollowUp {
            task: image,
            value: photo,
        })
        .await
        .unwrap();
    assert!(effects.contains(&Effect::UserReply("Image attached.".into())));
    skip_follow_ups(&mut chat).await;

    let message = service
        .submit_audit(&restaurant, chat.checklist(), "  Good overall  ")
        .await
        .unwrap();
    assert_eq!(message, "Audit submitted successfully!");

    let requests = server.received_requests().await.unwrap();
    let submit = requests
        .iter()
        .find(|r| r.url.path() == SUBMIT_PATH)
        .unwrap();
    let body: Value = serde_json::from_slice(&submit.body).unwrap();
    assert_eq!(body["restaurant_id"], "REST-1");
    assert_eq!(body["overall_comment"], "Good overall");

    let rows: Vec<Value> = serde_json::from_str(body["answers"].as_str().unwrap()).unwrap();
    assert_eq!(rows.len(), 2);
    let fridge = rows
        .iter()
        .find(|row| row["question_id"] == "q-fridge")
        .unwrap();
    assert_eq!(fridge["answer_value"], "No");
    assert_eq!(fridge["image_data"], "data:image/jpeg;base64,/9j/4A==");
    assert_eq!(fridge["category"], "kitchen");
    let prep = rows
        .iter()
        .find(|row| row["question_id"] == QuestionId::new("q-rating").as_str())
        .unwrap();
    assert_eq!(prep["answer_value"], 3);
    assert_eq!(prep["answer_comment"], "Crumbs under the slicer");
}
