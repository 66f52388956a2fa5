#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Path, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde_json::json;

use classroom::models::{
    AssignRequest, Assignment, Contact, ContactKind, Conversation, GenerateRequest,
    GradebookRecord, GradedAssignment, LessonPlan, Message, NewMessageRequest, NewStudentRequest,
    Question, Student, StudentAssignment, SubmissionRequest,
};
use classroom::{ClientConfig, HttpClassroomApi};

pub const TOKEN: &str = "test-token";
pub const TEACHER_ID: &str = "teacher-1";
pub const STUDENT_ID: &str = "student-1";

#[derive(Default)]
pub struct MockState {
    pub user_id: String,
    pub student_assignments: Vec<StudentAssignment>,
    pub assignments: Vec<Assignment>,
    pub students: Vec<Student>,
    pub gradebook: Vec<GradebookRecord>,
    pub lesson_plans: Vec<LessonPlan>,
    pub contacts: Vec<Contact>,
    pub messages: Vec<Message>,
    /// Every GET listing answers 500 while set; writes still succeed.
    pub fail_listing: bool,
    pub listing_calls: usize,
    pub submit_calls: usize,
    pub assign_requests: Vec<AssignRequest>,
}

pub type Shared = Arc<Mutex<MockState>>;

pub struct MockBackend {
    pub base_url: String,
    pub state: Shared,
}

impl MockBackend {
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.clone()).with_token(TOKEN)
    }

    pub fn api(&self) -> Arc<HttpClassroomApi> {
        Arc::new(HttpClassroomApi::new(self.config()).expect("client"))
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&mut MockState) -> R) -> R {
        let mut guard = self.state.lock().expect("state lock");
        f(&mut guard)
    }
}

pub async fn spawn(state: MockState) -> MockBackend {
    let shared: Shared = Arc::new(Mutex::new(state));

    let protected = Router::new()
        .route("/student/assignments", get(list_student_assignments))
        .route("/student/assignments/submit", post(submit))
        .route("/assignments", get(list_assignments))
        .route("/assignments/generate", post(generate_assignment))
        .route("/assignments/assign", post(assign))
        .route("/students", get(list_students).post(create_student))
        .route("/students/{id}", delete(delete_student))
        .route("/gradebook", get(gradebook))
        .route("/lesson-plans", get(list_lesson_plans))
        .route("/lesson-plans/generate", post(generate_lesson_plan))
        .route("/messages", get(conversations).post(send_message))
        .route("/messages/{contact_id}", get(thread))
        .layer(middleware::from_fn(require_token));

    let api = Router::new()
        .route("/health", get(health))
        .merge(protected);

    let app = Router::new().nest("/api", api).with_state(shared.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend");
    });

    MockBackend {
        base_url: format!("http://{}", addr),
        state: shared,
    }
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn unavailable() -> Response {
    detail(StatusCode::INTERNAL_SERVER_ERROR, "database unavailable")
}

async fn require_token(req: Request, next: Next) -> Response {
    let expected = format!("Bearer {}", TOKEN);
    let ok = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == expected)
        .unwrap_or(false);
    if !ok {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    }
    next.run(req).await
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "service": "Homeschool Hub API" }))
}

async fn list_student_assignments(State(state): State<Shared>) -> Response {
    let mut s = state.lock().expect("state lock");
    s.listing_calls += 1;
    if s.fail_listing {
        return unavailable();
    }
    Json(s.student_assignments.clone()).into_response()
}

async fn submit(State(state): State<Shared>, Json(req): Json<SubmissionRequest>) -> Response {
    let mut s = state.lock().expect("state lock");
    s.submit_calls += 1;

    let Some(record) = s
        .student_assignments
        .iter_mut()
        .find(|a| a.student_assignment_id == req.student_assignment_id)
    else {
        return detail(StatusCode::NOT_FOUND, "Assignment not found");
    };
    if record.completed {
        return detail(StatusCode::BAD_REQUEST, "Assignment already submitted");
    }

    let questions = &record.assignment.questions;
    let correct = req
        .answers
        .iter()
        .enumerate()
        .filter(|(i, a)| {
            questions
                .get(*i)
                .map(|q| **a == q.correct_answer as i64)
                .unwrap_or(false)
        })
        .count();
    let total = questions.len();
    let score = if total > 0 {
        correct as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    record.completed = true;
    record.score = Some(score);
    record.submitted_at = Some(Utc::now());

    Json(json!({
        "message": "Assignment submitted successfully",
        "score": score,
        "correct_answers": correct,
        "total_questions": total,
    }))
    .into_response()
}

async fn list_assignments(State(state): State<Shared>) -> Response {
    let s = state.lock().expect("state lock");
    if s.fail_listing {
        return unavailable();
    }
    Json(s.assignments.clone()).into_response()
}

async fn generate_assignment(
    State(state): State<Shared>,
    Json(req): Json<GenerateRequest>,
) -> Json<Assignment> {
    let mut s = state.lock().expect("state lock");
    let mut generated = assignment(
        &uuid::Uuid::new_v4().to_string(),
        &format!("{} - {}", req.subject, req.topic),
        &req.subject,
        &req.topic,
        &[0],
    );
    generated.grade_level = req.grade_level.clone();
    generated.questions[0].question = format!("What is an important concept in {}?", req.topic);
    s.assignments.push(generated.clone());
    Json(generated)
}

async fn assign(State(state): State<Shared>, Json(req): Json<AssignRequest>) -> Response {
    let mut s = state.lock().expect("state lock");
    if !s.assignments.iter().any(|a| a.id == req.assignment_id) {
        return detail(StatusCode::NOT_FOUND, "Assignment not found");
    }
    let count = req.student_ids.len();
    s.assign_requests.push(req);
    Json(json!({ "message": format!("Assignment assigned to {} students", count) })).into_response()
}

async fn list_students(State(state): State<Shared>) -> Response {
    let s = state.lock().expect("state lock");
    if s.fail_listing {
        return unavailable();
    }
    Json(s.students.clone()).into_response()
}

async fn create_student(
    State(state): State<Shared>,
    Json(req): Json<NewStudentRequest>,
) -> Response {
    let mut s = state.lock().expect("state lock");
    if s.students.iter().any(|st| st.username == req.username) {
        return detail(StatusCode::BAD_REQUEST, "Username already exists");
    }
    let created = Student {
        id: uuid::Uuid::new_v4().to_string(),
        first_name: req.first_name,
        last_name: req.last_name,
        username: req.username,
        teacher_id: Some(TEACHER_ID.to_string()),
        created_at: Utc::now(),
    };
    s.students.push(created.clone());
    Json(created).into_response()
}

async fn delete_student(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let mut s = state.lock().expect("state lock");
    let before = s.students.len();
    s.students.retain(|st| st.id != id);
    if s.students.len() == before {
        return detail(StatusCode::NOT_FOUND, "Student not found");
    }
    Json(json!({ "message": "Student deleted successfully" })).into_response()
}

async fn gradebook(State(state): State<Shared>) -> Response {
    let s = state.lock().expect("state lock");
    if s.fail_listing {
        return unavailable();
    }
    Json(s.gradebook.clone()).into_response()
}

async fn list_lesson_plans(State(state): State<Shared>) -> Response {
    let s = state.lock().expect("state lock");
    if s.fail_listing {
        return unavailable();
    }
    Json(s.lesson_plans.clone()).into_response()
}

async fn generate_lesson_plan(
    State(state): State<Shared>,
    Json(req): Json<GenerateRequest>,
) -> Json<LessonPlan> {
    let mut s = state.lock().expect("state lock");
    let plan = LessonPlan {
        id: uuid::Uuid::new_v4().to_string(),
        title: format!("{} - {}", req.subject, req.topic),
        subject: req.subject.clone(),
        grade_level: req.grade_level.clone(),
        topic: req.topic.clone(),
        content: format!(
            "Basic lesson plan for {} - {} at {} level.",
            req.subject, req.topic, req.grade_level
        ),
        teacher_id: Some(TEACHER_ID.to_string()),
        created_at: Utc::now(),
    };
    s.lesson_plans.push(plan.clone());
    Json(plan)
}

async fn conversations(State(state): State<Shared>) -> Response {
    let s = state.lock().expect("state lock");
    if s.fail_listing {
        return unavailable();
    }
    let out: Vec<Conversation> = s
        .contacts
        .iter()
        .map(|contact| {
            let mut between: Vec<&Message> = s
                .messages
                .iter()
                .filter(|m| m.is_between(&s.user_id, &contact.id))
                .collect();
            between.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
            Conversation {
                contact: contact.clone(),
                last_message: between.first().map(|m| (*m).clone()),
            }
        })
        .collect();
    Json(out).into_response()
}

async fn thread(State(state): State<Shared>, Path(contact_id): Path<String>) -> Response {
    let s = state.lock().expect("state lock");
    if s.fail_listing {
        return unavailable();
    }
    let mut out: Vec<Message> = s
        .messages
        .iter()
        .filter(|m| m.is_between(&s.user_id, &contact_id))
        .cloned()
        .collect();
    out.sort_by(|a, b| a.sent_at.cmp(&b.sent_at));
    Json(out).into_response()
}

async fn send_message(
    State(state): State<Shared>,
    Json(req): Json<NewMessageRequest>,
) -> Json<Message> {
    let mut s = state.lock().expect("state lock");
    let message = Message {
        id: uuid::Uuid::new_v4().to_string(),
        sender_id: s.user_id.clone(),
        recipient_id: req.recipient_id,
        content: req.content,
        sent_at: Utc::now(),
        read: false,
    };
    s.messages.push(message.clone());
    Json(message)
}

// fixtures

pub fn ts(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("fixture timestamp")
        .with_timezone(&Utc)
}

pub fn assignment(
    id: &str,
    title: &str,
    subject: &str,
    topic: &str,
    correct: &[usize],
) -> Assignment {
    Assignment {
        id: id.to_string(),
        title: title.to_string(),
        subject: subject.to_string(),
        grade_level: "3rd Grade".to_string(),
        topic: topic.to_string(),
        reading_passage: None,
        questions: correct
            .iter()
            .enumerate()
            .map(|(i, c)| Question {
                question: format!("Question {}?", i + 1),
                options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                correct_answer: *c,
            })
            .collect(),
        teacher_id: Some(TEACHER_ID.to_string()),
        created_at: Some(ts("2024-09-01T08:00:00Z")),
    }
}

pub fn student_assignment(
    id: &str,
    assignment: Assignment,
    score: Option<f64>,
    assigned_at: &str,
    submitted_at: Option<&str>,
) -> StudentAssignment {
    StudentAssignment {
        student_assignment_id: id.to_string(),
        assignment,
        completed: submitted_at.is_some(),
        score,
        submitted_at: submitted_at.map(ts),
        assigned_at: ts(assigned_at),
    }
}

pub fn student(id: &str, first: &str, last: &str, username: &str, created_at: &str) -> Student {
    Student {
        id: id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        username: username.to_string(),
        teacher_id: Some(TEACHER_ID.to_string()),
        created_at: ts(created_at),
    }
}

pub fn graded(title: &str, score: Option<f64>, submitted_at: Option<&str>) -> GradedAssignment {
    GradedAssignment {
        assignment_title: title.to_string(),
        subject: "Math".to_string(),
        score,
        submitted_at: submitted_at.map(ts),
    }
}

pub fn message(id: &str, from: &str, to: &str, content: &str, sent_at: &str) -> Message {
    Message {
        id: id.to_string(),
        sender_id: from.to_string(),
        recipient_id: to.to_string(),
        content: content.to_string(),
        sent_at: ts(sent_at),
        read: false,
    }
}

pub fn contact(id: &str, name: &str, kind: ContactKind) -> Contact {
    Contact {
        id: id.to_string(),
        name: name.to_string(),
        kind,
    }
}
