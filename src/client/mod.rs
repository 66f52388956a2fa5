pub mod dto;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::AppError;
use crate::models::{
    AssignRequest, Assignment, Conversation, GenerateRequest, GradebookRecord, LessonPlan,
    Message, NewMessageRequest, NewStudentRequest, Student, StudentAssignment, SubmissionRequest,
    SubmissionResult,
};

/// The classroom REST surface. Every call is a single request; nothing is retried.
#[async_trait]
pub trait ClassroomApi: Send + Sync {
    async fn health(&self) -> Result<dto::HealthResponse, AppError>;

    async fn list_student_assignments(&self) -> Result<Vec<StudentAssignment>, AppError>;
    async fn submit_assignment(
        &self,
        request: &SubmissionRequest,
    ) -> Result<SubmissionResult, AppError>;

    async fn list_assignments(&self) -> Result<Vec<Assignment>, AppError>;
    async fn generate_assignment(&self, request: &GenerateRequest)
    -> Result<Assignment, AppError>;
    async fn assign_assignment(&self, request: &AssignRequest) -> Result<(), AppError>;

    async fn list_students(&self) -> Result<Vec<Student>, AppError>;
    async fn create_student(&self, request: &NewStudentRequest) -> Result<Student, AppError>;
    async fn delete_student(&self, student_id: &str) -> Result<(), AppError>;

    async fn gradebook(&self) -> Result<Vec<GradebookRecord>, AppError>;

    async fn list_lesson_plans(&self) -> Result<Vec<LessonPlan>, AppError>;
    async fn generate_lesson_plan(
        &self,
        request: &GenerateRequest,
    ) -> Result<LessonPlan, AppError>;

    async fn list_conversations(&self) -> Result<Vec<Conversation>, AppError>;
    async fn list_messages(&self, contact_id: &str) -> Result<Vec<Message>, AppError>;
    async fn send_message(&self, request: &NewMessageRequest) -> Result<Message, AppError>;
}

pub struct HttpClassroomApi {
    client: Client,
    config: ClientConfig,
}

impl HttpClassroomApi {
    pub fn new(config: ClientConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base(), path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<String, AppError> {
        debug!("{} {}", method, path);

        let response = self.authorize(builder).send().await.map_err(|e| {
            warn!("{} {} failed: {}", method, path, e);
            AppError::Transport(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = AppError::from_response_body(status, &body);
            warn!("{} {} returned {}: {}", method, path, status, err);
            return Err(err);
        }

        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let body = self.send("GET", path, self.client.get(self.url(path))).await?;
        decode(path, &body)
    }

    async fn post_json<B, T>(&self, path: &str, payload: &B) -> Result<T, AppError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let builder = self.client.post(self.url(path)).json(payload);
        let body = self.send("POST", path, builder).await?;
        decode(path, &body)
    }
}

fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, AppError> {
    serde_json::from_str::<T>(body).map_err(|e| {
        tracing::error!("Failed to parse response from {}: {}", path, e);
        AppError::Decode(e)
    })
}

#[async_trait]
impl ClassroomApi for HttpClassroomApi {
    async fn health(&self) -> Result<dto::HealthResponse, AppError> {
        self.get_json("/health").await
    }

    async fn list_student_assignments(&self) -> Result<Vec<StudentAssignment>, AppError> {
        self.get_json("/student/assignments").await
    }

    async fn submit_assignment(
        &self,
        request: &SubmissionRequest,
    ) -> Result<SubmissionResult, AppError> {
        self.post_json("/student/assignments/submit", request).await
    }

    async fn list_assignments(&self) -> Result<Vec<Assignment>, AppError> {
        self.get_json("/assignments").await
    }

    async fn generate_assignment(
        &self,
        request: &GenerateRequest,
    ) -> Result<Assignment, AppError> {
        self.post_json("/assignments/generate", request).await
    }

    async fn assign_assignment(&self, request: &AssignRequest) -> Result<(), AppError> {
        let ack: dto::MessageResponse = self.post_json("/assignments/assign", request).await?;
        if let Some(message) = ack.message {
            debug!("assign: {}", message);
        }
        Ok(())
    }

    async fn list_students(&self) -> Result<Vec<Student>, AppError> {
        self.get_json("/students").await
    }

    async fn create_student(&self, request: &NewStudentRequest) -> Result<Student, AppError> {
        self.post_json("/students", request).await
    }

    async fn delete_student(&self, student_id: &str) -> Result<(), AppError> {
        let path = format!("/students/{}", student_id);
        let builder = self.client.delete(self.url(&path));
        self.send("DELETE", &path, builder).await?;
        Ok(())
    }

    async fn gradebook(&self) -> Result<Vec<GradebookRecord>, AppError> {
        self.get_json("/gradebook").await
    }

    async fn list_lesson_plans(&self) -> Result<Vec<LessonPlan>, AppError> {
        self.get_json("/lesson-plans").await
    }

    async fn generate_lesson_plan(
        &self,
        request: &GenerateRequest,
    ) -> Result<LessonPlan, AppError> {
        self.post_json("/lesson-plans/generate", request).await
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>, AppError> {
        self.get_json("/messages").await
    }

    async fn list_messages(&self, contact_id: &str) -> Result<Vec<Message>, AppError> {
        self.get_json(&format!("/messages/{}", contact_id)).await
    }

    async fn send_message(&self, request: &NewMessageRequest) -> Result<Message, AppError> {
        self.post_json("/messages", request).await
    }
}
