/// Typed client for the Taskboard API
///
/// One method per endpoint. Non-2xx answers become
/// [`ClientError::Server`] carrying the API's message, except where a
/// method documents otherwise.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskboard_client::api::TaskboardApi;
/// use taskboard_client::identity::TokenIdentityProvider;
/// use taskboard_client::request::AuthenticatedClient;
/// use taskboard_client::transport::ReqwestTransport;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let identity = Arc::new(TokenIdentityProvider::new(Some("eyJ...".to_string()), "secret"));
/// let client = AuthenticatedClient::new(identity, Arc::new(ReqwestTransport::new()?));
/// let api = TaskboardApi::new(client, "http://localhost:3001");
///
/// for project in api.list_projects().await? {
///     println!("{}", project.name);
/// }
/// # Ok(())
/// # }
/// ```

use crate::error::{ClientError, ClientResult};
use crate::forms::{NewProject, NewTask};
use crate::request::{AuthenticatedClient, RequestOptions};
use reqwest::{StatusCode, Url};
use serde_json::json;
use taskboard_shared::models::{
    project::Project,
    task::{Task, TaskStatus},
    team::Team,
    user::{CreateUser, User},
};

/// Typed API client
#[derive(Clone)]
pub struct TaskboardApi {
    client: AuthenticatedClient,
    base_url: String,
}

impl TaskboardApi {
    pub fn new(client: AuthenticatedClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Underlying authenticated client
    pub fn client(&self) -> &AuthenticatedClient {
        &self.client
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/users/<subject>` with the subject percent-encoded as one segment
    fn user_url(&self, subject_id: &str) -> ClientResult<String> {
        let invalid_base =
            || ClientError::Transport(format!("Invalid API base URL: {}", self.base_url));

        let mut url = Url::parse(&self.url("/users")).map_err(|_| invalid_base())?;
        url.path_segments_mut()
            .map_err(|_| invalid_base())?
            .push(subject_id);
        Ok(url.into())
    }

    pub async fn list_projects(&self) -> ClientResult<Vec<Project>> {
        self.client
            .send(&self.url("/projects"), RequestOptions::get())
            .await?
            .into_json()
    }

    pub async fn create_project(&self, project: &NewProject) -> ClientResult<Project> {
        self.client
            .send(&self.url("/projects"), RequestOptions::post(serde_json::to_value(project)?))
            .await?
            .into_json()
    }

    pub async fn list_tasks(&self, project_id: i32) -> ClientResult<Vec<Task>> {
        self.client
            .send(
                &self.url(&format!("/tasks?projectId={}", project_id)),
                RequestOptions::get(),
            )
            .await?
            .into_json()
    }

    pub async fn create_task(&self, task: &NewTask) -> ClientResult<Task> {
        self.client
            .send(&self.url("/tasks"), RequestOptions::post(serde_json::to_value(task)?))
            .await?
            .into_json()
    }

    pub async fn update_task_status(&self, task_id: i32, status: TaskStatus) -> ClientResult<Task> {
        self.client
            .send(
                &self.url(&format!("/tasks/{}/status", task_id)),
                RequestOptions::patch(json!({ "status": status })),
            )
            .await?
            .into_json()
    }

    pub async fn list_teams(&self) -> ClientResult<Vec<Team>> {
        self.client
            .send(&self.url("/teams"), RequestOptions::get())
            .await?
            .into_json()
    }

    pub async fn list_users(&self) -> ClientResult<Vec<User>> {
        self.client
            .send(&self.url("/users"), RequestOptions::get())
            .await?
            .into_json()
    }

    /// Looks a user up by identity subject
    ///
    /// 404 is an answer here, not an error: it yields `Ok(None)`.
    pub async fn find_user(&self, subject_id: &str) -> ClientResult<Option<User>> {
        let response = self
            .client
            .send(&self.user_url(subject_id)?, RequestOptions::get())
            .await?;

        match response.status {
            StatusCode::OK => response.json().map(Some),
            StatusCode::NOT_FOUND => Ok(None),
            _ => Err(ClientError::from_response(&response)),
        }
    }

    pub async fn create_user(&self, user: &CreateUser) -> ClientResult<User> {
        self.client
            .send(&self.url("/users"), RequestOptions::post(serde_json::to_value(user)?))
            .await?
            .into_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::StaticIdentityProvider;
    use crate::testing::{json_response, session, user_json, MockTransport};
    use reqwest::Method;
    use std::sync::Arc;

    fn api(transport: Arc<MockTransport>) -> TaskboardApi {
        let identity = StaticIdentityProvider::new(session("sub-1", "ana", Some("tok")));
        TaskboardApi::new(
            AuthenticatedClient::new(Arc::new(identity), transport),
            "http://localhost:3001/",
        )
    }

    #[tokio::test]
    async fn test_list_projects_decodes() {
        let transport = Arc::new(MockTransport::always(
            200,
            json!([{
                "id": 1,
                "name": "Apollo",
                "description": null,
                "startDate": "2024-01-01T00:00:00Z",
                "endDate": null
            }]),
        ));

        let projects = api(transport.clone()).list_projects().await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "Apollo");
        assert_eq!(transport.requests()[0].url, "http://localhost:3001/projects");
    }

    #[tokio::test]
    async fn test_server_error_carries_message() {
        let transport = Arc::new(MockTransport::always(
            500,
            json!({ "error": "server_error", "message": "Error retrieving teams: down" }),
        ));

        match api(transport).list_teams().await {
            Err(ClientError::Server { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Error retrieving teams: down");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_task_status_request() {
        let transport = Arc::new(MockTransport::new(|_| {
            json_response(
                200,
                json!({
                    "id": 3, "title": "T", "description": null, "status": "Completed",
                    "priority": "Low", "tags": null, "startDate": null, "dueDate": null,
                    "points": null, "projectId": 1, "authorUserId": 1, "assignedUserId": null
                }),
            )
        }));

        let task = api(transport.clone())
            .update_task_status(3, TaskStatus::Completed)
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::Completed);

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::PATCH);
        assert_eq!(sent.url, "http://localhost:3001/tasks/3/status");
        assert_eq!(sent.body, Some(json!({ "status": "Completed" })));
    }

    #[tokio::test]
    async fn test_find_user_statuses() {
        let transport = Arc::new(MockTransport::new(|req| {
            if req.url.ends_with("/users/known") {
                json_response(200, user_json(1, "known", "ana"))
            } else if req.url.ends_with("/users/missing") {
                json_response(404, json!({ "error": "not_found", "message": "User not found" }))
            } else {
                json_response(503, json!({ "error": "x", "message": "maintenance" }))
            }
        }));
        let api = api(transport);

        assert_eq!(api.find_user("known").await.unwrap().unwrap().user_id, 1);
        assert!(api.find_user("missing").await.unwrap().is_none());
        assert_eq!(api.find_user("other").await.unwrap_err().status(), Some(503));
    }

    #[tokio::test]
    async fn test_find_user_encodes_subject() {
        let transport = Arc::new(MockTransport::always(
            404,
            json!({ "error": "not_found", "message": "User not found" }),
        ));
        let api = api(transport.clone());

        assert!(api.find_user("a/b?c#d").await.unwrap().is_none());
        assert_eq!(
            transport.requests()[0].url,
            "http://localhost:3001/users/a%2Fb%3Fc%23d"
        );
    }

    #[tokio::test]
    async fn test_list_tasks_query() {
        let transport = Arc::new(MockTransport::always(200, json!([])));
        let tasks = api(transport.clone()).list_tasks(7).await.unwrap();

        assert!(tasks.is_empty());
        assert_eq!(transport.requests()[0].url, "http://localhost:3001/tasks?projectId=7");
    }
}
