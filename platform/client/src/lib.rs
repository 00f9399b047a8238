//! Client for the personnel REST API.
//!
//! The seeder only ever talks to the API through [`PersonnelApi`], which keeps
//! the HTTP details here and lets tests substitute an in-memory backend.

mod error;

use std::time::Duration;

use async_trait::async_trait;
use entity::{
    Department, DepartmentHead, Employee, NewDepartment, NewEmployee, NewSalaryGrade, SalaryGrade,
};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;
use uuid::Uuid;

pub use error::{ClientError, ClientResult};
pub use reqwest::StatusCode;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const HEALTH: &str = "/health";
const SALARY_GRADES: &str = "/api/salary-grades";
const DEPARTMENTS: &str = "/api/departments";
const EMPLOYEES: &str = "/api/employees";

/// Operations the seeder needs from the personnel API.
///
/// Creation calls do not return the stored record: identifiers are assigned
/// by the server and recovered by listing the collection afterwards.
#[async_trait]
pub trait PersonnelApi: Send + Sync {
    async fn health(&self) -> ClientResult<()>;

    async fn salary_grades(&self) -> ClientResult<Vec<SalaryGrade>>;
    async fn create_salary_grade(&self, grade: &NewSalaryGrade) -> ClientResult<()>;

    async fn departments(&self) -> ClientResult<Vec<Department>>;
    async fn create_department(&self, department: &NewDepartment) -> ClientResult<()>;
    async fn assign_department_head(
        &self,
        department_id: Uuid,
        head_id: Uuid,
    ) -> ClientResult<()>;

    async fn employees(&self) -> ClientResult<Vec<Employee>>;
    async fn create_employee(&self, employee: &NewEmployee) -> ClientResult<()>;
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|err| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self {
            http,
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(&self, request: RequestBuilder, path: &str) -> ClientResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                path: path.to_string(),
                source,
            })?;
        let status = response.status();
        debug!(%status, path, "personnel api responded");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::rejected(path, status, &body))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.execute(self.http.get(self.url(path)), path).await?;
        let body = response
            .bytes()
            .await
            .map_err(|source| ClientError::Transport {
                path: path.to_string(),
                source,
            })?;
        serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
            path: path.to_string(),
            source,
        })
    }

    async fn send_json<B>(&self, method: Method, path: &str, body: &B) -> ClientResult<()>
    where
        B: Serialize + Sync + ?Sized,
    {
        let request = self.http.request(method, self.url(path)).json(body);
        self.execute(request, path).await.map(|_| ())
    }
}

#[async_trait]
impl PersonnelApi for ApiClient {
    async fn health(&self) -> ClientResult<()> {
        self.execute(self.http.get(self.url(HEALTH)), HEALTH)
            .await
            .map(|_| ())
    }

    async fn salary_grades(&self) -> ClientResult<Vec<SalaryGrade>> {
        self.get_json(SALARY_GRADES).await
    }

    async fn create_salary_grade(&self, grade: &NewSalaryGrade) -> ClientResult<()> {
        self.send_json(Method::POST, SALARY_GRADES, grade).await
    }

    async fn departments(&self) -> ClientResult<Vec<Department>> {
        self.get_json(DEPARTMENTS).await
    }

    async fn create_department(&self, department: &NewDepartment) -> ClientResult<()> {
        self.send_json(Method::POST, DEPARTMENTS, department).await
    }

    async fn assign_department_head(
        &self,
        department_id: Uuid,
        head_id: Uuid,
    ) -> ClientResult<()> {
        let path = format!("{DEPARTMENTS}/{department_id}");
        self.send_json(Method::PUT, &path, &DepartmentHead { head_id })
            .await
    }

    async fn employees(&self) -> ClientResult<Vec<Employee>> {
        self.get_json(EMPLOYEES).await
    }

    async fn create_employee(&self, employee: &NewEmployee) -> ClientResult<()> {
        self.send_json(Method::POST, EMPLOYEES, employee).await
    }
}
