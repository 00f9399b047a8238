//! In-process double of the personnel REST API.
//!
//! Enforces the constraints the real service has (unique names, codes and
//! emails, existing references) so seeding tests fail when the seeder sends
//! ids it has not learned from a listing.

use std::{
    net::SocketAddr,
    sync::{
        Arc, Mutex, MutexGuard,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, put},
};
use entity::{
    Department, DepartmentHead, Employee, NewDepartment, NewEmployee, NewSalaryGrade, SalaryGrade,
};
use tokio::{net::TcpListener, task::JoinHandle};
use uuid::Uuid;

type Rejection = (StatusCode, String);
type ApiResult<T> = Result<(StatusCode, Json<T>), Rejection>;

/// Records held by the double, in creation order.
#[derive(Clone, Debug, Default)]
pub struct Store {
    pub salary_grades: Vec<SalaryGrade>,
    pub departments: Vec<Department>,
    pub employees: Vec<Employee>,
}

#[derive(Clone, Debug, Default)]
pub struct MockBehavior {
    /// `/health` answers 503.
    pub unhealthy: bool,
    /// Number of employee creations rejected with 500 before accepting any.
    pub failing_employee_creates: usize,
}

struct Shared {
    store: Mutex<Store>,
    requests: AtomicUsize,
    writes: AtomicUsize,
    unhealthy: bool,
    failing_employee_creates: AtomicUsize,
}

impl Shared {
    fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

type MockState = Arc<Shared>;

pub struct MockApi {
    addr: SocketAddr,
    shared: MockState,
    server: JoinHandle<()>,
}

impl MockApi {
    pub async fn start() -> Self {
        Self::start_with(MockBehavior::default()).await
    }

    pub async fn start_with(behavior: MockBehavior) -> Self {
        let shared = Arc::new(Shared {
            store: Mutex::new(Store::default()),
            requests: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
            unhealthy: behavior.unhealthy,
            failing_employee_creates: AtomicUsize::new(behavior.failing_employee_creates),
        });
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock api");
        let addr = listener.local_addr().expect("mock api address");
        let router = build_router(shared.clone());
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        Self {
            addr,
            shared,
            server,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Every request received, reads included.
    pub fn requests(&self) -> usize {
        self.shared.requests.load(Ordering::SeqCst)
    }

    /// POST and PUT requests received, accepted or not.
    pub fn writes(&self) -> usize {
        self.shared.writes.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Store {
        self.shared.store().clone()
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn build_router(state: MockState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/salary-grades",
            get(list_salary_grades).post(create_salary_grade),
        )
        .route(
            "/api/departments",
            get(list_departments).post(create_department),
        )
        .route("/api/departments/{id}", put(update_department))
        .route("/api/employees", get(list_employees).post(create_employee))
        .layer(middleware::from_fn_with_state(state.clone(), count_requests))
        .with_state(state)
}

async fn count_requests(State(state): State<MockState>, request: Request, next: Next) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    if request.method() != axum::http::Method::GET {
        state.writes.fetch_add(1, Ordering::SeqCst);
    }
    next.run(request).await
}

async fn health_handler(State(state): State<MockState>) -> StatusCode {
    if state.unhealthy {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}

async fn list_salary_grades(State(state): State<MockState>) -> Json<Vec<SalaryGrade>> {
    Json(state.store().salary_grades.clone())
}

async fn create_salary_grade(
    State(state): State<MockState>,
    Json(body): Json<NewSalaryGrade>,
) -> ApiResult<SalaryGrade> {
    let mut store = state.store();
    if store.salary_grades.iter().any(|g| g.code == body.code) {
        return Err(conflict(format!("grade {} exists", body.code)));
    }
    let grade = SalaryGrade {
        id: Uuid::new_v4(),
        code: body.code,
        base_salary: body.base_salary,
        description: body.description,
    };
    store.salary_grades.push(grade.clone());
    Ok((StatusCode::CREATED, Json(grade)))
}

async fn list_departments(State(state): State<MockState>) -> Json<Vec<Department>> {
    Json(state.store().departments.clone())
}

async fn create_department(
    State(state): State<MockState>,
    Json(body): Json<NewDepartment>,
) -> ApiResult<Department> {
    let mut store = state.store();
    if store.departments.iter().any(|d| d.name == body.name) {
        return Err(conflict(format!("department {} exists", body.name)));
    }
    let department = Department {
        id: Uuid::new_v4(),
        name: body.name,
        head_id: None,
    };
    store.departments.push(department.clone());
    Ok((StatusCode::CREATED, Json(department)))
}

async fn update_department(
    State(state): State<MockState>,
    Path(id): Path<Uuid>,
    Json(body): Json<DepartmentHead>,
) -> ApiResult<Department> {
    let mut store = state.store();
    if !store.employees.iter().any(|e| e.id == body.head_id) {
        return Err(unprocessable("unknown head_id"));
    }
    let department = store
        .departments
        .iter_mut()
        .find(|d| d.id == id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, "department not found".to_string()))?;
    department.head_id = Some(body.head_id);
    Ok((StatusCode::OK, Json(department.clone())))
}

async fn list_employees(State(state): State<MockState>) -> Json<Vec<Employee>> {
    Json(state.store().employees.clone())
}

async fn create_employee(
    State(state): State<MockState>,
    Json(body): Json<NewEmployee>,
) -> ApiResult<Employee> {
    let failing = state
        .failing_employee_creates
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1));
    if failing.is_ok() {
        return Err((StatusCode::INTERNAL_SERVER_ERROR, "injected failure".into()));
    }

    let mut store = state.store();
    if store.employees.iter().any(|e| e.email == body.email) {
        return Err(conflict(format!("email {} exists", body.email)));
    }
    if !store.departments.iter().any(|d| d.id == body.department_id) {
        return Err(unprocessable("unknown department_id"));
    }
    if let Some(manager) = body.manager_id {
        if !store.employees.iter().any(|e| e.id == manager) {
            return Err(unprocessable("unknown manager_id"));
        }
    }
    if let Some(grade) = body.salary_grade_id {
        if !store.salary_grades.iter().any(|g| g.id == grade) {
            return Err(unprocessable("unknown salary_grade_id"));
        }
    }
    let employee = Employee {
        id: Uuid::new_v4(),
        first_name: body.first_name,
        last_name: body.last_name,
        email: body.email,
        role: body.role,
        department_id: Some(body.department_id),
        manager_id: body.manager_id,
        salary_grade_id: body.salary_grade_id,
        hire_date: Some(body.hire_date),
    };
    store.employees.push(employee.clone());
    Ok((StatusCode::CREATED, Json(employee)))
}

fn conflict(message: String) -> Rejection {
    (StatusCode::CONFLICT, message)
}

fn unprocessable(message: &str) -> Rejection {
    (StatusCode::UNPROCESSABLE_ENTITY, message.to_string())
}
