use std::time::Duration;

use chrono::{Local, NaiveDate};
use entity::{Department, Employee, NewDepartment, NewEmployee, Role, SalaryGrade};
use platform_client::{ClientError, PersonnelApi};
use rand::{Rng, seq::SliceRandom};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    SeedError,
    catalog::{C_SUITE, DEPARTMENTS, EMPLOYEE_TARGET, MID_LEVEL_TARGET, SALARY_GRADES},
    names::NameRegistry,
    report::Summary,
    roster::Roster,
    tier::Tier,
};

/// Pacing and failure limits for a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedSettings {
    /// Pause after each successful grade or department creation.
    pub create_pause: Duration,
    /// Pause before each employee re-fetch.
    pub refresh_pause: Duration,
    /// Failed creations after which a fill pass gives up.
    pub max_failed_creates: usize,
}

impl Default for SeedSettings {
    fn default() -> Self {
        Self {
            create_pause: Duration::from_millis(100),
            refresh_pause: Duration::from_millis(200),
            max_failed_creates: 25,
        }
    }
}

impl SeedSettings {
    pub fn without_pauses(self) -> Self {
        Self {
            create_pause: Duration::ZERO,
            refresh_pause: Duration::ZERO,
            ..self
        }
    }
}

/// Drives the personnel API through one seeding run.
///
/// Every call is awaited before the next one is issued. Identifiers are
/// never taken from creation responses: each pass re-lists the collection
/// it just wrote to and rebuilds the local maps from that listing.
pub struct Seeder<A, R> {
    api: A,
    rng: R,
    settings: SeedSettings,
    today: NaiveDate,
    grades: Vec<SalaryGrade>,
    departments: Vec<Department>,
    names: NameRegistry,
    roster: Roster,
    top_executive: Option<Uuid>,
    created: usize,
    failed: usize,
}

impl<A: PersonnelApi, R: Rng> Seeder<A, R> {
    pub fn new(api: A, rng: R, settings: SeedSettings) -> Self {
        Self {
            api,
            rng,
            settings,
            today: Local::now().date_naive(),
            grades: Vec::new(),
            departments: Vec::new(),
            names: NameRegistry::default(),
            roster: Roster::default(),
            top_executive: None,
            created: 0,
            failed: 0,
        }
    }

    /// Date hire dates are counted back from.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn created_employees(&self) -> usize {
        self.created
    }

    pub fn failed_employees(&self) -> usize {
        self.failed
    }

    pub fn top_executive(&self) -> Option<Uuid> {
        self.top_executive
    }

    pub async fn run(&mut self) -> Result<Summary, SeedError> {
        self.probe_health().await.map_err(SeedError::Unhealthy)?;
        self.create_salary_grades().await;
        self.create_departments().await;
        self.create_employees().await;
        self.assign_department_heads().await;
        Ok(self.collect_summary().await)
    }

    pub async fn check_health(&self) -> bool {
        self.probe_health().await.is_ok()
    }

    async fn probe_health(&self) -> Result<(), ClientError> {
        match self.api.health().await {
            Ok(()) => {
                info!("API is healthy");
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "API is not available");
                Err(err)
            }
        }
    }

    #[instrument(name = "seed.salary_grades", skip_all)]
    pub async fn create_salary_grades(&mut self) {
        for grade in &SALARY_GRADES {
            match self.api.create_salary_grade(&grade.to_new()).await {
                Ok(()) => {
                    info!(code = grade.code, "created salary grade");
                    pause(self.settings.create_pause).await;
                }
                Err(err) => warn!(code = grade.code, error = %err, "failed to create salary grade"),
            }
        }

        match self.api.salary_grades().await {
            Ok(grades) => {
                info!(count = grades.len(), "retrieved salary grades");
                self.grades = grades;
            }
            Err(err) => warn!(error = %err, "failed to list salary grades"),
        }
    }

    #[instrument(name = "seed.departments", skip_all)]
    pub async fn create_departments(&mut self) {
        for name in DEPARTMENTS {
            let department = NewDepartment {
                name: name.to_string(),
            };
            match self.api.create_department(&department).await {
                Ok(()) => {
                    info!(department = name, "created department");
                    pause(self.settings.create_pause).await;
                }
                Err(err) => warn!(department = name, error = %err, "failed to create department"),
            }
        }

        match self.api.departments().await {
            Ok(departments) => {
                info!(count = departments.len(), "retrieved departments");
                self.departments = departments;
            }
            Err(err) => warn!(error = %err, "failed to list departments"),
        }
    }

    #[instrument(name = "seed.employees", skip_all)]
    pub async fn create_employees(&mut self) {
        let Some(executive_department) = self.executive_department() else {
            warn!("no departments available, skipping employees");
            return;
        };

        if let Some(existing) = self.fetch_employees().await {
            debug!(existing = existing.len(), "reserved emails already in use");
        }

        info!("creating executive leadership");
        let top = self
            .create_employee(Tier::Executive, executive_department, None, "CEO")
            .await;
        if let Some(employees) = self.fetch_employees().await {
            self.top_executive =
                Roster::find_top_executive(&employees, top.as_ref().map(|e| e.email.as_str()));
            self.roster = Roster::build(&employees, self.top_executive);
        }

        for (title, hint) in C_SUITE {
            let department = self.department_matching(hint).unwrap_or(executive_department);
            let manager = self
                .roster
                .manager_for(Tier::Executive, department, &mut self.rng);
            self.create_employee(Tier::Executive, department, manager, title)
                .await;
        }
        self.refresh_roster().await;

        let staffed = self.staffed_departments();

        info!("creating department heads");
        for (department, name) in &staffed {
            let manager = self
                .roster
                .manager_for(Tier::Director, *department, &mut self.rng);
            let title = format!("Director of {name}");
            self.create_employee(Tier::Director, *department, manager, &title)
                .await;
        }
        self.refresh_roster().await;

        info!("creating deputy heads");
        'departments: for (department, name) in &staffed {
            let deputies = self.rng.gen_range(1..=2);
            let manager = self
                .roster
                .manager_for(Tier::Senior, *department, &mut self.rng);
            let title = format!("Deputy of {name}");
            for _ in 0..deputies {
                if self.created >= EMPLOYEE_TARGET {
                    break 'departments;
                }
                self.create_employee(Tier::Senior, *department, manager, &title)
                    .await;
            }
        }
        self.refresh_roster().await;

        let department_ids: Vec<Uuid> = staffed.iter().map(|(id, _)| *id).collect();

        info!("creating mid-level employees");
        self.fill_tier(Tier::Mid, MID_LEVEL_TARGET, &department_ids).await;
        self.refresh_roster().await;

        info!("creating entry-level employees");
        self.fill_tier(Tier::Entry, EMPLOYEE_TARGET, &department_ids).await;

        info!(
            created = self.created,
            failed = self.failed,
            "employee creation finished"
        );
    }

    /// Adds employees of `tier` to random departments until `target`
    /// employees exist or the failure budget for this pass is spent.
    async fn fill_tier(&mut self, tier: Tier, target: usize, departments: &[Uuid]) {
        if departments.is_empty() {
            warn!(?tier, "no non-executive departments to staff");
            return;
        }
        let failed_before = self.failed;
        while self.created < target {
            if self.failed - failed_before >= self.settings.max_failed_creates {
                warn!(
                    ?tier,
                    created = self.created,
                    target,
                    "giving up on pass after repeated failures"
                );
                break;
            }
            let Some(&department) = departments.choose(&mut self.rng) else {
                break;
            };
            let manager = self.roster.manager_for(tier, department, &mut self.rng);
            self.create_employee(tier, department, manager, tier.role().as_str())
                .await;
        }
    }

    async fn create_employee(
        &mut self,
        tier: Tier,
        department_id: Uuid,
        manager_id: Option<Uuid>,
        title: &str,
    ) -> Option<NewEmployee> {
        let name = self.names.draw(&mut self.rng);
        let email = self.names.email_for(&name, &mut self.rng);
        let employee = NewEmployee {
            first_name: name.first.clone(),
            last_name: name.last.clone(),
            email,
            role: tier.role(),
            department_id,
            manager_id,
            salary_grade_id: tier.pick_grade(&self.grades, &mut self.rng),
            hire_date: tier.hire_date(self.today, &mut self.rng),
        };

        match self.api.create_employee(&employee).await {
            Ok(()) => {
                self.created += 1;
                info!(name = %name, title, "created employee");
                Some(employee)
            }
            Err(err) => {
                self.failed += 1;
                warn!(name = %name, title, error = %err, "failed to create employee");
                None
            }
        }
    }

    async fn fetch_employees(&mut self) -> Option<Vec<Employee>> {
        pause(self.settings.refresh_pause).await;
        match self.api.employees().await {
            Ok(employees) => {
                self.names
                    .reserve_emails(employees.iter().map(|employee| employee.email.as_str()));
                Some(employees)
            }
            Err(err) => {
                warn!(error = %err, "failed to list employees, keeping previous roster");
                None
            }
        }
    }

    async fn refresh_roster(&mut self) {
        if let Some(employees) = self.fetch_employees().await {
            self.roster = Roster::build(&employees, self.top_executive);
        }
    }

    fn executive_department(&self) -> Option<Uuid> {
        self.departments
            .iter()
            .find(|department| department.is_executive())
            .or_else(|| self.departments.first())
            .map(|department| department.id)
    }

    fn department_matching(&self, fragment: &str) -> Option<Uuid> {
        self.departments
            .iter()
            .find(|department| department.name.contains(fragment))
            .map(|department| department.id)
    }

    fn staffed_departments(&self) -> Vec<(Uuid, String)> {
        self.departments
            .iter()
            .filter(|department| !department.is_executive())
            .map(|department| (department.id, department.name.clone()))
            .collect()
    }

    /// Writes each department's head reference. Returns how many were set.
    #[instrument(name = "seed.department_heads", skip_all)]
    pub async fn assign_department_heads(&mut self) -> usize {
        let employees = match self.api.employees().await {
            Ok(employees) => employees,
            Err(err) => {
                warn!(error = %err, "failed to list employees, heads not assigned");
                return 0;
            }
        };
        let departments = match self.api.departments().await {
            Ok(departments) => departments,
            Err(err) => {
                warn!(error = %err, "failed to list departments, heads not assigned");
                return 0;
            }
        };

        let mut assigned = 0;
        for department in &departments {
            let Some(head) = head_for(department, &employees, self.top_executive) else {
                info!(department = %department.name, "no head found");
                continue;
            };
            match self
                .api
                .assign_department_head(department.id, head.id)
                .await
            {
                Ok(()) => {
                    assigned += 1;
                    info!(department = %department.name, head = %head.full_name(), "assigned head");
                }
                Err(err) => warn!(
                    department = %department.name,
                    error = %err,
                    "failed to assign head"
                ),
            }
        }
        self.departments = departments;
        assigned
    }

    pub async fn collect_summary(&self) -> Summary {
        Summary::collect(&self.api).await
    }
}

/// First department-head employee of `department`; the executive
/// department is headed by the top executive instead.
fn head_for<'a>(
    department: &Department,
    employees: &'a [Employee],
    top_executive: Option<Uuid>,
) -> Option<&'a Employee> {
    employees
        .iter()
        .find(|employee| {
            employee.role == Role::DepartmentHead && employee.department_id == Some(department.id)
        })
        .or_else(|| {
            let top = top_executive.filter(|_| department.is_executive())?;
            employees.iter().find(|employee| employee.id == top)
        })
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}
