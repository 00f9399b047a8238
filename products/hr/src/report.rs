//! Console reports: the closing summary and the dry-run plan.

use std::collections::HashMap;
use std::fmt;

use entity::{Department, Employee, Role, SalaryGrade};
use platform_client::PersonnelApi;
use rust_decimal::Decimal;
use tracing::warn;

use crate::catalog::{DEPARTMENTS, EMPLOYEE_TARGET, SALARY_GRADES};

const RULE_WIDTH: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepartmentLine {
    pub name: String,
    pub head: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GradeLine {
    pub code: String,
    pub base_salary: Decimal,
    pub description: String,
}

/// Final state of the API as listed after seeding. A section is `None`
/// when its listing could not be fetched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    pub departments: Option<Vec<DepartmentLine>>,
    pub employees: Option<usize>,
    pub role_counts: Vec<(Role, usize)>,
    pub grades: Option<Vec<GradeLine>>,
}

impl Summary {
    pub async fn collect<A: PersonnelApi + ?Sized>(api: &A) -> Self {
        let departments = api
            .departments()
            .await
            .map_err(|err| warn!(error = %err, "failed to list departments for summary"))
            .ok();
        let employees = api
            .employees()
            .await
            .map_err(|err| warn!(error = %err, "failed to list employees for summary"))
            .ok();
        let grades = api
            .salary_grades()
            .await
            .map_err(|err| warn!(error = %err, "failed to list salary grades for summary"))
            .ok();
        Self::from_listings(departments.as_deref(), employees.as_deref(), grades.as_deref())
    }

    pub fn from_listings(
        departments: Option<&[Department]>,
        employees: Option<&[Employee]>,
        grades: Option<&[SalaryGrade]>,
    ) -> Self {
        let departments = departments.map(|departments| {
            departments
                .iter()
                .map(|department| DepartmentLine {
                    name: department.name.clone(),
                    head: department.head_id.and_then(|head_id| {
                        employees?
                            .iter()
                            .find(|employee| employee.id == head_id)
                            .map(Employee::full_name)
                    }),
                })
                .collect()
        });

        let role_counts = employees.map(count_roles).unwrap_or_default();

        let grades = grades.map(|grades| {
            grades
                .iter()
                .map(|grade| GradeLine {
                    code: grade.code.clone(),
                    base_salary: grade.base_salary,
                    description: grade.description.clone(),
                })
                .collect()
        });

        Self {
            departments,
            employees: employees.map(<[Employee]>::len),
            role_counts,
            grades,
        }
    }

    pub fn role_count(&self, role: Role) -> usize {
        self.role_counts
            .iter()
            .find(|(counted, _)| *counted == role)
            .map_or(0, |(_, count)| *count)
    }
}

/// Most common role first; ties keep the API's role order.
fn count_roles(employees: &[Employee]) -> Vec<(Role, usize)> {
    let mut counts: HashMap<Role, usize> = HashMap::new();
    for employee in employees {
        *counts.entry(employee.role).or_default() += 1;
    }
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    counts
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "DATABASE POPULATION COMPLETE")?;
        writeln!(f, "{rule}")?;

        if let Some(departments) = &self.departments {
            writeln!(f, "\nDepartments: {}", departments.len())?;
            for line in departments {
                match &line.head {
                    Some(head) => writeln!(f, "   • {} (Head: {head})", line.name)?,
                    None => writeln!(f, "   • {}", line.name)?,
                }
            }
        }

        if let Some(total) = self.employees {
            writeln!(f, "\nEmployees: {total}")?;
            writeln!(f, "   By role:")?;
            for (role, count) in &self.role_counts {
                writeln!(f, "   • {role}: {count}")?;
            }
        }

        if let Some(grades) = &self.grades {
            writeln!(f, "\nSalary Grades: {}", grades.len())?;
            for grade in grades {
                writeln!(
                    f,
                    "   • {}: {} - {}",
                    grade.code,
                    format_money(grade.base_salary),
                    grade.description
                )?;
            }
        }

        writeln!(f, "\n{rule}")
    }
}

/// What a run would create, printed instead of calling the API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DryRunPlan {
    pub departments: Vec<&'static str>,
    pub grade_codes: Vec<&'static str>,
    pub employees: usize,
}

impl Default for DryRunPlan {
    fn default() -> Self {
        Self {
            departments: DEPARTMENTS.to_vec(),
            grade_codes: SALARY_GRADES.iter().map(|grade| grade.code).collect(),
            employees: EMPLOYEE_TARGET,
        }
    }
}

impl fmt::Display for DryRunPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DRY RUN MODE - No changes will be made")?;
        writeln!(f, "\nWould create:")?;
        writeln!(f, "  • {} departments", self.departments.len())?;
        writeln!(f, "  • {} salary grades", self.grade_codes.len())?;
        writeln!(f, "  • {} employees", self.employees)?;
        writeln!(f, "\nDepartments: {}", self.departments.join(", "))?;
        writeln!(f, "\nSalary Grades: {}", self.grade_codes.join(", "))
    }
}

/// `$1,234.50` style amount.
pub fn format_money(amount: Decimal) -> String {
    let fixed = format!("{:.2}", amount.round_dp(2));
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (whole, cents) = digits.split_once('.').unwrap_or((digits, "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}${grouped}.{cents}")
}
