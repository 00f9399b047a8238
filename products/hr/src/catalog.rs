//! Fixed reference data the seeder creates or draws from.

use entity::NewSalaryGrade;
use rust_decimal::Decimal;

/// Employees created by a full run.
pub const EMPLOYEE_TARGET: usize = 100;
/// Headcount at which the mid-level pass stops and entry level takes over.
pub const MID_LEVEL_TARGET: usize = 55;

pub const EMAIL_DOMAIN: &str = "company.com";

pub const DEPARTMENTS: [&str; 18] = [
    "Executive Office",
    "Human Resources",
    "Finance & Accounting",
    "Information Technology",
    "Software Engineering",
    "Product Management",
    "Quality Assurance",
    "Customer Support",
    "Sales",
    "Marketing",
    "Operations",
    "Research & Development",
    "Legal & Compliance",
    "Facilities Management",
    "Supply Chain",
    "Business Development",
    "Data Analytics",
    "Security",
];

/// Executive titles reporting to the top executive, with the department
/// name fragment each one is placed in.
pub const C_SUITE: [(&str, &str); 4] = [
    ("CFO", "Finance"),
    ("CTO", "Information Technology"),
    ("COO", "Operations"),
    ("CHRO", "Human Resources"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GradeSpec {
    pub code: &'static str,
    pub base_salary_cents: i64,
    pub description: &'static str,
}

impl GradeSpec {
    const fn new(code: &'static str, base_salary: i64, description: &'static str) -> Self {
        Self {
            code,
            base_salary_cents: base_salary * 100,
            description,
        }
    }

    pub fn base_salary(&self) -> Decimal {
        Decimal::new(self.base_salary_cents, 2)
    }

    pub fn to_new(&self) -> NewSalaryGrade {
        NewSalaryGrade {
            code: self.code.to_string(),
            base_salary: self.base_salary(),
            description: self.description.to_string(),
        }
    }
}

pub const SALARY_GRADES: [GradeSpec; 10] = [
    GradeSpec::new("E1", 35_000, "Entry Level - Junior Position"),
    GradeSpec::new("E2", 42_000, "Entry Level - Associate"),
    GradeSpec::new("M1", 52_000, "Mid Level - Specialist"),
    GradeSpec::new("M2", 62_000, "Mid Level - Senior Specialist"),
    GradeSpec::new("M3", 75_000, "Mid Level - Lead"),
    GradeSpec::new("S1", 90_000, "Senior Level - Manager"),
    GradeSpec::new("S2", 105_000, "Senior Level - Senior Manager"),
    GradeSpec::new("D1", 125_000, "Director Level"),
    GradeSpec::new("D2", 150_000, "Senior Director"),
    GradeSpec::new("X1", 200_000, "Executive Level - VP/C-Suite"),
];

pub const FIRST_NAMES: [&str; 50] = [
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Elizabeth", "David", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Christopher", "Lisa", "Daniel", "Nancy", "Matthew", "Betty", "Anthony",
    "Margaret", "Mark", "Sandra", "Donald", "Ashley", "Steven", "Kimberly", "Paul", "Emily",
    "Andrew", "Donna", "Joshua", "Michelle", "Kenneth", "Dorothy", "Kevin", "Carol", "Brian",
    "Amanda", "George", "Melissa", "Timothy", "Deborah",
];

pub const LAST_NAMES: [&str; 50] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright",
    "Scott", "Torres", "Nguyen", "Hill", "Flores", "Green", "Adams", "Nelson", "Baker", "Hall",
    "Rivera", "Campbell", "Mitchell", "Carter", "Roberts",
];
