//! Records exchanged with the personnel REST API.

pub mod departments;
pub mod employees;
pub mod salary_grades;

pub use departments::{Department, DepartmentHead, NewDepartment};
pub use employees::{Employee, NewEmployee, Role};
pub use salary_grades::{NewSalaryGrade, SalaryGrade};
