use std::ops::RangeInclusive;

use chrono::{Duration, NaiveDate};
use entity::{Role, SalaryGrade};
use rand::{Rng, seq::SliceRandom};
use uuid::Uuid;

const YEAR: i64 = 365;

/// Seniority bucket used while generating employees. It only picks the
/// role, the salary grade and the hire date; the API never sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    Executive,
    Director,
    Senior,
    Mid,
    Entry,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::Executive,
        Tier::Director,
        Tier::Senior,
        Tier::Mid,
        Tier::Entry,
    ];

    pub fn role(self) -> Role {
        match self {
            Tier::Executive => Role::Admin,
            Tier::Director => Role::DepartmentHead,
            Tier::Senior => Role::DeputyHead,
            Tier::Mid | Tier::Entry => Role::Employee,
        }
    }

    pub fn grade_codes(self) -> &'static [&'static str] {
        match self {
            Tier::Executive => &["X1", "D2"],
            Tier::Director => &["D1", "D2"],
            Tier::Senior => &["S1", "S2"],
            Tier::Mid => &["M1", "M2", "M3"],
            Tier::Entry => &["E1", "E2"],
        }
    }

    /// Days between the hire date and today.
    pub fn tenure_days(self) -> RangeInclusive<i64> {
        match self {
            Tier::Executive => 5 * YEAR..=15 * YEAR,
            Tier::Director => 4 * YEAR..=12 * YEAR,
            Tier::Senior => 3 * YEAR..=8 * YEAR,
            Tier::Mid => YEAR..=5 * YEAR,
            Tier::Entry => 30..=2 * YEAR,
        }
    }

    pub fn hire_date<R: Rng + ?Sized>(self, today: NaiveDate, rng: &mut R) -> NaiveDate {
        today - Duration::days(rng.gen_range(self.tenure_days()))
    }

    /// Random grade among the server's grades matching this tier, falling
    /// back to the first known grade.
    pub fn pick_grade<R: Rng + ?Sized>(self, grades: &[SalaryGrade], rng: &mut R) -> Option<Uuid> {
        let codes = self.grade_codes();
        let matching: Vec<Uuid> = grades
            .iter()
            .filter(|grade| codes.contains(&grade.code.as_str()))
            .map(|grade| grade.id)
            .collect();
        matching
            .choose(rng)
            .copied()
            .or_else(|| grades.first().map(|grade| grade.id))
    }
}
