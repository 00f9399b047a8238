use std::collections::HashMap;

use entity::{Employee, Role};
use rand::{Rng, seq::SliceRandom};
use uuid::Uuid;

use crate::tier::Tier;

/// Reporting lines known from the latest employee listing, keyed by
/// department id. Rebuilt from scratch after every creation pass.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    top_executive: Option<Uuid>,
    executives: Vec<Uuid>,
    directors: HashMap<Uuid, Uuid>,
    deputies: HashMap<Uuid, Vec<Uuid>>,
    contributors: HashMap<Uuid, Vec<Uuid>>,
}

impl Roster {
    pub fn build(employees: &[Employee], top_executive: Option<Uuid>) -> Self {
        let mut roster = Roster {
            top_executive,
            ..Roster::default()
        };
        for employee in employees {
            match (employee.role, employee.department_id) {
                (Role::Admin, _) => {
                    if Some(employee.id) != top_executive {
                        roster.executives.push(employee.id);
                    }
                }
                (Role::DepartmentHead, Some(department)) => {
                    roster.directors.entry(department).or_insert(employee.id);
                }
                (Role::DeputyHead, Some(department)) => {
                    roster.deputies.entry(department).or_default().push(employee.id);
                }
                (Role::Employee, Some(department)) => {
                    roster
                        .contributors
                        .entry(department)
                        .or_default()
                        .push(employee.id);
                }
                _ => {}
            }
        }
        roster
    }

    /// The top executive is the one whose email was just submitted; when
    /// that record is missing the most recently listed admin stands in.
    pub fn find_top_executive(employees: &[Employee], email: Option<&str>) -> Option<Uuid> {
        email
            .and_then(|email| {
                employees
                    .iter()
                    .find(|employee| employee.email.eq_ignore_ascii_case(email))
            })
            .or_else(|| {
                employees
                    .iter()
                    .rev()
                    .find(|employee| employee.role == Role::Admin)
            })
            .map(|employee| employee.id)
    }

    pub fn director_of(&self, department: Uuid) -> Option<Uuid> {
        self.directors.get(&department).copied()
    }

    /// Manager for a new employee of `tier` in `department`.
    ///
    /// Candidates are drawn uniformly from the tier above; an empty pool
    /// falls back to the department's director and then to nobody.
    pub fn manager_for<R: Rng + ?Sized>(
        &self,
        tier: Tier,
        department: Uuid,
        rng: &mut R,
    ) -> Option<Uuid> {
        match tier {
            Tier::Executive => self.top_executive,
            Tier::Director => self.executives.choose(rng).copied().or(self.top_executive),
            Tier::Senior => self.director_of(department).or(self.top_executive),
            Tier::Mid => pick(self.deputies.get(&department), rng)
                .or_else(|| self.director_of(department)),
            Tier::Entry => {
                let mut candidates: Vec<Uuid> = self
                    .contributors
                    .get(&department)
                    .cloned()
                    .unwrap_or_default();
                if let Some(deputies) = self.deputies.get(&department) {
                    candidates.extend(deputies);
                }
                candidates
                    .choose(rng)
                    .copied()
                    .or_else(|| self.director_of(department))
            }
        }
    }
}

fn pick<R: Rng + ?Sized>(pool: Option<&Vec<Uuid>>, rng: &mut R) -> Option<Uuid> {
    pool.and_then(|ids| ids.choose(rng).copied())
}
