use std::collections::HashSet;
use std::fmt;

use rand::Rng;

use crate::catalog::{EMAIL_DOMAIN, FIRST_NAMES, LAST_NAMES};

/// Draws before a numeric suffix is appended to the last name.
const NAME_DRAWS: usize = 100;
/// Random email suffixes tried before counting upwards from 1000.
const EMAIL_DRAWS: usize = 32;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonName {
    pub first: String,
    pub last: String,
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first, self.last)
    }
}

/// Names and emails handed out during one run.
///
/// Full names are unique on a best-effort basis; emails are unique within
/// the run and against every email reserved from the API listings.
#[derive(Debug, Default)]
pub struct NameRegistry {
    names: HashSet<String>,
    emails: HashSet<String>,
}

impl NameRegistry {
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> PersonName {
        for _ in 0..NAME_DRAWS {
            let name = PersonName {
                first: pick(&FIRST_NAMES, rng).to_string(),
                last: pick(&LAST_NAMES, rng).to_string(),
            };
            if self.names.insert(name.to_string()) {
                return name;
            }
        }
        let name = PersonName {
            first: pick(&FIRST_NAMES, rng).to_string(),
            last: format!("{}{}", pick(&LAST_NAMES, rng), rng.gen_range(1..=99)),
        };
        self.names.insert(name.to_string());
        name
    }

    pub fn email_for<R: Rng + ?Sized>(&mut self, name: &PersonName, rng: &mut R) -> String {
        let local = format!(
            "{}.{}",
            name.first.to_lowercase(),
            name.last.to_lowercase()
        );
        for _ in 0..EMAIL_DRAWS {
            let candidate = format!("{local}{}@{EMAIL_DOMAIN}", rng.gen_range(1..=999));
            if self.emails.insert(candidate.clone()) {
                return candidate;
            }
        }
        (1000..)
            .map(|suffix| format!("{local}{suffix}@{EMAIL_DOMAIN}"))
            .find(|candidate| self.emails.insert(candidate.clone()))
            .unwrap_or_else(|| format!("{local}@{EMAIL_DOMAIN}"))
    }

    /// Marks emails already stored by the API as taken.
    pub fn reserve_emails<'a>(&mut self, emails: impl IntoIterator<Item = &'a str>) {
        self.emails
            .extend(emails.into_iter().map(|email| email.to_lowercase()));
    }

    #[cfg(test)]
    fn issued_names(&self) -> usize {
        self.names.len()
    }
}

fn pick<R: Rng + ?Sized>(pool: &[&'static str], rng: &mut R) -> &'static str {
    pool[rng.gen_range(0..pool.len())]
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn drawn_names_do_not_repeat() {
        let mut registry = NameRegistry::default();
        let mut rng = StdRng::seed_from_u64(42);
        let names: HashSet<String> = (0..500)
            .map(|_| registry.draw(&mut rng).to_string())
            .collect();
        assert!(names.len() >= 499);
        assert_eq!(registry.issued_names(), names.len());
    }

    #[test]
    fn exhausted_name_pool_falls_back_to_numbered_last_name() {
        let mut registry = NameRegistry::default();
        for first in FIRST_NAMES {
            for last in LAST_NAMES {
                registry.names.insert(format!("{first} {last}"));
            }
        }
        let mut rng = StdRng::seed_from_u64(3);
        let name = registry.draw(&mut rng);

        let stem = name.last.trim_end_matches(|c: char| c.is_ascii_digit());
        let suffix: u32 = name.last[stem.len()..].parse().unwrap();
        assert!((1..=99).contains(&suffix), "{name}");
        assert!(LAST_NAMES.contains(&stem), "{name}");
        assert!(FIRST_NAMES.contains(&name.first.as_str()));
        assert_eq!(registry.issued_names(), FIRST_NAMES.len() * LAST_NAMES.len() + 1);
    }

    #[test]
    fn emails_are_lowercase_and_unique_for_one_name() {
        let mut registry = NameRegistry::default();
        let mut rng = StdRng::seed_from_u64(1);
        let name = PersonName {
            first: "Mary".into(),
            last: "Smith".into(),
        };
        let emails: HashSet<String> = (0..2_000)
            .map(|_| registry.email_for(&name, &mut rng))
            .collect();
        assert_eq!(emails.len(), 2_000);
        assert!(emails.iter().all(|email| {
            email.starts_with("mary.smith") && email.ends_with("@company.com")
        }));
    }

    #[test]
    fn reserved_emails_are_not_issued() {
        let mut registry = NameRegistry::default();
        let reserved: Vec<String> = (1..=999)
            .map(|n| format!("john.lee{n}@company.com"))
            .collect();
        registry.reserve_emails(reserved.iter().map(String::as_str));
        let mut rng = StdRng::seed_from_u64(9);
        let name = PersonName {
            first: "John".into(),
            last: "Lee".into(),
        };
        assert_eq!(
            registry.email_for(&name, &mut rng),
            "john.lee1000@company.com"
        );
    }
}
