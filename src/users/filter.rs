//! Query-driven filtering and sorting for `GET /api/users`.
//!
//! Filters run in a fixed order (city, minAge, maxAge) and then the optional
//! sort. Malformed numbers and unknown sort keys are ignored, never errors.
//! A parameter sent with an empty value (`?city=`) counts as absent.

use std::cmp::Ordering;

use super::{parse_int, User};
use crate::request::Request;

/// Sort order requested with `sort=`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortKey {
    Name,
    Age,
}

impl SortKey {
    /// `"name"` or `"age"`; anything else means "keep store order".
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(Self::Name),
            "age" => Some(Self::Age),
            _ => None,
        }
    }
}

/// The list parameters, kept as the raw strings the client sent.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ListQuery {
    pub city: Option<String>,
    pub min_age: Option<String>,
    pub max_age: Option<String>,
    pub sort: Option<String>,
}

impl ListQuery {
    pub fn from_request(req: &Request) -> Self {
        let get = |key| req.query(key).map(str::to_owned);
        Self {
            city: get("city"),
            min_age: get("minAge"),
            max_age: get("maxAge"),
            sort: get("sort"),
        }
    }

    /// Filters and orders `users`.
    pub fn apply(&self, mut users: Vec<User>) -> Vec<User> {
        if let Some(city) = self.city.as_deref().filter(|c| !c.is_empty()) {
            let city = city.to_lowercase();
            users.retain(|u| u.city.to_lowercase() == city);
        }
        if let Some(min) = self.min_age.as_deref().and_then(parse_int) {
            users.retain(|u| u.age >= min);
        }
        if let Some(max) = self.max_age.as_deref().and_then(parse_int) {
            users.retain(|u| u.age <= max);
        }

        match self.sort.as_deref().and_then(SortKey::parse) {
            Some(SortKey::Name) => users.sort_by(|a, b| collate(&a.name, &b.name)),
            Some(SortKey::Age) => users.sort_by_key(|u| u.age),
            None => {}
        }
        users
    }
}

/// Dictionary-style ordering: case-insensitive first, exact bytes to break ties.
fn collate(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::seed;

    fn query(pairs: &[(&str, &str)]) -> ListQuery {
        let mut q = ListQuery::default();
        for (k, v) in pairs {
            let v = Some((*v).to_owned());
            match *k {
                "city" => q.city = v,
                "minAge" => q.min_age = v,
                "maxAge" => q.max_age = v,
                "sort" => q.sort = v,
                _ => unreachable!(),
            }
        }
        q
    }

    fn ids(users: &[User]) -> Vec<i64> {
        users.iter().map(|u| u.id).collect()
    }

    #[test]
    fn no_parameters_returns_everything_in_order() {
        assert_eq!(ids(&ListQuery::default().apply(seed())), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn city_is_case_insensitive_and_exact() {
        assert_eq!(ids(&query(&[("city", "new york")]).apply(seed())), [1, 4]);
        assert_eq!(ids(&query(&[("city", "NEW YORK")]).apply(seed())), [1, 4]);
        assert!(query(&[("city", "New")]).apply(seed()).is_empty());
    }

    #[test]
    fn empty_city_is_ignored() {
        assert_eq!(ids(&query(&[("city", "")]).apply(seed())), [1, 2, 3, 4, 5]);
        assert_eq!(ids(&query(&[("city", ""), ("sort", "age")]).apply(seed())), [2, 4, 1, 3, 5]);
    }

    #[test]
    fn overflowing_age_bound_saturates() {
        assert!(query(&[("minAge", "99999999999999999999")]).apply(seed()).is_empty());
        assert_eq!(ids(&query(&[("maxAge", "99999999999999999999")]).apply(seed())), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn age_bounds_are_inclusive() {
        assert_eq!(ids(&query(&[("minAge", "28"), ("maxAge", "35")]).apply(seed())), [1, 3, 4]);
    }

    #[test]
    fn inverted_age_range_is_empty() {
        assert!(query(&[("minAge", "40"), ("maxAge", "20")]).apply(seed()).is_empty());
    }

    #[test]
    fn malformed_numbers_are_ignored() {
        assert_eq!(ids(&query(&[("minAge", "old"), ("maxAge", "")]).apply(seed())), [1, 2, 3, 4, 5]);
        assert_eq!(ids(&query(&[("maxAge", "30years")]).apply(seed())), [1, 2, 4]);
    }

    #[test]
    fn sort_by_name_and_age() {
        assert_eq!(ids(&query(&[("sort", "name")]).apply(seed())), [2, 4, 1, 3, 5]);
        assert_eq!(ids(&query(&[("sort", "age")]).apply(seed())), [2, 4, 1, 3, 5]);
    }

    #[test]
    fn unknown_sort_keeps_order() {
        assert_eq!(ids(&query(&[("sort", "city")]).apply(seed())), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn city_then_sort_by_age() {
        assert_eq!(ids(&query(&[("city", "Addis Ababa"), ("sort", "age")]).apply(seed())), [2, 5]);
    }

    #[test]
    fn empty_collection_is_empty_result() {
        assert!(query(&[("city", "Seoul"), ("sort", "name")]).apply(Vec::new()).is_empty());
    }

    #[test]
    fn collation_ignores_case_first() {
        assert_eq!(collate("abebe", "Bob"), Ordering::Less);
        assert_eq!(collate("Zed", "alice"), Ordering::Greater);
        assert_eq!(collate("ann", "Ann"), Ordering::Greater);
        assert_eq!(collate("Ann", "Anna"), Ordering::Less);
    }
}
