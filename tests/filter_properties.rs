use proptest::prelude::*;

use roster::middleware::Role;
use roster::users::{ListQuery, User};

fn user_strategy() -> impl Strategy<Value = User> {
    (
        0i64..20,
        "[A-Za-z][a-z]{0,6}",
        prop::sample::select(vec!["New York", "new york", "Seoul", "SEOUL", "Addis Ababa"]),
        0i64..100,
        prop::option::of(prop_oneof![Just(Role::Admin), Just(Role::User)]),
    )
        .prop_map(|(id, name, city, age, role)| User {
            id,
            name,
            city: city.to_owned(),
            age,
            role,
        })
}

fn users_strategy() -> impl Strategy<Value = Vec<User>> {
    prop::collection::vec(user_strategy(), 0..24)
}

fn sorted_by(key: &str) -> ListQuery {
    ListQuery { sort: Some(key.to_owned()), ..ListQuery::default() }
}

proptest! {
    #[test]
    fn city_match_ignores_case(users in users_strategy(), city in "[A-Za-z ]{0,12}") {
        let lower = ListQuery { city: Some(city.to_lowercase()), ..ListQuery::default() };
        let upper = ListQuery { city: Some(city.to_uppercase()), ..ListQuery::default() };
        prop_assert_eq!(lower.apply(users.clone()), upper.apply(users));
    }

    #[test]
    fn inverted_age_range_is_always_empty(users in users_strategy(), a in 0i64..100, b in 0i64..100) {
        prop_assume!(a > b);
        let q = ListQuery {
            min_age: Some(a.to_string()),
            max_age: Some(b.to_string()),
            ..ListQuery::default()
        };
        prop_assert!(q.apply(users).is_empty());
    }

    #[test]
    fn sort_by_name_is_idempotent(users in users_strategy()) {
        let q = sorted_by("name");
        let once = q.apply(users);
        let twice = q.apply(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn sort_by_age_is_stable_and_ascending(users in users_strategy()) {
        let sorted = sorted_by("age").apply(users.clone());
        prop_assert_eq!(sorted.len(), users.len());
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].age <= pair[1].age);
        }

        // Equal ages keep their input order.
        let mut expected = users;
        expected.sort_by_key(|u| u.age);
        prop_assert_eq!(sorted, expected);
    }

    #[test]
    fn filters_keep_input_order(users in users_strategy(), min in 0i64..100) {
        let q = ListQuery { min_age: Some(min.to_string()), ..ListQuery::default() };
        let expected: Vec<User> = users.iter().filter(|u| u.age >= min).cloned().collect();
        prop_assert_eq!(q.apply(users), expected);
    }

    #[test]
    fn unknown_sort_is_identity(users in users_strategy(), key in "[a-z]{1,6}") {
        prop_assume!(key != "name" && key != "age");
        prop_assert_eq!(sorted_by(&key).apply(users.clone()), users);
    }
}
