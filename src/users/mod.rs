//! User records: the data model, the store, the list filter and the HTTP
//! handlers that tie them together.

use serde::{Deserialize, Serialize};

use crate::middleware::Role;

pub mod filter;
mod handlers;
pub mod store;

pub use filter::{ListQuery, SortKey};
pub use handlers::routes;
pub use store::{MemoryStore, SharedStore, UserStore};

/// A single user record.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub age: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// A partial update. Present fields overwrite, absent fields are kept.
///
/// There is no `id`: ids never change after creation, and an `id` key in a
/// PATCH body is ignored.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub city: Option<String>,
    pub age: Option<i64>,
    pub role: Option<Role>,
}

impl User {
    /// Shallow merge of `patch` over `self`.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(city) = patch.city {
            self.city = city;
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(role) = patch.role {
            self.role = Some(role);
        }
    }
}

/// The five records the service starts with.
pub fn seed() -> Vec<User> {
    let user = |id, name: &str, city: &str, age, role| User {
        id,
        name: name.to_owned(),
        city: city.to_owned(),
        age,
        role: Some(role),
    };
    vec![
        user(1, "John Doe", "New York", 30, Role::Admin),
        user(2, "Abebe Kebede", "Addis Ababa", 25, Role::User),
        user(3, "Kim Ung", "Seoul", 35, Role::User),
        user(4, "Jane Smith", "New York", 28, Role::User),
        user(5, "Tadesse Lemma", "Addis Ababa", 40, Role::User),
    ]
}

/// Lenient integer parse: leading whitespace, an optional sign, then as many
/// ASCII digits as follow. `"30abc"` is 30, `"abc"` and `""` are `None`.
/// A digit run too long for `i64` saturates to `i64::MAX` / `i64::MIN`.
pub(crate) fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(['-', '+']));
    let digits = s[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let saturated = if s.starts_with('-') { i64::MIN } else { i64::MAX };
    // Only the digits and sign are parsed, so the sole failure is overflow.
    Some(s[..sign_len + digits].parse().unwrap_or(saturated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_keeps_fields_it_does_not_name() {
        let mut user = User {
            id: 2,
            name: "X".into(),
            city: "Y".into(),
            age: 25,
            role: Some(Role::User),
        };
        let patch: UserPatch = serde_json::from_str(r#"{"age":26}"#).unwrap();
        user.apply(patch);

        assert_eq!(user, User { id: 2, name: "X".into(), city: "Y".into(), age: 26, role: Some(Role::User) });
    }

    #[test]
    fn patch_ignores_id() {
        let mut user = seed().remove(0);
        let patch: UserPatch = serde_json::from_str(r#"{"id":77,"city":"Paris"}"#).unwrap();
        user.apply(patch);
        assert_eq!(user.id, 1);
        assert_eq!(user.city, "Paris");
    }

    #[test]
    fn role_is_optional_on_the_wire() {
        let user: User = serde_json::from_str(r#"{"id":6,"name":"Z","city":"X","age":20}"#).unwrap();
        assert_eq!(user.role, None);
        assert_eq!(serde_json::to_string(&user).unwrap(), r#"{"id":6,"name":"Z","city":"X","age":20}"#);
    }

    #[test]
    fn record_requires_every_field_but_role() {
        assert!(serde_json::from_str::<User>(r#"{"id":6,"name":"Z","age":20}"#).is_err());
    }

    #[test]
    fn parse_int_takes_the_leading_integer() {
        assert_eq!(parse_int("30"), Some(30));
        assert_eq!(parse_int("  25"), Some(25));
        assert_eq!(parse_int("30abc"), Some(30));
        assert_eq!(parse_int("-4"), Some(-4));
        assert_eq!(parse_int("+7"), Some(7));
        assert_eq!(parse_int("12.9"), Some(12));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("-"), None);
    }

    #[test]
    fn parse_int_saturates_on_overflow() {
        assert_eq!(parse_int("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_int("-99999999999999999999x"), Some(i64::MIN));
        assert_eq!(parse_int("9223372036854775807"), Some(i64::MAX));
    }
}
