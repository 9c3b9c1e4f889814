//! Strongly-typed script name.

use crate::newtype_string::define_newtype_string;

define_newtype_string! {
    /// Name of a candidate script, unique within one upgrade run.
    ///
    /// The name is half of the fingerprint input and the key a journal record
    /// is looked up by, so it may never be empty.
    pub struct ScriptName;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_rejects_empty() {
        assert!(ScriptName::try_new("").is_none());
        assert_eq!(ScriptName::try_new("0001_init").unwrap(), "0001_init");
    }

    #[test]
    #[should_panic(expected = "ScriptName must not be empty")]
    fn test_new_panics_on_empty() {
        let _ = ScriptName::new("");
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        let err = serde_yaml::from_str::<ScriptName>("''");
        assert!(err.is_err());
        let ok: ScriptName = serde_yaml::from_str("0002_users.sql").unwrap();
        assert_eq!(ok.as_str(), "0002_users.sql");
    }

    #[test]
    fn test_try_from_and_string_equality() {
        assert_eq!(
            ScriptName::try_from(String::new()).unwrap_err(),
            "ScriptName must not be empty"
        );
        let name = ScriptName::try_from("0003_orders.sql").unwrap();
        assert_eq!(name, String::from("0003_orders.sql"));
        assert_eq!(name.into_inner(), "0003_orders.sql");
    }
}
