//! Macro for non-empty string newtypes.
//!
//! Every name type in this crate carries the same invariant (never empty) and
//! the same conversions, so one invocation declares the struct together with
//! its constructors, serde support and string comparisons.

/// Declare a non-empty string newtype.
///
/// The generated type derives `Debug, Clone, PartialEq, Eq, Hash, PartialOrd,
/// Ord, Serialize` and gets:
/// - a `Deserialize` impl that rejects the empty string
/// - `new()` (panics on empty), `try_new()` (returns `Option`), `as_str()`,
///   `into_inner()`
/// - `Display`, `AsRef<str>`, `Deref<Target = str>`, `Borrow<str>`
/// - `TryFrom<String>` and `TryFrom<&str>`
/// - equality with `str`, `&str` and `String`
macro_rules! define_newtype_string {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
        #[serde(transparent)]
        $vis struct $Name(String);

        impl $Name {
            const EMPTY: &'static str = concat!(stringify!($Name), " must not be empty");

            /// Wrap `value`, panicking if it is empty.
            ///
            /// Prefer [`try_new`](Self::try_new) for untrusted input.
            pub fn new(value: impl Into<String>) -> Self {
                let value = value.into();
                assert!(!value.is_empty(), "{}", Self::EMPTY);
                Self(value)
            }

            /// Wrap `value`, or `None` when it is empty.
            pub fn try_new(value: impl Into<String>) -> Option<Self> {
                let value = value.into();
                (!value.is_empty()).then_some(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl<'de> serde::Deserialize<'de> for $Name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let value = <String as serde::Deserialize>::deserialize(deserializer)?;
                $Name::try_new(value).ok_or_else(|| serde::de::Error::custom($Name::EMPTY))
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $Name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::ops::Deref for $Name {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl std::borrow::Borrow<str> for $Name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $Name {
            type Error = &'static str;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::try_new(value).ok_or(Self::EMPTY)
            }
        }

        impl TryFrom<&str> for $Name {
            type Error = &'static str;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::try_new(value).ok_or(Self::EMPTY)
            }
        }

        impl PartialEq<str> for $Name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $Name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<String> for $Name {
            fn eq(&self, other: &String) -> bool {
                self.0 == *other
            }
        }
    };
}

pub(crate) use define_newtype_string;
