// ── Three-state field wrapper ──

use serde::{Serialize, Serializer};

/// A user-facing field value together with where it came from.
///
/// `Unset` is distinct from a zero value: it means nobody supplied the field
/// and the schema has no default, so the remote service decides. `Default`
/// was filled in by the schema; `Explicit` was authored in the document or
/// reported by the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting<T> {
    Unset,
    Default(T),
    Explicit(T),
}

impl<T> Default for Setting<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> Setting<T> {
    /// Build a setting from an optional supplied value and an optional schema default.
    pub fn resolve(supplied: Option<T>, default: Option<T>) -> Self {
        match (supplied, default) {
            (Some(v), _) => Self::Explicit(v),
            (None, Some(d)) => Self::Default(d),
            (None, None) => Self::Unset,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Unset => None,
            Self::Default(v) | Self::Explicit(v) => Some(v),
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Unset => None,
            Self::Default(v) | Self::Explicit(v) => Some(v),
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

impl<T: Clone> Setting<T> {
    /// The value, cloned into the `Option` shape the wire types use.
    pub fn to_option(&self) -> Option<T> {
        self.value().cloned()
    }
}

impl Setting<String> {
    pub fn as_deref(&self) -> Option<&str> {
        self.value().map(String::as_str)
    }
}

/// Wire values are `Option`s: present means the service reported it.
impl<T> From<Option<T>> for Setting<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unset, Self::Explicit)
    }
}

impl<T: Serialize> Serialize for Setting<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_supplied_value() {
        assert_eq!(Setting::resolve(Some(true), Some(false)), Setting::Explicit(true));
        assert_eq!(Setting::resolve(None, Some(false)), Setting::Default(false));
        assert_eq!(Setting::<bool>::resolve(None, None), Setting::Unset);
    }

    #[test]
    fn default_and_explicit_both_carry_a_value() {
        assert_eq!(Setting::Default(3).value(), Some(&3));
        assert_eq!(Setting::Explicit(4).into_value(), Some(4));
        assert_eq!(Setting::<u8>::Unset.value(), None);
    }

    #[test]
    fn absent_option_is_unset_not_zero() {
        let absent: Setting<bool> = None.into();
        assert!(absent.is_unset());
        let present: Setting<bool> = Some(false).into();
        assert_eq!(present, Setting::Explicit(false));
    }
}
