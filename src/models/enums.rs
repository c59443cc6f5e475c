use serde::{Deserialize, Serialize};

/// A literal outside an enumeration's closed set of choices.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {field} value: '{value}'")]
pub struct InvalidChoice {
    pub field: &'static str,
    pub value: String,
}

/// Macro to generate a closed-choice enum whose serde form, `as_str`
/// and `FromStr` all use the same literal.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            /// Every selectable value, in display order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }

            /// Literal choices as offered to the form.
            pub fn choices() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidChoice;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidChoice {
                        field: stringify!($name),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Sex {
    Male => "male",
    Female => "female",
    Other => "other",
});

str_enum!(PregnancyStatus {
    Pregnant => "pregnant",
    NotPregnant => "not_pregnant",
    Absent => "absent",
});

str_enum!(SmokingStatus {
    Never => "never",
    Former => "former",
    Current => "current",
});

str_enum!(AlcoholStatus {
    Yes => "yes",
    No => "no",
});

str_enum!(Severity {
    Mild => "mild",
    Moderate => "moderate",
    Severe => "severe",
    Controlled => "controlled",
});

str_enum!(Route {
    Oral => "oral",
    Iv => "iv",
    Im => "im",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn severity_round_trip() {
        for (variant, s) in [
            (Severity::Mild, "mild"),
            (Severity::Moderate, "moderate"),
            (Severity::Severe, "severe"),
            (Severity::Controlled, "controlled"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Severity::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn pregnancy_status_uses_snake_case_literal() {
        let json = serde_json::to_string(&PregnancyStatus::NotPregnant).unwrap();
        assert_eq!(json, "\"not_pregnant\"");
    }

    #[test]
    fn serde_literal_matches_as_str() {
        for route in Route::ALL {
            let json = serde_json::to_string(route).unwrap();
            assert_eq!(json, format!("\"{}\"", route.as_str()));
        }
        for sex in Sex::ALL {
            let json = serde_json::to_string(sex).unwrap();
            assert_eq!(json, format!("\"{}\"", sex.as_str()));
        }
    }

    #[test]
    fn literals_are_case_sensitive() {
        assert!(Route::from_str("IV").is_err());
        assert!(serde_json::from_str::<Route>("\"Oral\"").is_err());
        assert!(serde_json::from_str::<SmokingStatus>("\"current\"").is_ok());
    }

    #[test]
    fn unsupported_literal_rejected_at_deserialization() {
        assert!(serde_json::from_str::<Severity>("\"critical\"").is_err());
        assert!(serde_json::from_str::<AlcoholStatus>("\"sometimes\"").is_err());
    }

    #[test]
    fn invalid_choice_names_the_field() {
        let err = Sex::from_str("unknown").unwrap_err();
        assert_eq!(err.field, "Sex");
        assert_eq!(err.to_string(), "Invalid Sex value: 'unknown'");
    }

    #[test]
    fn choices_follow_declaration_order() {
        assert_eq!(Route::choices(), vec!["oral", "iv", "im"]);
        assert_eq!(SmokingStatus::choices(), vec!["never", "former", "current"]);
    }
}
