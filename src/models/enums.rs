use crate::error::DatasetError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string forms are the collaborator-facing contract: the extraction
/// layer produces them and the rendering/export layers consume them.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatasetError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatasetError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(EventStatus {
    InRange => "In Range",
    OutOfRange => "Out of Range",
    Unknown => "Unknown",
});

str_enum!(BiomarkerStatus {
    InRange => "In Range",
    OutOfRange => "Out of Range",
    Improving => "Improving",
    Unknown => "Unknown",
});

str_enum!(BiomarkerType {
    NumericBand => "numeric-band",
    ThresholdUpper => "threshold-upper",
    ThresholdLower => "threshold-lower",
    CategoricalBinary => "categorical-binary",
    CategoricalDescriptive => "categorical-descriptive",
    Titer => "titer",
    Pattern => "pattern",
    Percentage => "percentage",
    Informational => "informational",
});

str_enum!(DisplayHint {
    RangeBar => "range-bar",
    ThresholdLine => "threshold-line",
    PassFail => "pass-fail",
    Ladder => "ladder",
    Grade => "grade",
    Simple => "simple",
});

str_enum!(ValueType {
    Numeric => "numeric",
    Titer => "titer",
    Categorical => "categorical",
    Pattern => "pattern",
    Unknown => "unknown",
});

impl EventStatus {
    /// Resolve an event status from a raw status label and/or an
    /// in-range boolean. An explicit recognized label wins; otherwise
    /// the boolean is tagged to its status string; otherwise Unknown.
    pub fn from_label(status: Option<&str>, in_range: Option<bool>) -> Self {
        if let Some(s) = status {
            if let Ok(parsed) = s.trim().parse::<EventStatus>() {
                return parsed;
            }
        }
        match in_range {
            Some(true) => EventStatus::InRange,
            Some(false) => EventStatus::OutOfRange,
            None => EventStatus::Unknown,
        }
    }
}

impl From<EventStatus> for BiomarkerStatus {
    fn from(status: EventStatus) -> Self {
        match status {
            EventStatus::InRange => BiomarkerStatus::InRange,
            EventStatus::OutOfRange => BiomarkerStatus::OutOfRange,
            EventStatus::Unknown => BiomarkerStatus::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn biomarker_status_round_trip() {
        for (variant, s) in [
            (BiomarkerStatus::InRange, "In Range"),
            (BiomarkerStatus::OutOfRange, "Out of Range"),
            (BiomarkerStatus::Improving, "Improving"),
            (BiomarkerStatus::Unknown, "Unknown"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(BiomarkerStatus::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn biomarker_type_round_trip() {
        for (variant, s) in [
            (BiomarkerType::NumericBand, "numeric-band"),
            (BiomarkerType::ThresholdUpper, "threshold-upper"),
            (BiomarkerType::ThresholdLower, "threshold-lower"),
            (BiomarkerType::CategoricalBinary, "categorical-binary"),
            (BiomarkerType::CategoricalDescriptive, "categorical-descriptive"),
            (BiomarkerType::Titer, "titer"),
            (BiomarkerType::Pattern, "pattern"),
            (BiomarkerType::Percentage, "percentage"),
            (BiomarkerType::Informational, "informational"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(BiomarkerType::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn display_hint_round_trip() {
        for (variant, s) in [
            (DisplayHint::RangeBar, "range-bar"),
            (DisplayHint::ThresholdLine, "threshold-line"),
            (DisplayHint::PassFail, "pass-fail"),
            (DisplayHint::Ladder, "ladder"),
            (DisplayHint::Grade, "grade"),
            (DisplayHint::Simple, "simple"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(DisplayHint::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(BiomarkerType::from_str("invalid").is_err());
        assert!(EventStatus::from_str("improving").is_err());
        assert!(DisplayHint::from_str("").is_err());
    }

    #[test]
    fn event_status_from_explicit_label() {
        assert_eq!(
            EventStatus::from_label(Some("In Range"), Some(false)),
            EventStatus::InRange
        );
        assert_eq!(
            EventStatus::from_label(Some(" Out of Range "), None),
            EventStatus::OutOfRange
        );
    }

    #[test]
    fn event_status_from_in_range_boolean() {
        assert_eq!(EventStatus::from_label(None, Some(true)), EventStatus::InRange);
        assert_eq!(
            EventStatus::from_label(None, Some(false)),
            EventStatus::OutOfRange
        );
        // Unrecognized label falls through to the boolean.
        assert_eq!(
            EventStatus::from_label(Some("HIGH"), Some(false)),
            EventStatus::OutOfRange
        );
    }

    #[test]
    fn event_status_unknown_when_nothing_given() {
        assert_eq!(EventStatus::from_label(None, None), EventStatus::Unknown);
    }

    #[test]
    fn event_status_serializes_as_contract_string() {
        assert_eq!(
            serde_json::to_string(&EventStatus::OutOfRange).unwrap(),
            "\"Out of Range\""
        );
    }
}
