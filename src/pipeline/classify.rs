//! Biomarker classification: assign each consolidated biomarker a
//! semantic type, a display hint for the chart layer, and a value
//! type for the trend engine.
//!
//! The decision procedure is a priority-ordered rule table rather than
//! nested conditionals: rules are evaluated top to bottom, the first
//! rule to produce an outcome wins, and each rule can be unit-tested
//! in isolation.

use serde::{Deserialize, Serialize};

use crate::models::{BiomarkerType, ConsolidatedBiomarker, DisplayHint, ValueType};

use super::keywords::{
    contains_keyword, BINARY_KEYWORDS, DESCRIPTIVE_KEYWORDS, PATTERN_TEST_NAMES,
    PERCENTAGE_TEST_NAMES, TITER_TEST_NAMES,
};
use super::reference::{parse_reference_range, ReferenceData, ThresholdDirection};
use super::value::{extract_numeric, titer_value};

/// Classification of one biomarker. Pure function of the latest value,
/// parsed reference data, unit, and name; no hidden state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    #[serde(rename = "type")]
    pub biomarker_type: BiomarkerType,
    pub reference_data: Option<ReferenceData>,
    pub display_hint: DisplayHint,
    pub value_type: ValueType,
    pub event_count: usize,
}

/// Everything a rule may inspect, precomputed once per biomarker.
pub(crate) struct RuleContext<'a> {
    pub name: &'a str,
    pub unit: Option<&'a str>,
    pub latest_value: Option<&'a str>,
    pub reference: Option<&'a ReferenceData>,
    pub numeric: Option<f64>,
    pub event_count: usize,
}

/// What a matching rule decides.
pub(crate) struct Outcome {
    pub biomarker_type: BiomarkerType,
    pub display_hint: DisplayHint,
    pub value_type: ValueType,
}

pub(crate) struct Rule {
    pub name: &'static str,
    pub eval: fn(&RuleContext) -> Option<Outcome>,
}

/// The decision order itself, as data. Later rules assume every
/// earlier rule declined.
pub(crate) const RULES: &[Rule] = &[
    Rule { name: "no-events", eval: rule_no_events },
    Rule { name: "titer-shape-or-name", eval: rule_titer },
    Rule { name: "pattern-reference-or-name", eval: rule_pattern },
    Rule { name: "binary-vocabulary", eval: rule_binary },
    Rule { name: "descriptive-vocabulary", eval: rule_descriptive },
    Rule { name: "not-numeric", eval: rule_not_numeric },
    Rule { name: "numeric-with-reference", eval: rule_numeric_with_reference },
    Rule { name: "numeric-trend-only", eval: rule_numeric_trend_only },
    Rule { name: "numeric-single-reading", eval: rule_numeric_single_reading },
];

fn outcome(
    biomarker_type: BiomarkerType,
    display_hint: DisplayHint,
    value_type: ValueType,
) -> Option<Outcome> {
    Some(Outcome {
        biomarker_type,
        display_hint,
        value_type,
    })
}

/// 1. Nothing dated to show.
fn rule_no_events(ctx: &RuleContext) -> Option<Outcome> {
    if ctx.event_count == 0 {
        return outcome(
            BiomarkerType::Informational,
            DisplayHint::Simple,
            ValueType::Unknown,
        );
    }
    None
}

/// 2. Titer-shaped value or a known titer test name.
fn rule_titer(ctx: &RuleContext) -> Option<Outcome> {
    let shaped = ctx.latest_value.is_some_and(|v| titer_value(v).is_some());
    if shaped || contains_keyword(ctx.name, TITER_TEST_NAMES) {
        return outcome(BiomarkerType::Titer, DisplayHint::Ladder, ValueType::Titer);
    }
    None
}

/// 3. Pattern reference or a known pattern/grade test name.
fn rule_pattern(ctx: &RuleContext) -> Option<Outcome> {
    let pattern_ref = matches!(ctx.reference, Some(ReferenceData::Pattern { .. }));
    if pattern_ref || contains_keyword(ctx.name, PATTERN_TEST_NAMES) {
        return outcome(
            BiomarkerType::Pattern,
            DisplayHint::Grade,
            ValueType::Pattern,
        );
    }
    None
}

/// 4. Binary vocabulary in the value, or a categorical reference.
/// Binary when the value or name matches the pass/fail vocabulary,
/// descriptive otherwise.
fn rule_binary(ctx: &RuleContext) -> Option<Outcome> {
    let value_binary = ctx
        .latest_value
        .is_some_and(|v| contains_keyword(v, BINARY_KEYWORDS));
    let categorical_ref = matches!(ctx.reference, Some(ReferenceData::Categorical { .. }));
    if !value_binary && !categorical_ref {
        return None;
    }
    if value_binary || contains_keyword(ctx.name, BINARY_KEYWORDS) {
        return outcome(
            BiomarkerType::CategoricalBinary,
            DisplayHint::PassFail,
            ValueType::Categorical,
        );
    }
    outcome(
        BiomarkerType::CategoricalDescriptive,
        DisplayHint::Simple,
        ValueType::Categorical,
    )
}

/// 5. Descriptive vocabulary in the value (color, clarity, normality).
fn rule_descriptive(ctx: &RuleContext) -> Option<Outcome> {
    if ctx
        .latest_value
        .is_some_and(|v| contains_keyword(v, DESCRIPTIVE_KEYWORDS))
    {
        return outcome(
            BiomarkerType::CategoricalDescriptive,
            DisplayHint::Simple,
            ValueType::Categorical,
        );
    }
    None
}

/// 6. Events exist but the value is not interpretable as a number.
fn rule_not_numeric(ctx: &RuleContext) -> Option<Outcome> {
    if ctx.numeric.is_none() {
        return outcome(
            BiomarkerType::Informational,
            DisplayHint::Simple,
            ValueType::Unknown,
        );
    }
    None
}

/// 7. Numeric value with a usable reference type.
fn rule_numeric_with_reference(ctx: &RuleContext) -> Option<Outcome> {
    let percentage = ctx.unit.is_some_and(|u| u.contains('%'))
        || contains_keyword(ctx.name, PERCENTAGE_TEST_NAMES);
    match ctx.reference {
        Some(ReferenceData::Band { .. }) => {
            let biomarker_type = if percentage {
                BiomarkerType::Percentage
            } else {
                BiomarkerType::NumericBand
            };
            outcome(biomarker_type, DisplayHint::RangeBar, ValueType::Numeric)
        }
        Some(ReferenceData::Threshold { direction, .. }) => {
            let biomarker_type = match direction {
                ThresholdDirection::Upper => BiomarkerType::ThresholdUpper,
                ThresholdDirection::Lower => BiomarkerType::ThresholdLower,
            };
            outcome(
                biomarker_type,
                DisplayHint::ThresholdLine,
                ValueType::Numeric,
            )
        }
        Some(ReferenceData::Titer { .. }) => {
            outcome(BiomarkerType::Titer, DisplayHint::Ladder, ValueType::Titer)
        }
        _ => None,
    }
}

/// 8. Numeric with history but no usable reference: best-effort trend.
fn rule_numeric_trend_only(ctx: &RuleContext) -> Option<Outcome> {
    if ctx.event_count > 1 {
        return outcome(
            BiomarkerType::NumericBand,
            DisplayHint::RangeBar,
            ValueType::Numeric,
        );
    }
    None
}

/// 9. A single numeric reading with nothing to compare against.
fn rule_numeric_single_reading(_ctx: &RuleContext) -> Option<Outcome> {
    outcome(
        BiomarkerType::Informational,
        DisplayHint::Simple,
        ValueType::Numeric,
    )
}

/// Classify one consolidated biomarker.
pub fn classify_biomarker(biomarker: &ConsolidatedBiomarker) -> Classification {
    let reference = parse_reference_range(biomarker.reference_range.as_deref());
    let event_count = biomarker.historical_values.len();
    let ctx = RuleContext {
        name: &biomarker.name,
        unit: biomarker.unit.as_deref(),
        latest_value: biomarker.value.as_deref(),
        reference: reference.as_ref(),
        numeric: extract_numeric(biomarker.value.as_deref()),
        event_count: biomarker.historical_values.len(),
    };

    for rule in RULES {
        if let Some(out) = (rule.eval)(&ctx) {
            tracing::debug!(
                biomarker = ctx.name,
                rule = rule.name,
                biomarker_type = out.biomarker_type.as_str(),
                "classified"
            );
            return Classification {
                biomarker_type: out.biomarker_type,
                reference_data: reference,
                display_hint: out.display_hint,
                value_type: out.value_type,
                event_count,
            };
        }
    }

    // The last rule is unconditional; this is unreachable but keeps the
    // function total without a panic path.
    Classification {
        biomarker_type: BiomarkerType::Informational,
        reference_data: reference,
        display_hint: DisplayHint::Simple,
        value_type: ValueType::Unknown,
        event_count,
    }
}
