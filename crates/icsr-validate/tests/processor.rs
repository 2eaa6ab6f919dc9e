//! Tests for rule resolution and the post-validation walk.

use icsr_model::domain::{self, h_narrative_case_summary, icsr};
use icsr_model::{EntityType, FieldPath, Scalar};
use icsr_validate::{
    Check, Occurrences, PostValidationProcessor, Rule, RuleContext, RuleSet, business_rules,
};

fn narrative(text: Option<&str>) -> domain::Icsr {
    domain::Icsr {
        h_narrative_case_summary: Some(Box::new(domain::HNarrativeCaseSummary {
            h_1_case_narrative: text.map(str::to_string),
            h_4_sender_comments: Some("none".to_string()),
            ..Default::default()
        })),
        ..Default::default()
    }
}

fn narrative_present() -> Rule<domain::HNarrativeCaseSummary> {
    Rule {
        name: "narrative_present",
        code: "missing_narrative",
        inputs: &[h_narrative_case_summary::h_1_case_narrative],
        check: Check::Single {
            message: "Narrative is required",
            check: |context| {
                context
                    .scalar(h_narrative_case_summary::h_1_case_narrative)
                    .is_some()
            },
        },
    }
}

fn always_fails(name: &'static str) -> Rule<domain::Icsr> {
    Rule {
        name,
        code: name,
        inputs: &[],
        check: Check::Single {
            message: "failed",
            check: |_| false,
        },
    }
}

// --- reporting modes ---

#[test]
fn single_error_is_addressed_at_the_node() {
    let rules = RuleSet::new().with(narrative_present());

    let outcome = PostValidationProcessor::new(&rules).validate(narrative(None));

    assert!(!outcome.is_valid());
    assert_eq!(outcome.issues().len(), 1);
    assert_eq!(
        outcome.issues()[0].path,
        FieldPath::root().field("h_narrative_case_summary")
    );
    assert_eq!(outcome.issues()[0].message, "Narrative is required");
}

#[test]
fn per_occurrence_paths_are_relative_to_the_node() {
    fn report_twice(_: &RuleContext<'_, domain::HNarrativeCaseSummary>, found: &mut Occurrences) {
        found.report(FieldPath::root().field("a"), "first", None);
        found.report(
            FieldPath::root().field("b").index(2),
            "second",
            Some(Scalar::Bool(true)),
        );
    }
    let rules = RuleSet::new().with(Rule {
        name: "report_twice",
        code: "twice",
        inputs: &[],
        check: Check::PerOccurrence(report_twice),
    });

    let (_, is_valid, issues) = PostValidationProcessor::new(&rules)
        .validate(narrative(Some("text")))
        .into_parts();

    assert!(!is_valid);
    let paths: Vec<_> = issues.iter().map(|issue| issue.path.to_string()).collect();
    assert_eq!(
        paths,
        vec!["h_narrative_case_summary.a", "h_narrative_case_summary.b[2]"]
    );
    assert_eq!(issues[1].offending_value, Some(Scalar::Bool(true)));
    assert!(issues.iter().all(|issue| issue.code == "twice"));
}

#[test]
fn per_occurrence_rule_without_findings_passes() {
    let rules = RuleSet::new().with(Rule::<domain::Icsr> {
        name: "quiet",
        code: "quiet",
        inputs: &[],
        check: Check::PerOccurrence(|_, _| {}),
    });

    assert!(PostValidationProcessor::new(&rules).validate(domain::Icsr::default()).is_valid());
}

// --- pass semantics ---

#[test]
fn every_rule_runs_after_a_failure() {
    let rules = RuleSet::new()
        .with(always_fails("first"))
        .with(always_fails("second"))
        .with(narrative_present());

    let outcome = PostValidationProcessor::new(&rules).validate(narrative(None));

    let codes: Vec<_> = outcome.issues().iter().map(|issue| issue.code.as_str()).collect();
    assert_eq!(codes, vec!["missing_narrative", "first", "second"]);
}

#[test]
fn validity_stays_false_once_lost() {
    let rules = RuleSet::new()
        .with(always_fails("first"))
        .with(narrative_present());

    let outcome = PostValidationProcessor::new(&rules).validate(narrative(Some("text")));

    assert!(!outcome.is_valid());
    assert_eq!(outcome.issues().len(), 1);
}

#[test]
fn empty_rule_set_accepts_anything() {
    let rules = RuleSet::new();
    let outcome = PostValidationProcessor::new(&rules).validate(narrative(None));
    assert!(outcome.is_valid());
    assert!(rules.is_empty());
}

// --- input resolution ---

#[test]
fn only_declared_inputs_are_visible() {
    let rules = RuleSet::new().with(Rule::<domain::HNarrativeCaseSummary> {
        name: "sees_declared_only",
        code: "undeclared_visible",
        inputs: &[h_narrative_case_summary::h_1_case_narrative],
        check: Check::Single {
            message: "undeclared input was resolved",
            check: |context| {
                context
                    .scalar(h_narrative_case_summary::h_4_sender_comments)
                    .is_none()
            },
        },
    });

    assert!(PostValidationProcessor::new(&rules).validate(narrative(Some("text"))).is_valid());
}

#[test]
fn child_inputs_resolve_to_nodes() {
    let rules = RuleSet::new().with(Rule::<domain::Icsr> {
        name: "has_narrative",
        code: "no_narrative",
        inputs: &[icsr::h_narrative_case_summary],
        check: Check::Single {
            message: "no narrative section",
            check: |context| context.child(icsr::h_narrative_case_summary).is_some(),
        },
    });
    let processor = PostValidationProcessor::new(&rules);

    assert!(processor.validate(narrative(None)).is_valid());
    assert!(!processor.validate(domain::Icsr::default()).is_valid());
}

// --- registration ---

#[test]
fn rules_are_listed_per_entity_in_registration_order() {
    let rules = business_rules();
    assert_eq!(rules.len(), 3);
    assert_eq!(
        rules.rule_names(domain::Icsr::schema()),
        vec!["reaction_assessed_resolves"]
    );
    assert_eq!(
        rules.rule_names(domain::GKDrugInformation::schema()),
        vec!["no_duplicate_reaction_links"]
    );
    assert!(rules.rule_names(domain::HNarrativeCaseSummary::schema()).is_empty());
}
