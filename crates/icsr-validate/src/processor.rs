//! Rule registration and the post-validation walk.

use std::any::TypeId;
use std::collections::HashMap;

use icsr_model::{
    Entity, EntityDescriptor, EntityType, FieldPath, FieldRef, IssueReport, ValidationIssue,
};
use serde::Serialize;
use tracing::{debug, trace};

use crate::rule::{NodeRule, Rule};

/// Business rules keyed by the entity type they are registered against.
#[derive(Default)]
pub struct RuleSet {
    rules_by_entity: HashMap<TypeId, Vec<Box<dyn NodeRule>>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `rule` for nodes of type `E`, after any rules already registered.
    pub fn register<E: EntityType>(&mut self, rule: Rule<E>) -> &mut Self {
        self.rules_by_entity
            .entry(TypeId::of::<E>())
            .or_default()
            .push(Box::new(rule));
        self
    }

    #[must_use]
    pub fn with<E: EntityType>(mut self, rule: Rule<E>) -> Self {
        self.register(rule);
        self
    }

    /// Names of the rules registered for the described type, in order.
    pub fn rule_names(&self, descriptor: &EntityDescriptor) -> Vec<&'static str> {
        self.rules_for(descriptor).iter().map(|rule| rule.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules_by_entity.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn rules_for(&self, descriptor: &EntityDescriptor) -> &[Box<dyn NodeRule>] {
        self.rules_by_entity
            .get(&descriptor.type_id())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.len())
            .finish()
    }
}

/// A model annotated with the outcome of one validation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Validated<T> {
    pub model: T,
    #[serde(flatten)]
    pub report: IssueReport,
}

impl<T> Validated<T> {
    pub fn is_valid(&self) -> bool {
        self.report.is_valid
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.report.issues
    }

    pub fn into_parts(self) -> (T, bool, Vec<ValidationIssue>) {
        (self.model, self.report.is_valid, self.report.issues)
    }

    /// Carries the outcome over to another representation of the same model.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Validated<U> {
        Validated {
            model: f(self.model),
            report: self.report,
        }
    }
}

/// Validity accumulated over one pass; once invalid, stays invalid.
#[derive(Debug)]
struct Outcome {
    is_valid: bool,
    issues: Vec<ValidationIssue>,
}

impl Outcome {
    fn new() -> Self {
        Self {
            is_valid: true,
            issues: Vec::new(),
        }
    }

    fn record(&mut self, issues: Vec<ValidationIssue>) {
        if !issues.is_empty() {
            self.is_valid = false;
            self.issues.extend(issues);
        }
    }

    fn into_report(self) -> IssueReport {
        IssueReport {
            is_valid: self.is_valid,
            issues: self.issues,
        }
    }
}

/// Runs every registered rule over every node of a tree.
///
/// Nodes are visited children first, so issues below a node are listed
/// before the node's own. A pass never stops early and never fails.
#[derive(Debug, Clone, Copy)]
pub struct PostValidationProcessor<'r> {
    rules: &'r RuleSet,
}

impl<'r> PostValidationProcessor<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self { rules }
    }

    pub fn validate<T: EntityType>(&self, model: T) -> Validated<T> {
        let report = self.check(&model);
        Validated { model, report }
    }

    /// Validates a borrowed tree, returning only the verdict and issues.
    pub fn check(&self, node: &dyn Entity) -> IssueReport {
        let mut outcome = Outcome::new();
        self.walk(node, &FieldPath::root(), &mut outcome);
        debug!(
            entity = node.descriptor().name,
            valid = outcome.is_valid,
            issues = outcome.issues.len(),
            "post-validation finished"
        );
        outcome.into_report()
    }

    fn walk(&self, node: &dyn Entity, path: &FieldPath, outcome: &mut Outcome) {
        for (name, value) in node.fields() {
            match value {
                FieldRef::Scalar(_) | FieldRef::Child(None) => {}
                FieldRef::Child(Some(child)) => self.walk(child, &path.field(name), outcome),
                FieldRef::Children(children) => {
                    for (index, child) in children.into_iter().enumerate() {
                        self.walk(child, &path.field(name).index(index), outcome);
                    }
                }
            }
        }

        for rule in self.rules.rules_for(node.descriptor()) {
            trace!(rule = rule.name(), path = %path, "evaluating rule");
            outcome.record(rule.evaluate(node, path));
        }
    }
}
