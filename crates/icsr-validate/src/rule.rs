//! Declarative business rules.
//!
//! A [`Rule`] is registered against one concrete entity type and names the
//! fields it reads as typed [`FieldKey`]s. Before invoking the check, the
//! processor resolves exactly those fields off the node under test and hands
//! them over in a [`RuleContext`]; undeclared fields are not visible to the
//! rule.

use std::marker::PhantomData;

use icsr_model::{
    Entity, EntityType, FieldKey, FieldPath, FieldRef, Scalar, ValidationIssue,
};

/// How a rule reports failure.
pub enum Check<E> {
    /// The rule emits one issue per failing location below the node.
    PerOccurrence(fn(&RuleContext<'_, E>, &mut Occurrences)),
    /// The rule passes or fails as a whole; a failure is reported once, at
    /// the node itself, with `message`.
    Single {
        message: &'static str,
        check: fn(&RuleContext<'_, E>) -> bool,
    },
}

/// A business rule for nodes of type `E`.
pub struct Rule<E: 'static> {
    pub name: &'static str,
    /// Issue code attached to every issue this rule emits.
    pub code: &'static str,
    /// Fields of `E` resolved before the check runs.
    pub inputs: &'static [FieldKey<E>],
    pub check: Check<E>,
}

/// Declared inputs of one rule invocation, resolved off the node under test.
pub struct RuleContext<'a, E> {
    path: &'a FieldPath,
    inputs: Vec<(&'static str, FieldRef<'a>)>,
    entity: PhantomData<fn() -> E>,
}

impl<'a, E: EntityType> RuleContext<'a, E> {
    pub(crate) fn resolve(node: &'a dyn Entity, path: &'a FieldPath, keys: &[FieldKey<E>]) -> Self {
        let inputs = keys
            .iter()
            .filter_map(|key| node.field(key.name()).map(|value| (key.name(), value)))
            .collect();
        Self {
            path,
            inputs,
            entity: PhantomData,
        }
    }

    /// Location of the node under test.
    pub fn path(&self) -> &FieldPath {
        self.path
    }

    /// The resolved value of a declared input.
    pub fn input(&self, key: FieldKey<E>) -> Option<&FieldRef<'a>> {
        self.inputs
            .iter()
            .find(|(name, _)| *name == key.name())
            .map(|(_, value)| value)
    }

    pub fn scalar(&self, key: FieldKey<E>) -> Option<&Scalar> {
        self.input(key).and_then(FieldRef::as_scalar)
    }

    pub fn child(&self, key: FieldKey<E>) -> Option<&'a dyn Entity> {
        self.input(key).and_then(FieldRef::as_child)
    }

    pub fn children(&self, key: FieldKey<E>) -> &[&'a dyn Entity] {
        self.input(key).map(FieldRef::as_children).unwrap_or(&[])
    }

    /// Repeated children of a declared input, as their concrete type.
    pub fn children_as<T: EntityType>(
        &self,
        key: FieldKey<E>,
    ) -> impl Iterator<Item = &'a T> + '_ {
        self.children(key)
            .iter()
            .copied()
            .filter_map(|child| child.downcast_ref::<T>())
    }
}

/// Issues emitted by a per-occurrence rule, relative to the node under test.
#[derive(Debug, Default)]
pub struct Occurrences {
    found: Vec<(FieldPath, String, Option<Scalar>)>,
}

impl Occurrences {
    /// Records a failure at `at`, a path relative to the node under test.
    pub fn report(&mut self, at: FieldPath, message: impl Into<String>, offending: Option<Scalar>) {
        self.found.push((at, message.into(), offending));
    }

    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }

    fn into_issues(self, base: &FieldPath, code: &str) -> impl Iterator<Item = ValidationIssue> {
        self.found.into_iter().map(move |(at, message, offending)| {
            let issue = ValidationIssue::new(base.join(&at), code, message);
            match offending {
                Some(value) => issue.with_offending_value(value),
                None => issue,
            }
        })
    }
}

/// A rule with its entity type erased, as stored in a rule set.
pub(crate) trait NodeRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn evaluate(&self, node: &dyn Entity, path: &FieldPath) -> Vec<ValidationIssue>;
}

impl<E: EntityType> NodeRule for Rule<E> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn evaluate(&self, node: &dyn Entity, path: &FieldPath) -> Vec<ValidationIssue> {
        let context = RuleContext::resolve(node, path, self.inputs);
        match &self.check {
            Check::PerOccurrence(check) => {
                let mut occurrences = Occurrences::default();
                check(&context, &mut occurrences);
                occurrences.into_issues(path, self.code).collect()
            }
            Check::Single { message, check } => {
                if check(&context) {
                    Vec::new()
                } else {
                    vec![ValidationIssue::new(path.clone(), self.code, *message)]
                }
            }
        }
    }
}
