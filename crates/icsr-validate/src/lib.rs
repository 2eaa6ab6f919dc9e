//! Business-rule post-validation of ICSR document trees.
//!
//! Validation runs on structurally well-formed trees only and never fails:
//! the caller always gets the model back together with its validity flag and
//! every issue found in the pass.
//!
//! ```ignore
//! let outcome = icsr_validate::validate(domain_icsr);
//! if !outcome.is_valid() {
//!     for issue in outcome.issues() {
//!         eprintln!("{}: {}", issue.path, issue.message);
//!     }
//! }
//! ```

pub mod processor;
pub mod rule;
pub mod rules;

pub use processor::{PostValidationProcessor, RuleSet, Validated};
pub use rule::{Check, Occurrences, Rule, RuleContext};
pub use rules::{business_rules, default_rules};

use icsr_model::EntityType;

/// Validates `model` against the default business rules.
pub fn validate<T: EntityType>(model: T) -> Validated<T> {
    PostValidationProcessor::new(default_rules()).validate(model)
}
