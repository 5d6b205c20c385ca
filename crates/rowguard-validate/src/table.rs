//! The validator table: rule kind to field validator.
//!
//! The table is built once per job and handed to the row validator, so the
//! set of validators is explicit and can be swapped out in tests.

use rowguard_model::{ColumnRule, DateRule, NumberRule, StringRule, Violation};

use crate::validators;

pub type StringCheck = fn(&str, &StringRule) -> Option<Violation>;
pub type DateCheck = fn(&str, &DateRule) -> Option<Violation>;
pub type NumberCheck = fn(&str, &NumberRule) -> Option<Violation>;
pub type PlainCheck = fn(&str) -> Option<Violation>;

/// Immutable mapping from each supported column type to its validator.
#[derive(Debug, Clone, Copy)]
pub struct ValidatorTable {
    string: StringCheck,
    date: DateCheck,
    number: NumberCheck,
    sin: PlainCheck,
    email: PlainCheck,
    phone: PlainCheck,
}

impl Default for ValidatorTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl ValidatorTable {
    /// The built-in validators.
    pub fn standard() -> Self {
        Self {
            string: validators::validate_string,
            date: validators::validate_date,
            number: validators::validate_number,
            sin: validators::validate_sin,
            email: validators::validate_email,
            phone: validators::validate_phone,
        }
    }

    #[must_use]
    pub fn with_string(mut self, check: StringCheck) -> Self {
        self.string = check;
        self
    }

    #[must_use]
    pub fn with_date(mut self, check: DateCheck) -> Self {
        self.date = check;
        self
    }

    #[must_use]
    pub fn with_number(mut self, check: NumberCheck) -> Self {
        self.number = check;
        self
    }

    #[must_use]
    pub fn with_sin(mut self, check: PlainCheck) -> Self {
        self.sin = check;
        self
    }

    #[must_use]
    pub fn with_email(mut self, check: PlainCheck) -> Self {
        self.email = check;
        self
    }

    #[must_use]
    pub fn with_phone(mut self, check: PlainCheck) -> Self {
        self.phone = check;
        self
    }

    /// Run the validator for `rule` on a non-empty value.
    ///
    /// Untyped and unrecognized columns have no validator and always pass.
    pub fn check(&self, value: &str, rule: &ColumnRule) -> Option<Violation> {
        match rule {
            ColumnRule::String(rule) => (self.string)(value, rule),
            ColumnRule::Date(rule) => (self.date)(value, rule),
            ColumnRule::Number(rule) => (self.number)(value, rule),
            ColumnRule::Sin => (self.sin)(value),
            ColumnRule::Email => (self.email)(value),
            ColumnRule::Phone => (self.phone)(value),
            ColumnRule::Untyped | ColumnRule::Unrecognized(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_by_rule_kind() {
        let table = ValidatorTable::standard();
        assert_eq!(
            table.check("not-an-email", &ColumnRule::Email),
            Some(Violation::InvalidEmail)
        );
        assert_eq!(table.check("anything", &ColumnRule::Untyped), None);
        assert_eq!(
            table.check("anything", &ColumnRule::Unrecognized("zip".to_string())),
            None
        );
    }

    #[test]
    fn replaced_validator_is_used() {
        let table = ValidatorTable::standard().with_phone(|_| Some(Violation::InvalidPhone));
        assert_eq!(
            table.check("+1 (555) 010-9999", &ColumnRule::Phone),
            Some(Violation::InvalidPhone)
        );
    }
}
