use crate::form::FormData;
use crate::validate::{FieldIssue, FieldRule};

use super::StepDefinition;

/// Step declarativo: una lista ordenada de `(campo, regla)`.
///
/// ```ignore
/// let step = FieldStep::new(1, "personal_info", "Personal information")
///     .field("full_name", FieldRule::Required)
///     .field("email", FieldRule::Email);
/// ```
#[derive(Debug, Clone)]
pub struct FieldStep {
    index: usize,
    id: String,
    title: String,
    rules: Vec<(String, FieldRule)>,
}

impl FieldStep {
    pub fn new(index: usize, id: impl Into<String>, title: impl Into<String>) -> Self {
        Self { index,
               id: id.into(),
               title: title.into(),
               rules: Vec::new() }
    }

    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.rules.push((name.into(), rule));
        self
    }

    pub fn rules(&self) -> &[(String, FieldRule)] {
        &self.rules
    }
}

impl StepDefinition for FieldStep {
    fn index(&self) -> usize {
        self.index
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn fields(&self) -> Vec<&str> {
        self.rules.iter().map(|(name, _)| name.as_str()).collect()
    }

    fn validate(&self, form: &FormData) -> Vec<FieldIssue> {
        self.rules
            .iter()
            .filter_map(|(name, rule)| rule.check(name, form.get(name)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_every_failing_field_in_order() {
        let step = FieldStep::new(1, "info", "Info").field("name", FieldRule::Required)
                                                    .field("email", FieldRule::Email);
        let mut form = FormData::new();
        form.set("email", "nope".into());
        let issues = step.validate(&form);
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email"]);
        assert!(!step.is_valid(&form));

        form.set("name", "Bob".into());
        form.set("email", "bob@example.com".into());
        assert!(step.is_valid(&form));
    }
}
