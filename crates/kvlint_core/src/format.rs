//! Rendering grouped causes as `file:line:column: message` lines.

use crate::group::{FieldCause, GroupedCauses};
use serde::Deserialize;
use std::fmt;

/// The order in which the fields sharing a position are listed in one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldOrder {
    /// Field paths sorted ascending.
    Lexical,
    /// Field paths in the order they first appear in the validation results.
    FirstSeen,
}

impl Default for FieldOrder {
    fn default() -> Self {
        FieldOrder::Lexical
    }
}

impl std::str::FromStr for FieldOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lexical" => Ok(FieldOrder::Lexical),
            "first-seen" => Ok(FieldOrder::FirstSeen),
            _ => Err(format!(
                "unknown field order `{}`, expected `lexical` or `first-seen`",
                s
            )),
        }
    }
}

/// A single rendered diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LintError {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl fmt::Display for LintError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}:{}: {}", self.file, self.line, self.column, self.message)
    }
}

/// Render one diagnostic per position, in ascending position order.
pub fn render(file: &str, grouped: &GroupedCauses, order: FieldOrder) -> Vec<LintError> {
    grouped
        .iter()
        .map(|(position, causes)| LintError {
            file: file.to_string(),
            line: position.line,
            column: position.column,
            message: message(causes, order),
        })
        .collect()
}

/// `field "a": (reason: "K"; msg), (reason: "K2"; msg2), field "b": ...`
fn message(causes: &[FieldCause], order: FieldOrder) -> String {
    let mut fields: Vec<(&str, Vec<String>)> = vec![];
    for cause in causes {
        let reason = format!("(reason: {:?}; {})", cause.cause.kind, cause.cause.message);
        match fields.iter_mut().find(|(field, _)| *field == cause.field) {
            Some((_, reasons)) => reasons.push(reason),
            None => fields.push((cause.field, vec![reason])),
        }
    }
    if order == FieldOrder::Lexical {
        // stable, so causes of equal fields cannot be reordered
        fields.sort_by(|a, b| a.0.cmp(b.0));
    }

    fields
        .iter()
        .map(|(field, reasons)| format!("field {:?}: {}", field, reasons.join(", ")))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cause;
    use expect_test::expect;
    use kvlint_yaml::Position;
    use quickcheck_macros::quickcheck;

    fn at<'c>(grouped: &mut GroupedCauses<'c>, line: usize, column: usize, cause: &'c Cause) {
        let field = cause.field.as_deref().unwrap();
        grouped
            .entry(Position::new(line, column))
            .or_insert_with(Vec::new)
            .push(FieldCause { field, cause });
    }

    fn lines(errors: &[LintError]) -> String {
        errors.iter().map(|e| format!("{}\n", e)).collect()
    }

    #[test]
    fn single_cause() {
        let cause = Cause::new("spec.image", "FieldValueInvalid", "must not be empty");
        let mut grouped = GroupedCauses::new();
        at(&mut grouped, 2, 3, &cause);
        let errors = render("a.yaml", &grouped, FieldOrder::Lexical);
        assert_eq!(
            errors[0].to_string(),
            r#"a.yaml:2:3: field "spec.image": (reason: "FieldValueInvalid"; must not be empty)"#
        );
    }

    #[test]
    fn fields_sharing_a_position() {
        let causes = vec![
            Cause::new("spec.template", "FieldValueInvalid", "bad template"),
            Cause::new("spec.containers[0]", "FieldValueRequired", "name is required"),
            Cause::new("spec.template", "FieldValueForbidden", "may not be set"),
        ];
        let mut grouped = GroupedCauses::new();
        for cause in &causes {
            at(&mut grouped, 7, 5, cause);
        }

        let lexical = render("deploy.yaml", &grouped, FieldOrder::Lexical);
        expect![[r#"
            deploy.yaml:7:5: field "spec.containers[0]": (reason: "FieldValueRequired"; name is required), field "spec.template": (reason: "FieldValueInvalid"; bad template), (reason: "FieldValueForbidden"; may not be set)
        "#]]
        .assert_eq(&lines(&lexical));

        let first_seen = render("deploy.yaml", &grouped, FieldOrder::FirstSeen);
        expect![[r#"
            deploy.yaml:7:5: field "spec.template": (reason: "FieldValueInvalid"; bad template), (reason: "FieldValueForbidden"; may not be set), field "spec.containers[0]": (reason: "FieldValueRequired"; name is required)
        "#]]
        .assert_eq(&lines(&first_seen));
    }

    #[test]
    fn quoted_values_are_escaped() {
        let cause = Cause::new(r#"metadata.annotations["a"]"#, "Field\"Odd", "msg is \"kept\"");
        let mut grouped = GroupedCauses::new();
        at(&mut grouped, 1, 1, &cause);
        let errors = render("x.yaml", &grouped, FieldOrder::Lexical);
        assert_eq!(
            errors[0].message,
            r#"field "metadata.annotations[\"a\"]": (reason: "Field\"Odd"; msg is "kept")"#
        );
    }

    #[test]
    fn non_ascii_fields() {
        let causes = vec![
            Cause::new("metadata.labels[caf\u{e9}]", "FieldValueInvalid", "bad label"),
            Cause::new("metadata.labels[cafe\u{301}]", "FieldValueInvalid", "bad label"),
        ];
        let mut grouped = GroupedCauses::new();
        at(&mut grouped, 1, 1, &causes[0]);
        at(&mut grouped, 2, 1, &causes[1]);
        let errors = render("x.yaml", &grouped, FieldOrder::Lexical);
        // printable characters are kept, combining marks are escaped
        assert_eq!(
            errors[0].message,
            "field \"metadata.labels[caf\u{e9}]\": (reason: \"FieldValueInvalid\"; bad label)"
        );
        assert_eq!(
            errors[1].message,
            r#"field "metadata.labels[cafe\u{301}]": (reason: "FieldValueInvalid"; bad label)"#
        );
    }

    #[quickcheck]
    fn lines_are_sorted_by_position(positions: Vec<(u8, u8)>) -> bool {
        let cause = Cause::new("spec", "FieldValueInvalid", "bad");
        let mut grouped = GroupedCauses::new();
        for (line, column) in &positions {
            at(&mut grouped, usize::from(*line), usize::from(*column), &cause);
        }
        let errors = render("f.yaml", &grouped, FieldOrder::Lexical);
        errors.len() == grouped.len()
            && errors
                .windows(2)
                .all(|w| (w[0].line, w[0].column) < (w[1].line, w[1].column))
    }
}
