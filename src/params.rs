//! Structured-comment parameter metadata → typed records
//!
//! Generated client operations carry their parameter schema embedded in the
//! documentation string (`        :param str name: The user's name (required)`).
//! This module is the one adapter over that legacy format: it parses a
//! documentation string into an ordered `Parameter` list plus a one-line
//! summary. Everything downstream works on the typed records only.

use crate::error::DocError;

/// Column at which a parameter marker line starts inside the documentation.
const PARAM_INDENT: usize = 8;
const PARAM_MARKER: &str = ":param ";
/// Lint-suppression suffix the generator appends to summary lines.
const NOQA_SUFFIX: &str = "  # noqa: E501";
const REQUIRED_MARKER: &str = "(required)";
/// Transport-control parameter internal to the client library, never surfaced.
const ASYNC_REQ_PARAM: &str = "async_req";

/// One declared operation parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Raw name, case-sensitive as declared.
    pub name: String,
    /// Shallow type tag: `"str"` or any token naming a structured type.
    pub ty: String,
    /// Free-text description with the required marker removed.
    pub description: String,
    pub required: bool,
}

impl Parameter {
    /// String-typed parameters pass through binding unchanged; everything
    /// else is decoded as a JSON literal.
    pub fn is_str(&self) -> bool {
        self.ty == "str"
    }
}

/// Parsed documentation for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDoc {
    /// First documentation line, lint suffix stripped.
    pub summary: String,
    /// Parameters in declaration order. Order becomes flag order.
    pub parameters: Vec<Parameter>,
}

/// Parse an operation's documentation string.
///
/// A malformed parameter line fails the whole operation; the catalog build
/// drops that operation and keeps the rest.
pub fn parse_doc(doc: &str) -> Result<OperationDoc, DocError> {
    if doc.trim().is_empty() {
        return Err(DocError::Missing);
    }

    let summary = doc
        .lines()
        .next()
        .map(|line| line.strip_suffix(NOQA_SUFFIX).unwrap_or(line))
        .unwrap_or_default()
        .to_string();

    let mut parameters = Vec::new();
    for line in doc.lines() {
        let content = match line.get(PARAM_INDENT..) {
            Some(rest) if rest.starts_with(PARAM_MARKER) => &rest[PARAM_MARKER.len()..],
            _ => continue,
        };
        if line.ends_with("async_req bool") {
            continue;
        }

        let (decl, rest) = content
            .split_once(':')
            .ok_or_else(|| DocError::MissingDescription {
                line: line.to_string(),
            })?;

        let tokens: Vec<&str> = decl.split_whitespace().collect();
        let &[ty, name] = tokens.as_slice() else {
            return Err(DocError::BadDeclaration {
                decl: decl.to_string(),
            });
        };
        if name == ASYNC_REQ_PARAM {
            continue;
        }

        // Descriptions may themselves contain colons; `rest` is everything
        // after the first one, re-split only for the required marker.
        let required = rest.ends_with(REQUIRED_MARKER);
        let description = if required {
            rest.strip_suffix(REQUIRED_MARKER).unwrap().trim_end()
        } else {
            rest
        };
        let description = description.strip_prefix(' ').unwrap_or(description);

        parameters.push(Parameter {
            name: name.to_string(),
            ty: ty.to_string(),
            description: description.to_string(),
            required,
        });
    }

    Ok(OperationDoc {
        summary,
        parameters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREATE_USER_DOC: &str = "\
Create user  # noqa: E501

        This can only be done by the logged in user.  # noqa: E501

        :param bool async_req: async_req bool
        :param User body: Created user object (required)
        :param str username: The name that needs to be fetched
";

    #[test]
    fn parse_doc_required_string_parameter() {
        let doc = "Get user\n\n        :param str name: The user's name (required)\n";
        let parsed = parse_doc(doc).unwrap();

        assert_eq!(parsed.parameters.len(), 1);
        let param = &parsed.parameters[0];
        assert_eq!(param.name, "name");
        assert_eq!(param.ty, "str");
        assert_eq!(param.description, "The user's name");
        assert!(param.required);
    }

    #[test]
    fn parse_doc_optional_parameter_keeps_description() {
        let doc = "List users\n\n        :param str query: Search query\n";
        let parsed = parse_doc(doc).unwrap();

        let param = &parsed.parameters[0];
        assert_eq!(param.description, "Search query");
        assert!(!param.required);
    }

    #[test]
    fn parse_doc_skips_async_req() {
        let parsed = parse_doc(CREATE_USER_DOC).unwrap();

        let names: Vec<&str> = parsed.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["body", "username"]);
    }

    #[test]
    fn parse_doc_preserves_declaration_order() {
        let doc = "Op\n\n        :param str zeta: Z\n        :param str alpha: A\n";
        let parsed = parse_doc(doc).unwrap();

        let names: Vec<&str> = parsed.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn parse_doc_is_idempotent() {
        let first = parse_doc(CREATE_USER_DOC).unwrap();
        let second = parse_doc(CREATE_USER_DOC).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn parse_doc_description_may_contain_colons() {
        let doc = "Op\n\n        :param str url: Target (for example: http://host:8080) (required)\n";
        let parsed = parse_doc(doc).unwrap();

        let param = &parsed.parameters[0];
        assert_eq!(param.description, "Target (for example: http://host:8080)");
        assert!(param.required);
    }

    #[test]
    fn parse_doc_strips_lint_suffix_from_summary() {
        let parsed = parse_doc(CREATE_USER_DOC).unwrap();
        assert_eq!(parsed.summary, "Create user");
    }

    #[test]
    fn parse_doc_summary_without_lint_suffix_is_unchanged() {
        let parsed = parse_doc("Plain summary\n\n        :param str a: A\n").unwrap();
        assert_eq!(parsed.summary, "Plain summary");
    }

    #[test]
    fn parse_doc_structured_type_tag_survives() {
        let parsed = parse_doc(CREATE_USER_DOC).unwrap();

        let body = &parsed.parameters[0];
        assert_eq!(body.ty, "User");
        assert!(!body.is_str());
        assert_eq!(body.description, "Created user object");
        assert!(body.required);
    }

    #[test]
    fn parse_doc_empty_documentation_is_error() {
        assert!(matches!(parse_doc(""), Err(DocError::Missing)));
        assert!(matches!(parse_doc("   \n  "), Err(DocError::Missing)));
    }

    #[test]
    fn parse_doc_line_without_description_segment_is_error() {
        let doc = "Op\n\n        :param str broken\n";
        assert!(matches!(
            parse_doc(doc),
            Err(DocError::MissingDescription { .. })
        ));
    }

    #[test]
    fn parse_doc_declaration_without_name_is_error() {
        let doc = "Op\n\n        :param str: missing the name token\n";
        assert!(matches!(parse_doc(doc), Err(DocError::BadDeclaration { .. })));
    }

    #[test]
    fn parse_doc_marker_must_sit_at_fixed_indent() {
        let doc = "Op\n\n:param str name: not indented\n";
        let parsed = parse_doc(doc).unwrap();
        assert!(parsed.parameters.is_empty());
    }
}
