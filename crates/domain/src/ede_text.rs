//! Placeholder text used as the EXTRA-TEXT of an Extended DNS Error.
//!
//! Shared by config validation and the EDE adapter so both accept exactly the
//! same templates.

use crate::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdeField {
    Id,
    Name,
    Type,
    Class,
    List,
    Rule,
}

impl EdeField {
    fn parse(token: &str) -> Option<Self> {
        match token {
            ".ID" => Some(EdeField::Id),
            ".Name" => Some(EdeField::Name),
            ".Type" => Some(EdeField::Type),
            ".Class" => Some(EdeField::Class),
            ".List" => Some(EdeField::List),
            ".Rule" => Some(EdeField::Rule),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdeSegment {
    Literal(String),
    Field(EdeField),
}

/// Splits `text` into literals and `{{ .Field }}` placeholders.
///
/// A `{{` without a closing `}}`, a stray `}}` and an unknown field name are
/// all rejected.
pub fn parse_ede_text(text: &str) -> Result<Vec<EdeSegment>, DomainError> {
    let mut segments = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        push_literal(&mut segments, &rest[..start], text)?;
        let after_open = &rest[start + 2..];
        let end = after_open.find("}}").ok_or_else(|| {
            DomainError::InvalidTemplate(format!("unterminated placeholder in '{}'", text))
        })?;
        let token = after_open[..end].trim();
        let field = EdeField::parse(token).ok_or_else(|| {
            DomainError::InvalidTemplate(format!("unknown placeholder '{}'", token))
        })?;
        segments.push(EdeSegment::Field(field));
        rest = &after_open[end + 2..];
    }

    push_literal(&mut segments, rest, text)?;
    Ok(segments)
}

fn push_literal(
    segments: &mut Vec<EdeSegment>,
    literal: &str,
    text: &str,
) -> Result<(), DomainError> {
    if literal.contains("}}") {
        return Err(DomainError::InvalidTemplate(format!(
            "unmatched '}}}}' in '{}'",
            text
        )));
    }
    if !literal.is_empty() {
        segments.push(EdeSegment::Literal(literal.to_string()));
    }
    Ok(())
}
