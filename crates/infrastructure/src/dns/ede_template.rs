//! Extended DNS Errors (RFC 8914) for blocked queries.
//!
//! The EXTRA-TEXT is a small template whose placeholders are filled in from
//! the query and the rule that matched it:
//!
//! | placeholder     | value                         |
//! |-----------------|-------------------------------|
//! | `{{ .ID }}`     | query transaction id          |
//! | `{{ .Name }}`   | question name                 |
//! | `{{ .Type }}`   | question type, e.g. `AAAA`    |
//! | `{{ .Class }}`  | question class, e.g. `IN`     |
//! | `{{ .List }}`   | name of the matching list     |
//! | `{{ .Rule }}`   | the matching rule             |

use blockgate_application::ports::{ExtendedErrorInput, ExtendedErrorTemplate};
use blockgate_domain::{parse_ede_text, DomainError, EdeField, EdeSegment, ExtendedErrorConfig};
use hickory_proto::op::{Edns, Message};
use hickory_proto::rr::rdata::opt::EdnsOption;
use std::fmt::Write;

/// EDNS option code of Extended DNS Error.
pub const EDE_OPTION_CODE: u16 = 15;

const DEFAULT_MAX_PAYLOAD: u16 = 4096;

#[derive(Debug, Clone)]
pub struct EdeTemplate {
    info_code: u16,
    segments: Vec<EdeSegment>,
}

impl EdeTemplate {
    pub fn new(info_code: u16, extra_text: &str) -> Result<Self, DomainError> {
        Ok(Self {
            info_code,
            segments: parse_ede_text(extra_text)?,
        })
    }

    pub fn from_config(config: &ExtendedErrorConfig) -> Result<Self, DomainError> {
        Self::new(config.info_code, &config.extra_text)
    }

    pub fn info_code(&self) -> u16 {
        self.info_code
    }

    pub fn render(&self, input: ExtendedErrorInput<'_>) -> Result<String, DomainError> {
        let mut text = String::new();
        for segment in &self.segments {
            match segment {
                EdeSegment::Literal(literal) => text.push_str(literal),
                EdeSegment::Field(EdeField::Id) => {
                    let _ = write!(text, "{}", input.query.id());
                }
                EdeSegment::Field(EdeField::List) => text.push_str(&input.matched.list),
                EdeSegment::Field(EdeField::Rule) => text.push_str(&input.matched.rule),
                EdeSegment::Field(field) => {
                    let question = input.query.queries().first().ok_or_else(|| {
                        DomainError::ExtendedError("no question in query".to_string())
                    })?;
                    let _ = match field {
                        EdeField::Name => write!(text, "{}", question.name()),
                        EdeField::Type => write!(text, "{}", question.query_type()),
                        _ => write!(text, "{}", question.query_class()),
                    };
                }
            }
        }
        Ok(text)
    }
}

impl ExtendedErrorTemplate for EdeTemplate {
    fn apply(
        &self,
        response: &mut Message,
        input: ExtendedErrorInput<'_>,
    ) -> Result<(), DomainError> {
        let text = self.render(input)?;

        let mut payload = Vec::with_capacity(2 + text.len());
        payload.extend_from_slice(&self.info_code.to_be_bytes());
        payload.extend_from_slice(text.as_bytes());

        let edns = response.extensions_mut().get_or_insert_with(|| {
            let mut edns = Edns::new();
            edns.set_max_payload(DEFAULT_MAX_PAYLOAD);
            edns
        });
        edns.options_mut()
            .insert(EdnsOption::Unknown(EDE_OPTION_CODE, payload));
        Ok(())
    }
}
