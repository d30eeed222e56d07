//! `%(name)s` message templates

use std::collections::BTreeMap;
use thiserror::Error;

/// Keyword fields supplied when constructing an error
pub type Fields = BTreeMap<String, String>;

/// Why a template could not be rendered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template references missing field '{0}'")]
    MissingField(String),

    #[error("unterminated placeholder starting at byte {0}")]
    Unterminated(usize),

    #[error("unsupported conversion '%{conversion}' for field '{field}'")]
    UnsupportedConversion { field: String, conversion: char },

    #[error("stray '%' at byte {0}")]
    StrayPercent(usize),
}

/// What to do when a template cannot be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatPolicy {
    /// Keep the unrendered template as the message
    #[default]
    Lenient,
    /// Hand the [`TemplateError`] back to the caller
    Strict,
}

impl FormatPolicy {
    pub fn from_fatal_flag(fatal: bool) -> Self {
        if fatal {
            Self::Strict
        } else {
            Self::Lenient
        }
    }
}

/// Substitute `fields` into `template`
///
/// `%(name)s` is replaced by the value of `name` and `%%` becomes a literal
/// `%`. Fields the template does not mention are ignored.
pub fn interpolate(template: &str, fields: &Fields) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices();

    while let Some((pos, c)) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some((_, '%')) => out.push('%'),
            Some((_, '(')) => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, ')')) => break,
                        Some((_, ch)) => name.push(ch),
                        None => return Err(TemplateError::Unterminated(pos)),
                    }
                }

                match chars.next() {
                    Some((_, 's')) => {}
                    Some((_, conversion)) => {
                        return Err(TemplateError::UnsupportedConversion {
                            field: name,
                            conversion,
                        })
                    }
                    None => return Err(TemplateError::Unterminated(pos)),
                }

                let value = fields
                    .get(&name)
                    .ok_or_else(|| TemplateError::MissingField(name.clone()))?;
                out.push_str(value);
            }
            _ => return Err(TemplateError::StrayPercent(pos)),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_plain_text_passes_through() {
        let out = interpolate("Authorization failed.", &Fields::new()).unwrap();
        assert_eq!(out, "Authorization failed.");
    }

    #[test]
    fn test_substitutes_named_fields() {
        let out = interpolate(
            "Store %(store_name)s could not be configured correctly. Reason: %(reason)s",
            &fields(&[("store_name", "swift"), ("reason", "no auth")]),
        )
        .unwrap();
        assert_eq!(
            out,
            "Store swift could not be configured correctly. Reason: no auth"
        );
    }

    #[test]
    fn test_unused_fields_are_ignored() {
        let out = interpolate("Not found.", &fields(&[("id", "42")])).unwrap();
        assert_eq!(out, "Not found.");
    }

    #[test]
    fn test_double_percent_is_literal() {
        let out = interpolate("100%% of %(what)s", &fields(&[("what", "quota")])).unwrap();
        assert_eq!(out, "100% of quota");
    }

    #[test]
    fn test_missing_field() {
        let err = interpolate("Attribute '%(property)s' is reserved.", &Fields::new()).unwrap_err();
        assert_eq!(err, TemplateError::MissingField("property".to_string()));
    }

    #[test]
    fn test_unterminated_placeholder() {
        let err = interpolate("abc %(name", &Fields::new()).unwrap_err();
        assert_eq!(err, TemplateError::Unterminated(4));

        let err = interpolate("abc %(name)", &fields(&[("name", "x")])).unwrap_err();
        assert_eq!(err, TemplateError::Unterminated(4));
    }

    #[test]
    fn test_unsupported_conversion() {
        let err = interpolate("%(count)d items", &fields(&[("count", "3")])).unwrap_err();
        assert_eq!(
            err,
            TemplateError::UnsupportedConversion {
                field: "count".to_string(),
                conversion: 'd',
            }
        );
    }

    #[test]
    fn test_stray_percent() {
        assert_eq!(
            interpolate("50% off", &Fields::new()).unwrap_err(),
            TemplateError::StrayPercent(2)
        );
        assert_eq!(
            interpolate("trailing %", &Fields::new()).unwrap_err(),
            TemplateError::StrayPercent(9)
        );
    }

    #[test]
    fn test_policy_from_flag() {
        assert_eq!(FormatPolicy::from_fatal_flag(true), FormatPolicy::Strict);
        assert_eq!(FormatPolicy::from_fatal_flag(false), FormatPolicy::Lenient);
        assert_eq!(FormatPolicy::default(), FormatPolicy::Lenient);
    }
}
