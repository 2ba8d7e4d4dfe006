//! URL templates with `{field}` placeholders filled from upstream records
use dashmeta_core::{ExtractError, Record};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub struct UrlTemplate {
    template: String,
    fields: Vec<String>,
}

impl UrlTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let fields = PLACEHOLDER
            .captures_iter(&template)
            .map(|c| c[1].to_string())
            .collect();
        Self { template, fields }
    }

    /// Record fields the template reads, in order of appearance.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Substitute every placeholder with the record's value, verbatim.
    pub fn render(&self, record: &Record) -> Result<String, ExtractError> {
        for field in &self.fields {
            match record.get(field) {
                Some(Value::String(_)) | Some(Value::Number(_)) | Some(Value::Bool(_)) => {}
                Some(other) => {
                    return Err(ExtractError::Template(format!(
                        "`{}` in {} is not a scalar: {}",
                        field, self.template, other
                    )))
                }
                None => {
                    return Err(ExtractError::Template(format!(
                        "record has no `{}` for {}",
                        field, self.template
                    )))
                }
            }
        }

        let rendered = PLACEHOLDER.replace_all(&self.template, |caps: &Captures| {
            match record.get(&caps[1]) {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            }
        });
        Ok(rendered.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashmeta_core::data_model::record_from;
    use serde_json::json;

    #[test]
    fn test_fields_in_order() {
        let template = UrlTemplate::new("https://h/api/{organization}/spaces/{dashboard_group_id}/reports");
        assert_eq!(template.fields(), &["organization", "dashboard_group_id"]);
    }

    #[test]
    fn test_render_keeps_paths_verbatim() {
        let template = UrlTemplate::new("https://h{last_run_resource_path}");
        let record = record_from([("last_run_resource_path", "/api/acme/reports/r1/runs/7")]);
        assert_eq!(
            template.render(&record).unwrap(),
            "https://h/api/acme/reports/r1/runs/7"
        );
    }

    #[test]
    fn test_render_numbers() {
        let template = UrlTemplate::new("https://h/page/{page}");
        let mut record = Record::new();
        record.insert("page".to_string(), json!(3));
        assert_eq!(template.render(&record).unwrap(), "https://h/page/3");
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let template = UrlTemplate::new("https://h/{organization}/spaces");
        let err = template.render(&Record::new()).unwrap_err();
        assert!(matches!(err, ExtractError::Template(_)));
    }
}
