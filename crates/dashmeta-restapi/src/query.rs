//! Query chain: a seed followed by dependent REST calls
use crate::client::{BasicAuth, HttpClient};
use crate::json_path::JsonPath;
use crate::template::UrlTemplate;
use dashmeta_core::{ExtractError, Record};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;

/// Pull-based record source. Once it returns `Ok(None)` it keeps doing so.
pub trait Query: Send {
    fn next_record(&mut self) -> Result<Option<Record>, ExtractError>;
}

/// Root of a chain: yields fixed records, then stops.
#[derive(Debug, Clone)]
pub struct RestApiQuerySeed {
    records: VecDeque<Record>,
}

impl RestApiQuerySeed {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
        }
    }
}

impl Query for RestApiQuerySeed {
    fn next_record(&mut self) -> Result<Option<Record>, ExtractError> {
        Ok(self.records.pop_front())
    }
}

/// One GET per upstream record, projected into `field_names`.
///
/// Without `|` in the path, the slots are read in consecutive groups of
/// `field_names.len()`. With `|`, alternative `i` fills field `i` and the
/// alternatives are zipped by position; they must match the same number of
/// slots. A group with an empty slot is skipped.
pub struct RestApiQuery {
    upstream: Box<dyn Query>,
    client: Arc<dyn HttpClient>,
    url: UrlTemplate,
    json_path: JsonPath,
    field_names: Vec<String>,
    auth: Option<BasicAuth>,
    skip_no_result: bool,
    inner: Record,
    pending: VecDeque<Vec<Value>>,
    exhausted: bool,
}

impl RestApiQuery {
    pub fn new(
        upstream: Box<dyn Query>,
        client: Arc<dyn HttpClient>,
        url: &str,
        json_path: &str,
        field_names: &[&str],
    ) -> Result<Self, ExtractError> {
        let json_path = JsonPath::parse(json_path)?;

        if field_names.is_empty() {
            return Err(ExtractError::JsonPath(format!(
                "`{}` has no field names to fill",
                json_path
            )));
        }
        if json_path.is_union() && json_path.alternatives().len() != field_names.len() {
            return Err(ExtractError::JsonPath(format!(
                "`{}` has {} alternatives for {} field names",
                json_path,
                json_path.alternatives().len(),
                field_names.len()
            )));
        }

        Ok(Self {
            upstream,
            client,
            url: UrlTemplate::new(url),
            json_path,
            field_names: field_names.iter().map(|f| f.to_string()).collect(),
            auth: None,
            skip_no_result: false,
            inner: Record::new(),
            pending: VecDeque::new(),
            exhausted: false,
        })
    }

    pub fn with_auth(mut self, auth: BasicAuth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Skip upstream records whose response matches nothing instead of failing.
    pub fn skip_no_result(mut self, skip: bool) -> Self {
        self.skip_no_result = skip;
        self
    }

    pub fn url_template(&self) -> &UrlTemplate {
        &self.url
    }

    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    fn fetch(&mut self, record: Record) -> Result<(), ExtractError> {
        let url = self.url.render(&record)?;
        let body = self.client.get_json(&url, self.auth.as_ref())?;

        match self.rows(&url, &body)? {
            Some(rows) => {
                tracing::debug!(url = %url, rows = rows.len(), "query step fetched");
                self.pending.extend(rows);
                self.inner = record;
                Ok(())
            }
            None if self.skip_no_result => {
                tracing::debug!(url = %url, "no result, skipping");
                Ok(())
            }
            None => Err(ExtractError::NoResult { url }),
        }
    }

    /// Rows projected from `body`, or `None` when no slot holds a value.
    fn rows(&self, url: &str, body: &Value) -> Result<Option<Vec<Vec<Value>>>, ExtractError> {
        let slots: Vec<Vec<Option<&Value>>> = self
            .json_path
            .alternatives()
            .iter()
            .map(|path| path.slots(body))
            .collect();

        if slots.iter().flatten().all(Option::is_none) {
            return Ok(None);
        }

        let groups: Vec<Vec<Option<&Value>>> = if self.json_path.is_union() {
            let len = slots[0].len();
            if slots.iter().any(|s| s.len() != len) {
                let counts: Vec<String> = slots.iter().map(|s| s.len().to_string()).collect();
                return Err(ExtractError::Misaligned {
                    url: url.to_string(),
                    detail: format!(
                        "alternatives of `{}` matched {} entries",
                        self.json_path,
                        counts.join("/")
                    ),
                });
            }
            (0..len)
                .map(|i| slots.iter().map(|s| s[i]).collect())
                .collect()
        } else {
            let width = self.field_names.len();
            if slots[0].len() % width != 0 {
                return Err(ExtractError::Misaligned {
                    url: url.to_string(),
                    detail: format!(
                        "`{}` matched {} values for {} fields",
                        self.json_path,
                        slots[0].len(),
                        width
                    ),
                });
            }
            slots[0].chunks(width).map(|c| c.to_vec()).collect()
        };

        let total = groups.len();
        let rows: Vec<Vec<Value>> = groups
            .into_iter()
            .filter_map(|group| group.into_iter().map(|v| v.cloned()).collect())
            .collect();
        if rows.len() < total {
            tracing::debug!(url = %url, skipped = total - rows.len(), "incomplete entries skipped");
        }

        Ok(Some(rows))
    }
}

impl Query for RestApiQuery {
    fn next_record(&mut self) -> Result<Option<Record>, ExtractError> {
        loop {
            if let Some(row) = self.pending.pop_front() {
                let mut record = self.inner.clone();
                for (name, value) in self.field_names.iter().zip(row) {
                    record.insert(name.clone(), value);
                }
                return Ok(Some(record));
            }

            if self.exhausted {
                return Ok(None);
            }

            match self.upstream.next_record()? {
                Some(record) => self.fetch(record)?,
                None => {
                    self.exhausted = true;
                    return Ok(None);
                }
            }
        }
    }
}
