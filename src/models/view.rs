use super::error::FeedError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Views of the `_design/twitter` design document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Reduce view emitting `[type, id] -> 1`; grouped at level 1 it counts documents per type.
    CountType,
    /// Statuses keyed by their zero-padded id.
    GetTweets,
    /// Users keyed by id.
    GetUsers,
}

impl View {
    /// Path segment under `_design/twitter/_view/`.
    pub fn name(&self) -> &'static str {
        match self {
            View::CountType => "count_type",
            View::GetTweets => "get_tweets",
            View::GetUsers => "get_users",
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Query options for a view request.
///
/// Key options hold JSON values and are JSON-encoded on the wire, so a string
/// key `123` is sent as `"123"` (with quotes).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    key: Option<Value>,
    startkey: Option<Value>,
    endkey: Option<Value>,
    skip: Option<u64>,
    limit: Option<u64>,
    group: Option<bool>,
    group_level: Option<u32>,
    descending: Option<bool>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact-key match.
    pub fn key(mut self, key: impl Into<Value>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Inclusive lower bound of the key range.
    pub fn startkey(mut self, key: impl Into<Value>) -> Self {
        self.startkey = Some(key.into());
        self
    }

    /// Inclusive upper bound of the key range.
    pub fn endkey(mut self, key: impl Into<Value>) -> Self {
        self.endkey = Some(key.into());
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn group(mut self, group: bool) -> Self {
        self.group = Some(group);
        self
    }

    pub fn group_level(mut self, level: u32) -> Self {
        self.group_level = Some(level);
        self
    }

    pub fn descending(mut self, descending: bool) -> Self {
        self.descending = Some(descending);
        self
    }

    pub fn startkey_value(&self) -> Option<&Value> {
        self.startkey.as_ref()
    }

    pub fn key_value(&self) -> Option<&Value> {
        self.key.as_ref()
    }

    pub fn skip_value(&self) -> Option<u64> {
        self.skip
    }

    /// Query-string pairs in a stable order.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(group) = self.group {
            pairs.push(("group", group.to_string()));
        }
        if let Some(level) = self.group_level {
            pairs.push(("group_level", level.to_string()));
        }
        if let Some(key) = &self.key {
            pairs.push(("key", key.to_string()));
        }
        if let Some(key) = &self.startkey {
            pairs.push(("startkey", key.to_string()));
        }
        if let Some(key) = &self.endkey {
            pairs.push(("endkey", key.to_string()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(descending) = self.descending {
            pairs.push(("descending", descending.to_string()));
        }
        pairs
    }
}

/// One `{key, value}` row of a view result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Row<V> {
    /// Id of the emitting document; absent on reduce rows.
    #[serde(default)]
    pub id: Option<String>,
    pub key: Value,
    pub value: V,
}

impl Row<Value> {
    /// Deserializes the raw value payload into a typed document.
    pub fn decode<V: DeserializeOwned>(self) -> Result<Row<V>, FeedError> {
        let value = serde_json::from_value(self.value).map_err(|e| {
            FeedError::DataError(format!("Failed to decode row {}: {e}", self.key))
        })?;
        Ok(Row {
            id: self.id,
            key: self.key,
            value,
        })
    }
}

/// A view result set. A missing or null `rows` field reads as no rows.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "V: Deserialize<'de>"))]
pub struct ViewResponse<V> {
    #[serde(default)]
    pub total_rows: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default, deserialize_with = "rows_or_empty")]
    pub rows: Vec<Row<V>>,
}

impl<V> ViewResponse<V> {
    pub fn empty() -> Self {
        Self {
            total_rows: None,
            offset: None,
            rows: Vec::new(),
        }
    }

    pub fn from_rows(rows: Vec<Row<V>>) -> Self {
        Self {
            total_rows: None,
            offset: None,
            rows,
        }
    }
}

impl ViewResponse<Value> {
    /// Decodes every row, failing on the first malformed one.
    pub fn decode<V: DeserializeOwned>(self) -> Result<ViewResponse<V>, FeedError> {
        let rows = self
            .rows
            .into_iter()
            .map(Row::decode)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ViewResponse {
            total_rows: self.total_rows,
            offset: self.offset,
            rows,
        })
    }
}

fn rows_or_empty<'de, D, V>(deserializer: D) -> Result<Vec<Row<V>>, D::Error>
where
    D: serde::Deserializer<'de>,
    V: Deserialize<'de>,
{
    Ok(Option::<Vec<Row<V>>>::deserialize(deserializer)?.unwrap_or_default())
}
