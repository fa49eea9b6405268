use super::error::FeedError;
use serde_json::Value;
use std::fmt;

/// Width of the zero-padded keys emitted by the `get_tweets` view.
///
/// Status ids are 64-bit integers; the largest (2^63) has 19 digits. The view
/// pads every id to this width so string ordering matches numeric ordering.
pub const KEY_WIDTH: usize = 19;

/// Pagination key over the status keyspace.
///
/// Always a non-empty string of ASCII digits. Arithmetic is done digit by digit
/// because ids exceed the integer precision of the JSON numbers they travel in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyCursor(String);

impl KeyCursor {
    /// Validates a digit string as a key.
    pub fn parse(key: &str) -> Result<Self, FeedError> {
        if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FeedError::InvalidKey(format!(
                "expected a non-empty digit string, got {key:?}"
            )));
        }
        Ok(Self(key.to_string()))
    }

    /// Left-pads a status id to [`KEY_WIDTH`] digits, matching the view's key format.
    pub fn padded(id: &str) -> Result<Self, FeedError> {
        let key = Self::parse(id)?;
        if key.0.len() >= KEY_WIDTH {
            return Ok(key);
        }
        Ok(Self(format!("{:0>width$}", key.0, width = KEY_WIDTH)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the key one greater than this one, keeping its digit count.
    ///
    /// Carries from the least significant digit but never past the most
    /// significant one: a leading 9 is overwritten with 1 instead of growing the
    /// string, so `"999"` wraps to `"100"`. Use [`checked_next`](Self::checked_next)
    /// when a wrap must be detected.
    pub fn next(&self) -> Self {
        let mut digits = self.0.as_bytes().to_vec();
        let mut i = digits.len() - 1;
        while digits[i] == b'9' && i > 0 {
            digits[i] = b'0';
            i -= 1;
        }
        digits[i] = if digits[i] == b'9' { b'1' } else { digits[i] + 1 };
        Self(digits.into_iter().map(char::from).collect())
    }

    /// Like [`next`](Self::next), but fails instead of wrapping an all-nines key.
    pub fn checked_next(&self) -> Result<Self, FeedError> {
        if self.is_max() {
            return Err(FeedError::KeyOverflow(format!(
                "{} has no successor at width {}",
                self.0,
                self.0.len()
            )));
        }
        Ok(self.next())
    }

    fn is_max(&self) -> bool {
        self.0.bytes().all(|b| b == b'9')
    }
}

impl fmt::Display for KeyCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for KeyCursor {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Row keys arrive either as JSON strings (the padded view keys) or as plain numbers.
impl TryFrom<&Value> for KeyCursor {
    type Error = FeedError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Number(n) if n.is_u64() => Self::parse(&n.to_string()),
            other => Err(FeedError::InvalidKey(format!(
                "row key is not a digit string: {other}"
            ))),
        }
    }
}
