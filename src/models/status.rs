use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Twitter's `created_at` layout, e.g. `Wed Aug 27 13:08:45 +0000 2008`.
const TWITTER_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// A stored status document (`type == "TWITTER_STATUS"`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub text: String,
    pub created_at: Option<String>,
    pub lang: Option<String>,
    pub retweet_count: Option<u64>,
    pub favorite_count: Option<u64>,
    pub retweeted_status_id: Option<String>,
    pub in_reply_to_screen_name: Option<String>,
    pub coordinates: Option<Vec<f64>>,
    /// Remaining document fields (`_id`, `_rev`, `entities`, `place`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Status {
    /// Parses `created_at`; `None` when absent or not in Twitter's format.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?;
        DateTime::parse_from_str(raw, TWITTER_DATE_FORMAT)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn is_retweet(&self) -> bool {
        self.retweeted_status_id.is_some()
    }

    pub fn is_reply(&self) -> bool {
        self.in_reply_to_screen_name.is_some()
    }
}

/// A stored user document (`type == "TWITTER_USER"`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub screen_name: String,
    #[serde(default)]
    pub name: String,
    pub profile_image_url: Option<String>,
    pub followers_count: Option<u64>,
    pub location: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A status joined with its author, as handed to the update callback.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub status: Status,
    pub user: User,
}

impl std::fmt::Display for StatusUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}: {}", self.user.screen_name, self.status.text)
    }
}
