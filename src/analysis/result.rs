// src/analysis/result.rs
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Field-level default: `null` or a value of the wrong type reads as
/// `T::default()` instead of failing the whole record.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Per-frame verdict inside a gender analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameGender {
    #[serde(deserialize_with = "lenient")]
    pub gender: String,
    #[serde(deserialize_with = "lenient")]
    pub confidence: f64,
}

/// Response of `/analyze/gender_frames`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenderResult {
    #[serde(deserialize_with = "lenient")]
    pub gender: String,
    #[serde(deserialize_with = "lenient")]
    pub confidence: f64,
    #[serde(deserialize_with = "lenient")]
    pub frame_genders: Option<Vec<FrameGender>>,
}

impl GenderResult {
    /// "uncertain" reads as a word, everything else is shouted.
    pub fn display_gender(&self) -> String {
        display_gender(&self.gender)
    }

    pub fn display_confidence(&self) -> String {
        percent(self.confidence)
    }

    /// Frames if the backend sent any; an empty list counts as present.
    pub fn frames(&self) -> Option<&[FrameGender]> {
        self.frame_genders.as_deref()
    }
}

pub fn display_gender(gender: &str) -> String {
    if gender == "uncertain" {
        "Uncertain".to_string()
    } else {
        gender.to_uppercase()
    }
}

/// Fraction in [0, 1] rendered as a one-decimal percentage.
pub fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sentiment {
    #[serde(deserialize_with = "lenient")]
    pub positive: f64,
    #[serde(deserialize_with = "lenient")]
    pub negative: f64,
    #[serde(deserialize_with = "lenient")]
    pub neutral: f64,
}

/// Trait scores arrive either as a fraction or as a free-form label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitValue {
    Score(f64),
    Label(String),
    Other(Value),
}

impl TraitValue {
    pub fn score(&self) -> Option<f64> {
        match self {
            TraitValue::Score(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for TraitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraitValue::Score(value) => write!(f, "{:.0}%", value * 100.0),
            TraitValue::Label(label) => f.write_str(label),
            TraitValue::Other(value) => write!(f, "{}", value),
        }
    }
}

/// Counters are sent as numbers by some backends and as preformatted
/// strings ("12.3K") by others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Count {
    Number(f64),
    Text(String),
}

impl Count {
    /// Falsy values (0, "") are treated as absent when choosing a fallback.
    fn is_truthy(&self) -> bool {
        match self {
            Count::Number(n) => *n != 0.0,
            Count::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Count::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            Count::Number(n) => write!(f, "{}", n),
            Count::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileStats {
    pub followers: Option<Count>,
    pub following: Option<Count>,
}

/// Response of `/analyze/twitter`. Everything is optional; `raw` keeps the
/// whole payload for the fallback JSON view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TwitterResult {
    pub username: Option<String>,
    pub bio: Option<String>,
    pub sentiment: Option<Sentiment>,
    pub personality_traits: Option<Vec<(String, TraitValue)>>,
    pub sample_tweets: Option<Vec<String>>,
    pub followers: Option<Count>,
    pub following: Option<Count>,
    pub tweets_count: Option<Count>,
    pub stats: Option<ProfileStats>,
    pub raw: Value,
}

impl TwitterResult {
    /// Builds the typed view field by field so one malformed field never
    /// discards the rest of the payload.
    pub fn from_value(raw: Value) -> Self {
        let object = raw.as_object().cloned().unwrap_or_default();

        Self {
            username: non_empty_string(&object, "username"),
            bio: non_empty_string(&object, "bio"),
            sentiment: field(&object, "sentiment"),
            personality_traits: object.get("personality_traits")
                .and_then(Value::as_object)
                .map(|traits| {
                    traits.iter()
                        .filter_map(|(name, value)| {
                            serde_json::from_value(value.clone()).ok().map(|v| (name.clone(), v))
                        })
                        .collect()
                }),
            sample_tweets: object.get("sample_tweets")
                .and_then(Value::as_array)
                .map(|tweets| {
                    tweets.iter()
                        .map(|tweet| match tweet {
                            Value::String(text) => text.clone(),
                            other => other.to_string(),
                        })
                        .collect()
                }),
            followers: field(&object, "followers"),
            following: field(&object, "following"),
            tweets_count: field(&object, "tweets_count"),
            stats: field(&object, "stats"),
            raw,
        }
    }

    pub fn followers_display(&self) -> String {
        first_truthy(&self.followers, self.stats.as_ref().and_then(|s| s.followers.as_ref()))
            .map(|c| c.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn following_display(&self) -> String {
        first_truthy(&self.following, self.stats.as_ref().and_then(|s| s.following.as_ref()))
            .map(|c| c.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn tweets_display(&self) -> String {
        match self.tweets_count.as_ref().filter(|c| c.is_truthy()) {
            Some(count) => count.to_string(),
            None => self.tweets().len().to_string(),
        }
    }

    /// Stats card is shown when any top-level counter is set.
    pub fn has_profile_stats(&self) -> bool {
        [&self.followers, &self.following, &self.tweets_count]
            .into_iter()
            .any(|count| matches!(count, Some(c) if c.is_truthy()))
    }

    pub fn tweets(&self) -> &[String] {
        self.sample_tweets.as_deref().unwrap_or(&[])
    }

    /// Nothing structured to show: fall back to the raw JSON.
    pub fn needs_raw_view(&self) -> bool {
        self.personality_traits.is_none() && self.sentiment.is_none() && self.sample_tweets.is_none()
    }

    pub fn is_limited(&self) -> bool {
        self.bio.is_none() && self.tweets().is_empty() && self.sentiment.is_none()
    }

    pub fn raw_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.raw).unwrap_or_else(|_| self.raw.to_string())
    }
}

fn field<T: serde::de::DeserializeOwned>(object: &Map<String, Value>, key: &str) -> Option<T> {
    object.get(key)
        .filter(|value| !value.is_null())
        .and_then(|value| serde_json::from_value(value.clone()).ok())
}

fn non_empty_string(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn first_truthy<'a>(primary: &'a Option<Count>, fallback: Option<&'a Count>) -> Option<&'a Count> {
    primary.as_ref()
        .filter(|c| c.is_truthy())
        .or(fallback.filter(|c| c.is_truthy()))
}
