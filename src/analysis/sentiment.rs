// src/analysis/sentiment.rs
use super::result::Sentiment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentCategory {
    Positive,
    Negative,
    Neutral,
}

impl SentimentCategory {
    /// Fixed display order; also the tie-break order for the dominant slice.
    pub const ALL: [SentimentCategory; 3] = [
        SentimentCategory::Positive,
        SentimentCategory::Negative,
        SentimentCategory::Neutral,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SentimentCategory::Positive => "Positive",
            SentimentCategory::Negative => "Negative",
            SentimentCategory::Neutral => "Neutral",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            SentimentCategory::Positive => "😀",
            SentimentCategory::Negative => "😡",
            SentimentCategory::Neutral => "😐",
        }
    }

    fn tone(&self) -> &'static str {
        match self {
            SentimentCategory::Positive => "an optimistic and uplifting tone",
            SentimentCategory::Negative => "emotional intensity or critical perspective",
            SentimentCategory::Neutral => "a balanced and neutral approach",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentSlice {
    pub category: SentimentCategory,
    /// Percentage, i.e. the backend fraction times 100.
    pub value: f64,
}

impl SentimentSlice {
    pub fn label(&self) -> String {
        format!("{:.1}%", self.value)
    }
}

/// Derived values behind the donut chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentBreakdown {
    pub slices: [SentimentSlice; 3],
}

impl SentimentBreakdown {
    pub fn from_sentiment(sentiment: Option<&Sentiment>) -> Self {
        let sentiment = sentiment.copied().unwrap_or_default();
        let value_of = |category: SentimentCategory| {
            let fraction = match category {
                SentimentCategory::Positive => sentiment.positive,
                SentimentCategory::Negative => sentiment.negative,
                SentimentCategory::Neutral => sentiment.neutral,
            };
            if fraction.is_finite() { fraction * 100.0 } else { 0.0 }
        };

        Self {
            slices: SentimentCategory::ALL.map(|category| SentimentSlice {
                category,
                value: value_of(category),
            }),
        }
    }

    /// Highest slice; on a tie the earlier category wins.
    pub fn dominant(&self) -> SentimentSlice {
        self.slices.iter()
            .skip(1)
            .fold(self.slices[0], |max, slice| if slice.value > max.value { *slice } else { max })
    }

    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value.max(0.0)).sum()
    }

    /// Share of the donut for each slice, as fractions summing to 1 (or all
    /// zero when there is nothing to draw).
    pub fn arc_fractions(&self) -> [f64; 3] {
        let total = self.total();
        if total <= 0.0 {
            return [0.0; 3];
        }
        self.slices.map(|s| s.value.max(0.0) / total)
    }

    pub fn insight(&self) -> String {
        let dominant = self.dominant();
        if dominant.value > 50.0 {
            format!(
                "Your content shows a strongly {} sentiment, indicating {}.",
                dominant.category.name().to_lowercase(),
                dominant.category.tone()
            )
        } else {
            "Your content shows a balanced mix of sentiments, indicating emotional versatility and nuanced expression.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentiment(positive: f64, negative: f64, neutral: f64) -> Sentiment {
        Sentiment { positive, negative, neutral }
    }

    #[test]
    fn test_positive_dominates() {
        let breakdown = SentimentBreakdown::from_sentiment(Some(&sentiment(0.7, 0.2, 0.1)));
        let dominant = breakdown.dominant();
        assert_eq!(dominant.category, SentimentCategory::Positive);
        assert_eq!(dominant.label(), "70.0%");
        assert_eq!(
            breakdown.insight(),
            "Your content shows a strongly positive sentiment, indicating an optimistic and uplifting tone."
        );
    }

    #[test]
    fn test_missing_sentiment_is_all_zero() {
        let breakdown = SentimentBreakdown::from_sentiment(None);
        assert!(breakdown.slices.iter().all(|s| s.value == 0.0));
        assert_eq!(breakdown.dominant().category, SentimentCategory::Positive);
        assert_eq!(breakdown.arc_fractions(), [0.0; 3]);
        assert!(breakdown.insight().contains("balanced mix"));
    }

    #[test]
    fn test_partial_sentiment_defaults_to_zero() {
        let partial: Sentiment = serde_json::from_str(r#"{"negative": 0.6}"#).unwrap();
        let breakdown = SentimentBreakdown::from_sentiment(Some(&partial));
        assert_eq!(breakdown.slices[0].value, 0.0);
        assert_eq!(breakdown.slices[2].value, 0.0);
        assert_eq!(breakdown.dominant().category, SentimentCategory::Negative);
        assert!(breakdown.insight().contains("emotional intensity"));
    }

    #[test]
    fn test_null_proportions_default_to_zero() {
        let partial: Sentiment =
            serde_json::from_str(r#"{"positive": null, "negative": "lots", "neutral": 0.8}"#).unwrap();
        let breakdown = SentimentBreakdown::from_sentiment(Some(&partial));
        assert_eq!(breakdown.slices[0].value, 0.0);
        assert_eq!(breakdown.slices[1].value, 0.0);
        assert_eq!(breakdown.dominant().category, SentimentCategory::Neutral);
        assert_eq!(breakdown.dominant().label(), "80.0%");
    }

    #[test]
    fn test_tie_goes_to_first_category() {
        let breakdown = SentimentBreakdown::from_sentiment(Some(&sentiment(0.1, 0.45, 0.45)));
        assert_eq!(breakdown.dominant().category, SentimentCategory::Negative);

        let breakdown = SentimentBreakdown::from_sentiment(Some(&sentiment(0.4, 0.2, 0.4)));
        assert_eq!(breakdown.dominant().category, SentimentCategory::Positive);
    }

    #[test]
    fn test_exactly_half_is_balanced() {
        let breakdown = SentimentBreakdown::from_sentiment(Some(&sentiment(0.25, 0.25, 0.5)));
        assert_eq!(breakdown.dominant().category, SentimentCategory::Neutral);
        assert!(breakdown.insight().starts_with("Your content shows a balanced mix"));
    }

    #[test]
    fn test_arc_fractions_normalise() {
        let breakdown = SentimentBreakdown::from_sentiment(Some(&sentiment(0.5, 0.25, 0.25)));
        let fractions = breakdown.arc_fractions();
        assert!((fractions.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!((fractions[0] - 0.5).abs() < 1e-9);
    }
}
