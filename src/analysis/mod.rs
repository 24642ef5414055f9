// src/analysis/mod.rs
pub mod result;
pub mod sentiment;

// Re-export commonly used types
pub use result::{
    FrameGender,
    GenderResult,
    Sentiment,
    TraitValue,
    TwitterResult,
};
pub use sentiment::{SentimentBreakdown, SentimentCategory, SentimentSlice};
