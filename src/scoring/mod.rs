pub mod engagement;
pub mod score;

pub use engagement::{engagement_rate, item_engagement_rate};
pub use score::{NormalizedWeights, ScoreCalculator, SimpleWeights};
