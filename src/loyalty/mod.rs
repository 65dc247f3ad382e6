pub mod baseline;
pub mod celebration;
pub mod mood;
pub mod score;
pub mod session;
pub mod shape;

pub use baseline::BaselineTracker;
pub use celebration::CelebrationDetector;
pub use mood::{Mood, MoodTracker};
pub use score::{ScoreEngine, MAX_SCORE};
pub use session::{FrameUpdate, LoyaltySession, Status};
pub use shape::PoseShape;
