use std::fmt;

use crate::config::Config;
use crate::loyalty::{
    BaselineTracker, CelebrationDetector, Mood, MoodTracker, PoseShape, ScoreEngine,
};
use crate::pose::Pose;

/// フレームごとの判定結果分類（表示用文字列つき）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// 姿勢未検出（体が映っていない・腰が見えない）
    NotDetected,
    /// 検出中、祝賀ポーズ未達成
    Tracking,
    /// 祝賀ポーズ達成フレーム
    Celebrating,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Status::NotDetected => "人体未検出: 画面中央に立ってください",
            Status::Tracking => "継続中: 両手を肩より上げてジャンプ",
            Status::Celebrating => "動作達成! スコア満点回復",
        };
        write!(f, "{}", text)
    }
}

/// 1フレーム処理の出力（表示側コラボレータへ渡す値）
#[derive(Debug, Clone, Copy)]
pub struct FrameUpdate {
    pub score: u32,
    pub celebrating: bool,
    pub status: Status,
    /// 現在の気分
    pub mood: Mood,
    /// このフレームで気分が変化した場合のみSome（エッジ検出）
    pub mood_change: Option<Mood>,
}

/// 1検出セッション分の状態を持つパイプライン
///
/// フレーム到着ごとに同期的に1回呼ばれる前提:
/// 形状抽出（基準値更新）→ 祝賀判定 → スコア遷移 → 気分更新。
/// フレーム順が契約であり、並べ替え・並行アクセスは想定しない。
pub struct LoyaltySession {
    visibility_threshold: f32,
    baseline: BaselineTracker,
    detector: CelebrationDetector,
    score_engine: ScoreEngine,
    mood: MoodTracker,
    score: u32,
}

impl LoyaltySession {
    pub fn from_config(config: &Config) -> Self {
        Self {
            visibility_threshold: config.detector.visibility_threshold,
            baseline: BaselineTracker::from_config(&config.detector),
            detector: CelebrationDetector::from_config(&config.detector),
            score_engine: ScoreEngine::from_config(&config.score),
            mood: MoodTracker::from_config(&config.mood),
            score: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn mood(&self) -> Mood {
        self.mood.current()
    }

    /// 1観測フレームを処理する
    ///
    /// 姿勢未検出フレームでもスコア遷移（減衰）と気分更新は必ず行う。
    pub fn process_frame(&mut self, pose: Option<&Pose>, now_ms: f64) -> FrameUpdate {
        let shape = pose
            .and_then(|p| PoseShape::extract(p, &mut self.baseline, self.visibility_threshold));

        let celebrating = self.detector.detect(shape.as_ref());
        self.score = self.score_engine.next(self.score, celebrating);
        let mood_change = self.mood.update(self.score, now_ms);

        let status = if shape.is_none() {
            Status::NotDetected
        } else if celebrating {
            Status::Celebrating
        } else {
            Status::Tracking
        };

        FrameUpdate {
            score: self.score,
            celebrating,
            status,
            mood: self.mood.current(),
            mood_change,
        }
    }
}
