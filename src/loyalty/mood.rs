use crate::config::MoodConfig;

/// 表示対象の気分状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mood {
    /// 初期状態・どちらでもない
    #[default]
    None,
    Smile,
    Angry,
}

/// スコア列から気分状態を決める状態機械
///
/// 2つの方式を1つの状態機械の設定として扱う:
/// - 即時方式 (require_dwell = false): 毎フレーム閾値で再評価
/// - 滞留方式 (require_dwell = true): 高域・低域に一定時間とどまった
///   場合のみ遷移。デッドゾーン（閾値間）ではタイマーを捨てて
///   現在の気分を保持する（自動でNoneには戻らない）
///
/// 遷移はエッジ検出: 同じ気分への再突入は変化を報告しない。
pub struct MoodTracker {
    require_dwell: bool,
    high_threshold: u32,
    low_threshold: u32,
    high_duration_ms: f64,
    low_duration_ms: f64,
    current: Mood,
    high_start_ms: Option<f64>,
    low_start_ms: Option<f64>,
}

impl MoodTracker {
    pub fn from_config(config: &MoodConfig) -> Self {
        Self {
            require_dwell: config.require_dwell,
            high_threshold: config.high_threshold,
            low_threshold: config.low_threshold,
            high_duration_ms: config.high_duration_ms as f64,
            low_duration_ms: config.low_duration_ms as f64,
            current: Mood::None,
            high_start_ms: None,
            low_start_ms: None,
        }
    }

    pub fn current(&self) -> Mood {
        self.current
    }

    /// 新しいスコアと現在時刻（ミリ秒）で状態を更新する
    ///
    /// 気分が変化したフレームでのみ Some(新しい気分) を返す。
    pub fn update(&mut self, score: u32, now_ms: f64) -> Option<Mood> {
        if !self.require_dwell {
            return self.update_instant(score);
        }
        self.update_dwell(score, now_ms)
    }

    fn update_instant(&mut self, score: u32) -> Option<Mood> {
        let target = if score >= self.high_threshold {
            Mood::Smile
        } else if score <= self.low_threshold {
            Mood::Angry
        } else {
            Mood::None
        };
        self.transition(target)
    }

    fn update_dwell(&mut self, score: u32, now_ms: f64) -> Option<Mood> {
        if score >= self.high_threshold {
            self.low_start_ms = None;
            let start = *self.high_start_ms.get_or_insert(now_ms);
            if now_ms - start >= self.high_duration_ms {
                return self.transition(Mood::Smile);
            }
            None
        } else if score <= self.low_threshold {
            self.high_start_ms = None;
            let start = *self.low_start_ms.get_or_insert(now_ms);
            if now_ms - start >= self.low_duration_ms {
                return self.transition(Mood::Angry);
            }
            None
        } else {
            // デッドゾーン: タイマーを捨てて気分は保持
            self.high_start_ms = None;
            self.low_start_ms = None;
            None
        }
    }

    fn transition(&mut self, mood: Mood) -> Option<Mood> {
        if mood == self.current {
            return None;
        }
        self.current = mood;
        Some(mood)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant_tracker() -> MoodTracker {
        MoodTracker::from_config(&MoodConfig::instantaneous())
    }

    fn dwell_tracker() -> MoodTracker {
        MoodTracker::from_config(&MoodConfig::default())
    }

    // --- 即時方式 ---

    #[test]
    fn test_instant_initial_score_is_angry() {
        let mut tracker = instant_tracker();
        // スコア0は低域 → 初回フレームでAngryへ遷移
        assert_eq!(tracker.update(0, 0.0), Some(Mood::Angry));
        assert_eq!(tracker.current(), Mood::Angry);
    }

    #[test]
    fn test_instant_full_score_is_smile() {
        let mut tracker = instant_tracker();
        assert_eq!(tracker.update(100, 0.0), Some(Mood::Smile));
    }

    #[test]
    fn test_instant_middle_band_is_none() {
        let mut tracker = instant_tracker();
        tracker.update(100, 0.0);
        assert_eq!(tracker.update(90, 0.0), Some(Mood::None));
        // 81〜99はどちらでもない
        assert_eq!(tracker.update(85, 0.0), None);
    }

    #[test]
    fn test_instant_no_refire_on_same_mood() {
        let mut tracker = instant_tracker();
        assert_eq!(tracker.update(100, 0.0), Some(Mood::Smile));
        for _ in 0..10 {
            assert_eq!(tracker.update(100, 0.0), None);
        }
        assert_eq!(tracker.current(), Mood::Smile);
    }

    // --- 滞留方式 ---

    #[test]
    fn test_dwell_high_requires_full_duration() {
        let mut tracker = dwell_tracker();
        assert_eq!(tracker.update(90, 0.0), None);
        // 9999msでは未遷移
        assert_eq!(tracker.update(90, 9999.0), None);
        assert_eq!(tracker.current(), Mood::None);
        // 10000msちょうどで遷移
        assert_eq!(tracker.update(90, 10000.0), Some(Mood::Smile));
    }

    #[test]
    fn test_dwell_low_requires_full_duration() {
        let mut tracker = dwell_tracker();
        assert_eq!(tracker.update(10, 0.0), None);
        assert_eq!(tracker.update(10, 4999.0), None);
        assert_eq!(tracker.update(10, 5000.0), Some(Mood::Angry));
    }

    #[test]
    fn test_dwell_dead_zone_resets_timer() {
        let mut tracker = dwell_tracker();
        tracker.update(90, 0.0);
        tracker.update(90, 8000.0);
        // 1フレームだけデッドゾーンに落ちるとタイマーが捨てられる
        tracker.update(50, 9000.0);
        assert_eq!(tracker.update(90, 10000.0), None);
        // 新たに10秒必要
        assert_eq!(tracker.update(90, 19999.0), None);
        assert_eq!(tracker.update(90, 20000.0), Some(Mood::Smile));
    }

    #[test]
    fn test_dwell_dead_zone_keeps_mood() {
        let mut tracker = dwell_tracker();
        tracker.update(90, 0.0);
        assert_eq!(tracker.update(90, 10000.0), Some(Mood::Smile));
        // デッドゾーンに入っても気分は保持（Noneへ戻らない）
        assert_eq!(tracker.update(50, 11000.0), None);
        assert_eq!(tracker.current(), Mood::Smile);
    }

    #[test]
    fn test_dwell_band_switch_clears_opposite_timer() {
        let mut tracker = dwell_tracker();
        tracker.update(90, 0.0);
        assert!(tracker.high_start_ms.is_some());

        // 高域→低域: 高域タイマーが捨てられ低域タイマーが始まる
        tracker.update(10, 1000.0);
        assert!(tracker.high_start_ms.is_none());
        assert!(tracker.low_start_ms.is_some());

        // 低域開始は1000ms: 5999msでは未遷移、6000msで遷移
        assert_eq!(tracker.update(10, 5999.0), None);
        assert_eq!(tracker.update(10, 6000.0), Some(Mood::Angry));
    }

    #[test]
    fn test_dwell_at_most_one_timer_active() {
        let mut tracker = dwell_tracker();
        for (score, t) in [(90u32, 0.0f64), (10, 100.0), (50, 200.0), (90, 300.0)] {
            tracker.update(score, t);
            assert!(
                !(tracker.high_start_ms.is_some() && tracker.low_start_ms.is_some()),
                "both timers active at t={}",
                t
            );
        }
    }

    #[test]
    fn test_dwell_no_refire_on_same_mood() {
        let mut tracker = dwell_tracker();
        tracker.update(90, 0.0);
        assert_eq!(tracker.update(90, 10000.0), Some(Mood::Smile));
        // 高域に留まり続けても再発火しない
        assert_eq!(tracker.update(90, 20000.0), None);
        assert_eq!(tracker.update(100, 30000.0), None);
    }

    #[test]
    fn test_dwell_smile_then_angry_cycle() {
        let mut tracker = dwell_tracker();
        tracker.update(100, 0.0);
        assert_eq!(tracker.update(100, 10000.0), Some(Mood::Smile));

        tracker.update(5, 11000.0);
        assert_eq!(tracker.update(5, 16000.0), Some(Mood::Angry));
        assert_eq!(tracker.current(), Mood::Angry);
    }

    #[test]
    fn test_dwell_threshold_boundaries_inclusive() {
        let mut tracker = dwell_tracker();
        // score=80は高域、score=20は低域（どちらも境界含む）
        tracker.update(80, 0.0);
        assert_eq!(tracker.update(80, 10000.0), Some(Mood::Smile));

        tracker.update(20, 11000.0);
        assert_eq!(tracker.update(20, 16000.0), Some(Mood::Angry));
    }
}
