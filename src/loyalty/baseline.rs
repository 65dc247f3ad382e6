use crate::config::DetectorConfig;

/// 腰の基準高さを追跡するEMAフィルタ
///
/// ジャンプ検出の基準となる腰の高さをゆっくり平滑化する。
/// 立ち位置のずれやカメラの再設置には追従しつつ、
/// 瞬間的なジャンプは基準から外れて検出可能になる。
pub struct BaselineTracker {
    baseline: Option<f32>,
    frame_count: u32,
    warmup_frames: u32,
    warmup_alpha: f32,
    steady_alpha: f32,
}

impl BaselineTracker {
    pub fn new(warmup_frames: u32, warmup_alpha: f32, steady_alpha: f32) -> Self {
        Self {
            baseline: None,
            frame_count: 0,
            warmup_frames,
            warmup_alpha,
            steady_alpha,
        }
    }

    pub fn from_config(config: &DetectorConfig) -> Self {
        Self::new(
            config.warmup_frames,
            config.warmup_alpha,
            config.steady_alpha,
        )
    }

    /// 腰中点のY座標で基準値を更新し、現在の基準値を返す
    ///
    /// 初回呼び出しは平滑化なしでそのまま基準値になる。
    /// 以降はEMA: ウォームアップ中は速く収束、その後はゆっくりドリフト。
    pub fn update(&mut self, hip_center_y: f32) -> f32 {
        self.frame_count += 1;

        let baseline = match self.baseline {
            None => hip_center_y,
            Some(prev) => {
                let alpha = if self.frame_count < self.warmup_frames {
                    self.warmup_alpha
                } else {
                    self.steady_alpha
                };
                prev * (1.0 - alpha) + hip_center_y * alpha
            }
        };

        self.baseline = Some(baseline);
        baseline
    }

    /// 現在の基準値（初回update前はNone）
    pub fn current(&self) -> Option<f32> {
        self.baseline
    }
}
