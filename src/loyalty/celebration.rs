use crate::config::DetectorConfig;
use crate::loyalty::PoseShape;

/// 祝賀ポーズ判定
///
/// 両手が肩より上 かつ 腰が基準値より一定以上高い（ジャンプ中）場合に
/// trueを返す純粋な述語。時間方向のデバウンスはここでは行わない
/// （スコア側の減衰が担当）。
pub struct CelebrationDetector {
    /// ジャンプ判定の腰上昇量（正規化座標）
    jump_delta: f32,
}

impl CelebrationDetector {
    pub fn new(jump_delta: f32) -> Self {
        Self { jump_delta }
    }

    pub fn from_config(config: &DetectorConfig) -> Self {
        Self::new(config.jump_delta)
    }

    /// 形状が欠損（姿勢未検出・四肢欠損）ならfalse
    pub fn detect(&self, shape: Option<&PoseShape>) -> bool {
        let shape = match shape {
            Some(s) => s,
            None => return false,
        };

        let (left_shoulder, right_shoulder, left_wrist, right_wrist) = match (
            shape.left_shoulder,
            shape.right_shoulder,
            shape.left_wrist,
            shape.right_wrist,
        ) {
            (Some(ls), Some(rs), Some(lw), Some(rw)) => (ls, rs, lw, rw),
            _ => return false,
        };

        // 画像Y座標は下方向が正: 「上」は小さい値
        let hands_up = left_wrist.y < left_shoulder.y && right_wrist.y < right_shoulder.y;
        let jumping = shape.hip_center_y < shape.baseline_hip_y - self.jump_delta;

        hands_up && jumping
    }
}

impl Default for CelebrationDetector {
    fn default() -> Self {
        Self::new(0.05)
    }
}
