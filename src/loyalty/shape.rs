use crate::loyalty::BaselineTracker;
use crate::pose::{Landmark, LandmarkIndex, Pose};

/// 1フレーム分の判定用形状
///
/// 両腰が見えないフレームでは構築できない（姿勢未検出扱い）。
/// 四肢のランドマークは可視度が足りなければNoneのまま保持し、
/// 判定側で欠損として扱う。
#[derive(Debug, Clone, Copy)]
pub struct PoseShape {
    pub left_shoulder: Option<Landmark>,
    pub right_shoulder: Option<Landmark>,
    pub left_wrist: Option<Landmark>,
    pub right_wrist: Option<Landmark>,
    /// 左右腰の中点Y座標
    pub hip_center_y: f32,
    /// 平滑化された基準腰高さ
    pub baseline_hip_y: f32,
}

impl PoseShape {
    /// Poseから判定用形状を抽出し、基準値を前進させる
    ///
    /// 両腰が有効な場合のみ基準値が更新される。
    /// 腰欠損フレームは基準値に影響を与えない。
    pub fn extract(
        pose: &Pose,
        baseline: &mut BaselineTracker,
        visibility_threshold: f32,
    ) -> Option<Self> {
        let left_hip = pose.get(LandmarkIndex::LeftHip);
        let right_hip = pose.get(LandmarkIndex::RightHip);

        if !left_hip.is_valid(visibility_threshold) || !right_hip.is_valid(visibility_threshold) {
            return None;
        }

        let hip_center_y = (left_hip.y + right_hip.y) / 2.0;
        let baseline_hip_y = baseline.update(hip_center_y);

        let pick = |index: LandmarkIndex| -> Option<Landmark> {
            let lm = pose.get(index);
            if lm.is_valid(visibility_threshold) {
                Some(*lm)
            } else {
                None
            }
        };

        Some(Self {
            left_shoulder: pick(LandmarkIndex::LeftShoulder),
            right_shoulder: pick(LandmarkIndex::RightShoulder),
            left_wrist: pick(LandmarkIndex::LeftWrist),
            right_wrist: pick(LandmarkIndex::RightWrist),
            hip_center_y,
            baseline_hip_y,
        })
    }
}
