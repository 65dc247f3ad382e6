use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub score: ScoreConfig,
    #[serde(default)]
    pub mood: MoodConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// デモループの目標FPS
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DetectorConfig {
    /// ランドマーク可視度の閾値
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f32,
    /// ジャンプ判定の腰上昇量（正規化座標）
    #[serde(default = "default_jump_delta")]
    pub jump_delta: f32,
    /// 基準値ウォームアップのフレーム数
    #[serde(default = "default_warmup_frames")]
    pub warmup_frames: u32,
    /// ウォームアップ中のEMA係数（速い収束）
    #[serde(default = "default_warmup_alpha")]
    pub warmup_alpha: f32,
    /// 定常時のEMA係数（遅いドリフト）
    #[serde(default = "default_steady_alpha")]
    pub steady_alpha: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScoreConfig {
    /// 1フレームあたりの減衰量
    #[serde(default = "default_decay_per_tick")]
    pub decay_per_tick: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MoodConfig {
    /// 滞留方式を使うか（falseなら即時方式）
    #[serde(default = "default_require_dwell")]
    pub require_dwell: bool,
    /// 高域閾値（スコアがこれ以上でSmile側）
    #[serde(default = "default_high_threshold")]
    pub high_threshold: u32,
    /// 低域閾値（スコアがこれ以下でAngry側）
    #[serde(default = "default_low_threshold")]
    pub low_threshold: u32,
    /// Smile遷移に必要な高域滞留時間（ミリ秒）
    #[serde(default = "default_high_duration_ms")]
    pub high_duration_ms: u64,
    /// Angry遷移に必要な低域滞留時間（ミリ秒）
    #[serde(default = "default_low_duration_ms")]
    pub low_duration_ms: u64,
}

fn default_target_fps() -> u32 { 30 }
fn default_visibility_threshold() -> f32 { 0.5 }
fn default_jump_delta() -> f32 { 0.05 }
fn default_warmup_frames() -> u32 { 45 }
fn default_warmup_alpha() -> f32 { 0.08 }
fn default_steady_alpha() -> f32 { 0.02 }
fn default_decay_per_tick() -> u32 { 3 }
fn default_require_dwell() -> bool { true }
fn default_high_threshold() -> u32 { 80 }
fn default_low_threshold() -> u32 { 20 }
fn default_high_duration_ms() -> u64 { 10_000 }
fn default_low_duration_ms() -> u64 { 5_000 }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            target_fps: default_target_fps(),
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: default_visibility_threshold(),
            jump_delta: default_jump_delta(),
            warmup_frames: default_warmup_frames(),
            warmup_alpha: default_warmup_alpha(),
            steady_alpha: default_steady_alpha(),
        }
    }
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            decay_per_tick: default_decay_per_tick(),
        }
    }
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            require_dwell: default_require_dwell(),
            high_threshold: default_high_threshold(),
            low_threshold: default_low_threshold(),
            high_duration_ms: default_high_duration_ms(),
            low_duration_ms: default_low_duration_ms(),
        }
    }
}

impl MoodConfig {
    /// 即時方式のプリセット（満点でSmile、80以下でAngry）
    pub fn instantaneous() -> Self {
        Self {
            require_dwell: false,
            high_threshold: 100,
            low_threshold: 80,
            ..Self::default()
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// 設定ファイルがなければデフォルトを返す
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_default()
    }
}
