use anyhow::Result;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use loyalty_meter::config::Config;
use loyalty_meter::loyalty::{FrameUpdate, LoyaltySession, Mood, MAX_SCORE};
use loyalty_meter::pose::{Landmark, LandmarkIndex, Pose};

const CONFIG_PATH: &str = "config.toml";

fn main() -> Result<()> {
    let config = Config::load_or_default(CONFIG_PATH);

    println!("=== Loyalty Meter - Console Demo ===");
    println!(
        "Detector: jump_delta={}, warmup_frames={}",
        config.detector.jump_delta, config.detector.warmup_frames
    );
    println!("Score: decay_per_tick={}", config.score.decay_per_tick);
    println!(
        "Mood: {} (high={}, low={})",
        if config.mood.require_dwell { "dwell" } else { "instant" },
        config.mood.high_threshold,
        config.mood.low_threshold
    );
    println!();
    println!("コマンド:");
    println!("  j     - 祝賀フレーム (両手上げ + ジャンプ)");
    println!("  i     - 待機フレーム (直立)");
    println!("  n     - 未検出フレーム");
    println!("  t     - テスト走行 (自動で60フレーム送信)");
    println!("  q     - 終了");
    println!();

    let mut session = LoyaltySession::from_config(&config);
    let started = Instant::now();
    let frame_duration = Duration::from_secs_f64(1.0 / config.app.target_fps as f64);

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        match input.trim() {
            "j" => {
                let update = session.process_frame(Some(&jumping_pose()), now_ms(started));
                print_update(&update);
            }
            "i" => {
                let update = session.process_frame(Some(&standing_pose()), now_ms(started));
                print_update(&update);
            }
            "n" => {
                let update = session.process_frame(None, now_ms(started));
                print_update(&update);
            }
            "t" => {
                println!("テスト走行中...");
                for frame in 0..60u32 {
                    // 45フレーム直立で基準値を作り、5フレーム祝賀、残り減衰
                    let pose = if (45..50).contains(&frame) {
                        jumping_pose()
                    } else {
                        standing_pose()
                    };
                    let update = session.process_frame(Some(&pose), now_ms(started));
                    if frame % 10 == 0 || update.celebrating || update.mood_change.is_some() {
                        print!("  frame {:2}: ", frame);
                        print_update(&update);
                    }
                    std::thread::sleep(frame_duration);
                }
                println!("テスト完了");
            }
            "q" => {
                println!("終了します");
                break;
            }
            "" => continue,
            other => {
                println!("不明なコマンド: {}", other);
            }
        }
    }

    Ok(())
}

fn now_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

fn print_update(update: &FrameUpdate) {
    println!(
        "{} {:3}  {}  気分: {}{}",
        score_bar(update.score),
        update.score,
        update.status,
        mood_label(update.mood),
        if update.mood_change.is_some() { " (変化!)" } else { "" }
    );
}

/// スコアのASCIIバー表示（20文字幅）
fn score_bar(score: u32) -> String {
    let filled = (score as usize * 20) / MAX_SCORE as usize;
    let mut bar = String::with_capacity(22);
    bar.push('[');
    for i in 0..20 {
        bar.push(if i < filled { '#' } else { '-' });
    }
    bar.push(']');
    bar
}

fn mood_label(mood: Mood) -> &'static str {
    match mood {
        Mood::Smile => "スマイル",
        Mood::Angry => "怒り",
        Mood::None => "なし",
    }
}

/// 直立姿勢の合成フレーム
fn standing_pose() -> Pose {
    synthetic_pose(0.68, 0.75)
}

/// 祝賀姿勢の合成フレーム（腰0.10上昇、手首は肩上）
fn jumping_pose() -> Pose {
    synthetic_pose(0.58, 0.2)
}

fn synthetic_pose(hip_y: f32, wrist_y: f32) -> Pose {
    let mut landmarks = [Landmark::default(); LandmarkIndex::COUNT];
    landmarks[LandmarkIndex::LeftShoulder as usize] = Landmark::new(0.3, 0.55, 0.9);
    landmarks[LandmarkIndex::RightShoulder as usize] = Landmark::new(0.7, 0.55, 0.9);
    landmarks[LandmarkIndex::LeftWrist as usize] = Landmark::new(0.3, wrist_y, 0.9);
    landmarks[LandmarkIndex::RightWrist as usize] = Landmark::new(0.7, wrist_y, 0.9);
    landmarks[LandmarkIndex::LeftHip as usize] = Landmark::new(0.4, hip_y, 0.9);
    landmarks[LandmarkIndex::RightHip as usize] = Landmark::new(0.6, hip_y, 0.9);
    Pose::new(landmarks)
}
