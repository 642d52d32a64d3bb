//! RL Shooter headless runner
//!
//! Plays episodes with scripted enemies against the player autopilot and keeps
//! the high score file up to date.
//!
//! Usage: `rl-shooter [SETTINGS_JSON] [EPISODES]`

use std::time::{SystemTime, UNIX_EPOCH};

use rl_shooter::highscores::HIGH_SCORE_FILE;
use rl_shooter::policy::player_autopilot;
use rl_shooter::{ChasePolicy, EnvSettings, HighScore, ShooterEnv};

const DEFAULT_EPISODES: u32 = 3;

fn main() {
    env_logger::init();
    log::info!("RL Shooter (headless) starting...");

    if let Err(err) = run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);

    let settings = match args.next() {
        Some(path) => EnvSettings::load(&path)?,
        None => EnvSettings::default(),
    };
    let episodes = match args.next() {
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|err| format!("invalid episode count `{raw}`: {err}"))?,
        None => DEFAULT_EPISODES,
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Game initialized with seed: {}", seed);

    let mut env = ShooterEnv::new(settings, seed)?;
    let mut policy = ChasePolicy::default();
    let mut high_score = HighScore::load(HIGH_SCORE_FILE);

    for episode in 0..episodes {
        let episode_seed = seed.wrapping_add(u64::from(episode));
        let summary = env.run_episode(Some(episode_seed), &mut policy, player_autopilot)?;

        log::info!(
            "Episode {} finished: reward {:.2}, score {}, level {}",
            episode + 1,
            summary.total_reward,
            summary.score,
            summary.level
        );
        println!("{}", serde_json::to_string(&summary)?);

        if let Err(err) = high_score.submit(summary.score) {
            log::warn!(
                "Could not save high score to {}: {}",
                high_score.path().display(),
                err
            );
        }
    }

    log::info!("Best score: {}", high_score.best());
    Ok(())
}
