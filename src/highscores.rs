//! High score persistence
//!
//! A single best score stored as a plain-text integer. Read failures fall back
//! to zero so a missing or damaged file never blocks a game from starting.

use std::io;
use std::path::{Path, PathBuf};

/// Default file name, relative to the working directory
pub const HIGH_SCORE_FILE: &str = "highscore.txt";

/// Best score seen so far, bound to the file it lives in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScore {
    path: PathBuf,
    best: u64,
}

impl HighScore {
    /// Read the best score from `path` (0 if the file is missing or unparsable)
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let best = match std::fs::read_to_string(&path) {
            Ok(text) => text.trim().parse::<u64>().unwrap_or_else(|_| {
                log::warn!("Ignoring unparsable high score in {}", path.display());
                0
            }),
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    log::warn!("Could not read {}: {}", path.display(), err);
                }
                0
            }
        };
        log::info!("High score: {}", best);
        Self { path, best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if a score beats the stored best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record `score`; when it beats the best, persist it and return true
    pub fn submit(&mut self, score: u64) -> io::Result<bool> {
        if !self.qualifies(score) {
            return Ok(false);
        }
        self.best = score;
        self.save()?;
        log::info!("New high score: {}", score);
        Ok(true)
    }

    /// Write the best score back to disk
    pub fn save(&self) -> io::Result<()> {
        std::fs::write(&self.path, self.best.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rl_shooter_{}_{}", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_is_zero() {
        let scores = HighScore::load(temp_path("missing_highscore"));
        assert_eq!(scores.best(), 0);
    }

    #[test]
    fn test_garbage_file_is_zero() {
        let path = temp_path("garbage_highscore");
        std::fs::write(&path, "not a number").unwrap();
        assert_eq!(HighScore::load(&path).best(), 0);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_submit_persists_only_improvements() {
        let path = temp_path("submit_highscore");
        let _ = std::fs::remove_file(&path);

        let mut scores = HighScore::load(&path);
        assert!(scores.submit(150).unwrap());
        assert!(!scores.submit(100).unwrap());
        assert!(!scores.submit(150).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "150");

        let reloaded = HighScore::load(&path);
        assert_eq!(reloaded.best(), 150);
        assert!(reloaded.qualifies(151));
        let _ = std::fs::remove_file(&path);
    }
}
