use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::game::{GameResult, Player};

/// Cumulative round results. Counters only ever grow, except through an
/// explicit reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    #[serde(rename = "X")]
    pub x: u32,
    #[serde(rename = "O")]
    pub o: u32,
    pub draws: u32,
}

impl Scores {
    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win(win) => match win.player {
                Player::X => self.x += 1,
                Player::O => self.o += 1,
            },
            GameResult::Draw => self.draws += 1,
        }
    }
}

const SCORES_FILE: &str = "ttt_scores.json";

/// Persists `Scores` as a single JSON file. Nothing here is fatal: a missing
/// or unreadable snapshot falls back to zeroed counters, and a failed write
/// only loses durability, not the in-memory scores.
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn from_data_dir() -> Self {
        let dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: dir.join("tictactoe").join(SCORES_FILE),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Scores {
        match self.try_load() {
            Ok(Some(scores)) => scores,
            Ok(None) => Scores::default(),
            Err(err) => {
                warn!("failed to load scores, starting from zero: {err:#}");
                Scores::default()
            }
        }
    }

    pub fn save(&self, scores: &Scores) {
        if let Err(err) = self.try_save(scores) {
            warn!("failed to save scores: {err:#}");
        }
    }

    pub fn clear(&self) {
        if self.path.exists()
            && let Err(err) = fs::remove_file(&self.path)
        {
            warn!("failed to clear saved scores: {err}");
        }
    }

    fn try_load(&self) -> Result<Option<Scores>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let scores = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(Some(scores))
    }

    fn try_save(&self, scores: &Scores) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&self.path, serde_json::to_string(scores)?)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}
