use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::{Category, HandStatus};
use crate::player::{GameOption, Player, PlayerId, PlayerKind};

/// One seat as it stood when the round was resolved.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatRecord {
    /// Player identifier
    pub id: PlayerId,
    /// Human (with admin flag) or computer
    pub kind: PlayerKind,
    /// The option the player took, if any
    pub action: Option<GameOption>,
    /// Final hand, in display order
    pub cards: Vec<Card>,
    /// Classification computed during resolution
    #[serde(default)]
    pub category: Option<Category>,
    /// WINNER / LOSER / undecided
    pub status: HandStatus,
}

impl SeatRecord {
    pub fn from_player(player: &Player) -> Self {
        Self {
            id: player.id().clone(),
            kind: player.kind(),
            action: player.last_action(),
            cards: player.hand().cards(),
            category: player.hand().cached_classification(),
            status: player.hand().status(),
        }
    }
}

/// Summary of one resolved round, written as one JSONL line.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Unique identifier for this round (format: YYYYMMDD-NNNNNN)
    pub round_id: String,
    /// Deck seed, when the round used a seeded deck
    pub seed: Option<u64>,
    /// Seats in table order
    pub seats: Vec<SeatRecord>,
    /// Ids of every player marked WINNER
    pub winners: Vec<PlayerId>,
    /// Timestamp when the round was recorded (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl RoundRecord {
    pub fn capture(round_id: String, seed: Option<u64>, players: &[Player]) -> Self {
        let seats: Vec<SeatRecord> = players.iter().map(SeatRecord::from_player).collect();
        let winners = seats
            .iter()
            .filter(|s| s.status == HandStatus::Winner)
            .map(|s| s.id.clone())
            .collect();
        Self {
            round_id,
            seed,
            seats,
            winners,
            ts: None,
        }
    }
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends [`RoundRecord`]s to a JSONL file.
pub struct RoundLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl RoundLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_round_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
