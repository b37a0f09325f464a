use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an engine score is a centipawn value or a distance to mate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationKind {
    Cp,
    Mate,
}

/// Engine score, signed relative to the side to move in the evaluated FEN.
///
/// `Mate` with a value of 0 marks a terminal position (no legal moves).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(rename = "type")]
    pub kind: EvaluationKind,
    pub value: i32,
}

impl Evaluation {
    pub fn cp(value: i32) -> Self {
        Self {
            kind: EvaluationKind::Cp,
            value,
        }
    }

    pub fn mate(value: i32) -> Self {
        Self {
            kind: EvaluationKind::Mate,
            value,
        }
    }

    pub fn is_cp(&self) -> bool {
        self.kind == EvaluationKind::Cp
    }

    pub fn is_mate(&self) -> bool {
        self.kind == EvaluationKind::Mate
    }
}

/// One multi-PV line reported by the engine for a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineLine {
    /// 1 = principal variation, 2 = second best, ...
    pub id: u32,
    pub depth: u32,
    pub evaluation: Evaluation,
    #[serde(rename = "moveUCI")]
    pub move_uci: String,
    #[serde(rename = "moveSAN", default, skip_serializing_if = "Option::is_none")]
    pub move_san: Option<String>,
}

/// The move that produced a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedMove {
    pub san: String,
    pub uci: String,
}

impl PlayedMove {
    /// Destination square of the move in coordinate notation, e.g. "e4".
    pub fn destination(&self) -> Option<&str> {
        self.uci.get(2..4)
    }

    pub fn is_promotion(&self) -> bool {
        self.san.contains('=') || self.uci.len() == 5
    }
}

/// Qualitative verdict for a single move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Brilliant,
    Great,
    Best,
    Excellent,
    Good,
    Inaccuracy,
    Mistake,
    Blunder,
    Book,
    Forced,
}

impl Classification {
    /// Every classification, most favourable first (book/forced are neutral).
    pub const ALL: [Classification; 10] = [
        Classification::Brilliant,
        Classification::Great,
        Classification::Best,
        Classification::Excellent,
        Classification::Good,
        Classification::Book,
        Classification::Forced,
        Classification::Inaccuracy,
        Classification::Mistake,
        Classification::Blunder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brilliant => "brilliant",
            Self::Great => "great",
            Self::Best => "best",
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Inaccuracy => "inaccuracy",
            Self::Mistake => "mistake",
            Self::Blunder => "blunder",
            Self::Book => "book",
            Self::Forced => "forced",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Worker tag used by the front end for cloud-sourced evaluations.
pub const CLOUD_WORKER: &str = "cloud";

/// A board state plus the engine analysis attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub fen: String,
    /// Absent for the starting position.
    #[serde(rename = "move", default, skip_serializing_if = "Option::is_none")]
    pub played: Option<PlayedMove>,
    #[serde(default)]
    pub top_lines: Vec<EngineLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoff_evaluation: Option<Evaluation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening: Option<String>,
}

impl Position {
    pub fn new(fen: impl Into<String>) -> Self {
        Self {
            fen: fen.into(),
            played: None,
            top_lines: Vec::new(),
            cutoff_evaluation: None,
            worker: None,
            classification: None,
            opening: None,
        }
    }

    /// Engine line with the given id, if the engine reported one.
    pub fn line(&self, id: u32) -> Option<&EngineLine> {
        self.top_lines.iter().find(|line| line.id == id)
    }

    pub fn top_line(&self) -> Option<&EngineLine> {
        self.line(1)
    }

    pub fn is_cloud_evaluated(&self) -> bool {
        self.worker.as_deref() == Some(CLOUD_WORKER)
    }
}
