//! Opening names and book moves.
//!
//! Reference data is a list of `{name, fen}` entries, read either from
//! JSON or from a bincode snapshot of the same list. Lookups match on the
//! piece-placement field only.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chess_core::fen::placement;
use chess_core::{Classification, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::classification::is_book_eligible;
use crate::error::AnnotatorError;

/// One named opening position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opening {
    pub name: String,
    /// Full FEN or placement field only
    pub fen: String,
}

impl Opening {
    pub fn new(name: impl Into<String>, fen: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fen: fen.into(),
        }
    }
}

/// Placement -> opening name. Built once per run from the reference data.
#[derive(Debug, Clone, Default)]
pub struct OpeningIndex {
    names: HashMap<String, String>,
}

impl OpeningIndex {
    /// Index the given openings. Earlier entries win when two share a placement.
    pub fn new(openings: &[Opening]) -> Self {
        let mut names = HashMap::with_capacity(openings.len());
        for opening in openings {
            names
                .entry(placement(&opening.fen).to_string())
                .or_insert_with(|| opening.name.clone());
        }
        Self { names }
    }

    /// Opening name for a FEN, compared on placement only.
    pub fn name_for(&self, fen: &str) -> Option<&str> {
        self.names.get(placement(fen)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Load opening reference data. Files ending in `.bin` are bincode, anything else JSON.
pub fn load_openings<P: AsRef<Path>>(path: P) -> Result<Vec<Opening>, AnnotatorError> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    let openings: Vec<Opening> = if path.extension().is_some_and(|ext| ext == "bin") {
        bincode::deserialize_from(reader)?
    } else {
        serde_json::from_reader(reader)?
    };

    info!(path = %path.display(), count = openings.len(), "Loaded openings");
    Ok(openings)
}

/// Like [`load_openings`], but an unreadable file yields an empty book.
pub fn load_openings_or_empty<P: AsRef<Path>>(path: P) -> Vec<Opening> {
    let path = path.as_ref();
    match load_openings(path) {
        Ok(openings) => openings,
        Err(e) => {
            warn!("Failed to load openings from {}: {}", path.display(), e);
            warn!("Opening names and book moves will be disabled");
            Vec::new()
        }
    }
}

/// Set `opening` on every position, clearing it where nothing matches.
pub fn tag_openings(positions: &mut [Position], index: &OpeningIndex) {
    for position in positions.iter_mut() {
        position.opening = index.name_for(&position.fen).map(str::to_string);
    }
}

/// Relabel the leading run of book moves as `Book`.
///
/// A move counts as book when its position has an opening name, or when it
/// was cloud-evaluated and already rated well. The scan stops at the first
/// move that is neither.
pub fn apply_book_moves(positions: &mut [Position]) -> usize {
    let mut promoted = 0;

    for position in positions.iter_mut().skip(1) {
        let known_opening = position.opening.is_some();
        let cloud_book = position.is_cloud_evaluated()
            && position.classification.is_some_and(is_book_eligible);

        if !known_opening && !cloud_book {
            break;
        }

        position.classification = Some(Classification::Book);
        promoted += 1;
    }

    debug!(promoted, "Applied book moves");
    promoted
}
