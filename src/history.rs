use crate::classify::Category;
use std::collections::HashMap;

/// Width of a full commit hash in `git log --pretty=format:%H` output
pub const COMMIT_ID_LEN: usize = 40;

/// A single commit flowing through the pipeline.
///
/// `files` stays empty until file attribution runs; `category` stays `None`
/// until classification runs. Classification never reads `files` - they are
/// retained for display and debugging only.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRecord {
    pub id: String,
    pub message: String,
    pub files: Vec<String>,
    pub category: Option<Category>,
}

impl CommitRecord {
    /// First line of the commit message
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

/// Insertion-ordered collection of commits, unique by id.
///
/// Order reflects the order the history provider emitted the commits and is
/// preserved through to rendering. Re-inserting an existing id replaces the
/// record in place: the last occurrence wins, the original position is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitHistory {
    records: Vec<CommitRecord>,
    index: HashMap<String, usize>,
}

impl CommitHistory {
    pub fn new() -> Self {
        CommitHistory::default()
    }

    /// Insert a commit; duplicates overwrite the existing record in place
    pub fn insert(&mut self, id: impl Into<String>, message: impl Into<String>) {
        let id = id.into();
        let record = CommitRecord {
            id: id.clone(),
            message: message.into(),
            files: Vec::new(),
            category: None,
        };

        match self.index.get(&id) {
            Some(&pos) => self.records[pos] = record,
            None => {
                self.index.insert(id, self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CommitRecord> {
        self.index.get(id).map(|&pos| &self.records[pos])
    }

    /// Commit ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.id.as_str())
    }

    /// Records in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, CommitRecord> {
        self.records.iter()
    }

    /// Mutable records in insertion order
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, CommitRecord> {
        self.records.iter_mut()
    }

    /// Attach changed file paths to the record with the given id.
    ///
    /// Returns false if the id is unknown.
    pub fn attach_files(&mut self, id: &str, files: Vec<String>) -> bool {
        match self.index.get(id) {
            Some(&pos) => {
                self.records[pos].files = files;
                true
            }
            None => false,
        }
    }
}

/// Parse raw `git log` text into a [CommitHistory].
///
/// Each line is expected to carry a full 40-character hash, one separator
/// character, then the subject. Lines that do not carry a full identifier
/// (empty lines, truncated lines, blank identifier segments) are skipped
/// silently; this leniency is deliberate and parsing never fails.
pub fn parse_commit_log(raw: &str) -> CommitHistory {
    let mut history = CommitHistory::new();

    for line in raw.lines() {
        if line.len() < COMMIT_ID_LEN || !line.is_char_boundary(COMMIT_ID_LEN) {
            continue;
        }
        let (id, rest) = line.split_at(COMMIT_ID_LEN);
        if id.trim().is_empty() {
            continue;
        }
        let message = rest.get(1..).unwrap_or("");
        history.insert(id, message);
    }

    history
}
