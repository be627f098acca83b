use std::{path::Path, sync::OnceLock};

use core_types::events::ProgressEvent;
use domain::naming::{
    arcade::{clean_arcade_label, is_arcade_scope},
    script::contains_cjk,
    system_names::strip_session_suffix,
};
use flume::Sender;
use regex::Regex;

use crate::{artifacts::ArtifactRequest, resolution::ResolutionCascade};

/// One playlist entry as read from the frontend's playlist file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistRecord {
    pub label: Option<String>,
    pub path: Option<String>,
}

impl PlaylistRecord {
    pub fn new(label: Option<&str>, path: Option<&str>) -> Self {
        Self {
            label: label.map(str::to_string),
            path: path.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedChange {
    /// Position of the record in the input.
    pub index: usize,
    pub original_label: Option<String>,
    pub new_label: Option<String>,
    /// Reference name artifacts are looked up by.
    pub artifact_source: Option<String>,
}

impl ProposedChange {
    pub fn changes_label(&self) -> bool {
        self.new_label != self.original_label
    }
}

/// Proposes new labels for playlist records by resolving the best candidate
/// string of each record.
pub struct PlaylistLabeler<'a> {
    cascade: &'a ResolutionCascade,
}

impl<'a> PlaylistLabeler<'a> {
    pub fn new(cascade: &'a ResolutionCascade) -> Self {
        Self { cascade }
    }

    /// One proposal per record, in input order. Progress is reported after
    /// every record when `progress_tx` is given; a dropped receiver is
    /// ignored.
    pub fn propose(
        &self,
        records: &[PlaylistRecord],
        scope: &str,
        progress_tx: Option<&Sender<ProgressEvent>>,
    ) -> Vec<ProposedChange> {
        let scope = strip_session_suffix(scope);
        let total = records.len();
        let report = |event: ProgressEvent| {
            if let Some(tx) = progress_tx {
                let _ = tx.send(event);
            }
        };

        report(ProgressEvent::Started { total });
        let changes: Vec<ProposedChange> = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let change = self.propose_one(index, record, &scope);
                let message = change
                    .new_label
                    .clone()
                    .or_else(|| record.path.clone())
                    .unwrap_or_default();
                report(ProgressEvent::progress(index + 1, total, message));
                change
            })
            .collect();
        report(ProgressEvent::Completed { total });

        tracing::info!(
            scope = %scope,
            total,
            relabeled = changes.iter().filter(|c| c.changes_label()).count(),
            "Playlist labels proposed"
        );
        changes
    }

    /// Artifact requests for every proposal with a known artifact source,
    /// without duplicates.
    pub fn artifact_requests(changes: &[ProposedChange], scope: &str) -> Vec<ArtifactRequest> {
        let scope = strip_session_suffix(scope);
        let mut requests: Vec<ArtifactRequest> = Vec::new();
        for change in changes {
            let (Some(source), Some(label)) = (&change.artifact_source, &change.new_label) else {
                continue;
            };
            let request = ArtifactRequest::new(&scope, source, label);
            if !requests.contains(&request) {
                requests.push(request);
            }
        }
        requests
    }

    fn propose_one(&self, index: usize, record: &PlaylistRecord, scope: &str) -> ProposedChange {
        let label = record.label.as_deref().filter(|l| !l.is_empty());
        let (new_label, artifact_source) = match label {
            Some(label) if is_arcade_scope(scope) && !contains_cjk(label) => {
                let (new_label, source) = self.label_arcade(label, scope);
                (Some(new_label), Some(source))
            }
            Some(label) if contains_cjk(label) => {
                let (new_label, source) = self.label_localized(label, scope);
                (Some(new_label), Some(source))
            }
            _ => self.label_from_candidates(record, scope),
        };

        ProposedChange {
            index,
            original_label: record.label.clone(),
            new_label,
            artifact_source,
        }
    }

    /// Arcade labels carry region and date qualifiers that never match the
    /// catalog; the cleaned label is used even when nothing resolves.
    fn label_arcade(&self, label: &str, scope: &str) -> (String, String) {
        let cleaned = clean_arcade_label(label);
        let pair = self.cascade.resolve(&cleaned, scope);
        if pair.localized != cleaned {
            (pair.localized, pair.reference)
        } else if pair.reference != cleaned {
            (pair.reference.clone(), pair.reference)
        } else {
            (cleaned.clone(), cleaned)
        }
    }

    /// A label that is already localized is kept unless the catalog knows a
    /// standard localized spelling for it.
    fn label_localized(&self, label: &str, scope: &str) -> (String, String) {
        let pair = self.cascade.resolve(label, scope);
        (pair.localized, pair.reference)
    }

    fn label_from_candidates(
        &self,
        record: &PlaylistRecord,
        scope: &str,
    ) -> (Option<String>, Option<String>) {
        let candidates = candidates(record);
        let mut standardized: Option<(String, String)> = None;

        for candidate in &candidates {
            let pair = self.cascade.resolve(candidate, scope);
            if pair.localized != *candidate {
                return (Some(pair.localized), Some(pair.reference));
            }
            if pair.reference != *candidate && standardized.is_none() {
                standardized = Some((candidate.clone(), pair.reference));
            }
        }

        match standardized {
            Some((_, reference)) => (Some(reference.clone()), Some(reference)),
            None => {
                let fallback = record.label.clone().or_else(|| candidates.first().cloned());
                (record.label.clone(), fallback)
            }
        }
    }
}

/// Strings worth resolving for a record, most specific first: the file stem
/// of the path, the label, then the parent directory name. Bracketed tags
/// are dropped from localized file stems.
pub fn candidates(record: &PlaylistRecord) -> Vec<String> {
    let mut stem = None;
    let mut parent = None;
    if let Some(path) = record.path.as_deref() {
        // archive member suffix, e.g. "Game.zip#Game.sfc"
        let archive = path.split('#').next().unwrap_or(path);
        let segments: Vec<&str> = archive.split(['/', '\\']).filter(|s| !s.is_empty()).collect();
        stem = segments
            .last()
            .and_then(|file_name| Path::new(file_name).file_stem())
            .and_then(|s| s.to_str())
            .map(|s| {
                if contains_cjk(s) {
                    strip_bracketed(s)
                } else {
                    s.to_string()
                }
            });
        if segments.len() >= 2 {
            parent = Some(segments[segments.len() - 2].to_string());
        }
    }

    let mut candidates: Vec<String> = Vec::new();
    for candidate in [stem, record.label.clone(), parent].into_iter().flatten() {
        let candidate = candidate.trim().to_string();
        if !candidate.is_empty() && !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    candidates
}

fn strip_bracketed(s: &str) -> String {
    static BRACKETED: OnceLock<Regex> = OnceLock::new();
    let re = BRACKETED.get_or_init(|| Regex::new(r"\[.*?\]|\(.*?\)").unwrap());
    let stripped = re.replace_all(s, "").trim().to_string();
    if stripped.is_empty() {
        s.to_string()
    } else {
        stripped
    }
}
