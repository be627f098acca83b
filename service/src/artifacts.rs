use std::path::{Path, PathBuf};

use core_types::{ScopeId, ThumbnailKind};
use domain::naming::artifact_names::sanitize_artifact_name;
use strum::IntoEnumIterator;

use crate::settings::ResolverSettings;

/// Artifacts (box art, snapshots, title screens) to fetch for one resolved
/// title. Remote files are keyed by the reference name, local copies by the
/// localized name so the frontend finds them under the displayed label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRequest {
    pub scope: ScopeId,
    pub reference_name: String,
    pub localized_name: String,
}

impl ArtifactRequest {
    pub fn new(scope: &str, reference_name: &str, localized_name: &str) -> Self {
        Self {
            scope: scope.to_string(),
            reference_name: reference_name.to_string(),
            localized_name: localized_name.to_string(),
        }
    }

    pub fn remote_file_name(&self) -> String {
        format!("{}.png", sanitize_artifact_name(&self.reference_name))
    }

    pub fn local_file_name(&self) -> String {
        format!("{}.png", sanitize_artifact_name(&self.localized_name))
    }

    /// `<scope>/<kind dir>/<remote file name>`, not percent-encoded.
    pub fn remote_path(&self, kind: ThumbnailKind) -> String {
        format!("{}/{}/{}", self.scope, kind.dir_name(), self.remote_file_name())
    }

    pub fn remote_url(&self, base_url: &str, kind: ThumbnailKind) -> String {
        format!(
            "{}/{}/{}/{}",
            base_url.trim_end_matches('/'),
            urlencoding::encode(&self.scope),
            kind.dir_name(),
            urlencoding::encode(&self.remote_file_name())
        )
    }

    pub fn local_path(&self, root: &Path, kind: ThumbnailKind) -> PathBuf {
        root.join(&self.scope)
            .join(kind.dir_name())
            .join(self.local_file_name())
    }

    /// Remote URL under the configured artifact server and local target for
    /// every artifact kind.
    pub fn targets(&self, settings: &ResolverSettings, root: &Path) -> Vec<(String, PathBuf)> {
        ThumbnailKind::iter()
            .map(|kind| {
                (
                    self.remote_url(&settings.artifact_base_url, kind),
                    self.local_path(root, kind),
                )
            })
            .collect()
    }
}
