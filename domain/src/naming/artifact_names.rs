const ILLEGAL_CHARS: [char; 9] = ['&', '*', '/', ':', '<', '>', '?', '\\', '|'];

/// Replaces characters that are not allowed in thumbnail file names with `_`,
/// the same substitution RetroArch applies when looking thumbnails up.
pub fn sanitize_artifact_name(name: &str) -> String {
    name.replace(ILLEGAL_CHARS, "_")
}
