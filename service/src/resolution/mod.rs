//! Loose title resolution: an ordered chain of [`ResolutionStep`]s evaluated
//! by the [`ResolutionCascade`] until one produces a `(localized, reference)`
//! pair.

mod cascade;
mod resolution_step;
pub mod steps;

pub use cascade::ResolutionCascade;
pub use resolution_step::{ResolutionContext, ResolutionStep};

/// External translation capability consulted when the catalog and the
/// reference data have nothing for a title.
pub trait TranslationHook: Send + Sync {
    /// Localized text for `text`, or `None` when no translation is available.
    fn translate(&self, text: &str) -> Option<String>;
}
