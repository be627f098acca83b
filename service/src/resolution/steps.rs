use core_types::TitlePair;
use domain::{
    naming::script::has_non_ascii,
    normalize,
    similarity::extract_one,
};

use super::resolution_step::{ResolutionContext, ResolutionStep};

/// Raw text is a canonical name: `(localized, raw)`.
pub struct ExactNameStep;

impl ResolutionStep for ExactNameStep {
    fn name(&self) -> &'static str {
        "exact_name"
    }

    fn attempt(&self, context: &ResolutionContext<'_>) -> Option<TitlePair> {
        context
            .store
            .resolve_exact(context.raw, context.scopes)
            .map(|localized| TitlePair::new(localized, context.raw))
    }
}

/// Raw text is already a localized name: `(raw, canonical)`.
pub struct ReverseExactStep;

impl ResolutionStep for ReverseExactStep {
    fn name(&self) -> &'static str {
        "reverse_exact"
    }

    fn attempt(&self, context: &ResolutionContext<'_>) -> Option<TitlePair> {
        context
            .store
            .resolve_reverse_exact(context.raw, context.scopes)
            .map(|canonical| TitlePair::new(context.raw, canonical))
    }
}

pub struct AliasStep;

impl ResolutionStep for AliasStep {
    fn name(&self) -> &'static str {
        "alias"
    }

    fn should_execute(&self, context: &ResolutionContext<'_>) -> bool {
        !context.normalized.is_empty()
    }

    fn attempt(&self, context: &ResolutionContext<'_>) -> Option<TitlePair> {
        context
            .store
            .resolve_by_alias(&context.normalized, context.scopes)
    }
}

/// Configured acronyms such as "SRWF". The acronym's reference name is looked
/// up in the catalog; the rule's own localized name is the fallback.
pub struct AcronymStep;

impl ResolutionStep for AcronymStep {
    fn name(&self) -> &'static str {
        "acronym"
    }

    fn should_execute(&self, context: &ResolutionContext<'_>) -> bool {
        !context.normalized.is_empty() && !context.settings.acronyms.is_empty()
    }

    fn attempt(&self, context: &ResolutionContext<'_>) -> Option<TitlePair> {
        let rule = context.settings.acronym(&context.normalized)?;
        let localized = context
            .store
            .resolve_exact(&rule.reference_name, context.scopes)
            .or(rule.localized_name.as_deref())?;
        Some(TitlePair::new(localized, rule.reference_name.as_str()))
    }
}

/// Fuzzy match over the scoped catalog, split by script.
///
/// Non-ASCII input is compared with localized names using the holistic
/// score. ASCII input is normalized and compared with the normalized
/// canonical names using the plain ratio; the raw text stays the reference.
pub struct ScriptAwareFuzzyStep;

impl ResolutionStep for ScriptAwareFuzzyStep {
    fn name(&self) -> &'static str {
        "script_aware_fuzzy"
    }

    fn should_execute(&self, context: &ResolutionContext<'_>) -> bool {
        context.scorer.is_some()
    }

    fn attempt(&self, context: &ResolutionContext<'_>) -> Option<TitlePair> {
        let scorer = context.scorer?;
        let candidates = context.store.scored_candidates(context.scopes);
        let thresholds = &context.settings.thresholds;

        if has_non_ascii(context.raw) {
            let (index, score) = extract_one(
                context.raw,
                candidates.iter().map(|entry| entry.localized_name.as_str()),
                |a, b| scorer.holistic_ratio(a, b),
            )?;
            if score < thresholds.localized_fuzzy {
                return None;
            }
            let entry = candidates[index];
            tracing::debug!(
                raw = context.raw,
                matched = %entry.localized_name,
                score,
                "Localized fuzzy match"
            );
            let reference = context
                .store
                .resolve_reverse_exact(&entry.localized_name, context.scopes)
                .unwrap_or(&entry.canonical_name);
            return Some(TitlePair::new(entry.localized_name.as_str(), reference));
        }

        if context.normalized.is_empty() {
            return None;
        }
        let keyed: Vec<(String, usize)> = candidates
            .iter()
            .enumerate()
            .map(|(index, entry)| (normalize(&entry.canonical_name), index))
            .filter(|(key, _)| !key.is_empty())
            .collect();
        let (best, score) = extract_one(
            &context.normalized,
            keyed.iter().map(|(key, _)| key.as_str()),
            |a, b| scorer.ratio(a, b),
        )?;
        if score < thresholds.ascii_fuzzy {
            return None;
        }
        let entry = candidates[keyed[best].1];
        tracing::debug!(
            raw = context.raw,
            matched = %entry.canonical_name,
            score,
            "Normalized fuzzy match"
        );
        Some(TitlePair::new(entry.localized_name.as_str(), context.raw))
    }
}

/// Standardizes the name through the active reference catalog. Only a name
/// that differs from the raw text counts; it fills both halves of the pair.
pub struct ReferenceCatalogStep;

impl ResolutionStep for ReferenceCatalogStep {
    fn name(&self) -> &'static str {
        "reference_catalog"
    }

    fn should_execute(&self, context: &ResolutionContext<'_>) -> bool {
        context.reference.is_some_and(|catalog| !catalog.is_empty())
    }

    fn attempt(&self, context: &ResolutionContext<'_>) -> Option<TitlePair> {
        let standard_name = context.reference?.get_standard_name(context.raw)?;
        if standard_name == context.raw {
            return None;
        }
        Some(TitlePair::new(standard_name, standard_name))
    }
}

pub struct TranslationHookStep;

impl ResolutionStep for TranslationHookStep {
    fn name(&self) -> &'static str {
        "translation_hook"
    }

    fn should_execute(&self, context: &ResolutionContext<'_>) -> bool {
        context.translation_hook.is_some()
    }

    fn attempt(&self, context: &ResolutionContext<'_>) -> Option<TitlePair> {
        let translated = context.translation_hook?.translate(context.raw)?;
        if translated.is_empty() {
            return None;
        }
        Some(TitlePair::new(translated, context.raw))
    }
}
