use core_types::ScopeId;
use domain::naming::system_names::base_scope_id;
use indexmap::IndexMap;

use crate::settings::ResolverSettings;

/// Expands virtual scope ids (a frontend system that aggregates several
/// catalog scopes) into the ordered list of scopes to search.
#[derive(Debug, Clone, Default)]
pub struct SystemScopeExpander {
    mappings: IndexMap<String, Vec<ScopeId>>,
}

impl SystemScopeExpander {
    pub fn new(mappings: IndexMap<String, Vec<ScopeId>>) -> Self {
        Self { mappings }
    }

    pub fn from_settings(settings: &ResolverSettings) -> Self {
        Self::new(settings.virtual_scopes.clone())
    }

    /// Scopes to search for `virtual_scope`, in preference order.
    ///
    /// An empty scope expands to an empty list, which callers treat as "no
    /// filter". A mapped scope (compared without its parenthesized session
    /// suffix) always lists itself first. Unmapped scopes are returned as is.
    pub fn expand(&self, virtual_scope: &str) -> Vec<ScopeId> {
        if virtual_scope.is_empty() {
            return Vec::new();
        }
        let base = base_scope_id(virtual_scope);
        match self.mappings.get(base) {
            Some(scopes) => {
                let mut expanded = Vec::with_capacity(scopes.len() + 1);
                if !scopes.iter().any(|s| s == base) {
                    expanded.push(base.to_string());
                }
                expanded.extend(scopes.iter().cloned());
                expanded
            }
            None => vec![virtual_scope.to_string()],
        }
    }

    pub fn is_virtual(&self, scope: &str) -> bool {
        self.mappings.contains_key(base_scope_id(scope))
    }
}
