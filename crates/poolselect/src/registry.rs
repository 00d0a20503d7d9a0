//! Named policy builders for declarative rules.
//!
//! Rule authors refer to policies by a stable function name instead of
//! constructing them directly. The table is fixed at compile time.

use std::collections::BTreeMap;

use poolselect_core::{Error, Result, RuleSpec};

use crate::option::{anti_affinity_label, prefer_anti_affinity_label, BuildOption};

/// A named builder turning an affinity label into a [`BuildOption`].
pub type TemplateFunction = fn(&str) -> BuildOption;

const TEMPLATE_FUNCTIONS: [(&str, TemplateFunction); 4] = [
    ("antiAffinityLabel", anti_affinity_label),
    ("preferAntiAffinityLabel", prefer_anti_affinity_label),
    ("cspAntiAffinity", anti_affinity_label),
    ("cspPreferAntiAffinity", prefer_anti_affinity_label),
];

/// Returns every registered template function by name.
#[must_use]
pub fn template_functions() -> BTreeMap<&'static str, TemplateFunction> {
    TEMPLATE_FUNCTIONS.into_iter().collect()
}

/// Looks up a template function by name.
#[must_use]
pub fn lookup(name: &str) -> Option<TemplateFunction> {
    TEMPLATE_FUNCTIONS.iter().find(|(n, _)| *n == name).map(|(_, f)| *f)
}

/// Resolves declarative rules into build options, preserving order.
///
/// # Errors
///
/// Returns [`Error::UnknownTemplateFunction`] for the first rule naming an
/// unregistered function.
pub fn resolve_rules(rules: &[RuleSpec]) -> Result<Vec<BuildOption>> {
    rules
        .iter()
        .map(|rule| {
            lookup(&rule.function)
                .map(|f| f(&rule.label))
                .ok_or_else(|| Error::UnknownTemplateFunction(rule.function.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyName;

    #[test]
    fn test_template_functions_count() {
        assert_eq!(template_functions().len(), 4);
        // Stable across calls.
        assert_eq!(template_functions().len(), 4);
    }

    #[test]
    fn test_template_function_kinds() {
        let functions = template_functions();

        for name in ["antiAffinityLabel", "cspAntiAffinity"] {
            assert_eq!(functions[name]("vol-1").name(), PolicyName::AntiAffinityLabel);
        }
        for name in ["preferAntiAffinityLabel", "cspPreferAntiAffinity"] {
            assert_eq!(functions[name]("vol-1").name(), PolicyName::PreferAntiAffinityLabel);
        }
    }

    #[test]
    fn test_lookup() {
        let f = lookup("cspAntiAffinity").unwrap();
        assert_eq!(f("vol-7"), anti_affinity_label("vol-7"));
        assert!(lookup("cspZoneAffinity").is_none());
    }

    #[test]
    fn test_resolve_rules() {
        let rules = vec![
            RuleSpec::new("cspPreferAntiAffinity", "vol-1"),
            RuleSpec::new("preferAntiAffinityLabel", "app-1"),
        ];

        let options = resolve_rules(&rules).unwrap();
        assert_eq!(
            options,
            vec![prefer_anti_affinity_label("vol-1"), prefer_anti_affinity_label("app-1")]
        );
    }

    #[test]
    fn test_resolve_unknown_rule() {
        let rules = vec![RuleSpec::new("cspAntiAffinity", "vol-1"), RuleSpec::new("nope", "x")];

        let err = resolve_rules(&rules).unwrap_err();
        assert!(matches!(err, Error::UnknownTemplateFunction(ref name) if name == "nope"));
    }
}
