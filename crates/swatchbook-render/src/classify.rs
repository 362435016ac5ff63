//! Key classification into named buckets.
//!
//! Before rendering, the dictionary's keys are partitioned into named
//! buckets, one output table per bucket. The partitioning rule is a
//! pluggable [`BucketPolicy`] injected into the assembler, so the rule can
//! vary without touching rendering: the default is a key-suffix match, and
//! [`ComponentPolicy`] reproduces the richer prefix/color-set grouping.
//!
//! Whatever the policy, classification is a partition: every key lands in
//! exactly one bucket.

use std::collections::{BTreeMap, BTreeSet};

use crate::value::{Dictionary, ThemeValue};

/// Maps a key to the name of the bucket it belongs to.
pub trait BucketPolicy {
    /// The bucket name for `key`. Total: every key gets exactly one name.
    fn bucket(&self, key: &str) -> String;

    /// Preferred table order. Buckets not listed here are appended in name
    /// order; listed buckets that end up empty are skipped.
    fn ordering(&self) -> Vec<String> {
        Vec::new()
    }
}

/// A named partition of the dictionary.
pub struct Bucket<'a> {
    pub name: String,
    /// Entries in lexicographic key order.
    pub entries: Vec<(&'a str, &'a ThemeValue)>,
}

/// The reference policy: keys ending in the literal `UI` form the
/// "UI Classes" bucket, everything else is "Components".
///
/// The suffix check runs on the full key, so `ToolTip.borderUI` qualifies.
pub struct SuffixPolicy;

impl SuffixPolicy {
    pub const COMPONENTS: &'static str = "Components";
    pub const UI_CLASSES: &'static str = "UI Classes";
}

impl BucketPolicy for SuffixPolicy {
    fn bucket(&self, key: &str) -> String {
        if key.ends_with("UI") {
            Self::UI_CLASSES.to_string()
        } else {
            Self::COMPONENTS.to_string()
        }
    }

    fn ordering(&self) -> Vec<String> {
        vec![Self::COMPONENTS.to_string(), Self::UI_CLASSES.to_string()]
    }
}

/// The richer grouping policy: fixed primary/secondary color-key name sets,
/// per-component buckets keyed by name prefix, a `UI` suffix bucket, and an
/// "Others" remainder.
pub struct ComponentPolicy {
    components: Vec<String>,
    primary_colors: BTreeSet<String>,
    secondary_colors: BTreeSet<String>,
}

impl ComponentPolicy {
    pub const PRIMARY_COLORS: &'static str = "Primary Colors";
    pub const SECONDARY_COLORS: &'static str = "Secondary Colors";
    pub const OTHERS: &'static str = "Others";

    pub fn new(
        components: impl IntoIterator<Item = impl Into<String>>,
        primary_colors: impl IntoIterator<Item = impl Into<String>>,
        secondary_colors: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        ComponentPolicy {
            components: components.into_iter().map(Into::into).collect(),
            primary_colors: primary_colors.into_iter().map(Into::into).collect(),
            secondary_colors: secondary_colors.into_iter().map(Into::into).collect(),
        }
    }

    fn component_bucket(name: &str) -> String {
        format!("Components - {name}")
    }
}

impl BucketPolicy for ComponentPolicy {
    fn bucket(&self, key: &str) -> String {
        if self.primary_colors.contains(key) {
            return Self::PRIMARY_COLORS.to_string();
        }
        if self.secondary_colors.contains(key) {
            return Self::SECONDARY_COLORS.to_string();
        }
        // Component keys continue with '.', ':' or '[' after the name.
        for name in &self.components {
            if let Some(rest) = key.strip_prefix(name.as_str()) {
                if matches!(rest.chars().next(), Some('.') | Some(':') | Some('[')) {
                    return Self::component_bucket(name);
                }
            }
        }
        if key.ends_with("UI") {
            SuffixPolicy::UI_CLASSES.to_string()
        } else {
            Self::OTHERS.to_string()
        }
    }

    fn ordering(&self) -> Vec<String> {
        let mut order = vec![
            Self::PRIMARY_COLORS.to_string(),
            Self::SECONDARY_COLORS.to_string(),
        ];
        order.extend(self.components.iter().map(|name| Self::component_bucket(name)));
        order.push(Self::OTHERS.to_string());
        order.push(SuffixPolicy::UI_CLASSES.to_string());
        order
    }
}

/// Partitions the dictionary into buckets in the policy's table order.
pub fn classify<'a>(defaults: &'a Dictionary, policy: &dyn BucketPolicy) -> Vec<Bucket<'a>> {
    let mut by_name: BTreeMap<String, Vec<(&'a str, &'a ThemeValue)>> = BTreeMap::new();
    for (key, value) in defaults {
        by_name
            .entry(policy.bucket(key))
            .or_default()
            .push((key.as_str(), value));
    }

    let mut buckets = Vec::new();
    for name in policy.ordering() {
        if let Some(entries) = by_name.remove(&name) {
            buckets.push(Bucket { name, entries });
        }
    }
    for (name, entries) in by_name {
        buckets.push(Bucket { name, entries });
    }
    buckets
}
