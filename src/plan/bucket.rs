// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! FIFO queues of registered scopes waiting to be paired with Gherkin nodes.

use std::{collections::VecDeque, hash::Hash, sync::Arc};

use linked_hash_map::LinkedHashMap;

use crate::{
    adapter::ScenarioSummary,
    scope::{ScopeId, ScopeKind, ScopeNode, normalize_name},
};

/// Key of a scenario [`Buckets`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct BucketKey {
    /// Kind of the scenario scope.
    pub kind: ScopeKind,

    /// Normalized name.
    pub name: String,

    /// Id of the enclosing rule scope, if any.
    pub rule: Option<ScopeId>,
}

impl BucketKey {
    /// Creates a new [`BucketKey`], normalizing the given name.
    #[must_use]
    pub fn new(kind: ScopeKind, name: &str, rule: Option<&ScopeId>) -> Self {
        Self { kind, name: normalize_name(name), rule: rule.cloned() }
    }

    /// Creates a [`BucketKey`] of the given [`ScenarioSummary`].
    #[must_use]
    pub fn of(summary: &ScenarioSummary) -> Self {
        Self::new(
            summary.kind(),
            &summary.scenario.name,
            summary.rule.as_ref().map(|r| &r.id),
        )
    }
}

/// FIFO queues of values grouped by key, both kept in insertion order.
#[derive(Debug)]
pub struct Buckets<K: Eq + Hash, V> {
    queues: LinkedHashMap<K, VecDeque<V>>,
}

impl<K: Eq + Hash, V> Default for Buckets<K, V> {
    fn default() -> Self {
        Self { queues: LinkedHashMap::new() }
    }
}

impl<K: Eq + Hash, V> Buckets<K, V> {
    /// Enqueues the given value under the given key.
    pub fn push(&mut self, key: K, value: V) {
        self.queues.entry(key).or_insert_with(VecDeque::new).push_back(value);
    }

    /// Dequeues the oldest value under the given key.
    pub fn take(&mut self, key: &K) -> Option<V> {
        self.queues.get_mut(key).and_then(VecDeque::pop_front)
    }

    /// Number of values still queued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    /// Indicates whether no value is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes these [`Buckets`] returning every value never taken, in
    /// insertion order of their keys.
    #[must_use]
    pub fn into_leftovers(self) -> Vec<V> {
        self.queues.into_iter().flat_map(|(_, q)| q).collect()
    }
}

impl Buckets<BucketKey, Arc<ScenarioSummary>> {
    /// Buckets the given [`ScenarioSummary`]s by their [`BucketKey`]s.
    pub fn scenarios(
        summaries: impl IntoIterator<Item = Arc<ScenarioSummary>>,
    ) -> Self {
        let mut buckets = Self::default();
        for summary in summaries {
            let key = BucketKey::of(&summary);
            tracing::trace!(
                kind = %key.kind,
                name = %key.name,
                rule = ?key.rule.as_ref().map(ScopeId::as_str),
                scope = %summary.id,
                "bucketed scenario scope",
            );
            buckets.push(key, summary);
        }
        buckets
    }
}

impl Buckets<String, Arc<ScopeNode>> {
    /// Buckets the distinct rule scopes referenced by the given
    /// [`ScenarioSummary`]s by their normalized names.
    pub fn rules<'s>(
        summaries: impl IntoIterator<Item = &'s Arc<ScenarioSummary>>,
    ) -> Self {
        let mut seen = Vec::<&ScopeId>::new();
        let mut buckets = Self::default();
        for rule in summaries.into_iter().filter_map(|s| s.rule.as_ref()) {
            if seen.contains(&&rule.id) {
                continue;
            }
            seen.push(&rule.id);
            tracing::trace!(
                name = %rule.name,
                scope = %rule.id,
                "bucketed rule scope",
            );
            buckets.push(normalize_name(&rule.name), Arc::clone(rule));
        }
        buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapter::Adapter,
        scope::{Composer, ScopeMetadata},
    };

    fn summaries() -> Vec<Arc<ScenarioSummary>> {
        let meta = ScopeMetadata::new;
        let mut composer = Composer::new();
        let _ = composer
            .feature("Shop", meta(), |c| {
                let _ = c.scenario("Checkout", meta(), |_| Ok(()))?;
                let _ = c.scenario("  Checkout ", meta(), |_| Ok(()))?;
                let _ = c.rule("Guests", meta(), |c| {
                    let _ = c.scenario("Checkout", meta(), |_| Ok(()))?;
                    let _ = c.scenario_outline("Pay", meta(), |_| Ok(()))?;
                    Ok(())
                })?;
                Ok(())
            })
            .unwrap();
        let plan = composer.into_plan().unwrap();
        let summaries = Adapter::new(&plan).list_scenarios().unwrap();
        summaries
    }

    #[test]
    fn scenarios_pair_fifo_per_key() {
        let all = summaries();
        let mut buckets = Buckets::scenarios(all.iter().cloned());
        assert_eq!(buckets.len(), 4);

        let key = BucketKey::new(ScopeKind::Scenario, "Checkout", None);
        assert_eq!(buckets.take(&key).unwrap().id, all[0].id);
        assert_eq!(buckets.take(&key).unwrap().id, all[1].id);
        assert!(buckets.take(&key).is_none());

        let rule = all[2].rule.as_ref().map(|r| &r.id);
        let key = BucketKey::new(ScopeKind::Scenario, "Checkout", rule);
        assert_eq!(buckets.take(&key).unwrap().id, all[2].id);

        let leftovers = buckets.into_leftovers();
        assert_eq!(leftovers.len(), 1);
        assert_eq!(leftovers[0].kind(), ScopeKind::ScenarioOutline);
    }

    #[test]
    fn rules_are_distinct() {
        let all = summaries();
        let mut rules = Buckets::rules(&all);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.take(&"Guests".to_owned()).unwrap().name, "Guests");
        assert!(rules.is_empty());
    }
}
