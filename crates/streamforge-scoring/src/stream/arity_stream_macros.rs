//! Macros for generating arity-specific constraint streams.
//!
//! Uni/Bi/Tri/Quad/Penta streams share every operation except joins,
//! differing only in their fact types and tuple width.

/// Generates the stream struct and the operations every arity supports.
///
/// `last` names the final fact type and its index, `prefix` the fact types
/// before it; `flatten_last` replaces the last one.
macro_rules! impl_arity_stream {
    (
        $stream:ident,
        [$($t:ident : $i:tt),+],
        last $l:ident : $li:tt,
        prefix [$($p:ident),*]
    ) => {
        pub struct $stream<Sc: streamforge_core::Score, $($t),+> {
            factory: $crate::stream::ConstraintFactory<Sc>,
            node: $crate::graph::NodeId,
            _phantom: std::marker::PhantomData<fn() -> ($($t,)+)>,
        }

        impl<Sc: streamforge_core::Score, $($t),+> std::fmt::Debug for $stream<Sc, $($t),+> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($stream))
                    .field("node", &self.node)
                    .finish()
            }
        }

        impl<Sc: streamforge_core::Score, $($t: 'static),+> $stream<Sc, $($t),+> {
            pub(crate) fn new(
                factory: $crate::stream::ConstraintFactory<Sc>,
                node: $crate::graph::NodeId,
            ) -> Self {
                Self {
                    factory,
                    node,
                    _phantom: std::marker::PhantomData,
                }
            }

            /// Returns the node this stream ends in.
            ///
            /// Two streams built from structurally equal definitions end in
            /// the same node.
            pub fn node_id(&self) -> $crate::graph::NodeId {
                self.node
            }

            /// Keeps the tuples matching the predicate.
            pub fn filter<F>(self, predicate: F) -> Self
            where
                F: Fn($(&$t),+) -> bool + Send + Sync + 'static,
            {
                let param = $crate::graph::Param::of_closure(&predicate);
                let predicate = erase!(predicate, [$($t : $i),+]);
                let node = self.factory.filter_node(self.node, param, predicate);
                Self::new(self.factory, node)
            }

            /// Keeps the tuples for which at least one `X` fact matches the joiner.
            pub fn if_exists<X: $crate::fact::Fact>(
                self,
                joiner: $crate::stream::joiner::Joiner<($($t,)+), X>,
            ) -> Self {
                let right = self.factory.source_node::<X>();
                self.exists(right, joiner, true)
            }

            /// Keeps the tuples for which no `X` fact matches the joiner.
            pub fn if_not_exists<X: $crate::fact::Fact>(
                self,
                joiner: $crate::stream::joiner::Joiner<($($t,)+), X>,
            ) -> Self {
                let right = self.factory.source_node::<X>();
                self.exists(right, joiner, false)
            }

            /// Keeps the tuples for which at least one tuple of `other` matches.
            pub fn if_exists_stream<X: 'static>(
                self,
                other: $crate::stream::UniConstraintStream<Sc, X>,
                joiner: $crate::stream::joiner::Joiner<($($t,)+), X>,
            ) -> Self {
                self.exists(other.node_id(), joiner, true)
            }

            /// Keeps the tuples for which no tuple of `other` matches.
            pub fn if_not_exists_stream<X: 'static>(
                self,
                other: $crate::stream::UniConstraintStream<Sc, X>,
                joiner: $crate::stream::joiner::Joiner<($($t,)+), X>,
            ) -> Self {
                self.exists(other.node_id(), joiner, false)
            }

            fn exists<X>(
                self,
                right: $crate::graph::NodeId,
                joiner: $crate::stream::joiner::Joiner<($($t,)+), X>,
                should_exist: bool,
            ) -> Self {
                let params = joiner.sharing_params();
                let node = self
                    .factory
                    .exists_node(self.node, right, params, joiner.into_parts(), should_exist);
                Self::new(self.factory, node)
            }

            /// Groups the tuples by key and aggregates each group.
            pub fn group_by<K, R, F>(
                self,
                key: F,
                collector: $crate::stream::collector::Collector<($($t,)+), R>,
            ) -> $crate::stream::BiConstraintStream<Sc, K, R>
            where
                K: $crate::fact::Value,
                R: 'static,
                F: Fn($(&$t),+) -> K + Send + Sync + 'static,
            {
                let node = self.group_node(vec![Self::key_part(key)], vec![collector.into_parts()]);
                $crate::stream::BiConstraintStream::new(self.factory, node)
            }

            /// Groups the tuples by key and aggregates each group twice.
            pub fn group_by_with_pair<K, RA, RB, F>(
                self,
                key: F,
                collector_a: $crate::stream::collector::Collector<($($t,)+), RA>,
                collector_b: $crate::stream::collector::Collector<($($t,)+), RB>,
            ) -> $crate::stream::TriConstraintStream<Sc, K, RA, RB>
            where
                K: $crate::fact::Value,
                RA: 'static,
                RB: 'static,
                F: Fn($(&$t),+) -> K + Send + Sync + 'static,
            {
                let node = self.group_node(
                    vec![Self::key_part(key)],
                    vec![collector_a.into_parts(), collector_b.into_parts()],
                );
                $crate::stream::TriConstraintStream::new(self.factory, node)
            }

            /// Reduces the stream to its distinct keys.
            pub fn group_by_key<K, F>(self, key: F) -> $crate::stream::UniConstraintStream<Sc, K>
            where
                K: $crate::fact::Value,
                F: Fn($(&$t),+) -> K + Send + Sync + 'static,
            {
                let node = self.group_node(vec![Self::key_part(key)], Vec::new());
                $crate::stream::UniConstraintStream::new(self.factory, node)
            }

            /// Reduces the stream to its distinct pairs of keys.
            pub fn group_by_keys<KA, KB, FA, FB>(
                self,
                key_a: FA,
                key_b: FB,
            ) -> $crate::stream::BiConstraintStream<Sc, KA, KB>
            where
                KA: $crate::fact::Value,
                KB: $crate::fact::Value,
                FA: Fn($(&$t),+) -> KA + Send + Sync + 'static,
                FB: Fn($(&$t),+) -> KB + Send + Sync + 'static,
            {
                let node = self.group_node(vec![Self::key_part(key_a), Self::key_part(key_b)], Vec::new());
                $crate::stream::BiConstraintStream::new(self.factory, node)
            }

            /// Groups the tuples by a pair of keys and aggregates each group.
            pub fn group_by_keys_with<KA, KB, R, FA, FB>(
                self,
                key_a: FA,
                key_b: FB,
                collector: $crate::stream::collector::Collector<($($t,)+), R>,
            ) -> $crate::stream::TriConstraintStream<Sc, KA, KB, R>
            where
                KA: $crate::fact::Value,
                KB: $crate::fact::Value,
                R: 'static,
                FA: Fn($(&$t),+) -> KA + Send + Sync + 'static,
                FB: Fn($(&$t),+) -> KB + Send + Sync + 'static,
            {
                let node = self.group_node(
                    vec![Self::key_part(key_a), Self::key_part(key_b)],
                    vec![collector.into_parts()],
                );
                $crate::stream::TriConstraintStream::new(self.factory, node)
            }

            /// Aggregates the whole stream into a single tuple.
            ///
            /// The tuple only exists while the stream is not empty.
            pub fn collect<R: 'static>(
                self,
                collector: $crate::stream::collector::Collector<($($t,)+), R>,
            ) -> $crate::stream::UniConstraintStream<Sc, R> {
                let node = self.group_node(Vec::new(), vec![collector.into_parts()]);
                $crate::stream::UniConstraintStream::new(self.factory, node)
            }

            /// Aggregates the whole stream twice into a single pair.
            pub fn collect_pair<RA: 'static, RB: 'static>(
                self,
                collector_a: $crate::stream::collector::Collector<($($t,)+), RA>,
                collector_b: $crate::stream::collector::Collector<($($t,)+), RB>,
            ) -> $crate::stream::BiConstraintStream<Sc, RA, RB> {
                let node = self.group_node(Vec::new(), vec![collector_a.into_parts(), collector_b.into_parts()]);
                $crate::stream::BiConstraintStream::new(self.factory, node)
            }

            fn key_part<K, F>(key: F) -> ($crate::graph::Param, $crate::stream::function::TupleFn<$crate::fact::FactRef>)
            where
                K: $crate::fact::Value,
                F: Fn($(&$t),+) -> K + Send + Sync + 'static,
            {
                let param = $crate::graph::Param::of_closure(&key);
                (param, erase!(key, [$($t : $i),+], $crate::fact::FactRef::value))
            }

            fn group_node(
                &self,
                keys: Vec<($crate::graph::Param, $crate::stream::function::TupleFn<$crate::fact::FactRef>)>,
                collectors: Vec<(Vec<$crate::graph::Param>, $crate::stream::collector::AccumulatorSupplier)>,
            ) -> $crate::graph::NodeId {
                self.factory.group_node(self.node, keys, collectors)
            }

            /// Maps every tuple to a single value.
            pub fn map<V, F>(self, mapping: F) -> $crate::stream::UniConstraintStream<Sc, V>
            where
                V: $crate::fact::Value,
                F: Fn($(&$t),+) -> V + Send + Sync + 'static,
            {
                let param = $crate::graph::Param::of_closure(&mapping);
                let mapping = erase!(mapping, [$($t : $i),+], $crate::fact::FactRef::value);
                let node = self.factory.map_node(self.node, param, mapping);
                $crate::stream::UniConstraintStream::new(self.factory, node)
            }

            /// Replaces the last fact of each tuple by every value the mapping
            /// yields for it, producing one tuple per value.
            pub fn flatten_last<V, I, F>(self, mapping: F) -> $stream<Sc, $($p,)* V>
            where
                V: $crate::fact::Value,
                I: IntoIterator<Item = V>,
                F: Fn(&$l) -> I + Send + Sync + 'static,
            {
                let param = $crate::graph::Param::of_closure(&mapping);
                let mapping = $crate::stream::function::tuple_fn(move |facts| {
                    let last = $crate::fact::fact_at::<$l>(facts, $li)?;
                    Ok(mapping(last)
                        .into_iter()
                        .map($crate::fact::FactRef::value)
                        .collect::<Vec<_>>())
                });
                let node = self.factory.flatten_node(self.node, param, mapping);
                $stream::new(self.factory, node)
            }

            /// Subtracts `weight` from the score for every tuple.
            pub fn penalize(self, weight: Sc) -> $crate::stream::ConstraintBuilder<Sc> {
                self.impact(streamforge_core::ImpactType::Penalty, Some(weight), None)
            }

            /// Adds `weight` to the score for every tuple.
            pub fn reward(self, weight: Sc) -> $crate::stream::ConstraintBuilder<Sc> {
                self.impact(streamforge_core::ImpactType::Reward, Some(weight), None)
            }

            /// Subtracts `weight` multiplied by the match weight of every tuple.
            pub fn penalize_with<W>(self, weight: Sc, weigher: W) -> $crate::stream::ConstraintBuilder<Sc>
            where
                W: Fn($(&$t),+) -> <Sc as streamforge_core::Score>::Level + Send + Sync + 'static,
            {
                let weigher = erase!(weigher, [$($t : $i),+]);
                self.impact(streamforge_core::ImpactType::Penalty, Some(weight), Some(weigher))
            }

            /// Adds `weight` multiplied by the match weight of every tuple.
            pub fn reward_with<W>(self, weight: Sc, weigher: W) -> $crate::stream::ConstraintBuilder<Sc>
            where
                W: Fn($(&$t),+) -> <Sc as streamforge_core::Score>::Level + Send + Sync + 'static,
            {
                let weigher = erase!(weigher, [$($t : $i),+]);
                self.impact(streamforge_core::ImpactType::Reward, Some(weight), Some(weigher))
            }

            /// Penalizes with the weight configured for the constraint's id,
            /// zero when none is configured.
            pub fn penalize_configurable(self) -> $crate::stream::ConstraintBuilder<Sc> {
                self.impact(streamforge_core::ImpactType::Penalty, None, None)
            }

            /// Rewards with the weight configured for the constraint's id,
            /// zero when none is configured.
            pub fn reward_configurable(self) -> $crate::stream::ConstraintBuilder<Sc> {
                self.impact(streamforge_core::ImpactType::Reward, None, None)
            }

            pub fn penalize_configurable_with<W>(self, weigher: W) -> $crate::stream::ConstraintBuilder<Sc>
            where
                W: Fn($(&$t),+) -> <Sc as streamforge_core::Score>::Level + Send + Sync + 'static,
            {
                let weigher = erase!(weigher, [$($t : $i),+]);
                self.impact(streamforge_core::ImpactType::Penalty, None, Some(weigher))
            }

            pub fn reward_configurable_with<W>(self, weigher: W) -> $crate::stream::ConstraintBuilder<Sc>
            where
                W: Fn($(&$t),+) -> <Sc as streamforge_core::Score>::Level + Send + Sync + 'static,
            {
                let weigher = erase!(weigher, [$($t : $i),+]);
                self.impact(streamforge_core::ImpactType::Reward, None, Some(weigher))
            }

            fn impact(
                self,
                impact_type: streamforge_core::ImpactType,
                weight: Option<Sc>,
                weigher: Option<$crate::stream::function::TupleFn<<Sc as streamforge_core::Score>::Level>>,
            ) -> $crate::stream::ConstraintBuilder<Sc> {
                $crate::stream::ConstraintBuilder::new(self.factory, self.node, impact_type, weight, weigher)
            }
        }
    };
}

/// Generates `join` and `join_stream` towards the next arity.
macro_rules! impl_stream_join {
    ($stream:ident, [$($t:ident),+], $next:ident) => {
        impl<Sc: streamforge_core::Score, $($t: 'static),+> $stream<Sc, $($t),+> {
            /// Joins every live `X` fact matching the joiner.
            pub fn join<X: $crate::fact::Fact>(
                self,
                joiner: $crate::stream::joiner::Joiner<($($t,)+), X>,
            ) -> $crate::stream::$next<Sc, $($t,)+ X> {
                let right = self.factory.source_node::<X>();
                self.join_node(right, joiner)
            }

            /// Joins every tuple of `other` matching the joiner.
            pub fn join_stream<X: 'static>(
                self,
                other: $crate::stream::UniConstraintStream<Sc, X>,
                joiner: $crate::stream::joiner::Joiner<($($t,)+), X>,
            ) -> $crate::stream::$next<Sc, $($t,)+ X> {
                self.join_node(other.node_id(), joiner)
            }

            fn join_node<X: 'static>(
                self,
                right: $crate::graph::NodeId,
                joiner: $crate::stream::joiner::Joiner<($($t,)+), X>,
            ) -> $crate::stream::$next<Sc, $($t,)+ X> {
                let params = joiner.sharing_params();
                let node = self.factory.join_node(self.node, right, params, joiner.into_parts());
                $crate::stream::$next::new(self.factory, node)
            }
        }
    };
}
