// Generates the mapped collectors for one input arity.

macro_rules! collectors {
    ([$($t:ident : $i:tt),+]) => {
        /// Counts the distinct values the mapping produces within a group.
        pub fn count_distinct<$($t,)+ V, F>(mapping: F) -> $crate::stream::collector::Collector<($($t,)+), usize>
        where
            $($t: 'static,)+
            V: Eq + std::hash::Hash + Send + Sync + 'static,
            F: Fn($(&$t),+) -> V + Send + Sync + 'static,
        {
            let param = $crate::graph::Param::of_closure(&mapping);
            let mapping: $crate::stream::function::TupleFn<V> = erase!(mapping, [$($t : $i),+]);
            $crate::stream::collector::Collector::new(
                "count_distinct",
                Some(param),
                std::sync::Arc::new(move || {
                    Box::new($crate::stream::collector::accumulators::CountDistinctAccumulator::new(
                        mapping.clone(),
                    )) as Box<dyn $crate::stream::collector::Accumulator>
                }),
            )
        }

        /// Sums the values the mapping produces within a group.
        pub fn sum<$($t,)+ V, F>(mapping: F) -> $crate::stream::collector::Collector<($($t,)+), V>
        where
            $($t: 'static,)+
            V: $crate::fact::Value
                + Default
                + Copy
                + std::ops::AddAssign
                + std::ops::SubAssign,
            F: Fn($(&$t),+) -> V + Send + Sync + 'static,
        {
            let param = $crate::graph::Param::of_closure(&mapping);
            let mapping: $crate::stream::function::TupleFn<V> = erase!(mapping, [$($t : $i),+]);
            $crate::stream::collector::Collector::new(
                "sum",
                Some(param),
                std::sync::Arc::new(move || {
                    Box::new($crate::stream::collector::accumulators::SumAccumulator::new(
                        mapping.clone(),
                    )) as Box<dyn $crate::stream::collector::Accumulator>
                }),
            )
        }

        /// The smallest value the mapping produces within a group.
        pub fn min<$($t,)+ V, F>(mapping: F) -> $crate::stream::collector::Collector<($($t,)+), Option<V>>
        where
            $($t: 'static,)+
            V: $crate::fact::Value + Ord,
            F: Fn($(&$t),+) -> V + Send + Sync + 'static,
        {
            let param = $crate::graph::Param::of_closure(&mapping);
            let mapping: $crate::stream::function::TupleFn<V> = erase!(mapping, [$($t : $i),+]);
            $crate::stream::collector::Collector::new(
                "min",
                Some(param),
                std::sync::Arc::new(move || {
                    Box::new($crate::stream::collector::accumulators::ExtremumAccumulator::min(
                        mapping.clone(),
                    )) as Box<dyn $crate::stream::collector::Accumulator>
                }),
            )
        }

        /// The largest value the mapping produces within a group.
        pub fn max<$($t,)+ V, F>(mapping: F) -> $crate::stream::collector::Collector<($($t,)+), Option<V>>
        where
            $($t: 'static,)+
            V: $crate::fact::Value + Ord,
            F: Fn($(&$t),+) -> V + Send + Sync + 'static,
        {
            let param = $crate::graph::Param::of_closure(&mapping);
            let mapping: $crate::stream::function::TupleFn<V> = erase!(mapping, [$($t : $i),+]);
            $crate::stream::collector::Collector::new(
                "max",
                Some(param),
                std::sync::Arc::new(move || {
                    Box::new($crate::stream::collector::accumulators::ExtremumAccumulator::max(
                        mapping.clone(),
                    )) as Box<dyn $crate::stream::collector::Accumulator>
                }),
            )
        }

        /// Collects the values the mapping produces, in insertion order.
        pub fn to_list<$($t,)+ V, F>(mapping: F) -> $crate::stream::collector::Collector<($($t,)+), Vec<V>>
        where
            $($t: 'static,)+
            V: $crate::fact::Value,
            F: Fn($(&$t),+) -> V + Send + Sync + 'static,
        {
            let param = $crate::graph::Param::of_closure(&mapping);
            let mapping: $crate::stream::function::TupleFn<V> = erase!(mapping, [$($t : $i),+]);
            $crate::stream::collector::Collector::new(
                "to_list",
                Some(param),
                std::sync::Arc::new(move || {
                    Box::new($crate::stream::collector::accumulators::ToListAccumulator::new(
                        mapping.clone(),
                    )) as Box<dyn $crate::stream::collector::Accumulator>
                }),
            )
        }
    };
}
