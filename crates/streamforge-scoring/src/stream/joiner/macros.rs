// Generates joiner constructors for one left arity.

macro_rules! joiner_equal {
    ($left:ident, [$($t:ident : $i:tt),+], $right:ident, $r:ident) => {{
        let params = [
            $crate::graph::Param::of_closure(&$left),
            $crate::graph::Param::of_closure(&$right),
        ];
        $crate::stream::joiner::Joiner::from_part($crate::stream::joiner::JoinerPart::Equal {
            left: erase!($left, [$($t : $i),+], $crate::index::HashKey::new),
            right: erase!($right, [$r : 0], $crate::index::HashKey::new),
            params,
        })
    }};
}

macro_rules! joiner_filtering {
    ($predicate:ident, [$($t:ident : $i:tt),+], $r:ident) => {{
        let param = $crate::graph::Param::of_closure(&$predicate);
        $crate::stream::joiner::Joiner::from_part($crate::stream::joiner::JoinerPart::Filtering {
            predicate: $crate::stream::function::join_predicate(move |left, right| {
                Ok($predicate(
                    $($crate::fact::fact_at::<$t>(left, $i)?,)+
                    $crate::fact::fact_at::<$r>(right, 0)?,
                ))
            }),
            param,
        })
    }};
}

macro_rules! joiner_comparison {
    ($name:ident, $kind:ident, $op:literal, [$($t:ident : $i:tt),+], $r:ident) => {
        #[doc = concat!("Creates a joiner matching when `left(..) ", $op, " right(..)`.")]
        pub fn $name<$($t,)+ $r, K, Fa, Fb>(
            left: Fa,
            right: Fb,
        ) -> $crate::stream::joiner::Joiner<($($t,)+), $r>
        where
            $($t: 'static,)+
            $r: 'static,
            K: Ord + Send + Sync + 'static,
            Fa: Fn($(&$t),+) -> K + Send + Sync + 'static,
            Fb: Fn(&$r) -> K + Send + Sync + 'static,
        {
            let params = [
                $crate::graph::Param::of_closure(&left),
                $crate::graph::Param::of_closure(&right),
            ];
            $crate::stream::joiner::Joiner::from_part($crate::stream::joiner::JoinerPart::Compare {
                kind: $crate::stream::joiner::JoinerType::$kind,
                left: erase!(left, [$($t : $i),+], $crate::index::OrdKey::new),
                right: erase!(right, [$r : 0], $crate::index::OrdKey::new),
                params,
            })
        }
    };
}

macro_rules! joiner_comparisons {
    ([$($t:ident : $i:tt),+], $r:ident) => {
        joiner_comparison!(less_than, LessThan, "<", [$($t : $i),+], $r);
        joiner_comparison!(less_than_or_equal, LessThanOrEqual, "<=", [$($t : $i),+], $r);
        joiner_comparison!(greater_than, GreaterThan, ">", [$($t : $i),+], $r);
        joiner_comparison!(greater_than_or_equal, GreaterThanOrEqual, ">=", [$($t : $i),+], $r);
    };
}

macro_rules! joiner_module {
    ([$($t:ident : $i:tt),+], $r:ident) => {
        /// Creates a joiner matching when `left(..) == right(..)`.
        pub fn equal<$($t,)+ $r, K, Fa, Fb>(
            left: Fa,
            right: Fb,
        ) -> $crate::stream::joiner::Joiner<($($t,)+), $r>
        where
            $($t: 'static,)+
            $r: 'static,
            K: Eq + std::hash::Hash + Send + Sync + 'static,
            Fa: Fn($(&$t),+) -> K + Send + Sync + 'static,
            Fb: Fn(&$r) -> K + Send + Sync + 'static,
        {
            joiner_equal!(left, [$($t : $i),+], right, $r)
        }

        joiner_comparisons!([$($t : $i),+], $r);

        /// Creates a joiner that matches based on a custom predicate.
        pub fn filtering<$($t,)+ $r, F>(predicate: F) -> $crate::stream::joiner::Joiner<($($t,)+), $r>
        where
            $($t: 'static,)+
            $r: 'static,
            F: Fn($(&$t,)+ &$r) -> bool + Send + Sync + 'static,
        {
            joiner_filtering!(predicate, [$($t : $i),+], $r)
        }
    };
}
