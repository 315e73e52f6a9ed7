// Terminal step of a stream: the impact and the constraint identity.

use std::fmt;

use streamforge_core::{ConstraintRef, ImpactType, Score};

use super::function::TupleFn;
use super::ConstraintFactory;
use crate::graph::NodeId;

// Builder returned by `penalize` and `reward`.
//
// Finalize it with `as_constraint` or `as_constraint_in` to add the
// constraint to the graph.
pub struct ConstraintBuilder<Sc: Score> {
    factory: ConstraintFactory<Sc>,
    node: NodeId,
    impact_type: ImpactType,
    weight: Option<Sc>,
    weigher: Option<TupleFn<Sc::Level>>,
}

impl<Sc: Score> ConstraintBuilder<Sc> {
    pub(crate) fn new(
        factory: ConstraintFactory<Sc>,
        node: NodeId,
        impact_type: ImpactType,
        weight: Option<Sc>,
        weigher: Option<TupleFn<Sc::Level>>,
    ) -> Self {
        Self {
            factory,
            node,
            impact_type,
            weight,
            weigher,
        }
    }

    pub fn impact_type(&self) -> ImpactType {
        self.impact_type
    }

    // Finalizes the constraint in the default (empty) package.
    pub fn as_constraint(self, name: &str) -> Constraint {
        self.as_constraint_in("", name)
    }

    // Finalizes the constraint; its id is `package/name`.
    pub fn as_constraint_in(self, package: &str, name: &str) -> Constraint {
        let factory = self.factory.clone();
        factory.add_constraint(self, package, name)
    }

    pub(crate) fn into_parts(self) -> (NodeId, ImpactType, Option<Sc>, Option<TupleFn<Sc::Level>>) {
        (self.node, self.impact_type, self.weight, self.weigher)
    }
}

impl<Sc: Score> fmt::Debug for ConstraintBuilder<Sc> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintBuilder")
            .field("node", &self.node)
            .field("impact_type", &self.impact_type)
            .field("weight", &self.weight)
            .field("weighted", &self.weigher.is_some())
            .finish()
    }
}

/// Handle on a constraint defined by a [`ConstraintFactory`].
///
/// A provider returns the handles of the constraints the graph should
/// contain; nodes only used by constraints it leaves out are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub(crate) index: usize,
    constraint_ref: ConstraintRef,
}

impl Constraint {
    pub(crate) fn new(index: usize, constraint_ref: ConstraintRef) -> Self {
        Self { index, constraint_ref }
    }

    pub fn constraint_ref(&self) -> &ConstraintRef {
        &self.constraint_ref
    }

    /// Returns `package/name`, or `name` without package.
    pub fn full_name(&self) -> String {
        self.constraint_ref.full_name()
    }
}
