//! Namespace binding capability
//!
//! Anything that belongs to a namespace (a path, an open file) exposes the
//! identity of that namespace through [`NamespaceBound`]. Callers holding a
//! generic handle use it to find out where the handle lives without knowing
//! its concrete type.

use crate::ids::NamespaceId;

/// Capability: "I belong to exactly one namespace"
pub trait NamespaceBound {
    /// Returns the identity of the owning namespace
    fn namespace_id(&self) -> NamespaceId;

    /// Returns true if `other` lives in the same namespace as `self`
    fn same_namespace(&self, other: &dyn NamespaceBound) -> bool {
        self.namespace_id() == other.namespace_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bound(NamespaceId);

    impl NamespaceBound for Bound {
        fn namespace_id(&self) -> NamespaceId {
            self.0
        }
    }

    #[test]
    fn test_same_namespace() {
        let id = NamespaceId::new();
        let a = Bound(id);
        let b = Bound(id);
        let c = Bound(NamespaceId::new());

        assert!(a.same_namespace(&b));
        assert!(!a.same_namespace(&c));
    }
}
