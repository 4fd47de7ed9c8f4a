/// Two independently queryable string fields on a stored element.
///
/// `primary_key` must be the dominant (first) component of the element's
/// total order: whenever two elements differ in their primary keys, the
/// element order agrees with the string order of those keys. That is
/// what lets [`AvlTree::find_by_primary`](crate::AvlTree::find_by_primary)
/// prune its descent.
///
/// `secondary_key` carries no such guarantee: the ordering does not
/// expose it in any way a search could exploit (at most it appears as a
/// subordinate tie-break), so
/// [`AvlTree::find_by_secondary`](crate::AvlTree::find_by_secondary)
/// must visit every node.
///
/// Only the two multi-match searches require this capability; the rest
/// of the tree asks for nothing beyond `Ord`.
pub trait FieldKeyed {
    fn primary_key(&self) -> &str;
    fn secondary_key(&self) -> &str;
}
