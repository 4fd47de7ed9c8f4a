//! Owned-node AVL tree with field-keyed multi-match searches.
//!
//! The tree keeps any totally-ordered element type balanced under
//! insertion and supports two multi-result query strategies over string
//! fields of the stored elements:
//!
//! - **Primary search** — keyed on the field that dominates the element
//!   order, so the descent prunes whole subtrees and only fans out
//!   around matching nodes.
//! - **Secondary scan** — keyed on a field that plays no role in the
//!   ordering, so every node is visited and results come back in
//!   primary order.
//!
//! All links are exclusively owned (`Option<Box<…>>`): every node lives
//! in exactly one parent slot, the root in the tree itself, and the
//! mutating operations are recursive descend-then-rebuild walks over
//! those links. The tree is single-threaded; callers that share one
//! instance across threads must serialize access themselves.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`tree`] | [`AvlTree`]: insert/remove, length, searches, renderers, validators |
//! [`keyed`] | [`FieldKeyed`]: the two-string-field capability the searches need |

pub mod keyed;
pub mod tree;

mod node;
mod render;

pub use keyed::FieldKeyed;
pub use tree::AvlTree;
