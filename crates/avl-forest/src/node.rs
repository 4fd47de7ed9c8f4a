pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// A single tree node. Each child link exclusively owns its subtree; the
/// node itself is owned by one parent slot (or by the tree's root link).
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    pub left: Link<T>,
    pub right: Link<T>,
    pub elem: T,
    pub height: i32,
}

impl<T> Node<T> {
    pub fn new(elem: T) -> Self {
        Self {
            left: None,
            right: None,
            elem,
            height: 1,
        }
    }

    /// Height of an optional subtree; an absent child has height 0.
    pub fn height_of(link: &Link<T>) -> i32 {
        link.as_ref().map_or(0, |n| n.height)
    }

    pub fn update_height(&mut self) {
        self.height = 1 + Self::height_of(&self.left).max(Self::height_of(&self.right));
    }

    /// Balance factor: left height minus right height.
    pub fn balance_factor(&self) -> i32 {
        Self::height_of(&self.left) - Self::height_of(&self.right)
    }
}

/// Right rotation around `n`: the left child becomes the subtree root and
/// its former right subtree moves under `n`. Only the two pivots get
/// their heights recomputed.
pub(crate) fn rotate_right<T>(mut n: Box<Node<T>>) -> Box<Node<T>> {
    let mut l = n.left.take().expect("right rotation requires a left child");
    n.left = l.right.take();
    n.update_height();
    l.right = Some(n);
    l.update_height();
    l
}

/// Mirror of [`rotate_right`].
pub(crate) fn rotate_left<T>(mut n: Box<Node<T>>) -> Box<Node<T>> {
    let mut r = n.right.take().expect("left rotation requires a right child");
    n.right = r.left.take();
    n.update_height();
    r.left = Some(n);
    r.update_height();
    r
}
