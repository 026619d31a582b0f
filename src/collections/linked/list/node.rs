use std::ptr::NonNull;

/// A pointer to the links of a node, or to the sentinel. Links never own what they point at.
pub(crate) type LinkPtr = NonNull<Links>;

pub(crate) struct Links {
    pub prev: LinkPtr,
    pub next: LinkPtr,
}

/// A node carrying a value. The links come first, so a pointer to a Node is also a pointer to its
/// Links.
#[repr(C)]
pub(crate) struct Node<T> {
    pub links: Links,
    pub value: T,
}

impl<T> Node<T> {
    pub const fn new(value: T) -> Node<T> {
        Node {
            links: Links {
                prev: NonNull::dangling(),
                next: NonNull::dangling(),
            },
            value,
        }
    }
}

/// Returns the node after `node`.
///
/// # Safety
/// `node` must point to live links.
pub(crate) unsafe fn next(node: LinkPtr) -> LinkPtr {
    // SAFETY: The caller guarantees that node is live.
    unsafe { (*node.as_ptr()).next }
}

/// Returns the node before `node`.
///
/// # Safety
/// `node` must point to live links.
pub(crate) unsafe fn prev(node: LinkPtr) -> LinkPtr {
    // SAFETY: The caller guarantees that node is live.
    unsafe { (*node.as_ptr()).prev }
}

/// Returns the value held by `node`.
///
/// # Safety
/// `node` must point to the links of a live `Node<T>` (not the sentinel). The returned lifetime is
/// unbounded, so the caller must tie it to the owning list.
pub(crate) unsafe fn value<'a, T>(node: LinkPtr) -> &'a mut T {
    // SAFETY: Links is the first field of a repr(C) Node<T>, so the cast yields the node itself.
    unsafe { &mut (*node.cast::<Node<T>>().as_ptr()).value }
}

/// Inserts `node` directly before `pos`.
///
/// # Safety
/// Both pointers must be live and `node` must not currently be part of a chain.
pub(crate) unsafe fn link(pos: LinkPtr, node: LinkPtr) {
    // SAFETY: The caller guarantees that both are live.
    unsafe {
        let before = prev(pos);
        (*node.as_ptr()).prev = before;
        (*node.as_ptr()).next = pos;
        (*before.as_ptr()).next = node;
        (*pos.as_ptr()).prev = node;
    }
}

/// Removes `node` from its chain, joining its neighbours. The links of `node` are left stale.
///
/// # Safety
/// `node` must be live and part of a chain.
pub(crate) unsafe fn unlink(node: LinkPtr) {
    // SAFETY: The caller guarantees that node and therefore its neighbours are live.
    unsafe {
        let before = prev(node);
        let after = next(node);
        (*before.as_ptr()).next = after;
        (*after.as_ptr()).prev = before;
    }
}

/// Moves the half-open range `[first, last)` so that it sits directly before `pos`. Only six links
/// are rewritten, regardless of how long the range is.
///
/// # Safety
/// All three pointers must be live, `[first, last)` must be a valid range within one chain and
/// `pos` must not lie strictly inside it.
pub(crate) unsafe fn transfer(pos: LinkPtr, first: LinkPtr, last: LinkPtr) {
    if pos == last || pos == first || first == last { return; }

    // SAFETY: The caller guarantees that every node touched is live.
    unsafe {
        let first_prev = prev(first);
        let last_prev = prev(last);
        let pos_prev = prev(pos);

        (*first_prev.as_ptr()).next = last;
        (*last.as_ptr()).prev = first_prev;

        (*pos_prev.as_ptr()).next = first;
        (*first.as_ptr()).prev = pos_prev;
        (*last_prev.as_ptr()).next = pos;
        (*pos.as_ptr()).prev = last_prev;
    }
}

/// Swaps the direction of `node`'s links.
///
/// # Safety
/// `node` must be live.
pub(crate) unsafe fn flip(node: LinkPtr) {
    // SAFETY: The caller guarantees that node is live.
    unsafe {
        let links = &mut *node.as_ptr();
        std::mem::swap(&mut links.prev, &mut links.next);
    }
}
