//! The hard core: bottom-up rank maintenance after a link and after a
//! splice, plus the handful of structural primitives (link, replace,
//! traversal) the rest of the crate is built from.
//!
//! Every routine here is iterative and walks only parent pointers upward,
//! never recursion, never an auxiliary stack, matching the worst-case
//! stack-usage contract of the Linux-style wavl tree C implementation this
//! was ported from.

use std::ptr::NonNull;

use crate::node::{
    child, copy_header, copy_parent_parity_word, empty_node, is_leaf, node_parity, parent_of,
    parity_of, set_child, set_parent, set_parent_parity, side_of_link, Link, Node, Side,
};

/// Installs `node` as a fresh leaf (rank 0, no children) under `parent` in
/// the given `side` slot, or as the root if `parent` is absent. The caller
/// must invoke [`insert_fixup`] immediately afterward.
pub(crate) unsafe fn link<T>(node: NonNull<Node<T>>, parent: Link<T>, side: Side, root: &mut Link<T>) {
    set_parent_parity(node, parent, false);
    set_child(node, Side::Left, None);
    set_child(node, Side::Right, None);
    match parent {
        Some(p) => set_child(p, side, Some(node)),
        None => *root = Some(node),
    }
}

/// Restores the rank rule after `node` was attached by [`link`].
pub(crate) unsafe fn insert_fixup<T>(node: NonNull<Node<T>>, root: &mut Link<T>) {
    let mut x = node;
    let mut parity = node_parity(x);
    let mut parent = parent_of(x);
    // The node we most recently promoted away from, used to tell a single
    // rotation from a double rotation without re-deriving it from scratch.
    let mut prev_x: Link<T> = None;

    while let Some(p) = parent {
        parity = !parity;
        if parity == node_parity(p) {
            tracing::trace!("insert fixup settles, rank rule already satisfied");
            return;
        }

        let side = side_of_link(p, Some(x));
        let far = side.opposite();
        let sibling = child(p, far);

        if parity == parity_of(sibling) {
            // Case A: sibling is a 1-child. Promoting p pushes the 0-child
            // violation (if any) one level up.
            tracing::trace!("insert fixup: promote and climb");
            prev_x = Some(x);
            x = p;
            parent = parent_of(x);
            set_parent_parity(x, parent, parity);
            continue;
        }

        // Case B: sibling is a 2-child, p is a 0,2-node. One rotation ends
        // the fixup.
        let mut z = child(x, far);
        let double_rotation = matches!((z, prev_x), (Some(zn), Some(pxn)) if zn == pxn);

        if double_rotation {
            tracing::trace!("insert fixup: double rotation");
            let zn = z.expect("double_rotation implies z is Some");
            let w = child(zn, side);
            set_child(x, far, w);
            set_child(zn, side, Some(x));
            if let Some(w) = w {
                set_parent(w, x);
            }
            set_parent_parity(x, Some(zn), parity);
            x = zn;
            z = child(x, far);
        } else {
            tracing::trace!("insert fixup: single rotation");
        }

        set_child(x, far, Some(p));
        set_child(p, side, z);
        if let Some(z) = z {
            set_parent(z, p);
        }
        rotate_set_parents(p, x, root, parity);
        return;
    }
}

/// Unlinks `v` from the tree and restores the rank rule. `v` must currently
/// be part of the tree rooted at `root`.
pub(crate) unsafe fn erase<T>(v: NonNull<Node<T>>, root: &mut Link<T>) {
    let l = child(v, Side::Left);
    let r = child(v, Side::Right);
    let pv = parent_of(v);

    let structural_replacement: Link<T>;
    let spliced_child: Link<T>;
    let affected_parent: Link<T>;

    if l.is_none() || r.is_none() {
        let only_child = if r.is_none() { l } else { r };
        structural_replacement = only_child;
        spliced_child = only_child;
        affected_parent = pv;
    } else {
        let right = r.expect("checked above");
        let mut successor = right;
        while let Some(left) = child(successor, Side::Left) {
            successor = left;
        }

        set_child(successor, Side::Left, l);
        set_parent(l.expect("checked above"), successor);
        let successors_child = child(successor, Side::Right);

        let ps;
        if right != successor {
            set_parent(right, successor);
            set_child(successor, Side::Right, Some(right));
            let real_parent = parent_of(successor).expect("successor is not the root");
            set_child(real_parent, Side::Left, successors_child);
            ps = Some(real_parent);
        } else {
            ps = Some(successor);
        }
        copy_parent_parity_word(successor, v);

        structural_replacement = Some(successor);
        spliced_child = successors_child;
        affected_parent = ps;
    }

    change_child(v, structural_replacement, pv, root);
    if let Some(spliced) = spliced_child {
        set_parent(spliced, affected_parent.expect("spliced child always has a parent"));
    }
    if let Some(parent) = affected_parent {
        erase_fixup(spliced_child, parent, root);
    }
}

/// The 3-child fixup loop run after a splice. `x` is the node (possibly
/// absent) whose rank just effectively dropped; `parent` is its parent.
unsafe fn erase_fixup<T>(mut x: Link<T>, p0: NonNull<Node<T>>, root: &mut Link<T>) {
    let mut parity1 = parity_of(x);
    let mut parent;

    if is_leaf(p0) {
        // The removed node's parent lost its last child: a 2,2-leaf. Demote
        // it once before looking at whether that itself under-ranks it.
        parity1 = !parity1;
        let grandparent = parent_of(p0);
        set_parent_parity(p0, grandparent, parity1);
        x = Some(p0);
        parent = grandparent;
    } else {
        parent = Some(p0);
    }

    while let Some(p) = parent {
        let parity2 = node_parity(p);
        if parity1 == parity2 {
            tracing::trace!("erase fixup settles, rank rule already satisfied");
            return;
        }

        let side = side_of_link(p, x);
        let far = side.opposite();
        let mut sibling = child(p, far).expect("a 3-child always has a sibling");

        if parity1 != node_parity(sibling) {
            // Case 1: p is a 3,2-node. Demote p and keep climbing.
            tracing::trace!("erase fixup: demote parent and climb");
            x = Some(p);
            parent = parent_of(p);
            set_parent_parity(p, parent, parity1);
            continue;
        }

        // p is a 3,1-node: sibling is a 1-child.
        let outer = child(sibling, far);
        let mut inner = child(sibling, side);
        let final_parity;

        if parity2 != parity_of(outer) {
            if parity2 != parity_of(inner) {
                // Case 2: sibling is a 2,2-node. Demote both and keep climbing.
                tracing::trace!("erase fixup: demote parent and sibling, climb");
                set_parent_parity(sibling, Some(p), parity2);
                x = Some(p);
                parent = parent_of(p);
                set_parent_parity(p, parent, parity1);
                continue;
            }
            // Case 4: double rotation through sibling's near child.
            tracing::trace!("erase fixup: double rotation");
            let z = inner.expect("outer is a 2-child, inner must be the 1-child");
            let w = child(z, far);
            set_child(sibling, side, w);
            set_child(z, far, Some(sibling));
            if let Some(w) = w {
                set_parent(w, sibling);
            }
            set_parent_parity(sibling, Some(z), parity2);
            sibling = z;
            inner = child(sibling, side);
            final_parity = parity2;
        } else {
            // Case 3: single rotation; outer is the 1-child.
            tracing::trace!("erase fixup: single rotation");
            final_parity = if x != inner { parity1 } else { parity2 };
        }

        set_child(sibling, side, Some(p));
        set_child(p, far, inner);
        if let Some(inner) = inner {
            set_parent(inner, p);
        }
        rotate_set_parents(p, sibling, root, final_parity);
        return;
    }
}

/// Swaps `victim`'s header for `new`'s, preserving structural position.
/// Caller must ensure `new` carries an equivalent key so BST order holds.
pub(crate) unsafe fn replace<T>(victim: NonNull<Node<T>>, new: NonNull<Node<T>>, root: &mut Link<T>) {
    let parent = parent_of(victim);
    change_child(victim, Some(new), parent, root);
    if let Some(l) = child(victim, Side::Left) {
        set_parent(l, new);
    }
    if let Some(r) = child(victim, Side::Right) {
        set_parent(r, new);
    }
    copy_header(new, victim);
}

pub(crate) unsafe fn first<T>(root: Link<T>) -> Link<T> {
    let mut node = root?;
    while let Some(left) = child(node, Side::Left) {
        node = left;
    }
    Some(node)
}

pub(crate) unsafe fn last<T>(root: Link<T>) -> Link<T> {
    let mut node = root?;
    while let Some(right) = child(node, Side::Right) {
        node = right;
    }
    Some(node)
}

pub(crate) unsafe fn next<T>(node: NonNull<Node<T>>) -> Link<T> {
    if empty_node(node) {
        return None;
    }
    if let Some(right) = child(node, Side::Right) {
        return first(Some(right));
    }
    let mut cur = node;
    loop {
        let parent = parent_of(cur)?;
        if child(parent, Side::Right) != Some(cur) {
            return Some(parent);
        }
        cur = parent;
    }
}

pub(crate) unsafe fn prev<T>(node: NonNull<Node<T>>) -> Link<T> {
    if empty_node(node) {
        return None;
    }
    if let Some(left) = child(node, Side::Left) {
        return last(Some(left));
    }
    let mut cur = node;
    loop {
        let parent = parent_of(cur)?;
        if child(parent, Side::Left) != Some(cur) {
            return Some(parent);
        }
        cur = parent;
    }
}

unsafe fn change_child<T>(old: NonNull<Node<T>>, new: Link<T>, parent: Link<T>, root: &mut Link<T>) {
    match parent {
        Some(p) => {
            if child(p, Side::Left) == Some(old) {
                set_child(p, Side::Left, new);
            } else {
                set_child(p, Side::Right, new);
            }
        }
        None => *root = new,
    }
}

unsafe fn rotate_set_parents<T>(old: NonNull<Node<T>>, new: NonNull<Node<T>>, root: &mut Link<T>, parity: bool) {
    let parent = parent_of(old);
    copy_parent_parity_word(new, old);
    set_parent_parity(old, Some(new), parity);
    change_child(old, Some(new), parent, root);
}
