//! Singly linked bucket chains.
//!
//! A chain is an owned forward list: the bucket slot owns the head entry and
//! every entry owns its successor. New entries are only ever prepended, so an
//! entry's `next` link is written exactly once, when it becomes the head.

use alloc::boxed::Box;

/// Owning link to the next entry of a chain, or the head of a bucket.
pub(crate) type Link<V> = Option<Box<Entry<V>>>;

/// A single node of a bucket chain.
pub(crate) struct Entry<V> {
    pub(crate) value: V,
    /// Hash the value was inserted with. Rebuilds place entries by this hash
    /// so user `Hash` impls are never invoked after insertion.
    pub(crate) hash: u64,
    pub(crate) next: Link<V>,
}

/// Prepends a new entry to the chain headed by `head`.
///
/// Returns `true` if the chain was empty beforehand.
#[inline]
pub(crate) fn push_front<V>(head: &mut Link<V>, hash: u64, value: V) -> bool {
    let next = head.take();
    let was_empty = next.is_none();
    *head = Some(Box::new(Entry { value, hash, next }));
    was_empty
}

/// Drops a chain one entry at a time.
///
/// The derived drop glue would recurse once per entry, which overflows the
/// stack on long collision chains.
pub(crate) fn unlink<V>(mut head: Link<V>) {
    while let Some(mut entry) = head {
        head = entry.next.take();
    }
}

/// Clones a chain, keeping its head-to-tail order.
pub(crate) fn clone_chain<V: Clone>(head: &Link<V>) -> Link<V> {
    let mut cloned: Link<V> = None;
    let mut tail = &mut cloned;
    for entry in Chain::new(head) {
        let node = tail.insert(Box::new(Entry {
            value: entry.value.clone(),
            hash: entry.hash,
            next: None,
        }));
        tail = &mut node.next;
    }
    cloned
}

/// Borrowing walk over a chain, head to tail.
pub(crate) struct Chain<'a, V> {
    cursor: Option<&'a Entry<V>>,
}

impl<'a, V> Chain<'a, V> {
    pub(crate) fn new(head: &'a Link<V>) -> Self {
        Self {
            cursor: head.as_deref(),
        }
    }
}

impl<'a, V> Iterator for Chain<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.cursor?;
        self.cursor = entry.next.as_deref();
        Some(entry)
    }
}

/// Consuming walk over a chain, head to tail.
///
/// Each entry is freed as soon as its value has been moved out.
pub(crate) struct IntoChain<V> {
    cursor: Link<V>,
}

impl<V> IntoChain<V> {
    pub(crate) fn new(head: Link<V>) -> Self {
        Self { cursor: head }
    }
}

impl<V> Iterator for IntoChain<V> {
    type Item = (u64, V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.cursor.take()?;
        let Entry { value, hash, next } = *entry;
        self.cursor = next;
        Some((hash, value))
    }
}

impl<V> Drop for IntoChain<V> {
    fn drop(&mut self) {
        unlink(self.cursor.take());
    }
}
