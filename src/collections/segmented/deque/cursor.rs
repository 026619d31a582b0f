use std::mem;
use std::ptr::NonNull;

/// The number of elements held by each segment of a [`Deque<T>`](super::Deque).
///
/// Small types are packed into roughly 4096 bytes per segment, larger ones get 16 elements each.
/// Zero-sized types never allocate, so their segments are just large.
pub(crate) const fn block_len<T>() -> usize {
    let size = mem::size_of::<T>();
    if size == 0 {
        4096
    } else if size < 256 {
        4096 / size
    } else {
        16
    }
}

/// A position within a segmented store: the slot of its segment in the map, the start of that
/// segment and the offset of the element within it.
///
/// A Cursor is a plain value. It stays valid until the map is reallocated (which moves slots) or the
/// segment it points into is released, but nothing stops a stale Cursor from being used. Callers
/// must only move a Cursor between positions that lie within the live range of the map.
pub(crate) struct Cursor<T> {
    pub slot: usize,
    pub first: NonNull<T>,
    pub offset: usize,
}

impl<T> Cursor<T> {
    pub const BLOCK: usize = block_len::<T>();

    /// A Cursor for a store that hasn't allocated its map yet.
    pub const fn dangling() -> Cursor<T> {
        Cursor {
            slot: 0,
            first: NonNull::dangling(),
            offset: 0,
        }
    }

    /// Creates a Cursor pointing at `offset` within the segment held in `slot`.
    ///
    /// # Safety
    /// `slot` must hold a live segment pointer in `map`.
    pub unsafe fn new(map: NonNull<NonNull<T>>, slot: usize, offset: usize) -> Cursor<T> {
        Cursor {
            slot,
            // SAFETY: The caller guarantees that slot is live.
            first: unsafe { map.add(slot).read() },
            offset,
        }
    }

    /// The element this Cursor points at.
    pub const fn ptr(&self) -> NonNull<T> {
        // SAFETY: offset < BLOCK, which is within the segment.
        unsafe { self.first.add(self.offset) }
    }

    /// Moves to the next position, landing on the first element of the next slot when stepping off
    /// the end of a segment.
    ///
    /// # Safety
    /// The next position must be within the live range of `map`.
    pub unsafe fn step_forward(&mut self, map: NonNull<NonNull<T>>) {
        self.offset += 1;
        if self.offset == Self::BLOCK {
            // SAFETY: The caller guarantees that the next slot is live.
            *self = unsafe { Cursor::new(map, self.slot + 1, 0) };
        }
    }

    /// Moves to the previous position, landing on the last element of the previous slot when
    /// stepping off the start of a segment.
    ///
    /// # Safety
    /// The previous position must be within the live range of `map`.
    pub unsafe fn step_back(&mut self, map: NonNull<NonNull<T>>) {
        if self.offset == 0 {
            // SAFETY: The caller guarantees that the previous slot is live.
            *self = unsafe { Cursor::new(map, self.slot - 1, Self::BLOCK - 1) };
        } else {
            self.offset -= 1;
        }
    }

    /// Returns a Cursor `n` positions further on. Only reloads the segment if a boundary is crossed.
    ///
    /// # Safety
    /// The resulting position must be within the live range of `map`.
    pub unsafe fn forward(&self, map: NonNull<NonNull<T>>, n: usize) -> Cursor<T> {
        let pos = self.offset + n;
        if pos < Self::BLOCK {
            Cursor {
                offset: pos,
                ..*self
            }
        } else {
            // SAFETY: The caller guarantees that the resulting slot is live.
            unsafe { Cursor::new(map, self.slot + pos / Self::BLOCK, pos % Self::BLOCK) }
        }
    }

    /// Returns a Cursor `n` positions back.
    ///
    /// # Safety
    /// The resulting position must be within the live range of `map`.
    pub unsafe fn backward(&self, map: NonNull<NonNull<T>>, n: usize) -> Cursor<T> {
        if n <= self.offset {
            Cursor {
                offset: self.offset - n,
                ..*self
            }
        } else {
            let back = n - self.offset - 1;
            let slot = self.slot - 1 - back / Self::BLOCK;
            // SAFETY: The caller guarantees that the resulting slot is live.
            unsafe { Cursor::new(map, slot, Self::BLOCK - 1 - back % Self::BLOCK) }
        }
    }

    /// The number of positions from `other` to self, where other must not come after self.
    pub const fn distance_from(&self, other: &Cursor<T>) -> usize {
        (self.slot - other.slot) * Self::BLOCK + self.offset - other.offset
    }
}

impl<T> Clone for Cursor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<T> {}

impl<T> PartialEq for Cursor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot && self.offset == other.offset
    }
}

impl<T> Eq for Cursor<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_len() {
        assert_eq!(block_len::<u8>(), 4096);
        assert_eq!(block_len::<u64>(), 512);
        assert_eq!(block_len::<[u8; 255]>(), 16);
        assert_eq!(block_len::<[u8; 1024]>(), 16);
        assert_eq!(block_len::<()>(), 4096);
    }

    #[test]
    fn test_boundary_reload() {
        let mut first = [0_u64; 512];
        let mut second = [0_u64; 512];
        let mut map = [
            NonNull::from(&mut first).cast::<u64>(),
            NonNull::from(&mut second).cast::<u64>(),
        ];
        let map_ptr = NonNull::from(&mut map).cast::<NonNull<u64>>();

        // SAFETY: Both slots are live and every position used stays within them.
        unsafe {
            let mut cursor = Cursor::new(map_ptr, 0, 511);
            cursor.step_forward(map_ptr);
            assert_eq!(cursor.slot, 1);
            assert_eq!(cursor.offset, 0, "Stepping off a segment should land on the next start.");
            assert_eq!(cursor.ptr(), map[1]);

            cursor.step_back(map_ptr);
            assert_eq!((cursor.slot, cursor.offset), (0, 511));

            let start = Cursor::new(map_ptr, 0, 3);
            let moved = start.forward(map_ptr, 600);
            assert_eq!((moved.slot, moved.offset), (1, 91));
            assert_eq!(moved.distance_from(&start), 600);
            assert!(moved.backward(map_ptr, 600) == start);
        }
    }
}
