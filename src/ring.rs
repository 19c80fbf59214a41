/*!
    bounded byte ring buffer shared between the interrupt and task contexts

    one context pushes bytes, the other consumes them. each mutating operation
    updates its cursor last, after the data move, so the single-writer
    single-reader usage needs no locking.
*/


/**
    fixed-capacity byte buffer with independent read (tail) and write (head) cursors

    one storage slot is reserved as full/empty discriminator: `head == tail` always
    means empty and a push that would close the gap is refused, so
    `used_bytes() <= N - 1` at all times.
*/
pub struct RingBuffer<const N: usize> {
    data: [u8; N],
    /// next byte to read
    tail: usize,
    /// next slot to write
    head: usize,
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RingBuffer<N> {
    pub const fn new() -> Self {
        Self {
            data: [0; N],
            tail: 0,
            head: 0,
        }
    }

    pub const fn capacity(&self) -> usize {N}

    /// number of bytes buffered and not yet consumed, correct across wraparound
    pub fn used_bytes(&self) -> usize {
        if self.head >= self.tail
            {self.head - self.tail}
        else
            {N - (self.tail - self.head)}
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// set both cursors to zero, dropping all buffered bytes (storage is not wiped)
    pub fn reset(&mut self) {
        self.tail = 0;
        self.head = 0;
    }

    /**
        append one byte at the head

        returns false and drops the byte when the buffer is full. callers must
        size their buffers for the worst-case burst rather than rely on this.
    */
    pub fn push(&mut self, byte: u8) -> bool {
        let next = (self.head + 1) % N;
        if next == self.tail
            {return false}
        self.data[self.head] = byte;
        self.head = next;
        true
    }

    /// consume and return the byte at the tail, or None when empty
    pub fn pop(&mut self) -> Option<u8> {
        if self.is_empty()
            {return None}
        let byte = self.data[self.tail];
        self.tail = (self.tail + 1) % N;
        Some(byte)
    }

    /**
        read the byte at the given offset past the tail without consuming anything

        the offset wraps around the physical storage. it is the caller's duty to
        keep `offset < used_bytes()`, the scanner only peeks inside a region it
        has already checked is populated.
    */
    pub fn peek(&self, offset: usize) -> u8 {
        self.data[(self.tail + offset) % N]
    }

    /// advance the tail by up to `count` bytes, never past the head
    pub fn advance_tail(&mut self, count: usize) {
        let advance = count.min(self.used_bytes());
        self.tail = (self.tail + advance) % N;
    }

    /**
        view the first `len` logical bytes as at most two physical slices

        the first run extends from the tail to the physical end of storage, the
        second wraps back to index zero. `len` is clamped to `used_bytes()`.
        this is the only wraparound primitive the frame validator needs, it
        keeps all cursor arithmetic inside this module.
    */
    pub fn runs(&self, len: usize) -> (&[u8], &[u8]) {
        let len = len.min(self.used_bytes());
        let first = len.min(N - self.tail);
        (
            &self.data[self.tail .. self.tail + first],
            &self.data[.. len - first],
        )
    }

    /**
        copy up to `dest.len()` buffered bytes into `dest` and consume them

        returns the number of bytes copied. fails closed (nothing copied) when
        asked for more than the whole storage; cursors found out of range mean
        the buffer memory was corrupted, the buffer resets itself in that case.
    */
    pub fn flush_out(&mut self, dest: &mut [u8]) -> usize {
        if dest.len() > N
            {return 0}
        if self.head >= N || self.tail >= N {
            self.reset();
            return 0;
        }
        let (first, second) = self.runs(dest.len());
        let (n1, n2) = (first.len(), second.len());
        dest[.. n1].copy_from_slice(first);
        dest[n1 .. n1+n2].copy_from_slice(second);
        self.advance_tail(n1 + n2);
        n1 + n2
    }

    /**
        copy bytes from `src` into the buffer at the head

        returns the number of bytes actually written, less than `src.len()` when
        free space runs out. the reserved discriminator slot is never written.
    */
    pub fn flush_in(&mut self, src: &[u8]) -> usize {
        if self.head >= N || self.tail >= N {
            self.reset();
            return 0;
        }
        let free = N - 1 - self.used_bytes();
        let count = src.len().min(free);
        let first = count.min(N - self.head);
        self.data[self.head .. self.head + first].copy_from_slice(&src[.. first]);
        self.data[.. count - first].copy_from_slice(&src[first .. count]);
        self.head = (self.head + count) % N;
        count
    }
}
