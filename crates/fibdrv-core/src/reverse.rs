//! In-place reversal of digit buffers.
//!
//! Digits are stored most significant first; carry and borrow propagation
//! runs least significant first. Reversal flips a buffer between the two.

/// Reverse the content of `buf` up to its first NUL byte, in place.
///
/// A buffer without a NUL is reversed as a whole; the NUL and anything
/// after it are left untouched. `None` is a no-op. Reversing twice
/// restores the original bytes.
///
/// # Example
/// ```
/// use fibdrv_core::reverse::reverse;
///
/// let mut buf = *b"123\0xy";
/// reverse(Some(&mut buf[..]));
/// assert_eq!(&buf, b"321\0xy");
/// assert!(reverse(None).is_none());
/// ```
pub fn reverse(buf: Option<&mut [u8]>) -> Option<&mut [u8]> {
    let buf = buf?;
    let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    reverse_in_place(&mut buf[..len]);
    Some(buf)
}

/// Reverse a whole slice with two converging indices.
pub fn reverse_in_place(buf: &mut [u8]) {
    if buf.len() < 2 {
        return;
    }
    let (mut lo, mut hi) = (0, buf.len() - 1);
    while lo < hi {
        swap_bytes(buf, lo, hi);
        lo += 1;
        hi -= 1;
    }
}

/// Swap two positions; swapping a position with itself is a no-op.
fn swap_bytes(buf: &mut [u8], i: usize, j: usize) {
    if i == j {
        return;
    }
    let (lo, hi) = if i < j { (i, j) } else { (j, i) };
    let (head, tail) = buf.split_at_mut(hi);
    std::mem::swap(&mut head[lo], &mut tail[0]);
}
