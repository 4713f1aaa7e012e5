//! Karatsuba multiplication.

use super::{simple, THRESHOLD_SIMPLE};
use crate::{add, arch::word::Word, memory::Memory};

pub const MIN_LEN: usize = 2;

/// Scratch words required for a same-length Karatsuba multiplication.
///
/// Each level needs two operand sums of `h = n - n/2 + 1` words and their
/// `2h`-word product, then recurses on `h`.
pub fn memory_requirement_up_to(n: usize) -> usize {
    let mut req = 0;
    let mut len = n;
    while len > THRESHOLD_SIMPLE {
        let h = len - len / 2 + 1;
        req += 4 * h;
        len = h;
    }
    req
}

/// dest = a * b with `a.len() == b.len() == n` and `dest.len() == 2n`.
pub fn mul_same_len(dest: &mut [Word], a: &[Word], b: &[Word], memory: &mut Memory) {
    let n = a.len();
    debug_assert!(b.len() == n && dest.len() == 2 * n);

    if n <= THRESHOLD_SIMPLE {
        simple::mul(dest, a, b);
        return;
    }

    let m = n / 2;
    let h = n - m;
    let (a0, a1) = a.split_at(m);
    let (b0, b1) = b.split_at(m);

    // dest = a0 * b0 + a1 * b1 * B^2m
    {
        let (dest_lo, dest_hi) = dest.split_at_mut(2 * m);
        mul_same_len(dest_lo, a0, b0, memory);
        mul_same_len(dest_hi, a1, b1, memory);
    }

    // z1 = (a0 + a1)(b0 + b1) - a0 b0 - a1 b1 = a0 b1 + a1 b0 >= 0
    let (sa, mut memory) = memory.allocate_slice_copy_fill(h + 1, a1, 0);
    if add::add_in_place(&mut sa[..h], a0) {
        sa[h] = 1;
    }
    let (sb, mut memory) = memory.allocate_slice_copy_fill(h + 1, b1, 0);
    if add::add_in_place(&mut sb[..h], b0) {
        sb[h] = 1;
    }
    let (z1, mut memory) = memory.allocate_slice_fill(2 * (h + 1), 0);
    mul_same_len(z1, sa, sb, &mut memory);
    let borrow = add::sub_in_place(z1, &dest[..2 * m]);
    debug_assert!(!borrow);
    let borrow = add::sub_in_place(z1, &dest[2 * m..]);
    debug_assert!(!borrow);

    // dest += z1 * B^m; the top words of z1 beyond the value bound are zero
    let tail = &mut dest[m..];
    let len = z1.len().min(tail.len());
    debug_assert!(z1[len..].iter().all(|&w| w == 0));
    let carry = add::add_in_place(&mut tail[..len], &z1[..len]);
    debug_assert!(!carry);
}
