//! "Karatsuba Square Root" with remainder.
//!
//! Reference: Zimmermann, P. (1999). Karatsuba square root
//! (Research report 3805, INRIA). <https://hal.inria.fr/inria-00072854/en/>

use crate::{
    add,
    arch::word::{DoubleWord, Word},
    cmp, div,
    fast_divide::{FastDivideNormalized, FastDivideNormalized2},
    math::bit_len_dword,
    memory::{self, Memory},
    mul,
    primitive::{double_word, highest_dword, split_dword, DWORD_BITS, WORD_BITS},
    shift,
};
use core::cmp::Ordering;

/// Memory requirement in words for [sqrt_rem] on `2n` input words.
pub fn memory_requirement_sqrt_rem(n: usize) -> usize {
    let mut req = 0;
    let mut len = n;
    while len > 1 {
        let l = len / 2;
        let h = len - l;
        // dividend + doubled remainder + signed residue + square + 2s scratch
        let level = (h + l + 1) + (h + 1) + (len + 2) + 2 * l + (len + 1)
            + mul::memory_requirement_up_to(l);
        req = memory::add_capacity(req, level);
        len = h;
    }
    req
}

/// Integer square root of a `DoubleWord` with remainder.
///
/// Requires the top two bits of `a` to be non-zero, so that the root is a
/// normalized `Word`.
fn sqrt_rem_dword(a: DoubleWord) -> (Word, DoubleWord) {
    debug_assert!(a >> (DWORD_BITS - 2) != 0);

    // x0 = 2^ceil(bits/2) >= sqrt(a); the Newton sequence is decreasing and
    // stops exactly at floor(sqrt(a))
    let mut x: DoubleWord = 1 << ((bit_len_dword(a) + 1) / 2);
    loop {
        let y = (x + a / x) / 2;
        if y >= x {
            break;
        }
        x = y;
    }
    let s = x as Word;
    (s, a - x * x)
}

/// Square root with remainder: `s = floor(sqrt(a))`, `a = s^2 + r`.
///
/// `a.len() == 2 * s.len()` and the top limb of `a` must be at least B/4
/// (i.e. the top two bits of `a` are not both zero), which guarantees that
/// the root is normalized (top bit set).
///
/// `a` is consumed: on return its low `s.len()` words hold the remainder,
/// and the returned word (0 or 1) is the remainder's top carry, so that
/// `r = ret * B^n + a[..n]` with `r <= 2s`.
pub fn sqrt_rem(s: &mut [Word], a: &mut [Word], memory: &mut Memory) -> Word {
    let n = s.len();
    debug_assert!(a.len() == 2 * n);
    debug_assert!(*a.last().unwrap() >> (WORD_BITS - 2) != 0);

    if n == 1 {
        let (s0, r) = sqrt_rem_dword(double_word(a[0], a[1]));
        s[0] = s0;
        let (r0, r1) = split_dword(r);
        a[0] = r0;
        a[1] = 0;
        return r1;
    }

    let l = n / 2;
    let h = n - l;

    // 1. root of the high part: s1 in s[l..], remainder r1 in a[2l..2l+h]
    let r1h = sqrt_rem(&mut s[l..], &mut a[2 * l..], memory);

    // 2. divide (r1 * B^l + a[l..2l]) by 2 * s1; halving the dividend first
    //    lets us divide by s1 itself, which is normalized
    let (d, mut memory) = memory.allocate_slice_copy(&a[l..2 * l + h]);
    let dropped = shift::shr_in_place_with_carry(d, 1, r1h << (WORD_BITS - 1));
    let b0 = dropped >> (WORD_BITS - 1);

    let (u, mut memory) = memory.allocate_slice_fill(h + 1, 0);
    let mut q_all_ones = false;
    if cmp::cmp_same_len(&d[l..], &s[l..]) == Ordering::Less {
        if h >= 2 {
            let fast_div = FastDivideNormalized2::new(highest_dword(&s[l..]));
            let carry = div::div_rem_in_place(d, &s[l..], fast_div);
            debug_assert!(!carry);
        } else {
            // n == 2: a single-word divisor
            let fast_div = FastDivideNormalized::new(s[l]);
            let (q0, r0) = fast_div.div_rem(double_word(d[0], d[1]));
            d[0] = r0;
            d[1] = q0;
        }
        u[..h].copy_from_slice(&d[..h]);
    } else {
        // the quotient is exactly B^l; take q = B^l - 1 and adjust the
        // remainder by s1 so that q * s1 + u2 is preserved
        q_all_ones = true;
        let borrow = add::sub_same_len_in_place(&mut d[l..], &s[l..]);
        debug_assert!(!borrow);
        debug_assert!(d[l..].iter().all(|&w| w == 0));
        u[..l].copy_from_slice(&d[..l]);
        let carry = add::add_in_place(&mut u[..h], &s[l..]);
        if carry {
            u[h] = 1;
        }
    }
    // u = 2 * u2 + b0 is the remainder of the division by 2 * s1
    let carry = shift::shl_in_place(u, 1);
    debug_assert!(carry == 0);
    u[0] |= b0;

    // 3. s = s1 * B^l + q
    if q_all_ones {
        for word in s[..l].iter_mut() {
            *word = Word::MAX;
        }
    } else {
        s[..l].copy_from_slice(&d[h..h + l]);
    }

    // 4. residue R = u * B^l + a0 - q^2, adjust s until 0 <= R <= 2s
    let (r, mut memory) = memory.allocate_slice_fill(n + 2, 0);
    r[..l].copy_from_slice(&a[..l]);
    r[l..l + h + 1].copy_from_slice(u);

    let (t, mut memory) = memory.allocate_slice_fill(2 * l, 0);
    mul::mul(t, &s[..l], &s[..l], &mut memory);

    let mut negative = cmp::cmp(r, t) == Ordering::Less;
    if !negative {
        let borrow = add::sub_in_place(r, t);
        debug_assert!(!borrow);
    } else {
        // keep the magnitude T - R in t
        debug_assert!(r[2 * l..].iter().all(|&w| w == 0));
        let borrow = add::sub_in_place(t, &r[..2 * l]);
        debug_assert!(!borrow);
    }

    let (ts, _memory) = memory.allocate_slice_fill(n + 1, 0);
    while negative {
        // s -= 1; R += 2s + 1 (with the decremented s)
        let borrow = add::sub_word_in_place(s, 1);
        debug_assert!(!borrow);
        ts[..n].copy_from_slice(s);
        ts[n] = shift::shl_in_place(&mut ts[..n], 1);
        let carry = add::add_word_in_place(ts, 1);
        debug_assert!(!carry);
        // R = (2s + 1) - M where M is the stored magnitude
        match cmp::cmp(ts, t) {
            Ordering::Less => {
                // still negative, M -= 2s + 1
                let borrow = add::sub_in_place(t, ts);
                debug_assert!(!borrow);
            }
            _ => {
                let borrow = add::sub_in_place(ts, t);
                debug_assert!(!borrow);
                r.fill(0);
                r[..n + 1].copy_from_slice(ts);
                negative = false;
            }
        }
    }
    loop {
        // R > 2s means s is too small
        ts[..n].copy_from_slice(s);
        ts[n] = shift::shl_in_place(&mut ts[..n], 1);
        if cmp::cmp(r, ts) != Ordering::Greater {
            break;
        }
        let borrow = add::sub_in_place(r, ts);
        debug_assert!(!borrow);
        let borrow = add::sub_word_in_place(r, 1);
        debug_assert!(!borrow);
        let carry = add::add_word_in_place(s, 1);
        debug_assert!(!carry);
    }

    a[..n].copy_from_slice(&r[..n]);
    for word in a[n..].iter_mut() {
        *word = 0;
    }
    debug_assert!(r[n] <= 1 && r[n + 1] == 0);
    r[n]
}
