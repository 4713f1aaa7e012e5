//! Seeded random differential tests: every rounded result is checked
//! against an exact wide computation of the same expression.

use core::cmp::Ordering;
use mantis_float::{Float, Round};
use rand::prelude::*;

mod util;
use util::MODES;

/// A random positive regular value: `prec` significant bits, exponent
/// within ±`espan`.
fn random_pos(rng: &mut StdRng, prec: usize, espan: i64) -> Float {
    let mut x = Float::new(prec);
    loop {
        let v = rng.gen::<u64>();
        if v != 0 {
            let _ = x.assign_u64(v, Round::Zero);
            break;
        }
    }
    let _ = x.mul_pow2(rng.gen_range(-espan..espan), Round::Zero);
    x
}

/// Widen `x` by zero padding; exact by construction.
fn widen(x: &Float, prec: usize) -> Float {
    let mut w = Float::new(prec);
    let tern = w.assign(x, Round::Zero);
    assert_eq!(tern, Ordering::Equal);
    w
}

#[test]
fn test_add_matches_exact_rounding() {
    let mut rng = StdRng::seed_from_u64(41);
    for _ in 0..200 {
        let pa = rng.gen_range(2..64);
        let pb = rng.gen_range(2..64);
        let prec = rng.gen_range(2..64);
        let mut a = random_pos(&mut rng, pa, 40);
        let b = random_pos(&mut rng, pb, 40);
        if rng.gen() {
            a.negate();
        }

        // the exact sum fits in max(pa, pb) + 82 bits given the bounded
        // exponent span
        let mut exact = Float::new(200);
        let t = exact.add(&a, &b, Round::Zero);
        assert_eq!(t, Ordering::Equal);

        for rnd in MODES {
            let mut direct = Float::new(prec);
            let t1 = direct.add(&a, &b, rnd);
            let mut via = Float::new(prec);
            // rounding the exact sum must agree in value and ternary
            let t2 = via.assign(&exact, rnd);
            assert_eq!(t1, t2, "mode {:?}: {:?} vs {:?}", rnd, direct, via);
            assert!(direct == via, "mode {:?}: {:?} vs {:?}", rnd, direct, via);
        }
    }
}

#[test]
fn test_sub_matches_exact_rounding() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let pa = rng.gen_range(2..70);
        let pb = rng.gen_range(2..70);
        let prec = rng.gen_range(2..70);
        let a = random_pos(&mut rng, pa, 50);
        let b = random_pos(&mut rng, pb, 50);

        let mut exact = Float::new(260);
        let t = exact.sub(&a, &b, Round::Zero);
        assert_eq!(t, Ordering::Equal);

        for rnd in MODES {
            let mut direct = Float::new(prec);
            let t1 = direct.sub(&a, &b, rnd);
            let mut via = Float::new(prec);
            let t2 = via.assign(&exact, rnd);
            assert_eq!(t1, t2, "mode {:?}", rnd);
            assert!(direct == via || (direct.is_zero() && via.is_zero()));
        }
    }
}

#[test]
fn test_mul_matches_exact_rounding() {
    let mut rng = StdRng::seed_from_u64(43);
    for _ in 0..200 {
        let pa = rng.gen_range(2..100);
        let pb = rng.gen_range(2..100);
        let prec = rng.gen_range(2..100);
        let mut a = random_pos(&mut rng, pa, 60);
        let b = random_pos(&mut rng, pb, 60);
        if rng.gen() {
            a.negate();
        }

        // a product of pa * pb significant bits is exact at pa + pb bits
        let mut exact = Float::new(pa + pb);
        let t = exact.mul(&a, &b, Round::Zero);
        assert_eq!(t, Ordering::Equal);

        for rnd in MODES {
            let mut direct = Float::new(prec);
            let t1 = direct.mul(&a, &b, rnd);
            let mut via = Float::new(prec);
            let t2 = via.assign(&exact, rnd);
            assert_eq!(t1, t2, "mode {:?}", rnd);
            assert!(direct == via);
        }
    }
}

#[test]
fn test_wide_mul_short_product_consistency() {
    // wide precisions exercise the short product with its exact fallback;
    // narrowing the same exact product must agree
    let mut rng = StdRng::seed_from_u64(44);
    for _ in 0..20 {
        let pa = rng.gen_range(900..1400);
        let pb = rng.gen_range(900..1400);
        let prec = rng.gen_range(800..900);
        let a = {
            let mut x = random_pos(&mut rng, 64, 10);
            let w = widen(&x, pa);
            x = w;
            // fill the low bits so the mantissa is not mostly zero
            let noise = random_pos(&mut rng, 64, 5);
            let mut dense = Float::new(pa);
            let _ = dense.div(&x, &noise, Round::HalfEven);
            dense
        };
        let b = {
            let noise = random_pos(&mut rng, 64, 5);
            let mut dense = Float::new(pb);
            let _ = dense.div(&a, &noise, Round::HalfEven);
            dense
        };

        let mut exact = Float::new(pa + pb);
        let t = exact.mul(&a, &b, Round::Zero);
        assert_eq!(t, Ordering::Equal);

        for rnd in MODES {
            let mut direct = Float::new(prec);
            let t1 = direct.mul(&a, &b, rnd);
            let mut via = Float::new(prec);
            let t2 = via.assign(&exact, rnd);
            assert_eq!(t1, t2, "mode {:?}", rnd);
            assert!(direct == via);
        }
    }
}

#[test]
fn test_div_value_brackets() {
    // the rounded quotient, multiplied back exactly, brackets the dividend
    // on the side given by the ternary value
    let mut rng = StdRng::seed_from_u64(45);
    for _ in 0..150 {
        let pu = rng.gen_range(2..120);
        let pv = rng.gen_range(2..120);
        let prec = rng.gen_range(2..120);
        let u = random_pos(&mut rng, pu, 40);
        let v = random_pos(&mut rng, pv, 40);

        for rnd in MODES {
            let mut q = Float::new(prec);
            let tern = q.div(&u, &v, rnd);

            let mut back = Float::new(prec + pv);
            let t = back.mul(&q, &v, Round::Zero);
            assert_eq!(t, Ordering::Equal);

            match tern {
                Ordering::Equal => assert!(back == u),
                Ordering::Less => assert!(back < u),
                Ordering::Greater => assert!(back > u),
            }
        }
    }
}

#[test]
fn test_wide_div_short_division_consistency() {
    // wide precisions exercise the short division path; check against the
    // multiply-back bracketing
    let mut rng = StdRng::seed_from_u64(46);
    for _ in 0..10 {
        let pu = rng.gen_range(1500..2000);
        let pv = rng.gen_range(1500..2000);
        let prec = rng.gen_range(1200..1400);
        let mut u = Float::new(pu);
        let mut v = Float::new(pv);
        // dense mantissas from irrational-ish seeds
        let s = random_pos(&mut rng, 64, 8);
        let t = random_pos(&mut rng, 64, 8);
        let _ = u.sqrt(&s, Round::HalfEven);
        let _ = v.sqrt(&t, Round::HalfEven);

        for rnd in [Round::Zero, Round::HalfEven, Round::Away] {
            let mut q = Float::new(prec);
            let tern = q.div(&u, &v, rnd);

            let mut back = Float::new(prec + pv);
            let tb = back.mul(&q, &v, Round::Zero);
            assert_eq!(tb, Ordering::Equal);

            match tern {
                Ordering::Equal => assert!(back == u),
                Ordering::Less => assert!(back < u),
                Ordering::Greater => assert!(back > u),
            }
        }
    }
}

#[test]
fn test_sqrt_brackets() {
    let mut rng = StdRng::seed_from_u64(47);
    for _ in 0..100 {
        let pu = rng.gen_range(2..300);
        let prec = rng.gen_range(2..300);
        let u = random_pos(&mut rng, pu, 60);

        for rnd in MODES {
            let mut r = Float::new(prec);
            let tern = r.sqrt(&u, rnd);

            let mut back = Float::new(2 * prec);
            let t = back.sqr(&r, Round::Zero);
            assert_eq!(t, Ordering::Equal);

            match tern {
                Ordering::Equal => assert!(back == u),
                Ordering::Less => assert!(back < u),
                Ordering::Greater => assert!(back > u),
            }
        }
    }
}
