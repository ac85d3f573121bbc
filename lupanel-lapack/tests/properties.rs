//! Property tests for the panel kernels through the public API.

use approx::assert_abs_diff_eq;
use lupanel_core::K_MAX_STACK;
use lupanel_lapack::{
    dgetrf_pivot_8, dgetrf_pivot_8_vs, getrf_panel_slice, unpack_lu, PanelKernel, PivotSegment,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const GUARD: f64 = -7.25e300;

/// `(rows, cols, ld, data)` with up to 2 padding rows per column.
fn panel_strategy(max_rows: usize) -> impl Strategy<Value = (usize, usize, usize, Vec<f64>)> {
    (1..=max_rows, 1usize..=8, 0usize..3).prop_flat_map(|(m, n, pad)| {
        let ld = m + pad;
        (
            Just(m),
            Just(n),
            Just(ld),
            prop::collection::vec(-1.0f64..1.0, ld * n),
        )
    })
}

/// Check `P * A == L * U` for a factored panel.
fn assert_reconstructs(m: usize, n: usize, ld: usize, original: &[f64], factored: &[f64], ipiv: &[usize]) {
    let k = m.min(n);
    let (l, u) = unpack_lu(m, n, factored, ld);
    let perm = PivotSegment::new(&ipiv[..k], 0).permutation(m);
    for c in 0..n {
        for i in 0..m {
            let mut sum = 0.0;
            for p in 0..k {
                sum += l[i + p * m] * u[p + c * k];
            }
            assert_abs_diff_eq!(sum, original[perm[i] + c * ld], epsilon = 1e-12);
        }
    }
}

fn random_panel(seed: u64, len: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn factorization_identity((m, n, ld, a0) in panel_strategy(40)) {
        let mut a = a0.clone();
        let mut inv_diag = vec![0.0; 8];
        let mut ipiv = vec![0usize; 8];
        let lu = getrf_panel_slice(&mut a, m, n, ld, &mut inv_diag, &mut ipiv).unwrap();
        prop_assert_eq!(lu.pivots, m.min(n));
        prop_assert_eq!(lu.first_singular, None);
        assert_reconstructs(m, n, ld, &a0, &a, &ipiv);
        for (j, &d) in inv_diag[..lu.pivots].iter().enumerate() {
            prop_assert_eq!(d, 1.0 / a[j + j * ld]);
        }
    }

    #[test]
    fn pivots_in_range((m, n, ld, a0) in panel_strategy(24)) {
        let mut a = a0;
        let mut inv_diag = vec![0.0; 8];
        let mut ipiv = vec![usize::MAX; 8];
        let lu = getrf_panel_slice(&mut a, m, n, ld, &mut inv_diag, &mut ipiv).unwrap();
        for (j, &p) in ipiv[..lu.pivots].iter().enumerate() {
            prop_assert!(p >= j && p < m, "ipiv[{}] = {} with m = {}", j, p, m);
        }
        // nothing beyond min(m, n) is written
        prop_assert!(ipiv[lu.pivots..].iter().all(|&p| p == usize::MAX));
    }

    #[test]
    fn padding_and_guard_untouched((m, n, ld, a0) in panel_strategy(12)) {
        let mut a = a0.clone();
        for c in 0..n {
            for i in m..ld {
                a[i + c * ld] = GUARD;
            }
        }
        a.extend_from_slice(&[GUARD; 8]);
        let mut inv_diag = vec![GUARD; 10];
        let mut ipiv = vec![usize::MAX; 10];
        let lu = getrf_panel_slice(&mut a, m, n, ld, &mut inv_diag, &mut ipiv).unwrap();

        for c in 0..n {
            for i in m..ld {
                prop_assert_eq!(a[i + c * ld], GUARD);
            }
        }
        prop_assert!(a[ld * n..].iter().all(|&x| x == GUARD));
        prop_assert!(inv_diag[lu.pivots..].iter().all(|&x| x == GUARD));
    }

    #[test]
    fn tie_resolves_to_lower_row(m in 2usize..30, n in 1usize..=8, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let first = rng.gen_range(0..m - 1);
        let second = rng.gen_range(first + 1..m);
        let mut a: Vec<f64> = (0..m * n).map(|_| rng.gen_range(-0.5..0.5)).collect();
        a[first] = 2.0;
        a[second] = -2.0;
        let mut inv_diag = vec![0.0; 8];
        let mut ipiv = vec![0usize; 8];
        getrf_panel_slice(&mut a, m, n, m, &mut inv_diag, &mut ipiv).unwrap();
        prop_assert_eq!(ipiv[0], first);
    }

    #[test]
    fn singular_column_stays_finite(m in 1usize..20, n in 2usize..=8, zero_col in 0usize..8, seed in any::<u64>()) {
        let zero_col = zero_col % n;
        let mut a = random_panel(seed, m * n);
        a[zero_col * m..(zero_col + 1) * m].fill(0.0);
        let mut inv_diag = vec![1.0; 8];
        let mut ipiv = vec![0usize; 8];
        let lu = getrf_panel_slice(&mut a, m, n, m, &mut inv_diag, &mut ipiv).unwrap();
        if zero_col < m {
            prop_assert_eq!(lu.first_singular, Some(zero_col));
            prop_assert_eq!(inv_diag[zero_col], 0.0);
            prop_assert_eq!(ipiv[zero_col], zero_col);
        }
        prop_assert!(a.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn fixed_8_equals_split_composition(m in 8usize..64, pad in 0usize..3, seed in any::<u64>()) {
        let ld = m + pad;
        let a0 = random_panel(seed, ld * 8);

        let mut a_fixed = a0.clone();
        let (mut inv_fixed, mut ipiv_fixed) = ([0.0; 8], [0usize; 8]);
        dgetrf_pivot_8(m, &mut a_fixed, ld, &mut inv_fixed, &mut ipiv_fixed);

        let mut a_split = a0;
        let (mut inv_split, mut ipiv_split) = ([0.0; 8], [0usize; 8]);
        dgetrf_pivot_8_vs(m, &mut a_split, ld, &mut inv_split, &mut ipiv_split, 8);

        prop_assert_eq!(ipiv_fixed, ipiv_split);
        prop_assert_eq!(inv_fixed, inv_split);
        prop_assert_eq!(a_fixed, a_split);
    }
}

#[test]
fn empty_panels_are_untouched() {
    for (m, n) in [(0usize, 4usize), (0, 8), (5, 0), (0, 0)] {
        let ld = m.max(1);
        let mut a = vec![3.5; ld * 8];
        let mut inv_diag = [9.0; 8];
        let mut ipiv = [42usize; 8];
        let lu = getrf_panel_slice(&mut a, m, n, ld, &mut inv_diag, &mut ipiv).unwrap();
        assert_eq!(lu.pivots, 0);
        assert!(a.iter().all(|&x| x == 3.5));
        assert_eq!(inv_diag, [9.0; 8]);
        assert_eq!(ipiv, [42; 8]);
    }
}

#[test]
fn singular_first_block_column_never_spreads_nan() {
    // column 1 = 2 * column 0 cancels exactly (dyadic, pivot 4.0 on row 0),
    // and the inf on row 1 of column 5 sits in that singular column's U row
    let m = 8;
    let dyadic = [4.0, 1.0, -2.0, 0.5, -1.5, 3.0, -0.25, 2.0];
    for n in 6..=8 {
        let mut a = random_panel(40 + n as u64, m * n);
        a[..m].copy_from_slice(&dyadic);
        for i in 0..m {
            a[i + m] = 2.0 * dyadic[i];
        }
        a[1 + 5 * m] = f64::INFINITY;
        let mut inv_diag = [0.0; 8];
        let mut ipiv = [0usize; 8];
        let lu = getrf_panel_slice(&mut a, m, n, m, &mut inv_diag, &mut ipiv).unwrap();
        let kernel = if n == 8 { PanelKernel::Fixed8 } else { PanelKernel::Variable8 };
        assert_eq!(lu.kernel, kernel);
        assert_eq!(lu.first_singular, Some(1));
        assert_eq!(a.iter().filter(|x| x.is_nan()).count(), 0, "n = {n}");
    }
}

#[test]
fn tall_variable_8_uses_heap_scratch() {
    let (m, n) = (K_MAX_STACK + 37, 6);
    let a0 = random_panel(99, m * n);
    let mut a = a0.clone();
    let mut inv_diag = [0.0; 6];
    let mut ipiv = [0usize; 6];
    let lu = getrf_panel_slice(&mut a, m, n, m, &mut inv_diag, &mut ipiv).unwrap();
    assert_eq!(lu.kernel, PanelKernel::Variable8);
    assert_eq!(lu.first_singular, None);
    assert_reconstructs(m, n, m, &a0, &a, &ipiv);
}

#[test]
fn short_rows_with_exact_storage() {
    // m = 1, 2, 3 with n = 4: the storage ends at the last valid element
    for m in 1..4 {
        for n in [4usize, 7] {
            let len = (n - 1) * m + m;
            let a0 = random_panel(m as u64 * 31 + n as u64, len);
            let mut a = a0.clone();
            let mut inv_diag = vec![0.0; m];
            let mut ipiv = vec![0usize; m];
            getrf_panel_slice(&mut a, m, n, m, &mut inv_diag, &mut ipiv).unwrap();
            assert_reconstructs(m, n, m, &a0, &a, &ipiv);
        }
    }
}
