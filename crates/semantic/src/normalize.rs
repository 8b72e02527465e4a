/// In-place L2 normalization. Zero vectors are left untouched.
pub(crate) fn l2_normalize_in_place(v: &mut [f64]) {
    let norm_sq: f64 = v.iter().map(|x| x * x).sum();
    if norm_sq > 0.0 {
        let inv_norm = norm_sq.sqrt().recip();
        for x in v.iter_mut() {
            *x *= inv_norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(v: &[f64]) -> f64 {
        v.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    #[test]
    fn l2_normalize_simple_vector() {
        let mut v = vec![3.0, 4.0];
        l2_normalize_in_place(&mut v);
        // L2 norm of [3, 4] is 5
        assert!((v[0] - 0.6).abs() < 1e-12);
        assert!((v[1] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn l2_normalize_maintains_unit_length() {
        let mut v: Vec<f64> = (1..=300).map(|i| i as f64 * 0.5).collect();
        l2_normalize_in_place(&mut v);
        assert!((norm(&v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn l2_normalize_zero_vector() {
        let mut v = vec![0.0; 3];
        l2_normalize_in_place(&mut v);
        assert_eq!(v, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn l2_normalize_empty_slice() {
        let mut v: Vec<f64> = vec![];
        l2_normalize_in_place(&mut v);
        assert!(v.is_empty());
    }

    #[test]
    fn l2_normalize_preserves_direction() {
        let mut v = vec![-1.0, 2.0, -3.0];
        l2_normalize_in_place(&mut v);
        assert!((v[1] / v[0] + 2.0).abs() < 1e-12);
        assert!((v[2] / v[0] - 3.0).abs() < 1e-12);
    }
}
