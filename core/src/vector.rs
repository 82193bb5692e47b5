//! Small dense-vector helpers shared by the embedder and the index.

pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Scale `v` to unit Euclidean length. Returns `false` and leaves `v`
/// untouched when its norm is zero or not finite.
pub fn l2_normalize(v: &mut [f32]) -> bool {
    let norm = l2_norm(v);
    if norm == 0.0 || !norm.is_finite() {
        return false;
    }
    for x in v.iter_mut() {
        *x /= norm;
    }
    true
}

/// Component-wise mean of equally sized vectors. `None` for an empty input.
pub fn mean(vectors: &[Vec<f32>]) -> Option<Vec<f32>> {
    let first = vectors.first()?;
    let mut acc = vec![0.0f32; first.len()];
    for v in vectors {
        for (a, x) in acc.iter_mut().zip(v.iter()) {
            *a += x;
        }
    }
    let count = vectors.len() as f32;
    for a in acc.iter_mut() {
        *a /= count;
    }
    Some(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_to_unit_length() {
        let mut v = vec![3.0, 4.0];
        assert!(l2_normalize(&mut v));
        assert!((l2_norm(&v) - 1.0).abs() < 1e-6);
        assert!((v[0] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_is_rejected() {
        let mut v = vec![0.0; 4];
        assert!(!l2_normalize(&mut v));
        assert_eq!(v, vec![0.0; 4]);
    }

    #[test]
    fn mean_of_vectors() {
        let m = mean(&[vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        assert_eq!(m, vec![0.5, 0.5]);
        assert!(mean(&[]).is_none());
    }
}
