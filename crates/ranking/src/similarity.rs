//! Cosine similarity between embedding vectors.

/// Cosine of the angle between `a` and `b`.
///
/// ## Algorithm
/// `dot(a, b) / (||a|| * ||b||)`, computed in one pass. Sums are kept in
/// `f64` so very large or very small finite components neither overflow nor
/// underflow before the division.
///
/// Returns `0.0` (never NaN) when either vector has zero norm, when the
/// vectors are empty, or when the inputs contain non-finite values. Callers
/// are expected to pass equal-length vectors; extra trailing entries on the
/// longer side are ignored.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0_f64;
    let mut sum_a = 0.0_f64;
    let mut sum_b = 0.0_f64;
    for (&av, &bv) in a.iter().zip(b) {
        let (av, bv) = (f64::from(av), f64::from(bv));
        dot += av * bv;
        sum_a += av * av;
        sum_b += bv * bv;
    }

    let denom = sum_a.sqrt() * sum_b.sqrt();
    if denom > 0.0 {
        let score = dot / denom;
        if score.is_finite() { score.clamp(-1.0, 1.0) as f32 } else { 0.0 }
    } else {
        0.0
    }
}
