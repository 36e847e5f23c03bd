/// Quintic ease-in-out over `[0, 1]`.
///
/// Input is clamped first, so callers may pass raw `elapsed / duration`.
pub fn ease_in_out_quint(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        16.0 * t * t * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn fixed_points() {
        assert_eq!(ease_in_out_quint(0.0), 0.0);
        assert!((ease_in_out_quint(0.5) - 0.5).abs() < EPS);
        assert_eq!(ease_in_out_quint(1.0), 1.0);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(ease_in_out_quint(-3.0), 0.0);
        assert_eq!(ease_in_out_quint(7.5), 1.0);
    }

    #[test]
    fn monotonically_non_decreasing() {
        // Arrange
        let samples: Vec<f32> = (0..=1000).map(|i| ease_in_out_quint(i as f32 / 1000.0)).collect();

        // Assert
        for pair in samples.windows(2) {
            assert!(pair[1] >= pair[0], "{} < {}", pair[1], pair[0]);
        }
    }

    #[test]
    fn symmetric_about_midpoint() {
        for i in 0..=100 {
            let t = i as f32 / 100.0;
            let lhs = ease_in_out_quint(1.0 - t);
            let rhs = 1.0 - ease_in_out_quint(t);
            assert!((lhs - rhs).abs() < 1e-5, "t={t}: {lhs} != {rhs}");
        }
    }

    #[test]
    fn slow_start_and_finish() {
        assert!(ease_in_out_quint(0.1) < 0.001);
        assert!(ease_in_out_quint(0.9) > 0.999);
    }
}
