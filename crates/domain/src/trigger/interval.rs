//! Random interval trigger draw rule.

/// Draws are taken uniformly from `0..DRAW_RANGE`.
pub const DRAW_RANGE: u32 = 1000;

/// Whether a draw from `0..DRAW_RANGE` fires the trigger (even draws do).
#[must_use]
pub fn fires_on(draw: u32) -> bool {
    draw % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_fire_on_even_draws() {
        assert!(fires_on(0));
        assert!(fires_on(998));
    }

    #[test]
    fn should_not_fire_on_odd_draws() {
        assert!(!fires_on(1));
        assert!(!fires_on(999));
    }

    #[test]
    fn should_fire_on_exactly_half_of_the_range() {
        let firing = (0..DRAW_RANGE).filter(|d| fires_on(*d)).count();
        assert_eq!(firing, 500);
    }
}
