//! Hit point clamping and wound overflow.
//!
//! Characters keep a wounds pool below their hit points: damage that pushes
//! hit points under zero is carried into wounds instead. Recruits have no such
//! buffer and simply bottom out at zero.

use super::pools::Pool;

/// Result of resolving a character's hit points and wounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WoundOutcome {
    pub hit_points: Pool,
    pub wounds: Pool,
}

/// Clamps hit points to `[floor, max]` and overflows negative hit points into
/// wounds.
pub fn resolve_character(hit_points: Pool, wounds: Pool, floor: i32) -> WoundOutcome {
    let mut hit_points = hit_points;
    let mut wounds = wounds;

    hit_points.value = hit_points.value.min(hit_points.max).max(floor);
    wounds.value = wounds.value.min(wounds.max);

    if hit_points.value < 0 {
        wounds.value = (wounds.value + hit_points.value).max(0);
        hit_points.value = 0;
    }

    hit_points.refresh_progress();
    wounds.refresh_progress();

    WoundOutcome { hit_points, wounds }
}

/// Clamps a recruit's hit points to `[0, max]`.
pub fn resolve_recruit(hit_points: Pool) -> Pool {
    let mut hit_points = hit_points;
    if hit_points.value > 0 {
        hit_points.value = hit_points.value.min(hit_points.max);
        hit_points.refresh_progress();
    } else {
        hit_points.value = 0;
        hit_points.progress = 0;
    }
    hit_points
}
