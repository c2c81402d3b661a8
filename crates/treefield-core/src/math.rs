/// Clamp a frame delta to a usable value.
///
/// Negative, NaN and infinite deltas become zero so a bad frame can never
/// push the expansion past its target.
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}

/// Per-frame blend factor for exponential smoothing, in `[0, 1]`.
#[inline]
pub fn smoothing_factor(dt: f32, rate: f32) -> f32 {
    (sanitize_dt(dt) * rate).clamp(0.0, 1.0)
}

/// Move `current` toward `target` by `factor` of the remaining distance.
///
/// With `factor` in `[0, 1]` the result lies between `current` and `target`,
/// so the distance to the target never grows and the value never overshoots.
#[inline]
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    if factor >= 1.0 {
        return target;
    }
    let next = current + (target - current) * factor;
    // rounding guard: stay inside the [current, target] interval
    if current <= target {
        next.clamp(current, target)
    } else {
        next.clamp(target, current)
    }
}

/// Square-root radial draw: uniform area density inside a disc of `radius`.
#[inline]
pub fn disc_radius(u: f32, radius: f32) -> f32 {
    u.sqrt() * radius
}

/// Cube-root radial draw: uniform volume density inside the shell
/// `[inner, outer]`.
#[inline]
pub fn shell_radius(u: f32, inner: f32, outer: f32) -> f32 {
    let inner3 = inner * inner * inner;
    let outer3 = outer * outer * outer;
    (inner3 + u * (outer3 - inner3)).cbrt().clamp(inner, outer)
}
