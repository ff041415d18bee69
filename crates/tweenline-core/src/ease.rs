//! Easing functions.
//!
//! An easing function maps `(elapsed, start, delta, total)` to the current
//! value; it is stateless and deterministic. Each `Ease` optionally carries a
//! timing token a style adapter can use when declaring a host transition, so
//! compositor-driven interpolation follows the same curve.

/// `(elapsed, start, delta, total) -> value`
pub type EaseFn = fn(f64, f64, f64, f64) -> f64;

#[derive(Copy, Clone, Debug)]
pub struct Ease {
    pub f: EaseFn,
    /// Host timing token (e.g. a cubic-bezier declaration), if one exists.
    pub css: Option<&'static str>,
}

impl Default for Ease {
    fn default() -> Self {
        OUT_CUBIC
    }
}

pub const IN_CUBIC: Ease = Ease {
    f: in_cubic,
    css: Some("cubic-bezier(0.550, 0.055, 0.675, 0.190)"),
};

pub const OUT_CUBIC: Ease = Ease {
    f: out_cubic,
    css: Some("cubic-bezier(0.215, 0.610, 0.355, 1.000)"),
};

pub const IN_OUT_CUBIC: Ease = Ease {
    f: in_out_cubic,
    css: None,
};

pub const LINEAR: Ease = Ease {
    f: linear,
    css: Some("linear"),
};

pub fn linear(t: f64, b: f64, c: f64, d: f64) -> f64 {
    if d <= 0.0 {
        return b + c;
    }
    c * (t / d) + b
}

pub fn in_cubic(t: f64, b: f64, c: f64, d: f64) -> f64 {
    if d <= 0.0 {
        return b + c;
    }
    let t = t / d;
    c * t * t * t + b
}

pub fn out_cubic(t: f64, b: f64, c: f64, d: f64) -> f64 {
    if d <= 0.0 {
        return b + c;
    }
    let t = t / d - 1.0;
    c * (t * t * t + 1.0) + b
}

pub fn in_out_cubic(t: f64, b: f64, c: f64, d: f64) -> f64 {
    if d <= 0.0 {
        return b + c;
    }
    let mut t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t * t + b;
    }
    t -= 2.0;
    c / 2.0 * (t * t * t + 2.0) + b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_endpoints() {
        for ease in [IN_CUBIC, OUT_CUBIC, IN_OUT_CUBIC, LINEAR] {
            assert_eq!((ease.f)(0.0, 2.0, 8.0, 100.0), 2.0);
            assert_eq!((ease.f)(100.0, 2.0, 8.0, 100.0), 10.0);
        }
    }

    #[test]
    fn zero_total_short_circuits_to_end() {
        assert_eq!(out_cubic(0.0, 1.0, 4.0, 0.0), 5.0);
    }
}
