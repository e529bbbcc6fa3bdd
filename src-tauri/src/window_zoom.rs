//! Page zoom as a level, where each step scales by 1.2.

pub(crate) const ZOOM_LEVEL_STEP: f64 = 0.5;
const ZOOM_SCALE_BASE: f64 = 1.2;
const MIN_ZOOM_FACTOR: f64 = 0.25;
const MAX_ZOOM_FACTOR: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ZoomChange {
    In,
    Out,
    Reset,
}

pub(crate) fn zoom_factor(level: f64) -> f64 {
    ZOOM_SCALE_BASE
        .powf(level)
        .clamp(MIN_ZOOM_FACTOR, MAX_ZOOM_FACTOR)
}

/// Next level, or the current one when the step would leave the factor range.
pub(crate) fn next_zoom_level(level: f64, change: ZoomChange) -> f64 {
    let next = match change {
        ZoomChange::In => level + ZOOM_LEVEL_STEP,
        ZoomChange::Out => level - ZOOM_LEVEL_STEP,
        ZoomChange::Reset => return 0.0,
    };
    let factor = ZOOM_SCALE_BASE.powf(next);
    if (MIN_ZOOM_FACTOR..=MAX_ZOOM_FACTOR).contains(&factor) {
        next
    } else {
        level
    }
}
