/// Noise attenuation coefficient `k` in `1 / (1 + k·d)`, per meter.
pub const NOISE_ATTENUATION_COEFF: f64 = 0.3;
/// Accumulated exposure at which noise utility reaches zero.
pub const NOISE_EXPOSURE_REF: f64 = 0.5;

/// Upper end of the NHV ratio band that scores full marks.
pub const NHV_RATIO_OPTIMAL_MAX: f64 = 1.35;
/// NHV ratio at which an oversized module scores zero.
pub const NHV_RATIO_ZERO: f64 = 2.0;

/// Score in `[0, 100]` for a placed-to-required volume ratio.
///
/// Ratios up to 1.35 score 100 (undersized modules never reach scoring),
/// then the score falls linearly to 0 at a ratio of 2.0.
#[inline]
pub fn nhv_ratio_score(ratio: f64) -> f64 {
    if ratio <= NHV_RATIO_OPTIMAL_MAX {
        return 100.0;
    }
    let excess = (ratio - NHV_RATIO_OPTIMAL_MAX) / (NHV_RATIO_ZERO - NHV_RATIO_OPTIMAL_MAX);
    (100.0 - excess.min(1.0) * 100.0).max(0.0)
}

#[inline]
pub fn is_optimal_nhv_ratio(ratio: f64) -> bool {
    (1.0..=NHV_RATIO_OPTIMAL_MAX).contains(&ratio)
}

/// Piecewise score for the share of the habitat (in percent) claimed by module NHVs.
#[inline]
pub fn utilization_score(percent: f64) -> f64 {
    if percent < 40.0 {
        0.0
    } else if percent < 60.0 {
        (percent - 40.0) / 20.0 * 80.0
    } else if percent < 70.0 {
        80.0 + (percent - 60.0) / 10.0 * 20.0
    } else if percent <= 77.5 {
        100.0
    } else if percent <= 85.0 {
        100.0 - (percent - 77.5) / 7.5 * 20.0
    } else if percent <= 100.0 {
        80.0 - (percent - 85.0) / 15.0 * 80.0
    } else {
        0.0
    }
}

#[inline]
pub fn noise_attenuation(distance: f64) -> f64 {
    1.0 / (1.0 + NOISE_ATTENUATION_COEFF * distance)
}

#[inline]
pub fn noise_utility(exposure: f64) -> f64 {
    (1.0 - exposure / NOISE_EXPOSURE_REF).clamp(0.0, 1.0) * 100.0
}

/// Linear separation utility: 0 at contact, 100 from `good_distance` on.
#[inline]
pub fn separation_utility(distance: f64, good_distance: f64) -> f64 {
    if distance <= 0.0 {
        0.0
    } else if distance >= good_distance {
        100.0
    } else {
        distance / good_distance * 100.0
    }
}

/// Closeness utility in `[0, 1]` for the mean spacing between work areas.
///
/// Spacings under `ideal_min` are penalized down to half credit at most;
/// above it the utility decays linearly to 0 at `acceptable_max`.
#[inline]
pub fn distance_utility(average: f64, ideal_min: f64, acceptable_max: f64) -> f64 {
    if average < ideal_min {
        average / ideal_min * 0.5
    } else if average > acceptable_max {
        0.0
    } else {
        1.0 - (average - ideal_min) / (acceptable_max - ideal_min)
    }
}
