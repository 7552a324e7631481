//! Great-circle distance used by the discovery radius filter.

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine-style great-circle distance between two (latitude, longitude)
/// points, in kilometers:
///
/// `d = R * acos(cos(lat1) * cos(lat2) * cos(lon2 - lon1) + sin(lat1) * sin(lat2))`
///
/// Inputs are degrees. The acos argument is clamped to [-1, 1]; floating
/// point rounding can push identical points just above 1.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let cos_angle = phi1.cos() * phi2.cos() * delta_lambda.cos() + phi1.sin() * phi2.sin();
    EARTH_RADIUS_KM * cos_angle.clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_are_zero_distance() {
        let d = distance_km(38.7, -9.1, 38.7, -9.1);
        assert!(d.abs() < 1e-6, "expected ~0, got {d}");
    }

    #[test]
    fn lisbon_to_porto_is_roughly_274_km() {
        let d = distance_km(38.7223, -9.1393, 41.1579, -8.6291);
        assert!((265.0..285.0).contains(&d), "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let ab = distance_km(38.7, -9.1, 40.0, -8.0);
        let ba = distance_km(40.0, -8.0, 38.7, -9.1);
        assert!((ab - ba).abs() < 1e-9);
    }
}
