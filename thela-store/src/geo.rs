//! Great-circle distance used by the nearest-neighbor area query.

/// Mean Earth radius in meters
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two (latitude, longitude) pairs, in meters.
pub fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance() {
        assert_eq!(haversine_m(12.97, 77.59, 12.97, 77.59), 0.0);
    }

    #[test]
    fn test_known_distance_delhi_landmarks() {
        // India Gate (28.6129, 77.2295) to Red Fort (28.6562, 77.2410):
        // roughly 4.9 km
        let d = haversine_m(28.6129, 77.2295, 28.6562, 77.2410);
        assert!((4_700.0..5_200.0).contains(&d), "got {d}");
    }

    #[test]
    fn test_one_degree_latitude() {
        // One degree of latitude is ~111.2 km everywhere
        let d = haversine_m(20.0, 77.0, 21.0, 77.0);
        assert!((110_000.0..112_500.0).contains(&d), "got {d}");
    }

    #[test]
    fn test_symmetry() {
        let ab = haversine_m(12.97, 77.59, 13.08, 80.27);
        let ba = haversine_m(13.08, 80.27, 12.97, 77.59);
        assert!((ab - ba).abs() < 1e-6);
    }
}
