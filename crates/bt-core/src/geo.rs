//! Geographic coordinate type and the interpolation helpers used to animate
//! the vehicle between stops.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Distances are small (a few km
//! per segment) but interpolated positions are compared bitwise against stop
//! coordinates, so single precision is not enough here.

/// Mean Earth radius in kilometres used by [`distance_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Haversine great-circle distance to `other` in kilometres.
    #[inline]
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        distance_km(self, other)
    }

    /// Point a fraction `t` of the way from `self` to `end`.
    #[inline]
    pub fn lerp(self, end: GeoPoint, t: f64) -> GeoPoint {
        lerp(self, end, t)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Haversine great-circle distance in kilometres.
///
/// Symmetric, and exactly `0.0` for identical coordinates.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat * 0.5).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lng * 0.5).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Linear interpolation between two coordinates.
///
/// `t = 0` returns `start` and `t = 1` returns `end` exactly; the endpoints
/// are special-cased because `start + (end - start) * 1.0` can be off by one
/// ulp.
pub fn lerp(start: GeoPoint, end: GeoPoint, t: f64) -> GeoPoint {
    if t <= 0.0 {
        return start;
    }
    if t >= 1.0 {
        return end;
    }
    GeoPoint {
        lat: start.lat + (end.lat - start.lat) * t,
        lng: start.lng + (end.lng - start.lng) * t,
    }
}

/// Cubic ease-in/ease-out curve on `[0, 1]`.
///
/// `f(0) = 0`, `f(0.5) = 0.5`, `f(1) = 1`; accelerates through the first half
/// and decelerates symmetrically through the second.  Inputs outside `[0, 1]`
/// are clamped.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
