use serde::Serialize;

use crate::models::RoutePoint;

/// Viewport a map should show to contain a route, with padding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

const REGION_PADDING: f64 = 1.5;
// Keeps single-point routes visible.
const MIN_REGION_DELTA: f64 = 0.01;

/// Mean coordinate of the route, (0, 0) for an empty route.
pub fn route_center(route: &[RoutePoint]) -> (f64, f64) {
    if route.is_empty() {
        return (0.0, 0.0);
    }
    let (lat_sum, lon_sum) = route.iter().fold((0.0, 0.0), |(lat, lon), point| {
        (lat + point.latitude, lon + point.longitude)
    });
    (lat_sum / route.len() as f64, lon_sum / route.len() as f64)
}

pub fn route_bounds(route: &[RoutePoint]) -> RouteBounds {
    if route.is_empty() {
        return RouteBounds {
            min_lat: 0.0,
            max_lat: 0.0,
            min_lon: 0.0,
            max_lon: 0.0,
        };
    }
    route.iter().fold(
        RouteBounds {
            min_lat: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
            min_lon: f64::INFINITY,
            max_lon: f64::NEG_INFINITY,
        },
        |bounds, point| RouteBounds {
            min_lat: bounds.min_lat.min(point.latitude),
            max_lat: bounds.max_lat.max(point.latitude),
            min_lon: bounds.min_lon.min(point.longitude),
            max_lon: bounds.max_lon.max(point.longitude),
        },
    )
}

/// Region centered on the route with 50% padding around its bounding box.
pub fn map_region(route: &[RoutePoint]) -> MapRegion {
    if route.is_empty() {
        return MapRegion {
            latitude: 0.0,
            longitude: 0.0,
            latitude_delta: MIN_REGION_DELTA,
            longitude_delta: MIN_REGION_DELTA,
        };
    }

    let (latitude, longitude) = route_center(route);
    let bounds = route_bounds(route);

    MapRegion {
        latitude,
        longitude,
        latitude_delta: ((bounds.max_lat - bounds.min_lat) * REGION_PADDING).max(MIN_REGION_DELTA),
        longitude_delta: ((bounds.max_lon - bounds.min_lon) * REGION_PADDING).max(MIN_REGION_DELTA),
    }
}

pub fn format_distance(distance_m: f64) -> String {
    format!("{:.2} m", distance_m)
}

pub fn format_calories(calories: f64) -> String {
    format!("{} cal", calories.round() as i64)
}

pub fn format_steps(steps: i64) -> String {
    format!("{} steps", steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> RoutePoint {
        RoutePoint {
            latitude: lat,
            longitude: lon,
        }
    }

    #[test]
    fn center_of_empty_route_is_origin() {
        assert_eq!(route_center(&[]), (0.0, 0.0));
    }

    #[test]
    fn center_is_mean_of_points() {
        let route = vec![point(0.0, 0.0), point(2.0, 4.0)];
        assert_eq!(route_center(&route), (1.0, 2.0));
    }

    #[test]
    fn bounds_cover_all_points() {
        let route = vec![point(1.0, -3.0), point(-2.0, 5.0), point(0.5, 1.0)];
        let bounds = route_bounds(&route);
        assert_eq!(bounds.min_lat, -2.0);
        assert_eq!(bounds.max_lat, 1.0);
        assert_eq!(bounds.min_lon, -3.0);
        assert_eq!(bounds.max_lon, 5.0);
    }

    #[test]
    fn region_pads_the_bounding_box() {
        let route = vec![point(0.0, 0.0), point(0.1, 0.2)];
        let region = map_region(&route);
        assert!((region.latitude - 0.05).abs() < 1e-12);
        assert!((region.longitude - 0.1).abs() < 1e-12);
        assert!((region.latitude_delta - 0.15).abs() < 1e-12);
        assert!((region.longitude_delta - 0.3).abs() < 1e-12);
    }

    #[test]
    fn tiny_routes_get_minimum_deltas() {
        let region = map_region(&[point(48.85, 2.35)]);
        assert_eq!(region.latitude_delta, 0.01);
        assert_eq!(region.longitude_delta, 0.01);

        let empty = map_region(&[]);
        assert_eq!(empty.latitude_delta, 0.01);
    }

    #[test]
    fn display_formatting() {
        assert_eq!(format_distance(1234.567), "1234.57 m");
        assert_eq!(format_calories(36.6), "37 cal");
        assert_eq!(format_steps(915), "915 steps");
    }
}
