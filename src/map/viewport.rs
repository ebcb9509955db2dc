//! Initial map extents.

use geo::{Coord, Rect};

use super::DistrictGeometry;

/// `[[south, west], [north, east]]` in degrees, as map libraries take bounds.
pub type LatLngBounds = [[f64; 2]; 2];

/// Continental United States.
pub const CONUS_BOUNDS: LatLngBounds = [[19.80, -134.82], [53.85, -60.29]];

/// Fixed extents for states whose district shapes mislead a bounding box.
const PLAN_VIEW_OVERRIDES: &[(&str, LatLngBounds)] = &[
    ("AK", [[54.6, -128.8], [71.2, -174.1]]),
    ("HI", [[18.6, -154.3], [22.5, -160.2]]),
];

/// Per-state extents used by state pages.
pub const STATE_BOUNDING_BOXES: &[(&str, LatLngBounds)] = &[
    ("AL", [[30.14443, -88.47323], [35.00803, -84.88825]]),
    ("AK", [[47.95069, -186.32813], [73.95489, -123.57422]]),
    ("AZ", [[31.33218, -114.81659], [37.00372, -109.04517]]),
    ("AR", [[33.00411, -94.61792], [36.49975, -89.64440]]),
    ("CA", [[32.52883, -124.48200], [42.00952, -114.13121]]),
    ("CO", [[36.99242, -109.06020], [41.00344, -102.04152]]),
    ("CT", [[40.95094, -73.72777], [42.05059, -71.78724]]),
    ("DE", [[38.45113, -75.78902], [39.83952, -74.98416]]),
    ("FL", [[24.39631, -87.63490], [31.00097, -79.97431]]),
    ("GA", [[30.35576, -85.60517], [35.00066, -80.75143]]),
    ("HI", [[18.86546, -178.44359], [28.51727, -154.75579]]),
    ("ID", [[41.98818, -117.24303], [49.00115, -111.04350]]),
    ("IL", [[36.97030, -91.51308], [42.50848, -87.01993]]),
    ("IN", [[37.77173, -88.09789], [41.76137, -84.78459]]),
    ("IA", [[40.37544, -96.63949], [43.50120, -90.14006]]),
    ("KS", [[36.99302, -102.05177], [40.00317, -94.58839]]),
    ("KY", [[36.49706, -89.57120], [39.14773, -81.96479]]),
    ("LA", [[28.85513, -94.04335], [33.01954, -88.75839]]),
    ("ME", [[42.91713, -71.08392], [47.45985, -66.88544]]),
    ("MD", [[37.88660, -79.48765], [39.72304, -74.98628]]),
    ("MA", [[41.18705, -73.50814], [42.88679, -69.85886]]),
    ("MI", [[41.69612, -90.41839], [48.30606, -82.12297]]),
    ("MN", [[43.49936, -97.23920], [49.38436, -89.48339]]),
    ("MS", [[30.13985, -91.65501], [34.99610, -88.09789]]),
    ("MO", [[35.99568, -95.77470], [40.61364, -89.09897]]),
    ("MT", [[44.35792, -116.04915], [49.00110, -104.03969]]),
    ("NE", [[39.99993, -104.05351], [43.00171, -95.30829]]),
    ("NV", [[35.00186, -120.00647], [42.00221, -114.03946]]),
    ("NH", [[42.69699, -72.55718], [45.30548, -70.57509]]),
    ("NJ", [[38.78866, -75.56359], [41.35742, -73.88506]]),
    ("NM", [[31.33217, -109.05017], [37.00029, -103.00196]]),
    ("NY", [[40.47740, -79.76259], [45.01587, -71.77749]]),
    ("NC", [[33.75288, -84.32187], [36.58816, -75.40012]]),
    ("ND", [[45.93507, -104.04927], [49.00069, -96.55441]]),
    ("OH", [[38.40342, -84.82030], [42.32713, -80.51871]]),
    ("OK", [[33.61579, -103.00246], [37.00231, -94.43101]]),
    ("OR", [[41.99179, -124.70354], [46.29910, -116.46326]]),
    ("PA", [[39.71980, -80.51985], [42.51607, -74.68950]]),
    ("RI", [[41.09583, -71.90726], [42.01880, -71.08857]]),
    ("SC", [[32.03345, -83.35393], [35.21554, -78.49930]]),
    ("SD", [[42.47969, -104.05788], [45.94538, -96.43647]]),
    ("TN", [[34.98292, -90.31030], [36.67826, -81.64690]]),
    ("TX", [[25.83716, -106.64565], [36.50070, -93.50804]]),
    ("UT", [[36.99766, -114.05289], [42.00170, -109.04157]]),
    ("VT", [[42.72685, -73.43791], [45.01666, -71.46504]]),
    ("VA", [[36.54076, -83.67539], [39.46601, -75.16643]]),
    ("WA", [[45.54354, -124.84897], [49.00249, -116.91558]]),
    ("WV", [[37.20154, -82.64459], [40.63880, -77.71952]]),
    ("WI", [[42.49172, -92.88943], [47.30982, -86.24955]]),
    ("WY", [[40.99477, -111.05456], [45.00582, -104.05225]]),
];

/// Convert lat/lng bounds to a lon/lat rectangle (corners normalized).
pub fn bounds_to_rect(bounds: &LatLngBounds) -> Rect<f64> {
    let [[lat1, lon1], [lat2, lon2]] = *bounds;
    Rect::new(Coord { x: lon1, y: lat1 }, Coord { x: lon2, y: lat2 })
}

/// Bounding box of a state, by postal code (case-insensitive).
pub fn state_bounds(code: &str) -> Option<Rect<f64>> {
    let code = code.to_ascii_uppercase();
    STATE_BOUNDING_BOXES.iter()
        .find(|(abbr, _)| *abbr == code)
        .map(|(_, bounds)| bounds_to_rect(bounds))
}

/// Initial extent of a plan map: fixed for Alaska and Hawaii, otherwise the
/// bounding box of the district features.
pub fn plan_viewport(state: Option<&str>, geometry: &DistrictGeometry) -> Option<Rect<f64>> {
    let code = state.map(str::to_ascii_uppercase);
    let fixed = PLAN_VIEW_OVERRIDES.iter()
        .find(|(abbr, _)| code.as_deref() == Some(*abbr))
        .map(|(_, bounds)| bounds_to_rect(bounds));

    fixed.or_else(|| geometry.bounds())
}
