use crate::distance::Coordinate;

/// Supplies the device's current location, if known.
pub trait LocationProvider {
    fn current_location(&self) -> Option<Coordinate>;
}

/// A location fixed at construction, e.g. from configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation(pub Option<Coordinate>);

impl FixedLocation {
    pub fn unknown() -> Self {
        FixedLocation(None)
    }

    pub fn at(latitude: f64, longitude: f64) -> Self {
        FixedLocation(Some(Coordinate::new(latitude, longitude)))
    }
}

impl LocationProvider for FixedLocation {
    fn current_location(&self) -> Option<Coordinate> {
        self.0
    }
}
