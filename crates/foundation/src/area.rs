use crate::geo::Position;

const PERMITTED_RING: [Position; 5] = [
    Position::new(21.45338975, 39.85719504),
    Position::new(21.45335511, 39.85706157),
    Position::new(21.45327091, 39.85710649),
    Position::new(21.45329121, 39.85721942),
    Position::new(21.45338975, 39.85719504),
];

/// A closed polygon ring shown on the map as the permitted zone.
///
/// Display only: nothing on the client tests a position against it.
#[derive(Debug, Clone, PartialEq)]
pub struct AllowedArea {
    ring: Vec<Position>,
}

impl AllowedArea {
    /// The fixed permitted zone.
    pub fn permitted() -> Self {
        Self {
            ring: PERMITTED_RING.to_vec(),
        }
    }

    pub fn ring(&self) -> &[Position] {
        &self.ring
    }
}

impl Default for AllowedArea {
    fn default() -> Self {
        Self::permitted()
    }
}
