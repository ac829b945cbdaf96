use crate::flight_control::sequencer::AscentError;
use strum_macros::Display;

/// Compass direction of the launch, resolved once at sequencer start.
#[derive(Debug, Display, PartialEq, Eq, Clone, Copy)]
pub enum LaunchDirection {
    North,
    East,
    South,
    West,
}

impl LaunchDirection {
    /// Fixed compass heading in degrees, in `[0, 360)`.
    pub fn heading_deg(self) -> f64 {
        match self {
            LaunchDirection::North => 0.0,
            LaunchDirection::East => 90.0,
            LaunchDirection::South => 180.0,
            LaunchDirection::West => 270.0,
        }
    }
}

impl TryFrom<&str> for LaunchDirection {
    type Error = AscentError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "north" => Ok(LaunchDirection::North),
            "east" => Ok(LaunchDirection::East),
            "south" => Ok(LaunchDirection::South),
            "west" => Ok(LaunchDirection::West),
            _ => Err(AscentError::InvalidDirection(String::from(value))),
        }
    }
}
