use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Projection the scene is rendered in
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SceneMode {
    /// Perspective view of the globe in Earth-fixed coordinates
    #[default]
    #[serde(rename = "3d")]
    Scene3D,
    /// 2.5D: the projected map seen with a perspective camera
    ColumbusView,
    /// Flat top-down map
    #[serde(rename = "2d")]
    Scene2D,
    /// Transitioning between two of the other modes
    Morphing,
}

impl SceneMode {
    /// Whether world coordinates are the projected map rather than Earth-fixed
    pub fn is_projected(self) -> bool {
        matches!(self, SceneMode::ColumbusView | SceneMode::Scene2D)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SceneMode::Scene3D => "3d",
            SceneMode::ColumbusView => "columbus-view",
            SceneMode::Scene2D => "2d",
            SceneMode::Morphing => "morphing",
        }
    }
}

impl fmt::Display for SceneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SceneMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "3d" | "scene3d" => Ok(SceneMode::Scene3D),
            "columbus-view" | "columbus" | "cv" => Ok(SceneMode::ColumbusView),
            "2d" | "scene2d" => Ok(SceneMode::Scene2D),
            "morphing" => Ok(SceneMode::Morphing),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!("3D".parse::<SceneMode>().unwrap(), SceneMode::Scene3D);
        assert_eq!("cv".parse::<SceneMode>().unwrap(), SceneMode::ColumbusView);
        assert_eq!("2d".parse::<SceneMode>().unwrap(), SceneMode::Scene2D);
        assert!(matches!(
            "globe".parse::<SceneMode>(),
            Err(ConfigError::UnknownMode(name)) if name == "globe"
        ));
    }

    #[test]
    fn test_display_parses_back() {
        for mode in [
            SceneMode::Scene3D,
            SceneMode::ColumbusView,
            SceneMode::Scene2D,
            SceneMode::Morphing,
        ] {
            assert_eq!(mode.to_string().parse::<SceneMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&SceneMode::ColumbusView).unwrap(), "\"columbus-view\"");
        assert_eq!(serde_json::from_str::<SceneMode>("\"2d\"").unwrap(), SceneMode::Scene2D);
    }
}
