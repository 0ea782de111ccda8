//! Solar zenith check for Sentinel-2 tiles
//!
//! Reads the scene-mean solar zenith angle from a tile metadata document
//! (`Mean_Sun_Angle/ZENITH_ANGLE` in `MTD_TL.xml`) and reports whether the
//! tile is within the processable range.

use std::fmt;
use std::path::Path;

use roxmltree::Document;
use tracing::debug;

use crate::constants::solar;
use crate::errors::{ToolError, ToolResult};

/// Outcome of the zenith check, printed as `valid` or `invalid`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZenithValidity {
    Valid,
    Invalid,
}

impl ZenithValidity {
    /// Angles strictly above the threshold are invalid
    pub fn from_angle(degrees: f64) -> Self {
        if degrees > solar::MAX_ZENITH_DEGREES {
            Self::Invalid
        } else {
            Self::Valid
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for ZenithValidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mean solar zenith angle from tile metadata text
///
/// The first `ZENITH_ANGLE` child of a `Mean_Sun_Angle` element in document
/// order is used. `path` is only used in error messages.
pub fn mean_solar_zenith(xml: &str, path: &Path) -> ToolResult<f64> {
    let doc = Document::parse(xml).map_err(|e| ToolError::Xml {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let element = doc
        .descendants()
        .filter(|n| n.has_tag_name(solar::MEAN_SUN_ANGLE_ELEMENT))
        .flat_map(|n| n.children())
        .find(|n| n.has_tag_name(solar::ZENITH_ANGLE_ELEMENT))
        .ok_or_else(|| ToolError::MissingElement {
            path: path.to_path_buf(),
            element: format!(
                "{}/{}",
                solar::MEAN_SUN_ANGLE_ELEMENT,
                solar::ZENITH_ANGLE_ELEMENT
            ),
        })?;

    let text = element.text().unwrap_or_default().trim();
    text.parse::<f64>().map_err(|_| ToolError::InvalidAngle {
        path: path.to_path_buf(),
        value: text.to_string(),
    })
}

/// Read a tile metadata file and classify its mean solar zenith
pub fn check_solar_zenith(metadata_path: &Path) -> ToolResult<ZenithValidity> {
    let xml = std::fs::read_to_string(metadata_path).map_err(|source| ToolError::Io {
        path: metadata_path.to_path_buf(),
        source,
    })?;

    let angle = mean_solar_zenith(&xml, metadata_path)?;
    let validity = ZenithValidity::from_angle(angle);
    debug!(
        "Mean solar zenith {} in {}: {}",
        angle,
        metadata_path.display(),
        validity
    );
    Ok(validity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tile_metadata(zenith: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<n1:Level-1C_Tile_ID xmlns:n1="https://psd-14.sentinel2.eo.esa.int/PSD/S2_PDI_Level-1C_Tile_Metadata.xsd">
  <n1:Geometric_Info>
    <Tile_Angles>
      <Mean_Sun_Angle>
        <ZENITH_ANGLE unit="deg">{}</ZENITH_ANGLE>
        <AZIMUTH_ANGLE unit="deg">152.3</AZIMUTH_ANGLE>
      </Mean_Sun_Angle>
    </Tile_Angles>
  </n1:Geometric_Info>
</n1:Level-1C_Tile_ID>"#,
            zenith
        )
    }

    fn parse(xml: &str) -> ToolResult<f64> {
        mean_solar_zenith(xml, Path::new("MTD_TL.xml"))
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(ZenithValidity::from_angle(76.0), ZenithValidity::Valid);
        assert_eq!(ZenithValidity::from_angle(76.01), ZenithValidity::Invalid);
        assert_eq!(ZenithValidity::from_angle(31.5), ZenithValidity::Valid);
        assert_eq!(ZenithValidity::Invalid.to_string(), "invalid");
    }

    #[test]
    fn test_reads_mean_zenith() {
        assert_eq!(parse(&tile_metadata("76.0")).unwrap(), 76.0);
        assert_eq!(parse(&tile_metadata(" 76.01 ")).unwrap(), 76.01);
    }

    #[test]
    fn test_ignores_zenith_outside_mean_sun_angle() {
        let xml = r#"<root>
  <Sun_Angles_Grid><Zenith><ZENITH_ANGLE>90</ZENITH_ANGLE></Zenith></Sun_Angles_Grid>
  <Mean_Sun_Angle><ZENITH_ANGLE>40.5</ZENITH_ANGLE></Mean_Sun_Angle>
</root>"#;
        assert_eq!(parse(xml).unwrap(), 40.5);
    }

    #[test]
    fn test_missing_or_malformed() {
        let missing = "<root><Mean_Sun_Angle><AZIMUTH_ANGLE>1</AZIMUTH_ANGLE></Mean_Sun_Angle></root>";
        assert!(matches!(
            parse(missing),
            Err(ToolError::MissingElement { .. })
        ));

        assert!(matches!(
            parse(&tile_metadata("high")),
            Err(ToolError::InvalidAngle { .. })
        ));
        assert!(matches!(parse("<root>"), Err(ToolError::Xml { .. })));
    }

    #[test]
    fn test_check_file() {
        let dir = TempDir::new().unwrap();
        let low = dir.path().join("low.xml");
        let high = dir.path().join("high.xml");
        std::fs::write(&low, tile_metadata("76.0")).unwrap();
        std::fs::write(&high, tile_metadata("76.01")).unwrap();

        assert_eq!(check_solar_zenith(&low).unwrap(), ZenithValidity::Valid);
        assert_eq!(check_solar_zenith(&high).unwrap(), ZenithValidity::Invalid);
        assert!(matches!(
            check_solar_zenith(&dir.path().join("missing.xml")),
            Err(ToolError::Io { .. })
        ));
    }
}
