//! All-optional map document types
//!
//! Mirrors the map format field for field. Nothing here has a default yet;
//! trait values and hardcoded defaults are layered on in `traits.rs`.

use std::collections::BTreeMap;

use serde::Deserialize;

/// `[x, y]` as written in the map
pub type RawPoint = [f64; 2];

/// `"RRGGBB"`, `"transparent"` or `[r, g, b]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawColor {
    Hex(String),
    Rgb([u8; 3]),
}

/// Named property bag shared by map entries
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrait {
    pub vis: Option<bool>,
    pub b_coef: Option<f64>,
    pub radius: Option<f64>,
    pub inv_mass: Option<f64>,
    pub speed: Option<RawPoint>,
    pub gravity: Option<RawPoint>,
    pub damping: Option<f64>,
    pub c_group: Option<Vec<String>>,
    pub c_mask: Option<Vec<String>>,
    pub acceleration: Option<f64>,
    pub color: Option<RawColor>,
    pub bias: Option<f64>,
    pub curve: Option<f64>,
    #[serde(rename = "curveF")]
    pub curve_f: Option<f64>,
}

/// `traits` is an object, but map editors also write an empty list
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawTraits {
    Map(BTreeMap<String, RawTrait>),
    List(Vec<serde_json::Value>),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBackground {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub kick_off_radius: Option<f64>,
    pub corner_radius: Option<f64>,
    pub goal_line: Option<f64>,
    pub color: Option<RawColor>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVertex {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub b_coef: Option<f64>,
    pub c_group: Option<Vec<String>>,
    pub c_mask: Option<Vec<String>>,
    #[serde(rename = "trait")]
    pub trait_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSegment {
    pub v0: Option<usize>,
    pub v1: Option<usize>,
    pub b_coef: Option<f64>,
    /// Degrees
    pub curve: Option<f64>,
    #[serde(rename = "curveF")]
    pub curve_f: Option<f64>,
    pub bias: Option<f64>,
    pub c_group: Option<Vec<String>>,
    pub c_mask: Option<Vec<String>>,
    pub vis: Option<bool>,
    pub color: Option<RawColor>,
    #[serde(rename = "trait")]
    pub trait_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawGoal {
    pub p0: Option<RawPoint>,
    pub p1: Option<RawPoint>,
    pub team: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDisc {
    pub pos: Option<RawPoint>,
    pub speed: Option<RawPoint>,
    pub gravity: Option<RawPoint>,
    pub radius: Option<f64>,
    pub inv_mass: Option<f64>,
    pub damping: Option<f64>,
    pub b_coef: Option<f64>,
    pub color: Option<RawColor>,
    pub c_group: Option<Vec<String>>,
    pub c_mask: Option<Vec<String>>,
    #[serde(rename = "trait")]
    pub trait_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlane {
    pub normal: Option<RawPoint>,
    pub dist: Option<f64>,
    pub b_coef: Option<f64>,
    pub c_group: Option<Vec<String>>,
    pub c_mask: Option<Vec<String>>,
    #[serde(rename = "trait")]
    pub trait_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlayerPhysics {
    pub gravity: Option<RawPoint>,
    pub radius: Option<f64>,
    pub inv_mass: Option<f64>,
    pub damping: Option<f64>,
    pub b_coef: Option<f64>,
    pub c_group: Option<Vec<String>>,
    pub acceleration: Option<f64>,
    pub kicking_acceleration: Option<f64>,
    pub kicking_damping: Option<f64>,
    pub kick_strength: Option<f64>,
    pub kickback: Option<f64>,
}

/// `"disc0"` or an inline disc
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawBall {
    Named(String),
    Inline(RawDisc),
}

/// Whole map document
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStadium {
    pub name: Option<String>,
    pub bg: Option<RawBackground>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub camera_width: Option<f64>,
    pub camera_height: Option<f64>,
    pub max_view_width: Option<f64>,
    pub camera_follow: Option<String>,
    pub spawn_distance: Option<f64>,
    pub can_be_stored: Option<bool>,
    pub kick_off_reset: Option<String>,
    pub traits: Option<RawTraits>,
    pub vertexes: Option<Vec<RawVertex>>,
    pub segments: Option<Vec<RawSegment>>,
    pub goals: Option<Vec<RawGoal>>,
    pub discs: Option<Vec<RawDisc>>,
    pub planes: Option<Vec<RawPlane>>,
    pub red_spawn_points: Option<Vec<RawPoint>>,
    pub blue_spawn_points: Option<Vec<RawPoint>>,
    pub player_physics: Option<RawPlayerPhysics>,
    pub ball_physics: Option<RawBall>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_camel_case_fields() {
        let raw: RawSegment = serde_json::from_str(
            r#"{ "v0": 1, "v1": 2, "bCoef": 0.1, "curveF": 0.5, "cMask": ["ball"], "trait": "goalNet" }"#,
        )
        .unwrap();
        assert_eq!(raw.v0, Some(1));
        assert_eq!(raw.b_coef, Some(0.1));
        assert_eq!(raw.curve_f, Some(0.5));
        assert_eq!(raw.curve, None);
        assert_eq!(raw.trait_name.as_deref(), Some("goalNet"));
    }

    #[test]
    fn test_traits_object_or_empty_list() {
        let map: RawTraits = serde_json::from_str(r#"{ "post": { "radius": 8 } }"#).unwrap();
        assert!(matches!(map, RawTraits::Map(m) if m["post"].radius == Some(8.0)));
        let list: RawTraits = serde_json::from_str("[]").unwrap();
        assert!(matches!(list, RawTraits::List(l) if l.is_empty()));
    }

    #[test]
    fn test_ball_variants() {
        let named: RawBall = serde_json::from_str(r#""disc0""#).unwrap();
        assert_eq!(named, RawBall::Named("disc0".to_string()));
        let inline: RawBall = serde_json::from_str(r#"{ "radius": 6.4, "bCoef": 0.4 }"#).unwrap();
        assert!(matches!(inline, RawBall::Inline(d) if d.radius == Some(6.4)));
    }

    #[test]
    fn test_colors() {
        let hex: RawColor = serde_json::from_str(r#""FFCCCC""#).unwrap();
        assert_eq!(hex, RawColor::Hex("FFCCCC".to_string()));
        let rgb: RawColor = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(rgb, RawColor::Rgb([1, 2, 3]));
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        assert!(serde_json::from_str::<RawVertex>(r#"{ "x": "left" }"#).is_err());
    }
}
