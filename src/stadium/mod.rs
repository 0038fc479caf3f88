//! Stadium data model and map loader
//!
//! Loading runs in three stages:
//! 1. `raw`: decode the document into all-optional structs
//! 2. `traits`: fill unset fields from the entry's trait, then from defaults
//! 3. this module: check required fields, convert flags and colors, flip the
//!    y axis and precompute curved-segment circles
//!
//! The result is a `Stadium` with no optional physics fields. Static
//! geometry sits behind an `Arc`; cloning a stadium shares it and deep-copies
//! the discs.

pub mod raw;
pub mod traits;

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::MapFormatError;
use crate::flip_y;
use crate::sim::arc::{CircleArc, Curvature};
use crate::sim::disc::{Disc, PlayerExt};
use crate::sim::flags::CollisionFlag;
use crate::sim::geometry::{Goal, Plane, Segment, SegmentShape, Team, Vertex};
use crate::sim::player::PlayerId;

use raw::{
    RawBackground, RawBall, RawColor, RawDisc, RawGoal, RawPlane, RawPlayerPhysics, RawPoint,
    RawSegment, RawStadium, RawTraits, RawVertex,
};
use traits::{FillMissing, Layered};

/// Named bag of default properties, as written in the map
pub type Trait = raw::RawTrait;

/// RGBA color; alpha is 0 only for `"transparent"` discs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    fn parse(raw: &RawColor, field: &'static str, transparent: bool) -> Result<Self, MapFormatError> {
        let invalid = |value: &str| MapFormatError::InvalidColor {
            field,
            value: value.to_string(),
        };
        match raw {
            RawColor::Rgb([r, g, b]) => Ok(Self::rgb(*r, *g, *b)),
            RawColor::Hex(s) if s == "transparent" => {
                if transparent {
                    Ok(Self::TRANSPARENT)
                } else {
                    Err(invalid(s))
                }
            }
            RawColor::Hex(s) => {
                if s.len() != 6 || !s.is_ascii() {
                    return Err(invalid(s));
                }
                let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| invalid(s));
                Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
            }
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0 {
            write!(f, "transparent")
        } else {
            write!(f, "{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    Grass,
    Hockey,
    None,
}

/// Field drawing hints; no physics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub kind: BackgroundKind,
    pub width: f64,
    pub height: f64,
    pub kick_off_radius: f64,
    pub corner_radius: f64,
    pub goal_line: f64,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraFollow {
    Player,
    Ball,
}

/// Which discs go back to their map position after a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KickOffReset {
    /// Only the ball
    Partial,
    /// Every stadium disc
    Full,
}

/// Template for player discs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPhysics {
    pub gravity: DVec2,
    pub radius: f64,
    pub inv_mass: f64,
    pub damping: f64,
    pub b_coef: f64,
    pub c_group: CollisionFlag,
    pub acceleration: f64,
    pub kicking_acceleration: f64,
    pub kicking_damping: f64,
    pub kick_strength: f64,
    pub kickback: f64,
}

impl PlayerPhysics {
    /// Fresh player disc at the origin, at rest
    pub fn spawn_disc(&self, player_id: PlayerId, team: Team) -> Disc {
        Disc {
            position: DVec2::ZERO,
            velocity: DVec2::ZERO,
            gravity: self.gravity,
            radius: self.radius,
            inv_mass: self.inv_mass,
            damping: self.damping,
            b_coef: self.b_coef,
            color: team.color(),
            c_group: self.c_group | team.flag(),
            c_mask: CollisionFlag::ALL,
            trait_name: None,
            player: Some(PlayerExt {
                player_id,
                acceleration: self.acceleration,
                kicking_acceleration: self.kicking_acceleration,
                kicking_damping: self.kicking_damping,
                kick_strength: self.kick_strength,
                kickback: self.kickback,
            }),
        }
    }
}

/// Immovable bodies of a stadium
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub vertexes: Vec<Vertex>,
    pub segments: Vec<Segment>,
    pub goals: Vec<Goal>,
    pub planes: Vec<Plane>,
}

/// A fully resolved stadium
#[derive(Debug, Clone, PartialEq)]
pub struct Stadium {
    pub name: String,
    pub background: Background,
    pub width: f64,
    pub height: f64,
    pub camera_width: f64,
    pub camera_height: f64,
    pub max_view_width: f64,
    pub camera_follow: CameraFollow,
    pub spawn_distance: f64,
    pub can_be_stored: bool,
    pub kick_off_reset: KickOffReset,
    pub traits: Arc<BTreeMap<String, Trait>>,
    pub geometry: Arc<Geometry>,
    /// Ball first, then the map's discs; players are appended by a match
    pub discs: Vec<Disc>,
    pub red_spawn_points: Vec<DVec2>,
    pub blue_spawn_points: Vec<DVec2>,
    pub player_physics: PlayerPhysics,
}

impl Stadium {
    pub fn ball(&self) -> &Disc {
        &self.discs[0]
    }

    pub fn vertexes(&self) -> &[Vertex] {
        &self.geometry.vertexes
    }

    pub fn segments(&self) -> &[Segment] {
        &self.geometry.segments
    }

    pub fn goals(&self) -> &[Goal] {
        &self.geometry.goals
    }

    pub fn planes(&self) -> &[Plane] {
        &self.geometry.planes
    }

    pub fn spawn_points(&self, team: Team) -> &[DVec2] {
        match team {
            Team::Red => &self.red_spawn_points,
            Team::Blue => &self.blue_spawn_points,
            Team::Spectator => &[],
        }
    }
}

/// Maps shipped with the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseMap {
    Classic,
}

impl BaseMap {
    pub fn name(self) -> &'static str {
        match self {
            BaseMap::Classic => "classic",
        }
    }

    pub fn source(self) -> &'static str {
        match self {
            BaseMap::Classic => include_str!("../../stadiums/classic.json"),
        }
    }

    pub fn load(self) -> Result<Stadium, MapFormatError> {
        load_stadium(self.source())
    }
}

impl FromStr for BaseMap {
    type Err = MapFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" => Ok(BaseMap::Classic),
            _ => Err(MapFormatError::UnknownBaseMap(s.to_string())),
        }
    }
}

/// Parse a map document
pub fn load_stadium(source: &str) -> Result<Stadium, MapFormatError> {
    let raw: RawStadium = serde_json::from_str(source)?;
    let stadium = resolve_stadium(raw)?;
    log::info!(
        "Loaded stadium {}: {} vertexes, {} segments, {} goals, {} discs, {} planes",
        stadium.name,
        stadium.vertexes().len(),
        stadium.segments().len(),
        stadium.goals().len(),
        stadium.discs.len(),
        stadium.planes().len(),
    );
    Ok(stadium)
}

pub fn load_stadium_file(path: impl AsRef<Path>) -> Result<Stadium, MapFormatError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| MapFormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_stadium(&source)
}

/// Built-in map name, or a path to a map file
pub fn load_stadium_named(name_or_path: &str) -> Result<Stadium, MapFormatError> {
    match name_or_path.parse::<BaseMap>() {
        Ok(base) => base.load(),
        Err(_) => load_stadium_file(name_or_path),
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, MapFormatError> {
    value.ok_or(MapFormatError::MissingField(field))
}

/// Map point in simulation coordinates
fn point(p: RawPoint) -> DVec2 {
    flip_y(DVec2::from_array(p))
}

fn flags(names: Option<Vec<String>>, field: &'static str) -> Result<CollisionFlag, MapFormatError> {
    CollisionFlag::from_names(&required(names, field)?)
}

fn color(raw: Option<RawColor>, field: &'static str, transparent: bool) -> Result<Color, MapFormatError> {
    Color::parse(&required(raw, field)?, field, transparent)
}

fn resolve_stadium(raw: RawStadium) -> Result<Stadium, MapFormatError> {
    let name = required(raw.name, "name")?;

    let traits = match raw.traits {
        None => BTreeMap::new(),
        Some(RawTraits::Map(map)) => map,
        Some(RawTraits::List(list)) if list.is_empty() => BTreeMap::new(),
        Some(RawTraits::List(_)) => {
            return Err(MapFormatError::InvalidValue {
                field: "traits",
                value: "non-empty list".to_string(),
            });
        }
    };

    let vertexes = raw
        .vertexes
        .unwrap_or_default()
        .into_iter()
        .map(|v| resolve_vertex(v, &traits))
        .collect::<Result<Vec<_>, _>>()?;
    let segments = raw
        .segments
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, s)| resolve_segment(i, s, &traits, &vertexes))
        .collect::<Result<Vec<_>, _>>()?;
    let goals = raw
        .goals
        .unwrap_or_default()
        .into_iter()
        .map(resolve_goal)
        .collect::<Result<Vec<_>, _>>()?;
    let planes = raw
        .planes
        .unwrap_or_default()
        .into_iter()
        .map(|p| resolve_plane(p, &traits))
        .collect::<Result<Vec<_>, _>>()?;

    let mut map_discs = raw
        .discs
        .unwrap_or_default()
        .into_iter()
        .map(|d| build_disc(d.layered(&traits)))
        .collect::<Result<Vec<_>, _>>()?;
    let ball = resolve_ball(raw.ball_physics, &mut map_discs, &traits)?;
    let mut discs = Vec::with_capacity(map_discs.len() + 1);
    discs.push(ball);
    discs.extend(map_discs);

    let spawn = |points: Option<Vec<RawPoint>>| points.unwrap_or_default().into_iter().map(point).collect();

    Ok(Stadium {
        name,
        background: resolve_background(raw.bg.unwrap_or_default())?,
        width: raw.width.unwrap_or(0.0),
        height: raw.height.unwrap_or(0.0),
        camera_width: raw.camera_width.unwrap_or(0.0),
        camera_height: raw.camera_height.unwrap_or(0.0),
        max_view_width: raw.max_view_width.unwrap_or(0.0),
        camera_follow: match raw.camera_follow.as_deref() {
            None | Some("ball") => CameraFollow::Ball,
            Some("player") => CameraFollow::Player,
            Some(other) => {
                return Err(MapFormatError::InvalidValue {
                    field: "cameraFollow",
                    value: other.to_string(),
                });
            }
        },
        spawn_distance: raw.spawn_distance.unwrap_or(200.0),
        can_be_stored: raw.can_be_stored.unwrap_or(true),
        kick_off_reset: match raw.kick_off_reset.as_deref() {
            None | Some("partial") => KickOffReset::Partial,
            Some("full") => KickOffReset::Full,
            Some(other) => {
                return Err(MapFormatError::InvalidValue {
                    field: "kickOffReset",
                    value: other.to_string(),
                });
            }
        },
        traits: Arc::new(traits),
        geometry: Arc::new(Geometry {
            vertexes,
            segments,
            goals,
            planes,
        }),
        discs,
        red_spawn_points: spawn(raw.red_spawn_points),
        blue_spawn_points: spawn(raw.blue_spawn_points),
        player_physics: resolve_player_physics(raw.player_physics.unwrap_or_default())?,
    })
}

fn resolve_background(mut raw: RawBackground) -> Result<Background, MapFormatError> {
    raw.fill_missing(&traits::background_defaults());
    let kind = match required(raw.kind, "bg.type")?.as_str() {
        "grass" => BackgroundKind::Grass,
        "hockey" => BackgroundKind::Hockey,
        "none" => BackgroundKind::None,
        other => {
            return Err(MapFormatError::InvalidValue {
                field: "bg.type",
                value: other.to_string(),
            });
        }
    };
    Ok(Background {
        kind,
        width: required(raw.width, "bg.width")?,
        height: required(raw.height, "bg.height")?,
        kick_off_radius: required(raw.kick_off_radius, "bg.kickOffRadius")?,
        corner_radius: required(raw.corner_radius, "bg.cornerRadius")?,
        goal_line: required(raw.goal_line, "bg.goalLine")?,
        color: color(raw.color, "bg.color", false)?,
    })
}

fn resolve_vertex(raw: RawVertex, traits: &BTreeMap<String, Trait>) -> Result<Vertex, MapFormatError> {
    let raw = raw.layered(traits);
    let x = required(raw.x, "vertexes[].x")?;
    let y = required(raw.y, "vertexes[].y")?;
    Ok(Vertex {
        position: point([x, y]),
        b_coef: required(raw.b_coef, "vertexes[].bCoef")?,
        c_group: flags(raw.c_group, "vertexes[].cGroup")?,
        c_mask: flags(raw.c_mask, "vertexes[].cMask")?,
        trait_name: raw.trait_name,
    })
}

fn resolve_segment(
    index: usize,
    raw: RawSegment,
    traits: &BTreeMap<String, Trait>,
    vertexes: &[Vertex],
) -> Result<Segment, MapFormatError> {
    let raw = raw.layered(traits);
    let mut v0 = required(raw.v0, "segments[].v0")?;
    let mut v1 = required(raw.v1, "segments[].v1")?;
    for vertex in [v0, v1] {
        if vertex >= vertexes.len() {
            return Err(MapFormatError::VertexOutOfRange {
                segment: index,
                index: vertex,
                count: vertexes.len(),
            });
        }
    }

    // Mirroring the y axis reverses orientation
    let mut bias = -required(raw.bias, "segments[].bias")?;
    let curve = -required(raw.curve, "segments[].curve")?;
    let curve_f = -required(raw.curve_f, "segments[].curveF")?;

    let curvature = Curvature::resolve(curve, curve_f);
    if curvature.reversed {
        std::mem::swap(&mut v0, &mut v1);
        bias = -bias;
    }

    let p0 = vertexes[v0].position;
    let p1 = vertexes[v1].position;
    let shape = if curvature.is_curved() {
        SegmentShape::Curved(CircleArc::from_endpoints(p0, p1, curvature.factor))
    } else {
        SegmentShape::Straight
    };

    Ok(Segment {
        v0,
        v1,
        p0,
        p1,
        b_coef: required(raw.b_coef, "segments[].bCoef")?,
        bias,
        curve: curvature.factor,
        shape,
        visible: required(raw.vis, "segments[].vis")?,
        color: color(raw.color, "segments[].color", false)?,
        c_group: flags(raw.c_group, "segments[].cGroup")?,
        c_mask: flags(raw.c_mask, "segments[].cMask")?,
        trait_name: raw.trait_name,
    })
}

fn resolve_goal(raw: RawGoal) -> Result<Goal, MapFormatError> {
    let team = match required(raw.team, "goals[].team")?.as_str() {
        "red" => Team::Red,
        "blue" => Team::Blue,
        other => {
            return Err(MapFormatError::InvalidValue {
                field: "goals[].team",
                value: other.to_string(),
            });
        }
    };
    Ok(Goal {
        p0: point(required(raw.p0, "goals[].p0")?),
        p1: point(required(raw.p1, "goals[].p1")?),
        team,
    })
}

fn resolve_plane(raw: RawPlane, traits: &BTreeMap<String, Trait>) -> Result<Plane, MapFormatError> {
    let raw = raw.layered(traits);
    Ok(Plane {
        normal: point(required(raw.normal, "planes[].normal")?),
        dist: required(raw.dist, "planes[].dist")?,
        b_coef: required(raw.b_coef, "planes[].bCoef")?,
        c_group: flags(raw.c_group, "planes[].cGroup")?,
        c_mask: flags(raw.c_mask, "planes[].cMask")?,
        trait_name: raw.trait_name,
    })
}

/// Disc from an already layered raw entry
fn build_disc(raw: RawDisc) -> Result<Disc, MapFormatError> {
    Ok(Disc {
        position: point(required(raw.pos, "discs[].pos")?),
        velocity: point(required(raw.speed, "discs[].speed")?),
        gravity: point(required(raw.gravity, "discs[].gravity")?),
        radius: required(raw.radius, "discs[].radius")?,
        inv_mass: required(raw.inv_mass, "discs[].invMass")?,
        damping: required(raw.damping, "discs[].damping")?,
        b_coef: required(raw.b_coef, "discs[].bCoef")?,
        color: color(raw.color, "discs[].color", true)?,
        c_group: flags(raw.c_group, "discs[].cGroup")?,
        c_mask: flags(raw.c_mask, "discs[].cMask")?,
        trait_name: raw.trait_name,
        player: None,
    })
}

fn resolve_ball(
    raw: Option<RawBall>,
    discs: &mut Vec<Disc>,
    traits: &BTreeMap<String, Trait>,
) -> Result<Disc, MapFormatError> {
    let ball = match raw {
        None => build_disc(traits::ball_defaults())?,
        Some(RawBall::Named(name)) if name == "disc0" => {
            if discs.is_empty() {
                return Err(MapFormatError::NoDiscForBall);
            }
            discs.remove(0)
        }
        Some(RawBall::Named(name)) => return Err(MapFormatError::InvalidBall(name)),
        Some(RawBall::Inline(mut inline)) => {
            inline.pos = Some([0.0, 0.0]);
            build_disc(inline.layered_with(traits, &traits::ball_defaults()))?
        }
    };
    Ok(ball.into_ball())
}

fn resolve_player_physics(mut raw: RawPlayerPhysics) -> Result<PlayerPhysics, MapFormatError> {
    raw.fill_missing(&traits::player_physics_defaults());
    Ok(PlayerPhysics {
        gravity: point(required(raw.gravity, "playerPhysics.gravity")?),
        radius: required(raw.radius, "playerPhysics.radius")?,
        inv_mass: required(raw.inv_mass, "playerPhysics.invMass")?,
        damping: required(raw.damping, "playerPhysics.damping")?,
        b_coef: required(raw.b_coef, "playerPhysics.bCoef")?,
        c_group: flags(raw.c_group, "playerPhysics.cGroup")?,
        acceleration: required(raw.acceleration, "playerPhysics.acceleration")?,
        kicking_acceleration: required(raw.kicking_acceleration, "playerPhysics.kickingAcceleration")?,
        kicking_damping: required(raw.kicking_damping, "playerPhysics.kickingDamping")?,
        kick_strength: required(raw.kick_strength, "playerPhysics.kickStrength")?,
        kickback: required(raw.kickback, "playerPhysics.kickback")?,
    })
}
