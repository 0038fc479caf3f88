//! Trait merging and hardcoded defaults
//!
//! Every raw map entry goes through the same two fills: first the fields of
//! its named trait, then the hardcoded defaults. A fill only writes fields
//! that are still `None`, so entry values beat trait values beat defaults.

use std::collections::BTreeMap;

use super::raw::{
    RawBackground, RawColor, RawDisc, RawPlane, RawPlayerPhysics, RawSegment, RawTrait, RawVertex,
};

/// Fill-if-absent over every optional field of a raw struct
pub trait FillMissing {
    fn fill_missing(&mut self, other: &Self);
}

macro_rules! impl_fill_missing {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl FillMissing for $ty {
            fn fill_missing(&mut self, other: &Self) {
                $(
                    if self.$field.is_none() {
                        self.$field = other.$field.clone();
                    }
                )*
            }
        }
    };
}

impl_fill_missing!(RawVertex { x, y, b_coef, c_group, c_mask, trait_name });
impl_fill_missing!(RawSegment {
    v0, v1, b_coef, curve, curve_f, bias, c_group, c_mask, vis, color, trait_name,
});
impl_fill_missing!(RawDisc {
    pos, speed, gravity, radius, inv_mass, damping, b_coef, color, c_group, c_mask, trait_name,
});
impl_fill_missing!(RawPlane { normal, dist, b_coef, c_group, c_mask, trait_name });
impl_fill_missing!(RawPlayerPhysics {
    gravity, radius, inv_mass, damping, b_coef, c_group, acceleration,
    kicking_acceleration, kicking_damping, kick_strength, kickback,
});
impl_fill_missing!(RawBackground { kind, width, height, kick_off_radius, corner_radius, goal_line, color });

/// Raw entry kind that can reference a trait and has hardcoded defaults
pub trait Layered: FillMissing + Sized {
    fn trait_name(&self) -> Option<&str>;

    /// Project the trait onto the fields this entry kind has
    fn from_trait(t: &RawTrait) -> Self;

    fn defaults() -> Self;

    /// Entry values, then trait values, then defaults
    fn layered(self, traits: &BTreeMap<String, RawTrait>) -> Self {
        self.layered_with(traits, &Self::defaults())
    }

    fn layered_with(mut self, traits: &BTreeMap<String, RawTrait>, defaults: &Self) -> Self {
        if let Some(name) = self.trait_name().map(str::to_owned) {
            match traits.get(&name) {
                Some(t) => {
                    let from_trait = Self::from_trait(t);
                    self.fill_missing(&from_trait);
                }
                None => log::debug!("Ignoring unknown trait `{name}`"),
            }
        }
        self.fill_missing(defaults);
        self
    }
}

fn names(list: &[&str]) -> Option<Vec<String>> {
    Some(list.iter().map(|s| s.to_string()).collect())
}

fn hex(color: &str) -> Option<RawColor> {
    Some(RawColor::Hex(color.to_string()))
}

impl Layered for RawVertex {
    fn trait_name(&self) -> Option<&str> {
        self.trait_name.as_deref()
    }

    fn from_trait(t: &RawTrait) -> Self {
        Self {
            b_coef: t.b_coef,
            c_group: t.c_group.clone(),
            c_mask: t.c_mask.clone(),
            ..Self::default()
        }
    }

    fn defaults() -> Self {
        Self {
            b_coef: Some(1.0),
            c_group: names(&["wall"]),
            c_mask: names(&["all"]),
            ..Self::default()
        }
    }
}

impl Layered for RawSegment {
    fn trait_name(&self) -> Option<&str> {
        self.trait_name.as_deref()
    }

    fn from_trait(t: &RawTrait) -> Self {
        Self {
            b_coef: t.b_coef,
            curve: t.curve,
            curve_f: t.curve_f,
            bias: t.bias,
            c_group: t.c_group.clone(),
            c_mask: t.c_mask.clone(),
            vis: t.vis,
            color: t.color.clone(),
            ..Self::default()
        }
    }

    fn defaults() -> Self {
        Self {
            b_coef: Some(1.0),
            curve: Some(0.0),
            curve_f: Some(0.0),
            bias: Some(0.0),
            c_group: names(&["wall"]),
            c_mask: names(&["all"]),
            vis: Some(true),
            color: hex("000000"),
            ..Self::default()
        }
    }
}

impl Layered for RawDisc {
    fn trait_name(&self) -> Option<&str> {
        self.trait_name.as_deref()
    }

    fn from_trait(t: &RawTrait) -> Self {
        Self {
            speed: t.speed,
            gravity: t.gravity,
            radius: t.radius,
            inv_mass: t.inv_mass,
            damping: t.damping,
            b_coef: t.b_coef,
            color: t.color.clone(),
            c_group: t.c_group.clone(),
            c_mask: t.c_mask.clone(),
            ..Self::default()
        }
    }

    fn defaults() -> Self {
        Self {
            speed: Some([0.0, 0.0]),
            gravity: Some([0.0, 0.0]),
            radius: Some(10.0),
            inv_mass: Some(1.0),
            damping: Some(0.99),
            b_coef: Some(0.5),
            color: hex("FFFFFF"),
            c_group: names(&["all"]),
            c_mask: names(&["all"]),
            ..Self::default()
        }
    }
}

impl Layered for RawPlane {
    fn trait_name(&self) -> Option<&str> {
        self.trait_name.as_deref()
    }

    fn from_trait(t: &RawTrait) -> Self {
        Self {
            b_coef: t.b_coef,
            c_group: t.c_group.clone(),
            c_mask: t.c_mask.clone(),
            ..Self::default()
        }
    }

    fn defaults() -> Self {
        Self {
            b_coef: Some(1.0),
            c_group: names(&["wall"]),
            c_mask: names(&["all"]),
            ..Self::default()
        }
    }
}

/// Defaults of the ball when the map gives none, or gives an inline disc
pub fn ball_defaults() -> RawDisc {
    RawDisc {
        pos: Some([0.0, 0.0]),
        c_group: names(&["ball"]),
        ..RawDisc::defaults()
    }
}

pub fn player_physics_defaults() -> RawPlayerPhysics {
    RawPlayerPhysics {
        gravity: Some([0.0, 0.0]),
        radius: Some(15.0),
        inv_mass: Some(0.5),
        damping: Some(0.96),
        b_coef: Some(0.5),
        c_group: Some(Vec::new()),
        acceleration: Some(0.1),
        kicking_acceleration: Some(0.07),
        kicking_damping: Some(0.96),
        kick_strength: Some(5.0),
        kickback: Some(0.0),
    }
}

pub fn background_defaults() -> RawBackground {
    RawBackground {
        kind: Some("none".to_string()),
        width: Some(0.0),
        height: Some(0.0),
        kick_off_radius: Some(0.0),
        corner_radius: Some(0.0),
        goal_line: Some(0.0),
        color: hex("718C5A"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traits() -> BTreeMap<String, RawTrait> {
        let mut traits = BTreeMap::new();
        traits.insert(
            "goalPost".to_string(),
            RawTrait {
                radius: Some(8.0),
                inv_mass: Some(0.0),
                b_coef: Some(0.5),
                ..RawTrait::default()
            },
        );
        traits
    }

    #[test]
    fn test_entry_beats_trait_beats_default() {
        let disc = RawDisc {
            pos: Some([1.0, 2.0]),
            radius: Some(4.0),
            trait_name: Some("goalPost".to_string()),
            ..RawDisc::default()
        }
        .layered(&traits());
        assert_eq!(disc.radius, Some(4.0));
        assert_eq!(disc.inv_mass, Some(0.0));
        assert_eq!(disc.damping, Some(0.99));
    }

    #[test]
    fn test_unknown_trait_is_ignored() {
        let vertex = RawVertex {
            x: Some(0.0),
            y: Some(0.0),
            trait_name: Some("nope".to_string()),
            ..RawVertex::default()
        }
        .layered(&traits());
        assert_eq!(vertex.b_coef, Some(1.0));
        assert_eq!(vertex.c_group, names(&["wall"]));
    }

    #[test]
    fn test_required_fields_stay_unset() {
        let segment = RawSegment::default().layered(&BTreeMap::new());
        assert_eq!(segment.v0, None);
        assert_eq!(segment.vis, Some(true));
        assert_eq!(segment.curve, Some(0.0));
    }

    #[test]
    fn test_ball_defaults_group() {
        let ball = ball_defaults();
        assert_eq!(ball.c_group, names(&["ball"]));
        assert_eq!(ball.radius, Some(10.0));
    }
}
