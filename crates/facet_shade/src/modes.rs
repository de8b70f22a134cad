//! Run-time shading modes.
//!
//! Three independent selectors, each cycled round-robin by its own command.
//! The current selection is a plain [`ShadingModes`] value owned by the
//! caller and passed to every frame.

use crate::brdf::BrdfModel;
use std::fmt;

/// How vertices are tested against the light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShadowMethod {
    #[default]
    Off,
    /// Test every other triangle of the mesh
    BruteForce,
    /// Same answers as `BruteForce`, pruned by a bounding volume hierarchy
    Bvh,
}

/// What an unoccluded vertex displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMethod {
    #[default]
    Brdf,
    /// Placeholder; always black
    AmbientOcclusion,
}

/// A closed, ordered set of modes that can be cycled and looked up.
///
/// Out-of-range indices and unknown names resolve to the default mode with a
/// warning instead of an error, so a stale settings file never stops a frame.
pub trait Selector: Copy + Default + PartialEq + fmt::Debug + 'static {
    /// Every state in cycling order
    const ALL: &'static [Self];
    /// Selector name used in diagnostics
    const KIND: &'static str;

    fn name(self) -> &'static str;

    fn index(self) -> usize {
        Self::ALL.iter().position(|m| *m == self).unwrap_or(0)
    }

    /// The following state, wrapping after the last.
    fn next(self) -> Self {
        Self::ALL
            .get((self.index() + 1) % Self::ALL.len())
            .copied()
            .unwrap_or_default()
    }

    fn from_index(index: usize) -> Self {
        match Self::ALL.get(index) {
            Some(mode) => *mode,
            None => {
                let fallback = Self::default();
                log::warn!(
                    "Unknown {} index {}, using {}",
                    Self::KIND,
                    index,
                    fallback.name()
                );
                fallback
            }
        }
    }

    fn from_name(name: &str) -> Self {
        let name = name.trim();
        match Self::ALL.iter().find(|m| m.name().eq_ignore_ascii_case(name)) {
            Some(mode) => *mode,
            None => {
                let fallback = Self::default();
                log::warn!(
                    "Unknown {} '{}', using {}",
                    Self::KIND,
                    name,
                    fallback.name()
                );
                fallback
            }
        }
    }
}

impl Selector for ShadowMethod {
    const ALL: &'static [Self] = &[ShadowMethod::Off, ShadowMethod::BruteForce, ShadowMethod::Bvh];
    const KIND: &'static str = "shadow method";

    fn name(self) -> &'static str {
        match self {
            ShadowMethod::Off => "off",
            ShadowMethod::BruteForce => "brute-force",
            ShadowMethod::Bvh => "bvh",
        }
    }
}

impl Selector for BrdfModel {
    const ALL: &'static [Self] = &[BrdfModel::BlinnPhong, BrdfModel::CookTorrance, BrdfModel::Ggx];
    const KIND: &'static str = "BRDF model";

    fn name(self) -> &'static str {
        match self {
            BrdfModel::BlinnPhong => "blinn-phong",
            BrdfModel::CookTorrance => "cook-torrance",
            BrdfModel::Ggx => "ggx",
        }
    }
}

impl Selector for ColorMethod {
    const ALL: &'static [Self] = &[ColorMethod::Brdf, ColorMethod::AmbientOcclusion];
    const KIND: &'static str = "color method";

    fn name(self) -> &'static str {
        match self {
            ColorMethod::Brdf => "brdf",
            ColorMethod::AmbientOcclusion => "ambient-occlusion",
        }
    }
}

/// A discrete user command, applied between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CycleShadow,
    CycleBrdf,
    CycleColor,
}

impl Command {
    /// Key binding: `s` shadows, `b` BRDF, `c` color.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            's' => Some(Command::CycleShadow),
            'b' => Some(Command::CycleBrdf),
            'c' => Some(Command::CycleColor),
            _ => {
                log::debug!("Ignoring unbound key {:?}", key);
                None
            }
        }
    }
}

/// The modes a frame is shaded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShadingModes {
    pub shadow: ShadowMethod,
    pub brdf: BrdfModel,
    pub color: ColorMethod,
}

impl ShadingModes {
    pub fn new(shadow: ShadowMethod, brdf: BrdfModel, color: ColorMethod) -> Self {
        Self { shadow, brdf, color }
    }

    /// Advance the selector `command` targets; the other two are untouched.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::CycleShadow => self.shadow = self.shadow.next(),
            Command::CycleBrdf => self.brdf = self.brdf.next(),
            Command::CycleColor => self.color = self.color.next(),
        }
        log::debug!("{:?} -> {}", command, self);
    }

    /// Apply the command bound to each key of `keys`, in order.
    pub fn apply_keys(&mut self, keys: &str) {
        for command in keys.chars().filter_map(Command::from_key) {
            self.apply(command);
        }
    }
}

impl fmt::Display for ShadingModes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "shadow={} brdf={} color={}",
            self.shadow.name(),
            self.brdf.name(),
            self.color.name()
        )
    }
}
