//! Analytic reflectance models.
//!
//! Every model returns a scalar intensity: a Lambertian diffuse term plus a
//! model-specific specular lobe, scaled by the light cosine. Inputs are unit
//! vectors: the surface normal `n`, the direction toward the light `l` and
//! the direction toward the eye `v`.
//!
//! Cosines that end up in a denominator are clamped to
//! [`BrdfParams::grazing_epsilon`], and the final cosine factor is
//! `max(n.l, 0)`. A vertex facing away from the light therefore returns
//! exactly zero, and no combination of unit inputs produces NaN or infinity.

use facet_math::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Roughness and normal-incidence reflectance of a microfacet lobe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Microfacet {
    /// Roughness (0 = mirror, 1 = rough)
    pub alpha: f32,
    /// Fresnel reflectance at normal incidence
    pub f0: f32,
}

impl Microfacet {
    pub fn new(alpha: f32, f0: f32) -> Self {
        Self { alpha, f0 }
    }

    /// Roughness with the zero-width lobe ruled out.
    #[inline]
    fn alpha(&self) -> f32 {
        self.alpha.max(0.001)
    }
}

/// Constants shared by the reflectance models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrdfParams {
    /// Diffuse albedo
    pub kd: f32,
    /// Blinn-Phong specular weight
    pub ks: f32,
    /// Blinn-Phong exponent
    pub shininess: f32,
    pub cook_torrance: Microfacet,
    pub ggx: Microfacet,
    /// Lower bound for cosines used as divisors
    pub grazing_epsilon: f32,
}

impl Default for BrdfParams {
    fn default() -> Self {
        Self {
            kd: 0.7,
            ks: 0.5,
            shininess: 0.5,
            cook_torrance: Microfacet::new(0.1, 0.9),
            ggx: Microfacet::new(0.1, 0.92),
            grazing_epsilon: 1e-4,
        }
    }
}

/// The active reflectance model of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BrdfModel {
    BlinnPhong,
    CookTorrance,
    #[default]
    Ggx,
}

impl BrdfModel {
    /// Specular lobe of this model.
    pub fn specular(self, n: Vec3, l: Vec3, v: Vec3, params: &BrdfParams) -> f32 {
        match self {
            BrdfModel::BlinnPhong => BlinnPhong.specular(n, l, v, params),
            BrdfModel::CookTorrance => CookTorrance.specular(n, l, v, params),
            BrdfModel::Ggx => Ggx.specular(n, l, v, params),
        }
    }
}

/// A specular lobe.
pub trait Specular {
    fn specular(&self, n: Vec3, l: Vec3, v: Vec3, params: &BrdfParams) -> f32;
}

/// Phong lobe around the mirrored light direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlinnPhong;

impl Specular for BlinnPhong {
    fn specular(&self, n: Vec3, l: Vec3, v: Vec3, params: &BrdfParams) -> f32 {
        let r = 2.0 * n * n.dot(l) - l;
        params.ks * r.dot(v).max(0.0).powf(params.shininess)
    }
}

/// Beckmann distribution with the Cook-Torrance V-cavity masking term.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookTorrance;

impl Specular for CookTorrance {
    fn specular(&self, n: Vec3, l: Vec3, v: Vec3, params: &BrdfParams) -> f32 {
        let lobe = params.cook_torrance;
        let c = Cosines::new(n, l, v, params.grazing_epsilon);

        let d = beckmann_d(c.n_dot_h, lobe.alpha());
        let f = schlick_fresnel(lobe.f0, c.l_dot_h);
        let g = cook_torrance_g(c.n_dot_h, c.n_dot_l, c.n_dot_v, c.v_dot_h);

        d * f * g / (4.0 * c.n_dot_l * c.n_dot_v)
    }
}

/// Trowbridge-Reitz distribution with separable Smith masking.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ggx;

impl Specular for Ggx {
    fn specular(&self, n: Vec3, l: Vec3, v: Vec3, params: &BrdfParams) -> f32 {
        let lobe = params.ggx;
        let alpha = lobe.alpha();
        let c = Cosines::new(n, l, v, params.grazing_epsilon);

        let d = ggx_d(c.n_dot_h, alpha);
        let f = schlick_fresnel(lobe.f0, c.l_dot_h);
        let g = smith_g_ggx(c.n_dot_l, c.n_dot_v, alpha);

        d * f * g / (4.0 * c.n_dot_l * c.n_dot_v)
    }
}

/// Reflected intensity at a surface point.
pub fn evaluate(n: Vec3, l: Vec3, v: Vec3, model: BrdfModel, params: &BrdfParams) -> f32 {
    let cos_l = n.dot(l);
    // Also catches NaN from a degenerate normal
    if !(cos_l > 0.0) {
        return 0.0;
    }

    let diffuse = params.kd / PI;
    let specular = model.specular(n, l, v, params);

    (diffuse + specular) * cos_l
}

/// Normal of the microfacet that mirrors `l` into `v`.
///
/// When `v == -l` there is no such facet; the surface normal is used.
#[inline]
fn half_vector(n: Vec3, l: Vec3, v: Vec3) -> Vec3 {
    (v + l).try_normalize().unwrap_or(n)
}

/// The cosines a microfacet lobe needs, clamped for use as divisors.
struct Cosines {
    n_dot_l: f32,
    n_dot_v: f32,
    n_dot_h: f32,
    v_dot_h: f32,
    l_dot_h: f32,
}

impl Cosines {
    fn new(n: Vec3, l: Vec3, v: Vec3, epsilon: f32) -> Self {
        let h = half_vector(n, l, v);
        Self {
            n_dot_l: n.dot(l).max(epsilon),
            n_dot_v: n.dot(v).max(epsilon),
            n_dot_h: n.dot(h).max(epsilon),
            v_dot_h: v.dot(h).max(epsilon),
            l_dot_h: l.dot(h),
        }
    }
}

/// (1 - cos)^5, the Schlick weight.
#[inline]
fn schlick_weight(cos_theta: f32) -> f32 {
    let x = (1.0 - cos_theta).clamp(0.0, 1.0);
    let x2 = x * x;
    x2 * x2 * x
}

#[inline]
fn schlick_fresnel(f0: f32, cos_theta: f32) -> f32 {
    f0 + (1.0 - f0) * schlick_weight(cos_theta)
}

/// Beckmann distribution.
#[inline]
fn beckmann_d(n_dot_h: f32, alpha: f32) -> f32 {
    let a2 = alpha * alpha;
    let c2 = n_dot_h * n_dot_h;
    ((c2 - 1.0) / (a2 * c2)).exp() / (PI * a2 * c2 * c2)
}

#[inline]
fn cook_torrance_g(n_dot_h: f32, n_dot_l: f32, n_dot_v: f32, v_dot_h: f32) -> f32 {
    let g_l = 2.0 * n_dot_h * n_dot_l / v_dot_h;
    let g_v = 2.0 * n_dot_h * n_dot_v / v_dot_h;
    1.0f32.min(g_l).min(g_v)
}

/// GGX/Trowbridge-Reitz distribution.
#[inline]
fn ggx_d(n_dot_h: f32, alpha: f32) -> f32 {
    let a2 = alpha * alpha;
    let denom = n_dot_h * n_dot_h * (a2 - 1.0) + 1.0;
    a2 / (PI * denom * denom)
}

/// Smith G for GGX.
#[inline]
fn smith_g_ggx(n_dot_l: f32, n_dot_v: f32, alpha: f32) -> f32 {
    let a2 = alpha * alpha;
    let g1_l = 2.0 * n_dot_l / (n_dot_l + (a2 + (1.0 - a2) * n_dot_l * n_dot_l).sqrt());
    let g1_v = 2.0 * n_dot_v / (n_dot_v + (a2 + (1.0 - a2) * n_dot_v * n_dot_v).sqrt());
    g1_l * g1_v
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const MODELS: [BrdfModel; 3] = [BrdfModel::BlinnPhong, BrdfModel::CookTorrance, BrdfModel::Ggx];

    fn random_unit(rng: &mut StdRng) -> Vec3 {
        loop {
            let v = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            let len2 = v.length_squared();
            if len2 > 1e-4 && len2 <= 1.0 {
                return v / len2.sqrt();
            }
        }
    }

    #[test]
    fn test_normal_incidence_baselines() {
        let params = BrdfParams::default();
        let n = Vec3::Y;

        let blinn = evaluate(n, n, n, BrdfModel::BlinnPhong, &params);
        let cook = evaluate(n, n, n, BrdfModel::CookTorrance, &params);
        let ggx = evaluate(n, n, n, BrdfModel::Ggx, &params);

        // kd / PI + ks
        assert!((blinn - 0.722_816_9).abs() < 1e-4, "blinn-phong {blinn}");
        // kd / PI + F0 / (4 PI alpha^2)
        assert!((cook - 7.384_789).abs() < 1e-3, "cook-torrance {cook}");
        assert!((ggx - 7.543_944).abs() < 1e-3, "ggx {ggx}");
    }

    #[test]
    fn test_outputs_finite_and_non_negative() {
        let mut rng = StdRng::seed_from_u64(7);
        let lobes = [
            Microfacet::new(0.0, 0.0),
            Microfacet::new(0.05, 0.04),
            Microfacet::new(0.1, 0.92),
            Microfacet::new(0.5, 0.5),
            Microfacet::new(1.0, 1.0),
        ];

        for lobe in lobes {
            let params = BrdfParams {
                shininess: rng.gen_range(0.0..64.0),
                cook_torrance: lobe,
                ggx: lobe,
                ..Default::default()
            };

            let mut checked = 0;
            while checked < 2000 {
                let n = random_unit(&mut rng);
                let l = random_unit(&mut rng);
                let v = random_unit(&mut rng);
                if n.dot(l) <= 0.0 || n.dot(v) <= 0.0 {
                    continue;
                }
                for model in MODELS {
                    let value = evaluate(n, l, v, model, &params);
                    assert!(value.is_finite(), "{model:?} {lobe:?} n={n} l={l} v={v}: {value}");
                    assert!(value >= 0.0, "{model:?} {lobe:?} n={n} l={l} v={v}: {value}");
                }
                checked += 1;
            }
        }
    }

    #[test]
    fn test_back_facing_light_is_exactly_zero() {
        let params = BrdfParams::default();
        let n = Vec3::Y;
        let v = Vec3::new(0.0, 1.0, 1.0).normalize();

        for l in [-Vec3::Y, Vec3::X, Vec3::new(0.3, -0.2, 0.9).normalize()] {
            for model in MODELS {
                assert_eq!(evaluate(n, l, v, model, &params), 0.0, "{model:?} l={l}");
            }
        }
    }

    #[test]
    fn test_grazing_and_hidden_view_stay_finite() {
        let params = BrdfParams::default();
        let n = Vec3::Y;
        let l = Vec3::new(1.0, 1e-6, 0.0).normalize();
        let views = [
            Vec3::Y,
            Vec3::X,
            -Vec3::Y,
            // v == -l: no half vector
            -l,
        ];

        for v in views {
            for model in MODELS {
                let value = evaluate(n, l, v, model, &params);
                assert!(value.is_finite() && value >= 0.0, "{model:?} v={v}: {value}");
            }
        }
    }

    #[test]
    fn test_opposite_view_falls_back_to_normal() {
        let n = Vec3::Y;
        let l = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert_eq!(half_vector(n, l, -l), n);
        assert_eq!(half_vector(n, n, n), n);
    }

    #[test]
    fn test_smith_g_matches_coupled_accumulation() {
        // The textbook separable form and a single accumulator divided by both
        // denominators then multiplied by 2 n.v are the same quantity.
        let alpha: f32 = 0.1;
        let a2 = alpha * alpha;
        for i in 1..=20 {
            for j in 1..=20 {
                let n_dot_l = i as f32 / 20.0;
                let n_dot_v = j as f32 / 20.0;

                let mut gi = 2.0 * n_dot_l;
                gi /= n_dot_l + (a2 + (1.0 - a2) * n_dot_l * n_dot_l).sqrt();
                let go = 2.0 * n_dot_v;
                gi /= n_dot_v + (a2 + (1.0 - a2) * n_dot_v * n_dot_v).sqrt();
                let coupled = gi * go;

                let separable = smith_g_ggx(n_dot_l, n_dot_v, alpha);
                assert!((coupled - separable).abs() < 1e-5, "{n_dot_l} {n_dot_v}");
            }
        }
    }

    #[test]
    fn test_schlick_weight() {
        assert_eq!(schlick_weight(1.0), 0.0);
        assert_eq!(schlick_weight(0.0), 1.0);
        assert!((schlick_weight(0.5) - 0.03125).abs() < 1e-6);
        assert_eq!(schlick_fresnel(0.9, 1.0), 0.9);
    }

    #[test]
    fn test_distributions_peak_at_normal() {
        let alpha = 0.3;
        assert!(ggx_d(1.0, alpha) > ggx_d(0.9, alpha));
        assert!(beckmann_d(1.0, alpha) > beckmann_d(0.9, alpha));
        assert!((ggx_d(1.0, alpha) - 1.0 / (PI * alpha * alpha)).abs() < 1e-3);
        assert!((beckmann_d(1.0, alpha) - 1.0 / (PI * alpha * alpha)).abs() < 1e-3);
    }

    #[test]
    fn test_blinn_phong_shininess_sharpens_lobe() {
        let n = Vec3::Y;
        let l = Vec3::new(1.0, 1.0, 0.0).normalize();
        let off_mirror = Vec3::new(-0.5, 1.0, 0.3).normalize();

        let broad = BrdfParams::default();
        let sharp = BrdfParams { shininess: 32.0, ..Default::default() };

        let a = BlinnPhong.specular(n, l, off_mirror, &broad);
        let b = BlinnPhong.specular(n, l, off_mirror, &sharp);
        assert!(a > b);
    }

    #[test]
    fn test_model_dispatch() {
        let params = BrdfParams::default();
        let n = Vec3::Y;
        let l = Vec3::new(0.2, 1.0, 0.1).normalize();
        let v = Vec3::new(-0.3, 1.0, 0.4).normalize();

        assert_eq!(BrdfModel::Ggx.specular(n, l, v, &params), Ggx.specular(n, l, v, &params));
        assert_eq!(
            BrdfModel::CookTorrance.specular(n, l, v, &params),
            CookTorrance.specular(n, l, v, &params)
        );
        assert_eq!(BrdfModel::default(), BrdfModel::Ggx);
    }
}
