//! Local illumination of samples, normal is the volume gradient.

use nalgebra::Vector3;

use crate::volumetric::GradientVoxel;

use super::config::GoochParams;

pub const PHONG_AMBIENT: f32 = 0.1;
pub const PHONG_DIFFUSE: f32 = 0.7;
pub const PHONG_SPECULAR: f32 = 0.2;
pub const PHONG_SHININESS: f32 = 100.0;

/// Phong reflection model.
///
/// # Arguments
///
/// * `color` - material color
/// * `gradient` - gradient at the shaded point, used as the surface normal
/// * `light_dir` - unit vector towards the light
/// * `view_dir` - unit vector towards the viewer
///
/// Zero gradient has no normal, only ambient term is returned.
pub fn compute_phong_shading(
    color: &Vector3<f32>,
    gradient: &GradientVoxel,
    light_dir: &Vector3<f32>,
    view_dir: &Vector3<f32>,
) -> Vector3<f32> {
    let ambient = color * PHONG_AMBIENT;

    let normal = match surface_normal(gradient) {
        Some(n) => n,
        None => return ambient,
    };

    let n_dot_l = normal.dot(light_dir);
    let diffuse = color * (PHONG_DIFFUSE * f32::max(n_dot_l, 0.0));

    // reflect(-L, N)
    let reflected = 2.0 * n_dot_l * normal - light_dir;
    let r_dot_v = f32::max(reflected.dot(view_dir), 0.0);
    let specular = color * (PHONG_SPECULAR * r_dot_v.powf(PHONG_SHININESS));

    ambient + diffuse + specular
}

/// Gooch tone shading, blends from cool (facing away) to warm (facing the light)
pub fn compute_gooch_shading(
    color: &Vector3<f32>,
    gradient: &GradientVoxel,
    light_dir: &Vector3<f32>,
    params: &GoochParams,
) -> Vector3<f32> {
    let normal = match surface_normal(gradient) {
        Some(n) => n,
        None => return *color,
    };

    let t = (1.0 + normal.dot(light_dir)) / 2.0;

    let cool = Vector3::new(0.0, 0.0, params.blue) + color * params.cool_diffuse;
    let warm = Vector3::new(params.yellow, params.yellow, 0.0) + color * params.warm_diffuse;

    t * warm + (1.0 - t) * cool
}

fn surface_normal(gradient: &GradientVoxel) -> Option<Vector3<f32>> {
    if gradient.magnitude <= 0.0 {
        return None;
    }
    gradient.dir.try_normalize(f32::EPSILON)
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;

    fn assert_close(actual: Vector3<f32>, expected: Vector3<f32>) {
        assert!((actual - expected).norm() < 1e-5, "{actual} != {expected}");
    }

    #[test]
    fn phong_head_on() {
        // Light and viewer straight above the surface
        let color = vector![1.0, 0.5, 0.0];
        let gradient = GradientVoxel::new(vector![0.0, 0.0, 3.0]);
        let l = vector![0.0, 0.0, 1.0];

        let shaded = compute_phong_shading(&color, &gradient, &l, &l);

        let total = PHONG_AMBIENT + PHONG_DIFFUSE + PHONG_SPECULAR;
        assert_close(shaded, total * color);
    }

    #[test]
    fn phong_light_behind() {
        let color = vector![1.0, 1.0, 1.0];
        let gradient = GradientVoxel::new(vector![0.0, 0.0, 1.0]);
        let l = vector![0.0, 0.0, -1.0];
        let v = vector![0.0, 0.0, 1.0];

        let shaded = compute_phong_shading(&color, &gradient, &l, &v);

        assert_close(shaded, PHONG_AMBIENT * color);
    }

    #[test]
    fn phong_zero_gradient() {
        let color = vector![0.8, 0.8, 0.2];
        let l = vector![0.0, 1.0, 0.0];

        let shaded = compute_phong_shading(&color, &GradientVoxel::zero(), &l, &l);

        assert_close(shaded, PHONG_AMBIENT * color);
        assert!(shaded.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn phong_specular_off_mirror() {
        // Light at 45 degrees, viewer at the mirror direction gets full highlight
        let color = vector![1.0, 1.0, 1.0];
        let gradient = GradientVoxel::new(vector![0.0, 1.0, 0.0]);
        let l = vector![1.0, 1.0, 0.0].normalize();
        let mirror = vector![-1.0, 1.0, 0.0].normalize();

        let shaded = compute_phong_shading(&color, &gradient, &l, &mirror);
        let n_dot_l = l.y;
        let expected = PHONG_AMBIENT + PHONG_DIFFUSE * n_dot_l + PHONG_SPECULAR;
        assert_close(shaded, expected * color);
    }

    #[test]
    fn gooch_extremes() {
        let params = GoochParams::default();
        let color = vector![1.0, 0.0, 0.0];
        let gradient = GradientVoxel::new(vector![0.0, 2.0, 0.0]);

        let lit = compute_gooch_shading(&color, &gradient, &vector![0.0, 1.0, 0.0], &params);
        assert_close(lit, vector![0.4 + 0.6, 0.4, 0.0]);

        let unlit = compute_gooch_shading(&color, &gradient, &vector![0.0, -1.0, 0.0], &params);
        assert_close(unlit, vector![0.2, 0.0, 0.4]);

        let up = vector![0.0, 1.0, 0.0];
        let flat = compute_gooch_shading(&color, &GradientVoxel::zero(), &up, &params);
        assert_eq!(flat, color);
    }
}
