//! Render transform of a card
//!
//! The transform is an ordered list, applied left to right like a CSS
//! `transform` property. The order is fixed:
//!
//! ```text
//! perspective → rotateX (static tilt) → rotateZ → translateX → translateY → scale
//! ```
//!
//! Reordering changes the result: translating after the Z rotation moves the
//! card along its own tilted axes, not the screen's.

use std::fmt;

use smallvec::SmallVec;

/// One entry of a transform list
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformOp {
    /// Distance from the viewer to the z = 0 plane (px)
    Perspective(f32),
    /// Rotation around the X axis (degrees)
    RotateX(f32),
    /// Rotation around the Z axis (degrees)
    RotateZ(f32),
    TranslateX(f32),
    TranslateY(f32),
    /// Uniform scale
    Scale(f32),
}

impl TransformOp {
    /// Name of the operation, as in CSS
    pub fn name(&self) -> &'static str {
        match self {
            TransformOp::Perspective(_) => "perspective",
            TransformOp::RotateX(_) => "rotateX",
            TransformOp::RotateZ(_) => "rotateZ",
            TransformOp::TranslateX(_) => "translateX",
            TransformOp::TranslateY(_) => "translateY",
            TransformOp::Scale(_) => "scale",
        }
    }

    pub fn matrix(&self) -> Mat4 {
        match *self {
            TransformOp::Perspective(distance) => Mat4::perspective(distance),
            TransformOp::RotateX(deg) => Mat4::rotation_x(deg.to_radians()),
            TransformOp::RotateZ(deg) => Mat4::rotation_z(deg.to_radians()),
            TransformOp::TranslateX(x) => Mat4::translation(x, 0.0, 0.0),
            TransformOp::TranslateY(y) => Mat4::translation(0.0, y, 0.0),
            TransformOp::Scale(s) => Mat4::scale(s, s, 1.0),
        }
    }
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TransformOp::Perspective(d) => write!(f, "perspective({d}px)"),
            TransformOp::RotateX(deg) => write!(f, "rotateX({deg}deg)"),
            TransformOp::RotateZ(deg) => write!(f, "rotateZ({deg}deg)"),
            TransformOp::TranslateX(x) => write!(f, "translateX({x}px)"),
            TransformOp::TranslateY(y) => write!(f, "translateY({y}px)"),
            TransformOp::Scale(s) => write!(f, "scale({s})"),
        }
    }
}

/// The card's transform list
#[derive(Clone, Debug, PartialEq)]
pub struct CardTransform {
    ops: SmallVec<[TransformOp; 6]>,
}

impl CardTransform {
    /// Compose the list in its fixed order
    pub fn compose(
        perspective: f32,
        tilt_x_deg: f32,
        rotate_z_deg: f32,
        translate_x: f32,
        translate_y: f32,
        scale: f32,
    ) -> Self {
        let ops = SmallVec::from_buf([
            TransformOp::Perspective(perspective),
            TransformOp::RotateX(tilt_x_deg),
            TransformOp::RotateZ(rotate_z_deg),
            TransformOp::TranslateX(translate_x),
            TransformOp::TranslateY(translate_y),
            TransformOp::Scale(scale),
        ]);
        Self { ops }
    }

    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }

    /// Fold the list into a single matrix
    pub fn to_matrix(&self) -> Mat4 {
        self.ops
            .iter()
            .fold(Mat4::IDENTITY, |acc, op| acc.mul(&op.matrix()))
    }
}

impl fmt::Display for CardTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

/// 4x4 transformation matrix (column-major)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        Self {
            cols: [
                [x, 0.0, 0.0, 0.0],
                [0.0, y, 0.0, 0.0],
                [0.0, 0.0, z, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, c, s, 0.0],
                [0.0, -s, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            cols: [
                [c, s, 0.0, 0.0],
                [-s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// CSS-style perspective: the viewer sits `distance` px in front of z = 0
    pub fn perspective(distance: f32) -> Self {
        let mut m = Self::IDENTITY;
        if distance > 0.0 {
            m.cols[2][3] = -1.0 / distance;
        }
        m
    }

    /// Multiply two matrices (self * other)
    pub fn mul(&self, other: &Mat4) -> Mat4 {
        let mut result = [[0.0f32; 4]; 4];
        for (i, col) in result.iter_mut().enumerate() {
            for (j, cell) in col.iter_mut().enumerate() {
                for k in 0..4 {
                    *cell += self.cols[k][j] * other.cols[i][k];
                }
            }
        }
        Mat4 { cols: result }
    }

    /// Transform a point, with perspective divide
    pub fn transform_point(&self, x: f32, y: f32, z: f32) -> (f32, f32, f32) {
        let v = [x, y, z, 1.0];
        let mut out = [0.0f32; 4];
        for (row, cell) in out.iter_mut().enumerate() {
            *cell = (0..4).map(|k| self.cols[k][row] * v[k]).sum();
        }
        let w = if out[3].abs() > f32::EPSILON { out[3] } else { 1.0 };
        (out[0] / w, out[1] / w, out[2] / w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ORDER: [&str; 6] = [
        "perspective",
        "rotateX",
        "rotateZ",
        "translateX",
        "translateY",
        "scale",
    ];

    fn approx(a: (f32, f32, f32), b: (f32, f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-3 && (a.1 - b.1).abs() < 1e-3 && (a.2 - b.2).abs() < 1e-3
    }

    #[test]
    fn test_compose_fixed_order() {
        let transform = CardTransform::compose(1500.0, 30.0, -7.5, 12.0, -40.0, 1.1);
        let names: Vec<_> = transform.ops().iter().map(TransformOp::name).collect();
        assert_eq!(names, ORDER);
        assert_eq!(transform.ops()[2], TransformOp::RotateZ(-7.5));
        assert_eq!(transform.ops()[5], TransformOp::Scale(1.1));
    }

    #[test]
    fn test_display_as_css() {
        let transform = CardTransform::compose(1500.0, 30.0, 0.0, 10.0, -5.0, 1.0);
        assert_eq!(
            transform.to_string(),
            "perspective(1500px) rotateX(30deg) rotateZ(0deg) translateX(10px) translateY(-5px) scale(1)"
        );
    }

    #[test]
    fn test_rotation_z_quarter_turn() {
        let m = Mat4::rotation_z(std::f32::consts::FRAC_PI_2);
        assert!(approx(m.transform_point(1.0, 0.0, 0.0), (0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_translation_follows_rotation() {
        // translate after rotateZ(90°): +x moves the card down the screen
        let m = Mat4::rotation_z(std::f32::consts::FRAC_PI_2).mul(&Mat4::translation(10.0, 0.0, 0.0));
        assert!(approx(m.transform_point(0.0, 0.0, 0.0), (0.0, 10.0, 0.0)));

        let swapped =
            Mat4::translation(10.0, 0.0, 0.0).mul(&Mat4::rotation_z(std::f32::consts::FRAC_PI_2));
        assert!(approx(swapped.transform_point(0.0, 0.0, 0.0), (10.0, 0.0, 0.0)));
    }

    #[test]
    fn test_perspective_shrinks_receding_points() {
        let m = Mat4::perspective(1000.0);
        let (x, _, _) = m.transform_point(100.0, 0.0, -1000.0);
        assert!((x - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_rest_transform_keeps_center() {
        let m = CardTransform::compose(1500.0, 30.0, 0.0, 0.0, 0.0, 1.0).to_matrix();
        assert!(approx(m.transform_point(0.0, 0.0, 0.0), (0.0, 0.0, 0.0)));
    }

    proptest! {
        #[test]
        fn prop_order_is_independent_of_values(
            rot in -360.0f32..360.0,
            x in -2000.0f32..2000.0,
            y in -2000.0f32..2000.0,
            scale in 0.1f32..3.0,
        ) {
            let transform = CardTransform::compose(1500.0, 30.0, rot, x, y, scale);
            let names: Vec<_> = transform.ops().iter().map(TransformOp::name).collect();
            prop_assert_eq!(names, ORDER.to_vec());
        }
    }
}
