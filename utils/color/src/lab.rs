use crate::{Matrix3, Vec3, invert, multiply};

const KAPPA: f64 = 24_389.0 / 27.0;
const EPSILON: f64 = 216.0 / 24_389.0;

// D50 reference white, from the CIE 1931 chromaticity (0.3457, 0.3585).
const D50: Vec3 = [
    0.3457 / 0.3585,
    1.0,
    (1.0 - 0.3457 - 0.3585) / 0.3585,
];

// Bradford chromatic adaptation.
const D65_TO_D50: Matrix3 = [
    [1.047_929_820_840_548_8, 0.022_946_793_341_019_088, -0.050_192_229_543_135_57],
    [0.029_627_815_688_159_344, 0.990_434_484_573_249, -0.017_073_825_029_385_14],
    [-0.009_243_058_152_591_178, 0.015_055_144_896_577_895, 0.751_874_289_958_000_8],
];

const D50_TO_D65: Matrix3 = invert(D65_TO_D50);

fn f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        KAPPA.mul_add(t, 16.0) / 116.0
    }
}

fn f_inv(t: f64) -> f64 {
    let cubed = t.powi(3);
    if cubed > EPSILON {
        cubed
    } else {
        116.0_f64.mul_add(t, -16.0) / KAPPA
    }
}

pub(crate) fn from_xyz65(xyz: Vec3) -> Vec3 {
    let [x, y, z] = multiply(&D65_TO_D50, xyz);
    let fx = f(x / D50[0]);
    let fy = f(y / D50[1]);
    let fz = f(z / D50[2]);
    [
        116.0_f64.mul_add(fy, -16.0),
        500.0 * (fx - fy),
        200.0 * (fy - fz),
    ]
}

pub(crate) fn to_xyz65([l, a, b]: Vec3) -> Vec3 {
    let fy = (l + 16.0) / 116.0;
    let fx = a / 500.0 + fy;
    let fz = fy - b / 200.0;
    let y = if l > KAPPA * EPSILON {
        fy.powi(3)
    } else {
        l / KAPPA
    };
    multiply(
        &D50_TO_D65,
        [f_inv(fx) * D50[0], y * D50[1], f_inv(fz) * D50[2]],
    )
}
