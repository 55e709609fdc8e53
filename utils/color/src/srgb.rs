use crate::{Matrix3, Vec3, invert, multiply};

// https://www.w3.org/TR/css-color-4/#color-conversion-code
const LINEAR_SRGB_TO_XYZ: Matrix3 = [
    [0.412_390_799_265_959_5, 0.357_584_339_383_878, 0.180_480_788_401_834_3],
    [0.212_639_005_871_510_27, 0.715_168_678_767_756, 0.072_192_315_360_733_71],
    [0.019_330_818_715_591_82, 0.119_194_779_794_625_98, 0.950_532_152_249_660_6],
];

const XYZ_TO_LINEAR_SRGB: Matrix3 = invert(LINEAR_SRGB_TO_XYZ);

/// Decodes a gamma-encoded channel. Negative input keeps its sign.
pub(crate) fn srgb_to_linear(c: f64) -> f64 {
    let abs = c.abs();
    if abs <= 0.04045 {
        c / 12.92
    } else {
        ((abs + 0.055) / 1.055).powf(2.4).copysign(c)
    }
}

/// Encodes a linear channel. Negative input keeps its sign.
pub(crate) fn linear_to_srgb(c: f64) -> f64 {
    let abs = c.abs();
    if abs <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055_f64.mul_add(abs.powf(1.0 / 2.4), -0.055).copysign(c)
    }
}

pub(crate) fn decode(rgb: Vec3) -> Vec3 {
    rgb.map(srgb_to_linear)
}

pub(crate) fn encode(linear: Vec3) -> Vec3 {
    linear.map(linear_to_srgb)
}

pub(crate) fn to_xyz65(rgb: Vec3) -> Vec3 {
    multiply(&LINEAR_SRGB_TO_XYZ, decode(rgb))
}

pub(crate) fn from_xyz65(xyz: Vec3) -> Vec3 {
    encode(multiply(&XYZ_TO_LINEAR_SRGB, xyz))
}
