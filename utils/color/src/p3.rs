use crate::{
    Matrix3, Vec3, invert, multiply,
    srgb::{decode, encode},
};

// Display P3 shares the sRGB transfer function.
// https://www.w3.org/TR/css-color-4/#color-conversion-code
const LINEAR_P3_TO_XYZ: Matrix3 = [
    [0.486_570_948_648_216_2, 0.265_667_693_169_093_06, 0.198_217_285_234_362_5],
    [0.228_974_564_069_748_8, 0.691_738_521_836_506_4, 0.079_286_914_093_745],
    [0.0, 0.045_113_381_858_902_64, 1.043_944_368_900_976],
];

const XYZ_TO_LINEAR_P3: Matrix3 = invert(LINEAR_P3_TO_XYZ);

pub(crate) fn to_xyz65(rgb: Vec3) -> Vec3 {
    multiply(&LINEAR_P3_TO_XYZ, decode(rgb))
}

pub(crate) fn from_xyz65(xyz: Vec3) -> Vec3 {
    encode(multiply(&XYZ_TO_LINEAR_P3, xyz))
}
