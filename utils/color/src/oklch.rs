use crate::{Matrix3, Vec3, invert, multiply};

// https://www.w3.org/TR/css-color-4/#color-conversion-code
const XYZ_TO_LMS: Matrix3 = [
    [0.819_022_437_996_703, 0.361_906_260_052_890_4, -0.128_873_781_520_987_9],
    [0.032_983_653_932_388_5, 0.929_286_861_586_343_4, 0.036_144_666_350_642_4],
    [0.048_177_189_359_624_2, 0.264_239_531_752_743_2, 0.633_547_828_469_430_9],
];

const LMS_TO_XYZ: Matrix3 = invert(XYZ_TO_LMS);

const LMS_TO_OKLAB: Matrix3 = [
    [0.210_454_268_309_314, 0.793_617_774_702_305_4, -0.004_072_043_011_619_3],
    [1.977_998_532_431_168_4, -2.428_592_242_048_58, 0.450_593_709_617_411],
    [0.025_904_042_465_547_8, 0.782_771_712_457_529_6, -0.808_675_766_031_067_9],
];

const OKLAB_TO_LMS: Matrix3 = invert(LMS_TO_OKLAB);

pub(crate) fn from_xyz65(xyz: Vec3) -> Vec3 {
    let lms = multiply(&XYZ_TO_LMS, xyz).map(f64::cbrt);
    multiply(&LMS_TO_OKLAB, lms)
}

pub(crate) fn to_xyz65(lab: Vec3) -> Vec3 {
    let lms = multiply(&OKLAB_TO_LMS, lab).map(|c| c.powi(3));
    multiply(&LMS_TO_XYZ, lms)
}
