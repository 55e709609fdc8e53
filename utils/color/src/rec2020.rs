use crate::{Matrix3, Vec3, invert, multiply};

const ALPHA: f64 = 1.099_296_826_809_44;
const BETA: f64 = 0.018_053_968_510_807;

// https://www.w3.org/TR/css-color-4/#color-conversion-code
const LINEAR_REC2020_TO_XYZ: Matrix3 = [
    [0.636_958_048_301_291_4, 0.144_616_903_586_208_32, 0.168_880_975_164_172_1],
    [0.262_700_212_011_267_1, 0.677_998_071_518_870_8, 0.059_301_716_469_861_96],
    [0.0, 0.028_072_693_049_087_428, 1.060_985_057_710_791],
];

const XYZ_TO_LINEAR_REC2020: Matrix3 = invert(LINEAR_REC2020_TO_XYZ);

fn to_linear(c: f64) -> f64 {
    let abs = c.abs();
    if abs < BETA * 4.5 {
        c / 4.5
    } else {
        ((abs + ALPHA - 1.0) / ALPHA).powf(1.0 / 0.45).copysign(c)
    }
}

fn from_linear(c: f64) -> f64 {
    let abs = c.abs();
    if abs > BETA {
        ALPHA.mul_add(abs.powf(0.45), -(ALPHA - 1.0)).copysign(c)
    } else {
        4.5 * c
    }
}

pub(crate) fn to_xyz65(rgb: Vec3) -> Vec3 {
    multiply(&LINEAR_REC2020_TO_XYZ, rgb.map(to_linear))
}

pub(crate) fn from_xyz65(xyz: Vec3) -> Vec3 {
    multiply(&XYZ_TO_LINEAR_REC2020, xyz).map(from_linear)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_roundtrip() {
        for value in [-0.5_f64, 0.0, 0.01, 0.08, 0.5, 1.0, 1.1] {
            let recon = from_linear(to_linear(value));
            assert!((value - recon).abs() < 1e-9, "value {value} recon {recon}");
        }
    }
}
