//! ABA decomposition: express a rotation as `R_a(θ3)·R_b(θ2)·R_a(θ1)` for a
//! fixed ordered axis pair (a, b).

use alsvid_ir::math::{ATOL, acos_clamped, are_axes_consecutive};
use alsvid_ir::{Axis, Gate, Qubit, catalog};

use crate::pass::Decomposer;

/// A Pauli rotation axis, indexed X=0, Y=1, Z=2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RotationAxis {
    /// X axis.
    X = 0,
    /// Y axis.
    Y = 1,
    /// Z axis.
    Z = 2,
}

impl RotationAxis {
    fn index(self) -> usize {
        self as usize
    }

    /// The named one-angle rotation gate around this axis.
    pub(crate) fn gate(self, qubit: Qubit, theta: f64) -> Gate {
        match self {
            RotationAxis::X => catalog::rx(qubit, theta),
            RotationAxis::Y => catalog::ry(qubit, theta),
            RotationAxis::Z => catalog::rz(qubit, theta),
        }
    }
}

/// The angles `(θ1, θ2, θ3)` such that the rotation by `alpha` around `axis`
/// equals `R_a(θ3)·R_b(θ2)·R_a(θ1)` up to a global phase.
///
/// `alpha` must be normalized to (−π, π] (every IR rotation is).
pub(crate) fn decomposition_angles(
    a: RotationAxis,
    b: RotationAxis,
    alpha: f64,
    axis: &Axis,
) -> (f64, f64, f64) {
    debug_assert!(a != b, "ABA axes must differ");
    debug_assert!(
        -std::f64::consts::PI + ATOL < alpha && alpha <= std::f64::consts::PI + ATOL,
        "angle must be normalized"
    );

    let index_a = a.index();
    let index_b = b.index();
    let index_c = 3 - index_a - index_b;

    let va = axis[index_a];
    let vb = axis[index_b];
    let vc = axis[index_c];

    let (sin_half, cos_half) = (alpha / 2.0).sin_cos();

    let primary = 2.0 * f64::atan2(va * sin_half, cos_half);

    let theta_2 = {
        let value = 2.0 * acos_clamped(cos_half * (1.0 + (va * (alpha / 2.0).tan()).powi(2)).sqrt());
        value.copysign(alpha)
    };

    let secondary = if (theta_2 / 2.0).sin().abs() < ATOL {
        // Anything works here; matching the primary angle makes θ3 = 0,
        // which is better for gate count.
        primary
    } else {
        let mut value = 2.0 * acos_clamped(vb * sin_half / (theta_2 / 2.0).sin());
        if std::f64::consts::PI - value.abs() > ATOL {
            value = value.copysign(2.0 * f64::atan2(vc, va));
        }
        value
    };

    let secondary = if are_axes_consecutive(index_a, index_b) {
        -secondary
    } else {
        secondary
    };

    let mut theta_1 = (primary + secondary) / 2.0;
    let mut theta_3 = primary - theta_1;

    if vb < 0.0 && vc < 0.0 {
        std::mem::swap(&mut theta_1, &mut theta_3);
    }

    (theta_1, theta_2, theta_3)
}

/// Drop identity gates from a decomposition result.
pub(crate) fn filter_out_identities(gates: Vec<Gate>) -> Vec<Gate> {
    gates.into_iter().filter(|g| !g.is_identity()).collect()
}

fn decompose_aba(a: RotationAxis, b: RotationAxis, gate: &Gate) -> Vec<Gate> {
    let Gate::BlochSphereRotation(rotation) = gate else {
        // Only Bloch sphere rotations decompose.
        return vec![gate.clone()];
    };
    let (theta_1, theta_2, theta_3) =
        decomposition_angles(a, b, rotation.angle, &rotation.axis);
    filter_out_identities(vec![
        a.gate(rotation.qubit, theta_1),
        b.gate(rotation.qubit, theta_2),
        a.gate(rotation.qubit, theta_3),
    ])
}

macro_rules! aba_decomposer {
    ($(#[$doc:meta])* $name:ident, $a:ident, $b:ident) => {
        $(#[$doc])*
        pub struct $name;

        impl Decomposer for $name {
            fn decompose(&self, gate: &Gate) -> Vec<Gate> {
                decompose_aba(RotationAxis::$a, RotationAxis::$b, gate)
            }
        }
    };
}

aba_decomposer!(
    /// X-Y-X decomposition.
    XyxDecomposer, X, Y
);
aba_decomposer!(
    /// X-Z-X decomposition.
    XzxDecomposer, X, Z
);
aba_decomposer!(
    /// Y-X-Y decomposition.
    YxyDecomposer, Y, X
);
aba_decomposer!(
    /// Y-Z-Y decomposition.
    YzyDecomposer, Y, Z
);
aba_decomposer!(
    /// Z-X-Z decomposition.
    ZxzDecomposer, Z, X
);
aba_decomposer!(
    /// Z-Y-Z decomposition.
    ZyzDecomposer, Z, Y
);
