//! Statement-fusion passes.

mod single_qubit;

pub use single_qubit::SingleQubitGatesMerger;

use alsvid_ir::math::{ATOL, acos_clamped};
use alsvid_ir::{Axis, BlochSphereRotation, GateName, Ir, Qubit, Statement};
use rustc_hash::FxHashSet;

/// Compose two Bloch sphere rotations on the same qubit; `a` is applied
/// first, then `b`.
///
/// Uses Rodrigues' rotation formula. The result keeps a catalog name only
/// when one side is the identity, or when both sides are the same one-angle
/// rotation (the axes then coincide and only the angle composes); it is
/// anonymous otherwise.
pub fn compose_bloch_sphere_rotations(
    a: &BlochSphereRotation,
    b: &BlochSphereRotation,
) -> BlochSphereRotation {
    debug_assert_eq!(
        a.qubit, b.qubit,
        "cannot merge rotations on different qubits"
    );

    // Composing with the identity is exact; keep the other side's name and
    // parameters untouched.
    if a.is_identity() {
        return b.clone();
    }
    if b.is_identity() {
        return a.clone();
    }

    let (sin_a, cos_a) = (a.angle / 2.0).sin_cos();
    let (sin_b, cos_b) = (b.angle / 2.0).sin_cos();

    let acos_argument = cos_a * cos_b - sin_a * sin_b * a.axis.dot(&b.axis);
    let combined_angle = 2.0 * acos_clamped(acos_argument);

    if (combined_angle / 2.0).sin().abs() < ATOL {
        return BlochSphereRotation::identity(a.qubit);
    }

    // Composite axis of U_b·U_a; note the cross product is n_b × n_a.
    let sin_half = (combined_angle / 2.0).sin();
    let cross = b.axis.cross(&a.axis);
    let mut combined_axis = [0.0f64; 3];
    for (k, value) in combined_axis.iter_mut().enumerate() {
        *value = round_to_atol_digits(
            (sin_a * cos_b * a.axis[k] + cos_a * sin_b * b.axis[k] + sin_a * sin_b * cross[k])
                / sin_half,
        );
    }
    let combined_phase = round_to_atol_digits(a.phase + b.phase);

    let name = if a.name == b.name
        && matches!(a.name, Some(GateName::Rx | GateName::Ry | GateName::Rz))
    {
        a.name
    } else {
        None
    };

    let axis = Axis::new(combined_axis).unwrap_or(a.axis);
    // The arccos above always yields a non-negative angle; for same-axis
    // merges that can flip the axis sign. `R(−n, θ) = R(n, −θ)` exactly, so
    // fold the sign into the angle and keep the catalog axis.
    let (axis, combined_angle) = if name.is_some() && axis.close_to_negated(&a.axis) {
        (a.axis, -combined_angle)
    } else {
        (axis, combined_angle)
    };

    let mut composed = BlochSphereRotation::new(a.qubit, axis, combined_angle, combined_phase);
    composed.name = name;
    composed
}

/// Round to the number of decimals matching `ATOL`, stabilizing axis
/// components and phases against float drift.
fn round_to_atol_digits(value: f64) -> f64 {
    (value * 1e7).round() / 1e7
}

/// Rearrange statements so that instructions not touching a barrier group's
/// qubits move before that group.
///
/// Consecutive barriers form "linked" groups that never split. A non-barrier
/// never moves ahead of another non-barrier, and a barrier never moves up;
/// assembly declarations stay in place. This maximizes local reordering
/// headroom for scheduling export.
pub fn rearrange_barriers(ir: &mut Ir) {
    let mut groups = group_linked_barriers(std::mem::take(&mut ir.statements));

    let mut index = 0;
    while index < groups.len() {
        let movable = matches!(
            groups[index].first(),
            Some(Statement::Gate(_) | Statement::NonUnitary(_))
        ) && !groups[index][0].is_barrier();

        if movable {
            let qubits: FxHashSet<Qubit> =
                groups[index][0].qubit_operands().into_iter().collect();
            let mut position = index;
            while position > 0 {
                let previous = &groups[position - 1];
                if !previous[0].is_barrier() {
                    break;
                }
                let blocked = previous
                    .iter()
                    .flat_map(Statement::qubit_operands)
                    .any(|q| qubits.contains(&q));
                if blocked {
                    break;
                }
                position -= 1;
            }
            if position < index {
                let group = groups.remove(index);
                groups.insert(position, group);
            }
        }
        index += 1;
    }

    ir.statements = groups.into_iter().flatten().collect();
}

/// Split statements into groups: each group is a single statement or a run of
/// consecutive barriers.
fn group_linked_barriers(statements: Vec<Statement>) -> Vec<Vec<Statement>> {
    let mut groups: Vec<Vec<Statement>> = vec![];
    let mut previous_was_barrier = false;
    for statement in statements {
        let is_barrier = statement.is_barrier();
        match groups.last_mut() {
            Some(group) if previous_was_barrier && is_barrier => group.push(statement),
            _ => groups.push(vec![statement]),
        }
        previous_was_barrier = is_barrier;
    }
    groups
}
