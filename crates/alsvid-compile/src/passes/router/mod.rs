//! Routing passes: SWAP insertion over a connectivity graph.

mod heuristics;

pub use heuristics::DistanceMetric;

use alsvid_ir::{Ir, Qubit, Statement, catalog};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::connectivity::Connectivity;
use crate::error::{CompileError, CompileResult};
use crate::pass::Router;

use heuristics::grid_columns;

/// The running logical→physical assignment maintained during a routing sweep.
struct RoutingState {
    physical_of: Vec<u32>,
    logical_of: FxHashMap<u32, u32>,
}

impl RoutingState {
    fn identity(qubit_register_size: u32) -> Self {
        Self {
            physical_of: (0..qubit_register_size).collect(),
            logical_of: (0..qubit_register_size).map(|i| (i, i)).collect(),
        }
    }

    fn physical(&self, logical: Qubit) -> u32 {
        self.physical_of
            .get(logical.index())
            .copied()
            .unwrap_or(logical.0)
    }

    /// Record a SWAP of two physical qubits.
    fn swap(&mut self, physical_a: u32, physical_b: u32) {
        let logical_a = self.logical_of.get(&physical_a).copied();
        let logical_b = self.logical_of.get(&physical_b).copied();

        match logical_a {
            Some(l) => {
                self.physical_of[l as usize] = physical_b;
                self.logical_of.insert(physical_b, l);
            }
            None => {
                self.logical_of.remove(&physical_b);
            }
        }
        match logical_b {
            Some(l) => {
                self.physical_of[l as usize] = physical_a;
                self.logical_of.insert(physical_a, l);
            }
            None => {
                self.logical_of.remove(&physical_a);
            }
        }
    }
}

/// Shared routing sweep.
///
/// Walks the statement list with a mutable logical→physical mapping,
/// initially the identity. Two-qubit gates whose mapped endpoints are not
/// adjacent get a SWAP chain inserted along `pathfinder`'s path (every edge
/// but the last); all instructions then have their qubit indices rewritten
/// through the current mapping.
fn route_statements(
    ir: &mut Ir,
    qubit_register_size: u32,
    connectivity: &Connectivity,
    pathfinder: &dyn Fn(u32, u32) -> Option<Vec<u32>>,
) -> CompileResult<()> {
    let mut state = RoutingState::identity(qubit_register_size);
    let mut routed: Vec<Statement> = Vec::with_capacity(ir.statements.len());
    let mut inserted_swaps = 0usize;

    // The IR is only replaced on success; a routing failure leaves it intact.
    for statement in &ir.statements {
        let mut statement = statement.clone();
        if let Statement::Gate(gate) = &statement {
            let operands = gate.qubit_operands();
            if operands.len() == 2 {
                let physical_0 = state.physical(operands[0]);
                let physical_1 = state.physical(operands[1]);

                if !connectivity.is_connected(physical_0, physical_1) {
                    let path = pathfinder(physical_0, physical_1).ok_or(
                        CompileError::NoRoutingPath {
                            qubit_0: operands[0].0,
                            qubit_1: operands[1].0,
                        },
                    )?;
                    // The final edge is skipped: its endpoints host the gate.
                    for pair in path.windows(2).take(path.len().saturating_sub(2)) {
                        let swap = catalog::swap(Qubit(pair[0]), Qubit(pair[1]))?;
                        routed.push(Statement::Gate(swap));
                        state.swap(pair[0], pair[1]);
                        inserted_swaps += 1;
                    }
                }
            }
        }

        statement.map_qubits(&mut |q| Qubit(state.physical(q)));
        routed.push(statement);
    }

    debug!(inserted_swaps, "routing complete");
    ir.statements = routed;
    Ok(())
}

/// SWAP-inserting router using BFS shortest paths.
pub struct ShortestPathRouter {
    connectivity: Connectivity,
}

impl ShortestPathRouter {
    /// Create a router for the given connectivity.
    pub fn new(connectivity: Connectivity) -> Self {
        Self { connectivity }
    }
}

impl Router for ShortestPathRouter {
    fn route(&self, ir: &mut Ir, qubit_register_size: u32) -> CompileResult<()> {
        route_statements(ir, qubit_register_size, &self.connectivity, &|from, to| {
            self.connectivity.shortest_path(from, to)
        })
    }
}

/// SWAP-inserting router using A* with a configurable grid heuristic.
pub struct AStarRouter {
    connectivity: Connectivity,
    metric: Option<DistanceMetric>,
}

impl AStarRouter {
    /// Create an A* router without a heuristic (uniform-cost search).
    pub fn new(connectivity: Connectivity) -> Self {
        Self {
            connectivity,
            metric: None,
        }
    }

    /// Create an A* router with the given distance metric as heuristic.
    pub fn with_metric(connectivity: Connectivity, metric: DistanceMetric) -> Self {
        Self {
            connectivity,
            metric: Some(metric),
        }
    }
}

impl Router for AStarRouter {
    fn route(&self, ir: &mut Ir, qubit_register_size: u32) -> CompileResult<()> {
        let columns = grid_columns(self.connectivity.num_qubits());
        route_statements(ir, qubit_register_size, &self.connectivity, &|from, to| {
            match self.metric {
                Some(metric) => self.connectivity.astar_path(
                    from,
                    to,
                    Some(&move |node, goal| metric.distance(node, goal, columns)),
                ),
                None => self.connectivity.astar_path(from, to, None),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::{Bit, Measure, NonUnitary};

    fn line_circuit() -> Ir {
        let mut ir = Ir::new();
        for (c, t) in [(0, 1), (1, 2), (2, 3), (3, 4), (0, 4)] {
            ir.add_gate(catalog::cnot(Qubit(c), Qubit(t)).unwrap());
        }
        ir
    }

    fn swap_count(ir: &Ir) -> usize {
        ir.statements
            .iter()
            .filter(|s| s.instruction_name() == Some("SWAP"))
            .count()
    }

    fn assert_all_two_qubit_gates_adjacent(ir: &Ir, connectivity: &Connectivity) {
        for statement in &ir.statements {
            if let Some(gate) = statement.as_gate() {
                let operands = gate.qubit_operands();
                if operands.len() == 2 {
                    assert!(
                        connectivity.is_connected(operands[0].0, operands[1].0),
                        "gate {} on non-adjacent qubits {:?}",
                        gate.name(),
                        operands
                    );
                }
            }
        }
    }

    #[test]
    fn routes_distant_cnot_on_a_line() {
        let connectivity = Connectivity::linear(5);
        let mut ir = line_circuit();
        ShortestPathRouter::new(connectivity.clone())
            .route(&mut ir, 5)
            .unwrap();

        assert_eq!(swap_count(&ir), 3);
        assert_all_two_qubit_gates_adjacent(&ir, &connectivity);
        // The first four CNOTs are untouched.
        for statement in &ir.statements[..4] {
            assert_eq!(statement.instruction_name(), Some("CNOT"));
        }
    }

    #[test]
    fn astar_matches_shortest_path_swap_count() {
        for metric in [
            DistanceMetric::Manhattan,
            DistanceMetric::Euclidean,
            DistanceMetric::Chebyshev,
        ] {
            let connectivity = Connectivity::linear(5);
            let mut ir = line_circuit();
            AStarRouter::with_metric(connectivity.clone(), metric)
                .route(&mut ir, 5)
                .unwrap();
            assert_eq!(swap_count(&ir), 3);
            assert_all_two_qubit_gates_adjacent(&ir, &connectivity);
        }
    }

    #[test]
    fn adjacent_gates_are_untouched() {
        let connectivity = Connectivity::linear(3);
        let mut ir = Ir::new();
        ir.add_gate(catalog::cnot(Qubit(0), Qubit(1)).unwrap());
        ir.add_gate(catalog::h(Qubit(2)));
        let before = ir.clone();
        ShortestPathRouter::new(connectivity).route(&mut ir, 3).unwrap();
        assert_eq!(before, ir);
    }

    #[test]
    fn single_qubit_instructions_follow_the_mapping() {
        // After routing CNOT(0, 2) on a line, logical qubit 0 lives on
        // physical qubit 1; the trailing measure must follow it.
        let connectivity = Connectivity::linear(3);
        let mut ir = Ir::new();
        ir.add_gate(catalog::cnot(Qubit(0), Qubit(2)).unwrap());
        ir.add_non_unitary(NonUnitary::Measure(Measure::new(Qubit(0), Bit(0))));
        ShortestPathRouter::new(connectivity.clone())
            .route(&mut ir, 3)
            .unwrap();

        assert_eq!(swap_count(&ir), 1);
        assert_all_two_qubit_gates_adjacent(&ir, &connectivity);
        let Statement::NonUnitary(NonUnitary::Measure(measure)) =
            &ir.statements[ir.statements.len() - 1]
        else {
            panic!("expected trailing measure");
        };
        assert_eq!(measure.qubit, Qubit(1));
    }

    #[test]
    fn disconnected_qubits_fail() {
        let mut connectivity = Connectivity::new(4);
        connectivity.add_edge(0, 1);
        connectivity.add_edge(2, 3);
        let mut ir = Ir::new();
        ir.add_gate(catalog::cnot(Qubit(0), Qubit(3)).unwrap());
        let result = ShortestPathRouter::new(connectivity).route(&mut ir, 4);
        assert!(matches!(
            result,
            Err(CompileError::NoRoutingPath {
                qubit_0: 0,
                qubit_1: 3
            })
        ));
    }
}
