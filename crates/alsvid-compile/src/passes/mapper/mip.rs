//! Initial placement by mixed-integer programming.
//!
//! Follows the OpenQL `place_mip` formulation: minimize the total two-qubit
//! interaction cost under the connectivity distance, with small tie-break
//! penalties preferring the identity placement and lower physical indices.
//! The linearized objective collapses to
//!
//! ```text
//! min  Σ_{i,j} r[i][j]·d[σ(i)][σ(j)]  +  ε·|{i : σ(i) ≠ i}|  +  ε²·Σ_i σ(i)
//! ```
//!
//! over injective assignments σ, which this implementation solves exactly
//! with a depth-first branch-and-bound.

use std::time::{Duration, Instant};

use alsvid_ir::{Ir, Statement};
use tracing::debug;

use super::Mapping;
use crate::connectivity::Connectivity;
use crate::error::{CompileError, CompileResult};
use crate::pass::Mapper;

/// Sentinel distance for unreachable qubit pairs.
const DISTANCE_UL: u64 = 999_999;

const EPSILON: f64 = 1e-6;

/// Mapper minimizing total two-qubit interaction distance.
pub struct MipMapper {
    connectivity: Connectivity,
    timeout: Option<Duration>,
}

impl MipMapper {
    /// Create a mapper for the given connectivity, without a time limit.
    pub fn new(connectivity: Connectivity) -> Self {
        Self {
            connectivity,
            timeout: None,
        }
    }

    /// Create a mapper that fails with `MipTimeout` when the search exceeds
    /// `timeout`.
    pub fn with_timeout(connectivity: Connectivity, timeout: Duration) -> Self {
        Self {
            connectivity,
            timeout: Some(timeout),
        }
    }

    /// All-pairs shortest-path distances (Floyd–Warshall) with a large
    /// sentinel for unreachable pairs.
    fn distance_matrix(&self) -> Vec<Vec<u64>> {
        let n = self.connectivity.num_qubits() as usize;
        let mut distance = vec![vec![DISTANCE_UL; n]; n];
        for (i, row) in distance.iter_mut().enumerate() {
            row[i] = 0;
        }
        for from in 0..n as u32 {
            for to in self.connectivity.neighbors(from) {
                distance[from as usize][to as usize] = 1;
            }
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    let through = distance[i][k].saturating_add(distance[k][j]);
                    if distance[i][j] > through {
                        distance[i][j] = through;
                    }
                }
            }
        }
        distance
    }

    /// Symmetric counts of two-qubit gates between virtual qubit pairs.
    fn reference_counter(ir: &Ir, num_virtual: usize) -> Vec<Vec<u64>> {
        let mut counts = vec![vec![0u64; num_virtual]; num_virtual];
        for statement in &ir.statements {
            let Statement::Gate(gate) = statement else {
                continue;
            };
            let operands = gate.qubit_operands();
            if operands.len() == 2 {
                let (a, b) = (operands[0].index(), operands[1].index());
                if a < num_virtual && b < num_virtual {
                    counts[a][b] += 1;
                    counts[b][a] += 1;
                }
            }
        }
        counts
    }
}

struct Search<'a> {
    distance: &'a [Vec<u64>],
    counts: &'a [Vec<u64>],
    num_virtual: usize,
    num_physical: usize,
    deadline: Option<Instant>,
    best_cost: f64,
    best: Option<Vec<u32>>,
    assignment: Vec<u32>,
    used: Vec<bool>,
}

impl Search<'_> {
    fn run(&mut self, virtual_index: usize, cost: f64) -> CompileResult<()> {
        if let Some(deadline) = self.deadline {
            if Instant::now() > deadline {
                return Err(CompileError::MipTimeout);
            }
        }
        if cost >= self.best_cost {
            return Ok(());
        }
        if virtual_index == self.num_virtual {
            self.best_cost = cost;
            self.best = Some(self.assignment.clone());
            return Ok(());
        }

        for physical in 0..self.num_physical {
            if self.used[physical] {
                continue;
            }
            // Interaction cost against already-placed qubits, both ordered
            // directions, plus the identity and index tie-breakers.
            let mut step = 0.0;
            for (other, &placed) in self.assignment.iter().enumerate() {
                let pair_cost = self.counts[virtual_index][other]
                    * self.distance[physical][placed as usize];
                step += 2.0 * pair_cost as f64;
            }
            if physical != virtual_index {
                step += EPSILON;
            }
            step += EPSILON * EPSILON * physical as f64;

            self.used[physical] = true;
            self.assignment.push(physical as u32);
            self.run(virtual_index + 1, cost + step)?;
            self.assignment.pop();
            self.used[physical] = false;
        }
        Ok(())
    }
}

impl Mapper for MipMapper {
    fn map(&self, ir: &Ir, qubit_register_size: u32) -> CompileResult<Mapping> {
        let num_physical = self.connectivity.num_qubits();
        if qubit_register_size > num_physical {
            return Err(CompileError::MipInfeasible {
                virtual_qubits: qubit_register_size,
                physical_qubits: num_physical,
            });
        }

        let distance = self.distance_matrix();
        let counts = Self::reference_counter(ir, qubit_register_size as usize);

        let mut search = Search {
            distance: &distance,
            counts: &counts,
            num_virtual: qubit_register_size as usize,
            num_physical: num_physical as usize,
            deadline: self.timeout.map(|t| Instant::now() + t),
            best_cost: f64::INFINITY,
            best: None,
            assignment: Vec::with_capacity(qubit_register_size as usize),
            used: vec![false; num_physical as usize],
        };
        search.run(0, 0.0)?;

        let placement = search.best.ok_or(CompileError::MipInfeasible {
            virtual_qubits: qubit_register_size,
            physical_qubits: num_physical,
        })?;
        debug!(cost = search.best_cost, "MIP placement found");

        // The placement is injective into the physical qubits; extend it with
        // the unused physicals so the mapping is a full permutation.
        let mut physical = placement;
        let mut used = vec![false; num_physical as usize];
        for &p in &physical {
            used[p as usize] = true;
        }
        physical.extend((0..num_physical).filter(|&p| !used[p as usize]));
        Mapping::new(physical)
    }
}
