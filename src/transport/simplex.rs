//! Transportation simplex solver.
//!
//! Solves the balanced transportation problem
//!
//! ```text
//! min Σ f[i][j] · c[i][j]   s.t.  Σ_j f[i][j] = s[i],  Σ_i f[i][j] = d[j],  f >= 0
//! ```
//!
//! ## Algorithm
//!
//! 1. **Start**: least-cost method. Cells are visited cheapest first and each
//!    allocation closes exactly one row or column, which yields a spanning
//!    tree of `n + m - 1` basic cells (some possibly carrying zero flow).
//! 2. **Potentials**: `u[i] + v[j] = c[i][j]` on every basic cell, solved by
//!    walking the tree from `u[0] = 0`.
//! 3. **Pricing**: the non-basic cell with the most negative reduced cost
//!    `c[i][j] - u[i] - v[j]` enters. Stop when none is below `-tolerance`.
//! 4. **Pivot**: the entering cell closes a unique cycle in the tree. Flow
//!    `θ` is shifted around it; the first minus-cell reaching zero leaves.
//!
//! Every pivot keeps the solution feasible and never increases its cost, so
//! hitting the pivot cap still returns a valid upper bound.

use crate::error::{DrishtiError, Result};

use super::config::{ImbalancePolicy, TransportConfig};
use super::cost::CostMatrix;

/// Result of a transport solve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransportSolution {
    /// Minimum total transport cost found.
    pub total_cost: f64,
    /// Simplex pivots performed.
    pub pivots: usize,
    /// Whether optimality was reached within the pivot cap.
    pub converged: bool,
}

/// Optimal transport solver over weighted point sets.
#[derive(Clone, Debug, Default)]
pub struct TransportSolver {
    config: TransportConfig,
}

impl TransportSolver {
    /// Create a solver.
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Get configuration.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Compute the minimum cost of moving `supplies` (rows) onto `demands`
    /// (columns).
    ///
    /// # Errors
    /// - [`DrishtiError::DimensionMismatch`] if `costs` does not match the
    ///   mass vectors
    /// - [`DrishtiError::InvalidMass`] for negative or non-finite masses
    /// - [`DrishtiError::DegenerateInput`] if either side has zero total mass
    pub fn solve(
        &self,
        supplies: &[f64],
        demands: &[f64],
        costs: &CostMatrix,
    ) -> Result<TransportSolution> {
        if costs.rows() != supplies.len() {
            return Err(DrishtiError::DimensionMismatch {
                expected: supplies.len(),
                actual: costs.rows(),
            });
        }
        if costs.cols() != demands.len() {
            return Err(DrishtiError::DimensionMismatch {
                expected: demands.len(),
                actual: costs.cols(),
            });
        }
        let supply_total = checked_total("supplies", supplies)?;
        let demand_total = checked_total("demands", demands)?;

        let mut problem = Problem::compact(supplies, demands, costs);
        problem.balance(supply_total, demand_total, &self.config);

        let mut simplex = Simplex::start(problem);
        let outcome = simplex.optimize(self.config.tolerance, self.config.max_iterations);

        if !outcome.converged {
            log::warn!(
                "Transport simplex hit pivot cap ({}) before tolerance {}; using cost {:.6}",
                self.config.max_iterations,
                self.config.tolerance,
                outcome.total_cost
            );
        }

        Ok(outcome)
    }
}

/// Validate masses and return their sum.
fn checked_total(side: &'static str, masses: &[f64]) -> Result<f64> {
    let mut total = 0.0;
    for (index, &value) in masses.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(DrishtiError::InvalidMass { side, index, value });
        }
        total += value;
    }
    if total <= 0.0 {
        return Err(DrishtiError::DegenerateInput(side));
    }
    Ok(total)
}

/// Balanced problem over the rows and columns that carry mass.
struct Problem {
    supply: Vec<f64>,
    demand: Vec<f64>,
    /// Row-major `supply.len() x demand.len()`.
    cost: Vec<f64>,
}

impl Problem {
    /// Drop zero-mass rows and columns.
    fn compact(supplies: &[f64], demands: &[f64], costs: &CostMatrix) -> Self {
        let rows: Vec<usize> = (0..supplies.len()).filter(|&i| supplies[i] > 0.0).collect();
        let cols: Vec<usize> = (0..demands.len()).filter(|&j| demands[j] > 0.0).collect();

        let mut cost = Vec::with_capacity(rows.len() * cols.len());
        for &i in &rows {
            let row = costs.row(i);
            cost.extend(cols.iter().map(|&j| row[j]));
        }

        Self {
            supply: rows.iter().map(|&i| supplies[i]).collect(),
            demand: cols.iter().map(|&j| demands[j]).collect(),
            cost,
        }
    }

    /// Make both totals equal.
    ///
    /// Differences within `tolerance` are treated as noise and absorbed by
    /// rescaling demands. Larger ones follow the configured policy.
    fn balance(&mut self, supply_total: f64, demand_total: f64, config: &TransportConfig) {
        let gap = supply_total - demand_total;
        if gap == 0.0 {
            return;
        }

        if gap.abs() <= config.tolerance {
            scale(&mut self.demand, supply_total / demand_total);
            return;
        }

        log::debug!(
            "Transport imbalance {:.6} (supply {:.6}, demand {:.6}), policy {:?}",
            gap,
            supply_total,
            demand_total,
            config.imbalance
        );

        match config.imbalance {
            ImbalancePolicy::ScaleToMatch => {
                if gap < 0.0 {
                    scale(&mut self.supply, demand_total / supply_total);
                } else {
                    scale(&mut self.demand, supply_total / demand_total);
                }
            }
            ImbalancePolicy::DummyNode => {
                if gap < 0.0 {
                    // Dummy supplier covering the missing supply at no cost
                    self.supply.push(-gap);
                    self.cost.extend(std::iter::repeat_n(0.0, self.demand.len()));
                } else {
                    // Dummy consumer absorbing the surplus at no cost
                    let cols = self.demand.len();
                    let mut cost = Vec::with_capacity(self.supply.len() * (cols + 1));
                    for row in self.cost.chunks(cols) {
                        cost.extend_from_slice(row);
                        cost.push(0.0);
                    }
                    self.cost = cost;
                    self.demand.push(gap);
                }
            }
        }
    }
}

fn scale(values: &mut [f64], factor: f64) {
    for v in values {
        *v *= factor;
    }
}

/// A basic cell of the current solution.
#[derive(Clone, Copy, Debug)]
struct BasicCell {
    row: usize,
    col: usize,
    flow: f64,
}

/// Simplex state. Nodes `0..n` are rows, `n..n+m` are columns.
struct Simplex {
    n: usize,
    m: usize,
    cost: Vec<f64>,
    basis: Vec<BasicCell>,
    in_basis: Vec<bool>,
    u: Vec<f64>,
    v: Vec<f64>,
    /// Basic cells touching each node.
    adjacency: Vec<Vec<usize>>,
}

impl Simplex {
    /// Least-cost initial basic feasible solution.
    fn start(problem: Problem) -> Self {
        let Problem {
            supply,
            demand,
            cost,
        } = problem;
        let n = supply.len();
        let m = demand.len();

        let mut order: Vec<usize> = (0..n * m).collect();
        order.sort_by(|&a, &b| cost[a].total_cmp(&cost[b]));

        let mut remaining_supply = supply;
        let mut remaining_demand = demand;
        let mut row_open = vec![true; n];
        let mut col_open = vec![true; m];
        let mut open_rows = n;
        let mut open_cols = m;
        let target = n + m - 1;

        let mut basis = Vec::with_capacity(target);
        let mut in_basis = vec![false; n * m];

        for idx in order {
            if basis.len() == target {
                break;
            }
            let (i, j) = (idx / m, idx % m);
            if !row_open[i] || !col_open[j] {
                continue;
            }

            let flow = remaining_supply[i].min(remaining_demand[j]);
            remaining_supply[i] -= flow;
            remaining_demand[j] -= flow;
            basis.push(BasicCell { row: i, col: j, flow });
            in_basis[idx] = true;

            // Close exactly one line; never the last open row or column
            let close_row = if open_rows == 1 {
                false
            } else if open_cols == 1 {
                true
            } else {
                remaining_supply[i] <= 0.0
            };
            if close_row {
                row_open[i] = false;
                open_rows -= 1;
            } else {
                col_open[j] = false;
                open_cols -= 1;
            }
        }
        debug_assert_eq!(basis.len(), target);

        Self {
            n,
            m,
            cost,
            basis,
            in_basis,
            u: vec![0.0; n],
            v: vec![0.0; m],
            adjacency: vec![Vec::new(); n + m],
        }
    }

    /// Run MODI pivots until no reduced cost is below `-tolerance`.
    fn optimize(&mut self, tolerance: f64, max_pivots: usize) -> TransportSolution {
        let cost_scale = self.cost.iter().copied().fold(1.0, f64::max);
        let threshold = -tolerance.max(1e-12 * cost_scale);

        let mut pivots = 0;
        let converged = loop {
            self.rebuild_adjacency();
            self.compute_potentials();

            let Some((row, col)) = self.entering_cell(threshold) else {
                break true;
            };
            if pivots == max_pivots {
                break false;
            }
            self.pivot(row, col);
            pivots += 1;
        };

        TransportSolution {
            total_cost: self.total_cost(),
            pivots,
            converged,
        }
    }

    fn rebuild_adjacency(&mut self) {
        for list in &mut self.adjacency {
            list.clear();
        }
        for (k, cell) in self.basis.iter().enumerate() {
            self.adjacency[cell.row].push(k);
            self.adjacency[self.n + cell.col].push(k);
        }
    }

    /// Node on the other end of basic cell `k` as seen from `node`.
    #[inline]
    fn other_end(&self, node: usize, k: usize) -> usize {
        let cell = self.basis[k];
        if node < self.n {
            self.n + cell.col
        } else {
            cell.row
        }
    }

    fn compute_potentials(&mut self) {
        let nodes = self.n + self.m;
        let mut known = vec![false; nodes];
        let mut stack = Vec::with_capacity(nodes);

        self.u[0] = 0.0;
        known[0] = true;
        stack.push(0);

        while let Some(node) = stack.pop() {
            for &k in &self.adjacency[node] {
                let cell = self.basis[k];
                let c = self.cost[cell.row * self.m + cell.col];
                let other = self.other_end(node, k);
                if known[other] {
                    continue;
                }
                if other < self.n {
                    self.u[cell.row] = c - self.v[cell.col];
                } else {
                    self.v[cell.col] = c - self.u[cell.row];
                }
                known[other] = true;
                stack.push(other);
            }
        }
    }

    /// Non-basic cell with the most negative reduced cost below `threshold`.
    fn entering_cell(&self, threshold: f64) -> Option<(usize, usize)> {
        let mut best = None;
        let mut best_reduced = threshold;
        for i in 0..self.n {
            let ui = self.u[i];
            let row = &self.cost[i * self.m..(i + 1) * self.m];
            for (j, &c) in row.iter().enumerate() {
                let reduced = c - ui - self.v[j];
                if reduced < best_reduced && !self.in_basis[i * self.m + j] {
                    best_reduced = reduced;
                    best = Some((i, j));
                }
            }
        }
        best
    }

    /// Tree path from column node of `col` back to row node of `row`, as
    /// basic cell indices.
    fn tree_path(&self, row: usize, col: usize) -> Vec<usize> {
        let nodes = self.n + self.m;
        let from = row;
        let to = self.n + col;

        let mut parent = vec![usize::MAX; nodes];
        let mut visited = vec![false; nodes];
        let mut stack = vec![from];
        visited[from] = true;

        while let Some(node) = stack.pop() {
            if node == to {
                break;
            }
            for &k in &self.adjacency[node] {
                let other = self.other_end(node, k);
                if !visited[other] {
                    visited[other] = true;
                    parent[other] = k;
                    stack.push(other);
                }
            }
        }

        let mut path = Vec::new();
        let mut node = to;
        while node != from {
            let k = parent[node];
            path.push(k);
            node = self.other_end(node, k);
        }
        path
    }

    fn pivot(&mut self, row: usize, col: usize) {
        // Entering cell gains flow; cells along the path alternate, starting
        // with a loss at the cell sharing the entering column.
        let path = self.tree_path(row, col);

        let mut leaving = path[0];
        let mut theta = self.basis[leaving].flow;
        for &k in path.iter().step_by(2).skip(1) {
            if self.basis[k].flow < theta {
                theta = self.basis[k].flow;
                leaving = k;
            }
        }

        for (position, &k) in path.iter().enumerate() {
            if position % 2 == 0 {
                self.basis[k].flow -= theta;
            } else {
                self.basis[k].flow += theta;
            }
        }

        let old = self.basis[leaving];
        self.in_basis[old.row * self.m + old.col] = false;
        self.in_basis[row * self.m + col] = true;
        self.basis[leaving] = BasicCell {
            row,
            col,
            flow: theta,
        };
    }

    fn total_cost(&self) -> f64 {
        self.basis
            .iter()
            .map(|cell| cell.flow.max(0.0) * self.cost[cell.row * self.m + cell.col])
            .sum::<f64>()
            .max(0.0)
    }
}
