use super::clause::{Clause, ClauseFamily};
use super::vars::{VarAllocator, VarBlock};

/// Clauses bounding how many of the `leaves` variables may be *false*.
///
/// Builds a balanced binary counting tree whose leaf literals are the
/// negations of the given variables, so a false leaf variable contributes one
/// to the count. Each internal node carries one variable per reachable partial
/// count, capped at `min(r, real leaves below the node)` — counts above the
/// threshold are never distinguished, which keeps the network polynomial.
/// Child counts propagate upward through 3-literal implications, counts past a
/// node's cap are blocked outright, and the root blocks every pair of child
/// counts summing to `r + 1`. The resulting formula is satisfiable (with the
/// node variables free) iff at most `r` of the leaf variables are false.
///
/// Levels allocate and emit top-down; a level whose nodes all share the same
/// cap `t` with uniform children of cap `t / 2` collapses into one template
/// with stride `t`, otherwise its nodes are expanded individually.
pub fn counting_families(
    r: u32,
    leaves: &VarBlock,
    vars: &mut VarAllocator,
) -> Vec<ClauseFamily> {
    let tree = TreePlan::allocate(r, leaves, vars);
    let mut families = Vec::new();

    for level in 1..tree.depth {
        families.push(tree.level_family(level));
    }
    families.push(tree.root_family(r));

    families
}

/// One internal node: `t` consecutive variables, one per count 1..=t.
#[derive(Debug, Clone, Copy)]
struct Node {
    first_var: u32,
    t: u32,
}

impl Node {
    fn lit(&self, count: u32) -> i32 {
        debug_assert!(count >= 1 && count <= self.t);
        (self.first_var + count - 1) as i32
    }
}

/// A child slot as seen from its parent: an internal counter, a single leaf
/// (which only ever reaches count 1), or padding beyond the last real leaf.
#[derive(Debug, Clone, Copy)]
enum Port {
    Counter(Node),
    Leaf(i32),
    Missing,
}

impl Port {
    fn t(&self) -> u32 {
        match self {
            Port::Counter(node) => node.t,
            Port::Leaf(_) => 1,
            Port::Missing => 0,
        }
    }

    fn lit(&self, count: u32) -> i32 {
        match self {
            Port::Counter(node) => node.lit(count),
            Port::Leaf(lit) => {
                debug_assert!(count == 1);
                *lit
            }
            Port::Missing => unreachable!("missing ports reach no count"),
        }
    }
}

struct TreePlan<'a> {
    r: u32,
    /// Number of real leaves.
    m: u32,
    /// Leaf slots per side of the conceptual complete tree: 2^depth >= m.
    depth: u32,
    leaves: &'a VarBlock,
    /// Internal levels 1..=depth-1, allocated top-down, nodes left to right.
    levels: Vec<Vec<Node>>,
}

impl<'a> TreePlan<'a> {
    fn allocate(r: u32, leaves: &'a VarBlock, vars: &mut VarAllocator) -> Self {
        let m = leaves.len();
        debug_assert!(m >= 2);
        let depth = 32 - (m - 1).leading_zeros();

        let mut levels = Vec::with_capacity(depth.saturating_sub(1) as usize);
        for level in 1..depth {
            let span = 1u32 << (depth - level);
            let nodes = (0..1u32 << level)
                .map(|q| {
                    let capacity = m.saturating_sub(q * span).min(span);
                    let t = r.min(capacity);
                    let block = vars.block(t);
                    Node {
                        first_var: if t > 0 { block.var(0) } else { 0 },
                        t,
                    }
                })
                .collect();
            levels.push(nodes);
        }

        Self {
            r,
            m,
            depth,
            leaves,
            levels,
        }
    }

    fn port(&self, level: u32, index: u32) -> Port {
        if level == self.depth {
            if index < self.m {
                Port::Leaf(self.leaves.neg(index))
            } else {
                Port::Missing
            }
        } else {
            Port::Counter(self.levels[level as usize - 1][index as usize])
        }
    }

    /// Implication and blocking clauses linking one node to its two children.
    fn node_clauses(&self, node: Node, left: Port, right: Port, out: &mut Vec<Clause>) {
        for j in 0..=right.t() {
            for i in 0..=left.t() {
                let reach = i + j;
                if reach == 0 {
                    continue;
                }
                if reach > node.t + 1 {
                    break;
                }
                let mut clause = Clause::new();
                if i > 0 {
                    clause.push(-left.lit(i));
                }
                if j > 0 {
                    clause.push(-right.lit(j));
                }
                if reach <= node.t {
                    clause.push(node.lit(reach));
                }
                if !out.contains(&clause) {
                    out.push(clause);
                }
            }
        }
    }

    fn level_family(&self, level: u32) -> ClauseFamily {
        let nodes = &self.levels[level as usize - 1];
        let child = |index: u32| self.port(level + 1, index);

        let t = nodes[0].t;
        let uniform = t > 0
            && t == 2 * child(0).t()
            && nodes.iter().all(|node| node.t == t)
            && (0..2 * nodes.len() as u32).all(|q| child(q).t() == child(0).t());

        if uniform {
            let mut base = Vec::new();
            self.node_clauses(nodes[0], child(0), child(1), &mut base);
            return ClauseFamily::templated(base, nodes.len() as u32, t);
        }

        let mut clauses = Vec::new();
        for (q, &node) in nodes.iter().enumerate() {
            let mut per_node = Vec::new();
            self.node_clauses(
                node,
                child(2 * q as u32),
                child(2 * q as u32 + 1),
                &mut per_node,
            );
            clauses.append(&mut per_node);
        }
        ClauseFamily::flat(clauses)
    }

    /// Blocks every split of `r + 1` counted leaves across the root's children.
    fn root_family(&self, r: u32) -> ClauseFamily {
        let left = self.port(1, 0);
        let right = self.port(1, 1);

        let mut clauses: Vec<Clause> = Vec::new();
        for j in 0..=right.t() {
            for i in 0..=left.t() {
                if i + j != r + 1 {
                    continue;
                }
                let mut clause = Clause::new();
                if i > 0 {
                    clause.push(-left.lit(i));
                }
                if j > 0 {
                    clause.push(-right.lit(j));
                }
                if !clauses.contains(&clause) {
                    clauses.push(clause);
                }
            }
        }
        ClauseFamily::flat(clauses)
    }
}
