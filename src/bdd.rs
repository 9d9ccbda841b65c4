//! The BDD manager.
//!
//! A [`Bdd`] owns every node of the diagrams built in it: the node arena, the
//! per-variable unique subtables, the computed table for ITE, the reference
//! counts, and the status fields consulted by the rebuilding algorithms
//! (`reordered` flag, error code, time limit, timeout handler).
//!
//! # Reference counting
//!
//! The count of a node covers every live incoming edge: parents in the unique
//! table, pins held by callers ([`Bdd::reference`]), and entries of transient
//! memo tables. [`Bdd::dereference`] never frees; a node whose count drops to
//! zero is *dead* and stays findable (and revivable) in the unique table until
//! [`Bdd::collect_garbage`] sweeps it.
//!
//! Public operations return their result *pinned*: the caller owns one
//! reference and releases it with [`Bdd::dereference`] when done. Operands
//! passed to operations must be pinned too (or be projection nodes, which the
//! manager pins forever), since node construction may collect garbage.
//!
//! # Failure
//!
//! Node construction fails with [`BddError::OutOfMemory`] once the live-node
//! limit is reached, with [`BddError::TimeoutExpired`] once the time limit has
//! passed, and with [`BddError::Reordered`] when it triggered dynamic
//! reordering. The last one is consumed by the retry harness of the public
//! operations and never reaches the caller.

use std::cell::{Cell, RefCell};
use std::cmp::min;
use std::collections::HashSet;
use std::fmt::Debug;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::cache::Cache;
use crate::error::{BddError, ErrorCode};
use crate::guard::RefGuard;
use crate::node::Node;
use crate::reference::Ref;
use crate::subtable::Subtable;
use crate::types::{Level, NodeId, Var};

/// Callback invoked by the retry harness when an operation hit the time limit.
pub type TimeoutHandler = Box<dyn Fn(&Bdd)>;

/// Construction parameters of a [`Bdd`] manager.
#[derive(Debug, Clone)]
pub struct BddConfig {
    /// Number of variables declared upfront.
    pub initial_vars: usize,
    /// Computed table size hint (in bits).
    pub cache_bits: usize,
    /// Dead node count that triggers garbage collection before an allocation.
    pub gc_threshold: usize,
    /// Maximum number of live nodes, `None` for unlimited.
    pub max_live: Option<usize>,
    /// Whether node construction may trigger dynamic reordering.
    pub auto_reorder: bool,
    /// Live node count at which the first dynamic reordering fires.
    pub reorder_threshold: usize,
    /// Maximum number of dynamic reorderings over the manager's lifetime.
    pub max_reorderings: usize,
    /// Time limit for operations, measured from the last start time reset.
    pub time_limit: Option<Duration>,
}

impl Default for BddConfig {
    fn default() -> Self {
        Self {
            initial_vars: 0,
            cache_bits: 16,
            gc_threshold: 1 << 14,
            max_live: None,
            auto_reorder: false,
            reorder_threshold: 4004,
            max_reorderings: usize::MAX,
            time_limit: None,
        }
    }
}

impl BddConfig {
    pub fn with_initial_vars(mut self, n: usize) -> Self {
        self.initial_vars = n;
        self
    }

    pub fn with_cache_bits(mut self, bits: usize) -> Self {
        self.cache_bits = bits;
        self
    }

    pub fn with_gc_threshold(mut self, threshold: usize) -> Self {
        self.gc_threshold = threshold;
        self
    }

    pub fn with_max_live(mut self, max_live: usize) -> Self {
        self.max_live = Some(max_live);
        self
    }

    /// Enables dynamic reordering, first firing at `threshold` live nodes.
    pub fn with_auto_reorder(mut self, threshold: usize) -> Self {
        self.auto_reorder = true;
        self.reorder_threshold = threshold;
        self
    }

    pub fn with_max_reorderings(mut self, n: usize) -> Self {
        self.max_reorderings = n;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

pub struct Bdd {
    config: BddConfig,
    nodes: RefCell<Vec<Node>>,
    free: RefCell<Vec<NodeId>>,
    subtables: RefCell<Vec<Subtable>>,
    /// Projection node of every variable, pinned by the manager.
    vars: RefCell<Vec<Ref>>,
    /// Variable at each level.
    var_order: RefCell<Vec<Var>>,
    /// Level of each variable.
    level_map: RefCell<Vec<Level>>,
    cache: RefCell<Cache<(Ref, Ref, Ref), Ref>>,
    /// Number of decision nodes in the unique table.
    keys: Cell<usize>,
    /// Number of decision nodes with a zero reference count.
    dead: Cell<usize>,
    gc_runs: Cell<usize>,
    max_live: Cell<Option<usize>>,
    pub(crate) auto_reorder: Cell<bool>,
    pub(crate) next_reorder: Cell<usize>,
    pub(crate) reorderings_left: Cell<usize>,
    pub(crate) reorderings: Cell<usize>,
    pub(crate) reordered: Cell<bool>,
    pub(crate) error_code: Cell<ErrorCode>,
    time_limit: Cell<Option<Duration>>,
    start_time: Cell<Instant>,
    pub(crate) timeout_handler: RefCell<Option<TimeoutHandler>>,
}

impl Bdd {
    pub fn new(config: BddConfig) -> Self {
        // Slot 0 is a sentinel, slot 1 is the terminal.
        let nodes = vec![Node::TERMINAL, Node::TERMINAL];

        let bdd = Self {
            nodes: RefCell::new(nodes),
            free: RefCell::new(Vec::new()),
            subtables: RefCell::new(Vec::new()),
            vars: RefCell::new(Vec::new()),
            var_order: RefCell::new(Vec::new()),
            level_map: RefCell::new(Vec::new()),
            cache: RefCell::new(Cache::new(min(config.cache_bits, 20))),
            keys: Cell::new(0),
            dead: Cell::new(0),
            gc_runs: Cell::new(0),
            max_live: Cell::new(config.max_live),
            auto_reorder: Cell::new(config.auto_reorder),
            next_reorder: Cell::new(config.reorder_threshold),
            reorderings_left: Cell::new(config.max_reorderings),
            reorderings: Cell::new(0),
            reordered: Cell::new(false),
            error_code: Cell::new(ErrorCode::NoError),
            time_limit: Cell::new(config.time_limit),
            start_time: Cell::new(Instant::now()),
            timeout_handler: RefCell::new(None),
            config,
        };
        if bdd.config.initial_vars > 0 {
            bdd.mk_var(Var::new(bdd.config.initial_vars as u32 - 1));
        }
        bdd
    }

    /// Creates a manager with `n` variables declared upfront.
    pub fn with_vars(n: usize) -> Self {
        Self::new(BddConfig::default().with_initial_vars(n))
    }
}

impl Default for Bdd {
    fn default() -> Self {
        Bdd::new(BddConfig::default())
    }
}

impl Debug for Bdd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bdd")
            .field("vars", &self.num_vars())
            .field("nodes", &self.num_nodes())
            .field("live", &self.num_live())
            .field("reorderings", &self.reorderings.get())
            .finish()
    }
}

// Structure accessors.
impl Bdd {
    pub fn config(&self) -> &BddConfig {
        &self.config
    }

    pub fn one(&self) -> Ref {
        Ref::positive(NodeId::ONE)
    }
    pub fn zero(&self) -> Ref {
        Ref::negative(NodeId::ONE)
    }

    pub fn is_zero(&self, node: Ref) -> bool {
        node == self.zero()
    }
    pub fn is_one(&self, node: Ref) -> bool {
        node == self.one()
    }
    pub fn is_terminal(&self, node: Ref) -> bool {
        node.id().is_terminal()
    }

    pub fn node(&self, id: NodeId) -> Node {
        self.nodes.borrow()[id.index()]
    }
    pub fn variable(&self, id: NodeId) -> Var {
        self.nodes.borrow()[id.index()].variable
    }
    pub fn low(&self, id: NodeId) -> Ref {
        self.nodes.borrow()[id.index()].low
    }
    pub fn high(&self, id: NodeId) -> Ref {
        self.nodes.borrow()[id.index()].high
    }

    /// Low (else) child of the function, with the edge polarity pushed down.
    pub fn low_node(&self, node: Ref) -> Ref {
        self.low(node.id()).negate_if(node.is_negated())
    }
    /// High (then) child of the function, with the edge polarity pushed down.
    pub fn high_node(&self, node: Ref) -> Ref {
        self.high(node.id()).negate_if(node.is_negated())
    }

    /// Reference count of the node behind the edge.
    pub fn ref_count(&self, node: Ref) -> u32 {
        self.nodes.borrow()[node.id().index()].rc
    }

    pub fn num_vars(&self) -> usize {
        self.var_order.borrow().len()
    }

    /// Number of decision nodes in the unique table, dead ones included.
    pub fn num_nodes(&self) -> usize {
        self.keys.get()
    }
    pub fn num_dead(&self) -> usize {
        self.dead.get()
    }
    pub fn num_live(&self) -> usize {
        self.keys.get() - self.dead.get()
    }
    pub fn gc_runs(&self) -> usize {
        self.gc_runs.get()
    }

    pub fn level(&self, var: Var) -> Level {
        self.level_map.borrow()[var.index()]
    }
    pub fn var_at_level(&self, level: Level) -> Var {
        self.var_order.borrow()[level.index()]
    }
    pub fn var_order(&self) -> Vec<Var> {
        self.var_order.borrow().clone()
    }

    /// Level of the top variable of `node`; the terminal is below every level.
    pub fn level_of(&self, node: Ref) -> Level {
        if self.is_terminal(node) {
            Level::TERMINAL
        } else {
            self.level(self.variable(node.id()))
        }
    }

    pub(crate) fn subtable_ids(&self, var: Var) -> Vec<NodeId> {
        self.subtables.borrow()[var.index()].ids().collect()
    }
    pub(crate) fn subtable_len(&self, var: Var) -> usize {
        self.subtables.borrow()[var.index()].len()
    }

    /// Removes a node from its subtable, leaving its slot and counts intact.
    pub(crate) fn detach(&self, id: NodeId) {
        let node = self.node(id);
        self.subtables.borrow_mut()[node.variable.index()].remove(node.low, node.high);
    }

    /// Rewrites a detached node in place and files it under its new variable.
    ///
    /// Reference counts of the old and new children are the caller's business.
    pub(crate) fn relocate(&self, id: NodeId, var: Var, low: Ref, high: Ref) {
        {
            let mut nodes = self.nodes.borrow_mut();
            let node = &mut nodes[id.index()];
            node.variable = var;
            node.low = low;
            node.high = high;
        }
        self.subtables.borrow_mut()[var.index()].insert(low, high, id);
    }

    /// Exchanges the variables at `level` and the level below it.
    pub(crate) fn exchange_levels(&self, level: Level) {
        let mut order = self.var_order.borrow_mut();
        let mut levels = self.level_map.borrow_mut();
        order.swap(level.index(), level.next().index());
        levels[order[level.index()].index()] = level;
        levels[order[level.next().index()].index()] = level.next();
    }

    pub(crate) fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }
}

// Reference counting and garbage collection.
impl Bdd {
    /// Pins the node behind `node`.
    pub fn reference(&self, node: Ref) {
        if self.is_terminal(node) {
            return;
        }
        let mut nodes = self.nodes.borrow_mut();
        let n = &mut nodes[node.id().index()];
        if n.rc == 0 {
            self.dead.set(self.dead.get() - 1);
        }
        n.rc = n.rc.saturating_add(1);
    }

    /// Releases one pin of the node behind `node`. Never frees.
    pub fn dereference(&self, node: Ref) {
        if self.is_terminal(node) {
            return;
        }
        let mut nodes = self.nodes.borrow_mut();
        let n = &mut nodes[node.id().index()];
        assert!(n.rc > 0, "Dereferencing dead node {}", node);
        if n.rc == u32::MAX {
            // Saturated counts are never decremented.
            return;
        }
        n.rc -= 1;
        if n.rc == 0 {
            self.dead.set(self.dead.get() + 1);
        }
    }

    /// Pins `node` and hands the pin to the caller.
    pub(crate) fn pin(&self, node: Ref) -> Ref {
        self.reference(node);
        node
    }

    /// Sweeps every dead node, top level first, and clears the computed table.
    ///
    /// Returns the number of freed nodes.
    pub fn collect_garbage(&self) -> usize {
        self.cache.borrow_mut().clear();
        self.gc_runs.set(self.gc_runs.get() + 1);

        if self.dead.get() == 0 {
            return 0;
        }

        // Children always sit at deeper levels, so releasing a dead node's
        // edges before visiting those levels frees whole dead sub-graphs in one pass.
        let mut freed = 0;
        for var in self.var_order() {
            let dead_ids: Vec<NodeId> = {
                let nodes = self.nodes.borrow();
                self.subtables.borrow()[var.index()]
                    .ids()
                    .filter(|id| nodes[id.index()].is_dead())
                    .collect()
            };
            for id in dead_ids {
                let node = self.node(id);
                self.subtables.borrow_mut()[var.index()].remove(node.low, node.high);
                self.dereference(node.low);
                self.dereference(node.high);
                self.free.borrow_mut().push(id);
                self.keys.set(self.keys.get() - 1);
                self.dead.set(self.dead.get() - 1);
                freed += 1;
            }
        }

        info!("Garbage collection freed {} nodes, {} live", freed, self.num_live());
        freed
    }
}

// Node construction.
impl Bdd {
    /// Declares variables up to and including `var`, each at the bottom level.
    pub fn ensure_var(&self, var: Var) {
        while self.num_vars() <= var.index() {
            let v = Var::new(self.num_vars() as u32);
            let level = Level::new(self.num_vars());
            debug!("Declaring variable {} at level {}", v, level);

            self.subtables.borrow_mut().push(Subtable::new(v));
            self.var_order.borrow_mut().push(v);
            self.level_map.borrow_mut().push(level);

            let projection = self.find_or_alloc(v, self.zero(), self.one());
            self.reference(projection);
            self.vars.borrow_mut().push(projection);
        }
    }

    /// Declares a fresh variable at the bottom level.
    pub fn new_var(&self) -> Var {
        let var = Var::new(self.num_vars() as u32);
        self.ensure_var(var);
        var
    }

    /// Projection function of `var`, declaring the variable if needed.
    ///
    /// The returned node is pinned by the manager; callers must not release it.
    pub fn mk_var(&self, var: Var) -> Ref {
        self.ensure_var(var);
        self.vars.borrow()[var.index()]
    }

    /// Finds or allocates the node `(var, low, high)` without any of the
    /// checks performed by [`unique_inter`](Self::unique_inter).
    ///
    /// Used where allocation must not fail: variable declaration and reordering.
    pub(crate) fn find_or_alloc(&self, var: Var, low: Ref, high: Ref) -> Ref {
        if low == high {
            return low;
        }
        if high.is_negated() {
            return -self.find_or_alloc(var, -low, -high);
        }
        debug_assert!(self.level(var) < self.level_of(low), "Level order violated: {} above {}", var, low);
        debug_assert!(self.level(var) < self.level_of(high), "Level order violated: {} above {}", var, high);

        if let Some(id) = self.subtables.borrow()[var.index()].find(low, high) {
            return Ref::positive(id);
        }
        Ref::positive(self.alloc(var, low, high))
    }

    fn alloc(&self, var: Var, low: Ref, high: Ref) -> NodeId {
        let node = Node::new(var, low, high);
        let id = match self.free.borrow_mut().pop() {
            Some(id) => {
                self.nodes.borrow_mut()[id.index()] = node;
                id
            }
            None => {
                let mut nodes = self.nodes.borrow_mut();
                let id = NodeId::new(nodes.len() as u32);
                nodes.push(node);
                id
            }
        };
        self.subtables.borrow_mut()[var.index()].insert(low, high, id);
        self.keys.set(self.keys.get() + 1);
        self.dead.set(self.dead.get() + 1);
        self.reference(low);
        self.reference(high);
        id
    }

    /// Finds or creates the canonical node `(var, low, high)`.
    ///
    /// The result is not pinned. Both children must be pinned by the caller,
    /// since this may collect garbage or reorder before allocating.
    pub fn unique_inter(&self, var: Var, low: Ref, high: Ref) -> Result<Ref, BddError> {
        if low == high {
            return Ok(low);
        }
        if high.is_negated() {
            return Ok(-self.unique_inter(var, -low, -high)?);
        }

        if let Some(id) = self.subtables.borrow()[var.index()].find(low, high) {
            return Ok(Ref::positive(id));
        }

        if self.time_limit_expired() {
            warn!("Time limit expired while allocating a node for {}", var);
            self.error_code.set(ErrorCode::TimeoutExpired);
            return Err(BddError::TimeoutExpired);
        }

        if self.auto_reorder.get() && self.reorderings_left.get() > 0 && self.num_live() >= self.next_reorder.get() {
            self.reorderings_left.set(self.reorderings_left.get() - 1);
            self.reduce_heap();
            self.reordered.set(true);
            return Err(BddError::Reordered);
        }

        if self.dead.get() > self.config.gc_threshold {
            self.collect_garbage();
        }

        if let Some(max_live) = self.max_live.get() {
            if self.num_live() >= max_live {
                self.collect_garbage();
            }
            if self.num_live() >= max_live {
                warn!("Live node limit {} reached", max_live);
                self.error_code.set(ErrorCode::MemoryOut);
                return Err(BddError::OutOfMemory);
            }
        }

        Ok(self.find_or_alloc(var, low, high))
    }

    /// Cofactors of `node` with respect to the variable at `level`.
    pub fn top_cofactors(&self, node: Ref, level: Level) -> (Ref, Ref) {
        if self.level_of(node) != level {
            return (node, node);
        }
        (self.low_node(node), self.high_node(node))
    }

    /// Recursive step of ITE.
    ///
    /// ```text
    /// ITE(x, y, z) = (x ∧ y) ∨ (¬x ∧ z)
    /// ```
    ///
    /// The result is not pinned. Operands must be pinned by the caller.
    pub fn ite_rec(&self, f: Ref, g: Ref, h: Ref) -> Result<Ref, BddError> {
        debug!("ite_rec(f = {}, g = {}, h = {})", f, g, h);

        // Base cases:
        //   ite(1,G,H) => G
        //   ite(0,G,H) => H
        if self.is_one(f) {
            return Ok(g);
        }
        if self.is_zero(f) {
            return Ok(h);
        }

        // More base cases:
        //   ite(F,G,G) => G
        //   ite(F,1,0) => F
        //   ite(F,0,1) => ~F
        if g == h {
            return Ok(g);
        }
        if self.is_one(g) && self.is_zero(h) {
            return Ok(f);
        }
        if self.is_zero(g) && self.is_one(h) {
            return Ok(-f);
        }

        // Standard triples:
        //   ite(F,F,H) => ite(F,1,H)
        //   ite(F,G,F) => ite(F,G,0)
        //   ite(F,~F,H) => ite(F,0,H)
        //   ite(F,G,~F) => ite(F,G,1)
        if g == f {
            return self.ite_rec(f, self.one(), h);
        }
        if h == f {
            return self.ite_rec(f, g, self.zero());
        }
        if g == -f {
            return self.ite_rec(f, self.zero(), h);
        }
        if h == -f {
            return self.ite_rec(f, g, self.one());
        }

        let i = self.level_of(f);
        let j = self.level_of(g);
        let k = self.level_of(h);

        // Equivalent pairs (choose the one with the topmost first argument):
        //   ite(F,1,H) == ite(H,1,F) == F ∨ H
        //   ite(F,G,0) == ite(G,F,0) == F ∧ G
        //   ite(F,G,1) == ite(~G,~F,1) == F -> G
        //   ite(F,0,H) == ite(~H,0,~F) == ~F ∧ H
        if self.is_one(g) && k < i {
            return self.ite_rec(h, self.one(), f);
        }
        if self.is_zero(h) && j < i {
            return self.ite_rec(g, f, self.zero());
        }
        if self.is_one(h) && j < i {
            return self.ite_rec(-g, -f, self.one());
        }
        if self.is_zero(g) && k < i {
            return self.ite_rec(-h, self.zero(), -f);
        }

        // ite(~F,G,H) => ite(F,H,G)
        let (f, g, h) = if f.is_negated() { (-f, h, g) } else { (f, g, h) };
        // ite(F,~G,H) => ~ite(F,G,~H)
        let (g, h, n) = if g.is_negated() { (-g, -h, true) } else { (g, h, false) };

        let key = (f, g, h);
        if let Some(&res) = self.cache.borrow_mut().get(&key) {
            debug!("cache: ite(f = {}, g = {}, h = {}) -> {}", f, g, h, res);
            return Ok(res.negate_if(n));
        }

        let m = i.min(j).min(k);
        let var = self.var_at_level(m);

        let (f0, f1) = self.top_cofactors(f, m);
        let (g0, g1) = self.top_cofactors(g, m);
        let (h0, h1) = self.top_cofactors(h, m);

        let t = RefGuard::new(self, self.ite_rec(f1, g1, h1)?);
        let e = RefGuard::new(self, self.ite_rec(f0, g0, h0)?);
        let res = self.unique_inter(var, e.get(), t.get())?;
        debug!("computed: ite(f = {}, g = {}, h = {}) -> {}", f, g, h, res);

        self.cache.borrow_mut().insert(key, res);
        Ok(res.negate_if(n))
    }
}

// Public operations.
impl Bdd {
    /// Apply the ITE operation to the arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use bdd_bridge::bdd::Bdd;
    /// use bdd_bridge::types::Var;
    ///
    /// let bdd = Bdd::default();
    /// let x = bdd.mk_var(Var::new(0));
    /// let y = bdd.mk_var(Var::new(1));
    /// let z = bdd.mk_var(Var::new(2));
    /// let f = bdd.apply_ite(x, y, z).unwrap();
    /// let x_and_y = bdd.apply_and(x, y).unwrap();
    /// let not_x_and_z = bdd.apply_and(-x, z).unwrap();
    /// assert_eq!(f, bdd.apply_or(x_and_y, not_x_and_z).unwrap());
    /// ```
    pub fn apply_ite(&self, f: Ref, g: Ref, h: Ref) -> Result<Ref, BddError> {
        debug!("apply_ite(f = {}, g = {}, h = {})", f, g, h);
        self.retrying(|| self.ite_rec(f, g, h).map(|res| self.pin(res)))
    }

    pub fn apply_not(&self, f: Ref) -> Ref {
        debug!("apply_not(f = {})", f);
        self.pin(-f)
    }

    pub fn apply_and(&self, u: Ref, v: Ref) -> Result<Ref, BddError> {
        debug!("apply_and(u = {}, v = {})", u, v);
        self.apply_ite(u, v, self.zero())
    }

    pub fn apply_or(&self, u: Ref, v: Ref) -> Result<Ref, BddError> {
        debug!("apply_or(u = {}, v = {})", u, v);
        self.apply_ite(u, self.one(), v)
    }

    pub fn apply_xor(&self, u: Ref, v: Ref) -> Result<Ref, BddError> {
        debug!("apply_xor(u = {}, v = {})", u, v);
        self.apply_ite(u, -v, v)
    }

    pub fn apply_eq(&self, u: Ref, v: Ref) -> Result<Ref, BddError> {
        debug!("apply_eq(u = {}, v = {})", u, v);
        self.apply_ite(u, v, -v)
    }

    pub fn apply_imply(&self, u: Ref, v: Ref) -> Result<Ref, BddError> {
        debug!("apply_imply(u = {}, v = {})", u, v);
        self.apply_ite(u, v, self.one())
    }

    pub fn apply_and_many(&self, nodes: impl IntoIterator<Item = Ref>) -> Result<Ref, BddError> {
        debug!("apply_and_many(...)");
        let mut res = self.one();
        for node in nodes {
            let next = self.apply_and(res, node);
            self.dereference(res);
            res = next?;
        }
        Ok(res)
    }

    pub fn apply_or_many(&self, nodes: impl IntoIterator<Item = Ref>) -> Result<Ref, BddError> {
        debug!("apply_or_many(...)");
        let mut res = self.zero();
        for node in nodes {
            let next = self.apply_or(res, node);
            self.dereference(res);
            res = next?;
        }
        Ok(res)
    }
}

// Status fields.
impl Bdd {
    /// Whether dynamic reordering fired during the last attempt.
    pub fn reordered(&self) -> bool {
        self.reordered.get()
    }

    /// Number of reorderings performed so far.
    pub fn reorderings(&self) -> usize {
        self.reorderings.get()
    }

    pub fn error_code(&self) -> ErrorCode {
        self.error_code.get()
    }
    pub fn clear_error_code(&self) {
        self.error_code.set(ErrorCode::NoError);
    }

    pub fn enable_auto_reorder(&self) {
        self.auto_reorder.set(true);
    }
    pub fn disable_auto_reorder(&self) {
        self.auto_reorder.set(false);
    }
    pub fn auto_reorder_enabled(&self) -> bool {
        self.auto_reorder.get()
    }

    /// Live node count at which the next dynamic reordering fires.
    pub fn next_reorder(&self) -> usize {
        self.next_reorder.get()
    }
    pub fn set_next_reorder(&self, threshold: usize) {
        self.next_reorder.set(threshold);
    }

    pub fn max_live(&self) -> Option<usize> {
        self.max_live.get()
    }
    pub fn set_max_live(&self, max_live: Option<usize>) {
        self.max_live.set(max_live);
    }

    pub fn set_time_limit(&self, limit: Duration) {
        self.time_limit.set(Some(limit));
    }
    pub fn unset_time_limit(&self) {
        self.time_limit.set(None);
    }
    pub fn reset_start_time(&self) {
        self.start_time.set(Instant::now());
    }
    pub fn time_limit_expired(&self) -> bool {
        match self.time_limit.get() {
            Some(limit) => self.start_time.get().elapsed() >= limit,
            None => false,
        }
    }

    /// Registers the callback invoked after an operation that hit the time limit.
    ///
    /// Arguments for the handler are captured by the closure.
    pub fn register_timeout_handler(&self, handler: impl Fn(&Bdd) + 'static) {
        *self.timeout_handler.borrow_mut() = Some(Box::new(handler));
    }
    pub fn unregister_timeout_handler(&self) {
        self.timeout_handler.borrow_mut().take();
    }
}

// Inspection.
impl Bdd {
    /// Distinct node ids reachable from `nodes`, terminal included.
    pub fn descendants(&self, nodes: impl IntoIterator<Item = Ref>) -> HashSet<NodeId> {
        let mut visited = HashSet::new();
        let mut stack: Vec<Ref> = nodes.into_iter().collect();

        while let Some(node) = stack.pop() {
            if visited.insert(node.id()) && !self.is_terminal(node) {
                stack.push(self.low(node.id()));
                stack.push(self.high(node.id()));
            }
        }

        visited
    }

    /// Number of nodes in the diagram of `f`, terminal included.
    pub fn size(&self, f: Ref) -> usize {
        self.descendants([f]).len()
    }

    /// Variables `f` depends on, sorted by index.
    pub fn support(&self, f: Ref) -> Vec<Var> {
        let mut vars: Vec<Var> = self
            .descendants([f])
            .into_iter()
            .filter(|id| !id.is_terminal())
            .map(|id| self.variable(id))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        vars.sort();
        vars
    }

    pub fn to_bracket_string(&self, node: Ref) -> String {
        if self.is_zero(node) {
            return "(0)".to_string();
        } else if self.is_one(node) {
            return "(1)".to_string();
        }

        let v = self.variable(node.id());
        let low = self.low_node(node);
        let high = self.high_node(node);

        format!(
            "{}:({}, {}, {})",
            node,
            v,
            self.to_bracket_string(high),
            self.to_bracket_string(low)
        )
    }
}
