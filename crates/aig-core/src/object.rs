use crate::edge::{Edge, ObjectId};

/// Which fanin slot of a consumer object a fanout entry refers back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaninSlot {
    /// `fanin0` / `faninC0`.
    Zero,
    /// `fanin1` / `faninC1`.
    One,
}

/// A single "who points at me" fanout record, valid only between
/// `fanout_start` and `fanout_stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanoutEntry {
    /// The object consuming this node as a fanin.
    pub consumer: ObjectId,
    /// Which fanin slot on the consumer.
    pub slot: FaninSlot,
}

/// The tagged variant of an AIG object (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// The single global constant-1 sentinel.
    Const1,
    /// Primary input.
    Pi,
    /// Primary output.
    Po,
    /// Two-input AND gate.
    And,
    /// Register / latch.
    Latch,
    /// Latch-input pseudo-PO (drives the register).
    Bi,
    /// Latch-output pseudo-PI (the register's combinational-side value).
    Bo,
}

impl ObjectKind {
    /// Whether this kind has PI-class fanin semantics, i.e. no fanin of its
    /// own (used by the forward-retime precondition check).
    pub const fn is_pi_class(self) -> bool {
        matches!(self, ObjectKind::Const1 | ObjectKind::Pi | ObjectKind::Bo)
    }
}

/// A single AIG object (§3).
#[derive(Debug, Clone)]
pub struct Object {
    pub(crate) id: ObjectId,
    pub(crate) kind: ObjectKind,
    /// Position within this object's terminal class (PI/PO/LI/LO); `None`
    /// for And and Const1.
    pub(crate) pio_num: Option<u32>,
    /// First fanin edge. Meaningful for And, and for single-fanin Po/Bi/Latch.
    pub(crate) fanin0: Option<Edge>,
    /// Second fanin edge. Meaningful only for And.
    pub(crate) fanin1: Option<Edge>,
    /// Simulation value under the all-zero input assignment.
    pub(crate) f_phase: bool,
    /// Paired latch/Bi/Bo object id, for Latch/Bi/Bo objects.
    pub(crate) pair: Option<ObjectId>,
    pub(crate) fanouts: Option<Vec<FanoutEntry>>,
}

impl Object {
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn pio_num(&self) -> Option<u32> {
        self.pio_num
    }

    pub fn fanin0(&self) -> Option<Edge> {
        self.fanin0
    }

    pub fn fanin1(&self) -> Option<Edge> {
        self.fanin1
    }

    pub fn f_phase(&self) -> bool {
        self.f_phase
    }

    pub fn pair(&self) -> Option<ObjectId> {
        self.pair
    }

    pub fn fanouts(&self) -> Option<&[FanoutEntry]> {
        self.fanouts.as_deref()
    }
}
