//! Decision variables and their raw values.

use crate::time::{Day, TimeUnit};

/// Index of a variable within a [`ConstraintSystem`](super::ConstraintSystem).
pub type VarId = usize;

/// An inclusive integer domain `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitDomain {
    /// Minimum value.
    pub min: TimeUnit,
    /// Maximum value.
    pub max: TimeUnit,
}

impl UnitDomain {
    pub fn new(min: TimeUnit, max: TimeUnit) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies in the domain.
    #[inline]
    pub fn contains(&self, value: TimeUnit) -> bool {
        self.min <= value && value <= self.max
    }

    /// Domain size (max - min + 1), 0 when empty.
    pub fn size(&self) -> i64 {
        (self.max - self.min + 1).max(0)
    }
}

/// A block variable: a day, a start, and an end, possibly absent.
///
/// The value of a present block satisfies `end = start + length` with
/// `start`, `end`, and `length` in their domains. Optional variables
/// may also take the absent value.
///
/// # Examples
///
/// ```
/// use u_timeblock::cp::BlockVar;
///
/// let var = BlockVar::new("alice_0", "alice", 0, 1, 40).as_optional();
/// assert!(var.is_optional);
/// assert_eq!(var.start.max, 39);
/// assert_eq!(var.end.min, 2);
/// assert_eq!(var.length.max, 39);
/// ```
#[derive(Debug, Clone)]
pub struct BlockVar {
    /// Variable name (unique within a system).
    pub name: String,
    /// Owner of the variable (student id).
    pub group: String,
    /// Position within the owner's slots.
    pub slot: usize,
    /// Allowed days.
    pub days: Vec<Day>,
    /// Start domain.
    pub start: UnitDomain,
    /// End domain.
    pub end: UnitDomain,
    /// Length domain (`end - start`).
    pub length: UnitDomain,
    /// Whether the variable may be absent.
    pub is_optional: bool,
}

impl BlockVar {
    /// Creates a mandatory block variable over units `[first, last]`.
    ///
    /// Start lies in `[first, last - 1]`, end in `[first + 1, last]`,
    /// length in `[1, last - first]`, any day.
    pub fn new(
        name: impl Into<String>,
        group: impl Into<String>,
        slot: usize,
        first: TimeUnit,
        last: TimeUnit,
    ) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            slot,
            days: Day::ALL.to_vec(),
            start: UnitDomain::new(first, last - 1),
            end: UnitDomain::new(first + 1, last),
            length: UnitDomain::new(1, last - first),
            is_optional: false,
        }
    }

    /// Makes this variable optional.
    pub fn as_optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    /// Restricts the allowed days.
    pub fn with_days(mut self, days: Vec<Day>) -> Self {
        self.days = days;
        self
    }

    /// Restricts the length domain.
    pub fn with_length(mut self, min: TimeUnit, max: TimeUnit) -> Self {
        self.length = UnitDomain::new(min, max);
        self
    }

    /// Whether a raw value lies in this variable's domain.
    pub fn admits(&self, value: &RawBlockValue) -> bool {
        if !value.present {
            return self.is_optional;
        }
        let day_ok = Day::from_index(value.day).is_some_and(|d| self.days.contains(&d));
        day_ok
            && self.start.contains(value.start)
            && self.end.contains(value.end)
            && self.length.contains(value.end - value.start)
    }
}

/// The value a backend assigns to a [`BlockVar`].
///
/// This is the backend-facing encoding: a presence flag, a day index,
/// and two integers. It is turned into a
/// [`TimeBlock`](crate::model::TimeBlock) by the extractor's decode step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawBlockValue {
    /// Whether the block is present.
    pub present: bool,
    /// Day index (Monday = 0). Meaningless when absent.
    pub day: usize,
    /// Start unit. Meaningless when absent.
    pub start: TimeUnit,
    /// End unit. Meaningless when absent.
    pub end: TimeUnit,
}

impl RawBlockValue {
    /// A present block.
    pub fn block(day: Day, start: TimeUnit, end: TimeUnit) -> Self {
        Self {
            present: true,
            day: day.index(),
            start,
            end,
        }
    }

    /// The absent value.
    pub fn absent() -> Self {
        Self {
            present: false,
            day: 0,
            start: 0,
            end: 0,
        }
    }

    /// Length of a present block, 0 when absent.
    #[inline]
    pub fn length(&self) -> TimeUnit {
        if self.present {
            self.end - self.start
        } else {
            0
        }
    }

    /// Whether a present block covers `(day, time)` (closed interval).
    #[inline]
    pub fn covers(&self, day: Day, time: TimeUnit) -> bool {
        self.present && self.day == day.index() && self.start <= time && time <= self.end
    }
}
