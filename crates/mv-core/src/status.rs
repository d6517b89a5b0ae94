//! Agent status flags.
//!
//! `UnitStatus` is the closed set of transient states generators read and
//! write.  `DisplayFlags` are the client-visible rendering hints that mirror
//! some of those states.

flag_set! {
    /// Transient agent states consulted by every motion generator.
    pub struct UnitStatus(u32) {
        const ROOTED     = 1 << 0;
        const STUNNED    = 1 << 1;
        const DISTRACTED = 1 << 2;
        const CASTING    = 1 << 3;
        const FLEEING    = 1 << 4;
        const FOLLOWING  = 1 << 5;
        const CHARGING   = 1 << 6;
        const JUMPING    = 1 << 7;
        const CONFUSED   = 1 << 8;
        const CHASING    = 1 << 9;
        /// Set while a pursuit trajectory toward the target is in flight.
        const PURSUING   = 1 << 10;
    }
}

impl UnitStatus {
    /// States that freeze any new movement decision.
    pub const CANNOT_MOVE: UnitStatus = UnitStatus(
        UnitStatus::ROOTED.0 | UnitStatus::STUNNED.0 | UnitStatus::DISTRACTED.0,
    );

    /// States that carry an agent along a trajectory regardless of roots.
    pub const FORCED_TRANSIT: UnitStatus = UnitStatus(UnitStatus::CHARGING.0 | UnitStatus::JUMPING.0);
}

flag_set! {
    /// Client-visible rendering hints.
    pub struct DisplayFlags(u32) {
        const CONFUSED = 1 << 0;
    }
}
