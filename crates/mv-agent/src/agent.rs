//! The simulated agent.

use mv_core::{AgentId, DisplayFlags, MovementFlags, SpeedTable, UnitStatus, Vec3};
use mv_path::Capabilities;
use mv_spline::Mover;

/// Default collision radius, in world units.
pub const DEFAULT_OBJECT_SIZE: f32 = 0.388_999_9;

/// Default melee reach, in world units.
pub const DEFAULT_COMBAT_REACH: f32 = 1.5;

/// Who drives the agent when no generator is active.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum AgentKind {
    /// Server-controlled; receives completion notifications.
    #[default]
    Autonomous,
    /// Driven by a remote player; completion notifications are dropped.
    PlayerControlled,
}

/// One simulated agent.
///
/// Generators hold no reference to an agent between ticks; the host lends
/// `&mut Agent` for the duration of a single update.
#[derive(Clone, Debug)]
pub struct Agent {
    pub id:           AgentId,
    pub kind:         AgentKind,
    pub capabilities: Capabilities,
    /// Position, facing, speeds, and the current trajectory.
    pub mover:        Mover,
    pub status:       UnitStatus,
    pub display:      DisplayFlags,
    /// Collision radius.
    pub object_size:  f32,
    pub combat_reach: f32,
    pub alive:        bool,
    /// `false` once the agent has been removed from the simulation.
    pub in_world:     bool,
    /// Current combat target.
    pub victim:       Option<AgentId>,
    /// Agent shown as the current target indicator.
    pub facing_target: Option<AgentId>,
    /// Companions may take direct paths while following their controller.
    pub trusted_follower: bool,
    /// Suppresses calls for assistance while one is already under way.
    pub no_call_assistance: bool,
}

impl Agent {
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.mover.position
    }

    #[inline]
    pub fn is_autonomous(&self) -> bool {
        self.kind == AgentKind::Autonomous
    }

    #[inline]
    pub fn has_status(&self, status: UnitStatus) -> bool {
        self.status.intersects(status)
    }

    #[inline]
    pub fn add_status(&mut self, status: UnitStatus) {
        self.status.insert(status);
    }

    #[inline]
    pub fn clear_status(&mut self, status: UnitStatus) {
        self.status.remove(status);
    }

    #[inline]
    pub fn is_walking(&self) -> bool {
        self.mover.move_flags.contains(MovementFlags::WALKING)
    }
}

/// Fluent construction for [`Agent`]; the store assigns the id.
#[derive(Clone, Debug)]
pub struct AgentBuilder {
    kind:             AgentKind,
    capabilities:     Capabilities,
    position:         Vec3,
    orientation:      f32,
    speeds:           SpeedTable,
    object_size:      f32,
    combat_reach:     f32,
    trusted_follower: bool,
}

impl AgentBuilder {
    pub fn new(position: Vec3) -> Self {
        Self {
            kind:             AgentKind::Autonomous,
            capabilities:     Capabilities::default(),
            position,
            orientation:      0.0,
            speeds:           SpeedTable::default(),
            object_size:      DEFAULT_OBJECT_SIZE,
            combat_reach:     DEFAULT_COMBAT_REACH,
            trusted_follower: false,
        }
    }

    pub fn kind(mut self, kind: AgentKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn player(self) -> Self {
        self.kind(AgentKind::PlayerControlled)
    }

    pub fn capabilities(mut self, caps: Capabilities) -> Self {
        self.capabilities = caps;
        self
    }

    pub fn orientation(mut self, orientation: f32) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn speeds(mut self, speeds: SpeedTable) -> Self {
        self.speeds = speeds;
        self
    }

    pub fn object_size(mut self, size: f32) -> Self {
        self.object_size = size;
        self
    }

    pub fn combat_reach(mut self, reach: f32) -> Self {
        self.combat_reach = reach;
        self
    }

    pub fn trusted_follower(mut self, trusted: bool) -> Self {
        self.trusted_follower = trusted;
        self
    }

    /// Finish the agent under `id`.
    pub fn build(self, id: AgentId) -> Agent {
        let mut mover = Mover::new(id, self.position);
        mover.orientation = self.orientation;
        mover.speeds = self.speeds;
        Agent {
            id,
            kind:               self.kind,
            capabilities:       self.capabilities,
            mover,
            status:             UnitStatus::default(),
            display:            DisplayFlags::default(),
            object_size:        self.object_size,
            combat_reach:       self.combat_reach,
            alive:              true,
            in_world:           true,
            victim:             None,
            facing_target:      None,
            trusted_follower:   self.trusted_follower,
            no_call_assistance: false,
        }
    }
}
