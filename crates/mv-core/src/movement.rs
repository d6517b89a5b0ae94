//! Movement flags, speed types, and per-agent speed tables.

flag_set! {
    /// Per-agent movement state mirrored to observers.
    pub struct MovementFlags(u32) {
        const FORWARD        = 1 << 0;
        const BACKWARD       = 1 << 1;
        const WALKING        = 1 << 2;
        const SWIMMING       = 1 << 3;
        const LEVITATING     = 1 << 4;
        const FLYING         = 1 << 5;
        const SPLINE_ENABLED = 1 << 6;
    }
}

/// Which of an agent's speeds governs the current motion.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpeedType {
    Walk,
    Run,
    RunBack,
    Swim,
    SwimBack,
    Flight,
    FlightBack,
}

impl SpeedType {
    pub const ALL: [SpeedType; 7] = [
        SpeedType::Walk,
        SpeedType::Run,
        SpeedType::RunBack,
        SpeedType::Swim,
        SpeedType::SwimBack,
        SpeedType::Flight,
        SpeedType::FlightBack,
    ];

    /// Baseline rate in world units per second.
    pub fn base_rate(self) -> f32 {
        match self {
            SpeedType::Walk       => 2.5,
            SpeedType::Run        => 7.0,
            SpeedType::RunBack    => 4.5,
            SpeedType::Swim       => 4.722_222,
            SpeedType::SwimBack   => 2.5,
            SpeedType::Flight     => 7.0,
            SpeedType::FlightBack => 4.5,
        }
    }

    /// Pick the speed type implied by a movement flag set.
    ///
    /// Precedence: flying beats swimming beats walking beats running; within
    /// the flying, swimming and running groups the backward flag selects the
    /// backward rate.  Walking has no backward variant.
    pub fn select(flags: MovementFlags) -> SpeedType {
        let backward = flags.contains(MovementFlags::BACKWARD);
        if flags.contains(MovementFlags::FLYING) {
            if backward { SpeedType::FlightBack } else { SpeedType::Flight }
        } else if flags.contains(MovementFlags::SWIMMING) {
            if backward { SpeedType::SwimBack } else { SpeedType::Swim }
        } else if flags.contains(MovementFlags::WALKING) {
            SpeedType::Walk
        } else if backward {
            SpeedType::RunBack
        } else {
            SpeedType::Run
        }
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

/// Per-agent speed for every `SpeedType`, in world units per second.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedTable {
    rates: [f32; 7],
}

impl Default for SpeedTable {
    fn default() -> Self {
        let mut rates = [0.0; 7];
        for t in SpeedType::ALL {
            rates[t.slot()] = t.base_rate();
        }
        Self { rates }
    }
}

impl SpeedTable {
    #[inline]
    pub fn get(&self, t: SpeedType) -> f32 {
        self.rates[t.slot()]
    }

    #[inline]
    pub fn set(&mut self, t: SpeedType, rate: f32) {
        self.rates[t.slot()] = rate;
    }

    /// Scale every rate by `factor` (haste/slow effects).
    pub fn scaled(mut self, factor: f32) -> Self {
        for r in &mut self.rates {
            *r *= factor;
        }
        self
    }
}
