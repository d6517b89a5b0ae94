//! The per-agent generator stack.

use mv_agent::Agent;

use crate::{
    AssistDistractGenerator, FollowUp, GeneratorState, MotionContext, MotionGenerator, MotionKind,
};

struct Slot {
    generator: Box<dyn MotionGenerator>,
    state:     GeneratorState,
}

impl Slot {
    fn new(generator: Box<dyn MotionGenerator>) -> Self {
        Self { generator, state: GeneratorState::Uninitialized }
    }

    fn initialize(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>) {
        if self.state == GeneratorState::Uninitialized {
            self.generator.initialize(agent, ctx);
            self.state = GeneratorState::Active;
        }
    }

    fn reset(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>) {
        if self.state == GeneratorState::Active {
            self.generator.reset(agent, ctx);
        }
    }

    fn finalize(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>) {
        if self.state == GeneratorState::Active {
            self.generator.finalize(agent, ctx);
        }
        self.state = GeneratorState::Finalized;
    }
}

/// Owns an agent's generators and enforces their lifecycle.
///
/// Only the top generator is updated.  Generators below it are suspended and
/// are `reset` when they become the top again.  Outgoing generators are
/// always finalized before an incoming one is initialized.
#[derive(Default)]
pub struct MotionMaster {
    stack: Vec<Slot>,
}

impl MotionMaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the top generator with `generator`.
    pub fn start(
        &mut self,
        generator: Box<dyn MotionGenerator>,
        agent:     &mut Agent,
        ctx:       &mut MotionContext<'_>,
    ) {
        if let Some(mut outgoing) = self.stack.pop() {
            outgoing.finalize(agent, ctx);
        }
        self.push_initialized(generator, agent, ctx);
        self.apply_followups(agent, ctx);
    }

    /// Suspend the top generator and run `generator` above it.
    pub fn push(
        &mut self,
        generator: Box<dyn MotionGenerator>,
        agent:     &mut Agent,
        ctx:       &mut MotionContext<'_>,
    ) {
        self.push_initialized(generator, agent, ctx);
    }

    /// Finalize and remove the top generator, resuming the one beneath.
    /// Returns the kind of the removed generator.
    pub fn pop(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>) -> Option<MotionKind> {
        let mut outgoing = self.stack.pop()?;
        let kind = outgoing.generator.kind();
        outgoing.finalize(agent, ctx);
        log::debug!("{}: {kind:?} finished", agent.id);

        if !self.apply_followups(agent, ctx) {
            if let Some(top) = self.stack.last_mut() {
                top.reset(agent, ctx);
            }
        }
        Some(kind)
    }

    /// Finalize every generator, top first.
    pub fn clear(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>) {
        while let Some(mut slot) = self.stack.pop() {
            slot.finalize(agent, ctx);
        }
        // Nothing to follow up on an agent whose motion is being wiped.
        ctx.outbox.take_followups(agent.id);
    }

    /// Drop every generator without finalizing.  For agents that left the
    /// world, whose status no longer matters.
    pub fn abandon(&mut self) {
        self.stack.clear();
    }

    /// Run one tick of the top generator, popping it if it completes.
    pub fn update(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>, diff_ms: u32) {
        let Some(top) = self.stack.last_mut() else {
            return;
        };
        if !top.generator.update(agent, ctx, diff_ms) {
            self.pop(agent, ctx);
        }
    }

    /// Forward a speed change to the active generator.
    pub fn notify_speed_changed(&mut self) {
        if let Some(top) = self.stack.last_mut() {
            top.generator.on_speed_changed();
        }
    }

    pub fn top(&self) -> Option<&dyn MotionGenerator> {
        self.stack.last().map(|s| s.generator.as_ref())
    }

    pub fn top_kind(&self) -> Option<MotionKind> {
        self.top().map(|g| g.kind())
    }

    pub fn kinds(&self) -> Vec<MotionKind> {
        self.stack.iter().map(|s| s.generator.kind()).collect()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    fn push_initialized(
        &mut self,
        generator: Box<dyn MotionGenerator>,
        agent:     &mut Agent,
        ctx:       &mut MotionContext<'_>,
    ) {
        let mut slot = Slot::new(generator);
        log::debug!("{}: {:?} started", agent.id, slot.generator.kind());
        slot.initialize(agent, ctx);
        self.stack.push(slot);
    }

    /// Push whatever the outgoing generator asked for.  Returns `true` if
    /// anything was pushed.
    fn apply_followups(&mut self, agent: &mut Agent, ctx: &mut MotionContext<'_>) -> bool {
        let followups = ctx.outbox.take_followups(agent.id);
        let pushed = !followups.is_empty();
        for followup in followups {
            let generator: Box<dyn MotionGenerator> = match followup {
                FollowUp::AssistDistract { duration_ms } => {
                    Box::new(AssistDistractGenerator::new(duration_ms))
                }
            };
            self.push_initialized(generator, agent, ctx);
        }
        pushed
    }
}
