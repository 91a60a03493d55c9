//! Engine-side components that wrap pattern state.

use barrage_patterns::attacks::BossAttackRoutine;
use barrage_patterns::boss::BossStateMachine;

/// Phase machine and attack routine of a boss actor.
#[derive(Debug, Clone)]
pub struct BossBrain {
    pub machine: BossStateMachine,
    pub routine: BossAttackRoutine,
}

impl BossBrain {
    pub fn new(now_ms: f64) -> Self {
        Self {
            machine: BossStateMachine::new(now_ms),
            routine: BossAttackRoutine::new(),
        }
    }
}
