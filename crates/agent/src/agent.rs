//! Per-tick pipeline: validate, assess, act.

use arena_core::{AgentConfig, Command, EntityId, LaneTable, Point, WorldSnapshot};

use crate::actor::Actor;
use crate::critic::{Assessment, Critic};
use crate::error::Result;
use crate::state::BehaviorState;

/// One bot instance controlling one hero.
///
/// Owns the critic, the actor and through it the navigation engine. Nothing
/// is shared between agents.
pub struct Agent {
    critic: Critic,
    actor: Actor,
}

impl Agent {
    /// Builds an agent after validating both configuration inputs.
    pub fn new(config: AgentConfig, lanes: LaneTable) -> Result<Self> {
        config.validate()?;
        lanes.validate()?;
        Ok(Self {
            actor: Actor::new(&config),
            critic: Critic::new(config, lanes),
        })
    }

    /// Runs one decision cycle.
    ///
    /// Malformed snapshots are rejected before any state changes. A dead hero
    /// resets transient state and yields [`Command::idle`].
    pub fn tick(&mut self, snapshot: &WorldSnapshot) -> Result<Command> {
        if let Err(err) = snapshot.validate() {
            tracing::warn!(tick = snapshot.tick, error = %err, "snapshot rejected");
            return Err(err.into());
        }

        let outlook = match self.critic.update(snapshot) {
            Ok(Assessment::Alive(outlook)) => outlook,
            Ok(Assessment::Dead) => {
                self.actor.reset();
                return Ok(Command::idle());
            }
            Err(err) => {
                tracing::warn!(tick = snapshot.tick, error = %err, "snapshot rejected");
                return Err(err.into());
            }
        };

        let command = self.actor.update(snapshot, &self.critic, &outlook);
        tracing::debug!(
            tick = snapshot.tick,
            speed = command.speed,
            strafe = command.strafe_speed,
            turn = command.turn,
            action = %command.action,
            "command issued"
        );
        Ok(command)
    }

    pub fn state(&self) -> BehaviorState {
        self.critic.state()
    }

    pub fn target(&self) -> Option<EntityId> {
        self.critic.target()
    }

    pub fn destination(&self) -> Option<Point> {
        self.actor.destination()
    }

    pub fn waypoint_index(&self) -> usize {
        self.critic.waypoint_index()
    }

    pub fn flee_cooldown(&self) -> u32 {
        self.actor.flee_cooldown()
    }

    /// Waypoints planned on the last tick, ending with the destination.
    pub fn path(&self) -> &[Point] {
        self.actor.cruise().path()
    }

    pub fn critic(&self) -> &Critic {
        &self.critic
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }
}

#[cfg(test)]
mod tests {
    use arena_core::{ConfigError, ErrorSeverity, Faction, GameError, SelfState, Unit, UnitKind};

    use super::*;
    use crate::error::AgentError;

    fn snapshot(x: f64, y: f64) -> WorldSnapshot {
        let unit = Unit::new(EntityId(3), UnitKind::Hero, Faction::Academy, Point::new(x, y), 35.0);
        let me = SelfState::new(unit.clone(), 0.0, 500.0);
        WorldSnapshot::new(0, me, vec![unit])
    }

    #[test]
    fn invalid_config_is_fatal() {
        let mut config = AgentConfig::default();
        config.arena.node_width = 0.0;
        let err = Agent::new(config, LaneTable::default()).err();
        assert_eq!(err, Some(AgentError::Config(ConfigError::InvalidNodeWidth(0.0))));
        assert!(err.is_some_and(|err| err.severity().is_fatal()));
    }

    #[test]
    fn malformed_snapshot_is_a_validation_error() {
        let mut agent = Agent::new(AgentConfig::default(), LaneTable::default()).unwrap();
        let err = agent.tick(&snapshot(f64::NAN, 10.0)).unwrap_err();
        assert_eq!(err.severity(), ErrorSeverity::Validation);

        // The agent keeps working afterwards.
        assert!(agent.tick(&snapshot(620.0, 3420.0)).is_ok());
        assert_eq!(agent.waypoint_index(), 1);
    }
}
