//! Turns the critic's outlook into a [`Command`].
//!
//! Combat runs every tick regardless of behavior state: if the target is in
//! the strike sector the hero shoots or swings at it. Fighters additionally
//! pick a position to move to from the micro table below. Movement itself is
//! delegated to [`CruiseControl`].

use arena_core::{
    AgentConfig, ArenaConfig, CombatAction, Command, FighterConfig, GameRules, HealthThresholds,
    Lane, Point, SelfState, Unit, WorldSnapshot, rel_angle,
};
use arena_navigation::CruiseControl;
use decision_table::{DecisionTable, otherwise, when};

use crate::critic::{Critic, Outlook};
use crate::state::BehaviorState;

/// Positioning decision made by the fighter micro table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Maneuver {
    /// Fall back to the flee point and stop re-evaluating for a while.
    Flee(Point),
    /// Back off to the flee point, re-evaluated next tick.
    Retreat(Point),
    /// Close in on the target, directly or at an angle.
    Advance(Point),
    Hold(Point),
}

impl Maneuver {
    pub fn destination(self) -> Point {
        match self {
            Self::Flee(point) | Self::Retreat(point) | Self::Advance(point) | Self::Hold(point) => {
                point
            }
        }
    }
}

/// Inputs to the fighter micro table, captured once per tick.
struct Engagement {
    position: Point,
    health: u32,
    max_health: u32,
    last_health: Option<u32>,
    target: Unit,
    distance: f64,
    engage_distance: f64,
    cast_range: f64,
    steer_point: Point,
    flee_point: Point,
    enemy_hero_near: bool,
    allies_near: bool,
    thresholds: HealthThresholds,
    enemy_radius: f64,
    retreat_margin: f64,
}

impl Engagement {
    fn damaged(&self) -> bool {
        self.last_health.is_some_and(|last| self.health < last)
    }

    fn health_below(&self, fraction: f64) -> bool {
        f64::from(self.health) < f64::from(self.max_health) * fraction
    }

    fn health_above(&self, fraction: f64) -> bool {
        f64::from(self.health) > f64::from(self.max_health) * fraction
    }
}

fn micro_table() -> DecisionTable<Engagement, Maneuver> {
    DecisionTable::new(vec![
        when(
            "in_trouble",
            |e: &Engagement| {
                e.damaged() || (e.health_below(e.thresholds.low) && e.distance < e.enemy_radius)
            },
            |e| Maneuver::Flee(e.flee_point),
        ),
        when(
            "supported",
            |e: &Engagement| {
                !e.enemy_hero_near && e.allies_near && e.health_above(e.thresholds.cautious)
            },
            |e| {
                if e.distance > e.engage_distance {
                    Maneuver::Advance(e.steer_point)
                } else {
                    Maneuver::Advance(e.target.position)
                }
            },
        ),
        when(
            "weak_hero",
            |e: &Engagement| {
                e.target.is_hero()
                    && e.target.health_below(e.thresholds.weak)
                    && e.health_above(e.thresholds.cautious)
            },
            |e| Maneuver::Advance(e.target.position),
        ),
        when(
            "winning_duel",
            |e: &Engagement| {
                e.target.is_hero() && e.target.health < e.health && e.distance > e.engage_distance
            },
            |e| Maneuver::Advance(e.steer_point),
        ),
        when(
            "too_close",
            |e: &Engagement| e.distance < e.cast_range - e.retreat_margin,
            |e| Maneuver::Retreat(e.flee_point),
        ),
        when(
            "too_far",
            |e: &Engagement| e.distance > e.cast_range,
            |e| Maneuver::Advance(e.target.position),
        ),
        otherwise("hold", |e: &Engagement| Maneuver::Hold(e.position)),
    ])
}

/// Strike decision against `target`: turn toward it and attack if in reach.
pub fn combat(me: &SelfState, rules: &GameRules, target: &Unit) -> Command {
    let position = me.position();
    let relative = rel_angle(me.facing, position.bearing(target.position));
    let distance = position.distance(target.position);

    let mut command = Command {
        turn: relative,
        ..Command::idle()
    };
    if relative.abs() > rules.melee_sector / 2.0 {
        return command;
    }

    let ranged_reach = me.cast_range + target.radius - rules.projectile_radius;
    if distance <= ranged_reach && me.ranged_cooldown == 0 {
        command.action = CombatAction::Ranged;
        command.min_cast_distance = distance - target.radius + rules.projectile_radius;
        command.cast_angle = relative;
    } else if distance <= rules.melee_range + target.radius {
        command.action = CombatAction::Melee;
        command.min_cast_distance = distance - target.radius;
        command.cast_angle = relative;
    }
    command
}

/// Point halfway to the target, swung sideways by `steer_angle`.
///
/// Heroes on the top lane swing counter-clockwise, everyone else clockwise.
/// The result is kept at least `radius` away from every arena edge, or on the
/// arena's midline when the hero is too large for that.
pub fn steer_point(
    position: Point,
    target: Point,
    lane: Option<Lane>,
    steer_angle: f64,
    radius: f64,
    arena: &ArenaConfig,
) -> Point {
    let offset = match lane {
        Some(Lane::Top) => steer_angle,
        _ => -steer_angle,
    };
    let angle = position.bearing(target) + offset;
    let margin_x = radius.min(arena.width / 2.0);
    let margin_y = radius.min(arena.height / 2.0);
    position.project(angle, position.distance(target) / 2.0).clamp(
        Point::new(margin_x, margin_y),
        Point::new(arena.width - margin_x, arena.height - margin_y),
    )
}

pub struct Actor {
    cruise: CruiseControl,
    arena: ArenaConfig,
    fighter: FighterConfig,
    thresholds: HealthThresholds,
    enemy_radius: f64,
    micro: DecisionTable<Engagement, Maneuver>,
    destination: Option<Point>,
    fleeing: u32,
    last_health: Option<u32>,
    maneuver: Option<(&'static str, Maneuver)>,
}

impl Actor {
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            cruise: CruiseControl::new(config),
            arena: config.arena.clone(),
            fighter: config.fighter.clone(),
            thresholds: config.health.clone(),
            enemy_radius: config.sensing.enemy_radius,
            micro: micro_table(),
            destination: None,
            fleeing: 0,
            last_health: None,
            maneuver: None,
        }
    }

    /// Produces this tick's command. Must run after [`Critic::update`].
    pub fn update(&mut self, snapshot: &WorldSnapshot, critic: &Critic, outlook: &Outlook) -> Command {
        let me = &snapshot.me;
        let target = outlook.target.and_then(|id| snapshot.unit(id));

        if let Some(destination) = outlook.destination {
            self.destination = Some(destination);
        }

        let mut command = match target {
            Some(target) => combat(me, &snapshot.rules, target),
            None => Command::idle(),
        };

        self.maneuver = None;
        if outlook.state == BehaviorState::Fighter
            && self.fleeing == 0
            && let Some(target) = target
        {
            self.fighter_micro(me, critic, target);
        }

        if self.fleeing > 0 {
            self.fleeing -= 1;
        }
        self.last_health = Some(me.unit.health);

        self.cruise.set_destination(self.destination);
        self.cruise.update(snapshot, outlook.target);

        if target.is_none() {
            command.turn = rel_angle(me.facing, self.cruise.move_angle());
        }
        let steering = self.cruise.steering_output();
        command.speed = steering.forward;
        command.strafe_speed = steering.strafe;
        command
    }

    /// Forgets destination, flee state and health history.
    pub fn reset(&mut self) {
        self.cruise.reset();
        self.destination = None;
        self.fleeing = 0;
        self.last_health = None;
        self.maneuver = None;
    }

    pub fn destination(&self) -> Option<Point> {
        self.destination
    }

    /// Ticks left before the micro table is consulted again.
    pub fn flee_cooldown(&self) -> u32 {
        self.fleeing
    }

    pub fn last_health(&self) -> Option<u32> {
        self.last_health
    }

    /// Micro rule and maneuver chosen this tick, if the table ran.
    pub fn maneuver(&self) -> Option<(&'static str, Maneuver)> {
        self.maneuver
    }

    pub fn cruise(&self) -> &CruiseControl {
        &self.cruise
    }

    fn fighter_micro(&mut self, me: &SelfState, critic: &Critic, target: &Unit) {
        let position = me.position();
        let surroundings = critic.surroundings();
        let engagement = Engagement {
            position,
            health: me.unit.health,
            max_health: me.unit.max_health,
            last_health: self.last_health,
            target: target.clone(),
            distance: position.distance(target.position),
            engage_distance: me.cast_range * self.fighter.engage_coefficient,
            cast_range: me.cast_range,
            steer_point: steer_point(
                position,
                target.position,
                critic.lane(),
                self.fighter.steer_angle,
                me.unit.radius,
                &self.arena,
            ),
            flee_point: critic.flee_point().unwrap_or(position),
            enemy_hero_near: surroundings.enemy_hero_near(),
            allies_near: !surroundings.allies.is_empty(),
            thresholds: self.thresholds.clone(),
            enemy_radius: self.enemy_radius,
            retreat_margin: self.fighter.retreat_margin,
        };

        let Some(decision) = self.micro.decide(&engagement) else {
            return;
        };
        if let Maneuver::Flee(_) = decision.outcome {
            self.fleeing = self.fighter.flee_ticks;
        }
        tracing::debug!(
            rule = decision.rule,
            maneuver = ?decision.outcome,
            distance = engagement.distance,
            health = engagement.health,
            "fighter micro"
        );
        self.destination = Some(decision.outcome.destination());
        self.maneuver = Some((decision.rule, decision.outcome));
    }
}
