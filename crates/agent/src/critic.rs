//! Situation assessment: lane progress, target choice and behavior state.
//!
//! The critic runs first every tick. It classifies what the hero can see into
//! allies, enemies and trees, advances lane progress, then consults two
//! decision tables: one to pick a target and one to pick a [`BehaviorState`].
//! The chosen target is kept as an [`EntityId`] and re-resolved against each
//! new snapshot, never cached as an entity copy.

use arena_core::{
    AgentConfig, EntityId, HealthThresholds, Lane, LaneTable, Point, SnapshotError, Unit, UnitKind,
    WorldSnapshot,
};
use decision_table::{DecisionTable, otherwise, pick, when};

use crate::state::BehaviorState;

/// Result of one critic pass.
#[derive(Clone, Debug, PartialEq)]
pub enum Assessment {
    /// The hero has zero health. Transient state has been reset.
    Dead,
    Alive(Outlook),
}

/// What the critic decided for a living hero.
#[derive(Clone, Debug, PartialEq)]
pub struct Outlook {
    pub target: Option<EntityId>,
    pub state: BehaviorState,
    /// Lane waypoint to travel to. Only set for travellers; fighters leave
    /// the destination to the actor.
    pub destination: Option<Point>,
    pub target_rule: Option<&'static str>,
    pub state_rule: &'static str,
}

/// Units near the hero, rebuilt every tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Surroundings {
    pub position: Point,
    pub allies: Vec<Unit>,
    pub enemies: Vec<Unit>,
    pub trees: Vec<Unit>,
    thresholds: HealthThresholds,
    too_close: f64,
}

impl Surroundings {
    fn sense(snapshot: &WorldSnapshot, config: &AgentConfig) -> Self {
        let sensing = &config.sensing;
        let me = &snapshot.me.unit;
        let position = me.position;
        let within = |unit: &Unit, radius: f64| position.distance(unit.position) < radius;

        let mut surroundings = Self {
            position,
            allies: Vec::new(),
            enemies: Vec::new(),
            trees: Vec::new(),
            thresholds: config.health.clone(),
            too_close: config.fighter.too_close_distance,
        };

        for unit in snapshot.others() {
            match unit.kind {
                UnitKind::Tree => {
                    if within(unit, snapshot.rules.melee_range + unit.radius) {
                        surroundings.trees.push(unit.clone());
                    }
                }
                UnitKind::Hero | UnitKind::Minion if unit.faction == me.faction => {
                    if within(unit, sensing.ally_radius) {
                        surroundings.allies.push(unit.clone());
                    }
                }
                kind => {
                    let hostile = unit.faction != me.faction
                        && (kind == UnitKind::Hero || !unit.faction.is_neutral());
                    if hostile && within(unit, sensing.enemy_radius) {
                        surroundings.enemies.push(unit.clone());
                    }
                }
            }
        }

        surroundings
    }

    pub fn enemy_hero_near(&self) -> bool {
        self.enemies.iter().any(Unit::is_hero)
    }

    /// Nearest enemy satisfying `filter`. The first one found wins ties.
    fn nearest_enemy(&self, filter: impl Fn(&Unit) -> bool) -> Option<EntityId> {
        nearest(self.position, self.enemies.iter().filter(|unit| filter(unit)))
    }

    fn is_too_close(&self, unit: &Unit) -> bool {
        self.position.distance(unit.position) < self.too_close
    }
}

fn nearest<'a>(from: Point, units: impl Iterator<Item = &'a Unit>) -> Option<EntityId> {
    units
        .min_by(|a, b| from.distance(a.position).total_cmp(&from.distance(b.position)))
        .map(|unit| unit.id)
}

/// Inputs to the behavior-state table.
struct Situation {
    position: Point,
    has_target: bool,
    enemies_near: bool,
    enemy_base_weak: bool,
    enemy_base: Point,
    enemy_base_radius: f64,
}

fn target_table() -> DecisionTable<Surroundings, EntityId> {
    DecisionTable::new(vec![
        pick("weak_hero", |s: &Surroundings| {
            s.nearest_enemy(|u| u.is_hero() && u.health_below(s.thresholds.weak))
        }),
        pick("close_hero", |s: &Surroundings| {
            s.nearest_enemy(|u| u.is_hero() && s.is_too_close(u))
        }),
        pick("close_enemy", |s: &Surroundings| {
            s.nearest_enemy(|u| s.is_too_close(u))
        }),
        pick("tree", |s: &Surroundings| nearest(s.position, s.trees.iter())),
        pick("weak_structure", |s: &Surroundings| {
            s.nearest_enemy(|u| u.kind.is_structure() && u.health_below(s.thresholds.weak))
        }),
        pick("injured_hero", |s: &Surroundings| {
            s.nearest_enemy(|u| u.is_hero() && u.health_below(s.thresholds.injured))
        }),
        pick("injured_enemy", |s: &Surroundings| {
            s.nearest_enemy(|u| u.health_below(s.thresholds.injured))
        }),
        pick("nearest_enemy", |s: &Surroundings| s.nearest_enemy(|_| true)),
    ])
}

fn state_table() -> DecisionTable<Situation, BehaviorState> {
    DecisionTable::new(vec![
        when("no_target", |s: &Situation| !s.has_target, |_| BehaviorState::Traveller),
        when("enemy_base_weak", |s: &Situation| s.enemy_base_weak, |_| BehaviorState::Fighter),
        when(
            "near_enemy_base",
            |s: &Situation| s.position.distance(s.enemy_base) < s.enemy_base_radius,
            |_| BehaviorState::Traveller,
        ),
        when("enemies_near", |s: &Situation| s.enemies_near, |_| BehaviorState::Fighter),
        otherwise("travel", |_| BehaviorState::Traveller),
    ])
}

pub struct Critic {
    config: AgentConfig,
    lanes: LaneTable,
    targets: DecisionTable<Surroundings, EntityId>,
    states: DecisionTable<Situation, BehaviorState>,
    lane: Option<Lane>,
    waypoint_index: usize,
    surroundings: Surroundings,
    target: Option<EntityId>,
    state: BehaviorState,
}

impl Critic {
    pub fn new(config: AgentConfig, lanes: LaneTable) -> Self {
        Self {
            config,
            lanes,
            targets: target_table(),
            states: state_table(),
            lane: None,
            waypoint_index: 0,
            surroundings: Surroundings::default(),
            target: None,
            state: BehaviorState::Traveller,
        }
    }

    /// Assesses one snapshot.
    ///
    /// Fails only when the hero has no lane assignment.
    pub fn update(&mut self, snapshot: &WorldSnapshot) -> Result<Assessment, SnapshotError> {
        let id = snapshot.me.id();
        let lane = self
            .lanes
            .lane_for(id)
            .ok_or(SnapshotError::UnassignedLane { id })?;
        if self.lane != Some(lane) {
            tracing::debug!(hero = %id, %lane, "lane assigned");
            self.lane = Some(lane);
            self.waypoint_index = 0;
        }

        if snapshot.me.is_dead() {
            if self.waypoint_index != 0 || self.target.is_some() {
                tracing::debug!(hero = %id, tick = snapshot.tick, "hero died, resetting");
            }
            self.reset();
            return Ok(Assessment::Dead);
        }

        self.surroundings = Surroundings::sense(snapshot, &self.config);
        self.advance_waypoint();

        let target = self.targets.decide(&self.surroundings);
        let target_rule = target.as_ref().map(|decision| decision.rule);
        self.target = target.map(|decision| decision.outcome);

        let situation = self.situation(snapshot);
        let (state, state_rule) = match self.states.decide(&situation) {
            Some(decision) => (decision.outcome, decision.rule),
            None => (BehaviorState::Traveller, "travel"),
        };
        self.state = state;

        let destination = match state {
            BehaviorState::Traveller => self.current_waypoint(),
            BehaviorState::Fighter => None,
        };

        tracing::debug!(
            tick = snapshot.tick,
            target = ?self.target,
            target_rule,
            %state,
            state_rule,
            waypoint = self.waypoint_index,
            "critic assessment"
        );

        Ok(Assessment::Alive(Outlook {
            target: self.target,
            state,
            destination,
            target_rule,
            state_rule,
        }))
    }

    /// Clears everything derived from previous ticks.
    pub fn reset(&mut self) {
        self.waypoint_index = 0;
        self.surroundings = Surroundings::default();
        self.target = None;
        self.state = BehaviorState::Traveller;
    }

    pub fn lane(&self) -> Option<Lane> {
        self.lane
    }

    /// Waypoints of the current lane, empty before the first update.
    pub fn waypoints(&self) -> &[Point] {
        match self.lane {
            Some(lane) => self.lanes.waypoints(lane),
            None => &[],
        }
    }

    pub fn waypoint_index(&self) -> usize {
        self.waypoint_index
    }

    pub fn current_waypoint(&self) -> Option<Point> {
        self.waypoints().get(self.waypoint_index).copied()
    }

    /// Retreat position two waypoints behind current progress.
    pub fn flee_point(&self) -> Option<Point> {
        self.waypoints()
            .get(self.waypoint_index.saturating_sub(2))
            .copied()
    }

    pub fn surroundings(&self) -> &Surroundings {
        &self.surroundings
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub fn state(&self) -> BehaviorState {
        self.state
    }

    fn advance_waypoint(&mut self) {
        let tolerance = self.config.sensing.waypoint_tolerance;
        let position = self.surroundings.position;
        let Some(lane) = self.lane else {
            return;
        };
        let waypoints = self.lanes.waypoints(lane);
        let count = waypoints.len();
        if count == 0 {
            return;
        }

        let mut index = self.waypoint_index.min(count - 1);
        for (i, waypoint) in waypoints.iter().enumerate().take(count - 1) {
            if position.distance(*waypoint) < tolerance {
                let candidate = if index + 2 < count { i + 1 } else { i };
                index = index.max(candidate);
            }
        }

        if index != self.waypoint_index {
            tracing::debug!(from = self.waypoint_index, to = index, "waypoint reached");
        }
        self.waypoint_index = index;
    }

    fn situation(&self, snapshot: &WorldSnapshot) -> Situation {
        let sensing = &self.config.sensing;
        let base = snapshot.enemy_base();
        Situation {
            position: self.surroundings.position,
            has_target: self.target.is_some(),
            enemies_near: !self.surroundings.enemies.is_empty(),
            enemy_base_weak: base.is_some_and(|base| base.health_below(self.config.health.weak)),
            enemy_base: base.map_or(sensing.enemy_base_fallback, |base| base.position),
            enemy_base_radius: sensing.enemy_base_radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use arena_core::{Faction, LaneAssignment, SelfState};

    use super::*;

    fn lanes(waypoints: Vec<Point>) -> LaneTable {
        LaneTable {
            top: waypoints.clone(),
            middle: waypoints.clone(),
            bottom: waypoints,
            assignments: vec![LaneAssignment {
                id: EntityId(1),
                lane: Lane::Top,
            }],
        }
    }

    fn straight_lane() -> LaneTable {
        lanes((0..6).map(|i| Point::new(500.0 + 500.0 * i as f64, 2000.0)).collect())
    }

    fn me_at(x: f64, y: f64) -> SelfState {
        let unit = Unit::new(EntityId(1), UnitKind::Hero, Faction::Academy, Point::new(x, y), 35.0);
        SelfState::new(unit, 0.0, 500.0)
    }

    fn enemy(id: u64, kind: UnitKind, x: f64, y: f64) -> Unit {
        Unit::new(EntityId(id), kind, Faction::Renegades, Point::new(x, y), 30.0)
    }

    fn snapshot(me: SelfState, others: Vec<Unit>) -> WorldSnapshot {
        let mut units = vec![me.unit.clone()];
        units.extend(others);
        WorldSnapshot::new(7, me, units)
    }

    fn critic() -> Critic {
        Critic::new(AgentConfig::default(), straight_lane())
    }

    fn outlook(assessment: Assessment) -> Outlook {
        match assessment {
            Assessment::Alive(outlook) => outlook,
            Assessment::Dead => panic!("expected a living hero"),
        }
    }

    #[test]
    fn classifies_surroundings_by_faction_and_kind() {
        let mut critic = critic();
        let others = vec![
            Unit::new(EntityId(2), UnitKind::Minion, Faction::Academy, Point::new(1100.0, 2000.0), 25.0),
            enemy(3, UnitKind::Minion, 1200.0, 2000.0),
            Unit::new(EntityId(4), UnitKind::Minion, Faction::Neutral, Point::new(1050.0, 2050.0), 25.0),
            Unit::new(EntityId(5), UnitKind::Hero, Faction::Other, Point::new(900.0, 2000.0), 35.0),
            enemy(6, UnitKind::Tower, 1500.0, 2000.0),
            enemy(7, UnitKind::Minion, 1700.0, 2000.0),
            Unit::new(EntityId(8), UnitKind::Tree, Faction::Neutral, Point::new(1000.0, 2090.0), 40.0),
            Unit::new(EntityId(9), UnitKind::Tree, Faction::Neutral, Point::new(1000.0, 2300.0), 40.0),
        ];
        critic.update(&snapshot(me_at(1000.0, 2000.0), others)).unwrap();

        let s = critic.surroundings();
        let ids = |units: &[Unit]| units.iter().map(|u| u.id.0).collect::<Vec<_>>();
        assert_eq!(ids(&s.allies), vec![2]);
        assert_eq!(ids(&s.enemies), vec![3, 5, 6]);
        assert_eq!(ids(&s.trees), vec![8]);
        assert!(s.enemy_hero_near());
    }

    #[test]
    fn weak_hero_outranks_nearby_tree() {
        let mut critic = critic();
        let others = vec![
            Unit::new(EntityId(8), UnitKind::Tree, Faction::Neutral, Point::new(1060.0, 2000.0), 30.0),
            enemy(5, UnitKind::Hero, 1450.0, 2000.0).with_health(20, 100),
        ];
        let outlook = outlook(critic.update(&snapshot(me_at(1000.0, 2000.0), others)).unwrap());

        assert_eq!(outlook.target, Some(EntityId(5)));
        assert_eq!(outlook.target_rule, Some("weak_hero"));
        assert_eq!(outlook.state, BehaviorState::Fighter);
        assert_eq!(outlook.destination, None);
    }

    #[test]
    fn tree_is_targeted_without_enemies() {
        let mut critic = critic();
        let tree = Unit::new(EntityId(8), UnitKind::Tree, Faction::Neutral, Point::new(1060.0, 2000.0), 30.0);
        let outlook = outlook(critic.update(&snapshot(me_at(1000.0, 2000.0), vec![tree])).unwrap());

        assert_eq!(outlook.target, Some(EntityId(8)));
        assert_eq!(outlook.state, BehaviorState::Traveller);
        assert_eq!(outlook.state_rule, "travel");
        assert_eq!(outlook.destination, critic.current_waypoint());
    }

    #[test]
    fn priorities_follow_table_order() {
        let cases = [
            // Close hero beats a closer minion.
            (
                vec![enemy(3, UnitKind::Minion, 1200.0, 2000.0), enemy(5, UnitKind::Hero, 1250.0, 2000.0)],
                5,
                "close_hero",
            ),
            (
                vec![enemy(3, UnitKind::Minion, 1350.0, 2000.0), enemy(4, UnitKind::Minion, 1250.0, 2000.0)],
                4,
                "close_enemy",
            ),
            (
                vec![
                    enemy(3, UnitKind::Minion, 1400.0, 2000.0),
                    enemy(6, UnitKind::Tower, 1500.0, 2000.0).with_health(10, 100),
                ],
                6,
                "weak_structure",
            ),
            (
                vec![
                    enemy(3, UnitKind::Minion, 1400.0, 2000.0).with_health(50, 100),
                    enemy(5, UnitKind::Hero, 1500.0, 2000.0).with_health(50, 100),
                ],
                5,
                "injured_hero",
            ),
            (
                vec![
                    enemy(3, UnitKind::Minion, 1400.0, 2000.0),
                    enemy(4, UnitKind::Minion, 1500.0, 2000.0).with_health(50, 100),
                ],
                4,
                "injured_enemy",
            ),
            (
                vec![enemy(3, UnitKind::Minion, 1500.0, 2000.0), enemy(4, UnitKind::Minion, 1400.0, 2000.0)],
                4,
                "nearest_enemy",
            ),
        ];

        for (others, expected, rule) in cases {
            let mut critic = critic();
            let outlook = outlook(critic.update(&snapshot(me_at(1000.0, 2000.0), others)).unwrap());
            assert_eq!(outlook.target, Some(EntityId(expected)), "{rule}");
            assert_eq!(outlook.target_rule, Some(rule));
        }
    }

    #[test]
    fn equidistant_enemies_pick_first_seen() {
        let mut critic = critic();
        let others = vec![
            enemy(4, UnitKind::Minion, 1400.0, 2000.0),
            enemy(3, UnitKind::Minion, 600.0, 2000.0),
        ];
        let outlook = outlook(critic.update(&snapshot(me_at(1000.0, 2000.0), others)).unwrap());
        assert_eq!(outlook.target, Some(EntityId(4)));
    }

    #[test]
    fn no_target_travels_to_current_waypoint() {
        let mut critic = critic();
        let outlook = outlook(critic.update(&snapshot(me_at(100.0, 100.0), Vec::new())).unwrap());

        assert_eq!(outlook.target, None);
        assert_eq!(outlook.state, BehaviorState::Traveller);
        assert_eq!(outlook.state_rule, "no_target");
        assert_eq!(outlook.destination, Some(Point::new(500.0, 2000.0)));
    }

    #[test]
    fn weak_enemy_base_forces_fighter() {
        let config = AgentConfig::default();
        let base = Unit::new(EntityId(90), UnitKind::Base, Faction::Renegades, Point::new(3300.0, 2000.0), 100.0)
            .with_health(100, 1000);
        let minion = enemy(3, UnitKind::Minion, 3000.0, 2000.0);

        let mut critic = Critic::new(config, straight_lane());
        let outlook = outlook(critic.update(&snapshot(me_at(3000.0, 2100.0), vec![base, minion])).unwrap());
        assert_eq!(outlook.state, BehaviorState::Fighter);
        assert_eq!(outlook.state_rule, "enemy_base_weak");
    }

    #[test]
    fn near_healthy_enemy_base_keeps_travelling() {
        let base = Unit::new(EntityId(90), UnitKind::Base, Faction::Renegades, Point::new(3300.0, 2000.0), 100.0)
            .with_health(1000, 1000);
        let minion = enemy(3, UnitKind::Minion, 3000.0, 2000.0);

        let mut critic = critic();
        let outlook = outlook(critic.update(&snapshot(me_at(3000.0, 2100.0), vec![base, minion])).unwrap());
        assert_eq!(outlook.state, BehaviorState::Traveller);
        assert_eq!(outlook.state_rule, "near_enemy_base");
        assert!(outlook.destination.is_some());
    }

    #[test]
    fn fallback_base_position_applies_when_base_unseen() {
        let minion = enemy(3, UnitKind::Minion, 3500.0, 450.0);
        let mut critic = Critic::new(AgentConfig::default(), LaneTable::default());
        let outlook = outlook(critic.update(&snapshot(me_at(3400.0, 500.0), vec![minion])).unwrap());
        assert_eq!(outlook.state_rule, "near_enemy_base");
    }

    #[test]
    fn waypoint_index_never_decreases() {
        let mut critic = critic();
        // Waypoints at x = 500, 1000, ..., 3000 on y = 2000.
        let path = [520.0, 1010.0, 1500.0, 600.0, 2000.0, 520.0];
        let mut previous = 0;
        for x in path {
            critic.update(&snapshot(me_at(x, 2000.0), Vec::new())).unwrap();
            assert!(critic.waypoint_index() >= previous, "regressed at x = {x}");
            previous = critic.waypoint_index();
        }
        assert_eq!(critic.waypoint_index(), 4);
    }

    #[test]
    fn jumping_ahead_can_reach_final_waypoint() {
        let mut critic = critic();
        for x in [2500.0, 2980.0, 3000.0] {
            critic.update(&snapshot(me_at(x, 2000.0), Vec::new())).unwrap();
        }
        // Reaching waypoint 4 moves on to 5, the final one.
        assert_eq!(critic.waypoint_index(), 5);
        assert_eq!(critic.flee_point(), Some(Point::new(2000.0, 2000.0)));
    }

    #[test]
    fn death_resets_progress() {
        let mut critic = critic();
        critic.update(&snapshot(me_at(1010.0, 2000.0), Vec::new())).unwrap();
        assert_eq!(critic.waypoint_index(), 2);

        let mut dead = me_at(1010.0, 2000.0);
        dead.unit.health = 0;
        let assessment = critic.update(&snapshot(dead, vec![enemy(3, UnitKind::Minion, 1100.0, 2000.0)]));
        assert_eq!(assessment, Ok(Assessment::Dead));
        assert_eq!(critic.waypoint_index(), 0);
        assert!(critic.surroundings().enemies.is_empty());
        assert_eq!(critic.target(), None);
    }

    #[test]
    fn unassigned_hero_is_rejected() {
        let mut critic = critic();
        let unit = Unit::new(EntityId(42), UnitKind::Hero, Faction::Academy, Point::new(10.0, 10.0), 35.0);
        let me = SelfState::new(unit, 0.0, 500.0);
        assert_eq!(
            critic.update(&snapshot(me, Vec::new())),
            Err(SnapshotError::UnassignedLane { id: EntityId(42) })
        );
    }
}
