use crate::{
    GameEventBus, GameEventHandler, ManualTicker, ScoringEngine, SubscriptionId, TICK_INTERVAL,
    TeamRegistry, TickSource, TimerHandle, WordSelector, WordSupply,
};
use tracing::{debug, info};
use uuid::Uuid;
use wordpair_types::{
    EventKind, GameConfig, GameError, GameEvent, GameId, GameOutcome, RoundPhase, ScoreAction,
    Team, TeamIndex, WordPair,
};

/// Mutable per-game bookkeeping of the turn state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    pub current_team_index: TeamIndex,
    pub time_left: u32,
    pub phase: RoundPhase,
    pub target_reached_by: Option<TeamIndex>, // First team to reach the target
    pub current_word_pair: Option<WordPair>,
}

impl RoundState {
    pub fn new(round_time_seconds: u32, phase: RoundPhase) -> Self {
        Self {
            current_team_index: 0,
            time_left: round_time_seconds,
            phase,
            target_reached_by: None,
            current_word_pair: None,
        }
    }

    pub fn is_round_active(&self) -> bool {
        self.phase == RoundPhase::RoundActive
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == RoundPhase::GameOver
    }

    pub fn target_score_reached(&self) -> bool {
        self.target_reached_by.is_some()
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new(0, RoundPhase::Idle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No round was running; nothing changed.
    Ignored,
    Running { time_left: u32 },
    /// The tick ran the clock out and ended the round.
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    NextTeam(TeamIndex),
    GameOver(GameOutcome),
}

/// One game session: the round/turn state machine plus its collaborators.
///
/// Rejected operations return a [`GameError`] and leave the state untouched.
pub struct Game {
    id: GameId,
    config: Option<GameConfig>,
    teams: TeamRegistry,
    round: RoundState,
    selector: WordSelector,
    word_supply: Option<Box<dyn WordSupply>>,
    ticker: Box<dyn TickSource>,
    timer: Option<TimerHandle>,
    event_bus: GameEventBus,
}

impl Game {
    /// A game without a word supply (built-in words) and a manual tick source.
    pub fn new() -> Self {
        Self {
            id: Uuid::nil(),
            config: None,
            teams: TeamRegistry::default(),
            round: RoundState::default(),
            selector: WordSelector::new(),
            word_supply: None,
            ticker: Box::new(ManualTicker::new()),
            timer: None,
            event_bus: GameEventBus::new(),
        }
    }

    pub fn with_word_supply<S: WordSupply + 'static>(mut self, supply: S) -> Self {
        self.word_supply = Some(Box::new(supply));
        self
    }

    pub fn with_tick_source<T: TickSource + 'static>(mut self, ticker: T) -> Self {
        self.ticker = Box::new(ticker);
        self
    }

    pub fn with_word_selector(mut self, selector: WordSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn set_word_supply(&mut self, supply: Option<Box<dyn WordSupply>>) {
        self.word_supply = supply;
    }

    /// Start a new game. Scores of the given teams are reset to zero.
    pub fn init_game(
        &mut self,
        teams: Vec<Team>,
        round_time_seconds: u32,
        target_score: i32,
    ) -> Result<(), GameError> {
        self.init_with_config(GameConfig::new(teams, round_time_seconds, target_score))
    }

    pub fn init_with_config(&mut self, config: GameConfig) -> Result<(), GameError> {
        config.validate()?;

        self.stop_timer();
        self.id = Uuid::new_v4();
        self.teams = TeamRegistry::new(&config.teams);
        self.round = RoundState::new(config.round_time_seconds, RoundPhase::AwaitingRoundStart);
        self.selector.clear();

        let config = GameConfig {
            teams: self.teams.teams().to_vec(),
            ..config
        };
        info!(
            game_id = %self.id,
            teams = self.teams.len(),
            round_time = config.round_time_seconds,
            target_score = config.target_score,
            "Game initialized"
        );

        let event = GameEvent::GameInit {
            game_id: self.id,
            teams: config.teams.clone(),
            round_time_seconds: config.round_time_seconds,
            target_score: config.target_score,
        };
        self.config = Some(config);
        self.event_bus.publish(event);
        Ok(())
    }

    /// Start the current team's turn: reset the clock, start ticking, show a word.
    pub fn start_round(&mut self) -> Result<(), GameError> {
        let round_time = self.require_config()?.round_time_seconds;
        match self.round.phase {
            RoundPhase::Idle => return Err(GameError::NotInitialized),
            RoundPhase::GameOver => return Err(GameError::GameAlreadyCompleted),
            RoundPhase::RoundActive => return Err(GameError::RoundAlreadyActive),
            RoundPhase::RoundEnded => return Err(GameError::AwaitingNextTeam),
            RoundPhase::AwaitingRoundStart => {}
        }

        self.round.phase = RoundPhase::RoundActive;
        self.round.time_left = round_time;
        self.start_timer();

        let team_index = self.round.current_team_index;
        info!(team_index, time_left = round_time, "Round started");
        self.event_bus.publish(GameEvent::RoundStart {
            team_index,
            time_left: round_time,
        });

        self.draw_word_pair();
        Ok(())
    }

    /// Called by the host once per second while the timer runs.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.round.is_round_active() {
            debug!("Ignoring tick outside an active round");
            return TickOutcome::Ignored;
        }

        self.round.time_left = self.round.time_left.saturating_sub(1);
        let time_left = self.round.time_left;
        let fraction = match &self.config {
            Some(config) if config.round_time_seconds > 0 => {
                time_left as f32 / config.round_time_seconds as f32
            }
            _ => 0.0,
        };

        self.event_bus.publish(GameEvent::TimerTick {
            team_index: self.round.current_team_index,
            time_left,
            fraction,
        });

        if time_left == 0 {
            self.finish_round();
            return TickOutcome::Expired;
        }
        TickOutcome::Running { time_left }
    }

    /// End the active round early. The team stays current until
    /// [`Game::advance_to_next_team`] is called.
    pub fn end_round(&mut self) -> Result<(), GameError> {
        if self.round.is_game_over() {
            return Err(GameError::GameAlreadyCompleted);
        }
        if !self.round.is_round_active() {
            return Err(GameError::RoundNotActive);
        }
        self.finish_round();
        Ok(())
    }

    /// "End round / next team": closes the turn, then either finishes the
    /// game or hands the turn to the next team in order.
    pub fn advance_to_next_team(&mut self) -> Result<TurnOutcome, GameError> {
        let round_time = self.require_config()?.round_time_seconds;
        if self.round.is_game_over() {
            return Err(GameError::GameAlreadyCompleted);
        }

        self.stop_timer();
        if self.round.is_round_active() {
            self.finish_round();
        }

        if self.should_end_game() {
            return Ok(TurnOutcome::GameOver(self.finalize_game()));
        }

        let next = self.teams.next_index(self.round.current_team_index);
        self.round.current_team_index = next;
        self.round.phase = RoundPhase::AwaitingRoundStart;
        self.round.time_left = round_time;
        self.round.current_word_pair = None;

        info!(team_index = next, "Next team");
        self.event_bus.publish(GameEvent::NextTeam { team_index: next });
        Ok(TurnOutcome::NextTeam(next))
    }

    /// Add points to the current team and show the next word.
    ///
    /// Only allowed while a round is active. Negative deltas are allowed and
    /// scores are not clamped. Returns the team's new score.
    pub fn add_points(&mut self, points: i32) -> Result<i32, GameError> {
        let target_score = self.require_config()?.target_score;
        if self.round.is_game_over() {
            return Err(GameError::GameAlreadyCompleted);
        }
        if !self.round.is_round_active() {
            return Err(GameError::RoundNotActive);
        }

        let team_index = self.round.current_team_index;
        let Some(new_score) = self.teams.add_points(team_index, points) else {
            return Err(GameError::NotInitialized);
        };

        debug!(team_index, points, new_score, "Score changed");
        self.event_bus.publish(GameEvent::ScoreChange {
            team_index,
            points,
            new_score,
        });

        if !self.round.target_score_reached()
            && ScoringEngine::target_reached(self.teams.teams(), target_score)
        {
            self.round.target_reached_by = Some(team_index);
            info!(team_index, score = new_score, "Target score reached");
            self.event_bus.publish(GameEvent::TargetScoreReached {
                team_index,
                score: new_score,
            });
        }

        if self.round.is_round_active() && self.round.time_left > 0 {
            self.draw_word_pair();
        }

        Ok(new_score)
    }

    pub fn apply_action(&mut self, action: ScoreAction) -> Result<i32, GameError> {
        self.add_points(action.points())
    }

    /// Back to the first team with zero scores, keeping the configuration.
    /// Allowed at any time, including mid-round.
    pub fn reset_game(&mut self) {
        self.stop_timer();

        match &self.config {
            Some(config) => {
                self.teams.reset_scores();
                self.round =
                    RoundState::new(config.round_time_seconds, RoundPhase::AwaitingRoundStart);
            }
            None => self.round = RoundState::default(),
        }
        self.selector.clear();

        info!(game_id = %self.id, "Game reset");
        self.event_bus.publish(GameEvent::GameReset);
    }

    pub fn check_target_score_reached(&self) -> bool {
        self.config
            .as_ref()
            .is_some_and(|config| ScoringEngine::target_reached(self.teams.teams(), config.target_score))
    }

    pub fn should_end_game(&self) -> bool {
        self.config.as_ref().is_some_and(|config| {
            ScoringEngine::should_end_game(
                config.end_game_rule,
                self.round.target_reached_by,
                self.round.current_team_index,
                self.teams.len(),
            )
        })
    }

    fn finalize_game(&mut self) -> GameOutcome {
        self.stop_timer();
        let outcome = ScoringEngine::determine_winners(self.teams.teams());
        self.round.phase = RoundPhase::GameOver;

        info!(
            game_id = %self.id,
            winners = ?outcome.winner_indices,
            is_tie = outcome.is_tie,
            "Game over"
        );
        self.event_bus.publish(GameEvent::GameEnd(outcome.clone()));
        outcome
    }

    fn finish_round(&mut self) {
        self.stop_timer();
        self.round.phase = RoundPhase::RoundEnded;

        let team_index = self.round.current_team_index;
        info!(team_index, time_left = self.round.time_left, "Round ended");
        self.event_bus.publish(GameEvent::RoundEnd { team_index });
    }

    fn draw_word_pair(&mut self) {
        let pair = match self.word_supply.as_mut() {
            Some(supply) => self.selector.select(&mut **supply),
            None => self.selector.select_fallback(),
        };
        self.round.current_word_pair = Some(pair.clone());
        self.event_bus.publish(GameEvent::WordChange { word_pair: pair });
    }

    fn start_timer(&mut self) {
        self.stop_timer();
        self.timer = Some(self.ticker.schedule_repeating(TICK_INTERVAL));
    }

    fn stop_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.ticker.cancel(handle);
        }
    }

    fn require_config(&self) -> Result<&GameConfig, GameError> {
        self.config.as_ref().ok_or(GameError::NotInitialized)
    }

    // Subscriptions

    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + Send + 'static,
    {
        self.event_bus.subscribe(kind, handler)
    }

    pub fn subscribe_all<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + Send + 'static,
    {
        self.event_bus.subscribe_all(handler)
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) -> SubscriptionId {
        self.event_bus.add_handler(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.event_bus.unsubscribe(id)
    }

    // Read accessors

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn config(&self) -> Option<&GameConfig> {
        self.config.as_ref()
    }

    pub fn round_state(&self) -> &RoundState {
        &self.round
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase
    }

    pub fn teams(&self) -> &[Team] {
        self.teams.teams()
    }

    pub fn scores(&self) -> Vec<i32> {
        self.teams.scores()
    }

    pub fn current_team_index(&self) -> TeamIndex {
        self.round.current_team_index
    }

    pub fn current_team(&self) -> Option<&Team> {
        self.teams.get(self.round.current_team_index)
    }

    pub fn time_left(&self) -> u32 {
        self.round.time_left
    }

    pub fn is_round_active(&self) -> bool {
        self.round.is_round_active()
    }

    pub fn is_game_over(&self) -> bool {
        self.round.is_game_over()
    }

    pub fn target_score_reached(&self) -> bool {
        self.round.target_score_reached()
    }

    pub fn target_reached_by(&self) -> Option<TeamIndex> {
        self.round.target_reached_by
    }

    pub fn current_word_pair(&self) -> Option<&WordPair> {
        self.round.current_word_pair.as_ref()
    }

    pub fn used_word_count(&self) -> usize {
        self.selector.used_count()
    }

    /// The target was reached by another team; this turn is the last chance to catch up.
    pub fn is_last_chance(&self) -> bool {
        match self.round.target_reached_by {
            Some(index) => !self.round.is_game_over() && index != self.round.current_team_index,
            None => false,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        self.stop_timer();
    }
}
