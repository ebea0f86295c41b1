use crate::profile::Profile;
use crate::theme::Theme;
use crate::utils::*;
use chrono::prelude::*;
use concentration_core as game;
use game::{CardId, SessionEvent, SessionOutcome};
use gloo::timers::callback::{Interval, Timeout};
use yew::prelude::*;

fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

#[derive(Clone, Debug, PartialEq)]
enum ViewCardState {
    FaceDown,
    FaceUp(game::Symbol),
    Mismatched(game::Symbol),
    Matched(game::Symbol),
}

impl ViewCardState {
    fn symbol(&self) -> Option<&game::Symbol> {
        use ViewCardState::*;
        match self {
            FaceDown => None,
            FaceUp(symbol) | Mismatched(symbol) | Matched(symbol) => Some(symbol),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewGameState {
    Playing,
    Locked,
    Won,
    TimedOut,
}

/// A core session plus the wall-clock bookkeeping only the page cares about.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GameSession {
    pub session: game::Session,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl GameSession {
    fn config(profile: &Profile, seed: u32) -> game::SessionConfig {
        game::SessionConfig::new(profile.player.clone(), profile.mode, seed)
    }

    fn new(config: game::SessionConfig, now: DateTime<Utc>) -> game::Result<Self> {
        Ok(Self {
            session: game::Session::new(config)?,
            started_at: now,
            ended_at: None,
        })
    }

    /// Like [`GameSession::new`], but logs the failure for the page to show instead.
    fn start(config: game::SessionConfig, now: DateTime<Utc>) -> Option<Self> {
        match Self::new(config, now) {
            Ok(game) => Some(game),
            Err(err) => {
                log::error!("Could not start a game: {}", err);
                None
            }
        }
    }

    fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        (self.ended_at.unwrap_or(now) - self.started_at)
            .num_seconds()
            .max(0) as u32
    }

    /// Seconds shown on the counter: countdown in timed mode, elapsed time otherwise.
    fn clock_secs(&self, now: DateTime<Utc>) -> u32 {
        self.session
            .remaining_seconds()
            .unwrap_or_else(|| self.elapsed_secs(now))
    }

    fn view_state(&self) -> ViewGameState {
        use game::SessionState::*;
        match self.session.state() {
            Won => ViewGameState::Won,
            TimedOut => ViewGameState::TimedOut,
            Playing if self.session.board().is_locked() => ViewGameState::Locked,
            Playing => ViewGameState::Playing,
        }
    }

    fn card_state(&self, card: &game::Card) -> ViewCardState {
        let symbol = card.symbol().clone();
        if card.is_matched() {
            ViewCardState::Matched(symbol)
        } else if !card.is_revealed() {
            ViewCardState::FaceDown
        } else if self.session.board().is_locked() {
            ViewCardState::Mismatched(symbol)
        } else {
            ViewCardState::FaceUp(symbol)
        }
    }

    fn apply(&mut self, event: SessionEvent, now: DateTime<Utc>) -> game::Result<SessionOutcome> {
        let outcome = self.session.apply(event)?;
        if self.session.is_finished() && self.ended_at.is_none() {
            self.ended_at = Some(now);
        }
        Ok(outcome)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Flip(CardId),
    ResolveTimeout,
    Tick,
    NewGame,
    ToggleTheme,
    Logout,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    id: CardId,
    card_state: ViewCardState,
    callback: Callback<CardId>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    use ViewCardState::*;

    let CardProps {
        id,
        card_state,
        callback,
    } = props.clone();

    let class = classes!(
        "card",
        match card_state {
            FaceDown => classes!(),
            FaceUp(_) => classes!("revealed"),
            Mismatched(_) => classes!("revealed", "wrong"),
            Matched(_) => classes!("revealed", "matched"),
        }
    );
    let symbol = card_state
        .symbol()
        .map(ToString::to_string)
        .unwrap_or_default();

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", id);
        callback.emit(id);
    });

    html! {
        <div {class} {onclick} data-id={id.to_string()}>
            <div class="card-front"/>
            <div class="card-back">{symbol}</div>
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub profile: Profile,
    /// Force a seed instead of random
    #[prop_or_default]
    pub seed: Option<u32>,
    pub on_logout: Callback<()>,
}

pub(crate) struct GameView {
    game: Option<GameSession>,
    pending_timeout: Option<Timeout>,
    _tick_interval: Interval,
}

impl GameView {
    fn start_game(props: &GameProps) -> Option<GameSession> {
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("new game, seed: {}", seed);
        GameSession::start(GameSession::config(&props.profile, seed), utc_now())
    }

    fn is_finished(&self) -> bool {
        self.game
            .as_ref()
            .is_none_or(|game| game.session.is_finished())
    }

    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(game::TICK_INTERVAL_MS, move || link.send_message(Msg::Tick))
    }

    fn schedule_resolve(&mut self, ctx: &Context<Self>) {
        let link = ctx.link().clone();
        self.pending_timeout = Some(Timeout::new(game::MISMATCH_DELAY_MS, move || {
            link.send_message(Msg::ResolveTimeout)
        }));
    }

    fn dispatch(&mut self, ctx: &Context<Self>, event: SessionEvent) -> bool {
        let Some(game) = self.game.as_mut() else {
            return false;
        };
        let outcome = match game.apply(event, utc_now()) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::error!("{:?} rejected: {}", event, err);
                return false;
            }
        };
        log::debug!("{:?} -> {:?}", event, outcome);

        match outcome {
            SessionOutcome::Mismatched => self.schedule_resolve(ctx),
            SessionOutcome::Won | SessionOutcome::TimedOut => {
                // dropping the handle cancels a stale mismatch timer
                self.pending_timeout = None;
            }
            _ => {}
        }
        outcome.has_update()
    }

    fn banner(game: &GameSession) -> Option<String> {
        let session = &game.session;
        match game.view_state() {
            ViewGameState::Won => Some(format!(
                "🎉 Well done, {}! {} moves.",
                session.player_name(),
                session.total_moves()
            )),
            ViewGameState::TimedOut => Some(format!(
                "⏰ Time's up, {}! Stage {} of {}.",
                session.player_name(),
                session.stage_index() + 1,
                session.stage_count()
            )),
            ViewGameState::Playing | ViewGameState::Locked => None,
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            game: Self::start_game(ctx.props()),
            pending_timeout: None,
            _tick_interval: GameView::create_timer(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Flip(id) => self.dispatch(ctx, SessionEvent::Flip(id)),
            ResolveTimeout => {
                self.pending_timeout = None;
                if self.is_finished() {
                    log::trace!("stale mismatch timer ignored");
                    return false;
                }
                self.dispatch(ctx, SessionEvent::ResolveTimeout)
            }
            Tick => {
                let Some(game) = self.game.as_ref().filter(|game| !game.session.is_finished())
                else {
                    return false;
                };
                if game.session.mode().is_timed() {
                    self.dispatch(ctx, SessionEvent::Tick)
                } else {
                    // elapsed clock only
                    true
                }
            }
            NewGame => {
                self.pending_timeout = None;
                self.game = Self::start_game(ctx.props());
                true
            }
            ToggleTheme => {
                Theme::toggle();
                false
            }
            Logout => {
                ctx.props().on_logout.emit(());
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let cb_new_game = ctx.link().callback(|_: MouseEvent| Msg::NewGame);
        let cb_theme = ctx.link().callback(|_: MouseEvent| Msg::ToggleTheme);
        let cb_logout = ctx.link().callback(|_: MouseEvent| Msg::Logout);

        let Some(game) = &self.game else {
            return html! {
                <div class="concentration">
                    <p class="banner">{"⚠️ The game could not be started."}</p>
                    <footer>
                        <button onclick={cb_new_game}>{"Try again"}</button>
                        <button onclick={cb_logout}>{"Log out"}</button>
                    </footer>
                </div>
            };
        };

        let session = &game.session;
        let board = session.board();
        let locked = matches!(game.view_state(), ViewGameState::Locked);
        let clock = format_clock(game.clock_secs(utc_now()));
        let banner = Self::banner(game);

        let style = format!("grid-template-columns: repeat({}, auto)", board.cols());
        let callback = ctx.link().callback(Msg::Flip);

        html! {
            <div class="concentration">
                <nav>
                    <aside>{session.player_name()}</aside>
                    <span>{format!("Stage {}/{}", session.stage_index() + 1, session.stage_count())}</span>
                    <aside class={classes!(session.mode().is_timed().then_some("countdown"))}>{clock}</aside>
                </nav>
                <div class={classes!("board", locked.then_some("locked"))} {style}>
                    {
                        for board.cards().map(|card| {
                            let id = card.id();
                            let card_state = game.card_state(card);
                            let callback = callback.clone();
                            html! { <CardView {id} {card_state} {callback}/> }
                        })
                    }
                </div>
                <p>
                    {format!(
                        "Moves: {} · Total: {} · Pairs: {}",
                        board.move_count(),
                        session.total_moves(),
                        session.total_matches()
                    )}
                </p>
                if let Some(text) = banner {
                    <p class="banner">{text}</p>
                }
                <footer>
                    <button onclick={cb_new_game}>{"New game"}</button>
                    <button onclick={cb_theme}>{"Theme"}</button>
                    <button onclick={cb_logout}>{"Log out"}</button>
                </footer>
            </div>
        }
    }
}
