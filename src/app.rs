use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::layout::Rect;

use crate::catalog::{self, ChainTab, Coin};
use crate::chart::{self, ChartPoint, Hover};
use crate::config::AppConfig;
use crate::error::ActionError;
use crate::lore::{LoreSource, generate_pack_lore};
use crate::market::{PriceFeed, seed_history};
use crate::pack::Pack;
use crate::schedule::Timer;

const MAX_MESSAGES: usize = 5;

pub const ETH_PRICE_USD: f64 = 3200.0;
pub const TOTAL_SUPPLY: u32 = 1000;
pub const OWNERS_COUNT: u32 = 142;
pub const STAKING_APY: f64 = 12.5;
pub const DAILY_VOLUME_MULTIPLIER: f64 = 1245.0;

#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Pointer { column: u16, row: u16 },
    Resize,
    WalletConnected,
    AccessPaid,
    Minted { ticket: u64, pack: Box<Pack> },
    PriceTick { session: u64 },
    HoldTick { session: u64 },
}

pub struct App {
    pub config: AppConfig,
    pub stage: Stage,
    pub ledger: Ledger,
    pub messages: VecDeque<String>,
    pub pending_withdraw: bool,
    pub should_quit: bool,
    tx: Sender<Event>,
    rng: StdRng,
    lore: Arc<dyn LoreSource>,
    next_ticket: u64,
    next_session: u64,
}

pub enum Stage {
    Locked(Gate),
    Curating(Curator),
    Minted(Box<MarketView>),
}

impl App {
    pub fn new(config: AppConfig, lore: Arc<dyn LoreSource>, tx: Sender<Event>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            ledger: Ledger::new(config.starting_balance),
            config,
            stage: Stage::Locked(Gate::default()),
            messages: VecDeque::new(),
            pending_withdraw: false,
            should_quit: false,
            tx,
            rng,
            lore,
            next_ticket: 0,
            next_session: 0,
        }
    }

    pub fn on_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.on_key(key),
            Event::Pointer { .. } | Event::Resize => {}
            Event::WalletConnected => {
                if let Stage::Locked(gate) = &mut self.stage {
                    if gate.finish_connect() {
                        tracing::info!("wallet connected");
                    }
                }
            }
            Event::AccessPaid => {
                let paid = matches!(&self.stage, Stage::Locked(gate) if gate.payment_pending());
                if paid {
                    self.unlock();
                }
            }
            Event::Minted { ticket, pack } => self.on_minted(ticket, *pack),
            Event::PriceTick { session } => {
                if let Stage::Minted(view) = &mut self.stage {
                    if view.session == session && view.simulation_active() {
                        let price = view.tick(&mut self.rng);
                        tracing::debug!(session, price, "price tick");
                    }
                }
            }
            Event::HoldTick { session } => {
                if let Stage::Minted(view) = &mut self.stage {
                    if view.session == session {
                        view.refresh_hold_time();
                    }
                }
            }
        }
    }

    /// Pointer movement over the terminal. `plot` is the chart's drawing
    /// area for the current frame.
    pub fn on_pointer(&mut self, column: u16, row: u16, plot: Rect) {
        if let Stage::Minted(view) = &mut self.stage {
            match chart::pointer_fraction(column, row, plot) {
                Some(fraction) => view.hover.on_pointer_move(&view.points, fraction),
                None => view.hover.on_pointer_leave(),
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.pending_withdraw {
            self.pending_withdraw = false;
            if matches!(key.code, KeyCode::Char('y' | 'Y')) {
                let result = self.ledger.withdraw();
                self.report(result.map(|amount| {
                    tracing::info!(amount, "balance withdrawn");
                    format!("Success! {amount:.4} ETH has been transferred to your wallet.")
                }));
            } else {
                self.push_message("Withdrawal cancelled");
            }
            return;
        }

        if let Stage::Curating(curator) = &mut self.stage {
            if curator.searching {
                curator.on_search_key(key);
                return;
            }
        }

        if matches!(key.code, KeyCode::Char('q' | 'Q')) {
            self.should_quit = true;
            return;
        }

        if key.code == KeyCode::Char('w') && !matches!(self.stage, Stage::Locked(_)) {
            self.request_withdraw();
            return;
        }

        match self.stage {
            Stage::Locked(_) => self.handle_gate_input(key),
            Stage::Curating(_) => self.handle_curator_input(key),
            Stage::Minted(_) => self.handle_market_input(key),
        }
    }

    fn handle_gate_input(&mut self, key: KeyEvent) {
        if key.code != KeyCode::Enter {
            return;
        }
        let timings = self.config.timings.clone();
        let tx = self.tx.clone();
        if let Stage::Locked(gate) = &mut self.stage {
            gate.advance(&timings, tx);
        }
    }

    fn handle_curator_input(&mut self, key: KeyEvent) {
        let max = self.config.max_pack_size;
        let Stage::Curating(curator) = &mut self.stage else {
            return;
        };
        match key.code {
            KeyCode::Up => curator.select_previous(),
            KeyCode::Down => curator.select_next(),
            KeyCode::Tab => curator.cycle_tab(),
            KeyCode::Char('/') => curator.searching = true,
            KeyCode::Enter | KeyCode::Char(' ') => {
                let result = curator.toggle_highlighted(max);
                if let Err(err) = result {
                    self.push_message(err.to_string());
                }
            }
            KeyCode::Char('m') => {
                let result = self.request_mint();
                self.report(result);
            }
            _ => {}
        }
    }

    fn handle_market_input(&mut self, key: KeyEvent) {
        let period = self.config.timings.price_tick;
        let tx = self.tx.clone();
        let Stage::Minted(view) = &mut self.stage else {
            return;
        };

        if view.share_open {
            match key.code {
                KeyCode::Char('c') => {
                    let link = view.pack.share_link();
                    tracing::info!(%link, "share link copied");
                    self.push_message(format!("Link copied: {link}"));
                }
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('h') => view.share_open = false,
                _ => {}
            }
            return;
        }

        let result = match key.code {
            KeyCode::Char('b') => view.buy(&mut self.ledger),
            KeyCode::Char('s') => view.sell(&mut self.ledger),
            KeyCode::Char('k') => view.stake(),
            KeyCode::Char('u') => view.unstake(),
            KeyCode::Char(' ') => Ok(view.toggle_simulation(period, tx)),
            KeyCode::Char('h') => {
                view.share_open = true;
                return;
            }
            KeyCode::Esc | KeyCode::Backspace => {
                self.back_to_curator();
                return;
            }
            _ => return,
        };
        self.report(result);
    }

    fn request_withdraw(&mut self) {
        if self.ledger.balance <= 0.0 {
            self.push_message(ActionError::NoFundsToWithdraw.to_string());
            return;
        }
        self.pending_withdraw = true;
        self.push_message(format!(
            "Withdraw {:.4} ETH to connected wallet? [y/n]",
            self.ledger.balance
        ));
    }

    /// Validates the curated selection, seeds the pack's price history and
    /// hands the rest of the mint to a worker thread.
    pub fn request_mint(&mut self) -> Result<String, ActionError> {
        let cost = self.config.mint_cost;
        let (min, max) = (self.config.min_pack_size, self.config.max_pack_size);
        let Stage::Curating(curator) = &mut self.stage else {
            return Err(ActionError::MintInFlight);
        };
        if curator.minting.is_some() {
            return Err(ActionError::MintInFlight);
        }
        let selected = curator.selected.len();
        if selected < min || selected > max {
            return Err(ActionError::InvalidPackSize { selected, min, max });
        }
        self.ledger.ensure(cost)?;

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        curator.minting = Some(ticket);

        let history = seed_history(cost, &self.config.sim, &mut self.rng);
        let draft = Pack::draft(curator.selected.clone(), &self.config.owner, history);
        tracing::info!(ticket, pack = %draft.id, coins = selected, "mint submitted");

        let tx = self.tx.clone();
        let lore = Arc::clone(&self.lore);
        let confirmation = self.config.timings.mint_confirmation;
        thread::spawn(move || {
            thread::sleep(confirmation);
            let copy = generate_pack_lore(lore.as_ref(), &draft.coins, &draft.owner);
            let pack = draft.finish(copy);
            // The receiver is gone when the app quit mid-mint.
            let _ = tx.send(Event::Minted {
                ticket,
                pack: Box::new(pack),
            });
        });

        Ok("AI minting...".to_string())
    }

    fn on_minted(&mut self, ticket: u64, pack: Pack) {
        let cost = self.config.mint_cost;
        let Stage::Curating(curator) = &mut self.stage else {
            tracing::debug!(ticket, "discarding mint result for closed view");
            return;
        };
        if curator.minting != Some(ticket) {
            tracing::debug!(ticket, "discarding stale mint result");
            return;
        }
        curator.minting = None;
        if let Err(err) = self.ledger.debit(cost) {
            self.push_message(err.to_string());
            return;
        }
        tracing::info!(pack = %pack.id, name = %pack.name, tx = %pack.tx_hash, "pack minted");
        self.push_message(format!("Minted {} (tx {})", pack.name, pack.short_tx_hash()));
        self.enter_market(pack);
    }

    fn unlock(&mut self) {
        tracing::info!("access unlocked");
        self.stage = Stage::Curating(Curator::default());
        self.push_message("Access granted. Curate your pack.");
    }

    fn enter_market(&mut self, pack: Pack) {
        self.next_session += 1;
        let view = MarketView::open(pack, self.next_session, &self.config, self.tx.clone());
        self.stage = Stage::Minted(Box::new(view));
    }

    fn back_to_curator(&mut self) {
        // Replacing the stage drops the market view and its timers.
        self.stage = Stage::Curating(Curator::default());
        tracing::info!("returned to curator");
    }

    fn report(&mut self, result: Result<String, ActionError>) {
        match result {
            Ok(msg) => self.push_message(msg),
            Err(err) => self.push_message(err.to_string()),
        }
    }

    fn push_message(&mut self, msg: impl Into<String>) {
        self.messages.push_front(msg.into());
        while self.messages.len() > MAX_MESSAGES {
            self.messages.pop_back();
        }
    }
}

/// The single in-memory mock account.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    pub balance: f64,
}

impl Ledger {
    pub fn new(balance: f64) -> Self {
        Self { balance }
    }

    pub fn ensure(&self, amount: f64) -> Result<(), ActionError> {
        if self.balance >= amount {
            Ok(())
        } else {
            Err(ActionError::InsufficientFunds {
                needed: amount,
                available: self.balance,
            })
        }
    }

    pub fn debit(&mut self, amount: f64) -> Result<(), ActionError> {
        self.ensure(amount)?;
        self.balance -= amount;
        Ok(())
    }

    pub fn credit(&mut self, amount: f64) {
        self.balance += amount;
    }

    pub fn withdraw(&mut self) -> Result<f64, ActionError> {
        if self.balance <= 0.0 {
            return Err(ActionError::NoFundsToWithdraw);
        }
        let amount = self.balance;
        self.balance = 0.0;
        Ok(amount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateStep {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Paying,
}

#[derive(Debug, Default)]
pub struct Gate {
    pub step: GateStep,
    timer: Option<Timer>,
}

impl Gate {
    fn advance(&mut self, timings: &crate::config::Timings, tx: Sender<Event>) {
        match self.step {
            GateStep::Disconnected => {
                self.step = GateStep::Connecting;
                self.timer = Some(Timer::once(timings.wallet_connect, tx, Event::WalletConnected));
            }
            GateStep::Connected => {
                self.step = GateStep::Paying;
                self.timer = Some(Timer::once(timings.access_payment, tx, Event::AccessPaid));
            }
            GateStep::Connecting | GateStep::Paying => {}
        }
    }

    fn finish_connect(&mut self) -> bool {
        if self.step == GateStep::Connecting {
            self.step = GateStep::Connected;
            true
        } else {
            false
        }
    }

    fn payment_pending(&self) -> bool {
        self.step == GateStep::Paying
    }
}

#[derive(Debug, Default)]
pub struct Curator {
    pub query: String,
    pub searching: bool,
    pub tab: ChainTab,
    pub cursor: usize,
    pub selected: Vec<&'static Coin>,
    /// Ticket of the mint awaiting its lore reply.
    pub minting: Option<u64>,
}

impl Curator {
    pub fn visible(&self) -> Vec<&'static Coin> {
        catalog::filter(&self.query, self.tab)
    }

    pub fn is_selected(&self, coin: &Coin) -> bool {
        self.selected.iter().any(|c| c.id == coin.id)
    }

    pub fn toggle(&mut self, coin: &'static Coin, max: usize) -> Result<(), ActionError> {
        if let Some(pos) = self.selected.iter().position(|c| c.id == coin.id) {
            self.selected.remove(pos);
            return Ok(());
        }
        if self.selected.len() >= max {
            return Err(ActionError::PackFull { max });
        }
        self.selected.push(coin);
        Ok(())
    }

    fn toggle_highlighted(&mut self, max: usize) -> Result<(), ActionError> {
        let visible = self.visible();
        match visible.get(self.cursor) {
            Some(coin) => self.toggle(coin, max),
            None => Ok(()),
        }
    }

    fn select_next(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % len;
    }

    fn select_previous(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        if self.cursor == 0 {
            self.cursor = len - 1;
        } else {
            self.cursor -= 1;
        }
    }

    fn cycle_tab(&mut self) {
        self.tab = self.tab.next();
        self.cursor = 0;
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.searching = false,
            KeyCode::Backspace => {
                self.query.pop();
                self.cursor = 0;
            }
            KeyCode::Char(ch) => {
                self.query.push(ch);
                self.cursor = 0;
            }
            _ => {}
        }
    }
}

pub struct MarketView {
    pub pack: Pack,
    pub feed: PriceFeed,
    pub points: Vec<ChartPoint>,
    pub hover: Hover,
    pub holdings: u32,
    pub staked: u32,
    pub share_open: bool,
    pub hold_time: String,
    session: u64,
    geometry: chart::ChartGeometry,
    price_timer: Option<Timer>,
    _hold_timer: Timer,
}

impl MarketView {
    fn open(pack: Pack, session: u64, config: &AppConfig, tx: Sender<Event>) -> Self {
        let feed = PriceFeed::new(pack.price_history.clone(), config.sim);
        let points = chart::project(feed.history(), &config.chart);
        let price_timer = Timer::repeating(
            config.timings.price_tick,
            tx.clone(),
            Event::PriceTick { session },
        );
        let hold_timer = Timer::repeating(
            config.timings.hold_refresh,
            tx,
            Event::HoldTick { session },
        );
        let mut view = Self {
            pack,
            feed,
            points,
            hover: Hover::default(),
            holdings: 1,
            staked: 0,
            share_open: false,
            hold_time: String::new(),
            session,
            geometry: config.chart,
            price_timer: Some(price_timer),
            _hold_timer: hold_timer,
        };
        view.refresh_hold_time();
        view
    }

    pub fn price(&self) -> f64 {
        self.feed.price()
    }

    pub fn simulation_active(&self) -> bool {
        self.price_timer.is_some()
    }

    fn tick(&mut self, rng: &mut StdRng) -> f64 {
        let price = self.feed.tick(rng);
        self.pack.current_price = price;
        self.pack.price_history = self.feed.history().clone();
        self.points = chart::project(self.feed.history(), &self.geometry);
        price
    }

    fn refresh_hold_time(&mut self) {
        let held = (Utc::now() - self.pack.created_at)
            .to_std()
            .unwrap_or(Duration::ZERO);
        self.hold_time = format_hold_time(held);
    }

    fn toggle_simulation(&mut self, period: Duration, tx: Sender<Event>) -> String {
        if self.price_timer.take().is_some() {
            tracing::info!(session = self.session, "simulation paused");
            "Market simulation paused".to_string()
        } else {
            self.price_timer = Some(Timer::repeating(
                period,
                tx,
                Event::PriceTick {
                    session: self.session,
                },
            ));
            tracing::info!(session = self.session, "simulation resumed");
            "Market simulation live".to_string()
        }
    }

    fn buy(&mut self, ledger: &mut Ledger) -> Result<String, ActionError> {
        let price = self.price();
        ledger.debit(price)?;
        self.holdings += 1;
        Ok(format!("Bought 1 pack for {price:.4} ETH"))
    }

    fn sell(&mut self, ledger: &mut Ledger) -> Result<String, ActionError> {
        if self.holdings == 0 {
            return Err(ActionError::NothingToSell);
        }
        let price = self.price();
        self.holdings -= 1;
        ledger.credit(price);
        Ok(format!("Sold 1 pack for {price:.4} ETH"))
    }

    fn stake(&mut self) -> Result<String, ActionError> {
        if self.holdings == 0 {
            return Err(ActionError::NothingToStake);
        }
        self.holdings -= 1;
        self.staked += 1;
        Ok("Staked 1 pack".to_string())
    }

    fn unstake(&mut self) -> Result<String, ActionError> {
        if self.staked == 0 {
            return Err(ActionError::NothingStaked);
        }
        self.staked -= 1;
        self.holdings += 1;
        Ok("Unstaked 1 pack".to_string())
    }

    pub fn percent_change(&self) -> f64 {
        self.feed.percent_change()
    }

    pub fn usd_value(&self) -> f64 {
        self.price() * ETH_PRICE_USD
    }

    pub fn daily_volume(&self) -> f64 {
        self.price() * DAILY_VOLUME_MULTIPLIER
    }

    pub fn holdings_value(&self) -> f64 {
        self.holdings as f64 * self.price()
    }

    pub fn daily_rewards(&self) -> f64 {
        self.staked as f64 * self.price() * (STAKING_APY / 100.0 / 365.0)
    }
}

pub fn format_hold_time(held: Duration) -> String {
    let seconds = held.as_secs();
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    if days > 0 {
        format!("{}d {}h", days, hours % 24)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else {
        format!("{}m {}s", minutes, seconds % 60)
    }
}

pub fn format_percent(change: f64) -> String {
    let arrow = if change >= 0.0 { '▲' } else { '▼' };
    format!("{} {:.2}%", arrow, change.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATALOG;
    use crate::lore::Offline;
    use crate::market::PriceHistory;
    use std::sync::mpsc::{self, Receiver};

    fn quiet_config() -> AppConfig {
        let mut config = AppConfig {
            seed: Some(3),
            ..AppConfig::default()
        };
        // Long periods keep background timers out of the way.
        config.timings.price_tick = Duration::from_secs(3600);
        config.timings.hold_refresh = Duration::from_secs(3600);
        config.timings.mint_confirmation = Duration::ZERO;
        config
    }

    fn app() -> (App, Receiver<Event>) {
        let (tx, rx) = mpsc::channel();
        (App::new(quiet_config(), Arc::new(Offline), tx), rx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn curating(app: &mut App) -> &mut Curator {
        match &mut app.stage {
            Stage::Curating(c) => c,
            _ => panic!("not curating"),
        }
    }

    fn market(app: &App) -> &MarketView {
        match &app.stage {
            Stage::Minted(v) => v,
            _ => panic!("not in market"),
        }
    }

    fn minted_app() -> (App, Receiver<Event>) {
        let (mut app, rx) = app();
        app.unlock();
        let pack = Pack::draft(
            CATALOG.iter().take(3).collect(),
            "0x71...3A9f",
            PriceHistory::from(vec![0.05, 0.5]),
        );
        app.enter_market(pack);
        (app, rx)
    }

    #[test]
    fn ledger_blocks_overdraft() {
        let mut ledger = Ledger::new(1.0);
        assert!(ledger.debit(0.4).is_ok());
        assert!(matches!(
            ledger.debit(0.7),
            Err(ActionError::InsufficientFunds { .. })
        ));
        assert!((ledger.balance - 0.6).abs() < 1e-12);
        let amount = ledger.withdraw().unwrap();
        assert!((amount - 0.6).abs() < 1e-12);
        assert_eq!(ledger.withdraw(), Err(ActionError::NoFundsToWithdraw));
    }

    #[test]
    fn gate_walks_through_connect_and_payment() {
        let (mut app, _rx) = app();
        app.on_key(key(KeyCode::Enter));
        assert!(matches!(&app.stage, Stage::Locked(g) if g.step == GateStep::Connecting));
        app.on_key(key(KeyCode::Enter));
        assert!(matches!(&app.stage, Stage::Locked(g) if g.step == GateStep::Connecting));
        app.on_event(Event::WalletConnected);
        app.on_key(key(KeyCode::Enter));
        assert!(matches!(&app.stage, Stage::Locked(g) if g.step == GateStep::Paying));
        app.on_event(Event::AccessPaid);
        assert!(matches!(app.stage, Stage::Curating(_)));
    }

    #[test]
    fn early_payment_event_is_ignored() {
        let (mut app, _rx) = app();
        app.on_event(Event::AccessPaid);
        assert!(matches!(app.stage, Stage::Locked(_)));
    }

    #[test]
    fn curator_caps_selection() {
        let mut curator = Curator::default();
        for coin in CATALOG.iter().take(7) {
            curator.toggle(coin, 7).unwrap();
        }
        assert_eq!(
            curator.toggle(&CATALOG[7], 7),
            Err(ActionError::PackFull { max: 7 })
        );
        curator.toggle(&CATALOG[0], 7).unwrap();
        assert_eq!(curator.selected.len(), 6);
        assert!(!curator.is_selected(&CATALOG[0]));
    }

    #[test]
    fn mint_rejects_small_packs() {
        let (mut app, _rx) = app();
        app.unlock();
        curating(&mut app).toggle(&CATALOG[0], 7).unwrap();
        assert_eq!(
            app.request_mint(),
            Err(ActionError::InvalidPackSize {
                selected: 1,
                min: 3,
                max: 7
            })
        );
    }

    #[test]
    fn mint_requires_funds() {
        let (tx, _rx) = mpsc::channel();
        let config = AppConfig {
            starting_balance: 0.01,
            ..quiet_config()
        };
        let mut app = App::new(config, Arc::new(Offline), tx);
        app.unlock();
        for coin in CATALOG.iter().take(3) {
            curating(&mut app).toggle(coin, 7).unwrap();
        }
        assert!(matches!(
            app.request_mint(),
            Err(ActionError::InsufficientFunds { .. })
        ));
    }

    #[test]
    fn mint_is_guarded_and_completes() {
        let (mut app, rx) = app();
        app.unlock();
        for coin in CATALOG.iter().take(4) {
            curating(&mut app).toggle(coin, 7).unwrap();
        }
        assert!(app.request_mint().is_ok());
        assert_eq!(app.request_mint(), Err(ActionError::MintInFlight));

        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(event, Event::Minted { .. }));
        app.on_event(event);

        let view = market(&app);
        assert_eq!(view.pack.name, "ThewClub Select Pack");
        assert_eq!(view.pack.coins.len(), 4);
        assert_eq!(view.pack.price_history.len(), 21);
        assert_eq!(view.holdings, 1);
        assert!((app.ledger.balance - 4.95).abs() < 1e-9);
    }

    #[test]
    fn stale_mint_result_is_discarded() {
        let (mut app, _rx) = app();
        app.unlock();
        let pack = Pack::draft(CATALOG.iter().take(3).collect(), "w", PriceHistory::from(vec![0.05]));
        app.on_event(Event::Minted {
            ticket: 42,
            pack: Box::new(pack),
        });
        assert!(matches!(app.stage, Stage::Curating(_)));
        assert_eq!(app.ledger.balance, 5.0);
    }

    #[test]
    fn buy_sell_stake_round() {
        let (mut app, _rx) = minted_app();
        app.on_key(key(KeyCode::Char('b')));
        assert_eq!(market(&app).holdings, 2);
        assert!((app.ledger.balance - 4.5).abs() < 1e-9);

        app.on_key(key(KeyCode::Char('k')));
        app.on_key(key(KeyCode::Char('k')));
        assert_eq!(market(&app).staked, 2);
        assert_eq!(market(&app).holdings, 0);

        app.on_key(key(KeyCode::Char('s')));
        assert_eq!(app.messages.front().map(String::as_str), Some("No packs to sell"));

        app.on_key(key(KeyCode::Char('u')));
        app.on_key(key(KeyCode::Char('s')));
        assert_eq!(market(&app).holdings, 0);
        assert_eq!(market(&app).staked, 1);
        assert!((app.ledger.balance - 5.0).abs() < 1e-9);
        let expected = 0.5 * (12.5 / 100.0 / 365.0);
        assert!((market(&app).daily_rewards() - expected).abs() < 1e-12);
    }

    #[test]
    fn buy_blocked_without_funds() {
        let (mut app, _rx) = minted_app();
        app.ledger.balance = 0.1;
        app.on_key(key(KeyCode::Char('b')));
        assert_eq!(market(&app).holdings, 1);
        assert!(app.messages.front().unwrap().starts_with("Insufficient funds!"));
    }

    #[test]
    fn ticks_only_apply_to_live_session() {
        let (mut app, _rx) = minted_app();
        let session = market(&app).session;
        app.on_event(Event::PriceTick { session });
        assert_eq!(market(&app).feed.history().len(), 3);
        assert_eq!(market(&app).points.len(), 3);

        app.on_event(Event::PriceTick { session: session + 9 });
        assert_eq!(market(&app).feed.history().len(), 3);

        app.on_key(key(KeyCode::Char(' ')));
        assert!(!market(&app).simulation_active());
        app.on_event(Event::PriceTick { session });
        assert_eq!(market(&app).feed.history().len(), 3);

        app.on_key(key(KeyCode::Esc));
        assert!(matches!(app.stage, Stage::Curating(_)));
        app.on_event(Event::PriceTick { session });
        assert!(matches!(app.stage, Stage::Curating(_)));
    }

    #[test]
    fn pointer_drives_hover() {
        let (mut app, _rx) = minted_app();
        let plot = Rect::new(0, 0, 11, 5);
        app.on_pointer(10, 2, plot);
        assert_eq!(market(&app).hover.state().map(|h| h.index), Some(1));
        app.on_pointer(40, 2, plot);
        assert!(market(&app).hover.state().is_none());
    }

    #[test]
    fn withdraw_needs_confirmation() {
        let (mut app, _rx) = app();
        app.unlock();
        app.on_key(key(KeyCode::Char('w')));
        assert!(app.pending_withdraw);
        app.on_key(key(KeyCode::Char('n')));
        assert_eq!(app.ledger.balance, 5.0);

        app.on_key(key(KeyCode::Char('w')));
        app.on_key(key(KeyCode::Char('y')));
        assert_eq!(app.ledger.balance, 0.0);

        app.on_key(key(KeyCode::Char('w')));
        assert!(!app.pending_withdraw);
        assert_eq!(app.messages.front().map(String::as_str), Some("No funds to withdraw."));
    }

    #[test]
    fn search_mode_captures_keys() {
        let (mut app, _rx) = app();
        app.unlock();
        app.on_key(key(KeyCode::Char('/')));
        for ch in "quest".chars() {
            app.on_key(key(KeyCode::Char(ch)));
        }
        assert!(!app.should_quit);
        assert_eq!(curating(&mut app).query, "quest");
        app.on_key(key(KeyCode::Enter));
        assert!(!curating(&mut app).searching);
    }

    #[test]
    fn ctrl_c_quits_while_searching() {
        let (mut app, _rx) = app();
        app.unlock();
        app.on_key(key(KeyCode::Char('/')));
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
        assert_eq!(curating(&mut app).query, "");
    }

    #[test]
    fn hold_time_formats() {
        assert_eq!(format_hold_time(Duration::from_secs(75)), "1m 15s");
        assert_eq!(format_hold_time(Duration::from_secs(2 * 3600 + 60 * 5)), "2h 5m");
        assert_eq!(format_hold_time(Duration::from_secs(26 * 3600)), "1d 2h");
    }
}
